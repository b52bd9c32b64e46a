//! Report pipelines over the university database.
//!
//! Each reporter pairs a clap `Args` struct with a `run_*` entry point:
//! resolve configuration, open a session, fetch, export, close. Sessions are
//! released on every exit path; the export result is captured before the
//! close so failures still propagate afterwards.

pub mod chart;
pub mod enrollment;
pub mod metadata;
pub mod overlap;
pub mod salary;

pub use enrollment::{run_enrollment, EnrollmentArgs};
pub use metadata::{run_metadata, MetadataArgs};
pub use overlap::run_overlap;
pub use salary::{run_salary, SalaryArgs};
