//! Database access for the registrar reporting tools.
//!
//! One [`Session`] per pipeline run: connect, issue read-only queries, close.
//! Rows cross this boundary as typed values. Each query module maps its raw
//! rows into `registrar-core` types (or small typed row structs) before
//! returning, so nothing downstream handles loose tuples.

pub mod catalog;
pub mod config;
pub mod enrollment;
pub mod salary;
pub mod sections;

pub use catalog::TableColumn;
pub use config::DbConfig;
pub use enrollment::{DeptEnrollmentRow, EnrollmentRow};
pub use salary::SalaryStats;

use registrar_core::{ReportError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

/// A single short-lived database session.
///
/// Wraps a one-connection pool: the reporters are sequential batch jobs and
/// never need more.
pub struct Session {
    pool: PgPool,
}

impl Session {
    /// Connect using the resolved configuration.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&config.url)
            .await
            .map_err(|e| ReportError::connection(e.to_string()))?;
        debug!("database session opened");
        Ok(Self { pool })
    }

    /// Release the connection. Safe to call more than once; dropping the
    /// session without calling it also cleans up.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("database session closed");
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a driver error into [`ReportError::Query`] tagged with the query name.
pub(crate) fn query_err(name: &'static str) -> impl FnOnce(sqlx::Error) -> ReportError {
    move |e| ReportError::query(name, e.to_string())
}
