//! Schema metadata from `information_schema`.

use registrar_core::Result;

use crate::{query_err, Session};

// information_schema identifier columns are typed as domains over `name`;
// the ::text casts keep row decoding on plain strings. Constraint names are
// aggregated per column, alphabetically for stable output.
const TABLE_COLUMNS: &str = r#"
select s.table_name::text as table_name,
       s.column_name::text as column_name,
       s.data_type::text as data_type,
       string_agg(c.constraint_name::text, ', ' order by c.constraint_name) as constraints
from information_schema.columns as s
left join information_schema.key_column_usage as c
    on s.table_name = c.table_name and s.column_name = c.column_name
where s.table_schema = 'public'
group by s.table_name, s.column_name, s.data_type
order by s.table_name, s.column_name
"#;

/// One column of one public table, with its key-constraint memberships.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TableColumn {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub constraints: Option<String>,
}

impl Session {
    /// Column-level metadata for every table in the public schema.
    pub async fn fetch_table_columns(&self) -> Result<Vec<TableColumn>> {
        sqlx::query_as(TABLE_COLUMNS)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("table_columns"))
    }
}
