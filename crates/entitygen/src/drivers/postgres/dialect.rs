//! PostgreSQL SQL dialect (Strategy pattern).
//!
//! Provides PostgreSQL-specific parameter placeholders, the metadata query and
//! native type spelling.

use crate::core::traits::{information_schema_query, Dialect};

/// PostgreSQL dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Create a new PostgreSQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn param_placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn metadata_query(&self) -> String {
        information_schema_query(self, "VARCHAR")
    }

    fn normalize_type(&self, native_type: &str) -> String {
        // information_schema reports the SQL-standard long forms
        let upper = native_type.trim().to_uppercase();
        match upper.as_str() {
            "CHARACTER VARYING" => "VARCHAR".to_string(),
            "CHARACTER" => "CHAR".to_string(),
            _ => upper,
        }
    }

    fn default_schema(&self) -> Option<&'static str> {
        Some("public")
    }
}
