//! MySQL/MariaDB SQL dialect (Strategy pattern).
//!
//! Provides MySQL-specific parameter placeholders and the metadata query.

use crate::core::traits::{information_schema_query, Dialect};

/// MySQL/MariaDB dialect implementation.
///
/// Compatible with MySQL 5.7+, 8.0+, and MariaDB 10.2+.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Create a new MySQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn param_placeholder(&self, _index: usize) -> String {
        // MySQL uses ? for all parameters
        "?".to_string()
    }

    fn metadata_query(&self) -> String {
        // CAST to CHAR to handle collation and type differences across versions
        information_schema_query(self, "CHAR(255)")
    }
}
