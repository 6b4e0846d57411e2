//! Oracle SQL dialect (Strategy pattern).
//!
//! Oracle has no INFORMATION_SCHEMA; column metadata comes from the
//! `ALL_TAB_COLUMNS` catalog view, matched case-insensitively on table name
//! and owner.

use crate::core::traits::Dialect;

/// Oracle dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct OracleDialect;

impl OracleDialect {
    /// Create a new Oracle dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &str {
        "oracle"
    }

    fn param_placeholder(&self, index: usize) -> String {
        format!(":{}", index)
    }

    fn metadata_query(&self) -> String {
        format!(
            "SELECT COLUMN_NAME, DATA_TYPE, TO_CHAR(DATA_SCALE), NULLABLE \
             FROM ALL_TAB_COLUMNS \
             WHERE UPPER(TABLE_NAME) = UPPER({}) AND UPPER(OWNER) = UPPER({}) \
             ORDER BY COLUMN_ID",
            self.param_placeholder(1),
            self.param_placeholder(2)
        )
    }
}
