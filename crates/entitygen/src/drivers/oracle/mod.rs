//! Oracle database driver.
//!
//! - [`OracleDialect`]: SQL syntax strategy, always available
//! - `OracleReader`: column metadata reader, built with the `oracle` feature
//!
//! # Feature Flag
//!
//! The reader links against ODPI-C and needs Oracle Instant Client at
//! runtime, so it is opt-in:
//!
//! ```toml
//! [dependencies]
//! entitygen = { version = "0.3", features = ["oracle"] }
//! ```
//!
//! # Connection String
//!
//! ```text
//! user/password@//host:1521/service_name
//! user/password@TNS_ALIAS
//! ```

mod dialect;
#[cfg(feature = "oracle")]
mod reader;

pub use dialect::OracleDialect;
#[cfg(feature = "oracle")]
pub use reader::OracleReader;

use crate::error::{GenError, Result};

/// Credentials and connect descriptor parsed from an Oracle DSN.
#[derive(Clone, PartialEq, Eq)]
pub struct OracleDsn {
    pub user: String,
    pub password: String,
    pub connect_string: String,
}

impl OracleDsn {
    /// Parse `user/password@connect_string`.
    ///
    /// The connect string is everything after the last `@`, so passwords may
    /// contain `@` but connect strings may not.
    pub fn parse(dsn: &str) -> Result<Self> {
        let invalid = || {
            GenError::connection(
                "oracle",
                "invalid DSN: expected user/password@connect_string",
            )
        };

        let (user, rest) = dsn.split_once('/').ok_or_else(invalid)?;
        let (password, connect_string) = rest.rsplit_once('@').ok_or_else(invalid)?;
        if user.is_empty() || connect_string.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            user: user.to_string(),
            password: password.to_string(),
            connect_string: connect_string.to_string(),
        })
    }
}

impl std::fmt::Debug for OracleDsn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleDsn")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("connect_string", &self.connect_string)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_easy_connect() {
        let dsn = OracleDsn::parse("scott/tiger@//db.example.com:1521/ORCLPDB1").unwrap();
        assert_eq!(dsn.user, "scott");
        assert_eq!(dsn.password, "tiger");
        assert_eq!(dsn.connect_string, "//db.example.com:1521/ORCLPDB1");
    }

    #[test]
    fn test_parse_descriptor() {
        let dsn = OracleDsn::parse(
            "app/secret@(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST=db)(PORT=1521))(CONNECT_DATA=(SERVICE_NAME=svc)))",
        )
        .unwrap();
        assert_eq!(dsn.user, "app");
        assert!(dsn.connect_string.starts_with("(DESCRIPTION="));
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!(OracleDsn::parse("scott@db").is_err());
        assert!(OracleDsn::parse("scott/tiger").is_err());
        assert!(OracleDsn::parse("/tiger@db").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let dsn = OracleDsn::parse("scott/tiger_secret@db").unwrap();
        let debug_output = format!("{:?}", dsn);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tiger_secret"));
    }
}
