//! Common utilities shared across database drivers.
//!
//! - [`tls`]: TLS configuration for PostgreSQL connections
//! - [`decode_row`]: turns the four text columns of a metadata row into a
//!   [`ColumnDescriptor`]

pub mod tls;

pub use tls::{split_ssl_mode, SslMode, TlsBuilder};

use crate::core::schema::ColumnDescriptor;
use crate::core::traits::Dialect;
use crate::error::{GenError, Result};

/// Raw text of one metadata row, as every driver reads it.
#[derive(Debug, Clone, Default)]
pub struct RawColumnRow {
    pub name: Option<String>,
    pub native_type: Option<String>,
    pub scale: Option<String>,
    pub nullable: Option<String>,
}

/// Decode a raw metadata row.
///
/// Column name and type are mandatory; a NULL in either is a scan error.
pub fn decode_row<D: Dialect + ?Sized>(
    dialect: &D,
    entity: &str,
    row: RawColumnRow,
) -> Result<ColumnDescriptor> {
    let name = row
        .name
        .ok_or_else(|| GenError::scan(entity, "COLUMN_NAME is NULL"))?;
    let native_type = row
        .native_type
        .ok_or_else(|| GenError::scan(entity, format!("DATA_TYPE is NULL for column {}", name)))?;

    Ok(ColumnDescriptor::from_catalog(
        name,
        dialect.normalize_type(&native_type),
        row.scale.as_deref(),
        row.nullable.as_deref().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::postgres::PostgresDialect;

    fn raw(name: Option<&str>, ty: Option<&str>, scale: Option<&str>, nullable: &str) -> RawColumnRow {
        RawColumnRow {
            name: name.map(String::from),
            native_type: ty.map(String::from),
            scale: scale.map(String::from),
            nullable: Some(nullable.to_string()),
        }
    }

    #[test]
    fn test_decode_row() {
        let dialect = PostgresDialect::new();
        let col = decode_row(
            &dialect,
            "users",
            raw(Some("name"), Some("character varying"), None, "YES"),
        )
        .unwrap();
        assert_eq!(col.name, "name");
        assert_eq!(col.native_type, "VARCHAR");
        assert!(col.nullable);
        assert_eq!(col.scale, None);
    }

    #[test]
    fn test_decode_row_not_null() {
        let dialect = PostgresDialect::new();
        let col = decode_row(&dialect, "users", raw(Some("id"), Some("integer"), Some("0"), "NO"))
            .unwrap();
        assert!(!col.nullable);
        assert_eq!(col.scale, Some(0));
    }

    #[test]
    fn test_decode_row_missing_name_is_scan_error() {
        let dialect = PostgresDialect::new();
        let err = decode_row(&dialect, "users", raw(None, Some("text"), None, "YES")).unwrap_err();
        assert!(matches!(err, GenError::Scan { ref entity, .. } if entity == "users"));
    }

    #[test]
    fn test_decode_row_missing_type_is_scan_error() {
        let dialect = PostgresDialect::new();
        let err = decode_row(&dialect, "users", raw(Some("id"), None, None, "NO")).unwrap_err();
        assert!(err.to_string().contains("DATA_TYPE is NULL for column id"));
    }
}
