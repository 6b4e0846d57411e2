//! Core traits for dialect-aware metadata loading.
//!
//! - [`Dialect`]: SQL syntax strategy for the metadata query of one engine
//! - [`MetadataSource`]: loads column metadata for one entity at a time
//!
//! # Design Patterns
//!
//! - **Strategy**: `Dialect` provides interchangeable query text and type
//!   spelling rules per engine
//! - **Template Method**: `Dialect::metadata_query` is assembled from the
//!   engine's `param_placeholder`

use async_trait::async_trait;

use crate::error::Result;

use super::schema::{ColumnDescriptor, EntityName};

/// SQL dialect strategy for the metadata lookup.
pub trait Dialect: Send + Sync {
    /// Get the dialect name (e.g., "oracle", "postgres", "mysql").
    fn name(&self) -> &str;

    /// Get the positional parameter placeholder for the given 1-based index.
    fn param_placeholder(&self, index: usize) -> String;

    /// Build the metadata query.
    ///
    /// The query takes two parameters, table name then schema/owner, and
    /// returns four text columns in ordinal order: column name, native type,
    /// numeric scale, nullability flag.
    fn metadata_query(&self) -> String;

    /// Normalize the native type spelling reported by the catalog.
    ///
    /// The default upper-cases and trims.
    fn normalize_type(&self, native_type: &str) -> String {
        native_type.trim().to_uppercase()
    }

    /// Schema to use when none was configured, if the engine has one.
    fn default_schema(&self) -> Option<&'static str> {
        None
    }
}

/// Build the ANSI `INFORMATION_SCHEMA.COLUMNS` lookup shared by Postgres and MySQL.
///
/// `cast_type` is the engine's text type used to normalize every column to a
/// string on the wire.
pub fn information_schema_query<D: Dialect + ?Sized>(dialect: &D, cast_type: &str) -> String {
    format!(
        "SELECT CAST(COLUMN_NAME AS {cast}), CAST(DATA_TYPE AS {cast}), \
         CAST(NUMERIC_SCALE AS {cast}), CAST(IS_NULLABLE AS {cast}) \
         FROM INFORMATION_SCHEMA.COLUMNS \
         WHERE TABLE_NAME = {table} AND TABLE_SCHEMA = {schema} \
         ORDER BY ORDINAL_POSITION",
        cast = cast_type,
        table = dialect.param_placeholder(1),
        schema = dialect.param_placeholder(2),
    )
}

/// Load column metadata from a database.
///
/// Implementations prepare the dialect's metadata query once when they are
/// constructed and reuse it for every entity. Entities are fetched strictly
/// one at a time; each call fully materializes its rows so no cursor outlives
/// the call.
#[async_trait]
pub trait MetadataSource: Send {
    /// Load the ordered columns of one entity.
    ///
    /// # Errors
    ///
    /// `GenError::Query` if the statement fails, `GenError::Scan` if a row
    /// cannot be decoded.
    async fn fetch_columns(&mut self, entity: &EntityName) -> Result<Vec<ColumnDescriptor>>;

    /// The schema/owner every lookup is filtered by.
    fn schema(&self) -> &str;

    /// Get the database type identifier (e.g., "postgres").
    fn db_type(&self) -> &str;

    /// Release the connection.
    ///
    /// Dropping the source releases it too; this gives drivers a chance to
    /// close gracefully on the success path.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
