//! Oracle metadata reader.
//!
//! Implements `MetadataSource` over a single `oracle` crate connection. The
//! driver is blocking, so calls run inside `block_in_place` on the
//! multi-threaded runtime.

use async_trait::async_trait;
use ::oracle::{Connection, Row, Statement};
use tokio::task::block_in_place;
use tracing::{debug, info};

use crate::core::schema::{ColumnDescriptor, EntityName};
use crate::core::traits::{Dialect, MetadataSource};
use crate::drivers::common::{decode_row, RawColumnRow};
use crate::error::{GenError, Result};

use super::{OracleDialect, OracleDsn};

/// Oracle metadata reader.
pub struct OracleReader {
    conn: Connection,
    statement: Statement,
    dialect: OracleDialect,
    schema: String,
}

impl OracleReader {
    /// Connect using a `user/password@connect_string` DSN.
    ///
    /// Oracle has no default schema here; `schema` is the owning user and is
    /// checked by configuration validation before we get this far.
    pub async fn connect(dsn: &str, schema: Option<&str>) -> Result<Self> {
        let dialect = OracleDialect::new();
        let dsn = OracleDsn::parse(dsn)?;
        let schema = schema
            .ok_or_else(|| GenError::Config("oracle needs --schema (the table owner)".into()))?
            .to_string();

        let query = dialect.metadata_query();
        let (conn, statement) = block_in_place(|| -> Result<(Connection, Statement)> {
            let conn = Connection::connect(&dsn.user, &dsn.password, &dsn.connect_string)
                .map_err(|e| GenError::connection("oracle", e))?;
            debug!("Preparing metadata query: {}", query);
            let statement = conn
                .statement(&query)
                .build()
                .map_err(|e| GenError::Prepare(e.to_string()))?;
            Ok((conn, statement))
        })?;

        info!("Connected to Oracle: {}", dsn.connect_string);

        Ok(Self {
            conn,
            statement,
            dialect,
            schema,
        })
    }

    fn read_row(dialect: &OracleDialect, entity: &str, row: &Row) -> Result<ColumnDescriptor> {
        let text = |idx: usize| -> Result<Option<String>> {
            row.get::<usize, Option<String>>(idx)
                .map_err(|e| GenError::scan(entity, e))
        };

        decode_row(
            dialect,
            entity,
            RawColumnRow {
                name: text(0)?,
                native_type: text(1)?,
                scale: text(2)?,
                nullable: text(3)?,
            },
        )
    }
}

#[async_trait]
impl MetadataSource for OracleReader {
    async fn fetch_columns(&mut self, entity: &EntityName) -> Result<Vec<ColumnDescriptor>> {
        let Self {
            statement,
            dialect,
            schema,
            ..
        } = self;

        block_in_place(|| {
            let rows = statement
                .query(&[&entity.as_str(), &schema.as_str()])
                .map_err(|e| GenError::query(entity.as_str(), e))?;

            let mut columns = Vec::new();
            for row in rows {
                let row = row.map_err(|e| GenError::scan(entity.as_str(), e))?;
                columns.push(Self::read_row(dialect, entity.as_str(), &row)?);
            }
            Ok(columns)
        })
    }

    fn schema(&self) -> &str {
        &self.schema
    }

    fn db_type(&self) -> &str {
        self.dialect.name()
    }

    /// Close the prepared statement, then the connection.
    ///
    /// ODPI-C refuses to close a connection while statements are open.
    async fn close(&mut self) -> Result<()> {
        let Self {
            conn, statement, ..
        } = self;

        block_in_place(|| {
            statement.close()?;
            conn.close()
        })
        .map_err(|e| GenError::connection("oracle", e))
    }
}
