//! PostgreSQL metadata reader.
//!
//! Implements `MetadataSource` over a single tokio-postgres client. The
//! metadata statement is prepared once at connect time and reused for every
//! entity.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config as PgConfig, NoTls, Row, Statement};
use tracing::{debug, info, warn};

use crate::core::schema::{ColumnDescriptor, EntityName};
use crate::core::traits::{Dialect, MetadataSource};
use crate::drivers::common::{decode_row, split_ssl_mode, RawColumnRow, TlsBuilder};
use crate::error::{GenError, Result};

use super::PostgresDialect;

/// PostgreSQL metadata reader.
pub struct PostgresReader {
    client: Client,
    statement: Statement,
    dialect: PostgresDialect,
    schema: String,
    connection: JoinHandle<()>,
}

impl PostgresReader {
    /// Connect using a libpq-style DSN (`host=... user=...` or `postgres://...`).
    ///
    /// `schema` falls back to `public` when not given.
    pub async fn connect(dsn: &str, schema: Option<&str>) -> Result<Self> {
        let dialect = PostgresDialect::new();
        let (ssl_mode, dsn) = split_ssl_mode(dsn)?;
        let pg_config: PgConfig = dsn
            .parse()
            .map_err(|e| GenError::connection("postgres", format!("invalid DSN: {}", e)))?;

        let tls = TlsBuilder::new(ssl_mode).build()?;
        let (client, connection) = match tls {
            Some(tls) => {
                let (client, conn) = pg_config
                    .connect(tls)
                    .await
                    .map_err(|e| GenError::connection("postgres", e))?;
                (client, tokio::spawn(drive_connection(conn)))
            }
            None => {
                let (client, conn) = pg_config
                    .connect(NoTls)
                    .await
                    .map_err(|e| GenError::connection("postgres", e))?;
                (client, tokio::spawn(drive_connection(conn)))
            }
        };

        let schema = schema
            .or(dialect.default_schema())
            .unwrap_or_default()
            .to_string();

        let query = dialect.metadata_query();
        debug!("Preparing metadata query: {}", query);
        let statement = client
            .prepare(&query)
            .await
            .map_err(|e| GenError::Prepare(e.to_string()))?;

        info!(
            "Connected to PostgreSQL: {}",
            pg_config
                .get_dbname()
                .unwrap_or("(default database)")
        );

        Ok(Self {
            client,
            statement,
            dialect,
            schema,
            connection,
        })
    }

    fn read_row(&self, entity: &str, row: &Row) -> Result<ColumnDescriptor> {
        let text = |idx: usize| -> Result<Option<String>> {
            row.try_get::<_, Option<String>>(idx)
                .map_err(|e| GenError::scan(entity, e))
        };

        decode_row(
            &self.dialect,
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

/// Drive the connection until the client is dropped.
async fn drive_connection<F>(conn: F)
where
    F: std::future::Future<Output = std::result::Result<(), tokio_postgres::Error>>,
{
    if let Err(e) = conn.await {
        warn!("PostgreSQL connection error: {}", e);
    }
}

#[async_trait]
impl MetadataSource for PostgresReader {
    async fn fetch_columns(&mut self, entity: &EntityName) -> Result<Vec<ColumnDescriptor>> {
        let rows = self
            .client
            .query(&self.statement, &[&entity.as_str(), &self.schema])
            .await
            .map_err(|e| GenError::query(entity.as_str(), e))?;

        rows.iter()
            .map(|row| self.read_row(entity.as_str(), row))
            .collect()
    }

    fn schema(&self) -> &str {
        &self.schema
    }

    fn db_type(&self) -> &str {
        self.dialect.name()
    }
}

impl Drop for PostgresReader {
    fn drop(&mut self) {
        // The client is dropped right after this, which ends the connection
        // future; abort in case it is still waiting on the socket.
        self.connection.abort();
    }
}
