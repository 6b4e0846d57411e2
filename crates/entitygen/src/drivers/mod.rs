//! Database driver implementations.
//!
//! This module provides database-specific implementations of the core traits:
//!
//! - [`oracle`]: Oracle (`ALL_TAB_COLUMNS`), reader behind the `oracle` feature
//! - [`postgres`]: PostgreSQL (`INFORMATION_SCHEMA`)
//! - [`mysql`]: MySQL/MariaDB (`INFORMATION_SCHEMA`)
//! - [`common`]: Shared utilities (TLS, row decoding)
//!
//! # Architecture
//!
//! Each driver module implements:
//! - `Dialect`: metadata query text and type spelling for the engine
//! - `MetadataSource`: a reader holding one connection and one prepared
//!   metadata statement
//!
//! [`connect`] picks the reader for the configured engine.

pub mod common;
pub mod mysql;
pub mod oracle;
pub mod postgres;

pub use self::mysql::{MysqlDialect, MysqlReader};
pub use self::oracle::OracleDialect;
pub use self::postgres::{PostgresDialect, PostgresReader};

use tracing::info;

use crate::config::{DialectKind, GenConfig};
use crate::core::traits::MetadataSource;
use crate::error::Result;

/// Open a metadata reader for the configured engine.
///
/// The reader owns its connection; dropping it releases everything, so an
/// error anywhere later in the run still closes the connection.
pub async fn connect(config: &GenConfig) -> Result<Box<dyn MetadataSource>> {
    let schema = config.schema.as_deref();
    info!("Connecting to {} database", config.dialect);

    let source: Box<dyn MetadataSource> = match config.dialect {
        DialectKind::Postgres => Box::new(PostgresReader::connect(&config.dsn, schema).await?),
        DialectKind::Mysql => Box::new(MysqlReader::connect(&config.dsn, schema).await?),
        DialectKind::Oracle => connect_oracle(&config.dsn, schema).await?,
    };

    Ok(source)
}

#[cfg(feature = "oracle")]
async fn connect_oracle(dsn: &str, schema: Option<&str>) -> Result<Box<dyn MetadataSource>> {
    Ok(Box::new(self::oracle::OracleReader::connect(dsn, schema).await?))
}

#[cfg(not(feature = "oracle"))]
async fn connect_oracle(_dsn: &str, _schema: Option<&str>) -> Result<Box<dyn MetadataSource>> {
    Err(crate::error::GenError::connection(
        "oracle",
        "this build has no Oracle driver; rebuild with `--features oracle`",
    ))
}
