//! # entitygen
//!
//! Generates a GraphQL schema or SQL statement templates from the column
//! metadata of relational tables.
//!
//! This library provides:
//!
//! - **Metadata readers** for Oracle, PostgreSQL and MySQL, each running a
//!   single prepared catalog query per table
//! - **Type mapping** from native column types to GraphQL scalars
//! - **GraphQL rendering** of object, input and filter types plus `Query` and
//!   `Mutation` root operations
//! - **SQL rendering** of SELECT/INSERT/UPDATE templates with named binds
//!
//! ## Example
//!
//! ```rust,no_run
//! use entitygen::{drivers, DialectKind, GenConfig, Generator};
//!
//! #[tokio::main]
//! async fn main() -> entitygen::Result<()> {
//!     let config = GenConfig::new("postgres://app@localhost/app", "users,orders", DialectKind::Postgres)
//!         .validated()?;
//!     let mut source = drivers::connect(&config).await?;
//!     let result = Generator::new(&config).run(source.as_mut()).await?;
//!     source.close().await?;
//!     println!("Wrote {} bytes", result.bytes_written);
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod orchestrator;
pub mod typemap;

// Re-exports for convenient access
pub use crate::codegen::Artifact;
pub use crate::config::{ArtifactKind, DialectKind, GenConfig};
pub use crate::core::{ColumnDescriptor, Dialect, EntityColumns, EntityName, MetadataSource};
pub use crate::error::{GenError, Result};
pub use crate::orchestrator::{GenerationResult, Generator};
pub use crate::typemap::{map_native_type, TargetType};
