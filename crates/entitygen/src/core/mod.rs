//! Core abstractions for metadata-driven generation.
//!
//! - [`schema`]: entity and column metadata types
//! - [`identifier`]: allow-list checks for emitted names
//! - [`traits`]: the `Dialect` strategy and the `MetadataSource` loader
//!
//! Drivers under `drivers/` implement these traits; renderers under
//! `codegen/` only ever see [`EntityColumns`].

pub mod identifier;
pub mod schema;
pub mod traits;

pub use identifier::IdentifierTarget;
pub use schema::{ColumnDescriptor, EntityColumns, EntityName};
pub use traits::{Dialect, MetadataSource};
