//! Artifact renderers.
//!
//! - [`graphql`]: schema definition document with type families and root
//!   operations
//! - [`sql`]: SELECT/INSERT/UPDATE templates per entity
//!
//! Renderers are pure functions of the loaded [`EntityColumns`]; the same
//! input always produces byte-identical output.

pub mod graphql;
pub mod sql;

use crate::config::ArtifactKind;
use crate::core::schema::EntityColumns;

/// A rendered artifact, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Full artifact text.
    pub text: String,

    /// Whether a `scalar Time` declaration was emitted.
    pub uses_time_scalar: bool,
}

/// Render the requested artifact for entities in list order.
pub fn render(kind: ArtifactKind, entities: &[EntityColumns]) -> Artifact {
    match kind {
        ArtifactKind::GraphQl => graphql::render_schema(entities),
        ArtifactKind::Sql => Artifact {
            text: sql::render_queries(entities),
            uses_time_scalar: false,
        },
    }
}
