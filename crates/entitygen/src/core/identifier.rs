//! Identifier validation for names that end up in generated artifacts.
//!
//! Entity names come from the command line and column names come from the
//! database catalog. Both are emitted verbatim into SQL templates and GraphQL
//! type names, so they are checked against an allow-list first:
//!
//! - first character: ASCII letter or underscore
//! - remaining characters: ASCII letters, digits, underscore
//! - `$` and `#` are also accepted in SQL output (Oracle permits them), but
//!   never in GraphQL output where they are not valid name characters
//!
//! The metadata query itself always binds these names as parameters; the
//! allow-list protects the text we write, not the query we run.

use crate::error::{GenError, Result};

/// Maximum identifier length (conservative limit across databases).
/// - PostgreSQL: 63 bytes
/// - Oracle 12.2+: 128 bytes
/// - MySQL: 64 characters
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Where an identifier is going to be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierTarget {
    /// SQL statement templates.
    Sql,
    /// GraphQL schema definitions.
    GraphQl,
}

/// Check an identifier against the allow-list.
///
/// Returns a human readable reason on failure so callers can wrap it in the
/// error variant that fits (configuration vs. catalog data).
pub fn check_identifier(name: &str, target: IdentifierTarget) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("identifier cannot be empty".to_string());
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(format!(
            "identifier exceeds maximum length of {} bytes (got {} bytes)",
            MAX_IDENTIFIER_LENGTH,
            name.len()
        ));
    }

    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(format!(
                "identifier must start with a letter or underscore, found {:?}",
                first
            ));
        }
    }

    for ch in chars {
        let allowed = ch.is_ascii_alphanumeric()
            || ch == '_'
            || (target == IdentifierTarget::Sql && (ch == '$' || ch == '#'));
        if !allowed {
            return Err(format!("identifier contains disallowed character {:?}", ch));
        }
    }

    Ok(())
}

/// Validate a caller-supplied entity name.
///
/// # Errors
///
/// Returns `GenError::Config` describing why the name was rejected.
pub fn validate_entity_name(name: &str, target: IdentifierTarget) -> Result<()> {
    check_identifier(name, target)
        .map_err(|reason| GenError::Config(format!("Invalid entity name {:?}: {}", name, reason)))
}

/// Validate a column name read from the catalog.
///
/// # Errors
///
/// Returns `GenError::InvalidIdentifier` naming the entity the column came from.
pub fn validate_column_name(column: &str, entity: &str, target: IdentifierTarget) -> Result<()> {
    check_identifier(column, target).map_err(|_| GenError::InvalidIdentifier {
        kind: "column",
        name: column.to_string(),
        entity: entity.to_string(),
    })
}
