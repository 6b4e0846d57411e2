//! Column and entity metadata types.
//!
//! These types are the shared model every artifact renderer reads from. They
//! are produced by a [`MetadataSource`](super::traits::MetadataSource) and
//! never modified afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A table name supplied by the caller.
///
/// Always trimmed; order and duplicates in the caller's list are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Create an entity name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    /// Split a comma-separated list into entity names.
    pub fn parse_list(list: &str) -> Vec<EntityName> {
        list.split(',').map(EntityName::new).collect()
    }

    /// The trimmed name as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased type name used in generated GraphQL.
    ///
    /// The name is lower-cased, then every letter at the start of a word is
    /// upper-cased. Letters, digits and underscores continue a word; any
    /// other character starts a new one (`USER_ROLES` -> `User_roles`).
    pub fn type_name(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut at_word_start = true;
        for ch in self.0.chars().flat_map(char::to_lowercase) {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = !(ch.is_alphanumeric() || ch == '_');
        }
        out
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata for one column, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as reported by the catalog.
    pub name: String,

    /// Native type name, upper-cased by the dialect (e.g. "VARCHAR2", "NUMBER").
    pub native_type: String,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Numeric scale, if the catalog reports one.
    pub scale: Option<i32>,
}

impl ColumnDescriptor {
    /// Build a descriptor from raw catalog text.
    ///
    /// `nullable_flag` is `N`/`NO` for NOT NULL columns (Oracle and
    /// INFORMATION_SCHEMA spellings); anything else counts as nullable.
    pub fn from_catalog(
        name: String,
        native_type: String,
        scale: Option<&str>,
        nullable_flag: &str,
    ) -> Self {
        Self {
            name,
            native_type,
            nullable: !is_not_null_flag(nullable_flag),
            scale: parse_scale(scale),
        }
    }

    /// Field name used in generated GraphQL.
    pub fn field_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Check whether a catalog nullability flag marks a NOT NULL column.
pub fn is_not_null_flag(flag: &str) -> bool {
    let flag = flag.trim();
    flag.eq_ignore_ascii_case("N") || flag.eq_ignore_ascii_case("NO")
}

/// Parse scale text from the catalog.
///
/// NULL or blank yields `None`; text that is not an integer is treated as 0.
pub fn parse_scale(scale: Option<&str>) -> Option<i32> {
    let text = scale?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.parse().unwrap_or(0))
}

/// The ordered column list loaded for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityColumns {
    /// Entity the columns belong to.
    pub entity: EntityName,

    /// Columns ordered by ordinal position.
    pub columns: Vec<ColumnDescriptor>,
}

impl EntityColumns {
    /// Pair an entity with its loaded columns.
    pub fn new(entity: EntityName, columns: Vec<ColumnDescriptor>) -> Self {
        Self { entity, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_name_trims() {
        assert_eq!(EntityName::new("  orders ").as_str(), "orders");
    }

    #[test]
    fn test_parse_list_keeps_order_and_duplicates() {
        let names = EntityName::parse_list("users, orders ,users");
        let names: Vec<_> = names.iter().map(EntityName::as_str).collect();
        assert_eq!(names, vec!["users", "orders", "users"]);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(EntityName::new("USERS").type_name(), "Users");
        assert_eq!(EntityName::new("orders").type_name(), "Orders");
        assert_eq!(EntityName::new("USER_ROLES").type_name(), "User_roles");
        assert_eq!(EntityName::new("app$log").type_name(), "App$Log");
        assert_eq!(EntityName::new("t2items").type_name(), "T2items");
    }

    #[test]
    fn test_not_null_flags() {
        assert!(is_not_null_flag("N"));
        assert!(is_not_null_flag("NO"));
        assert!(is_not_null_flag("no"));
        assert!(!is_not_null_flag("Y"));
        assert!(!is_not_null_flag("YES"));
        assert!(!is_not_null_flag(""));
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale(None), None);
        assert_eq!(parse_scale(Some("")), None);
        assert_eq!(parse_scale(Some("2")), Some(2));
        assert_eq!(parse_scale(Some(" 0 ")), Some(0));
        assert_eq!(parse_scale(Some("-127")), Some(-127));
        assert_eq!(parse_scale(Some("two")), Some(0));
    }

    #[test]
    fn test_from_catalog() {
        let col = ColumnDescriptor::from_catalog(
            "TOTAL".to_string(),
            "NUMBER".to_string(),
            Some("2"),
            "Y",
        );
        assert!(col.nullable);
        assert_eq!(col.scale, Some(2));
        assert_eq!(col.field_name(), "total");
    }
}
