//! Type mapping from native column types to GraphQL scalars.

use std::fmt;

use serde::Serialize;

/// Target scalar type for a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TargetType {
    String,
    Int,
    Float,
    Boolean,
    /// Custom scalar; its use requires a `scalar Time` declaration.
    Time,
}

impl TargetType {
    /// GraphQL spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::String => "String",
            TargetType::Int => "Int",
            TargetType::Float => "Float",
            TargetType::Boolean => "Boolean",
            TargetType::Time => "Time",
        }
    }

    /// Whether the schema must declare this type as a custom scalar.
    pub fn needs_scalar_declaration(&self) -> bool {
        matches!(self, TargetType::Time)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a native column type (and numeric scale) to a target scalar.
///
/// Matching is case-insensitive. Types that are neither textual, temporal nor
/// boolean are treated as numeric: a positive scale means `Float`, otherwise
/// `Int`.
pub fn map_native_type(native_type: &str, scale: Option<i32>) -> TargetType {
    let upper = native_type.trim().to_uppercase();
    match upper.as_str() {
        // String types
        "VARCHAR" | "VARCHAR2" | "NVARCHAR" | "NVARCHAR2" | "CHAR" | "TEXT" => TargetType::String,

        // Date/time types
        "DATE" | "DATETIME" => TargetType::Time,
        t if t.contains("TIMESTAMP") => TargetType::Time,

        // Boolean
        "BOOLEAN" => TargetType::Boolean,

        // Numeric fallback
        _ => {
            if scale.unwrap_or(0) > 0 {
                TargetType::Float
            } else {
                TargetType::Int
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_types() {
        for t in ["VARCHAR", "varchar2", "NVARCHAR", "nvarchar2", "CHAR", "text"] {
            assert_eq!(map_native_type(t, None), TargetType::String, "{t}");
        }
    }

    #[test]
    fn test_time_types() {
        assert_eq!(map_native_type("DATE", None), TargetType::Time);
        assert_eq!(map_native_type("datetime", None), TargetType::Time);
        assert_eq!(map_native_type("TIMESTAMP(6)", Some(6)), TargetType::Time);
        assert_eq!(
            map_native_type("timestamp without time zone", None),
            TargetType::Time
        );
        assert_eq!(
            map_native_type("TIMESTAMP(6) WITH TIME ZONE", None),
            TargetType::Time
        );
    }

    #[test]
    fn test_boolean() {
        assert_eq!(map_native_type("boolean", None), TargetType::Boolean);
    }

    #[test]
    fn test_numeric_by_scale() {
        assert_eq!(map_native_type("NUMBER", Some(2)), TargetType::Float);
        assert_eq!(map_native_type("NUMBER", Some(0)), TargetType::Int);
        assert_eq!(map_native_type("NUMBER", Some(-2)), TargetType::Int);
        assert_eq!(map_native_type("NUMBER", None), TargetType::Int);
        assert_eq!(map_native_type("decimal", Some(4)), TargetType::Float);
        assert_eq!(map_native_type("integer", Some(0)), TargetType::Int);
    }

    #[test]
    fn test_unlisted_types_fall_back_to_numeric() {
        // Not in the mapping set: treated like any other numeric type.
        assert_eq!(map_native_type("CLOB", None), TargetType::Int);
        assert_eq!(map_native_type("bool", None), TargetType::Int);
    }

    #[test]
    fn test_only_time_needs_scalar() {
        assert!(TargetType::Time.needs_scalar_declaration());
        assert!(!TargetType::String.needs_scalar_declaration());
        assert!(!TargetType::Float.needs_scalar_declaration());
    }
}
