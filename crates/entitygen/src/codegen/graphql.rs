//! GraphQL schema rendering.
//!
//! Each entity yields a family of four declarations rendered straight from
//! its columns:
//!
//! | Variant   | Header                 | Not-null marker | Field type |
//! |-----------|------------------------|-----------------|------------|
//! | Object    | `type T`               | kept            | `T`        |
//! | Input     | `input InT`            | kept            | `T`        |
//! | Filter    | `input FilterT`        | dropped         | `T`        |
//! | FilterAll | `input FilterAllT`     | dropped         | `[T]`      |
//!
//! The document lists every Object block, then every Input block, then the
//! Filter and FilterAll blocks, followed by `Pagination`, `Query`, `Mutation`
//! and, when any field is a `Time`, a single `scalar Time` declaration.

use std::fmt::Write;

use crate::core::schema::EntityColumns;
use crate::typemap::{map_native_type, TargetType};

use super::Artifact;

const INDENT: &str = "    ";

/// Pagination input shared by every `getRows` operation.
pub const PAGINATION_INPUT: &str = "input Pagination {\n\tpageNumber: Int!\n\tpageSize: Int!\n}\n\n";

/// Declaration emitted when any field maps to [`TargetType::Time`].
pub const TIME_SCALAR: &str = "scalar Time\n";

/// One member of an entity's type family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Object,
    Input,
    Filter,
    FilterAll,
}

impl Variant {
    /// All variants in document order.
    pub const ALL: [Variant; 4] = [
        Variant::Object,
        Variant::Input,
        Variant::Filter,
        Variant::FilterAll,
    ];

    fn keyword(self) -> &'static str {
        match self {
            Variant::Object => "type",
            _ => "input",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Variant::Object => "",
            Variant::Input => "In",
            Variant::Filter => "Filter",
            Variant::FilterAll => "FilterAll",
        }
    }

    /// Declared name of this variant for a base type name.
    pub fn type_name(self, base: &str) -> String {
        format!("{}{}", self.prefix(), base)
    }

    fn keeps_not_null(self) -> bool {
        matches!(self, Variant::Object | Variant::Input)
    }

    /// Field type as written in this variant.
    pub fn field_type(self, target: TargetType, nullable: bool) -> String {
        let mut ty = match self {
            Variant::FilterAll => format!("[{}]", target),
            _ => target.to_string(),
        };
        if self.keeps_not_null() && !nullable {
            ty.push('!');
        }
        ty
    }
}

/// A field with its mapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: String,
    target: TargetType,
    nullable: bool,
}

/// The type family of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFamily {
    base: String,
    fields: Vec<Field>,
}

impl TypeFamily {
    /// Map an entity's columns to fields.
    pub fn from_entity(entity: &EntityColumns) -> Self {
        let fields = entity
            .columns
            .iter()
            .map(|col| Field {
                name: col.field_name(),
                target: map_native_type(&col.native_type, col.scale),
                nullable: col.nullable,
            })
            .collect();

        Self {
            base: entity.entity.type_name(),
            fields,
        }
    }

    /// Title-cased base type name.
    pub fn base_name(&self) -> &str {
        &self.base
    }

    /// Whether any field maps to `Time`.
    pub fn uses_time(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.target.needs_scalar_declaration())
    }

    /// Render one declaration block, followed by a blank line.
    pub fn render(&self, variant: Variant) -> String {
        let mut out = format!("{} {} {{\n", variant.keyword(), variant.type_name(&self.base));
        for field in &self.fields {
            let _ = writeln!(
                out,
                "{}{}: {}",
                INDENT,
                field.name,
                variant.field_type(field.target, field.nullable)
            );
        }
        out.push_str("}\n\n");
        out
    }

    /// `Query` fields for this entity.
    pub fn query_fields(&self) -> String {
        let t = &self.base;
        format!(
            "{i}getRow{t}(filter: Filter{t}): {t}\n\
             {i}getRows{t}(filter: FilterAll{t}, pagination: Pagination): [{t}]\n",
            i = INDENT,
            t = t
        )
    }

    /// `Mutation` fields for this entity.
    pub fn mutation_fields(&self) -> String {
        let t = &self.base;
        format!(
            "{i}create{t}(input: In{t}): {t}\n\
             {i}update{t}(input: Filter{t}, filter: Filter{t}): {t}\n",
            i = INDENT,
            t = t
        )
    }
}

fn root_type(name: &str, body: impl Iterator<Item = String>) -> String {
    let mut out = format!("type {} {{\n", name);
    body.for_each(|fields| out.push_str(&fields));
    out.push_str("}\n\n");
    out
}

/// Render the full schema document.
pub fn render_schema(entities: &[EntityColumns]) -> Artifact {
    let families: Vec<TypeFamily> = entities.iter().map(TypeFamily::from_entity).collect();

    let mut text = String::new();
    for variant in Variant::ALL {
        for family in &families {
            text.push_str(&family.render(variant));
        }
    }

    text.push_str(PAGINATION_INPUT);
    text.push_str(&root_type("Query", families.iter().map(TypeFamily::query_fields)));
    text.push_str(&root_type(
        "Mutation",
        families.iter().map(TypeFamily::mutation_fields),
    ));

    let uses_time_scalar = families.iter().any(TypeFamily::uses_time);
    if uses_time_scalar {
        text.push_str(TIME_SCALAR);
    }

    Artifact {
        text,
        uses_time_scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{ColumnDescriptor, EntityName};

    fn col(name: &str, ty: &str, nullable: bool, scale: Option<i32>) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            native_type: ty.to_string(),
            nullable,
            scale,
        }
    }

    fn users() -> EntityColumns {
        EntityColumns::new(
            EntityName::new("USERS"),
            vec![
                col("ID", "INT", false, Some(0)),
                col("NAME", "VARCHAR", true, None),
            ],
        )
    }

    fn orders() -> EntityColumns {
        EntityColumns::new(
            EntityName::new("orders"),
            vec![
                col("id", "NUMBER", false, Some(0)),
                col("total", "NUMBER", true, Some(2)),
                col("created_at", "DATE", false, None),
            ],
        )
    }

    #[test]
    fn test_users_family() {
        let family = TypeFamily::from_entity(&users());
        assert_eq!(family.base_name(), "Users");
        assert_eq!(
            family.render(Variant::Object),
            "type Users {\n    id: Int!\n    name: String\n}\n\n"
        );
        assert_eq!(
            family.render(Variant::Input),
            "input InUsers {\n    id: Int!\n    name: String\n}\n\n"
        );
        assert_eq!(
            family.render(Variant::Filter),
            "input FilterUsers {\n    id: Int\n    name: String\n}\n\n"
        );
        assert_eq!(
            family.render(Variant::FilterAll),
            "input FilterAllUsers {\n    id: [Int]\n    name: [String]\n}\n\n"
        );
        assert!(!family.uses_time());
    }

    #[test]
    fn test_users_schema() {
        let artifact = render_schema(&[users()]);
        let expected = "type Users {\n    id: Int!\n    name: String\n}\n\n\
input InUsers {\n    id: Int!\n    name: String\n}\n\n\
input FilterUsers {\n    id: Int\n    name: String\n}\n\n\
input FilterAllUsers {\n    id: [Int]\n    name: [String]\n}\n\n\
input Pagination {\n\tpageNumber: Int!\n\tpageSize: Int!\n}\n\n\
type Query {\n    getRowUsers(filter: FilterUsers): Users\n    \
getRowsUsers(filter: FilterAllUsers, pagination: Pagination): [Users]\n}\n\n\
type Mutation {\n    createUsers(input: InUsers): Users\n    \
updateUsers(input: FilterUsers, filter: FilterUsers): Users\n}\n\n";
        assert_eq!(artifact.text, expected);
        assert!(!artifact.uses_time_scalar);
    }

    #[test]
    fn test_orders_scenario() {
        let artifact = render_schema(&[orders()]);
        let text = &artifact.text;

        assert!(text.contains("type Orders {\n    id: Int!\n    total: Float\n    created_at: Time!\n}\n"));
        assert!(text.contains(
            "input FilterAllOrders {\n    id: [Int]\n    total: [Float]\n    created_at: [Time]\n}\n"
        ));
        assert!(text.ends_with("}\n\nscalar Time\n"));
        assert!(artifact.uses_time_scalar);
    }

    #[test]
    fn test_empty_entity_list() {
        let artifact = render_schema(&[]);
        assert_eq!(
            artifact.text,
            "input Pagination {\n\tpageNumber: Int!\n\tpageSize: Int!\n}\n\n\
type Query {\n}\n\ntype Mutation {\n}\n\n"
        );
        assert!(!artifact.uses_time_scalar);
    }

    #[test]
    fn test_time_scalar_declared_once() {
        let artifact = render_schema(&[orders(), users(), orders()]);
        assert_eq!(artifact.text.matches("scalar Time").count(), 1);
    }

    #[test]
    fn test_blocks_grouped_by_variant() {
        let text = render_schema(&[users(), orders()]).text;
        let positions: Vec<usize> = [
            "type Users ",
            "type Orders ",
            "input InUsers ",
            "input InOrders ",
            "input FilterUsers ",
            "input FilterOrders ",
            "input FilterAllUsers ",
            "input FilterAllOrders ",
            "input Pagination ",
            "type Query ",
            "type Mutation ",
        ]
        .iter()
        .map(|header| text.find(header).unwrap_or_else(|| panic!("missing {header}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_field_order_follows_columns() {
        let family = TypeFamily::from_entity(&orders());
        for variant in Variant::ALL {
            let block = family.render(variant);
            let id = block.find("id:").unwrap();
            let total = block.find("total:").unwrap();
            let created = block.find("created_at:").unwrap();
            assert!(id < total && total < created, "{:?}", variant);
            assert_eq!(block.lines().filter(|l| l.contains(": ")).count(), 3, "{:?}", variant);
        }
    }

    #[test]
    fn test_filter_all_is_list_of_filter_type() {
        for target in [
            TargetType::String,
            TargetType::Int,
            TargetType::Float,
            TargetType::Boolean,
            TargetType::Time,
        ] {
            for nullable in [true, false] {
                let filter = Variant::Filter.field_type(target, nullable);
                let all = Variant::FilterAll.field_type(target, nullable);
                assert_eq!(all, format!("[{}]", filter));
                assert!(!filter.ends_with('!'));
            }
        }
    }

    #[test]
    fn test_entity_without_columns() {
        let empty = EntityColumns::new(EntityName::new("audit_log"), vec![]);
        let family = TypeFamily::from_entity(&empty);
        assert_eq!(family.render(Variant::Object), "type Audit_log {\n}\n\n");
        assert!(render_schema(&[empty])
            .text
            .contains("    getRowAudit_log(filter: FilterAudit_log): Audit_log\n"));
    }
}
