//! SQL statement templates.
//!
//! Three lines per entity, each prefixed with `<entity>:` so a consumer can
//! look templates up by table:
//!
//! ```text
//! users:SELECT ID,NAME FROM users WHERE 1=1
//! users:INSERT INTO users(ID,NAME) VALUES (:id,:name)
//! users:UPDATE users SET ID = :id,NAME = :name WHERE 1=1
//! ```
//!
//! Column names are emitted as the catalog reports them; bind names are
//! lower-cased. `WHERE 1=1` lets callers append `AND ...` filters.

use crate::core::schema::EntityColumns;

/// Render the templates for one entity, followed by a blank line.
pub fn render_entity(entity: &EntityColumns) -> String {
    let table = entity.entity.as_str();
    let columns: Vec<&str> = entity.columns.iter().map(|c| c.name.as_str()).collect();
    let binds: Vec<String> = columns
        .iter()
        .map(|name| format!(":{}", name.to_lowercase()))
        .collect();
    let assignments: Vec<String> = columns
        .iter()
        .zip(&binds)
        .map(|(name, bind)| format!("{} = {}", name, bind))
        .collect();

    let column_list = columns.join(",");
    format!(
        "{t}:SELECT {cols} FROM {t} WHERE 1=1\n\
         {t}:INSERT INTO {t}({cols}) VALUES ({binds})\n\
         {t}:UPDATE {t} SET {sets} WHERE 1=1\n\n",
        t = table,
        cols = column_list,
        binds = binds.join(","),
        sets = assignments.join(","),
    )
}

/// Render the templates for every entity in list order.
pub fn render_queries(entities: &[EntityColumns]) -> String {
    entities.iter().map(render_entity).collect()
}
