//! Configuration validation.

use super::{DialectKind, GenConfig};
use crate::core::identifier::validate_entity_name;
use crate::error::{GenError, Result};

/// Validate the configuration.
pub fn validate(config: &GenConfig) -> Result<()> {
    if config.dsn.trim().is_empty() {
        return Err(GenError::Config("dsn is required".into()));
    }

    if config.entities.is_empty() {
        return Err(GenError::Config("entities is required".into()));
    }

    let target = config.artifact.identifier_target();
    for entity in &config.entities {
        validate_entity_name(entity.as_str(), target)?;
    }

    // ALL_TAB_COLUMNS spans every owner the user can see
    if config.dialect == DialectKind::Oracle && config.schema.is_none() {
        return Err(GenError::Config(
            "schema is required for oracle (use the owner of the tables)".into(),
        ));
    }

    if !config.stdout && config.output_path().as_os_str().is_empty() {
        return Err(GenError::Config("output path cannot be empty".into()));
    }

    Ok(())
}
