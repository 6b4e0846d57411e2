//! Run configuration and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;

impl GenConfig {
    /// Validate the configuration.
    ///
    /// Runs before any connection is opened, so a bad flag never costs a
    /// round trip to the database.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Validate and return the configuration.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
