use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_features, validate_target, Validatable, ValidationError};

/// Request parameters for `cargo build`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct BuildRequest {
    /// Build in release mode with optimizations
    #[serde(default)]
    pub release: Option<bool>,

    /// List of features to activate
    #[serde(default)]
    pub features: Option<Vec<String>>,

    /// Build for the given target triple
    #[serde(default)]
    pub target: Option<String>,
}

impl Validatable for BuildRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_features(self.features.as_deref())?;
        validate_target(self.target.as_deref())?;
        Ok(())
    }
}

impl CargoCommand for BuildRequest {
    const OPERATION: Operation = Operation::Build;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .flag("--release", self.release)
            .list("--features", self.features.as_deref())
            .option("--target", self.target.as_deref())
            .finish()
    }
}
