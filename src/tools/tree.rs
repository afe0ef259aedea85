use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_features, validate_package, Validatable, ValidationError};

/// Request parameters for `cargo tree`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TreeRequest {
    /// Package to display tree for (optional)
    #[serde(default)]
    pub package: Option<String>,

    /// List of features to activate
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl Validatable for TreeRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_package(self.package.as_deref())?;
        validate_features(self.features.as_deref())?;
        Ok(())
    }
}

impl CargoCommand for TreeRequest {
    const OPERATION: Operation = Operation::Tree;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .option("--package", self.package.as_deref())
            .list("--features", self.features.as_deref())
            .finish()
    }
}
