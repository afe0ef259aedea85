use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_features, Validatable, ValidationError};

/// Request parameters for `cargo check`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CheckRequest {
    /// List of features to activate
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl Validatable for CheckRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_features(self.features.as_deref())
    }
}

impl CargoCommand for CheckRequest {
    const OPERATION: Operation = Operation::Check;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .list("--features", self.features.as_deref())
            .finish()
    }
}
