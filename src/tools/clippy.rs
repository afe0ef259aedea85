use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_features, Validatable, ValidationError};

/// Request parameters for `cargo clippy`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ClippyRequest {
    /// Automatically apply suggested fixes
    #[serde(default)]
    pub fix: Option<bool>,

    /// List of features to activate
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl Validatable for ClippyRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_features(self.features.as_deref())
    }
}

impl CargoCommand for ClippyRequest {
    const OPERATION: Operation = Operation::Clippy;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .flag("--fix", self.fix)
            .list("--features", self.features.as_deref())
            .finish()
    }
}
