use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_package, Validatable, ValidationError};

/// Request parameters for `cargo update`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct UpdateRequest {
    /// Specific package to update (optional)
    #[serde(default)]
    pub package: Option<String>,
}

impl Validatable for UpdateRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_package(self.package.as_deref())
    }
}

impl CargoCommand for UpdateRequest {
    const OPERATION: Operation = Operation::Update;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .option("--package", self.package.as_deref())
            .finish()
    }
}
