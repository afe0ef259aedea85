use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::Validatable;

/// Request parameters for `cargo clean`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CleanRequest {}

impl Validatable for CleanRequest {}

impl CargoCommand for CleanRequest {
    const OPERATION: Operation = Operation::Clean;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand()).finish()
    }
}
