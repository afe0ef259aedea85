use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::Validatable;

/// Request parameters for `cargo doc`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DocRequest {
    /// Open documentation in browser after generation
    #[serde(default)]
    pub open: Option<bool>,

    /// Don't build documentation for dependencies
    #[serde(default)]
    pub no_deps: Option<bool>,
}

impl Validatable for DocRequest {}

impl CargoCommand for DocRequest {
    const OPERATION: Operation = Operation::Doc;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .flag("--open", self.open)
            .flag("--no-deps", self.no_deps)
            .finish()
    }
}
