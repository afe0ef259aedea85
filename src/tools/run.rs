use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_bin_name, validate_features, Validatable, ValidationError};

/// Request parameters for `cargo run`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RunRequest {
    /// Name of the binary to run (optional for single-binary projects)
    #[serde(default)]
    pub bin_name: Option<String>,

    /// Arguments to pass to the binary
    #[serde(default)]
    pub args: Option<Vec<String>>,

    /// Run in release mode
    #[serde(default)]
    pub release: Option<bool>,

    /// List of features to activate
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl Validatable for RunRequest {
    // `args` go to the binary after `--`, so cargo never interprets them.
    fn validate(&self) -> Result<(), ValidationError> {
        validate_bin_name(self.bin_name.as_deref())?;
        validate_features(self.features.as_deref())?;
        Ok(())
    }
}

impl CargoCommand for RunRequest {
    const OPERATION: Operation = Operation::Run;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .option("--bin", self.bin_name.as_deref())
            .flag("--release", self.release)
            .list("--features", self.features.as_deref())
            .passthrough(self.args.as_deref())
            .finish()
    }
}
