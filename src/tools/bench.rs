use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::{validate_features, validate_filter, Validatable, ValidationError};

/// Request parameters for `cargo bench`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct BenchRequest {
    /// Name of specific benchmark to run (optional)
    #[serde(default)]
    pub bench_name: Option<String>,

    /// List of features to activate
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl Validatable for BenchRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_filter("bench_name", self.bench_name.as_deref())?;
        validate_features(self.features.as_deref())?;
        Ok(())
    }
}

impl CargoCommand for BenchRequest {
    const OPERATION: Operation = Operation::Bench;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .positional(self.bench_name.as_deref())
            .list("--features", self.features.as_deref())
            .finish()
    }
}
