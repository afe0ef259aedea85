use rmcp::schemars;
use serde::Deserialize;

use super::CargoCommand;
use crate::command::{ArgumentVector, CommandLine};
use crate::operation::Operation;
use crate::security::Validatable;

/// Request parameters for `cargo fmt`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FmtRequest {
    /// Check if files are formatted without modifying them
    #[serde(default)]
    pub check: Option<bool>,
}

impl Validatable for FmtRequest {}

impl CargoCommand for FmtRequest {
    const OPERATION: Operation = Operation::Fmt;

    fn argument_vector(&self) -> ArgumentVector {
        CommandLine::new(Self::OPERATION.subcommand())
            .flag("--check", self.check)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_check() {
        let req = FmtRequest { check: Some(true) };
        assert_eq!(req.argument_vector().as_slice(), ["fmt", "--check"]);
        assert_eq!(FmtRequest::default().argument_vector().as_slice(), ["fmt"]);
    }
}
