use thiserror::Error;

use crate::operation::Operation;
use crate::security::ValidationError;

/// Everything that can stop a tool call from producing an `ExecutionResult`.
///
/// A cargo process exiting nonzero is not represented here: that is a
/// completed execution with `success == false`.
#[derive(Debug, Error)]
pub enum CargoError {
    #[error("{program} is not installed or not in PATH")]
    ToolUnavailable { program: String },

    #[error("failed to run {command}: {source}")]
    ExecutionFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown operation: {0}")]
    UnrecognizedOperation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    #[error("malformed arguments for {operation}: {source}")]
    MalformedArguments {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl CargoError {
    /// Failures of the tool domain, as opposed to the server misbehaving.
    pub fn is_expected(&self) -> bool {
        !matches!(self, CargoError::MalformedArguments { .. })
    }

    /// Single-line text shown to the caller in place of a result.
    pub fn to_response_text(&self) -> String {
        match self {
            CargoError::UnrecognizedOperation(name) => format!("Unknown operation: {}", name),
            e if e.is_expected() => format!("Error: {}", e),
            e => format!("Unexpected error: {}", e),
        }
    }
}
