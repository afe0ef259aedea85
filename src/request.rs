use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

use crate::command::ArgumentVector;
use crate::error::CargoError;
use crate::operation::Operation;
use crate::tools::CargoCommand;

/// A wrapper that adds the fields shared by every operation to a per-operation request.
/// Use `#[serde(flatten)]` on the inner field to merge schemas.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OperationRequest<T> {
    /// Path to the workspace root (optional, will auto-detect)
    #[serde(default)]
    pub workspace_path: Option<String>,

    #[serde(flatten)]
    pub inner: T,
}

/// A validated invocation, ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommand {
    pub operation: Operation,
    pub args: ArgumentVector,
    pub workspace_path: Option<PathBuf>,
}

impl<T> OperationRequest<T> {
    /// Explicit workspace path, treating a blank string as absent.
    pub fn workspace(&self) -> Option<PathBuf> {
        self.workspace_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

impl<T: CargoCommand + DeserializeOwned> OperationRequest<T> {
    /// Deserialize raw tool-call arguments into the typed request for `T`.
    pub fn from_arguments(arguments: JsonObject) -> Result<Self, CargoError> {
        serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|source| {
            CargoError::MalformedArguments {
                operation: T::OPERATION,
                source,
            }
        })
    }

    /// Validate the request and build its argument vector.
    pub fn prepare(self) -> Result<PreparedCommand, CargoError> {
        self.inner.validate()?;
        Ok(PreparedCommand {
            operation: T::OPERATION,
            args: self.inner.argument_vector(),
            workspace_path: self.workspace(),
        })
    }
}
