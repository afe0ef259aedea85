use rmcp::model::{JsonObject, Tool};
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

use crate::error::CargoError;
use crate::request::{OperationRequest, PreparedCommand};
use crate::tools::{
    BenchRequest, BuildRequest, CargoCommand, CheckRequest, CleanRequest, ClippyRequest,
    DocRequest, FmtRequest, RunRequest, TestRequest, TreeRequest, UpdateRequest,
};

/// The closed set of cargo operations exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Build,
    Test,
    Run,
    Check,
    Clippy,
    Fmt,
    Doc,
    Clean,
    Tree,
    Update,
    Bench,
}

impl Operation {
    /// Catalogue order.
    pub const ALL: [Operation; 11] = [
        Operation::Build,
        Operation::Test,
        Operation::Run,
        Operation::Check,
        Operation::Clippy,
        Operation::Fmt,
        Operation::Doc,
        Operation::Clean,
        Operation::Tree,
        Operation::Update,
        Operation::Bench,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            Operation::Build => "cargo_build",
            Operation::Test => "cargo_test",
            Operation::Run => "cargo_run",
            Operation::Check => "cargo_check",
            Operation::Clippy => "cargo_clippy",
            Operation::Fmt => "cargo_fmt",
            Operation::Doc => "cargo_doc",
            Operation::Clean => "cargo_clean",
            Operation::Tree => "cargo_tree",
            Operation::Update => "cargo_update",
            Operation::Bench => "cargo_bench",
        }
    }

    pub fn subcommand(self) -> &'static str {
        match self {
            Operation::Build => "build",
            Operation::Test => "test",
            Operation::Run => "run",
            Operation::Check => "check",
            Operation::Clippy => "clippy",
            Operation::Fmt => "fmt",
            Operation::Doc => "doc",
            Operation::Clean => "clean",
            Operation::Tree => "tree",
            Operation::Update => "update",
            Operation::Bench => "bench",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Build => {
                "Build a Rust project with Cargo. Compiles the project and its dependencies."
            }
            Operation::Test => "Run tests for a Rust project with Cargo.",
            Operation::Run => "Run a Rust binary with Cargo.",
            Operation::Check => "Check a Rust project for errors without building it.",
            Operation::Clippy => "Run Clippy linter on a Rust project.",
            Operation::Fmt => "Format Rust code using rustfmt.",
            Operation::Doc => "Generate documentation for a Rust project.",
            Operation::Clean => "Clean build artifacts.",
            Operation::Tree => "Display dependency tree.",
            Operation::Update => "Update dependencies in Cargo.lock.",
            Operation::Bench => "Run benchmarks.",
        }
    }

    /// Look up an operation by its tool name; anything outside the closed set is rejected.
    pub fn from_tool_name(name: &str) -> Result<Self, CargoError> {
        Self::ALL
            .into_iter()
            .find(|op| op.tool_name() == name)
            .ok_or_else(|| CargoError::UnrecognizedOperation(name.to_string()))
    }

    /// Deserialize, validate and build the argument vector for this operation.
    pub fn prepare(self, arguments: JsonObject) -> Result<PreparedCommand, CargoError> {
        match self {
            Operation::Build => prepare_as::<BuildRequest>(arguments),
            Operation::Test => prepare_as::<TestRequest>(arguments),
            Operation::Run => prepare_as::<RunRequest>(arguments),
            Operation::Check => prepare_as::<CheckRequest>(arguments),
            Operation::Clippy => prepare_as::<ClippyRequest>(arguments),
            Operation::Fmt => prepare_as::<FmtRequest>(arguments),
            Operation::Doc => prepare_as::<DocRequest>(arguments),
            Operation::Clean => prepare_as::<CleanRequest>(arguments),
            Operation::Tree => prepare_as::<TreeRequest>(arguments),
            Operation::Update => prepare_as::<UpdateRequest>(arguments),
            Operation::Bench => prepare_as::<BenchRequest>(arguments),
        }
    }

    /// Tool descriptor with the input schema of this operation's request record.
    pub fn descriptor(self) -> Tool {
        match self {
            Operation::Build => describe_as::<BuildRequest>(),
            Operation::Test => describe_as::<TestRequest>(),
            Operation::Run => describe_as::<RunRequest>(),
            Operation::Check => describe_as::<CheckRequest>(),
            Operation::Clippy => describe_as::<ClippyRequest>(),
            Operation::Fmt => describe_as::<FmtRequest>(),
            Operation::Doc => describe_as::<DocRequest>(),
            Operation::Clean => describe_as::<CleanRequest>(),
            Operation::Tree => describe_as::<TreeRequest>(),
            Operation::Update => describe_as::<UpdateRequest>(),
            Operation::Bench => describe_as::<BenchRequest>(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

fn prepare_as<T>(arguments: JsonObject) -> Result<PreparedCommand, CargoError>
where
    T: CargoCommand + DeserializeOwned,
{
    OperationRequest::<T>::from_arguments(arguments)?.prepare()
}

fn describe_as<T>() -> Tool
where
    T: CargoCommand + JsonSchema,
{
    let schema = schemars::schema_for!(OperationRequest<T>);
    let input_schema = match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => JsonObject::new(),
    };
    Tool::new(
        T::OPERATION.tool_name(),
        T::OPERATION.description(),
        Arc::new(input_schema),
    )
}

/// Resolve `name` and build its invocation in one step.
pub fn build_argument_vector(
    name: &str,
    arguments: JsonObject,
) -> Result<PreparedCommand, CargoError> {
    Operation::from_tool_name(name)?.prepare(arguments)
}

/// Every supported operation, in catalogue order.
pub fn catalogue() -> Vec<Tool> {
    Operation::ALL.into_iter().map(Operation::descriptor).collect()
}
