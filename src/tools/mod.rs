//! One request record per cargo operation.
//!
//! Each record holds only the fields its subcommand accepts and knows how to
//! turn itself into an [`ArgumentVector`]. Emission order is fixed per
//! operation so the exact invocation is stable.

mod bench;
mod build;
mod check;
mod clean;
mod clippy;
mod doc;
mod fmt;
mod run;
mod tree;
mod update;

pub use bench::BenchRequest;
pub use build::BuildRequest;
pub use check::CheckRequest;
pub use clean::CleanRequest;
pub use clippy::ClippyRequest;
pub use doc::DocRequest;
pub use fmt::FmtRequest;
pub use run::RunRequest;
pub use test::TestRequest;
pub use tree::TreeRequest;
pub use update::UpdateRequest;

use crate::command::ArgumentVector;
use crate::operation::Operation;
use crate::security::Validatable;

/// A typed request for a single cargo subcommand.
pub trait CargoCommand: Validatable {
    const OPERATION: Operation;

    fn argument_vector(&self) -> ArgumentVector;
}

#[cfg(test)]
pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
