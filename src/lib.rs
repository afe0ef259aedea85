//! MCP server exposing a fixed catalogue of cargo commands.
//!
//! A tool call flows through [`operation`] (name lookup and typed request
//! parsing), [`tools`] (argument vector per subcommand), [`executor`]
//! (working directory resolution and the subprocess itself) and is rendered
//! back to text by [`server`].

pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod operation;
pub mod request;
pub mod security;
pub mod server;
pub mod tools;
pub mod workspace;
