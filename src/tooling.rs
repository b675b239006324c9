//! Tooling Layer
//!
//! Command-line access to the parameter type registry and to schema checks
//! of variable files.

pub mod cli;
pub mod schema;

pub use cli::{Cli, CliContext, Commands};
pub use schema::{SchemaFile, VariableSpec};
