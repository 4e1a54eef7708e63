//! Command-line interface orchestration for the adjacency tools.
//!
//! `generate` writes random matrices, `render` turns a square matrix into a
//! Graphviz DOT document and `convert` rewrites Parquet matrices as CSV.

mod args;
mod commands;

pub use args::{
    Cli, Command, ConvertCommand, FormatArg, GenerateCommand, LayoutArg, PolicyArg, RenderCommand,
};
pub use commands::{CliError, Destination, ExecutionSummary, render_summary, run_cli};

#[cfg(test)]
mod test_helpers;
