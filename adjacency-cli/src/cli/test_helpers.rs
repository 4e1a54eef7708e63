//! Small helpers shared across CLI tests.
//!
//! The CLI tests write matrices into temporary directories and drive
//! commands against them. These helpers keep the cases short.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use adjacency_core::Matrix;
use adjacency_providers_tabular::TabularFormat;
use tempfile::TempDir;

use super::{Cli, CliError, Command, ExecutionSummary, LayoutArg, PolicyArg, RenderCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_matrix(dir: &TempDir, name: &str, rows: Vec<Vec<i64>>) -> PathBuf {
    let path = dir.path().join(name);
    let matrix = match Matrix::from_nested(rows) {
        Ok(matrix) => matrix,
        Err(err) => panic!("test matrix must be rectangular: {err}"),
    };
    if let Err(err) = TabularFormat::from_path(&path).write_path(&matrix, &path) {
        panic!("failed to write {}: {err}", path.display());
    }
    path
}

pub(super) fn render_args(path: &Path) -> RenderCommand {
    RenderCommand {
        path: path.to_path_buf(),
        format: None,
        layout: LayoutArg::Spring,
        policy: PolicyArg::Either,
        no_labels: false,
        edge_labels: false,
        node_color: None,
        edge_color: None,
        node_shape: None,
        attributes: Vec::new(),
        output: None,
    }
}

pub(super) const fn bound(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(bound) => bound,
        None => NonZeroU32::MIN,
    }
}

/// Runs `command`, returning the summary together with whatever it wrote
/// to stdout.
pub(super) fn run_capturing(command: Command) -> Result<(ExecutionSummary, String), CliError> {
    let mut out = Vec::new();
    let summary = run_cli(Cli { command }, &mut out)?;
    Ok((summary, String::from_utf8_lossy(&out).into_owned()))
}

pub(super) fn run_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_capturing(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
