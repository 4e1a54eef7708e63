//! Command implementations for the adjacency CLI.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use adjacency_core::{GraphAdapter, MatrixBuilder, RenderOutcome, ShapeError, ShapeErrorCode};
use adjacency_providers_dot::{DotError, DotSurface};
use adjacency_providers_tabular::{TabularError, convert_parquet_to_csv, write_csv};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::args::{Cli, Command, ConvertCommand, GenerateCommand, RenderCommand, resolve_format};

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading a matrix file failed.
    #[error("failed to read `{path}`: {source}")]
    Input {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: TabularError,
    },
    /// Writing a matrix file failed.
    #[error("failed to write `{path}`: {source}")]
    Output {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying encoding failure.
        #[source]
        source: TabularError,
    },
    /// Writing a rendered document failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing to standard output failed.
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
    /// Tabular conversion failed.
    #[error(transparent)]
    Tabular(#[from] TabularError),
    /// Matrix generation failed.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// The DOT surface failed.
    #[error(transparent)]
    Draw(#[from] DotError),
}

impl CliError {
    /// Returns the stable shape code when the failure stems from a matrix
    /// shape problem.
    #[must_use]
    pub const fn code(&self) -> Option<ShapeErrorCode> {
        match self {
            Self::Shape(err)
            | Self::Tabular(TabularError::Shape(err))
            | Self::Input {
                source: TabularError::Shape(err),
                ..
            }
            | Self::Output {
                source: TabularError::Shape(err),
                ..
            } => Some(err.code()),
            _ => None,
        }
    }
}

/// Where a command wrote its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The payload went to standard output.
    Stdout,
    /// The payload went to a file.
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionSummary {
    /// `generate` wrote a matrix.
    Generated {
        /// Rows written.
        rows: usize,
        /// Columns written.
        cols: usize,
        /// Where the matrix went.
        destination: Destination,
    },
    /// `render` drew a graph.
    Rendered {
        /// Nodes in the drawn graph.
        nodes: usize,
        /// Size of the DOT document.
        bytes: usize,
        /// Where the document went.
        destination: Destination,
    },
    /// `render` was given a non-square matrix and drew nothing.
    Skipped {
        /// Matrix file that was read.
        source: PathBuf,
        /// Why nothing was drawn.
        reason: ShapeError,
    },
    /// `convert` wrote a CSV file.
    Converted {
        /// Parquet input.
        source: PathBuf,
        /// CSV output.
        destination: PathBuf,
    },
}

impl ExecutionSummary {
    /// Returns whether the command's payload was written to stdout, in which
    /// case no summary should follow it there.
    #[must_use]
    pub const fn wrote_stdout(&self) -> bool {
        matches!(
            self,
            Self::Generated {
                destination: Destination::Stdout,
                ..
            } | Self::Rendered {
                destination: Destination::Stdout,
                ..
            }
        )
    }
}

/// Executes the CLI command represented by `cli`.
///
/// Payloads bound for standard output are written to `out`.
///
/// # Errors
/// Returns [`CliError`] when reading, generating or writing fails. A
/// non-square matrix given to `render` is not an error: it yields
/// [`ExecutionSummary::Skipped`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::num::NonZeroU32;
/// # use adjacency_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         rows: 2,
///         cols: 3,
///         upper_bound: NonZeroU32::MIN,
///         seed: Some(1),
///         output: None,
///         format: None,
///     }),
/// };
/// let mut out = Vec::new();
/// let summary = run_cli(cli, &mut out)?;
/// assert!(summary.wrote_stdout());
/// assert_eq!(String::from_utf8(out)?, "0,1,2\n0,0,0\n0,0,0\n");
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli, out), fields(command = field::Empty))]
pub fn run_cli<W: Write>(cli: Cli, out: &mut W) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(args) => {
            span.record("command", "generate");
            run_generate(&args, out)
        }
        Command::Render(args) => {
            span.record("command", "render");
            run_render(&args, out)
        }
        Command::Convert(args) => {
            span.record("command", "convert");
            run_convert(args)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip_all,
    fields(rows = args.rows, cols = args.cols, seeded = args.seed.is_some()),
)]
pub(super) fn run_generate<W: Write>(
    args: &GenerateCommand,
    out: &mut W,
) -> Result<ExecutionSummary, CliError> {
    let mut builder = MatrixBuilder::new()
        .with_shape(args.rows, args.cols)
        .with_upper_bound(args.upper_bound);
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let matrix = builder.random()?;
    let destination = match &args.output {
        Some(path) => {
            resolve_format(args.format, path)
                .write_path(&matrix, path)
                .map_err(|source| CliError::Output {
                    path: path.clone(),
                    source,
                })?;
            Destination::File(path.clone())
        }
        None => {
            write_csv(&matrix, &mut *out)?;
            Destination::Stdout
        }
    };
    info!(destination = %destination, "matrix generated");
    Ok(ExecutionSummary::Generated {
        rows: matrix.rows(),
        cols: matrix.cols(),
        destination,
    })
}

#[instrument(
    name = "cli.render",
    err,
    skip_all,
    fields(path = %args.path.display(), layout = ?args.layout, policy = ?args.policy),
)]
pub(super) fn run_render<W: Write>(
    args: &RenderCommand,
    out: &mut W,
) -> Result<ExecutionSummary, CliError> {
    let matrix = resolve_format(args.format, &args.path)
        .read_path(&args.path)
        .map_err(|source| CliError::Input {
            path: args.path.clone(),
            source,
        })?;
    let adapter = GraphAdapter::new().with_policy(args.policy.into());
    let mut surface = DotSurface::new(Vec::new());
    if let RenderOutcome::Skipped(reason) = adapter.render(&matrix, &args.options(), &mut surface)? {
        info!(code = %reason.code(), "render skipped");
        return Ok(ExecutionSummary::Skipped {
            source: args.path.clone(),
            reason,
        });
    }

    let document = surface.into_inner();
    let destination = match &args.output {
        Some(path) => {
            write_document(path, &document)?;
            Destination::File(path.clone())
        }
        None => {
            out.write_all(&document).map_err(CliError::Stdout)?;
            Destination::Stdout
        }
    };
    info!(destination = %destination, bytes = document.len(), "graph rendered");
    Ok(ExecutionSummary::Rendered {
        nodes: matrix.rows(),
        bytes: document.len(),
        destination,
    })
}

fn write_document(path: &Path, document: &[u8]) -> Result<(), CliError> {
    fs::write(path, document).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[instrument(name = "cli.convert", err, skip_all, fields(path = %args.path.display()))]
pub(super) fn run_convert(args: ConvertCommand) -> Result<ExecutionSummary, CliError> {
    let destination = convert_parquet_to_csv(&args.path)?;
    Ok(ExecutionSummary::Converted {
        source: args.path,
        destination,
    })
}

/// Renders `summary` to `writer` as a single human-readable line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::path::PathBuf;
/// # use adjacency_cli::cli::{Destination, ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Generated {
///     rows: 5,
///     cols: 5,
///     destination: Destination::File(PathBuf::from("m.csv")),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "generated 5x5 matrix -> m.csv\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Generated {
            rows,
            cols,
            destination,
        } => writeln!(writer, "generated {rows}x{cols} matrix -> {destination}"),
        ExecutionSummary::Rendered {
            nodes,
            bytes,
            destination,
        } => writeln!(
            writer,
            "rendered {nodes}-node graph ({bytes} bytes of dot) -> {destination}"
        ),
        ExecutionSummary::Skipped { source, reason } => writeln!(
            writer,
            "render skipped for {}: {reason} [{}]",
            source.display(),
            reason.code()
        ),
        ExecutionSummary::Converted {
            source,
            destination,
        } => writeln!(
            writer,
            "converted {} -> {}",
            source.display(),
            destination.display()
        ),
    }
}
