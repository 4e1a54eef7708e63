//! Argument types parsed by [`clap`].

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use adjacency_core::{Layout, RenderOptions, SymmetryPolicy};
use adjacency_providers_tabular::TabularFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "adjacency",
    about = "Generate, convert and render adjacency matrices."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Write a random integer matrix as CSV or Parquet.
    Generate(GenerateCommand),
    /// Render a square matrix as a Graphviz DOT graph.
    Render(RenderCommand),
    /// Convert a Parquet matrix into a CSV file beside it.
    Convert(ConvertCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of rows.
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Number of columns.
    #[arg(long, default_value_t = 5)]
    pub cols: usize,

    /// Exclusive upper bound of every cell.
    #[arg(long = "upper-bound", default_value = "2")]
    pub upper_bound: NonZeroU32,

    /// Seed for reproducible output; omitted means a fresh matrix each run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// File to write; CSV goes to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output encoding (defaults to the output file extension).
    #[arg(long, value_enum, requires = "output")]
    pub format: Option<FormatArg>,
}

/// Options accepted by the `render` command.
#[derive(Debug, Args, Clone)]
pub struct RenderCommand {
    /// Matrix file to render.
    pub path: PathBuf,

    /// Input encoding (defaults to the file extension).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Node placement requested from Graphviz.
    #[arg(long, value_enum, default_value_t = LayoutArg::Spring)]
    pub layout: LayoutArg,

    /// How mirrored cells of an asymmetric matrix combine into edges.
    #[arg(long, value_enum, default_value_t = PolicyArg::Either)]
    pub policy: PolicyArg,

    /// Draw nodes without index labels.
    #[arg(long = "no-labels")]
    pub no_labels: bool,

    /// Label edges with their weights.
    #[arg(long = "edge-labels")]
    pub edge_labels: bool,

    /// Node fill colour.
    #[arg(long = "node-color")]
    pub node_color: Option<String>,

    /// Edge colour.
    #[arg(long = "edge-color")]
    pub edge_color: Option<String>,

    /// Node shape.
    #[arg(long = "node-shape")]
    pub node_shape: Option<String>,

    /// Extra graph attribute as `KEY=VALUE`; may be repeated.
    #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// File to write; DOT goes to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl RenderCommand {
    /// Builds the render options described by the flags.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        let mut options = RenderOptions::new()
            .with_layout(self.layout.into())
            .with_labels(!self.no_labels)
            .with_edge_labels(self.edge_labels);
        if let Some(color) = &self.node_color {
            options = options.with_node_color(color);
        }
        if let Some(color) = &self.edge_color {
            options = options.with_edge_color(color);
        }
        if let Some(shape) = &self.node_shape {
            options = options.with_node_shape(shape);
        }
        self.attributes
            .iter()
            .fold(options, |acc, (key, value)| acc.with_extra(key, value))
    }
}

/// Options accepted by the `convert` command.
#[derive(Debug, Args, Clone)]
pub struct ConvertCommand {
    /// Parquet file to convert.
    pub path: PathBuf,
}

/// Matrix file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated values with a header line.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl From<FormatArg> for TabularFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Parquet => Self::Parquet,
        }
    }
}

/// Picks the explicit format when given, otherwise infers it from `path`.
pub(super) fn resolve_format(explicit: Option<FormatArg>, path: &Path) -> TabularFormat {
    explicit.map_or_else(|| TabularFormat::from_path(path), TabularFormat::from)
}

/// Layout names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Force-directed placement.
    Spring,
    /// Nodes on a circle.
    Circular,
    /// Concentric shells.
    Shell,
    /// Spectral placement.
    Spectral,
    /// Random placement.
    Random,
    /// Layered placement.
    Hierarchical,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Spring => Self::Spring,
            LayoutArg::Circular => Self::Circular,
            LayoutArg::Shell => Self::Shell,
            LayoutArg::Spectral => Self::Spectral,
            LayoutArg::Random => Self::Random,
            LayoutArg::Hierarchical => Self::Hierarchical,
        }
    }
}

/// Symmetry policies accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Edge when either mirrored cell is non-zero.
    Either,
    /// Edge only when both mirrored cells are non-zero.
    Both,
    /// Consult only the upper triangle.
    Upper,
    /// Consult only the lower triangle.
    Lower,
}

impl From<PolicyArg> for SymmetryPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Either => Self::Either,
            PolicyArg::Both => Self::Both,
            PolicyArg::Upper => Self::Upper,
            PolicyArg::Lower => Self::Lower,
        }
    }
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("rankdir=LR", ("rankdir", "LR"))]
    #[case(" bgcolor =#ffffff", ("bgcolor", "#ffffff"))]
    #[case("label=a=b", ("label", "a=b"))]
    #[case("splines=", ("splines", ""))]
    fn attributes_split_on_first_equals(#[case] raw: &str, #[case] expected: (&str, &str)) {
        let (key, value) = parse_attribute(raw).expect("valid attribute");
        assert_eq!((key.as_str(), value.as_str()), expected);
    }

    #[rstest]
    #[case("rankdir")]
    #[case("=LR")]
    fn malformed_attributes_are_rejected(#[case] raw: &str) {
        assert!(parse_attribute(raw).is_err());
    }

    #[rstest]
    #[case(None, "m.parquet", TabularFormat::Parquet)]
    #[case(None, "m.csv", TabularFormat::Csv)]
    #[case(Some(FormatArg::Csv), "m.parquet", TabularFormat::Csv)]
    #[case(Some(FormatArg::Parquet), "m.dat", TabularFormat::Parquet)]
    fn explicit_format_wins_over_extension(
        #[case] explicit: Option<FormatArg>,
        #[case] path: &str,
        #[case] expected: TabularFormat,
    ) {
        assert_eq!(resolve_format(explicit, Path::new(path)), expected);
    }
}
