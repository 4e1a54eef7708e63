//! Graphviz DOT output for [`adjacency_core::Graph`].
//!
//! [`DotSurface`] implements [`DrawingSurface`] by writing an undirected
//! `graph { … }` document. The layout becomes the Graphviz `layout` engine,
//! so the text can be fed straight to `dot -Tsvg`.
//!
//! ```
//! use adjacency_core::{GraphAdapter, Layout, Matrix, RenderOptions};
//! use adjacency_providers_dot::DotSurface;
//!
//! let matrix = Matrix::from_nested(vec![vec![0, 1], vec![1, 0]])?;
//! let mut surface = DotSurface::new(Vec::new());
//! GraphAdapter::new().render(
//!     &matrix,
//!     &RenderOptions::new().with_layout(Layout::Circular),
//!     &mut surface,
//! )?;
//! let text = String::from_utf8(surface.into_inner())?;
//! assert!(text.starts_with("graph {\n  layout=\"circo\";\n"));
//! assert!(text.contains("  0 -- 1;\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Write};

use adjacency_core::{DrawingSurface, Graph, Layout, RenderOptions};
use thiserror::Error;
use tracing::{debug, instrument};

/// Failure raised while writing DOT text.
#[derive(Debug, Error)]
pub enum DotError {
    /// The underlying writer rejected the output.
    #[error("failed to write dot output: {0}")]
    Write(#[from] io::Error),
}

/// Returns the Graphviz engine used for `layout`.
///
/// # Examples
/// ```
/// use adjacency_core::Layout;
/// use adjacency_providers_dot::layout_engine;
///
/// assert_eq!(layout_engine(Layout::Spring), "neato");
/// assert_eq!(layout_engine(Layout::Hierarchical), "dot");
/// ```
#[must_use]
pub const fn layout_engine(layout: Layout) -> &'static str {
    match layout {
        Layout::Spring => "neato",
        Layout::Circular => "circo",
        Layout::Shell => "twopi",
        Layout::Spectral => "sfdp",
        Layout::Random => "fdp",
        Layout::Hierarchical => "dot",
    }
}

/// Writes each drawn graph as a DOT document.
///
/// Nodes are emitted in ascending order and edges in the graph's sorted
/// order, so the same graph and options always produce the same text.
#[derive(Debug)]
pub struct DotSurface<W> {
    writer: W,
}

impl<W: Write> DotSurface<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns a reference to the wrapped writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_document(&mut self, graph: &Graph, options: &RenderOptions) -> io::Result<()> {
        let out = &mut self.writer;
        writeln!(out, "graph {{")?;
        writeln!(out, "  layout={};", quote(layout_engine(options.layout())))?;
        for (key, value) in options.extra() {
            writeln!(out, "  {}={};", quote(key), quote(value))?;
        }

        let mut node_attrs = Vec::new();
        if let Some(color) = options.node_color() {
            node_attrs.push(format!("style=\"filled\", fillcolor={}", quote(color)));
        }
        if let Some(shape) = options.node_shape() {
            node_attrs.push(format!("shape={}", quote(shape)));
        }
        if !node_attrs.is_empty() {
            writeln!(out, "  node [{}];", node_attrs.join(", "))?;
        }
        if let Some(color) = options.edge_color() {
            writeln!(out, "  edge [color={}];", quote(color))?;
        }

        for node in graph.nodes() {
            if options.draws_labels() {
                writeln!(out, "  {node} [label=\"{node}\"];")?;
            } else {
                writeln!(out, "  {node} [label=\"\"];")?;
            }
        }
        for edge in graph.edges() {
            let (a, b) = edge.endpoints();
            if options.draws_edge_labels() {
                writeln!(out, "  {a} -- {b} [label=\"{}\"];", edge.weight())?;
            } else {
                writeln!(out, "  {a} -- {b};")?;
            }
        }
        writeln!(out, "}}")?;
        out.flush()
    }
}

impl<W: Write> DrawingSurface for DotSurface<W> {
    type Error = DotError;

    #[instrument(
        name = "dot.draw",
        err,
        skip_all,
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            engine = layout_engine(options.layout()),
        ),
    )]
    fn draw(&mut self, graph: &Graph, options: &RenderOptions) -> Result<(), DotError> {
        self.write_document(graph, options)?;
        debug!("dot document written");
        Ok(())
    }
}

/// Renders `text` as a double-quoted DOT identifier.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
