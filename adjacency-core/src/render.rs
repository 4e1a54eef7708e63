//! Rendering options and the drawing-surface seam.
//!
//! The core never draws anything itself. [`crate::GraphAdapter::render`]
//! validates its target and hands a [`Graph`] plus [`RenderOptions`] to a
//! [`DrawingSurface`] implementation supplied by the caller.

use std::{collections::BTreeMap, fmt};

use crate::{error::ShapeError, graph::Graph, matrix::Matrix};

/// Node placement strategy requested from the drawing surface.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Layout {
    /// Force-directed placement.
    #[default]
    Spring,
    /// Nodes on a circle.
    Circular,
    /// Concentric shells around a root.
    Shell,
    /// Placement derived from the graph spectrum.
    Spectral,
    /// Randomised placement.
    Random,
    /// Layered, top-to-bottom placement.
    Hierarchical,
}

impl Layout {
    /// Returns the stable lower-case name of the layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Circular => "circular",
            Self::Shell => "shell",
            Self::Spectral => "spectral",
            Self::Random => "random",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options forwarded verbatim to a [`DrawingSurface`].
///
/// Node labels are drawn unless explicitly disabled. Keys the core does not
/// recognise travel in [`RenderOptions::extra`] untouched.
///
/// # Examples
/// ```
/// use adjacency_core::{Layout, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_layout(Layout::Circular)
///     .with_node_color("lightblue")
///     .with_extra("rankdir", "LR");
/// assert!(options.draws_labels());
/// assert_eq!(options.layout(), Layout::Circular);
/// assert_eq!(options.extra().get("rankdir").map(String::as_str), Some("LR"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    layout: Layout,
    node_labels: bool,
    edge_labels: bool,
    node_color: Option<String>,
    edge_color: Option<String>,
    node_shape: Option<String>,
    extra: BTreeMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            node_labels: true,
            edge_labels: false,
            node_color: None,
            edge_color: None,
            node_shape: None,
            extra: BTreeMap::new(),
        }
    }
}

impl RenderOptions {
    /// Creates options with labels on and everything else at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Enables or disables node labels.
    #[must_use]
    pub fn with_labels(mut self, enabled: bool) -> Self {
        self.node_labels = enabled;
        self
    }

    /// Enables or disables edge weight labels.
    #[must_use]
    pub fn with_edge_labels(mut self, enabled: bool) -> Self {
        self.edge_labels = enabled;
        self
    }

    /// Sets the node fill colour.
    #[must_use]
    pub fn with_node_color(mut self, color: impl Into<String>) -> Self {
        self.node_color = Some(color.into());
        self
    }

    /// Sets the edge colour.
    #[must_use]
    pub fn with_edge_color(mut self, color: impl Into<String>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    /// Sets the node shape.
    #[must_use]
    pub fn with_node_shape(mut self, shape: impl Into<String>) -> Self {
        self.node_shape = Some(shape.into());
        self
    }

    /// Adds a surface-specific option passed through without interpretation.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the layout.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns whether node labels are drawn.
    #[must_use]
    pub const fn draws_labels(&self) -> bool {
        self.node_labels
    }

    /// Returns whether edge weights are drawn.
    #[must_use]
    pub const fn draws_edge_labels(&self) -> bool {
        self.edge_labels
    }

    /// Returns the node colour, if set.
    #[must_use]
    pub fn node_color(&self) -> Option<&str> {
        self.node_color.as_deref()
    }

    /// Returns the edge colour, if set.
    #[must_use]
    pub fn edge_color(&self) -> Option<&str> {
        self.edge_color.as_deref()
    }

    /// Returns the node shape, if set.
    #[must_use]
    pub fn node_shape(&self) -> Option<&str> {
        self.node_shape.as_deref()
    }

    /// Returns the pass-through options.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

/// A backend that paints a graph.
///
/// # Examples
/// ```
/// use adjacency_core::{DrawingSurface, Graph, RenderOptions};
///
/// #[derive(Default)]
/// struct CountingSurface(usize);
///
/// impl DrawingSurface for CountingSurface {
///     type Error = std::convert::Infallible;
///
///     fn draw(&mut self, _graph: &Graph, _options: &RenderOptions) -> Result<(), Self::Error> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait DrawingSurface {
    /// Failure raised by the backend itself.
    type Error;

    /// Paints `graph` using `options`.
    ///
    /// # Errors
    /// Returns the backend's own error when drawing fails.
    fn draw(&mut self, graph: &Graph, options: &RenderOptions) -> Result<(), Self::Error>;
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    type Error = S::Error;

    fn draw(&mut self, graph: &Graph, options: &RenderOptions) -> Result<(), Self::Error> {
        (**self).draw(graph, options)
    }
}

/// What [`crate::GraphAdapter::render`] was asked to draw.
#[derive(Clone, Copy, Debug)]
pub enum RenderTarget<'a> {
    /// A matrix that still has to pass the square-shape check.
    Matrix(&'a Matrix),
    /// A graph, drawn as-is.
    Graph(&'a Graph),
}

impl<'a> From<&'a Matrix> for RenderTarget<'a> {
    fn from(matrix: &'a Matrix) -> Self {
        Self::Matrix(matrix)
    }
}

impl<'a> From<&'a Graph> for RenderTarget<'a> {
    fn from(graph: &'a Graph) -> Self {
        Self::Graph(graph)
    }
}

/// Result of a render call that did not hit a surface failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RenderOutcome {
    /// The surface drew the graph.
    Drawn,
    /// Nothing was drawn; the shape problem was reported through the sink.
    Skipped(ShapeError),
}

impl RenderOutcome {
    /// Returns whether the surface drew anything.
    #[must_use]
    pub const fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn)
    }
}
