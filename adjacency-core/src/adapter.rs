//! Shape validation, graph conversion and render dispatch.
//!
//! [`GraphAdapter::to_graph`] treats a non-square matrix as a hard failure
//! and returns it to the caller. [`GraphAdapter::render`] treats the same
//! condition as a soft failure: it reports the problem through the injected
//! [`LogSink`], draws nothing and returns normally.

use tracing::{Span, debug, field, instrument};

use crate::{
    Result,
    graph::{Graph, SymmetryPolicy},
    matrix::Matrix,
    render::{DrawingSurface, RenderOptions, RenderOutcome, RenderTarget},
    sink::{LogSink, TracingSink},
};

/// Converts matrices into graphs and dispatches graphs to a drawing surface.
///
/// # Examples
/// ```
/// use adjacency_core::{
///     DrawingSurface, Graph, GraphAdapter, Matrix, RenderOptions, RenderOutcome, WriterSink,
/// };
///
/// #[derive(Default)]
/// struct Count(usize);
///
/// impl DrawingSurface for Count {
///     type Error = std::convert::Infallible;
///     fn draw(&mut self, _: &Graph, _: &RenderOptions) -> Result<(), Self::Error> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let adapter = GraphAdapter::with_sink(WriterSink::new(Vec::new()));
/// let mut surface = Count::default();
/// let ragged = Matrix::from_nested(vec![vec![0, 1, 0], vec![1, 0, 1]])?;
///
/// let outcome = adapter
///     .render(&ragged, &RenderOptions::default(), &mut surface)
///     .expect("surface is infallible");
/// assert!(matches!(outcome, RenderOutcome::Skipped(_)));
/// assert_eq!(surface.0, 0);
///
/// let logged = String::from_utf8(adapter.into_sink().into_inner()).expect("utf-8");
/// assert_eq!(
///     logged,
///     "[ error ]: adjacency matrix not square: nx,ny=(2, 3) [SHAPE_NOT_SQUARE]\n",
/// );
/// # Ok::<(), adjacency_core::ShapeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphAdapter<L = TracingSink> {
    sink: L,
    policy: SymmetryPolicy,
}

impl GraphAdapter<TracingSink> {
    /// Creates an adapter that reports through `tracing` and uses
    /// [`SymmetryPolicy::Either`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: LogSink> GraphAdapter<L> {
    /// Creates an adapter reporting soft failures through `sink`.
    pub const fn with_sink(sink: L) -> Self {
        Self {
            sink,
            policy: SymmetryPolicy::Either,
        }
    }

    /// Overrides the rule used for asymmetric matrices.
    #[must_use]
    pub const fn with_policy(mut self, policy: SymmetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured symmetry policy.
    #[must_use]
    pub const fn policy(&self) -> SymmetryPolicy {
        self.policy
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &L {
        &self.sink
    }

    /// Consumes the adapter and returns its sink.
    pub fn into_sink(self) -> L {
        self.sink
    }

    /// Validates that `matrix` is square and converts it into a [`Graph`].
    ///
    /// # Errors
    /// Returns [`crate::ShapeError::NotSquare`] when the row and column counts
    /// differ.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::{GraphAdapter, Matrix, ShapeError};
    ///
    /// let adapter = GraphAdapter::new();
    /// let matrix = Matrix::from_nested(vec![vec![1, 0], vec![0, 0]])?;
    /// let graph = adapter.to_graph(&matrix)?;
    /// assert!(graph.contains_edge(0, 0));
    ///
    /// let wide = Matrix::from_nested(vec![vec![0, 0, 0]])?;
    /// assert_eq!(adapter.to_graph(&wide), Err(ShapeError::NotSquare { rows: 1, cols: 3 }));
    /// # Ok::<(), ShapeError>(())
    /// ```
    #[instrument(
        name = "adapter.to_graph",
        err,
        skip(self, matrix),
        fields(rows = matrix.rows(), cols = matrix.cols(), policy = %self.policy),
    )]
    pub fn to_graph(&self, matrix: &Matrix) -> Result<Graph> {
        let graph = Graph::from_adjacency(matrix, self.policy)?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "converted adjacency matrix"
        );
        Ok(graph)
    }

    /// Draws `target` on `surface`.
    ///
    /// A [`RenderTarget::Graph`] is drawn without any validation. A
    /// [`RenderTarget::Matrix`] is converted first; when it is not square a
    /// single error message goes to the sink, the surface is left untouched
    /// and [`RenderOutcome::Skipped`] is returned.
    ///
    /// # Errors
    /// Returns the surface's own error, unchanged, when drawing fails. Shape
    /// problems are never returned as errors.
    #[instrument(
        name = "adapter.render",
        skip_all,
        fields(target = field::Empty, layout = %options.layout()),
    )]
    pub fn render<'t, S>(
        &self,
        target: impl Into<RenderTarget<'t>>,
        options: &RenderOptions,
        surface: &mut S,
    ) -> core::result::Result<RenderOutcome, S::Error>
    where
        S: DrawingSurface + ?Sized,
    {
        let span = Span::current();
        let converted;
        let graph = match target.into() {
            RenderTarget::Graph(graph) => {
                span.record("target", "graph");
                graph
            }
            RenderTarget::Matrix(matrix) => {
                span.record("target", "matrix");
                match Graph::from_adjacency(matrix, self.policy) {
                    Ok(graph) => {
                        converted = graph;
                        &converted
                    }
                    Err(err) => {
                        self.sink.error(&format!("{err} [{}]", err.code()));
                        return Ok(RenderOutcome::Skipped(err));
                    }
                }
            }
        };
        surface.draw(graph, options)?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph drawn"
        );
        Ok(RenderOutcome::Drawn)
    }
}
