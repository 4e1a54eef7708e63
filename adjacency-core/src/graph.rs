//! Undirected graphs derived from square adjacency matrices.

use std::{fmt, ops::Range};

use crate::{Result, error::ShapeError, matrix::Matrix};

/// Rule deciding whether a pair of mirrored cells produces an undirected edge.
///
/// For nodes `a <= b` the *upper* cell is `m[a][b]` and the *lower* cell is
/// `m[b][a]`. On the diagonal both name the same cell, so every policy turns
/// a non-zero diagonal entry into a self-loop.
///
/// Whenever both cells are non-zero and the policy admits the edge, the edge
/// weight is taken from the lower cell.
///
/// # Examples
/// ```
/// use adjacency_core::{Graph, Matrix, SymmetryPolicy};
///
/// let directed = Matrix::from_nested(vec![vec![0, 1], vec![0, 0]])?;
/// let either = Graph::from_adjacency(&directed, SymmetryPolicy::Either)?;
/// let both = Graph::from_adjacency(&directed, SymmetryPolicy::Both)?;
/// assert_eq!(either.edge_count(), 1);
/// assert_eq!(both.edge_count(), 0);
/// # Ok::<(), adjacency_core::ShapeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SymmetryPolicy {
    /// An edge exists when either mirrored cell is non-zero.
    #[default]
    Either,
    /// An edge exists only when both mirrored cells are non-zero.
    Both,
    /// Only the upper triangle (`m[a][b]`, `a <= b`) is consulted.
    Upper,
    /// Only the lower triangle (`m[b][a]`, `a <= b`) is consulted.
    Lower,
}

impl SymmetryPolicy {
    /// Returns the stable lower-case name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Either => "either",
            Self::Both => "both",
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }

    /// Resolves the mirrored cells into the weight of the edge, if any.
    const fn resolve(self, upper: i64, lower: i64) -> Option<i64> {
        match self {
            Self::Either if lower != 0 => Some(lower),
            Self::Either if upper != 0 => Some(upper),
            Self::Both if upper != 0 && lower != 0 => Some(lower),
            Self::Upper if upper != 0 => Some(upper),
            Self::Lower if lower != 0 => Some(lower),
            _ => None,
        }
    }
}

impl fmt::Display for SymmetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An undirected edge between two node indices.
///
/// Endpoints are stored in ascending order, so `(1, 0)` and `(0, 1)` name
/// the same edge.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    source: usize,
    target: usize,
    weight: i64,
}

impl Edge {
    const fn new(a: usize, b: usize, weight: i64) -> Self {
        if a <= b {
            Self {
                source: a,
                target: b,
                weight,
            }
        } else {
            Self {
                source: b,
                target: a,
                weight,
            }
        }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Returns the larger endpoint.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Returns both endpoints in ascending order.
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.source, self.target)
    }

    /// Returns the matrix value the edge was derived from.
    #[must_use]
    pub const fn weight(&self) -> i64 {
        self.weight
    }

    /// Returns whether the edge connects a node to itself.
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// An immutable undirected graph over nodes `0..node_count`.
///
/// Graphs are produced from a square [`Matrix`] by
/// [`Graph::from_adjacency`] or [`crate::GraphAdapter::to_graph`]; there is no
/// other constructor and no mutation API. Edges are sorted by endpoints.
///
/// # Examples
/// ```
/// use adjacency_core::{Graph, Matrix, SymmetryPolicy};
///
/// let matrix = Matrix::from_nested(vec![
///     vec![0, 1, 0],
///     vec![1, 0, 1],
///     vec![0, 1, 0],
/// ])?;
/// let graph = Graph::from_adjacency(&matrix, SymmetryPolicy::default())?;
/// assert_eq!(graph.node_count(), 3);
/// let edges: Vec<_> = graph.edges().iter().map(|edge| edge.endpoints()).collect();
/// assert_eq!(edges, vec![(0, 1), (1, 2)]);
/// # Ok::<(), adjacency_core::ShapeError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Converts a square adjacency matrix into a graph.
    ///
    /// Every pair `a <= b` is inspected once and `policy` decides whether
    /// the mirrored cells produce an edge. Self-loops are not special-cased.
    ///
    /// # Errors
    /// Returns [`ShapeError::NotSquare`] when `matrix` has a different number
    /// of rows and columns.
    pub fn from_adjacency(matrix: &Matrix, policy: SymmetryPolicy) -> Result<Self> {
        if !matrix.is_square() {
            return Err(ShapeError::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        let node_count = matrix.rows();
        let mut edges = Vec::new();
        for a in 0..node_count {
            for b in a..node_count {
                let upper = matrix.get(a, b).unwrap_or_default();
                let lower = matrix.get(b, a).unwrap_or_default();
                if let Some(weight) = policy.resolve(upper, lower) {
                    edges.push(Edge::new(a, b, weight));
                }
            }
        }
        Ok(Self { node_count, edges })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the node indices.
    #[must_use]
    pub const fn nodes(&self) -> Range<usize> {
        0..self.node_count
    }

    /// Returns the edges sorted by endpoints.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of edges, counting each self-loop once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Returns the edge joining `a` and `b`, in either order.
    #[must_use]
    pub fn edge(&self, a: usize, b: usize) -> Option<&Edge> {
        let key = (a.min(b), a.max(b));
        self.edges
            .binary_search_by(|edge| edge.endpoints().cmp(&key))
            .ok()
            .and_then(|index| self.edges.get(index))
    }

    /// Returns whether `a` and `b` are joined by an edge.
    #[must_use]
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.edge(a, b).is_some()
    }
}
