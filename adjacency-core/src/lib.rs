//! Adjacency core library.
//!
//! Holds the rectangular integer [`Matrix`], the [`MatrixBuilder`] that
//! produces random or nested-list matrices, and the [`GraphAdapter`] that
//! turns square matrices into undirected [`Graph`]s and hands them to a
//! [`DrawingSurface`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adapter;
mod builder;
mod error;
mod graph;
mod matrix;
mod render;
mod sink;

pub use crate::{
    adapter::GraphAdapter,
    builder::MatrixBuilder,
    error::{Result, ShapeError, ShapeErrorCode},
    graph::{Edge, Graph, SymmetryPolicy},
    matrix::Matrix,
    render::{DrawingSurface, Layout, RenderOptions, RenderOutcome, RenderTarget},
    sink::{LogSink, TracingSink, WriterSink},
};
