//! DOT documents written for rendered adjacency matrices.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use std::io::{self, Write};

use adjacency_core::{
    DrawingSurface, Graph, GraphAdapter, Layout, Matrix, RenderOptions, RenderOutcome,
};
use adjacency_providers_dot::{DotError, DotSurface};
use adjacency_test_support::sink::{RecordingSink, SinkLevel};
use rstest::{fixture, rstest};

#[fixture]
fn triangle() -> Graph {
    let matrix = Matrix::from_nested(vec![vec![0, 2, 0], vec![2, 0, 7], vec![0, 7, 1]])
        .expect("rectangular");
    GraphAdapter::new().to_graph(&matrix).expect("square")
}

fn draw(graph: &Graph, options: &RenderOptions) -> String {
    let mut surface = DotSurface::new(Vec::new());
    surface.draw(graph, options).expect("vec writer never fails");
    String::from_utf8(surface.into_inner()).expect("dot output is utf-8")
}

#[rstest]
fn default_options_emit_labelled_nodes_and_plain_edges(triangle: Graph) {
    let text = draw(&triangle, &RenderOptions::default());
    assert_eq!(
        text,
        concat!(
            "graph {\n",
            "  layout=\"neato\";\n",
            "  0 [label=\"0\"];\n",
            "  1 [label=\"1\"];\n",
            "  2 [label=\"2\"];\n",
            "  0 -- 1;\n",
            "  1 -- 2;\n",
            "  2 -- 2;\n",
            "}\n",
        )
    );
}

#[rstest]
fn styling_options_are_emitted(triangle: Graph) {
    let options = RenderOptions::new()
        .with_layout(Layout::Hierarchical)
        .with_labels(false)
        .with_edge_labels(true)
        .with_node_color("lightblue")
        .with_node_shape("circle")
        .with_edge_color("gray")
        .with_extra("rankdir", "LR")
        .with_extra("bgcolor", "transparent");
    let text = draw(&triangle, &options);
    assert_eq!(
        text,
        concat!(
            "graph {\n",
            "  layout=\"dot\";\n",
            "  \"bgcolor\"=\"transparent\";\n",
            "  \"rankdir\"=\"LR\";\n",
            "  node [style=\"filled\", fillcolor=\"lightblue\", shape=\"circle\"];\n",
            "  edge [color=\"gray\"];\n",
            "  0 [label=\"\"];\n",
            "  1 [label=\"\"];\n",
            "  2 [label=\"\"];\n",
            "  0 -- 1 [label=\"2\"];\n",
            "  1 -- 2 [label=\"7\"];\n",
            "  2 -- 2 [label=\"1\"];\n",
            "}\n",
        )
    );
}

#[rstest]
fn output_is_deterministic(triangle: Graph) {
    let options = RenderOptions::new().with_edge_labels(true);
    assert_eq!(draw(&triangle, &options), draw(&triangle, &options));
}

#[rstest]
fn empty_graph_is_an_empty_document() {
    let text = draw(&Graph::default(), &RenderOptions::default());
    assert_eq!(text, "graph {\n  layout=\"neato\";\n}\n");
}

#[rstest]
fn non_square_render_writes_nothing() {
    let adapter = GraphAdapter::with_sink(RecordingSink::default());
    let matrix = Matrix::from_nested(vec![vec![0, 1, 0], vec![1, 0, 1]]).expect("rectangular");
    let mut surface = DotSurface::new(Vec::new());

    let outcome = adapter
        .render(&matrix, &RenderOptions::default(), &mut surface)
        .expect("shape problems are soft");

    assert!(matches!(outcome, RenderOutcome::Skipped(_)));
    assert!(surface.get_ref().is_empty());
    assert_eq!(adapter.sink().at(SinkLevel::Error).len(), 1);
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn writer_failures_surface_from_render(triangle: Graph) {
    let adapter = GraphAdapter::with_sink(RecordingSink::default());
    let mut surface = DotSurface::new(ClosedPipe);

    let err = adapter
        .render(&triangle, &RenderOptions::default(), &mut surface)
        .expect_err("closed pipe must fail");

    let DotError::Write(io_err) = err;
    assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    assert!(adapter.sink().messages().is_empty());
}
