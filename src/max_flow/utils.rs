//!
//! utils
//!
use super::{CapacityMatrix, Flow, FlowUnit};
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, Graph, NodeIndex};
use petgraph::EdgeType;

pub fn draw<'a, N: 'a, E: 'a, Ty, Ix>(graph: &'a Graph<N, E, Ty, Ix>)
where
    E: std::fmt::Debug,
    N: std::fmt::Debug,
    Ty: EdgeType,
    Ix: petgraph::graph::IndexType,
{
    println!("{:?}", Dot::with_config(&graph, &[]));
}

/// Dump flow over capacity as the usual `flow/capacity` edge labels.
pub fn draw_with_flow<F: FlowUnit>(capacity: &CapacityMatrix<F>, flow: &Flow<F>) {
    let mut graph: DiGraph<(), String> = DiGraph::new();
    for _ in 0..capacity.n() {
        graph.add_node(());
    }
    for u in 0..capacity.n() {
        for v in 0..capacity.n() {
            if u != v && capacity.get(u, v) > F::zero() {
                graph.add_edge(
                    NodeIndex::new(u),
                    NodeIndex::new(v),
                    format!("{}/{}", flow.get(u, v), capacity.get(u, v)),
                );
            }
        }
    }
    draw(&graph);
}
