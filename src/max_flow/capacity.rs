//!
//! Capacity matrix: the fixed n x n arena of edge capacities
//!
use super::{FlowUnit, InvalidInput};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

///
/// Directed edge capacities for a graph of `n` vertices, stored as an
/// n x n arena indexed by `(from, to)` vertex pairs.
///
/// `capacity[u][v]` and `capacity[v][u]` are independent, so
/// anti-parallel edges may both carry capacity. The size is fixed at
/// construction and the matrix is read-only for the engine once a run
/// starts. Self-capacity entries are meaningless and ignored by the
/// engine.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityMatrix<F: FlowUnit> {
    n: usize,
    cells: Vec<F>,
}

impl<F: FlowUnit> CapacityMatrix<F> {
    /// n x n matrix with every capacity zero.
    pub fn new(n: usize) -> CapacityMatrix<F> {
        CapacityMatrix {
            n,
            cells: vec![F::zero(); n * n],
        }
    }

    /// Build from nested rows. Every row must be as long as the number
    /// of rows.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<CapacityMatrix<F>, InvalidInput> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != n {
                return Err(InvalidInput::NotSquare {
                    row,
                    len: entries.len(),
                    n,
                });
            }
            cells.extend(entries.iter().copied());
        }
        Ok(CapacityMatrix { n, cells })
    }

    /// Build from an edge list. Capacities of repeated edges accumulate.
    pub fn from_edges(
        n: usize,
        edges: &[(usize, usize, F)],
    ) -> Result<CapacityMatrix<F>, InvalidInput> {
        let mut matrix = CapacityMatrix::new(n);
        for &(from, to, capacity) in edges {
            for &vertex in &[from, to] {
                if vertex >= n {
                    return Err(InvalidInput::VertexOutOfRange { vertex, n });
                }
            }
            let cell = matrix.idx(from, to);
            matrix.cells[cell] = matrix.cells[cell] + capacity;
        }
        Ok(matrix)
    }

    /// Adopt the edge weights of a petgraph DiGraph as capacities.
    /// Vertex `v` of the matrix is node index `v` of the graph;
    /// capacities of parallel edges accumulate.
    pub fn from_graph<N>(graph: &DiGraph<N, F>) -> CapacityMatrix<F> {
        let mut matrix = CapacityMatrix::new(graph.node_count());
        for e in graph.edge_references() {
            let cell = matrix.idx(e.source().index(), e.target().index());
            matrix.cells[cell] = matrix.cells[cell] + *e.weight();
        }
        matrix
    }

    /// Positive-capacity edges as a DiGraph, for Dot rendering and
    /// petgraph interop.
    pub fn to_graph(&self) -> DiGraph<(), F> {
        let mut graph = DiGraph::new();
        for _ in 0..self.n {
            graph.add_node(());
        }
        for u in 0..self.n {
            for v in 0..self.n {
                if self.get(u, v) > F::zero() {
                    graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), self.get(u, v));
                }
            }
        }
        graph
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, from: usize, to: usize) -> F {
        self.cells[self.idx(from, to)]
    }

    pub fn set(&mut self, from: usize, to: usize, capacity: F) {
        let cell = self.idx(from, to);
        self.cells[cell] = capacity;
    }

    fn idx(&self, from: usize, to: usize) -> usize {
        assert!(from < self.n && to < self.n, "vertex index out of range");
        from * self.n + to
    }
}
