//!
//! BFS shortest augmenting path search over a residual matrix
//!
use super::{FlowUnit, ResidualMatrix};
use std::collections::VecDeque;

///
/// Find a shortest (fewest-hop) source-to-sink path through edges with
/// strictly positive residual capacity.
///
/// Neighbors are scanned in ascending vertex order and every vertex is
/// assigned its parent exactly once, on first discovery, so the
/// returned path is deterministic when several shortest paths exist.
/// The search stops as soon as the sink is discovered.
///
/// Returns the path as `(u, v)` edges ordered from source to sink, or
/// `None` when the sink is unreachable.
///
pub fn shortest_augmenting_path<F: FlowUnit>(
    residual: &ResidualMatrix<F>,
    source: usize,
    sink: usize,
) -> Option<Vec<(usize, usize)>> {
    let n = residual.n();
    // parent pointers are local to this search; the source is its own
    // parent so it is never re-discovered
    let mut parent: Vec<Option<usize>> = vec![None; n];
    parent[source] = Some(source);
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if parent[v].is_none() && residual.get(u, v) > F::zero() {
                parent[v] = Some(u);
                if v == sink {
                    return Some(backtrack(&parent, source, sink));
                }
                queue.push_back(v);
            }
        }
    }
    None
}

/// Walk the parent pointers from the sink back to the source and emit
/// the edges in source-to-sink order.
fn backtrack(parent: &[Option<usize>], source: usize, sink: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    let mut v = sink;
    while v != source {
        let u = parent[v].expect("every vertex on the path has a parent");
        edges.push((u, v));
        v = u;
    }
    edges.reverse();
    edges
}
