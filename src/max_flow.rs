//!
//! Maximum flow between two vertices of a directed capacitated graph,
//! computed by the Edmonds-Karp method: repeated BFS for the shortest
//! augmenting path in the residual matrix, until none is left.
//!
pub mod capacity;
pub mod flow;
pub mod flow_unit;
pub mod mocks;
pub mod path;
pub mod residual;
pub mod search;
pub mod utils;

pub use capacity::CapacityMatrix;
pub use flow::Flow;
pub use flow_unit::FlowUnit;
pub use path::AugmentingPath;
pub use residual::ResidualMatrix;

use log::debug;
use search::shortest_augmenting_path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

///
/// Ways the capacity matrix or the source/sink pair can be malformed.
///
/// All of these are detected up front; the engine never starts a run on
/// malformed input.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// A run needs a source and a sink, so at least two vertices
    #[error("graph has {0} vertices, at least 2 are required")]
    TooFewVertices(usize),
    #[error("vertex {vertex} is out of range for a graph of {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },
    #[error("source and sink are both vertex {0}")]
    SourceIsSink(usize),
    #[error("negative capacity on edge {from} -> {to}")]
    NegativeCapacity { from: usize, to: usize },
    /// A nested-row matrix constructor was given ragged rows
    #[error("row {row} has {len} entries in a matrix of {n} rows")]
    NotSquare { row: usize, len: usize, n: usize },
}

///
/// Errors reported to the caller of the compute functions.
///
/// There is no partial recovery: after any error the residual state of
/// the run is invalid and must be discarded, not reused.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MaxFlowError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// The accumulated flow (or a reverse-arc credit) left the
    /// representable range of the flow type
    #[error("flow exceeds the integer range")]
    Overflow,
    /// The cooperative cancellation flag was observed set
    #[error("computation was cancelled")]
    Cancelled,
}

///
/// Result of a completed run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxFlow<F: FlowUnit> {
    /// Total flow routed from source to sink
    pub value: F,
    /// The augmenting paths, one per iteration, in commit order
    pub history: Vec<AugmentingPath<F>>,
    /// Residual matrix left by the final iteration
    pub residual: ResidualMatrix<F>,
    /// Source vertex of the run
    pub source: usize,
    /// Sink vertex of the run
    pub sink: usize,
}

impl<F: FlowUnit> MaxFlow<F> {
    /// Net flow committed on each edge of the original graph.
    pub fn flow(&self, capacity: &CapacityMatrix<F>) -> Flow<F> {
        Flow::from_residual(capacity, &self.residual)
    }

    /// Source side of a minimum cut: the vertices still reachable from
    /// the source through positive residual capacity. Every capacity
    /// edge leaving this set is saturated, and their capacities sum to
    /// `value`.
    pub fn min_cut(&self) -> Vec<usize> {
        self.residual
            .reachable_from(self.source)
            .iter()
            .enumerate()
            .filter(|(_, reachable)| **reachable)
            .map(|(v, _)| v)
            .collect()
    }
}

///
/// Lazy sequence of augmenting paths: the engine loop as an iterator.
///
/// Each `next()` runs one Edmonds-Karp iteration on the residual state
/// left by the previous one: a BFS for the shortest augmenting path,
/// the bottleneck computation, and the residual update. The sequence
/// ends (`None`) when the sink is no longer reachable. The iterator is
/// finite and non-restartable; after it yields an `Err` it yields
/// `None` forever and the residual state must be discarded.
///
pub struct AugmentingPaths<F: FlowUnit> {
    residual: ResidualMatrix<F>,
    source: usize,
    sink: usize,
    total: F,
    done: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl<F: FlowUnit> AugmentingPaths<F> {
    /// Validate the inputs and set up the residual matrix for a run.
    pub fn new(
        capacity: &CapacityMatrix<F>,
        source: usize,
        sink: usize,
    ) -> Result<AugmentingPaths<F>, MaxFlowError> {
        validate(capacity, source, sink)?;
        Ok(AugmentingPaths {
            residual: ResidualMatrix::from_capacity(capacity),
            source,
            sink,
            total: F::zero(),
            done: false,
            cancel: None,
        })
    }

    /// Watch `flag` at the top of every iteration; once it is set the
    /// iterator fails with `Cancelled` instead of augmenting further.
    /// A committed iteration is never rolled back, so the residual
    /// state observed on cancellation is consistent at an iteration
    /// boundary.
    pub fn cancelled_by(mut self, flag: Arc<AtomicBool>) -> AugmentingPaths<F> {
        self.cancel = Some(flag);
        self
    }

    /// Flow committed so far.
    pub fn total(&self) -> F {
        self.total
    }

    /// Stop iterating and take the residual matrix.
    pub fn into_residual(self) -> ResidualMatrix<F> {
        self.residual
    }

    /// One augmentation: bottleneck, residual update, total update.
    fn push(&mut self, edges: Vec<(usize, usize)>) -> Result<AugmentingPath<F>, MaxFlowError> {
        let flow = self.residual.bottleneck(&edges);
        self.residual.augment(&edges, flow)?;
        self.total = self.total.checked_add(flow).ok_or(MaxFlowError::Overflow)?;
        let path = AugmentingPath::new(edges, flow);
        debug!("augmenting path {}, total flow {}", path, self.total);
        Ok(path)
    }
}

impl<F: FlowUnit> Iterator for AugmentingPaths<F> {
    type Item = Result<AugmentingPath<F>, MaxFlowError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.done = true;
                return Some(Err(MaxFlowError::Cancelled));
            }
        }
        match shortest_augmenting_path(&self.residual, self.source, self.sink) {
            Some(edges) => {
                let step = self.push(edges);
                if step.is_err() {
                    self.done = true;
                }
                Some(step)
            }
            None => {
                // normal terminal condition: the sink is unreachable
                self.done = true;
                debug!("no more augmenting paths, max flow = {}", self.total);
                None
            }
        }
    }
}

fn validate<F: FlowUnit>(
    capacity: &CapacityMatrix<F>,
    source: usize,
    sink: usize,
) -> Result<(), InvalidInput> {
    let n = capacity.n();
    if n < 2 {
        return Err(InvalidInput::TooFewVertices(n));
    }
    for &vertex in &[source, sink] {
        if vertex >= n {
            return Err(InvalidInput::VertexOutOfRange { vertex, n });
        }
    }
    if source == sink {
        return Err(InvalidInput::SourceIsSink(source));
    }
    for u in 0..n {
        for v in 0..n {
            if capacity.get(u, v).is_negative() {
                return Err(InvalidInput::NegativeCapacity { from: u, to: v });
            }
        }
    }
    Ok(())
}

fn drain<F, O>(
    mut paths: AugmentingPaths<F>,
    observer: &mut O,
) -> Result<MaxFlow<F>, MaxFlowError>
where
    F: FlowUnit,
    O: FnMut(&AugmentingPath<F>, F),
{
    let mut history = Vec::new();
    while let Some(step) = paths.next() {
        let path = step?;
        observer(&path, paths.total());
        history.push(path);
    }
    let (value, source, sink) = (paths.total(), paths.source, paths.sink);
    Ok(MaxFlow {
        value,
        history,
        source,
        sink,
        residual: paths.into_residual(),
    })
}

//
// public functions
//

///
/// Compute the maximum flow from `source` to `sink` on `capacity`.
///
/// A disconnected source/sink pair is a success with value zero and an
/// empty history, not an error.
///
pub fn max_flow<F: FlowUnit>(
    capacity: &CapacityMatrix<F>,
    source: usize,
    sink: usize,
) -> Result<MaxFlow<F>, MaxFlowError> {
    max_flow_with_observer(capacity, source, sink, |_path, _total| ())
}

///
/// Same as [`max_flow`], invoking `observer` with each augmenting path
/// and the running total, synchronously and in commit order,
/// immediately after the residual update and before the next BFS.
///
pub fn max_flow_with_observer<F, O>(
    capacity: &CapacityMatrix<F>,
    source: usize,
    sink: usize,
    mut observer: O,
) -> Result<MaxFlow<F>, MaxFlowError>
where
    F: FlowUnit,
    O: FnMut(&AugmentingPath<F>, F),
{
    let paths = AugmentingPaths::new(capacity, source, sink)?;
    drain(paths, &mut observer)
}

///
/// Same as [`max_flow`], checking `cancel` at the top of every
/// iteration and failing with `Cancelled` once it is set.
///
pub fn max_flow_interruptible<F: FlowUnit>(
    capacity: &CapacityMatrix<F>,
    source: usize,
    sink: usize,
    cancel: Arc<AtomicBool>,
) -> Result<MaxFlow<F>, MaxFlowError> {
    let paths = AugmentingPaths::new(capacity, source, sink)?.cancelled_by(cancel);
    drain(paths, &mut |_path, _total| ())
}

#[cfg(test)]
mod tests {
    use super::flow::{is_conserving, is_valid_flow, is_within_capacity};
    use super::mocks::*;
    use super::*;

    #[test]
    fn single_edge_network() {
        let mut capacity: CapacityMatrix<u32> = CapacityMatrix::new(2);
        capacity.set(0, 1, 5);

        let result = max_flow(&capacity, 0, 1).unwrap();
        assert_eq!(result.value, 5);
        assert_eq!(result.history.len(), 1);
        assert_eq!(result.history[0].edges, vec![(0, 1)]);
        assert_eq!(result.history[0].flow, 5);
    }

    #[test]
    fn diamond_network() {
        let capacity = mock_diamond_network();
        let result = max_flow(&capacity, 0, 3).unwrap();
        assert_eq!(result.value, 5);

        // the history is fixed by the ascending-index BFS tie-break
        let history: Vec<_> = result
            .history
            .iter()
            .map(|p| (p.edges.clone(), p.flow))
            .collect();
        assert_eq!(
            history,
            vec![
                (vec![(0, 1), (1, 3)], 2),
                (vec![(0, 2), (2, 3)], 2),
                (vec![(0, 1), (1, 2), (2, 3)], 1),
            ]
        );

        // both edges into the sink end up saturated
        let flow = result.flow(&capacity);
        assert_eq!(flow.get(1, 3), 2);
        assert_eq!(flow.get(2, 3), 3);
        assert!(is_valid_flow(&flow, &capacity, 0, 3));
    }

    #[test]
    fn disconnected_source_and_sink() {
        let capacity = mock_disconnected_network();
        let result = max_flow(&capacity, 0, 3).unwrap();
        assert_eq!(result.value, 0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn self_capacity_is_ignored() {
        let mut capacity = mock_diamond_network();
        capacity.set(1, 1, 7);
        let result = max_flow(&capacity, 0, 3).unwrap();
        assert_eq!(result.value, 5);
        assert_eq!(result.history, max_flow(&mock_diamond_network(), 0, 3).unwrap().history);
    }

    #[test]
    fn rejects_undersized_graphs() {
        let capacity: CapacityMatrix<u32> = CapacityMatrix::new(1);
        assert_eq!(
            max_flow(&capacity, 0, 0),
            Err(MaxFlowError::InvalidInput(InvalidInput::TooFewVertices(1)))
        );
    }

    #[test]
    fn rejects_equal_source_and_sink() {
        let capacity = mock_diamond_network();
        assert_eq!(
            max_flow(&capacity, 2, 2),
            Err(MaxFlowError::InvalidInput(InvalidInput::SourceIsSink(2)))
        );
    }

    #[test]
    fn rejects_out_of_range_vertices() {
        let capacity = mock_diamond_network();
        assert_eq!(
            max_flow(&capacity, 0, 4),
            Err(MaxFlowError::InvalidInput(InvalidInput::VertexOutOfRange {
                vertex: 4,
                n: 4
            }))
        );
        assert_eq!(
            max_flow(&capacity, 9, 3),
            Err(MaxFlowError::InvalidInput(InvalidInput::VertexOutOfRange {
                vertex: 9,
                n: 4
            }))
        );
    }

    #[test]
    fn rejects_negative_capacities() {
        let capacity =
            CapacityMatrix::from_rows(vec![vec![0i64, -3], vec![0, 0]]).unwrap();
        assert_eq!(
            max_flow(&capacity, 0, 1),
            Err(MaxFlowError::InvalidInput(InvalidInput::NegativeCapacity {
                from: 0,
                to: 1
            }))
        );
    }

    #[test]
    fn second_run_is_identical() {
        let capacity = mock_textbook_network();
        let first = max_flow(&capacity, 0, 5).unwrap();
        let second = max_flow(&capacity, 0, 5).unwrap();
        assert_eq!(first.value, second.value);
        assert_eq!(first.history, second.history);
    }

    #[test]
    fn flow_is_conserved_and_within_capacity() {
        let capacity = mock_textbook_network();
        let result = max_flow(&capacity, 0, 5).unwrap();
        assert_eq!(result.value, 23);

        let flow = result.flow(&capacity);
        assert!(is_within_capacity(&flow, &capacity));
        assert!(is_conserving(&flow, 0, 5));
        assert_eq!(flow.value_out_of(0), result.value);
        assert_eq!(flow.value_into(5), result.value);
    }

    #[test]
    fn value_equals_min_cut_capacity() {
        let capacity = mock_textbook_network();
        let result = max_flow(&capacity, 0, 5).unwrap();
        let source_side = result.min_cut();
        assert!(source_side.contains(&0));
        assert!(!source_side.contains(&5));

        // every capacity edge crossing the cut is saturated and the
        // crossing capacities sum to the max flow value
        let flow = result.flow(&capacity);
        let mut cut_capacity = 0;
        for &u in &source_side {
            for v in 0..capacity.n() {
                if !source_side.contains(&v) && capacity.get(u, v) > 0 {
                    assert_eq!(flow.get(u, v), capacity.get(u, v));
                    cut_capacity += capacity.get(u, v);
                }
            }
        }
        assert_eq!(cut_capacity, result.value);
    }

    #[test]
    fn overflow_is_detected() {
        let mut capacity: CapacityMatrix<u32> = CapacityMatrix::new(4);
        capacity.set(0, 1, u32::MAX);
        capacity.set(1, 3, u32::MAX);
        capacity.set(0, 2, u32::MAX);
        capacity.set(2, 3, u32::MAX);
        assert_eq!(max_flow(&capacity, 0, 3), Err(MaxFlowError::Overflow));
    }

    #[test]
    fn observer_sees_each_step_in_order() {
        let capacity = mock_diamond_network();
        let mut seen = Vec::new();
        let result = max_flow_with_observer(&capacity, 0, 3, |path, total| {
            seen.push((path.clone(), total));
        })
        .unwrap();

        assert_eq!(seen.len(), result.history.len());
        let mut running = 0;
        for ((path, total), recorded) in seen.iter().zip(result.history.iter()) {
            running += path.flow;
            assert_eq!(*total, running);
            assert_eq!(path, recorded);
        }
        assert_eq!(running, result.value);
    }

    #[test]
    fn cancellation_before_the_first_iteration() {
        let capacity = mock_diamond_network();
        let cancel = Arc::new(AtomicBool::new(true));
        assert_eq!(
            max_flow_interruptible(&capacity, 0, 3, cancel),
            Err(MaxFlowError::Cancelled)
        );
    }

    #[test]
    fn cancellation_leaves_whole_iterations() {
        let capacity = mock_diamond_network();
        let cancel = Arc::new(AtomicBool::new(false));
        let mut paths = AugmentingPaths::new(&capacity, 0, 3)
            .unwrap()
            .cancelled_by(cancel.clone());

        let first = paths.next().unwrap().unwrap();
        assert_eq!(first.flow, 2);

        cancel.store(true, Ordering::Relaxed);
        assert_eq!(paths.next(), Some(Err(MaxFlowError::Cancelled)));
        assert_eq!(paths.next(), None);
        // the committed iteration stays committed
        assert_eq!(paths.total(), 2);
    }
}
