//!
//! Residual matrix: the mutable remaining-capacity state of one run
//!
use super::{CapacityMatrix, FlowUnit, MaxFlowError};
use itertools::Itertools;
use std::collections::VecDeque;

///
/// Residual capacities, owned by one run of the engine.
///
/// `get(u, v)` is the amount of flow that can still be pushed from `u`
/// to `v`: the original capacity minus the net flow already committed
/// on `(u, v)`, plus any flow committed on `(v, u)`. Pushing along a
/// reverse arc cancels previously committed flow, which is how
/// rerouting is modeled. Every entry stays non-negative.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualMatrix<F: FlowUnit> {
    n: usize,
    cells: Vec<F>,
}

impl<F: FlowUnit> ResidualMatrix<F> {
    /// Start-of-run residual: a copy of the capacities with the
    /// meaningless self-capacity entries forced to zero.
    pub fn from_capacity(capacity: &CapacityMatrix<F>) -> ResidualMatrix<F> {
        let n = capacity.n();
        let mut residual = ResidualMatrix {
            n,
            cells: vec![F::zero(); n * n],
        };
        for u in 0..n {
            for v in 0..n {
                if u != v {
                    let cell = residual.idx(u, v);
                    residual.cells[cell] = capacity.get(u, v);
                }
            }
        }
        residual
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, from: usize, to: usize) -> F {
        self.cells[self.idx(from, to)]
    }

    /// Bottleneck of a path: the minimum residual capacity among its
    /// edges.
    pub fn bottleneck(&self, edges: &[(usize, usize)]) -> F {
        edges
            .iter()
            .map(|&(u, v)| self.get(u, v))
            .min()
            .expect("a path has at least one edge")
    }

    /// Commit one augmentation: decrement every forward edge of the
    /// path by `amount` and credit the same amount to its reverse arc.
    /// The update is all-or-nothing; when a reverse credit would leave
    /// the integer range the matrix is left untouched and the run is
    /// over.
    pub fn augment(&mut self, edges: &[(usize, usize)], amount: F) -> Result<(), MaxFlowError> {
        debug_assert!(
            edges.iter().tuple_windows().all(|(a, b)| a.1 == b.0),
            "path edges must be contiguous"
        );
        for &(u, v) in edges {
            debug_assert!(self.get(u, v) >= amount, "bottleneck exceeds residual");
            if self.get(v, u).checked_add(amount).is_none() {
                return Err(MaxFlowError::Overflow);
            }
        }
        // verified above, so the plain arithmetic cannot wrap
        for &(u, v) in edges {
            let forward = self.idx(u, v);
            self.cells[forward] = self.cells[forward] - amount;
            let reverse = self.idx(v, u);
            self.cells[reverse] = self.cells[reverse] + amount;
        }
        Ok(())
    }

    /// Vertices reachable from `start` through strictly positive
    /// residual capacity. Once a run has terminated this set is the
    /// source side of a minimum cut.
    pub fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut reachable = vec![false; self.n];
        reachable[start] = true;
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            for v in 0..self.n {
                if !reachable[v] && self.get(u, v) > F::zero() {
                    reachable[v] = true;
                    queue.push_back(v);
                }
            }
        }
        reachable
    }

    fn idx(&self, from: usize, to: usize) -> usize {
        assert!(from < self.n && to < self.n, "vertex index out of range");
        from * self.n + to
    }
}
