//!
//! Net flow assignments and their validity checks
//!
use super::{CapacityMatrix, FlowUnit, InvalidInput, ResidualMatrix};

///
/// Net flow committed on each directed edge after a run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow<F: FlowUnit> {
    n: usize,
    cells: Vec<F>,
}

impl<F: FlowUnit> Flow<F> {
    /// Recover the net flow from the original capacities and the final
    /// residual. What was spent on `(u, v)` is `capacity - residual`;
    /// a residual larger than the capacity is credit earned from flow
    /// in the opposite direction, so the net flow there is zero.
    pub fn from_residual(
        capacity: &CapacityMatrix<F>,
        residual: &ResidualMatrix<F>,
    ) -> Flow<F> {
        let n = capacity.n();
        let mut flow = Flow {
            n,
            cells: vec![F::zero(); n * n],
        };
        for u in 0..n {
            for v in 0..n {
                if u == v {
                    continue;
                }
                let spent = capacity.get(u, v);
                let left = residual.get(u, v);
                if spent > left {
                    flow.cells[u * n + v] = spent - left;
                }
            }
        }
        flow
    }

    /// Build from nested rows. Every row must be as long as the number
    /// of rows.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Flow<F>, InvalidInput> {
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
        Ok(Flow { n, cells })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, from: usize, to: usize) -> F {
        assert!(from < self.n && to < self.n, "vertex index out of range");
        self.cells[from * self.n + to]
    }

    /// Total flow entering `v`.
    pub fn inflow(&self, v: usize) -> F {
        (0..self.n).map(|u| self.get(u, v)).sum()
    }

    /// Total flow leaving `v`.
    pub fn outflow(&self, v: usize) -> F {
        (0..self.n).map(|w| self.get(v, w)).sum()
    }

    /// Flow leaving `v` minus flow entering it: the value of the flow
    /// when `v` is the source.
    pub fn value_out_of(&self, v: usize) -> F {
        self.outflow(v) - self.inflow(v)
    }

    /// Flow entering `v` minus flow leaving it: the value of the flow
    /// when `v` is the sink.
    pub fn value_into(&self, v: usize) -> F {
        self.inflow(v) - self.outflow(v)
    }
}

///
/// For each edge, the committed flow must not exceed the capacity.
///
pub fn is_within_capacity<F: FlowUnit>(flow: &Flow<F>, capacity: &CapacityMatrix<F>) -> bool {
    let n = flow.n();
    (0..n).all(|u| (0..n).all(|v| u == v || flow.get(u, v) <= capacity.get(u, v)))
}

///
/// Every vertex other than the source and the sink passes on exactly
/// what it receives.
///
pub fn is_conserving<F: FlowUnit>(flow: &Flow<F>, source: usize, sink: usize) -> bool {
    (0..flow.n())
        .filter(|&v| v != source && v != sink)
        .all(|v| flow.inflow(v) == flow.outflow(v))
}

///
/// A flow is valid when it respects the capacities and conserves flow
/// at every interior vertex.
///
pub fn is_valid_flow<F: FlowUnit>(
    flow: &Flow<F>,
    capacity: &CapacityMatrix<F>,
    source: usize,
    sink: usize,
) -> bool {
    is_within_capacity(flow, capacity) && is_conserving(flow, source, sink)
}
