use super::CapacityMatrix;

/// mock capacity network generation functions
///
/// 0 feeds 1 and 2, both feed the sink 3, with a 1 -> 2 crossover that
/// lets one extra unit reroute. Max flow 5.
pub fn mock_diamond_network() -> CapacityMatrix<u32> {
    let mut capacity = CapacityMatrix::new(4);
    capacity.set(0, 1, 3);
    capacity.set(0, 2, 2);
    capacity.set(1, 3, 2);
    capacity.set(2, 3, 3);
    capacity.set(1, 2, 1);
    capacity
}

/// mock network cited from Cormen et al., Introduction to Algorithms,
/// chapter 26 (source 0, sink 5). Max flow 23.
pub fn mock_textbook_network() -> CapacityMatrix<u32> {
    let mut capacity = CapacityMatrix::new(6);
    capacity.set(0, 1, 16);
    capacity.set(0, 2, 13);
    capacity.set(1, 3, 12);
    capacity.set(2, 1, 4);
    capacity.set(2, 4, 14);
    capacity.set(3, 2, 9);
    capacity.set(3, 5, 20);
    capacity.set(4, 3, 7);
    capacity.set(4, 5, 4);
    capacity
}

/// {0, 1} and {2, 3} with no edge across
pub fn mock_disconnected_network() -> CapacityMatrix<u32> {
    let mut capacity = CapacityMatrix::new(4);
    capacity.set(0, 1, 4);
    capacity.set(2, 3, 4);
    capacity
}

/// both directions between 0 and 1 carry their own capacity
pub fn mock_antiparallel_network() -> CapacityMatrix<u32> {
    let mut capacity = CapacityMatrix::new(3);
    capacity.set(0, 1, 10);
    capacity.set(1, 0, 4);
    capacity.set(1, 2, 5);
    capacity
}

#[cfg(test)]
mod tests {
    use super::super::flow::is_valid_flow;
    use super::super::max_flow;
    use super::super::utils::draw;
    use super::*;

    #[test]
    fn textbook_network_value() {
        let capacity = mock_textbook_network();
        draw(&capacity.to_graph());
        let result = max_flow(&capacity, 0, 5).unwrap();
        assert_eq!(result.value, 23);
    }

    #[test]
    fn antiparallel_capacities_are_independent() {
        let capacity = mock_antiparallel_network();
        let result = max_flow(&capacity, 0, 2).unwrap();
        assert_eq!(result.value, 5);
        assert_eq!(result.history.len(), 1);

        let flow = result.flow(&capacity);
        assert_eq!(flow.get(1, 0), 0);
        assert!(is_valid_flow(&flow, &capacity, 0, 2));
    }
}
