//!
//! maxflow solves the [maximum flow problem](https://en.wikipedia.org/wiki/Maximum_flow_problem)
//! on directed graphs with integer capacities, using the Edmonds-Karp
//! shortest-augmenting-path method.
//!
pub mod max_flow;
