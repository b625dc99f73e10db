//! Implementation of the two greedy vertex cover approximations that race the
//! exact solver.
//!
//! Neither comes with a constant-factor guarantee; max-degree removal is the
//! classic log(n)-factor greedy and the pair variant trades cover size for fewer
//! iterations. Both strictly reduce the total degree of their private graph in
//! every iteration, so termination is unconditional.

use std::cmp::Reverse;

use crate::graph::UGraph;

/// Approximates a vertex cover by repeatedly taking a node of maximum degree and
/// disconnecting it from the rest of the graph, until no edges remain.
pub fn max_degree_cover(graph: &mut UGraph) -> Vec<usize> {
    let mut cover = Vec::new();
    while let Some(target) = graph.max_degree_node() {
        cover.push(target);
        graph.disconnect_all(target);
    }
    cover
}

/// Approximates a vertex cover by repeatedly taking a node of maximum degree
/// together with its highest-degree neighbor, disconnecting both, until no edges
/// remain. Always returns pairs, so the cover size is even.
pub fn degree_pair_cover(graph: &mut UGraph) -> Vec<usize> {
    let mut cover = Vec::new();
    while let Some(first) = graph.max_degree_node() {
        // `first` has positive degree, so a neighbor exists.
        let second = graph.neighbors(first)
            .iter()
            .copied()
            .max_by_key(|neigh| (graph.degree(*neigh), Reverse(*neigh)))
            .expect("`first` has at least one neighbor");
        cover.push(first);
        cover.push(second);
        graph.disconnect_all(first);
        graph.disconnect_all(second);
    }
    cover
}
