//! Implementation of a simple, undirected graph data structure over a fixed arena of
//! node ids, with the dynamic edge operations the racing solvers need.

use fxhash::FxHashSet;
use std::cmp::Reverse;

/// A simple undirected graph over node ids `0..n`.
///
/// Nodes are indices into the adjacency arena; neighbor lists are index sets, so
/// edge insertion and removal are idempotent by construction. Nodes themselves are
/// never deleted, only disconnected.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UGraph {
    adj_list: Vec<FxHashSet<usize>>,
}

// Static functions
impl UGraph {

    /// Creates a graph with `n` edgeless nodes, ids `0..n`.
    pub fn new(n: usize) -> Self {
        UGraph {
            adj_list: vec![FxHashSet::default(); n],
        }
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.adj_list.len()
    }

    /// Returns an `Iterator` over all node ids.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        0..self.adj_list.len()
    }

    /// Returns the neighborhood of `node`.
    pub fn neighbors(&self, node: usize) -> &FxHashSet<usize> {
        &self.adj_list[node]
    }

    /// Returns the degree of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adj_list[node].len()
    }

    /// Returns the highest degree over all nodes, or `0` if the graph is edgeless.
    ///
    /// Both heuristics use this as their "the graph still has edges" liveness test.
    pub fn max_degree(&self) -> usize {
        self.adj_list.iter().map(|neighbors| neighbors.len()).max().unwrap_or(0)
    }

    /// Returns the node with the highest degree, or `None` if all degrees are zero.
    /// Ties are broken towards the smallest id.
    pub fn max_degree_node(&self) -> Option<usize> {
        let node = self.nodes()
            .max_by_key(|node| (self.degree(*node), Reverse(*node)))?;
        if self.degree(node) == 0 {
            return None
        }
        Some(node)
    }

    /// Returns an iterator over all edges `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .flat_map(|(i, adj)| {
                adj.iter()
                    .filter_map(move |neigh| {
                        if i < *neigh {
                            Some((i, *neigh))
                        } else {
                            None
                        }
                    })
            })
    }

    /// Returns the number of edges of `self`.
    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }

    /// Checks if `cover` touches every edge of `self`.
    pub fn covers_all_edges(&self, cover: &[usize]) -> bool {
        let cover_set: FxHashSet<usize> = cover.iter().copied().collect();
        self.edges()
            .all(|(u, v)| cover_set.contains(&u) || cover_set.contains(&v))
    }

}

// Dynamic functions
impl UGraph {

    /// Connects `u` and `v` symmetrically. Connecting an already-connected pair is a
    /// no-op. Self-loops are rejected at the protocol boundary and must not reach
    /// this point.
    pub fn connect(&mut self, u: usize, v: usize) {
        self.adj_list[u].insert(v);
        self.adj_list[v].insert(u);
    }

    /// Disconnects `u` and `v` symmetrically. Disconnecting an already-disconnected
    /// pair is a no-op.
    pub fn disconnect(&mut self, u: usize, v: usize) {
        self.adj_list[u].remove(&v);
        self.adj_list[v].remove(&u);
    }

    /// Disconnects `node` from every current neighbor, dropping its degree to zero.
    pub fn disconnect_all(&mut self, node: usize) {
        let neighbors = std::mem::take(&mut self.adj_list[node]);
        for neigh in neighbors {
            self.adj_list[neigh].remove(&node);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_is_idempotent() {
        let mut graph = UGraph::new(3);
        graph.connect(0, 1);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        graph.connect(0, 1);
        graph.connect(1, 0);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mut graph = UGraph::new(3);
        graph.connect(0, 1);
        graph.disconnect(0, 1);
        graph.disconnect(0, 1);
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.degree(1), 0);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mut graph = UGraph::new(4);
        graph.connect(2, 3);
        assert!(graph.neighbors(2).contains(&3));
        assert!(graph.neighbors(3).contains(&2));
        graph.disconnect(3, 2);
        assert!(!graph.neighbors(2).contains(&3));
        assert!(!graph.neighbors(3).contains(&2));
    }

    #[test]
    fn max_degree_node_on_edgeless_graph() {
        let graph = UGraph::new(5);
        assert_eq!(graph.max_degree(), 0);
        assert_eq!(graph.max_degree_node(), None);
    }

    #[test]
    fn max_degree_node_breaks_ties_towards_smallest_id() {
        let mut graph = UGraph::new(4);
        // Nodes 1 and 2 both end up with degree 2.
        graph.connect(1, 0);
        graph.connect(1, 3);
        graph.connect(2, 0);
        graph.connect(2, 3);
        assert_eq!(graph.max_degree(), 2);
        assert_eq!(graph.max_degree_node(), Some(1));
    }

    #[test]
    fn disconnect_all_clears_both_sides() {
        let mut graph = UGraph::new(4);
        graph.connect(0, 1);
        graph.connect(0, 2);
        graph.connect(1, 2);
        graph.disconnect_all(0);
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(2), 1);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn edges_are_listed_once() {
        let mut graph = UGraph::new(3);
        graph.connect(0, 1);
        graph.connect(1, 2);
        graph.connect(0, 2);
        let mut edges: Vec<(usize, usize)> = graph.edges().collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn covers_all_edges_test() {
        let mut graph = UGraph::new(4);
        graph.connect(0, 1);
        graph.connect(1, 2);
        graph.connect(2, 3);
        assert!(graph.covers_all_edges(&[1, 2]));
        assert!(graph.covers_all_edges(&[0, 1, 2, 3]));
        assert!(!graph.covers_all_edges(&[1]));
        assert!(!graph.covers_all_edges(&[0, 3]));
    }

}
