//! Exact minimum vertex cover via reduction to CNF-SAT.
//!
//! The minimum cover size is found by binary search over the cover size `k`; each
//! probed `k` is encoded as a fresh formula and handed to a fresh SAT solver
//! instance. Nothing is learned across probes. That is deliberate: re-encoding is
//! cheap next to solving, and it keeps each probe independent.

use fxhash::FxHashSet;
use splr::Certificate;

use crate::cust_error::SolveError;
use crate::graph::UGraph;

/// Computes a minimum vertex cover of `graph`.
///
/// Binary search over `k` in `[1, n]`: an unsatisfiable probe raises the lower end,
/// a satisfiable probe records the decoded cover and lowers the upper end. The last
/// recorded cover is minimal. An edgeless graph short-circuits to the empty cover.
pub fn minimum_vertex_cover(graph: &UGraph) -> Result<Vec<usize>, SolveError> {
    if graph.max_degree() == 0 {
        return Ok(Vec::new())
    }
    let n = graph.num_nodes();
    let edges: Vec<(usize, usize)> = graph.edges().collect();
    let mut min = 1;
    let mut max = n;
    let mut best = Vec::new();
    while min <= max {
        let k = (min + max) / 2;
        match probe(n, k, &edges)? {
            Some(cover) => {
                best = cover;
                max = k - 1;
            },
            None => min = k + 1,
        }
    }
    Ok(best)
}

/// Asks the SAT backend whether a cover of size at most `k` exists, returning the
/// decoded cover on success.
///
/// Encoding: boolean `x[i][j]` reads "vertex i occupies cover-slot j". Four clause
/// groups: every slot is occupied by at least one vertex; no vertex occupies two
/// slots; no slot is occupied by two vertices; for every edge some endpoint
/// occupies some slot.
fn probe(n: usize, k: usize, edges: &[(usize, usize)]) -> Result<Option<Vec<usize>>, SolveError> {
    // DIMACS-style variable for `x[i][j]`, numbered from 1.
    let var = |i: usize, j: usize| (i * k + j + 1) as i32;
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    // Every slot holds at least one vertex.
    for j in 0..k {
        clauses.push((0..n).map(|i| var(i, j)).collect());
    }
    // At most one slot per vertex.
    for i in 0..n {
        for q in 1..k {
            for p in 0..q {
                clauses.push(vec![-var(i, p), -var(i, q)]);
            }
        }
    }
    // At most one vertex per slot.
    for j in 0..k {
        for q in 1..n {
            for p in 0..q {
                clauses.push(vec![-var(p, j), -var(q, j)]);
            }
        }
    }
    // Every edge has an endpoint in some slot.
    for (u, v) in edges {
        clauses.push((0..k).flat_map(|j| [var(*u, j), var(*v, j)]).collect());
    }

    match Certificate::try_from(clauses) {
        Ok(Certificate::SAT(model)) => {
            let assigned: FxHashSet<i32> = model.into_iter().collect();
            // A vertex is covering iff any of its slot variables is true. The slot
            // assignment itself carries no meaning beyond the encoding.
            let cover = (0..n)
                .filter(|i| (0..k).any(|j| assigned.contains(&var(*i, j))))
                .collect();
            Ok(Some(cover))
        },
        Ok(Certificate::UNSAT) => Ok(None),
        Err(e) => Err(SolveError::from(e)),
    }
}
