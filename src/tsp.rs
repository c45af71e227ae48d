//! Exact Traveling Salesman solving by exhaustive enumeration.
//!
//! The search runs in three stages:
//! 1. [`CycleEnumerator`] walks every Hamiltonian cycle anchored at node 0 by backtracking.
//! 2. [`dedup_cycles`] collapses each tour and its reversal to a single entry.
//! 3. [`BruteForceSolver`] scores every remaining tour and ranks them by distance.
//!
//! The cost is O((n-1)!) in the worst case, so this is only practical for small
//! graphs (the usual range is 8 to 16 nodes).
//!
//! # Example
//! ```
//! use brute_tsp::graph::WeightedGraph;
//! use brute_tsp::tsp;
//!
//! let graph = WeightedGraph::from_matrix(vec![
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ])
//! .unwrap();
//!
//! let solution = tsp::solve(&graph).unwrap();
//! assert_eq!(solution.total_cycles, 3);
//! assert_eq!(solution.best_distance, Some(80.0));
//! assert_eq!(solution.best_cycle.unwrap().as_slice(), &[0, 1, 3, 2]);
//! ```

pub mod brute_force;
pub mod cancel;
pub mod canonical;
pub mod enumerator;

use num_traits::Float;
use std::fmt::Debug;

use crate::error::Result;
use crate::graph::WeightedGraph;

pub use brute_force::{BruteForceSolver, ScoredCycle, Solution, SolutionSummary};
pub use cancel::CancellationToken;
pub use canonical::{canonical_key, dedup_cycles, CanonicalKey};
pub use enumerator::{Cycle, CycleEnumerator, SearchStats};

/// Node count above which a search is expected to take impractically long.
pub const RECOMMENDED_MAX_NODES: usize = 16;

/// Options shared by the enumerator and the solver.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Fan the search out over the anchor's neighbours with rayon.
    pub parallel: bool,
    /// Reject graphs with more nodes than this before searching.
    pub max_nodes: Option<usize>,
    /// Checked once per recursive call.
    pub cancellation: Option<CancellationToken>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Returns every distinct Hamiltonian cycle of `graph`, one entry per undirected tour,
/// in discovery order.
pub fn find_hamiltonian_cycles<W>(graph: &WeightedGraph<W>) -> Result<Vec<Cycle>>
where
    W: Float + Debug + Send + Sync,
{
    BruteForceSolver::new(graph).find_cycles()
}

/// Solves the TSP on `graph` with the default configuration.
pub fn solve<W>(graph: &WeightedGraph<W>) -> Result<Solution<W>>
where
    W: Float + Debug + Send + Sync,
{
    BruteForceSolver::new(graph).solve()
}
