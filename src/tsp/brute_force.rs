//! Brute-force Traveling Salesman solver.
//!
//! Enumerates every Hamiltonian cycle, removes reversed duplicates, scores each tour
//! with [`WeightedGraph::cycle_distance`] and ranks them. Because every feasible tour
//! is evaluated, the reported minimum is globally optimal.
//!
//! # Example
//! ```
//! use brute_tsp::graph::WeightedGraph;
//! use brute_tsp::tsp::BruteForceSolver;
//!
//! // A small 4-node complete graph (0-1=10, 0-2=15, 0-3=20, etc.).
//! let graph = WeightedGraph::from_matrix(vec![
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ])
//! .unwrap();
//!
//! let solution = BruteForceSolver::new(&graph).solve().unwrap();
//! assert_eq!(solution.best_distance, Some(80.0));
//! assert_eq!(solution.total_cycles, 3);
//! let ranked: Vec<f64> = solution.all_solutions.iter().map(|s| s.distance).collect();
//! assert_eq!(ranked, vec![80.0, 95.0, 95.0]);
//! ```

use log::{debug, info};
use num_traits::Float;
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::Result;
use crate::graph::WeightedGraph;
use crate::tsp::{dedup_cycles, Cycle, CycleEnumerator, SearchStats, SolverConfig};

/// A tour paired with its total distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCycle<W> {
    pub cycle: Cycle,
    pub distance: W,
}

/// Outcome of a solve. An empty solution (no Hamiltonian cycle) is a valid result.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<W> {
    pub best_cycle: Option<Cycle>,
    pub best_distance: Option<W>,
    /// Distinct undirected tours found, after deduplication.
    pub total_cycles: usize,
    /// Every distinct tour, ascending by distance; ties keep discovery order.
    pub all_solutions: Vec<ScoredCycle<W>>,
    pub stats: SearchStats,
}

/// Aggregate figures over a non-empty ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionSummary<W> {
    pub best: W,
    pub worst: W,
    pub average: W,
    /// `(worst - best) / worst * 100`; `None` when `worst` is zero.
    pub improvement_percent: Option<W>,
}

impl<W> Solution<W>
where
    W: Float + Debug,
{
    fn empty(stats: SearchStats) -> Self {
        Solution {
            best_cycle: None,
            best_distance: None,
            total_cycles: 0,
            all_solutions: Vec::new(),
            stats,
        }
    }

    /// True when the graph has no Hamiltonian cycle.
    pub fn is_empty(&self) -> bool {
        self.best_cycle.is_none()
    }

    /// Best, worst and average distance over the ranking; `None` for an empty solution.
    pub fn summary(&self) -> Option<SolutionSummary<W>> {
        let best = self.all_solutions.first()?.distance;
        let worst = self.all_solutions.last()?.distance;
        let count = W::from(self.all_solutions.len())?;
        let total = self
            .all_solutions
            .iter()
            .fold(W::zero(), |acc, scored| acc + scored.distance);

        let improvement_percent = if worst == W::zero() {
            None
        } else {
            Some((worst - best) / worst * W::from(100.0)?)
        };

        Some(SolutionSummary {
            best,
            worst,
            average: total / count,
            improvement_percent,
        })
    }
}

/// Drives enumeration, deduplication and scoring for one graph.
pub struct BruteForceSolver<'a, W> {
    graph: &'a WeightedGraph<W>,
    config: SolverConfig,
}

impl<'a, W> BruteForceSolver<'a, W>
where
    W: Float + Debug + Send + Sync,
{
    pub fn new(graph: &'a WeightedGraph<W>) -> Self {
        Self::with_config(graph, SolverConfig::default())
    }

    pub fn with_config(graph: &'a WeightedGraph<W>, config: SolverConfig) -> Self {
        BruteForceSolver { graph, config }
    }

    /// Returns the distinct Hamiltonian cycles in discovery order, without scoring them.
    pub fn find_cycles(&self) -> Result<Vec<Cycle>> {
        self.unique_cycles().map(|(cycles, _)| cycles)
    }

    /// Scores every distinct cycle and returns the ranked result.
    ///
    /// # Errors
    /// Only configuration and cancellation errors from the enumerator; a graph
    /// without Hamiltonian cycles yields an empty [`Solution`].
    pub fn solve(&self) -> Result<Solution<W>> {
        let (cycles, stats) = self.unique_cycles()?;
        if cycles.is_empty() {
            info!("no Hamiltonian cycle exists; nothing to solve");
            return Ok(Solution::empty(stats));
        }

        let mut scored = Vec::with_capacity(cycles.len());
        for cycle in cycles {
            let distance = self.graph.cycle_distance(&cycle)?;
            scored.push(ScoredCycle { cycle, distance });
        }

        // Linear scan: only a strictly smaller distance replaces the current best.
        let mut best = &scored[0];
        for candidate in &scored[1..] {
            if candidate.distance < best.distance {
                best = candidate;
            }
        }
        let best_cycle = best.cycle.clone();
        let best_distance = best.distance;

        // sort_by is stable, so equal distances stay in discovery order.
        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });

        info!(
            "best tour {:?} with distance {:?} out of {} cycles",
            best_cycle.as_slice(),
            best_distance,
            scored.len()
        );

        Ok(Solution {
            best_cycle: Some(best_cycle),
            best_distance: Some(best_distance),
            total_cycles: scored.len(),
            all_solutions: scored,
            stats,
        })
    }

    fn unique_cycles(&self) -> Result<(Vec<Cycle>, SearchStats)> {
        let enumerator = CycleEnumerator::with_config(self.graph, self.config.clone());
        let (raw, stats) = enumerator.enumerate_with_stats()?;
        let raw_count = raw.len();
        let unique = dedup_cycles(raw);
        debug!(
            "deduplicated {} raw cycles to {} distinct tours",
            raw_count,
            unique.len()
        );
        Ok((unique, stats))
    }
}
