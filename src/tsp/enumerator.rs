//! A backtracking search for all Hamiltonian cycles in a weighted undirected graph.
//! Each cycle is a sequence of nodes v0..v_{n-1} with a finite-weight edge between
//! consecutive nodes, plus a finite-weight edge from v_{n-1} back to v0, visiting all
//! nodes exactly once. Every cycle starts at node 0.
//!
//! Results are raw: each undirected tour on three or more nodes is found twice, once
//! per direction. Use [`dedup_cycles`](crate::tsp::dedup_cycles) to collapse them.
//!
//! # Example
//! ```
//! use brute_tsp::graph::WeightedGraph;
//! use brute_tsp::tsp::CycleEnumerator;
//!
//! // A 4-node ring: edges (0-1, 1-2, 2-3, 3-0).
//! let graph = WeightedGraph::from_upper_triangle(
//!     4,
//!     &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)],
//! )
//! .unwrap();
//!
//! let cycles = CycleEnumerator::new(&graph).enumerate().unwrap();
//! let cycles: Vec<Vec<usize>> = cycles.into_iter().map(|c| c.into_vec()).collect();
//! assert_eq!(cycles, vec![vec![0, 1, 2, 3], vec![0, 3, 2, 1]]);
//! ```
//!
//! # Complexity
//! * Time: O((n-1)!) explored paths in the worst case; missing edges prune whole subtrees
//! * Space: O(n) per active search, plus the output

use log::{debug, trace, warn};
use num_traits::Float;
use rayon::prelude::*;
use std::fmt::Debug;
use std::ops::{AddAssign, Deref};

use crate::error::{Result, TspError};
use crate::graph::WeightedGraph;
use crate::tsp::{CancellationToken, SolverConfig, RECOMMENDED_MAX_NODES};

/// Every cycle starts here.
const ANCHOR: usize = 0;

/// A closed tour: each node appears exactly once and the last node links back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle(Vec<usize>);

impl Cycle {
    pub(crate) fn new(nodes: Vec<usize>) -> Self {
        Cycle(nodes)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Cycle {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for Cycle {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Cycle> for Vec<usize> {
    fn from(cycle: Cycle) -> Self {
        cycle.0
    }
}

/// Counters collected during one enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive calls, i.e. partial paths examined.
    pub visited_paths: u64,
    /// Unvisited nodes skipped because no edge leads to them from the path's end.
    pub pruned_extensions: u64,
    /// Cycles emitted before deduplication.
    pub raw_cycles: usize,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.visited_paths += other.visited_paths;
        self.pruned_extensions += other.pruned_extensions;
        self.raw_cycles += other.raw_cycles;
    }
}

/// Enumerates all Hamiltonian cycles anchored at node 0, in lexicographic order.
pub struct CycleEnumerator<'a, W> {
    graph: &'a WeightedGraph<W>,
    config: SolverConfig,
}

impl<'a, W> CycleEnumerator<'a, W>
where
    W: Float + Debug + Send + Sync,
{
    pub fn new(graph: &'a WeightedGraph<W>) -> Self {
        Self::with_config(graph, SolverConfig::default())
    }

    pub fn with_config(graph: &'a WeightedGraph<W>, config: SolverConfig) -> Self {
        CycleEnumerator { graph, config }
    }

    /// Returns the raw cycles in discovery order.
    ///
    /// # Errors
    /// * `InputTooLarge` if the graph exceeds `config.max_nodes`
    /// * `Cancelled` if the cancellation token fires during the search
    pub fn enumerate(&self) -> Result<Vec<Cycle>> {
        self.enumerate_with_stats().map(|(cycles, _)| cycles)
    }

    /// Like [`enumerate`](Self::enumerate), also returning search counters.
    pub fn enumerate_with_stats(&self) -> Result<(Vec<Cycle>, SearchStats)> {
        let n = self.graph.node_count();
        if let Some(limit) = self.config.max_nodes {
            if n > limit {
                return Err(TspError::InputTooLarge {
                    node_count: n,
                    limit,
                });
            }
        }
        if n > RECOMMENDED_MAX_NODES {
            warn!(
                "enumerating Hamiltonian cycles on {} nodes; expect a very long search",
                n
            );
        }
        debug!(
            "starting cycle enumeration on {} nodes (parallel: {})",
            n, self.config.parallel
        );

        let (cycles, stats) = if self.config.parallel && n > 1 {
            self.search_parallel()?
        } else {
            let cancel = self.config.cancellation.as_ref();
            let mut search = Search::new(self.graph, cancel, &[ANCHOR]);
            search.extend()?;
            (search.cycles, search.stats)
        };

        debug!(
            "enumeration finished: {} raw cycles, {} paths visited, {} extensions pruned",
            stats.raw_cycles, stats.visited_paths, stats.pruned_extensions
        );
        Ok((cycles, stats))
    }

    /// Runs one independent search per first-level child of the anchor. Branches are
    /// concatenated in ascending child order, which matches the sequential order.
    fn search_parallel(&self) -> Result<(Vec<Cycle>, SearchStats)> {
        let cancel = self.config.cancellation.as_ref();
        check_cancelled(cancel)?;

        let n = self.graph.node_count();
        let mut root = SearchStats {
            visited_paths: 1,
            ..SearchStats::default()
        };
        let mut children = Vec::new();
        for next in 1..n {
            if self.graph.weight(ANCHOR, next).is_finite() {
                children.push(next);
            } else {
                root.pruned_extensions += 1;
            }
        }

        let branches = children
            .par_iter()
            .map(|&child| -> Result<(Vec<Cycle>, SearchStats)> {
                let mut search = Search::new(self.graph, cancel, &[ANCHOR, child]);
                search.extend()?;
                Ok((search.cycles, search.stats))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut cycles = Vec::new();
        let mut stats = root;
        for (branch_cycles, branch_stats) in branches {
            cycles.extend(branch_cycles);
            stats += branch_stats;
        }
        Ok((cycles, stats))
    }
}

fn check_cancelled(cancel: Option<&CancellationToken>) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(TspError::Cancelled),
        _ => Ok(()),
    }
}

/// Path state owned by a single chain of recursive calls.
struct Search<'g, W> {
    graph: &'g WeightedGraph<W>,
    cancel: Option<&'g CancellationToken>,
    path: Vec<usize>,
    visited: Vec<bool>,
    cycles: Vec<Cycle>,
    stats: SearchStats,
}

impl<'g, W> Search<'g, W>
where
    W: Float + Debug,
{
    fn new(
        graph: &'g WeightedGraph<W>,
        cancel: Option<&'g CancellationToken>,
        prefix: &[usize],
    ) -> Self {
        let n = graph.node_count();
        let mut path = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        for &node in prefix {
            path.push(node);
            visited[node] = true;
        }
        Search {
            graph,
            cancel,
            path,
            visited,
            cycles: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    fn extend(&mut self) -> Result<()> {
        check_cancelled(self.cancel)?;
        self.stats.visited_paths += 1;

        let n = self.graph.node_count();
        let current = match self.path.last() {
            Some(&node) => node,
            None => return Ok(()),
        };

        // If the path contains all nodes, it closes only if there's an edge back to the anchor.
        if self.path.len() == n {
            if self.graph.weight(current, ANCHOR).is_finite() {
                trace!("found cycle {:?}", self.path);
                self.cycles.push(Cycle::new(self.path.clone()));
                self.stats.raw_cycles += 1;
            }
            return Ok(());
        }

        for next in 0..n {
            if self.visited[next] {
                continue;
            }
            if !self.graph.weight(current, next).is_finite() {
                self.stats.pruned_extensions += 1;
                continue;
            }

            self.visited[next] = true;
            self.path.push(next);

            let result = self.extend();

            // backtrack
            self.path.pop();
            self.visited[next] = false;

            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{seeded_random_graph, GeneratorConfig};

    const INF: f64 = f64::INFINITY;

    fn as_vecs(cycles: Vec<Cycle>) -> Vec<Vec<usize>> {
        cycles.into_iter().map(Cycle::into_vec).collect()
    }

    fn k4() -> WeightedGraph<f64> {
        WeightedGraph::from_matrix(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_k4_lexicographic_order() {
        let cycles = CycleEnumerator::new(&k4()).enumerate().unwrap();
        assert_eq!(
            as_vecs(cycles),
            vec![
                vec![0, 1, 2, 3],
                vec![0, 1, 3, 2],
                vec![0, 2, 1, 3],
                vec![0, 2, 3, 1],
                vec![0, 3, 1, 2],
                vec![0, 3, 2, 1],
            ]
        );
    }

    #[test]
    fn test_missing_edge_excludes_cycles() {
        let graph = WeightedGraph::from_matrix(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, INF],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, INF, 30.0, 0.0],
        ])
        .unwrap();
        let cycles = as_vecs(CycleEnumerator::new(&graph).enumerate().unwrap());
        assert_eq!(cycles, vec![vec![0, 1, 2, 3], vec![0, 3, 2, 1]]);
    }

    #[test]
    fn test_isolated_node_has_no_cycles() {
        let graph = WeightedGraph::from_upper_triangle(
            4,
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)],
        )
        .unwrap();
        assert!(CycleEnumerator::new(&graph).enumerate().unwrap().is_empty());
    }

    #[test]
    fn test_path_graph_has_no_cycles() {
        // A path 0-1-2 cannot return to the start.
        let graph = WeightedGraph::from_upper_triangle(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
        let (cycles, stats) = CycleEnumerator::new(&graph).enumerate_with_stats().unwrap();
        assert!(cycles.is_empty());
        assert_eq!(stats.raw_cycles, 0);
        assert_eq!(stats.visited_paths, 3);
    }

    #[test]
    fn test_single_and_two_nodes() {
        let one: WeightedGraph<f64> = WeightedGraph::new(1).unwrap();
        assert_eq!(as_vecs(CycleEnumerator::new(&one).enumerate().unwrap()), vec![vec![0]]);

        let two = WeightedGraph::from_upper_triangle(2, &[(0, 1, 3.0)]).unwrap();
        assert_eq!(as_vecs(CycleEnumerator::new(&two).enumerate().unwrap()), vec![vec![0, 1]]);

        let disconnected: WeightedGraph<f64> = WeightedGraph::new(2).unwrap();
        assert!(CycleEnumerator::new(&disconnected).enumerate().unwrap().is_empty());
    }

    #[test]
    fn test_complete_graph_counts() {
        // K_n has (n-1)! anchored directed cycles.
        for (n, expected) in [(3usize, 2usize), (5, 24), (6, 120)] {
            let mut entries = Vec::new();
            for u in 0..n {
                for v in (u + 1)..n {
                    entries.push((u, v, 1.0));
                }
            }
            let graph = WeightedGraph::from_upper_triangle(n, &entries).unwrap();
            let (cycles, stats) = CycleEnumerator::new(&graph).enumerate_with_stats().unwrap();
            assert_eq!(cycles.len(), expected, "K{n}");
            assert_eq!(stats.raw_cycles, expected);
            assert_eq!(stats.pruned_extensions, 0);
        }
    }

    #[test]
    fn test_cycles_are_hamiltonian_with_finite_edges() {
        for seed in 0..10 {
            let graph = seeded_random_graph(&GeneratorConfig::new(9), seed).unwrap();
            let cycles = CycleEnumerator::new(&graph).enumerate().unwrap();
            assert!(!cycles.is_empty(), "ring guarantees a cycle (seed {seed})");
            for cycle in &cycles {
                assert_eq!(cycle.len(), 9);
                assert_eq!(cycle[0], 0);
                let mut seen = vec![false; 9];
                for &node in cycle.iter() {
                    assert!(!seen[node]);
                    seen[node] = true;
                }
                assert!(graph.cycle_distance(cycle).unwrap().is_finite());
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for seed in 0..5 {
            let graph = seeded_random_graph(&GeneratorConfig::new(10), seed).unwrap();
            let (sequential, seq_stats) =
                CycleEnumerator::new(&graph).enumerate_with_stats().unwrap();
            let config = SolverConfig::new().with_parallel(true);
            let (parallel, par_stats) = CycleEnumerator::with_config(&graph, config)
                .enumerate_with_stats()
                .unwrap();
            assert_eq!(sequential, parallel, "seed {seed}");
            assert_eq!(seq_stats, par_stats, "seed {seed}");
        }
    }

    #[test]
    fn test_max_nodes_limit() {
        let config = SolverConfig::new().with_max_nodes(3);
        let result = CycleEnumerator::with_config(&k4(), config).enumerate();
        assert_eq!(
            result,
            Err(TspError::InputTooLarge {
                node_count: 4,
                limit: 3
            })
        );
    }

    #[test]
    fn test_cancelled_search() {
        let token = CancellationToken::new();
        token.cancel();
        for parallel in [false, true] {
            let config = SolverConfig::new()
                .with_parallel(parallel)
                .with_cancellation(token.clone());
            let result = CycleEnumerator::with_config(&k4(), config).enumerate();
            assert_eq!(result, Err(TspError::Cancelled));
        }
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = SearchStats {
            visited_paths: 2,
            pruned_extensions: 1,
            raw_cycles: 1,
        };
        total += SearchStats {
            visited_paths: 3,
            pruned_extensions: 0,
            raw_cycles: 2,
        };
        assert_eq!(total.visited_paths, 5);
        assert_eq!(total.pruned_extensions, 1);
        assert_eq!(total.raw_cycles, 3);
    }
}
