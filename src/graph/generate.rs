//! Seeded random graph generation.
//!
//! Graphs are built as a ring `0 - 1 - ... - (n-1) - 0` with random integer weights,
//! so every generated graph with three or more nodes has at least one Hamiltonian
//! cycle. Each node then receives up to `max_chords_per_node` extra chords to
//! higher-indexed, non-adjacent nodes.
//!
//! # Example
//! ```
//! use brute_tsp::graph::{seeded_random_graph, GeneratorConfig};
//!
//! let config = GeneratorConfig::new(8);
//! let a = seeded_random_graph(&config, 42).unwrap();
//! let b = seeded_random_graph(&config, 42).unwrap();
//! assert_eq!(a, b);
//! assert!(a.edge_count() >= 8);
//! ```

use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{Result, TspError};
use crate::graph::WeightedGraph;

/// Parameters for [`random_graph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub node_count: usize,
    /// Inclusive lower bound for edge weights.
    pub min_weight: u32,
    /// Inclusive upper bound for edge weights.
    pub max_weight: u32,
    pub max_chords_per_node: usize,
    /// Probability that each candidate chord is accepted.
    pub chord_probability: f64,
}

impl GeneratorConfig {
    pub fn new(node_count: usize) -> Self {
        GeneratorConfig {
            node_count,
            ..Default::default()
        }
    }

    pub fn with_weights(mut self, min_weight: u32, max_weight: u32) -> Self {
        self.min_weight = min_weight;
        self.max_weight = max_weight;
        self
    }

    pub fn with_chords(mut self, max_chords_per_node: usize, chord_probability: f64) -> Self {
        self.max_chords_per_node = max_chords_per_node;
        self.chord_probability = chord_probability;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(TspError::invalid_input("Graph must have at least one node"));
        }
        if self.min_weight > self.max_weight {
            return Err(TspError::invalid_input(format!(
                "min_weight {} exceeds max_weight {}",
                self.min_weight, self.max_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.chord_probability) {
            return Err(TspError::invalid_input(
                "chord_probability must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            node_count: 8,
            min_weight: 10,
            max_weight: 100,
            max_chords_per_node: 3,
            chord_probability: 0.4,
        }
    }
}

/// Generates a random graph using the supplied random source.
pub fn random_graph<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<WeightedGraph<f64>> {
    config.validate()?;
    let n = config.node_count;
    let mut entries: Vec<(usize, usize, f64)> = Vec::new();
    let mut present = vec![vec![false; n]; n];

    // Ring edges. For n == 2 both directions land on the same pair; the later one wins.
    if n > 1 {
        for i in 0..n {
            let next = (i + 1) % n;
            let weight = rng.gen_range(config.min_weight..=config.max_weight);
            entries.push((i, next, f64::from(weight)));
            present[i][next] = true;
            present[next][i] = true;
        }
    }

    for i in 0..n {
        let mut candidates: Vec<usize> = ((i + 2)..n)
            .filter(|&j| !(i == 0 && j == n - 1))
            .filter(|&j| !present[i][j])
            .collect();
        candidates.shuffle(&mut *rng);

        let mut added = 0;
        for j in candidates {
            if added >= config.max_chords_per_node {
                break;
            }
            if rng.gen_bool(config.chord_probability) {
                let weight = rng.gen_range(config.min_weight..=config.max_weight);
                entries.push((i, j, f64::from(weight)));
                present[i][j] = true;
                present[j][i] = true;
                added += 1;
            }
        }
    }

    let graph = WeightedGraph::from_upper_triangle(n, &entries)?;
    debug!(
        "generated random graph with {} nodes and {} edges",
        n,
        graph.edge_count()
    );
    Ok(graph)
}

/// Generates a reproducible random graph: the same `seed` always yields the same graph.
pub fn seeded_random_graph(config: &GeneratorConfig, seed: u64) -> Result<WeightedGraph<f64>> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    random_graph(config, &mut rng)
}
