pub mod error;
pub mod graph;
pub mod tsp;

pub use error::{Result, TspError};
pub use graph::WeightedGraph;
pub use tsp::{BruteForceSolver, Solution, SolverConfig};
