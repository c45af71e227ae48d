pub mod generate;
pub mod weighted;

pub use generate::{random_graph, seeded_random_graph, GeneratorConfig};
pub use weighted::{Edge, WeightedGraph};
