use thiserror::Error;

/// Errors raised while building a graph or running a search.
///
/// A graph with no Hamiltonian cycle is not an error; see
/// [`Solution::is_empty`](crate::tsp::Solution::is_empty).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Vertex {vertex} is out of range for a graph with {node_count} nodes")]
    InvalidVertex { vertex: usize, node_count: usize },

    #[error("Matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Weight matrix is not symmetric at ({u}, {v})")]
    AsymmetricWeight { u: usize, v: usize },

    #[error("Diagonal entry for node {node} must be zero")]
    NonZeroDiagonal { node: usize },

    #[error("Invalid weight at ({u}, {v}): {reason}")]
    InvalidWeight {
        u: usize,
        v: usize,
        reason: &'static str,
    },

    #[error("Input too large: {node_count} nodes exceeds the limit of {limit}")]
    InputTooLarge { node_count: usize, limit: usize },

    #[error("Search was cancelled")]
    Cancelled,
}

impl TspError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        TspError::InvalidInput(msg.into())
    }

    pub fn invalid_vertex(vertex: usize, node_count: usize) -> Self {
        TspError::InvalidVertex { vertex, node_count }
    }

    /// True for a malformed weight matrix or an out-of-range node index.
    ///
    /// `InvalidInput` is not included: it also reports bad generator settings and
    /// empty inputs. `InputTooLarge` and `Cancelled` come from solver settings.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TspError::NonSquareMatrix { .. }
                | TspError::AsymmetricWeight { .. }
                | TspError::NonZeroDiagonal { .. }
                | TspError::InvalidWeight { .. }
                | TspError::InvalidVertex { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TspError::invalid_input("empty matrix").to_string(),
            "Invalid input: empty matrix"
        );
        assert_eq!(
            TspError::invalid_vertex(7, 4).to_string(),
            "Vertex 7 is out of range for a graph with 4 nodes"
        );
        assert_eq!(
            TspError::InputTooLarge {
                node_count: 20,
                limit: 16
            }
            .to_string(),
            "Input too large: 20 nodes exceeds the limit of 16"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(TspError::NonZeroDiagonal { node: 1 }.is_configuration_error());
        assert!(TspError::AsymmetricWeight { u: 0, v: 2 }.is_configuration_error());
        assert!(TspError::invalid_vertex(9, 4).is_configuration_error());
        assert!(!TspError::Cancelled.is_configuration_error());
        assert!(!TspError::InputTooLarge {
            node_count: 20,
            limit: 16
        }
        .is_configuration_error());
        assert!(!TspError::invalid_input("min_weight exceeds max_weight").is_configuration_error());
    }
}
