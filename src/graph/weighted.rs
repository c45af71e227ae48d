use num_traits::Float;
use std::fmt::Debug;

use crate::error::{Result, TspError};

/// An undirected edge materialized from the weight matrix, with `from < to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub from: usize,
    pub to: usize,
    pub weight: W,
}

/// Undirected weighted graph backed by a dense adjacency matrix.
///
/// `W::infinity()` marks a missing edge. The matrix is square, symmetric and has a
/// zero diagonal; these invariants are checked on construction and the graph is
/// read-only afterwards.
///
/// # Example
/// ```
/// use brute_tsp::graph::WeightedGraph;
///
/// let inf = f64::INFINITY;
/// let graph = WeightedGraph::from_matrix(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, inf],
///     vec![15.0, inf, 0.0],
/// ])
/// .unwrap();
///
/// assert_eq!(graph.edge_weight(0, 1).unwrap(), 10.0);
/// assert!(!graph.has_edge(1, 2));
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph<W> {
    n: usize,
    matrix: Vec<Vec<W>>,
}

impl<W> WeightedGraph<W>
where
    W: Float + Debug,
{
    /// Creates a graph with `n` nodes and no edges.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(TspError::invalid_input("Graph must have at least one node"));
        }
        let mut matrix = vec![vec![W::infinity(); n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = W::zero();
        }
        Ok(WeightedGraph { n, matrix })
    }

    /// Builds a graph from a full weight matrix.
    ///
    /// # Errors
    /// * `InvalidInput` if the matrix is empty
    /// * `NonSquareMatrix` if any row length differs from the row count
    /// * `NonZeroDiagonal` if `matrix[i][i] != 0`
    /// * `InvalidWeight` if an entry is NaN or negative infinity
    /// * `AsymmetricWeight` if `matrix[u][v] != matrix[v][u]`
    pub fn from_matrix(matrix: Vec<Vec<W>>) -> Result<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(TspError::invalid_input("Weight matrix cannot be empty"));
        }

        for (row, entries) in matrix.iter().enumerate() {
            if entries.len() != n {
                return Err(TspError::NonSquareMatrix {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
        }

        #[allow(clippy::needless_range_loop)]
        for u in 0..n {
            if matrix[u][u] != W::zero() {
                return Err(TspError::NonZeroDiagonal { node: u });
            }
            for v in 0..n {
                check_weight(u, v, matrix[u][v])?;
            }
            for v in (u + 1)..n {
                if matrix[u][v] != matrix[v][u] {
                    return Err(TspError::AsymmetricWeight { u, v });
                }
            }
        }

        Ok(WeightedGraph { n, matrix })
    }

    /// Builds a graph from a list of undirected edges; unlisted pairs have no edge.
    /// A later entry for the same pair overwrites an earlier one.
    ///
    /// # Example
    /// ```
    /// use brute_tsp::graph::WeightedGraph;
    ///
    /// let graph = WeightedGraph::from_upper_triangle(3, &[(0, 1, 4.0), (1, 2, 5.0)]).unwrap();
    /// assert_eq!(graph.edge_weight(2, 1).unwrap(), 5.0);
    /// assert!(!graph.has_edge(0, 2));
    /// ```
    pub fn from_upper_triangle(n: usize, entries: &[(usize, usize, W)]) -> Result<Self> {
        let mut graph = Self::new(n)?;
        for &(u, v, weight) in entries {
            graph.check_vertex(u)?;
            graph.check_vertex(v)?;
            if u == v {
                return Err(TspError::invalid_input(format!(
                    "Self-loop on node {u} is not allowed"
                )));
            }
            check_weight(u, v, weight)?;
            graph.matrix[u][v] = weight;
            graph.matrix[v][u] = weight;
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Read-only view of the weight matrix.
    pub fn matrix(&self) -> &[Vec<W>] {
        &self.matrix
    }

    /// Weight of the edge between `u` and `v`, or `W::infinity()` if there is none.
    ///
    /// # Errors
    /// * `InvalidVertex` if either index is outside `0..node_count()`
    pub fn edge_weight(&self, u: usize, v: usize) -> Result<W> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.matrix[u][v])
    }

    /// Returns true if `u` and `v` are in range and joined by a finite-weight edge.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.n && v < self.n && u != v && self.matrix[u][v].is_finite()
    }

    /// Neighbours of `u` in ascending index order.
    pub fn neighbors(&self, u: usize) -> Result<Vec<usize>> {
        self.check_vertex(u)?;
        Ok((0..self.n).filter(|&v| self.has_edge(u, v)).collect())
    }

    /// All edges with `from < to`, in row-major order. Derived from the matrix on each call.
    pub fn edges(&self) -> Vec<Edge<W>> {
        let mut edges = Vec::new();
        for from in 0..self.n {
            for to in (from + 1)..self.n {
                if self.has_edge(from, to) {
                    edges.push(Edge {
                        from,
                        to,
                        weight: self.matrix[from][to],
                    });
                }
            }
        }
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Total weight of the closed tour `cycle`, including the edge from the last
    /// node back to the first.
    ///
    /// Returns `W::infinity()` as soon as a missing edge is found; no partial sum
    /// is reported.
    ///
    /// # Example
    /// ```
    /// use brute_tsp::graph::WeightedGraph;
    ///
    /// let graph = WeightedGraph::from_matrix(vec![
    ///     vec![0.0, 10.0, 15.0, 20.0],
    ///     vec![10.0, 0.0, 35.0, 25.0],
    ///     vec![15.0, 35.0, 0.0, 30.0],
    ///     vec![20.0, 25.0, 30.0, 0.0],
    /// ])
    /// .unwrap();
    /// assert_eq!(graph.cycle_distance(&[0, 1, 3, 2]).unwrap(), 80.0);
    /// ```
    ///
    /// # Errors
    /// * `InvalidInput` if `cycle` is empty
    /// * `InvalidVertex` if any node is out of range
    pub fn cycle_distance(&self, cycle: &[usize]) -> Result<W> {
        let (&first, &last) = match (cycle.first(), cycle.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TspError::invalid_input("Cycle cannot be empty")),
        };
        for &node in cycle {
            self.check_vertex(node)?;
        }

        let mut distance = W::zero();
        for pair in cycle.windows(2) {
            let weight = self.weight(pair[0], pair[1]);
            if weight.is_infinite() {
                return Ok(W::infinity());
            }
            distance = distance + weight;
        }

        let closing = self.weight(last, first);
        if closing.is_infinite() {
            return Ok(W::infinity());
        }
        Ok(distance + closing)
    }

    /// Unchecked lookup for the search loops; callers guarantee both indices are in range.
    pub(crate) fn weight(&self, u: usize, v: usize) -> W {
        self.matrix[u][v]
    }

    fn check_vertex(&self, v: usize) -> Result<()> {
        if v >= self.n {
            return Err(TspError::invalid_vertex(v, self.n));
        }
        Ok(())
    }
}

fn check_weight<W: Float>(u: usize, v: usize, weight: W) -> Result<()> {
    if weight.is_nan() {
        return Err(TspError::InvalidWeight {
            u,
            v,
            reason: "weight is NaN",
        });
    }
    if weight.is_infinite() && weight.is_sign_negative() {
        return Err(TspError::InvalidWeight {
            u,
            v,
            reason: "weight is negative infinity",
        });
    }
    Ok(())
}
