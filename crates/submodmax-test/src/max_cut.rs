//! Weighted max-cut objectives over the vertices `0..n` of a graph.
//!
//! A cut splits the vertices into a "from" set `S` and its complement. Its
//! value is the total weight of the edges leaving `S`:
//! `cut(S) = Σ_{i ∈ S, j ∉ S} w[i][j]`. Max-cut is NP-hard; the cut function
//! is submodular and non-negative for non-negative weights.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use submodmax_core::ObjectiveFunction;
//! use submodmax_test::max_cut::MaxCut;
//!
//! let graph = vec![
//!     vec![1.0, 1.0, 0.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![0.0, 1.0, 1.0],
//! ];
//! let f = MaxCut::new(graph, 0.0).unwrap();
//! assert_eq!(f.evaluate(&HashSet::from([1])).unwrap(), 2.0);
//! ```

use std::collections::HashSet;

use submodmax_core::{
    FuncInfo, GroundSet, IncrementalObjective, ObjectiveFunction, Result, SetDeltaInfo,
    SubmodError,
};

/// Plain max-cut objective.
#[derive(Debug, Clone)]
pub struct MaxCut {
    graph: Vec<Vec<f64>>,
    empty_value: f64,
}

impl MaxCut {
    /// Creates the objective from a square adjacency matrix.
    ///
    /// `empty_value` is returned for the empty vertex set.
    ///
    /// # Errors
    ///
    /// Returns [`SubmodError::Misconfiguration`] if the matrix is not square.
    pub fn new(graph: Vec<Vec<f64>>, empty_value: f64) -> Result<Self> {
        let n = graph.len();
        if let Some(row) = graph.iter().position(|row| row.len() != n) {
            return Err(SubmodError::Misconfiguration(format!(
                "adjacency matrix is not square: row {row} has {} entries, expected {n}",
                graph[row].len()
            )));
        }
        Ok(Self { graph, empty_value })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.len()
    }

    /// Ground set `0..n`.
    pub fn ground_set(&self) -> GroundSet<usize> {
        GroundSet::new(0..self.graph.len())
    }

    /// Adjacency matrix.
    pub fn graph(&self) -> &[Vec<f64>] {
        &self.graph
    }

    /// Value returned for the empty vertex set.
    pub fn empty_value(&self) -> f64 {
        self.empty_value
    }

    /// Computes `cut(set)` by scanning every edge.
    pub fn cut_value(&self, set: &HashSet<usize>) -> Result<f64> {
        self.check_vertices(set.iter())?;
        let n = self.graph.len();
        let mut cut = 0.0;
        for &i in set {
            for j in (0..n).filter(|j| !set.contains(j)) {
                cut += self.graph[i][j];
            }
        }
        Ok(cut)
    }

    fn check_vertices<'a>(&self, mut vertices: impl Iterator<Item = &'a usize>) -> Result<()> {
        match vertices.find(|v| **v >= self.graph.len()) {
            Some(v) => Err(SubmodError::Evaluation(format!(
                "vertex {v} is outside the graph of {} vertices",
                self.graph.len()
            ))),
            None => Ok(()),
        }
    }
}

impl ObjectiveFunction<usize> for MaxCut {
    fn evaluate(&self, set: &HashSet<usize>) -> Result<f64> {
        if set.is_empty() {
            return Ok(self.empty_value);
        }
        self.cut_value(set)
    }
}

/// Cut weight plus the objective value derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxCutInfo {
    /// Raw cut weight of the set (0 for the empty set).
    pub cut: f64,
    /// Objective value: the cut, or the configured empty value.
    pub value: f64,
}

impl FuncInfo for MaxCutInfo {
    fn func_value(&self) -> f64 {
        self.value
    }
}

/// Incremental max-cut objective.
///
/// With a previous [`MaxCutInfo`] the new cut is updated vertex by vertex:
/// removals first, then additions, each in `O(n)`.
#[derive(Debug, Clone)]
pub struct IncrementalMaxCut {
    inner: MaxCut,
}

impl IncrementalMaxCut {
    /// Creates the objective from a square adjacency matrix.
    pub fn new(graph: Vec<Vec<f64>>, empty_value: f64) -> Result<Self> {
        MaxCut::new(graph, empty_value).map(|inner| Self { inner })
    }

    /// Ground set `0..n`.
    pub fn ground_set(&self) -> GroundSet<usize> {
        self.inner.ground_set()
    }

    /// The plain objective computing the same values.
    pub fn plain(&self) -> &MaxCut {
        &self.inner
    }

    fn info(&self, cut: f64, set_size: usize) -> MaxCutInfo {
        let value = if set_size == 0 {
            self.inner.empty_value
        } else {
            cut
        };
        MaxCutInfo { cut, value }
    }
}

impl IncrementalObjective<usize> for IncrementalMaxCut {
    type Info = MaxCutInfo;

    fn evaluate(
        &self,
        current: &SetDeltaInfo<usize>,
        previous: Option<&MaxCutInfo>,
    ) -> Result<MaxCutInfo> {
        let Some(previous) = previous else {
            let cut = self.inner.cut_value(current.current_set())?;
            return Ok(self.info(cut, current.current_set_size()));
        };

        let graph = &self.inner.graph;
        let n = graph.len();
        self.inner.check_vertices(
            current
                .added()
                .iter()
                .chain(current.removed())
                .chain(current.intersection()),
        )?;

        // membership of the previous set: intersection ∪ removed
        let mut member = vec![false; n];
        for &v in current.intersection().iter().chain(current.removed()) {
            member[v] = true;
        }

        let mut cut = previous.cut;
        for &v in current.removed() {
            member[v] = false;
            for u in 0..n {
                if u == v {
                    continue;
                }
                if member[u] {
                    cut += graph[u][v];
                } else {
                    cut -= graph[v][u];
                }
            }
        }
        for &v in current.added() {
            for u in 0..n {
                if u == v {
                    continue;
                }
                if member[u] {
                    cut -= graph[u][v];
                } else {
                    cut += graph[v][u];
                }
            }
            member[v] = true;
        }

        Ok(self.info(cut, current.current_set_size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{random_graph, triangle_graph};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_triangle_cuts() {
        let f = MaxCut::new(triangle_graph(), 0.0).unwrap();
        assert_eq!(f.evaluate(&HashSet::new()).unwrap(), 0.0);
        assert_eq!(f.evaluate(&HashSet::from([0])).unwrap(), 1.0);
        assert_eq!(f.evaluate(&HashSet::from([1])).unwrap(), 2.0);
        assert_eq!(f.evaluate(&HashSet::from([0, 2])).unwrap(), 2.0);
        assert_eq!(f.evaluate(&HashSet::from([0, 1, 2])).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_value() {
        let f = MaxCut::new(triangle_graph(), -3.0).unwrap();
        assert_eq!(f.evaluate(&HashSet::new()).unwrap(), -3.0);
    }

    #[test]
    fn test_rejects_non_square() {
        let result = MaxCut::new(vec![vec![0.0, 1.0], vec![1.0]], 0.0);
        assert!(matches!(result, Err(SubmodError::Misconfiguration(_))));
    }

    #[test]
    fn test_rejects_unknown_vertex() {
        let f = MaxCut::new(triangle_graph(), 0.0).unwrap();
        assert!(matches!(
            f.evaluate(&HashSet::from([7])),
            Err(SubmodError::Evaluation(_))
        ));
    }

    #[test]
    fn test_incremental_tracks_plain() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let n = rng.random_range(2..9);
            let graph = random_graph(n, 5, seed);
            let plain = MaxCut::new(graph.clone(), 0.0).unwrap();
            let incremental = IncrementalMaxCut::new(graph, 0.0).unwrap();

            let mut info = SetDeltaInfo::empty(n);
            let mut value = incremental.evaluate(&info, None).unwrap();
            for _ in 0..30 {
                let v = rng.random_range(0..n);
                info = if info.current_set().contains(&v) {
                    info.with_removed(v)
                } else {
                    info.with_added(v)
                };
                value = incremental.evaluate(&info, Some(&value)).unwrap();
                let expected = plain.evaluate(info.current_set()).unwrap();
                assert_eq!(value.func_value(), expected, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_incremental_sample_delta() {
        let graph = random_graph(6, 4, 3);
        let plain = MaxCut::new(graph.clone(), 0.0).unwrap();
        let incremental = IncrementalMaxCut::new(graph, 0.0).unwrap();

        let base = HashSet::from([0, 2, 3]);
        let start = SetDeltaInfo::from_scratch(6, base.clone());
        let previous = incremental.evaluate(&start, None).unwrap();
        let next =
            SetDeltaInfo::from_sample(6, &base, HashSet::from([1, 5]), HashSet::from([0, 3]));
        let info = incremental.evaluate(&next, Some(&previous)).unwrap();
        assert_eq!(info.cut, plain.cut_value(&HashSet::from([1, 2, 5])).unwrap());
    }
}
