//! Graph generators and exhaustive search for small instances.

use std::collections::HashSet;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use submodmax_core::{GroundSet, ObjectiveFunction, Result, SubmodError};

/// Largest ground set [`brute_force_max`] accepts.
pub const BRUTE_FORCE_MAX_ELEMENTS: usize = 63;

/// Three-vertex path with self-loops on the ends.
///
/// Both `{1}` and `{0, 2}` reach the maximum cut of 2.
pub fn triangle_graph() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 1.0, 0.0],
        vec![1.0, 0.0, 1.0],
        vec![0.0, 1.0, 1.0],
    ]
}

/// Random symmetric graph on `n` vertices with integer weights in `0..=max_weight`.
///
/// Integer weights keep every cut exactly representable, so incremental and
/// from-scratch evaluations agree bit for bit.
pub fn random_graph(n: usize, max_weight: u32, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let w = f64::from(rng.random_range(0..=max_weight));
            graph[i][j] = w;
            graph[j][i] = w;
        }
    }
    graph
}

/// Enumerates every subset of `ground` and returns the best one.
///
/// Ties keep the first subset in bitmask order. NaN values are skipped.
/// Only meant for ground sets of about 20 elements or fewer.
///
/// # Errors
///
/// Returns [`SubmodError::Misconfiguration`] for ground sets larger than
/// [`BRUTE_FORCE_MAX_ELEMENTS`], and any error of the objective.
pub fn brute_force_max<E, F>(objective: &F, ground: &GroundSet<E>) -> Result<(HashSet<E>, f64)>
where
    E: Clone + Eq + Hash,
    F: ObjectiveFunction<E>,
{
    let elements = ground.elements();
    if elements.len() > BRUTE_FORCE_MAX_ELEMENTS {
        return Err(SubmodError::Misconfiguration(format!(
            "brute force enumerates at most {BRUTE_FORCE_MAX_ELEMENTS} elements, got {}",
            elements.len()
        )));
    }
    let mut best_set = HashSet::new();
    let mut best_value = f64::NEG_INFINITY;
    for mask in 0u64..(1u64 << elements.len()) {
        let set: HashSet<E> = elements
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, e)| e.clone())
            .collect();
        let value = objective.evaluate(&set)?;
        if value > best_value {
            best_value = value;
            best_set = set;
        }
    }
    Ok((best_set, best_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::max_cut::MaxCut;

    #[test]
    fn test_random_graph_is_symmetric() {
        let graph = random_graph(7, 9, 11);
        for (i, row) in graph.iter().enumerate() {
            for (j, w) in row.iter().enumerate() {
                assert_eq!(*w, graph[j][i]);
                assert!((0.0..=9.0).contains(w));
            }
        }
    }

    #[test]
    fn test_random_graph_is_seeded() {
        assert_eq!(random_graph(5, 3, 1), random_graph(5, 3, 1));
    }

    #[test]
    fn test_brute_force_triangle() {
        let f = MaxCut::new(triangle_graph(), 0.0).unwrap();
        let (set, value) = brute_force_max(&f, &f.ground_set()).unwrap();
        assert_eq!(value, 2.0);
        assert_eq!(set, HashSet::from([1]));
    }

    #[test]
    fn test_brute_force_rejects_large_ground_sets() {
        let f = MaxCut::new(vec![vec![0.0; 64]; 64], 0.0).unwrap();
        let result = brute_force_max(&f, &f.ground_set());
        assert!(matches!(result, Err(SubmodError::Misconfiguration(_))));
    }
}
