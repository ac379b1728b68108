//! Random biased set sampling.
//!
//! `R_A(δ)` is a random subset of the ground set `X` around a reference set
//! `A ⊆ X`: every element of `A` is kept with probability `(1 + δ) / 2` and
//! every element of `X - A` is included with probability `(1 - δ) / 2`, all
//! independently. `δ = 1` returns `A`, `δ = -1` returns `X - A`, and `δ = 0`
//! is a uniformly random subset.

use std::collections::HashSet;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use submodmax_core::{GroundSet, Result, SubmodError};

/// A biased sample together with its delta against the reference set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasedSample<E: Eq + Hash> {
    /// The sampled set.
    pub set: HashSet<E>,
    /// Elements in the sample but not in the reference set.
    pub added: HashSet<E>,
    /// Elements in the reference set but not in the sample.
    pub removed: HashSet<E>,
}

/// Draws `R_A(δ)` samples.
///
/// Elements are visited in ground-set order and each consumes exactly one
/// uniform draw `r ∈ [0, 1)`; an element is included iff `r < p`.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_core::GroundSet;
/// use submodmax_solver::BiasedSampler;
///
/// let ground = GroundSet::new(0..6);
/// let reference = HashSet::from([1, 3]);
/// let mut sampler = BiasedSampler::with_seed(42);
///
/// assert_eq!(sampler.sample(&reference, &ground, 1.0).unwrap(), reference);
/// assert_eq!(
///     sampler.sample(&reference, &ground, -1.0).unwrap(),
///     HashSet::from([0, 2, 4, 5]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BiasedSampler<R = StdRng> {
    rng: R,
}

impl BiasedSampler<StdRng> {
    /// Creates a sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible sampler.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for BiasedSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BiasedSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Draws `R_A(δ)` for reference set `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmodError::Misconfiguration`] if `delta` is outside `[-1, 1]`.
    pub fn sample<E>(
        &mut self,
        reference: &HashSet<E>,
        ground: &GroundSet<E>,
        delta: f64,
    ) -> Result<HashSet<E>>
    where
        E: Clone + Eq + Hash,
    {
        let (p_in, p_out) = inclusion_probabilities(delta)?;
        let mut set = HashSet::new();
        for elem in ground.iter() {
            let p = if reference.contains(elem) { p_in } else { p_out };
            if self.rng.random::<f64>() < p {
                set.insert(elem.clone());
            }
        }
        Ok(set)
    }

    /// Draws `R_A(δ)` and reports which elements were added to or removed
    /// from the reference set.
    ///
    /// Consumes the same random draws as [`sample`](Self::sample), so both
    /// return the same set for the same generator state. Always
    /// `set = (reference - removed) ∪ added`.
    pub fn sample_extended<E>(
        &mut self,
        reference: &HashSet<E>,
        ground: &GroundSet<E>,
        delta: f64,
    ) -> Result<BiasedSample<E>>
    where
        E: Clone + Eq + Hash,
    {
        let (p_in, p_out) = inclusion_probabilities(delta)?;
        let mut sample = BiasedSample {
            set: HashSet::new(),
            added: HashSet::new(),
            removed: HashSet::new(),
        };
        for elem in ground.iter() {
            let in_reference = reference.contains(elem);
            let p = if in_reference { p_in } else { p_out };
            let included = self.rng.random::<f64>() < p;
            match (included, in_reference) {
                (true, true) => {
                    sample.set.insert(elem.clone());
                }
                (true, false) => {
                    sample.set.insert(elem.clone());
                    sample.added.insert(elem.clone());
                }
                (false, true) => {
                    sample.removed.insert(elem.clone());
                }
                (false, false) => {}
            }
        }
        Ok(sample)
    }
}

fn inclusion_probabilities(delta: f64) -> Result<(f64, f64)> {
    if !(-1.0..=1.0).contains(&delta) {
        return Err(SubmodError::Misconfiguration(format!(
            "sampling bias must lie in [-1, 1], got {delta}"
        )));
    }
    Ok(((1.0 + delta) / 2.0, (1.0 - delta) / 2.0))
}
