//! Double greedy decision strategies.
//!
//! At each element the double greedy search compares the marginal gain of
//! adding it to the lower set `X` (`a = f(X ∪ {e}) - f(X)`) with the
//! marginal gain of removing it from the upper set `Y`
//! (`b = f(Y - {e}) - f(Y)`), and a strategy decides which set to update.

use std::fmt::Debug;

use rand::Rng;

/// Decides between adding to `X` and removing from `Y`.
pub trait DecisionStrategy: Send + Debug {
    /// Returns true to update `X` (add the element), false to update `Y`
    /// (remove the element).
    fn should_update_x<R: Rng>(&self, a: f64, b: f64, rng: &mut R) -> bool;

    /// Returns the strategy name for debugging.
    fn strategy_name(&self) -> &'static str;
}

/// Updates `X` iff `a >= b`. Never draws from the generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicDecision;

impl DeterministicDecision {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionStrategy for DeterministicDecision {
    fn should_update_x<R: Rng>(&self, a: f64, b: f64, _rng: &mut R) -> bool {
        a >= b
    }

    fn strategy_name(&self) -> &'static str {
        "Deterministic"
    }
}

/// Updates `X` with probability `a' / (a' + b')`, where `a' = max(a, 0)`
/// and `b' = max(b, 0)`; with probability 1 when both are zero.
///
/// Draws exactly one uniform number per decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomizedDecision;

impl RandomizedDecision {
    pub fn new() -> Self {
        Self
    }

    /// Probability of updating `X`.
    pub fn probability(a: f64, b: f64) -> f64 {
        let a_prime = a.max(0.0);
        let b_prime = b.max(0.0);
        if a_prime == 0.0 && b_prime == 0.0 {
            1.0
        } else {
            a_prime / (a_prime + b_prime)
        }
    }
}

impl DecisionStrategy for RandomizedDecision {
    fn should_update_x<R: Rng>(&self, a: f64, b: f64, rng: &mut R) -> bool {
        let p = Self::probability(a, b);
        let r = rng.random::<f64>();
        r <= p
    }

    fn strategy_name(&self) -> &'static str {
        "Randomized"
    }
}
