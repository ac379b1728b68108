//! Set-delta records for incremental evaluation.
//!
//! A [`SetDeltaInfo`] describes a candidate set as a transition from the
//! previously evaluated set: which elements were added, which were removed,
//! and which were left untouched (the intersection). An incremental objective
//! can update the previous value from the delta instead of re-scanning the
//! whole set.
//!
//! Snapshots are shared through `Arc`, so an "add one element" transition
//! reuses the previous set as its intersection without copying it.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

use crate::error::{Result, SubmodError};

/// Transition from a previously evaluated candidate set to a new one.
///
/// Invariants:
/// - `current_set = intersection ∪ added`
/// - `current_set_size = |intersection| + |added|`
/// - `added` and `intersection` are disjoint, `removed` and `intersection` are disjoint
///
/// The current set is materialized lazily, at most once.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_core::SetDeltaInfo;
///
/// let start = SetDeltaInfo::from_scratch(4, HashSet::from([1, 2]));
/// let next = start.with_added(3);
///
/// assert_eq!(next.added(), &HashSet::from([3]));
/// assert_eq!(next.intersection(), &HashSet::from([1, 2]));
/// assert_eq!(next.current_set_size(), 3);
/// assert_eq!(next.current_set(), &HashSet::from([1, 2, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct SetDeltaInfo<E: Eq + Hash> {
    ground_set_size: usize,
    current_set_size: usize,
    added: HashSet<E>,
    removed: HashSet<E>,
    intersection: Arc<HashSet<E>>,
    current_set: OnceLock<Arc<HashSet<E>>>,
}

impl<E> SetDeltaInfo<E>
where
    E: Clone + Eq + Hash,
{
    /// Creates a delta record. The current set stays unmaterialized.
    pub fn new(
        ground_set_size: usize,
        added: HashSet<E>,
        removed: HashSet<E>,
        intersection: Arc<HashSet<E>>,
    ) -> Self {
        Self {
            ground_set_size,
            current_set_size: intersection.len() + added.len(),
            added,
            removed,
            intersection,
            current_set: OnceLock::new(),
        }
    }

    /// Describes `set` with no previous set: everything is "added".
    pub fn from_scratch(ground_set_size: usize, set: HashSet<E>) -> Self {
        let current = Arc::new(set.clone());
        let info = Self::new(ground_set_size, set, HashSet::new(), Arc::new(HashSet::new()));
        let _ = info.current_set.set(current);
        info
    }

    /// Describes the empty set with no previous set.
    pub fn empty(ground_set_size: usize) -> Self {
        Self::from_scratch(ground_set_size, HashSet::new())
    }

    /// Transition that adds `elem` to this record's current set.
    ///
    /// The intersection shares this record's current set.
    pub fn with_added(&self, elem: E) -> Self {
        let base = self.current_set_arc();
        debug_assert!(!base.contains(&elem), "added element already present");
        Self::new(
            self.ground_set_size,
            HashSet::from([elem]),
            HashSet::new(),
            base,
        )
    }

    /// Transition that removes `elem` from this record's current set.
    pub fn with_removed(&self, elem: E) -> Self {
        let base = self.current_set_arc();
        debug_assert!(base.contains(&elem), "removed element not present");
        let mut remaining = (*base).clone();
        remaining.remove(&elem);
        let remaining = Arc::new(remaining);
        let info = Self::new(
            self.ground_set_size,
            HashSet::new(),
            HashSet::from([elem]),
            Arc::clone(&remaining),
        );
        let _ = info.current_set.set(remaining);
        info
    }

    /// Transition from `base` that drops `removed` and adds `added`.
    ///
    /// Used for sampled sets, where many elements change at once.
    pub fn from_sample(
        ground_set_size: usize,
        base: &HashSet<E>,
        added: HashSet<E>,
        removed: HashSet<E>,
    ) -> Self {
        let intersection: HashSet<E> = base
            .iter()
            .filter(|elem| !removed.contains(*elem))
            .cloned()
            .collect();
        Self::new(ground_set_size, added, removed, Arc::new(intersection))
    }

    /// Size of the ground set.
    pub fn ground_set_size(&self) -> usize {
        self.ground_set_size
    }

    /// Size of the new current set.
    pub fn current_set_size(&self) -> usize {
        self.current_set_size
    }

    /// Elements in the new set but not in the previous one.
    pub fn added(&self) -> &HashSet<E> {
        &self.added
    }

    /// Elements in the previous set but not in the new one.
    pub fn removed(&self) -> &HashSet<E> {
        &self.removed
    }

    /// Elements shared by the previous and the new set.
    pub fn intersection(&self) -> &HashSet<E> {
        &self.intersection
    }

    /// Returns true once the current set has been materialized.
    pub fn is_current_set_materialized(&self) -> bool {
        self.current_set.get().is_some()
    }

    /// Returns the new current set, materializing `intersection ∪ added` on first use.
    pub fn current_set(&self) -> &HashSet<E> {
        self.current_set.get_or_init(|| self.materialize())
    }

    /// Returns a shared handle to the new current set.
    pub fn current_set_arc(&self) -> Arc<HashSet<E>> {
        Arc::clone(self.current_set.get_or_init(|| self.materialize()))
    }

    /// Sets the current set explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`SubmodError::CurrentSetAlreadySet`] if the set was already
    /// materialized, either by an earlier call or by a read.
    pub fn set_current_set(&self, set: HashSet<E>) -> Result<()> {
        self.current_set
            .set(Arc::new(set))
            .map_err(|_| SubmodError::CurrentSetAlreadySet)
    }

    /// Checks `current_set = intersection ∪ added` and the size bookkeeping.
    pub fn is_consistent(&self) -> bool {
        let current = self.current_set();
        self.added.is_disjoint(&self.intersection)
            && self.removed.is_disjoint(&self.intersection)
            && self.current_set_size == self.intersection.len() + self.added.len()
            && current.len() == self.current_set_size
            && self.intersection.iter().all(|e| current.contains(e))
            && self.added.iter().all(|e| current.contains(e))
            && self.current_set_size <= self.ground_set_size
    }

    /// Consumes the record and returns the current set.
    pub fn into_current_set(self) -> HashSet<E> {
        let current = self.current_set_arc();
        drop(self);
        Arc::try_unwrap(current).unwrap_or_else(|shared| (*shared).clone())
    }

    fn materialize(&self) -> Arc<HashSet<E>> {
        if self.added.is_empty() {
            return Arc::clone(&self.intersection);
        }
        let mut set = (*self.intersection).clone();
        set.extend(self.added.iter().cloned());
        Arc::new(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scratch_is_materialized() {
        let info = SetDeltaInfo::from_scratch(5, HashSet::from([1, 2]));
        assert!(info.is_current_set_materialized());
        assert_eq!(info.current_set_size(), 2);
        assert!(info.intersection().is_empty());
        assert_eq!(info.added(), &HashSet::from([1, 2]));
        assert!(info.is_consistent());
    }

    #[test]
    fn test_with_added_is_lazy() {
        let start = SetDeltaInfo::from_scratch(5, HashSet::from([1]));
        let next = start.with_added(4);
        assert!(!next.is_current_set_materialized());
        assert_eq!(next.current_set(), &HashSet::from([1, 4]));
        assert!(next.is_current_set_materialized());
        assert!(next.is_consistent());
    }

    #[test]
    fn test_with_added_shares_previous_snapshot() {
        let start = SetDeltaInfo::from_scratch(5, HashSet::from([1, 2]));
        let next = start.with_added(3);
        assert!(std::ptr::eq(start.current_set(), next.intersection()));
    }

    #[test]
    fn test_with_removed() {
        let start = SetDeltaInfo::from_scratch(5, HashSet::from([1, 2, 3]));
        let next = start.with_removed(2);
        assert_eq!(next.removed(), &HashSet::from([2]));
        assert!(next.added().is_empty());
        assert_eq!(next.current_set(), &HashSet::from([1, 3]));
        assert_eq!(next.current_set_size(), 2);
        assert!(next.is_consistent());
    }

    #[test]
    fn test_from_sample() {
        let base = HashSet::from([1, 2, 3]);
        let info = SetDeltaInfo::from_sample(6, &base, HashSet::from([5]), HashSet::from([2]));
        assert_eq!(info.intersection(), &HashSet::from([1, 3]));
        assert_eq!(info.current_set(), &HashSet::from([1, 3, 5]));
        assert!(info.is_consistent());
    }

    #[test]
    fn test_set_current_set_only_once() {
        let start = SetDeltaInfo::from_scratch(3, HashSet::from([0]));
        let next = start.with_added(1);
        assert_eq!(next.set_current_set(HashSet::from([0, 1])), Ok(()));
        assert_eq!(
            next.set_current_set(HashSet::from([0, 1])),
            Err(SubmodError::CurrentSetAlreadySet)
        );
    }

    #[test]
    fn test_set_current_set_after_read_fails() {
        let start = SetDeltaInfo::from_scratch(3, HashSet::from([0]));
        let next = start.with_added(1);
        let _ = next.current_set();
        assert!(next.set_current_set(HashSet::from([0, 1])).is_err());
    }

    #[test]
    fn test_into_current_set() {
        let info = SetDeltaInfo::from_scratch(3, HashSet::from([0, 2])).with_removed(0);
        assert_eq!(info.into_current_set(), HashSet::from([2]));
    }
}
