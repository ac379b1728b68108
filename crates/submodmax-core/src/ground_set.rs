//! The ground set an optimizer searches over.

use std::collections::HashSet;
use std::hash::Hash;

/// An immutable, finite, de-duplicated set of elements with a fixed order.
///
/// The order is the insertion order of the first occurrence of each element.
/// Every scan an optimizer performs "in ground-set order" walks this list, so
/// runs with the same random seed visit elements identically.
///
/// # Example
///
/// ```
/// use submodmax_core::GroundSet;
///
/// let ground = GroundSet::new([3, 1, 3, 2]);
/// assert_eq!(ground.len(), 3);
/// assert_eq!(ground.elements(), &[3, 1, 2]);
/// assert!(ground.contains(&1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "Vec<E>",
        into = "Vec<E>",
        bound(
            serialize = "E: serde::Serialize + Clone + Eq + Hash",
            deserialize = "E: serde::Deserialize<'de> + Clone + Eq + Hash"
        )
    )
)]
pub struct GroundSet<E: Eq + Hash> {
    elements: Vec<E>,
    index: HashSet<E>,
}

impl<E> GroundSet<E>
where
    E: Clone + Eq + Hash,
{
    /// Creates a ground set, dropping repeated elements.
    pub fn new(elements: impl IntoIterator<Item = E>) -> Self {
        let mut index = HashSet::new();
        let mut ordered = Vec::new();
        for elem in elements {
            if index.insert(elem.clone()) {
                ordered.push(elem);
            }
        }
        Self {
            elements: ordered,
            index,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the ground set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the elements in ground-set order.
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Iterates the elements in ground-set order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Returns true if `elem` belongs to the ground set.
    pub fn contains(&self, elem: &E) -> bool {
        self.index.contains(elem)
    }

    /// Returns the ground set as a `HashSet`.
    pub fn to_set(&self) -> HashSet<E> {
        self.index.clone()
    }

    /// Returns `X - set`, the elements of the ground set not in `set`.
    pub fn complement(&self, set: &HashSet<E>) -> HashSet<E> {
        self.elements
            .iter()
            .filter(|elem| !set.contains(*elem))
            .cloned()
            .collect()
    }

    /// Returns true if every element of `set` belongs to the ground set.
    pub fn is_superset_of(&self, set: &HashSet<E>) -> bool {
        set.iter().all(|elem| self.index.contains(elem))
    }

    /// Returns the members of `set` in ground-set order.
    pub fn ordered_members<'a>(
        &'a self,
        set: &'a HashSet<E>,
    ) -> impl Iterator<Item = &'a E> + 'a {
        self.elements.iter().filter(move |elem| set.contains(*elem))
    }
}

impl<E> From<Vec<E>> for GroundSet<E>
where
    E: Clone + Eq + Hash,
{
    fn from(elements: Vec<E>) -> Self {
        Self::new(elements)
    }
}

impl<E: Eq + Hash> From<GroundSet<E>> for Vec<E> {
    fn from(ground: GroundSet<E>) -> Self {
        ground.elements
    }
}

impl<E> FromIterator<E> for GroundSet<E>
where
    E: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, E> IntoIterator for &'a GroundSet<E>
where
    E: Clone + Eq + Hash,
{
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let ground = GroundSet::new(vec!["b", "a", "b", "c", "a"]);
        assert_eq!(ground.elements(), &["b", "a", "c"]);
        assert_eq!(ground.len(), 3);
    }

    #[test]
    fn test_empty() {
        let ground: GroundSet<u32> = GroundSet::new(Vec::new());
        assert!(ground.is_empty());
        assert!(ground.to_set().is_empty());
    }

    #[test]
    fn test_complement() {
        let ground = GroundSet::new(0..5);
        let set: HashSet<_> = [1, 3].into_iter().collect();
        let complement = ground.complement(&set);
        assert_eq!(complement, [0, 2, 4].into_iter().collect());
    }

    #[test]
    fn test_ordered_members_follow_ground_order() {
        let ground = GroundSet::new([5, 4, 3, 2, 1]);
        let set: HashSet<_> = [1, 4, 2].into_iter().collect();
        let members: Vec<_> = ground.ordered_members(&set).copied().collect();
        assert_eq!(members, vec![4, 2, 1]);
    }

    #[test]
    fn test_superset_check() {
        let ground = GroundSet::new(0..3);
        assert!(ground.is_superset_of(&[0, 2].into_iter().collect()));
        assert!(!ground.is_superset_of(&[0, 7].into_iter().collect()));
    }
}
