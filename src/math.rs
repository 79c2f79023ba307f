use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A set of positions in a regular expression. Positions are small and dense, so a bit set is
/// used, which also gives us cheap hashing and ordering when sets are interned.
pub type PositionSet = bit_set::BitSet;

/// A partition groups elements of type `I` into disjoint classes. During minimization, each class
/// (also called a block) collects states that have not been distinguished so far.
///
/// A partition is never changed in place, [`Partition::refine_by`] produces a new one.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord + Copy> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators
    /// which yield elements of type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the index of the class containing `element`, if there is one.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(element))
    }

    /// Returns a mapping from every element to the index of its class.
    pub fn class_map(&self) -> Map<I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, class)| class.iter().map(move |&q| (q, i)))
            .collect()
    }

    /// Splits every class according to `key`: two elements stay together if and only if they
    /// were in the same class and `key` maps them to the same value. The new classes keep the
    /// order of the old ones, and classes split from the same class are ordered by their
    /// least element.
    pub fn refine_by<K, F>(&self, mut key: F) -> Self
    where
        K: Hash + Eq,
        F: FnMut(&I) -> K,
    {
        let mut refined = Vec::with_capacity(self.0.len());
        for class in &self.0 {
            let mut groups: Vec<BTreeSet<I>> = Vec::new();
            let mut group_of: Map<K, usize> = Map::default();
            for element in class {
                let idx = *group_of.entry(key(element)).or_insert_with(|| {
                    groups.push(BTreeSet::new());
                    groups.len() - 1
                });
                groups[idx].insert(*element);
            }
            refined.extend(groups);
        }
        Self(refined)
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn refinement_splits_by_key() {
        let partition = Partition::new([vec![0, 1, 2, 3], vec![4, 5]]);
        let refined = partition.refine_by(|x| x % 2);
        assert_eq!(refined.size(), 4);
        assert_eq!(
            refined,
            Partition::new([vec![0, 2], vec![1, 3], vec![4], vec![5]])
        );
        assert_eq!(refined.class_of(&3), Some(1));
        assert_eq!(refined.class_map()[&5], 3);
    }

    #[test]
    fn refinement_with_constant_key_is_stable() {
        let partition = Partition::new([vec![3, 1], vec![], vec![2]]);
        assert_eq!(partition.size(), 2);
        assert_eq!(partition.refine_by(|_| ()), partition);
    }
}
