//! Sorted index set with in-place intersection.

/// Sorted, deduplicated set of image indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSet {
    items: Vec<usize>,
}

impl CandidateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a vector that is already sorted ascending without duplicates.
    pub(crate) fn from_sorted(items: Vec<usize>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self { items }
    }

    /// Returns the number of indices in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `index` is a member.
    pub fn contains(&self, index: usize) -> bool {
        self.items.binary_search(&index).is_ok()
    }

    /// Returns the smallest member.
    pub fn first(&self) -> Option<usize> {
        self.items.first().copied()
    }

    /// Returns the smallest member that is not `index`.
    pub fn first_other(&self, index: usize) -> Option<usize> {
        self.items.iter().copied().find(|&i| i != index)
    }

    /// Returns the sole member if the set is a singleton.
    pub fn only(&self) -> Option<usize> {
        match self.items.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Keeps only members also present in `other`.
    pub fn intersect_with(&mut self, other: &CandidateSet) {
        let mut theirs = other.items.iter().peekable();
        self.items.retain(|&mine| {
            while theirs.next_if(|&&t| t < mine).is_some() {}
            theirs.peek().is_some_and(|&&t| t == mine)
        });
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }

    /// Returns the members as a sorted slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }
}

impl FromIterator<usize> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut items: Vec<usize> = iter.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::CandidateSet;

    #[test]
    fn intersection_only_shrinks() {
        let mut set: CandidateSet = [1, 3, 5, 7].into_iter().collect();
        let other: CandidateSet = [0, 3, 4, 7, 9].into_iter().collect();
        set.intersect_with(&other);
        assert_eq!(set.as_slice(), &[3, 7]);

        set.intersect_with(&CandidateSet::new());
        assert!(set.is_empty());
    }

    #[test]
    fn from_iter_sorts_and_dedups() {
        let set: CandidateSet = [4, 2, 4, 1].into_iter().collect();
        assert_eq!(set.as_slice(), &[1, 2, 4]);
        assert_eq!(set.first(), Some(1));
        assert_eq!(set.first_other(1), Some(2));
        assert!(set.contains(4));
        assert!(!set.contains(3));
    }

    #[test]
    fn only_reports_singletons() {
        let single: CandidateSet = [6].into_iter().collect();
        assert_eq!(single.only(), Some(6));
        let pair: CandidateSet = [6, 8].into_iter().collect();
        assert_eq!(pair.only(), None);
        assert_eq!(CandidateSet::new().only(), None);
    }
}
