use std::slice;

use crate::automata::program::InstPtr;

/// A set of instruction pointers with constant time insert, lookup and clear.
///
/// Members iterate in insertion order. Capacity is fixed at construction and
/// every member must be below it.
#[derive(Clone, Debug)]
pub struct SparseSet {
    dense: Vec<InstPtr>,
    sparse: Box<[usize]>,
    len: usize,
}

impl SparseSet {
    pub fn new(capacity: usize) -> SparseSet {
        SparseSet {
            dense: vec![0; capacity],
            sparse: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `ip` at the end of the insertion order. No-op if already present.
    pub fn insert(&mut self, ip: InstPtr) {
        if self.contains(ip) {
            return;
        }
        self.dense[self.len] = ip;
        self.sparse[ip] = self.len;
        self.len += 1;
    }

    pub fn contains(&self, ip: InstPtr) -> bool {
        let i = self.sparse[ip];
        i < self.len && self.dense[i] == ip
    }

    /// Member at position `i` of the insertion order.
    pub fn get(&self, i: usize) -> InstPtr {
        self.dense[..self.len][i]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn iter(&self) -> slice::Iter<'_, InstPtr> {
        self.dense[..self.len].iter()
    }
}

impl<'a> IntoIterator for &'a SparseSet {
    type Item = &'a InstPtr;
    type IntoIter = slice::Iter<'a, InstPtr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::SparseSet;
    use pretty_assertions::assert_eq;

    fn members(set: &SparseSet) -> Vec<usize> {
        set.iter().copied().collect()
    }

    #[test]
    fn insertion_order() {
        let mut set = SparseSet::new(10);
        assert!(set.is_empty());
        set.insert(7);
        set.insert(2);
        set.insert(7);
        set.insert(0);
        assert_eq!(members(&set), vec![7, 2, 0]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(1), 2);
        assert!(set.contains(0));
        assert!(set.contains(7));
        assert!(!set.contains(1));
        assert!(!set.contains(9));
    }

    #[test]
    fn clear_keeps_stale_slots_out() {
        let mut set = SparseSet::new(4);
        set.insert(3);
        set.insert(1);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(3));
        assert!(!set.contains(1));

        // sparse[1] still points at slot 1, which now holds 3
        set.insert(2);
        set.insert(3);
        assert!(!set.contains(1));
        assert_eq!(members(&set), vec![2, 3]);
        assert_eq!(set.capacity(), 4);
    }

    #[test]
    #[should_panic]
    fn get_past_len() {
        let mut set = SparseSet::new(4);
        set.insert(1);
        set.get(1);
    }
}
