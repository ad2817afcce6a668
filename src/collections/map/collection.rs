use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// A collection that values can be added to and removed from one at a time.
pub trait Collection<V>: Default {
    fn add(&mut self, value: V);

    /// Removes a single occurrence of `value`, if the collection contains one.
    fn remove(&mut self, value: &V);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: PartialEq> Collection<V> for Vec<V> {
    fn add(&mut self, value: V) {
        self.push(value);
    }

    fn remove(&mut self, value: &V) {
        if let Some(index) = self.iter().position(|v| v == value) {
            Vec::remove(self, index);
        }
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<V: PartialEq> Collection<V> for VecDeque<V> {
    fn add(&mut self, value: V) {
        self.push_back(value);
    }

    fn remove(&mut self, value: &V) {
        if let Some(index) = self.iter().position(|v| v == value) {
            VecDeque::remove(self, index);
        }
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<V: Hash + Eq, B: BuildHasher + Default> Collection<V> for HashSet<V, B> {
    fn add(&mut self, value: V) {
        self.insert(value);
    }

    fn remove(&mut self, value: &V) {
        HashSet::remove(self, value);
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<V: Ord> Collection<V> for BTreeSet<V> {
    fn add(&mut self, value: V) {
        self.insert(value);
    }

    fn remove(&mut self, value: &V) {
        BTreeSet::remove(self, value);
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}
