use std::borrow::Borrow;
use std::collections::hash_map::{self, HashMap};
use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;
use std::marker::PhantomData;

use super::{CollectionStrategy, Concrete};

/// A map of keys to collections of values, which creates an empty collection the first time a key
/// is used. This saves callers from checking for and initializing the collection of each key
/// before adding to it.
///
/// The strategy `S` decides how collections are created and modified. With the default,
/// [`Concrete`], any type implementing [`Collection`](super::Collection) can be used. A
/// [`ClosureStrategy`](super::ClosureStrategy) allows anything else.
///
/// ```
/// use ease_util::collections::map::MapOfHashSets;
///
/// let mut families = MapOfHashSets::new();
/// families.add("Doe", "Jane");
/// families.add("Doe", "John");
///
/// assert_eq!(families.at("Doe").len(), 2);
/// assert!(families.at("Smith").is_empty());
/// ```
pub struct MapOfCollections<K, C, V, S = Concrete> {
    inner: HashMap<K, C>,
    strategy: S,
    _phantom: PhantomData<fn(V)>,
}

impl<K: Hash + Eq, C, V, S: CollectionStrategy<C, V> + Default> MapOfCollections<K, C, V, S> {
    pub fn new() -> MapOfCollections<K, C, V, S> {
        MapOfCollections::with_strategy(S::default())
    }
}

impl<K: Hash + Eq, C, V, S: CollectionStrategy<C, V>> MapOfCollections<K, C, V, S> {
    pub fn with_strategy(strategy: S) -> MapOfCollections<K, C, V, S> {
        MapOfCollections {
            inner: HashMap::new(),
            strategy,
            _phantom: PhantomData,
        }
    }

    /// Adds `value` to the collection for `key`, creating the collection if needed.
    pub fn add(&mut self, key: K, value: V) {
        let collection = Self::entry(&mut self.inner, &self.strategy, key);
        self.strategy.add_to(collection, value);
    }

    /// Removes `value` from the collection for `key`. Nothing happens if there is no collection
    /// for `key` or it doesn't contain `value`, and an emptied collection is kept.
    pub fn remove<Q>(&mut self, key: &Q, value: &V)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(collection) = self.inner.get_mut(key) {
            self.strategy.remove_from(collection, value);
        }
    }

    /// Returns the collection for `key`, creating an empty one if there isn't one yet.
    pub fn at(&mut self, key: K) -> &mut C {
        Self::entry(&mut self.inner, &self.strategy, key)
    }

    /// Returns the collection for `key` if one has been created, without creating it.
    pub fn get<Q>(&self, key: &Q) -> Option<&C>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(key)
    }

    /// Removes the collection for `key` from the map, returning it.
    pub fn take<Q>(&mut self, key: &Q) -> Option<C>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key)
    }

    /// Returns the number of keys with a collection, including empty ones.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every key and collection.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, C> {
        self.inner.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, C> {
        self.inner.keys()
    }

    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    fn entry<'a>(inner: &'a mut HashMap<K, C>, strategy: &S, key: K) -> &'a mut C {
        inner.entry(key).or_insert_with(|| strategy.new_collection())
    }
}

impl<K: Hash + Eq, C, V, S: CollectionStrategy<C, V> + Default> Default
    for MapOfCollections<K, C, V, S>
{
    fn default() -> Self {
        MapOfCollections::new()
    }
}

impl<K: Debug, C: Debug, V, S> Debug for MapOfCollections<K, C, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<'a, K, C, V, S> IntoIterator for &'a MapOfCollections<K, C, V, S> {
    type Item = (&'a K, &'a C);
    type IntoIter = hash_map::Iter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<K, C, V, S> IntoIterator for MapOfCollections<K, C, V, S> {
    type Item = (K, C);
    type IntoIter = hash_map::IntoIter<K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// A map of keys to sets of unique values.
pub type MapOfHashSets<K, V> = MapOfCollections<K, HashSet<V>, V>;

/// A map of keys to lists of values, in the order they were added.
pub type MapOfVecs<K, V> = MapOfCollections<K, Vec<V>, V>;

/// A map of keys to queues of values.
pub type MapOfVecDeques<K, V> = MapOfCollections<K, VecDeque<V>, V>;
