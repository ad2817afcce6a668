use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use super::{Collection, MissingHookPanic};
use crate::util::panic::Panic;

/// How a [`MapOfCollections`](super::MapOfCollections) creates its collections and moves values in
/// and out of them.
pub trait CollectionStrategy<C, V> {
    fn new_collection(&self) -> C;

    fn add_to(&self, collection: &mut C, value: V);

    /// Removes `value` from `collection`, doing nothing if it isn't present.
    fn remove_from(&self, collection: &mut C, value: &V);
}

/// The strategy for types implementing [`Collection`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Concrete;

impl<C: Collection<V>, V> CollectionStrategy<C, V> for Concrete {
    fn new_collection(&self) -> C {
        C::default()
    }

    fn add_to(&self, collection: &mut C, value: V) {
        collection.add(value);
    }

    fn remove_from(&self, collection: &mut C, value: &V) {
        collection.remove(value);
    }
}

type Allocate<C> = Box<dyn Fn() -> C>;
type Modify<C, V> = Box<dyn Fn(&mut C, V)>;
type Inspect<C, V> = Box<dyn Fn(&mut C, &V)>;

/// A strategy built from closures, for collection-like types that don't implement
/// [`Collection`].
///
/// Every closure is optional, so a map that only ever adds values doesn't need to say how to
/// remove them. Using an operation without its closure is a programming error.
///
/// # Panics
/// Each operation panics with a [`MissingHookPanic`] when its closure wasn't provided.
///
/// ```
/// use ease_util::collections::map::{ClosureStrategy, MapOfCollections};
///
/// let strategy = ClosureStrategy::new()
///     .allocate(String::new)
///     .add(|s: &mut String, c: char| s.push(c));
/// let mut map: MapOfCollections<u8, String, char, _> = MapOfCollections::with_strategy(strategy);
///
/// map.add(1, 'h');
/// map.add(1, 'i');
/// assert_eq!(map.at(1), "hi");
/// ```
pub struct ClosureStrategy<C, V> {
    allocate: Option<Allocate<C>>,
    add: Option<Modify<C, V>>,
    remove: Option<Inspect<C, V>>,
    _phantom: PhantomData<fn(V)>,
}

impl<C, V> ClosureStrategy<C, V> {
    /// Creates a strategy with no closures.
    pub fn new() -> ClosureStrategy<C, V> {
        ClosureStrategy {
            allocate: None,
            add: None,
            remove: None,
            _phantom: PhantomData,
        }
    }

    pub fn allocate(mut self, allocate: impl Fn() -> C + 'static) -> ClosureStrategy<C, V> {
        self.allocate = Some(Box::new(allocate));
        self
    }

    pub fn add(mut self, add: impl Fn(&mut C, V) + 'static) -> ClosureStrategy<C, V> {
        self.add = Some(Box::new(add));
        self
    }

    pub fn remove(mut self, remove: impl Fn(&mut C, &V) + 'static) -> ClosureStrategy<C, V> {
        self.remove = Some(Box::new(remove));
        self
    }
}

impl<C, V> Default for ClosureStrategy<C, V> {
    fn default() -> Self {
        ClosureStrategy::new()
    }
}

impl<C, V> CollectionStrategy<C, V> for ClosureStrategy<C, V> {
    fn new_collection(&self) -> C {
        match &self.allocate {
            Some(allocate) => allocate(),
            None => MissingHookPanic { hook: "allocate" }.panic(),
        }
    }

    fn add_to(&self, collection: &mut C, value: V) {
        match &self.add {
            Some(add) => add(collection, value),
            None => MissingHookPanic { hook: "add" }.panic(),
        }
    }

    fn remove_from(&self, collection: &mut C, value: &V) {
        match &self.remove {
            Some(remove) => remove(collection, value),
            None => MissingHookPanic { hook: "remove" }.panic(),
        }
    }
}

impl<C, V> Debug for ClosureStrategy<C, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureStrategy")
            .field("allocate", &self.allocate.is_some())
            .field("add", &self.add.is_some())
            .field("remove", &self.remove.is_some())
            .finish()
    }
}
