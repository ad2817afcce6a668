//! A map of keys to collections of values, see [`MapOfCollections`].

mod collection;
mod map_of_collections;
mod panic;
mod strategy;

pub use collection::*;
pub use map_of_collections::*;
pub use panic::*;
pub use strategy::*;
