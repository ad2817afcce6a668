//! Collection types built on top of the standard library's collections.

pub mod map;
