//! Extension traits for standard library types, and the small types they need.
//!
//! - [`StrExtension`] converts optional text into values, falling back to defaults.
//! - [`EnumValues`] and [`EnumExtension`] enumerate the values of enums declared with
//!   [`enum_values!`](crate::enum_values).
//! - [`IteratorExtension`] splits iterators into batches.
//! - [`EmbeddedResources`] finds resources compiled in with
//!   [`embed_resources!`](crate::embed_resources).
//! - [`PathExtension`] creates uniquely named files in a directory.

#[cfg(all(feature = "fs", unix))]
mod dir;
mod enums;
mod iter;
mod resource;
mod string;
mod time_span;

#[cfg(all(feature = "fs", unix))]
pub use dir::*;
pub use enums::*;
pub use iter::*;
pub use resource::*;
pub use string::*;
pub use time_span::*;
