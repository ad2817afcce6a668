//! Temporary files whose lifetime is bound to an owner.
//!
//! A [`ScopedTempFileManager`] allocates [`ScopedTempFile`]s from a [`TempStorage`] and releases
//! whichever of them are still live when it is released itself. Files can be released early,
//! either by disposing them or by dropping the last reference, and stop being tracked when they
//! are.
//!
//! Two storages are provided:
//! - [`LocalStorage`] creates uniquely named files on disk, either in the system temporary
//!   directory or in a directory owned by the storage.
//! - [`MemoryStorage`] keeps the contents in memory.
//!
//! ```
//! use std::io::{Read, Write};
//!
//! use ease_util::disposably::Dispose;
//! use ease_util::temp::MemoryTempFileManager;
//!
//! let manager = MemoryTempFileManager::default();
//! let file = manager.new_file().unwrap();
//! file.open_write().unwrap().write_all(b"Hello world!").unwrap();
//!
//! let mut contents = String::new();
//! file.open_read().unwrap().read_to_string(&mut contents).unwrap();
//! assert_eq!(contents, "Hello world!");
//!
//! manager.dispose().unwrap();
//! assert!(file.is_disposed());
//! assert!(file.open_read().is_err());
//! ```

mod backing;
mod error;
mod file;
mod local;
mod manager;
mod memory;
mod tests;

pub use backing::*;
pub use error::*;
pub use file::*;
pub use local::*;
pub use manager::*;
pub use memory::*;
