//! A thin layer over the libc file APIs, used for temporary files.
//!
//! Streams are unbuffered and map directly onto `read`, `write` and `lseek`. File creation for
//! temporary files always uses `O_EXCL` so that an existing file is never opened by accident.

mod error;
mod fd;
mod stream;
mod tests;
mod unique;

pub use error::*;
pub(crate) use fd::*;
pub use stream::*;
pub use unique::*;
