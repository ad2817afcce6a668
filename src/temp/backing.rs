use std::io::{self, Read, Seek, Write};

use super::TempFileError;
use crate::disposably::ReleaseError;

/// The storage behind a single temporary file.
pub trait TempBacking: Send + 'static {
    type Stream: Read + Write + Seek;

    /// Opens the file for reading from the start.
    fn open_read(&mut self) -> io::Result<Self::Stream>;

    /// Truncates the file and opens it for writing.
    fn open_write(&mut self) -> io::Result<Self::Stream>;

    /// Opens the file for writing at its end.
    fn open_append(&mut self) -> io::Result<Self::Stream>;

    /// Releases the storage. Called at most once, after which no other method is called.
    fn reclaim(&mut self) -> io::Result<()>;
}

/// The allocation strategy of a [`ScopedTempFileManager`](super::ScopedTempFileManager).
pub trait TempStorage: Send + 'static {
    type Backing: TempBacking;

    /// Allocates the storage for one new temporary file.
    fn allocate(&mut self) -> Result<Self::Backing, TempFileError>;

    /// Releases any storage shared by all files, once every tracked file has been released.
    fn reclaim(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }
}
