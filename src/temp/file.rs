use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use derive_more::Display;

use super::{TempBacking, TempFileError};
use crate::disposably::{AlreadyReleasedError, Release, ReleaseError, SafeDisposable, impl_dispose_via};

/// Identifies a [`ScopedTempFile`] for the lifetime of the process.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{_0}")]
pub struct FileId(u64);

impl FileId {
    fn next() -> FileId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        FileId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

type ReleaseAction = Box<dyn FnOnce() + Send>;

/// A temporary file, released along with its storage when disposed or dropped.
///
/// Usually allocated by a [`ScopedTempFileManager`](super::ScopedTempFileManager), which releases
/// any of its files that are still alive when it is released itself. A file can also be created
/// directly from a [`TempBacking`], in which case it is released on its own.
///
/// Streams are opened independently of each other. Every open checks that the file is still live
/// and fails with [`TempFileError::AlreadyReleased`] otherwise.
pub struct ScopedTempFile<B: TempBacking> {
    id: FileId,
    core: SafeDisposable<FileState<B>>,
}

impl<B: TempBacking> ScopedTempFile<B> {
    pub fn new(backing: B) -> ScopedTempFile<B> {
        ScopedTempFile {
            id: FileId::next(),
            core: SafeDisposable::new(FileState {
                backing,
                on_release: Vec::new(),
            }),
        }
    }

    pub const fn id(&self) -> FileId {
        self.id
    }

    /// Opens the file for reading from the start.
    pub fn open_read(&self) -> Result<B::Stream, TempFileError> {
        Ok(self.with_backing(B::open_read)??)
    }

    /// Truncates the file and opens a fresh stream for writing.
    pub fn open_write(&self) -> Result<B::Stream, TempFileError> {
        Ok(self.with_backing(B::open_write)??)
    }

    /// Opens the file for writing at its end.
    pub fn open_append(&self) -> Result<B::Stream, TempFileError> {
        Ok(self.with_backing(B::open_append)??)
    }

    /// Registers an action to run when this file is released, whether explicitly or when dropped.
    /// Actions run in the order they were added, after the storage has been reclaimed.
    pub fn add_release_action(
        &self,
        action: impl FnOnce() + Send + 'static,
    ) -> Result<(), AlreadyReleasedError> {
        self.core
            .with(|state| state.on_release.push(Box::new(action)))
            .map_err(|_| AlreadyReleasedError::of::<Self>())
    }

    /// Runs `f` against the storage of this file, or fails if the file has been released.
    pub fn with_backing<T>(&self, f: impl FnOnce(&mut B) -> T) -> Result<T, AlreadyReleasedError> {
        self.core
            .with(|state| f(&mut state.backing))
            .map_err(|_| AlreadyReleasedError::of::<Self>())
    }
}

impl_dispose_via!(core for [B: TempBacking] ScopedTempFile<B>);

impl<B: TempBacking> Debug for ScopedTempFile<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedTempFile")
            .field("id", &self.id)
            .field("core", &self.core)
            .finish()
    }
}

struct FileState<B> {
    backing: B,
    on_release: Vec<ReleaseAction>,
}

impl<B: TempBacking> Release for FileState<B> {
    fn release_unmanaged(&mut self) -> Result<(), ReleaseError> {
        let reclaimed = self.backing.reclaim();
        for action in self.on_release.drain(..) {
            action();
        }
        Ok(reclaimed?)
    }

    fn nullify_large_fields(&mut self) {
        self.on_release = Vec::new();
    }
}
