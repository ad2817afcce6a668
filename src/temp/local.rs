use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::{ScopedTempFile, ScopedTempFileManager, TempBacking, TempFileError, TempStorage};
use crate::disposably::{AlreadyReleasedError, ReleaseError};
use crate::fs::{self as ufs, FileStream};

// SAFETY: 64 is non-zero.
pub const DEFAULT_MAX_ATTEMPTS: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(64) };

/// A temporary file on the local filesystem, deleted when reclaimed.
#[derive(Debug)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    /// Creates a new, uniquely named, empty file under `dir`.
    pub fn create_in(dir: &Path, max_attempts: Option<NonZeroUsize>) -> Result<LocalFile, TempFileError> {
        Ok(LocalFile {
            path: ufs::create_unique(dir, max_attempts)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TempBacking for LocalFile {
    type Stream = FileStream;

    fn open_read(&mut self) -> io::Result<FileStream> {
        FileStream::open_read(&self.path)
    }

    fn open_write(&mut self) -> io::Result<FileStream> {
        FileStream::open_write(&self.path)
    }

    fn open_append(&mut self) -> io::Result<FileStream> {
        FileStream::open_append(&self.path)
    }

    fn reclaim(&mut self) -> io::Result<()> {
        tracing::trace!(path = %self.path.display(), "removing temporary file");
        ufs::unlink(&self.path)
    }
}

impl ScopedTempFile<LocalFile> {
    /// Returns the path of this file on disk, while it is live.
    pub fn path(&self) -> Result<PathBuf, AlreadyReleasedError> {
        self.with_backing(|file| file.path.clone())
    }
}

/// Allocates [`LocalFile`]s, either in the system temporary directory or in a directory owned by
/// the storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: Option<PathBuf>,
    max_attempts: Option<NonZeroUsize>,
}

impl LocalStorage {
    /// Creates files in the system temporary directory, which is left in place on release.
    pub fn system() -> LocalStorage {
        LocalStorage {
            dir: None,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Creates files under `dir`, creating it if needed.
    ///
    /// # Warning
    /// `dir` is owned by the storage: when the manager is released, the entire directory is
    /// deleted recursively, including anything that was already in it.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> LocalStorage {
        LocalStorage {
            dir: Some(dir.into()),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Sets the number of names to try before allocation fails, `None` for no limit.
    pub fn max_attempts(mut self, max_attempts: Option<NonZeroUsize>) -> LocalStorage {
        self.max_attempts = max_attempts;
        self
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        LocalStorage::system()
    }
}

impl TempStorage for LocalStorage {
    type Backing = LocalFile;

    fn allocate(&mut self) -> Result<LocalFile, TempFileError> {
        match &self.dir {
            Some(dir) => LocalFile::create_in(dir, self.max_attempts),
            None => LocalFile::create_in(&std::env::temp_dir(), self.max_attempts),
        }
    }

    fn reclaim(&mut self) -> Result<(), ReleaseError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        tracing::trace!(dir = %dir.display(), "removing temporary directory");
        match fs::remove_dir_all(dir) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e)?,
            _ => Ok(()),
        }
    }
}

pub type LocalTempFileManager = ScopedTempFileManager<LocalStorage>;

impl ScopedTempFileManager<LocalStorage> {
    /// A manager for files in the system temporary directory.
    pub fn system() -> LocalTempFileManager {
        ScopedTempFileManager::new(LocalStorage::system())
    }

    /// A manager for files in `dir`, which is deleted along with everything in it when the manager
    /// is released.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> LocalTempFileManager {
        ScopedTempFileManager::new(LocalStorage::in_dir(dir))
    }
}
