use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{FileId, ScopedTempFile, TempFileError, TempStorage};
use crate::disposably::{
    AlreadyReleasedError, CascadeError, Dispose, Release, ReleaseError, SafeDisposable,
    impl_dispose_via,
};

type Tracked<B> = Arc<Mutex<HashMap<FileId, Weak<ScopedTempFile<B>>>>>;

/// Owns every [`ScopedTempFile`] it allocates, until the file is released on its own.
///
/// Releasing the manager releases every file that is still live, then lets the storage reclaim
/// anything shared between them. A failure to release one file doesn't stop the others from being
/// released, all failures are returned together as a [`CascadeError`]. The manager is also released
/// when dropped, so files outliving it are still cleaned up.
///
/// The manager only holds weak references. A file whose last [`Arc`] is dropped is released and
/// stops being tracked, as does one that is disposed explicitly.
///
/// # Limitations
/// Files allocated on another thread while the manager is being released are rejected once the
/// release has started, but a file allocated just before may or may not be part of the cascade.
pub struct ScopedTempFileManager<S: TempStorage> {
    core: SafeDisposable<ManagerState<S>>,
}

impl<S: TempStorage> ScopedTempFileManager<S> {
    pub fn new(storage: S) -> ScopedTempFileManager<S> {
        ScopedTempFileManager {
            core: SafeDisposable::new(ManagerState {
                storage,
                tracked: Arc::default(),
            }),
        }
    }

    /// Allocates a new temporary file from the storage and starts tracking it.
    ///
    /// # Errors
    /// Returns [`TempFileError::AlreadyReleased`] if the manager has been released, otherwise any
    /// error raised by the storage while allocating.
    pub fn new_file(&self) -> Result<Arc<ScopedTempFile<S::Backing>>, TempFileError> {
        let file = self
            .core
            .with(ManagerState::new_file)
            .map_err(|_| AlreadyReleasedError::of::<Self>())??;
        Ok(file)
    }

    /// Returns the number of files that are currently tracked, zero once released.
    pub fn tracked_len(&self) -> usize {
        self.core
            .with(|state| state.tracked.lock().len())
            .unwrap_or_default()
    }
}

impl_dispose_via!(core for [S: TempStorage] ScopedTempFileManager<S>);

impl<S: TempStorage + Default> Default for ScopedTempFileManager<S> {
    fn default() -> Self {
        ScopedTempFileManager::new(S::default())
    }
}

impl<S: TempStorage> Debug for ScopedTempFileManager<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedTempFileManager")
            .field("tracked", &self.tracked_len())
            .field("core", &self.core)
            .finish()
    }
}

struct ManagerState<S: TempStorage> {
    storage: S,
    tracked: Tracked<S::Backing>,
}

impl<S: TempStorage> ManagerState<S> {
    fn new_file(&mut self) -> Result<Arc<ScopedTempFile<S::Backing>>, TempFileError> {
        let file = Arc::new(ScopedTempFile::new(self.storage.allocate()?));
        let id = file.id();

        let tracked = Arc::downgrade(&self.tracked);
        file.add_release_action(move || {
            if let Some(tracked) = tracked.upgrade() {
                tracked.lock().remove(&id);
            }
        })?;
        self.tracked.lock().insert(id, Arc::downgrade(&file));

        tracing::trace!(%id, "allocated temporary file");
        Ok(file)
    }
}

impl<S: TempStorage> Release for ManagerState<S> {
    fn release_unmanaged(&mut self) -> Result<(), ReleaseError> {
        // Each file removes itself from the tracked set as it is released, so work on a copy.
        let files: Vec<_> = self
            .tracked
            .lock()
            .values()
            .filter_map(Weak::upgrade)
            .collect();

        let attempted = files.len();
        let mut failures = Vec::new();
        for file in files {
            tracing::trace!(id = %file.id(), "releasing temporary file with its manager");
            if let Err(error) = file.dispose() {
                tracing::warn!(id = %file.id(), %error, "failed to release temporary file");
                failures.push(error);
            }
        }

        if let Err(error) = self.storage.reclaim() {
            tracing::warn!(%error, "failed to reclaim temporary storage");
            failures.push(error);
        }

        if !failures.is_empty() {
            Err(CascadeError {
                attempted,
                failures,
            })?
        }
        Ok(())
    }

    fn nullify_large_fields(&mut self) {
        self.tracked = Arc::default();
    }
}
