use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, ReentrantMutex};

use super::{AlreadyReleasedError, Dispose, Guarded, ReleaseError, ScopedLock};

/// The release hooks of a resource managed by a [`SafeDisposable`].
///
/// None of the hooks need any synchronization of their own, they are guaranteed to be called at
/// most once and never concurrently.
pub trait Release {
    /// Releases anything that should only be released when the owner explicitly asks for it. Only
    /// invoked by [`Dispose::dispose`], never by the fallback on drop.
    fn release_managed(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }

    /// Releases resources that must be cleaned up even if the owner never explicitly released
    /// them, such as files on disk or externally acquired locks. Invoked by both
    /// [`Dispose::dispose`] and the fallback on drop.
    fn release_unmanaged(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }

    /// Drops references to large objects once release has completed. Invoked after
    /// [`release_unmanaged`](Release::release_unmanaged) on both release paths.
    fn nullify_large_fields(&mut self) {}
}

/// A thread-safe, exactly-once implementation of [`Dispose`] around an inner value `R`, with
/// [`Drop`] acting as the fallback release.
///
/// # Lifecycle
/// A SafeDisposable starts live and moves to disposed exactly once. The first call to
/// [`dispose`](Dispose::dispose) to acquire the guard takes the inner value out and runs:
/// 1. [`Release::release_managed`]
/// 2. [`Release::release_unmanaged`]
/// 3. [`Release::nullify_large_fields`]
///
/// If the SafeDisposable is dropped while still live, only steps 2 and 3 are run. Either way, the
/// inner value is dropped afterwards.
///
/// The disposed flag is set even if a hook fails or panics, so a failing hook is never retried.
/// If the managed hook fails, finalization still runs and the first error is returned.
///
/// # Guard
/// The guard is a re-entrant mutex held for the whole release. [`Guarded::lock`] hands out
/// [`ScopedLock`]s of the same guard, so a caller can keep a release on another thread from
/// starting its hooks until the lock is dropped.
pub struct SafeDisposable<R: Release> {
    disposed: AtomicBool,
    guard: ReentrantMutex<()>,
    inner: Mutex<Option<R>>,
}

impl<R: Release> SafeDisposable<R> {
    pub fn new(inner: R) -> SafeDisposable<R> {
        SafeDisposable {
            disposed: AtomicBool::new(false),
            guard: ReentrantMutex::new(()),
            inner: Mutex::new(Some(inner)),
        }
    }

    /// Runs `f` against the inner value, or returns an [`AlreadyReleasedError`] if it has been
    /// released.
    ///
    /// A release started on another thread waits for `f` to complete before its hooks can take the
    /// inner value. `f` must not release this SafeDisposable itself.
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> Result<T, AlreadyReleasedError> {
        match self.inner.lock().as_mut() {
            Some(inner) => Ok(f(inner)),
            None => Err(AlreadyReleasedError::of::<R>()),
        }
    }
}

impl<R: Release> Dispose for SafeDisposable<R> {
    fn is_disposed(&self) -> bool {
        // Only take the guard when a release might be in progress.
        self.disposed.load(Ordering::Acquire) || {
            let _guard = self.guard.lock();
            self.disposed.load(Ordering::Acquire)
        }
    }

    fn check_disposed(&self) -> Result<(), AlreadyReleasedError> {
        if self.is_disposed() {
            Err(AlreadyReleasedError::of::<R>())
        } else {
            Ok(())
        }
    }

    fn dispose(&self) -> Result<(), ReleaseError> {
        if self.disposed.load(Ordering::Acquire) {
            return Ok(());
        }

        let _guard = self.guard.lock();
        // Another thread may have finished releasing while we waited for the guard. A re-entrant
        // call from inside one of our own hooks also ends up here, because the value is taken.
        let Some(mut inner) = self.inner.lock().take() else {
            return Ok(());
        };
        let _mark = MarkDisposed(&self.disposed);

        let managed = inner.release_managed();
        let finalized = finalize(&mut inner);
        drop(inner);

        match (managed, finalized) {
            (Err(managed), Err(finalized)) => {
                tracing::warn!(
                    resource = std::any::type_name::<R>(),
                    error = %finalized,
                    "finalization failed after managed release had already failed"
                );
                Err(managed)
            },
            (managed, finalized) => managed.and(finalized),
        }
    }
}

impl<R: Release> Guarded for SafeDisposable<R> {
    fn lock(&self) -> ScopedLock<'_> {
        ScopedLock::new(&self.guard)
    }
}

impl<R: Release> Drop for SafeDisposable<R> {
    fn drop(&mut self) {
        // The fallback path: nothing else can hold a reference to self, so no locking is needed.
        let Some(mut inner) = self.inner.get_mut().take() else {
            return;
        };
        *self.disposed.get_mut() = true;

        tracing::debug!(
            resource = std::any::type_name::<R>(),
            "releasing a resource that was never explicitly disposed"
        );
        if let Err(error) = finalize(&mut inner) {
            tracing::warn!(
                resource = std::any::type_name::<R>(),
                %error,
                "fallback release failed"
            );
        }
    }
}

impl<R: Release> Debug for SafeDisposable<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeDisposable")
            .field("<inner>", &std::any::type_name::<R>())
            .field("disposed", &self.disposed.load(Ordering::Acquire))
            .finish()
    }
}

fn finalize<R: Release>(inner: &mut R) -> Result<(), ReleaseError> {
    let result = inner.release_unmanaged();
    inner.nullify_large_fields();
    result
}

/// Sets the disposed flag when dropped, which happens even if a hook panics.
struct MarkDisposed<'a>(&'a AtomicBool);

impl Drop for MarkDisposed<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}
