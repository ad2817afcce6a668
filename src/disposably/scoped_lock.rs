use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use super::{Dispose, ReleaseError};

/// A borrowed hold on a guard. The guard is acquired on construction and released when the
/// ScopedLock is disposed or dropped, whichever happens first.
///
/// This lets a type hand out its internal guard for the duration of a block without handing out
/// the guard itself. Every acquisition produces a distinct ScopedLock, even when taken repeatedly
/// by the same thread.
///
/// ```
/// use ease_util::disposably::ScopedLock;
/// use parking_lot::ReentrantMutex;
///
/// let guard = ReentrantMutex::new(());
/// {
///     let _lock = ScopedLock::new(&guard);
///     assert!(guard.is_locked());
/// }
/// assert!(!guard.is_locked());
/// ```
pub struct ScopedLock<'a> {
    held: RefCell<Option<ReentrantMutexGuard<'a, ()>>>,
}

impl<'a> ScopedLock<'a> {
    /// Acquires `guard`, blocking until it is available.
    pub fn new(guard: &'a ReentrantMutex<()>) -> ScopedLock<'a> {
        ScopedLock {
            held: RefCell::new(Some(guard.lock())),
        }
    }
}

impl Dispose for ScopedLock<'_> {
    fn is_disposed(&self) -> bool {
        self.held.borrow().is_none()
    }

    fn dispose(&self) -> Result<(), ReleaseError> {
        drop(self.held.borrow_mut().take());
        Ok(())
    }
}

impl Debug for ScopedLock<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLock")
            .field("held", &!self.is_disposed())
            .finish()
    }
}
