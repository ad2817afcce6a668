use super::{ReleaseError, Release, SafeDisposable, impl_dispose_via};

/// Ad-hoc scope state: an entry action runs on construction and an exit action runs when the
/// Scoped is disposed or dropped, only once between the two.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use ease_util::disposably::{Dispose, Scoped};
///
/// let depth = AtomicUsize::new(0);
/// let scope = Scoped::new(
///     || { depth.fetch_add(1, Ordering::SeqCst); },
///     || { depth.fetch_sub(1, Ordering::SeqCst); },
/// );
/// assert_eq!(depth.load(Ordering::SeqCst), 1);
/// scope.dispose().unwrap();
/// assert_eq!(depth.load(Ordering::SeqCst), 0);
/// ```
#[derive(Debug)]
pub struct Scoped<'a> {
    core: SafeDisposable<ExitAction<'a>>,
}

impl<'a> Scoped<'a> {
    pub fn new(entry: impl FnOnce(), exit: impl FnOnce() + Send + 'a) -> Scoped<'a> {
        entry();
        Scoped::on_exit(exit)
    }

    /// Creates a Scoped with no entry action.
    pub fn on_exit(exit: impl FnOnce() + Send + 'a) -> Scoped<'a> {
        Scoped {
            core: SafeDisposable::new(ExitAction(Some(Box::new(exit)))),
        }
    }
}

impl_dispose_via!(core for ['a] Scoped<'a>);

struct ExitAction<'a>(Option<Box<dyn FnOnce() + Send + 'a>>);

impl Release for ExitAction<'_> {
    fn release_unmanaged(&mut self) -> Result<(), ReleaseError> {
        if let Some(exit) = self.0.take() {
            exit();
        }
        Ok(())
    }
}
