use super::{AlreadyReleasedError, ReleaseError, ScopedLock};

/// The release contract shared by every resource in this crate.
///
/// Releasing is idempotent and thread-safe: the release side effects of a resource run at most
/// once, no matter how many times or from how many threads [`dispose`](Dispose::dispose) is
/// called. Once [`is_disposed`](Dispose::is_disposed) is observed to be true, it stays true.
pub trait Dispose {
    /// Returns true if the resource has been released, via [`dispose`](Dispose::dispose) or
    /// the fallback on drop.
    fn is_disposed(&self) -> bool;

    /// Returns an [`AlreadyReleasedError`] if the resource has been released. This can be used to
    /// avoid starting something on a resource that is no longer usable.
    ///
    /// This isn't a guarantee that another thread won't release the resource immediately after the
    /// check succeeds. To hold off a concurrent release, use [`Guarded::lock`] for the duration
    /// of the operation.
    fn check_disposed(&self) -> Result<(), AlreadyReleasedError> {
        if self.is_disposed() {
            Err(AlreadyReleasedError::of::<Self>())
        } else {
            Ok(())
        }
    }

    /// Releases the resource. The first call performs the release work and returns any error it
    /// produced, every later call is a no-op returning `Ok(())`.
    fn dispose(&self) -> Result<(), ReleaseError>;
}

/// A resource with an internal guard that callers may borrow.
pub trait Guarded: Dispose {
    /// Acquires the resource's internal guard, returning a fresh [`ScopedLock`] which holds it
    /// until the lock is dropped or disposed.
    ///
    /// While the lock is held, a release started on another thread can't complete. The resource
    /// itself isn't released by this, and the guard is re-entrant, so the holder's own thread is
    /// free to keep using (or even dispose) the resource.
    fn lock(&self) -> ScopedLock<'_>;
}

/// Implements [`Dispose`] and [`Guarded`] for a type by delegating to one of its fields, which is
/// usually a [`SafeDisposable`](super::SafeDisposable). Generic parameters go in brackets before
/// the type: `impl_dispose_via!(core for [B: Backing] Resource<B>)`.
macro_rules! impl_dispose_via {
    ($field:ident for [$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> $crate::disposably::Dispose for $ty {
            fn is_disposed(&self) -> bool {
                $crate::disposably::Dispose::is_disposed(&self.$field)
            }

            fn check_disposed(&self) -> Result<(), $crate::disposably::AlreadyReleasedError> {
                $crate::disposably::Dispose::check_disposed(&self.$field).map_err(|_| {
                    $crate::disposably::AlreadyReleasedError {
                        resource: std::any::type_name::<Self>(),
                    }
                })
            }

            fn dispose(&self) -> Result<(), $crate::disposably::ReleaseError> {
                $crate::disposably::Dispose::dispose(&self.$field)
            }
        }

        impl<$($generics)*> $crate::disposably::Guarded for $ty {
            fn lock(&self) -> $crate::disposably::ScopedLock<'_> {
                $crate::disposably::Guarded::lock(&self.$field)
            }
        }
    };
    ($field:ident for $ty:ty) => {
        $crate::disposably::impl_dispose_via!($field for [] $ty);
    };
}

pub(crate) use impl_dispose_via;
