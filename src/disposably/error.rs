use std::io;

use derive_more::{Display, Error, From, IsVariant};

/// The error returned when an operation that requires a live resource is invoked after the
/// resource has been released.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("{resource} has already been released")]
pub struct AlreadyReleasedError {
    pub resource: &'static str,
}

impl AlreadyReleasedError {
    pub(crate) fn of<T: ?Sized>() -> AlreadyReleasedError {
        AlreadyReleasedError {
            resource: std::any::type_name::<T>(),
        }
    }
}

/// An error produced by one of the release hooks of a resource.
///
/// Release is still considered complete when this is returned: the resource is marked as
/// disposed and the hooks won't be retried.
#[derive(Debug, Display, From, Error, IsVariant)]
pub enum ReleaseError {
    Io(io::Error),
    Cascade(CascadeError),
}

/// Every failure encountered while releasing a set of child resources. Release of the remaining
/// children continues after a failure, so this can contain more than one error.
#[derive(Debug, Display, Error)]
#[display("{} of {attempted} tracked resources failed to release", failures.len())]
pub struct CascadeError {
    pub attempted: usize,
    pub failures: Vec<ReleaseError>,
}
