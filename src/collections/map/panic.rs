use derive_more::{Display, Error};

use crate::util::panic::Panic;

/// A [`ClosureStrategy`](super::ClosureStrategy) was asked to perform an operation it wasn't given
/// a closure for.
#[derive(Debug, Display, Error)]
#[display("the {hook} closure of a map of collections strategy was never provided")]
pub struct MissingHookPanic {
    pub hook: &'static str,
}
impl Panic for MissingHookPanic {}
