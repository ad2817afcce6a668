//! Exactly-once, thread-safe release of resources.
//!
//! Every resource type in this crate implements the same capability, [`Dispose`], by delegating to
//! a [`SafeDisposable`] rather than inheriting from some base type. A SafeDisposable owns the
//! resource's state and its [`Release`] hooks, and guarantees:
//! - The release hooks run at most once, regardless of how many threads call
//!   [`dispose`](Dispose::dispose) or how often.
//! - Once a resource reports that it is disposed, it stays disposed.
//! - If a resource is dropped without being disposed, the finalization hooks still run (but the
//!   explicit-only managed hook doesn't).
//!
//! [`Guarded::lock`] lets callers borrow a resource's internal guard as a [`ScopedLock`], to keep a
//! release on another thread from completing while a block of code runs.
//!
//! [`Scoped`] and [`FactoryScoped`] are small helpers that tie an exit action or a factory-allocated
//! value to the same lifecycle.
//!
//! # Deadlocks
//! Guards are per resource and re-entrant. The only place this crate nests them is a temp file
//! manager releasing its files, which always takes the manager's guard before a file's. Holding the
//! guards of two other resources at once is up to the caller, who is then responsible for acquiring
//! them in a consistent order across threads.

mod dispose;
mod error;
mod factory_scoped;
mod safe_disposable;
mod scoped;
mod scoped_lock;

pub use dispose::*;
pub(crate) use dispose::impl_dispose_via;
pub use error::*;
pub use factory_scoped::*;
pub use safe_disposable::*;
pub use scoped::*;
pub use scoped_lock::*;
