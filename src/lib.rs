//! A small general-purpose utility crate: maps of collections, a handful of extension traits and,
//! most importantly, a toolkit for managing the lifetime of resources that need explicit release.
//!
//! # Disposal
//! Rust already releases resources deterministically when their owner goes out of scope, so
//! [`disposably`] doesn't try to replace [`Drop`]. Instead, it adds the things `Drop` can't give
//! you on a shared resource:
//! - An explicit, idempotent and thread-safe [`dispose`](disposably::Dispose::dispose) that can
//!   report errors to the caller.
//! - A query for whether a resource has been released, along with a liveness check that fails
//!   loudly.
//! - A borrowable internal guard, so that a caller can hold off a concurrent release for the
//!   duration of a block.
//!
//! Drop is still used as the fallback: if a resource is never explicitly disposed, the
//! finalization half of its release runs when it is dropped, and the explicit-only half doesn't.
//!
//! # Temporary Files
//! [`temp`] builds on top of the disposal primitive with a manager that hands out temporary files
//! (on disk or in memory) and releases every one that is still alive when the manager itself is
//! released.
//!
//! # Error Handling
//! Errors are returned via [`Result`]s with small, strongly typed error structs that implement
//! [`Error`](std::error::Error), combined into enums where an operation can fail in more than one
//! way. Misuse that can only be a programming mistake panics instead.
//!
//! The one place that intentionally swallows errors is
//! [`StrExtension::to_value_or`](ext::StrExtension::to_value_or), which exists to fall back to a
//! default when conversion fails.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its thin syscall wrappers. The disposal primitive uses
//! `parking_lot` for its re-entrant guard, diagnostics are emitted through `tracing` and the error
//! types use `derive_more` to remove some very repetitive programming.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;
#[cfg(feature = "disposably")]
pub mod disposably;
#[cfg(feature = "ext")]
pub mod ext;
#[cfg(all(feature = "fs", unix))]
pub mod fs;
#[cfg(all(feature = "temp", unix))]
pub mod temp;

pub(crate) mod util;
