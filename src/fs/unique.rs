use std::fs;
use std::hash::{BuildHasher, RandomState};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use libc::{EEXIST, EINTR, O_CREAT, O_EXCL, O_WRONLY};

use super::{AttemptsExhaustedError, CreateUniqueError, DEFAULT_MODE, Fd};

const NAME_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz012345";

/// Generates a random file name in 8.3 form, e.g. `k2vqdx0e.3ab`. The name isn't checked against
/// the filesystem.
pub fn random_file_name() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    let mut bits = RandomState::new().hash_one((
        COUNTER.fetch_add(1, Ordering::Relaxed),
        process::id(),
        nanos,
    ));

    let mut name = String::with_capacity(12);
    for i in 0..11 {
        if i == 8 {
            name.push('.');
        }
        name.push(NAME_ALPHABET[(bits & 0x1f) as usize] as char);
        bits >>= 5;
    }
    name
}

/// Creates a uniquely named, empty file under `dir` and returns its path. The directory (and any
/// missing parents) are created first.
///
/// Each attempt picks a new random name and creates the file exclusively, so an existing file is
/// never reused. Attempts that clash with an existing name are retried until `max_attempts` is
/// reached, or forever if it is `None`. If every attempt clashes, the last failure is returned as
/// the source of an [`AttemptsExhaustedError`]. Any other failure, including failure to create the
/// directory itself, is returned immediately.
///
/// The caller owns the new file and is responsible for removing it.
pub fn create_unique(
    dir: &Path,
    max_attempts: Option<NonZeroUsize>,
) -> Result<PathBuf, CreateUniqueError> {
    create_unique_named(dir, max_attempts, random_file_name)
}

pub(crate) fn create_unique_named(
    dir: &Path,
    max_attempts: Option<NonZeroUsize>,
    mut next_name: impl FnMut() -> String,
) -> Result<PathBuf, CreateUniqueError> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        fs::create_dir_all(dir)?;

        let candidate = dir.join(next_name());
        let error = match Fd::open(&candidate, O_WRONLY | O_CREAT | O_EXCL, DEFAULT_MODE) {
            Ok(fd) => {
                fd.close()?;
                return Ok(candidate);
            },
            Err(error) => error,
        };

        if !matches!(error.raw_os_error(), Some(EEXIST | EINTR)) {
            return Err(error.into());
        }
        tracing::trace!(path = %candidate.display(), %error, attempts, "unique file attempt failed");

        if max_attempts.is_some_and(|max| attempts >= max.get()) {
            Err(AttemptsExhaustedError {
                dir: dir.to_owned(),
                attempts,
                source: error,
            })?
        }
    }
}
