use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::fs::{self, CreateUniqueError};

pub trait PathExtension {
    /// Creates a new, uniquely named, empty file in this directory, creating the directory first
    /// if needed. The caller is responsible for deleting the file.
    ///
    /// `max_attempts` bounds how many names are tried before giving up, `None` retries until a
    /// file is created or the directory can't be created.
    fn create_temp_file(&self, max_attempts: Option<NonZeroUsize>) -> Result<PathBuf, CreateUniqueError>;
}

impl PathExtension for Path {
    fn create_temp_file(&self, max_attempts: Option<NonZeroUsize>) -> Result<PathBuf, CreateUniqueError> {
        fs::create_unique(self, max_attempts)
    }
}
