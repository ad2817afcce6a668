use std::io;
use std::path::PathBuf;

use derive_more::{Display, Error, From, IsVariant};

#[derive(Debug, Display, Error)]
#[display("unable to create a new file under {} after {attempts} attempts", dir.display())]
pub struct AttemptsExhaustedError {
    pub dir: PathBuf,
    pub attempts: usize,
    /// The error that caused the final attempt to fail.
    pub source: io::Error,
}

#[derive(Debug, Display, From, Error, IsVariant)]
pub enum CreateUniqueError {
    Io(io::Error),
    AttemptsExhausted(AttemptsExhaustedError),
}
