use std::io;

use derive_more::{Display, Error, From, IsVariant};

use crate::disposably::AlreadyReleasedError;
use crate::fs::{AttemptsExhaustedError, CreateUniqueError};

#[derive(Debug, Display, From, Error, IsVariant)]
pub enum TempFileError {
    AlreadyReleased(AlreadyReleasedError),
    Io(io::Error),
    AttemptsExhausted(AttemptsExhaustedError),
}

impl From<CreateUniqueError> for TempFileError {
    fn from(value: CreateUniqueError) -> Self {
        match value {
            CreateUniqueError::Io(e) => e.into(),
            CreateUniqueError::AttemptsExhausted(e) => e.into(),
        }
    }
}
