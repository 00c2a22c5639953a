pub mod codes;
pub mod container;
pub mod project;

use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::codes::ErrorCode;
use crate::errors::project::ProjectUsecaseError;

pub type DtoggleResult<T> = Result<T, DtoggleError>;

pub trait HasErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum DtoggleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Project(#[from] ProjectUsecaseError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HasErrorCode for DtoggleError {
    fn error_code(&self) -> &'static str {
        match self {
            DtoggleError::Config(e) => e.error_code(),
            DtoggleError::Project(e) => e.error_code(),
            DtoggleError::Internal(_) => ErrorCode::INTERNAL,
        }
    }
}
