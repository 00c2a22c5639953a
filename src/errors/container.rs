use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerClientError {
    #[error("Container registry unavailable: {reason}")]
    RegistryUnavailable { reason: String },

    #[error("Failed to start container {id}: {reason}")]
    StartFailed { id: String, reason: String },

    #[error("Failed to stop container {id}: {reason}")]
    StopFailed { id: String, reason: String },
}

impl ContainerClientError {
    pub fn error_code(&self) -> &'static str {
        use crate::errors::codes::ErrorCode;

        match self {
            ContainerClientError::RegistryUnavailable { .. } => ErrorCode::REGISTRY_UNAVAILABLE,
            ContainerClientError::StartFailed { .. } => ErrorCode::CONTAINER_START_FAILED,
            ContainerClientError::StopFailed { .. } => ErrorCode::CONTAINER_STOP_FAILED,
        }
    }
}
