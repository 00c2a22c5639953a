use thiserror::Error;

use crate::errors::container::ContainerClientError;

#[derive(Debug, Error)]
pub enum ProjectUsecaseError {
    #[error("Failed to list projects: {source}")]
    ListProjectsFailed {
        #[from]
        source: ContainerClientError,
    },

    #[error("Project '{project_name}' not found")]
    ProjectNotFound { project_name: String },
}

impl ProjectUsecaseError {
    pub fn error_code(&self) -> &'static str {
        use crate::errors::codes::ErrorCode;

        match self {
            ProjectUsecaseError::ListProjectsFailed { source } => match source {
                ContainerClientError::RegistryUnavailable { .. } => source.error_code(),
                _ => ErrorCode::PROJECT_LIST_FAILED,
            },
            ProjectUsecaseError::ProjectNotFound { .. } => ErrorCode::PROJECT_NOT_FOUND,
        }
    }
}
