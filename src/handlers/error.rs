use axum::http::StatusCode;
use axum::{response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use crate::errors::project::ProjectUsecaseError;
use crate::errors::{DtoggleError, HasErrorCode};

#[derive(Serialize)]
struct Problem<'a> {
    title: &'a str,
    detail: String,
    code: &'a str,
}

fn map_error(err: &DtoggleError) -> StatusCode {
    use DtoggleError::*;
    match err {
        Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Project(ProjectUsecaseError::ListProjectsFailed { .. }) => StatusCode::BAD_GATEWAY,
        Project(ProjectUsecaseError::ProjectNotFound { .. }) => StatusCode::NOT_FOUND,
        Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DtoggleError {
    fn into_response(self) -> axum::response::Response {
        let status = map_error(&self);
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "Request failed");
        }

        let problem = Problem {
            title: status.canonical_reason().unwrap_or("error"),
            detail: self.to_string(),
            code: self.error_code(),
        };
        (status, Json(problem)).into_response()
    }
}
