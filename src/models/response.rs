use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::models::container::Container;
use crate::models::project::Project;

#[derive(Debug, Clone, Serialize)]
pub struct GenericResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<T>>,
}

impl<T> GenericResponse<T> {
    pub fn result(result: T) -> Self {
        GenericResponse {
            result: Some(result),
            results: None,
        }
    }

    pub fn results(results: Vec<T>) -> Self {
        GenericResponse {
            result: None,
            results: Some(results),
        }
    }
}

impl<T> IntoResponse for GenericResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerView {
    pub id: String,
    pub name: String,
    pub state: &'static str,
    pub is_toggling: bool,
}

impl From<&Container> for ContainerView {
    fn from(container: &Container) -> Self {
        ContainerView {
            id: container.id.clone(),
            name: container.name.clone(),
            state: container.state.as_str(),
            is_toggling: container.is_toggling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub state: &'static str,
    pub is_toggling: bool,
    pub containers: Vec<ContainerView>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        ProjectView {
            name: project.name.clone(),
            state: project.state().as_str(),
            is_toggling: project.is_toggling,
            containers: project.containers.iter().map(ContainerView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub project: String,
    pub success: bool,
}
