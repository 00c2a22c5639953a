use axum::extract::{Path, State};

use crate::errors::DtoggleResult;
use crate::models::response::{ContainerView, GenericResponse, ProjectView, ToggleOutcome};
use crate::repositories::container_client::ContainerClient;
use crate::usecases::project::ProjectUsecase;

pub async fn get_projects<C>(
    State(usecase): State<ProjectUsecase<C>>,
) -> DtoggleResult<GenericResponse<ProjectView>>
where
    C: ContainerClient + 'static,
{
    let projects = usecase.list_projects().await?;
    Ok(GenericResponse::results(
        projects.iter().map(ProjectView::from).collect(),
    ))
}

pub async fn get_project_containers<C>(
    State(usecase): State<ProjectUsecase<C>>,
    Path(name): Path<String>,
) -> DtoggleResult<GenericResponse<ContainerView>>
where
    C: ContainerClient + 'static,
{
    let project = usecase.find_project(&name).await?;
    Ok(GenericResponse::results(
        project.containers.iter().map(ContainerView::from).collect(),
    ))
}

pub async fn toggle_project<C>(
    State(usecase): State<ProjectUsecase<C>>,
    Path(name): Path<String>,
) -> DtoggleResult<GenericResponse<ToggleOutcome>>
where
    C: ContainerClient + 'static,
{
    let success = usecase.toggle_project_by_name(&name).await?;
    Ok(GenericResponse::result(ToggleOutcome {
        project: name,
        success,
    }))
}
