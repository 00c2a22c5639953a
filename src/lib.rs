pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod telemetry;
pub mod usecases;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::handlers::project::{get_project_containers, get_projects, toggle_project};
use crate::repositories::container_client::ContainerClient;
use crate::repositories::docker_client::DockerClient;
use crate::telemetry::initialize_telemetry_with_configuration;
use crate::usecases::project::ProjectUsecase;

pub fn router<C>(project_usecase: ProjectUsecase<C>) -> Router
where
    C: ContainerClient + 'static,
{
    Router::new()
        .route("/projects", get(get_projects::<C>))
        .route("/projects/{name}/containers", get(get_project_containers::<C>))
        .route("/projects/{name}/toggle", post(toggle_project::<C>))
        .with_state(project_usecase)
}

pub async fn start() -> Result<()> {
    let config = Config::from_env().context("Loading configuration")?;
    let _telemetry = initialize_telemetry_with_configuration(&config.telemetry)?;

    let docker_client = Arc::new(DockerClient::new(&config.docker)?);
    let project_usecase = ProjectUsecase::new(docker_client, config.docker.project_label.clone());

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Binding {}", address))?;
    info!(%address, "Listening");

    axum::serve(listener, router(project_usecase))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
