use async_trait::async_trait;
use bollard::container::{ListContainersOptions, StartContainerOptions, StopContainerOptions};
use bollard::{Docker, API_DEFAULT_VERSION};
use tracing::{debug, info};

use crate::config::DockerConfig;
use crate::errors::container::ContainerClientError;
use crate::models::container::ContainerSummary;
use crate::repositories::container_client::ContainerClient;

const CONNECT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct DockerClient {
    docker: Docker,
    stop_timeout_secs: i64,
}

impl DockerClient {
    pub fn new(config: &DockerConfig) -> Result<DockerClient, ContainerClientError> {
        let docker = match &config.socket_path {
            Some(path) => {
                info!(socket = %path, "Creating Docker client");
                Docker::connect_with_socket(path, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
            }
            None => {
                info!("Creating Docker client with local defaults");
                Docker::connect_with_local_defaults()
            }
        }
        .map_err(|e| ContainerClientError::RegistryUnavailable {
            reason: format!("Failed to connect to Docker: {}", e),
        })?;

        Ok(Self {
            docker,
            stop_timeout_secs: config.stop_timeout_secs,
        })
    }
}

#[async_trait]
impl ContainerClient for DockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, ContainerClientError> {
        debug!("Listing containers");
        let options = Some(ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        });

        let containers = self
            .docker
            .list_containers(options)
            .await
            .map_err(|e| ContainerClientError::RegistryUnavailable {
                reason: e.to_string(),
            })?
            .into_iter()
            .map(ContainerSummary::from)
            .collect();

        Ok(containers)
    }

    async fn start_container(&self, id: &str) -> Result<(), ContainerClientError> {
        info!(container_id = %id, "Starting container");
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ContainerClientError::StartFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    async fn stop_container(&self, id: &str) -> Result<(), ContainerClientError> {
        info!(container_id = %id, "Stopping container");
        let options = Some(StopContainerOptions {
            t: self.stop_timeout_secs,
        });

        self.docker
            .stop_container(id, options)
            .await
            .map_err(|e| ContainerClientError::StopFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }
}
