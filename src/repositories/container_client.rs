use async_trait::async_trait;
use mockall::automock;

use crate::errors::container::ContainerClientError;
use crate::models::container::ContainerSummary;

/// Access to the container engine, keyed by container id.
#[automock]
#[async_trait]
pub trait ContainerClient: Send + Sync {
    /// Every container the engine knows about, stopped ones included.
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, ContainerClientError>;
    async fn start_container(&self, id: &str) -> Result<(), ContainerClientError>;
    async fn stop_container(&self, id: &str) -> Result<(), ContainerClientError>;
}
