use std::collections::HashMap;
use std::fmt;

/// Label docker compose puts on every container it creates.
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";

/// Domain state of a single container.
///
/// Variant order is the sort order used for project listings: projects that are fully up
/// come first, mixed ones next, stopped ones last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerState {
    Running,
    Error,
    Stopped,
}

impl ContainerState {
    /// Maps a raw engine status string onto a domain state.
    ///
    /// Anything the engine reports other than `running`, `exited` or `error` (`paused`,
    /// `restarting`, `dead`, `created`, ...) is treated as `Error` so it is never mistaken
    /// for a healthy container.
    pub fn classify(raw_status: &str) -> ContainerState {
        match raw_status {
            "running" => ContainerState::Running,
            "exited" => ContainerState::Stopped,
            "error" => ContainerState::Error,
            _ => ContainerState::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Running => "running",
            ContainerState::Error => "error",
            ContainerState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw container record as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub labels: HashMap<String, String>,
}

impl ContainerSummary {
    /// Value of `label`, or the empty string when the container does not carry it.
    pub fn label_or_empty(&self, label: &str) -> &str {
        self.labels.get(label).map(String::as_str).unwrap_or("")
    }
}

impl From<bollard::models::ContainerSummary> for ContainerSummary {
    fn from(value: bollard::models::ContainerSummary) -> Self {
        let name = value
            .names
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|name| name.trim_start_matches('/').to_string())
            .unwrap_or_default();

        ContainerSummary {
            id: value.id.unwrap_or_default(),
            name,
            status: value.state.unwrap_or_default(),
            labels: value.labels.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub state: ContainerState,
    pub is_toggling: bool,
}

impl Container {
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: ContainerState) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state,
            is_toggling: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }
}

impl From<&ContainerSummary> for Container {
    fn from(summary: &ContainerSummary) -> Self {
        Container::new(
            summary.id.clone(),
            summary.name.clone(),
            ContainerState::classify(&summary.status),
        )
    }
}
