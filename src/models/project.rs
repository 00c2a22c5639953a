use crate::models::container::{Container, ContainerState};

/// Containers sharing one compose project label.
///
/// The aggregate state is not stored; [`Project::state`] derives it from the containers on
/// every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub containers: Vec<Container>,
    pub is_toggling: bool,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            containers: Vec::new(),
            is_toggling: false,
        }
    }

    pub fn with_containers(name: impl Into<String>, containers: Vec<Container>) -> Self {
        Self {
            containers,
            ..Self::new(name)
        }
    }

    /// `Running` when every container runs, `Error` when only some do, `Stopped` otherwise.
    /// A project without containers is `Stopped`.
    pub fn state(&self) -> ContainerState {
        if self.containers.is_empty() {
            return ContainerState::Stopped;
        }

        if self.containers.iter().all(Container::is_running) {
            ContainerState::Running
        } else if self.containers.iter().any(Container::is_running) {
            ContainerState::Error
        } else {
            ContainerState::Stopped
        }
    }
}
