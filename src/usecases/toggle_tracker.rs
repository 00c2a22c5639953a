use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::project::Project;

/// Bookkeeping for toggles in flight.
///
/// Each project name owns an async mutex held for the duration of a toggle sweep, so toggles of
/// the same project run one after another. A project is busy exactly while its mutex is held.
/// Containers are marked busy while their individual start/stop call is outstanding.
#[derive(Debug, Default)]
pub struct ToggleTracker {
    projects: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    containers: Mutex<HashSet<String>>,
}

/// Held while a project is being toggled. Dropping it releases the project and forgets the
/// project's mutex once nobody else holds or waits for it.
#[derive(Debug)]
pub struct ProjectToggleGuard<'a> {
    tracker: &'a ToggleTracker,
    project_name: String,
    project_lock: Arc<AsyncMutex<()>>,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProjectToggleGuard<'_> {
    fn drop(&mut self) {
        let mut projects = lock(&self.tracker.projects);
        self.held.take();

        // One reference in the map, one in this guard.
        let idle = Arc::strong_count(&self.project_lock) == 2
            && projects
                .get(&self.project_name)
                .is_some_and(|entry| Arc::ptr_eq(entry, &self.project_lock));
        if idle {
            projects.remove(&self.project_name);
        }
    }
}

/// Held while a single container start/stop is outstanding.
#[derive(Debug)]
pub struct ContainerToggleGuard<'a> {
    tracker: &'a ToggleTracker,
    id: String,
}

impl Drop for ContainerToggleGuard<'_> {
    fn drop(&mut self) {
        lock(&self.tracker.containers).remove(&self.id);
    }
}

impl ToggleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other toggle of `project_name` is running, then claims the project.
    pub async fn acquire_project(&self, project_name: &str) -> ProjectToggleGuard<'_> {
        let project_lock = Arc::clone(
            lock(&self.projects)
                .entry(project_name.to_string())
                .or_default(),
        );

        // Built before waiting so a cancelled wait still cleans up the entry.
        let mut guard = ProjectToggleGuard {
            tracker: self,
            project_name: project_name.to_string(),
            project_lock: Arc::clone(&project_lock),
            held: None,
        };
        guard.held = Some(project_lock.lock_owned().await);
        guard
    }

    /// Number of projects with a toggle running or queued.
    pub fn tracked_projects(&self) -> usize {
        lock(&self.projects).len()
    }

    pub fn is_project_toggling(&self, project_name: &str) -> bool {
        lock(&self.projects)
            .get(project_name)
            .is_some_and(|project_lock| project_lock.try_lock().is_err())
    }

    pub fn begin_container(&self, container_id: &str) -> ContainerToggleGuard<'_> {
        lock(&self.containers).insert(container_id.to_string());
        ContainerToggleGuard {
            tracker: self,
            id: container_id.to_string(),
        }
    }

    pub fn is_container_toggling(&self, container_id: &str) -> bool {
        lock(&self.containers).contains(container_id)
    }

    /// Copies the in-flight marks onto freshly listed projects.
    pub fn mark(&self, projects: &mut [Project]) {
        for project in projects.iter_mut() {
            project.is_toggling = self.is_project_toggling(&project.name);
            for container in project.containers.iter_mut() {
                container.is_toggling = self.is_container_toggling(&container.id);
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
