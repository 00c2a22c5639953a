use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::errors::project::ProjectUsecaseError;
use crate::errors::DtoggleResult;
use crate::models::container::{Container, ContainerState, ContainerSummary};
use crate::models::project::Project;
use crate::repositories::container_client::ContainerClient;
use crate::usecases::toggle_tracker::ToggleTracker;

/// Which call a toggle issues for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Start,
    Stop,
}

impl ToggleAction {
    /// Running and erroring containers are stopped, stopped ones started. `force_stop` turns
    /// every decision into a stop, including for containers that are already stopped.
    pub fn for_container(state: ContainerState, force_stop: bool) -> ToggleAction {
        match state {
            ContainerState::Running | ContainerState::Error => ToggleAction::Stop,
            ContainerState::Stopped if force_stop => ToggleAction::Stop,
            ContainerState::Stopped => ToggleAction::Start,
        }
    }
}

pub struct ProjectUsecase<C>
where
    C: ContainerClient + 'static,
{
    pub container_client: Arc<C>,
    pub tracker: Arc<ToggleTracker>,
    pub project_label: String,
}

impl<C> Clone for ProjectUsecase<C>
where
    C: ContainerClient + 'static,
{
    fn clone(&self) -> Self {
        Self {
            container_client: Arc::clone(&self.container_client),
            tracker: Arc::clone(&self.tracker),
            project_label: self.project_label.clone(),
        }
    }
}

impl<C> ProjectUsecase<C>
where
    C: ContainerClient + 'static,
{
    pub fn new(container_client: Arc<C>, project_label: impl Into<String>) -> Self {
        Self {
            container_client,
            tracker: Arc::new(ToggleTracker::new()),
            project_label: project_label.into(),
        }
    }

    /// Fetches every container and groups them into sorted projects. Nothing is cached.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> DtoggleResult<Vec<Project>> {
        let containers = self
            .container_client
            .list_containers()
            .await
            .map_err(ProjectUsecaseError::from)?;

        let mut projects = build_projects(&containers, &self.project_label);
        self.tracker.mark(&mut projects);

        debug!(
            containers = containers.len(),
            projects = projects.len(),
            "Listed projects"
        );
        Ok(projects)
    }

    pub async fn find_project(&self, project_name: &str) -> DtoggleResult<Project> {
        self.list_projects()
            .await?
            .into_iter()
            .find(|project| project.name == project_name)
            .ok_or_else(|| {
                ProjectUsecaseError::ProjectNotFound {
                    project_name: project_name.to_string(),
                }
                .into()
            })
    }

    /// Toggles every container of `project` in stored order.
    ///
    /// Whether the sweep is a forced stop is decided once from the state at call time. Returns
    /// `true` only when every container call succeeded; failed containers do not stop the sweep.
    #[instrument(skip(self, project), fields(project_name = %project.name))]
    pub async fn toggle_project(&self, project: &mut Project) -> bool {
        let _guard = self.tracker.acquire_project(&project.name).await;
        self.sweep(project).await
    }

    /// Claims `project_name`, then re-lists so the sweep decides from current state.
    #[instrument(skip(self))]
    pub async fn toggle_project_by_name(&self, project_name: &str) -> DtoggleResult<bool> {
        let _guard = self.tracker.acquire_project(project_name).await;
        let mut project = self.find_project(project_name).await?;
        Ok(self.sweep(&mut project).await)
    }

    async fn sweep(&self, project: &mut Project) -> bool {
        project.is_toggling = true;
        let force_stop = project.state() == ContainerState::Error;
        info!(
            containers = project.containers.len(),
            force_stop, "Toggling project"
        );

        let mut result = true;
        for container in project.containers.iter_mut() {
            if !self.toggle_container(container, force_stop).await {
                result = false;
            }
        }

        project.is_toggling = false;
        info!(success = result, "Toggled project");
        result
    }

    /// Starts or stops one container. Its `state` is left untouched either way; the next
    /// listing reports what the engine actually did.
    pub async fn toggle_container(&self, container: &mut Container, force_stop: bool) -> bool {
        let action = ToggleAction::for_container(container.state, force_stop);

        container.is_toggling = true;
        let outcome = {
            let _in_flight = self.tracker.begin_container(&container.id);
            match action {
                ToggleAction::Start => self.container_client.start_container(&container.id).await,
                ToggleAction::Stop => self.container_client.stop_container(&container.id).await,
            }
        };
        container.is_toggling = false;

        match outcome {
            Ok(()) => {
                debug!(container = %container.name, ?action, "Container toggled");
                true
            }
            Err(e) => {
                warn!(container = %container.name, ?action, error = %e, "Container toggle failed");
                false
            }
        }
    }
}

/// Groups containers by the value of `label` and sorts the projects by state, then name.
///
/// Projects and containers keep the order in which they were first seen. Containers without
/// the label are grouped under the empty name.
pub fn build_projects(containers: &[ContainerSummary], label: &str) -> Vec<Project> {
    let mut projects: Vec<Project> = Vec::new();

    for summary in containers {
        let container = Container::from(summary);
        let project_name = summary.label_or_empty(label);

        match projects
            .iter_mut()
            .find(|project| project.name == project_name)
        {
            Some(project) => project.containers.push(container),
            None => projects.push(Project::with_containers(project_name, vec![container])),
        }
    }

    projects.sort_by(|a, b| a.state().cmp(&b.state()).then_with(|| a.name.cmp(&b.name)));
    projects
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mockall::predicate::eq;
    use mockall::Sequence;

    use super::*;
    use crate::errors::container::ContainerClientError;
    use crate::errors::DtoggleError;
    use crate::models::container::COMPOSE_PROJECT_LABEL;
    use crate::repositories::container_client::MockContainerClient;

    fn summary(id: &str, status: &str, project: Option<&str>) -> ContainerSummary {
        let labels = project
            .map(|p| HashMap::from([(COMPOSE_PROJECT_LABEL.to_string(), p.to_string())]))
            .unwrap_or_default();

        ContainerSummary {
            id: id.to_string(),
            name: format!("{id}-name"),
            status: status.to_string(),
            labels,
        }
    }

    fn usecase(client: MockContainerClient) -> ProjectUsecase<MockContainerClient> {
        ProjectUsecase::new(Arc::new(client), COMPOSE_PROJECT_LABEL)
    }

    fn project_of(name: &str, states: &[(&str, ContainerState)]) -> Project {
        Project::with_containers(
            name,
            states
                .iter()
                .map(|(id, state)| Container::new(*id, format!("{id}-name"), *state))
                .collect(),
        )
    }

    #[test]
    fn given_two_web_containers_and_one_unlabelled_when_build_projects_then_return_two_projects() {
        let containers = vec![
            summary("a", "running", Some("web")),
            summary("b", "running", None),
            summary("c", "running", Some("web")),
        ];

        let projects = build_projects(&containers, COMPOSE_PROJECT_LABEL);

        assert_eq!(projects.len(), 2);
        let web = projects.iter().find(|p| p.name == "web").unwrap();
        let ids: Vec<_> = web.containers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        let unlabelled = projects.iter().find(|p| p.name.is_empty()).unwrap();
        assert_eq!(unlabelled.containers.len(), 1);
    }

    #[test]
    fn given_projects_in_each_state_when_build_projects_then_sort_by_state_before_name() {
        let containers = vec![
            summary("b1", "exited", Some("b")),
            summary("a1", "running", Some("a")),
            summary("c1", "running", Some("c")),
            summary("c2", "exited", Some("c")),
        ];

        let projects = build_projects(&containers, COMPOSE_PROJECT_LABEL);

        let order: Vec<_> = projects
            .iter()
            .map(|p| (p.state(), p.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (ContainerState::Running, "a"),
                (ContainerState::Error, "c"),
                (ContainerState::Stopped, "b"),
            ]
        );
    }

    #[test]
    fn given_projects_in_same_state_when_build_projects_then_sort_by_name() {
        let containers = vec![
            summary("1", "exited", Some("zeta")),
            summary("2", "exited", Some("alpha")),
            summary("3", "exited", Some("mid")),
        ];

        let projects = build_projects(&containers, COMPOSE_PROJECT_LABEL);

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn given_unknown_status_when_build_projects_then_container_is_error() {
        let containers = vec![summary("a", "paused", Some("web"))];

        let projects = build_projects(&containers, COMPOSE_PROJECT_LABEL);

        assert_eq!(projects[0].containers[0].state, ContainerState::Error);
        assert_eq!(projects[0].state(), ContainerState::Stopped);
    }

    #[test]
    fn given_no_containers_when_build_projects_then_return_empty_list() {
        assert!(build_projects(&[], COMPOSE_PROJECT_LABEL).is_empty());
    }

    #[test]
    fn given_stopped_container_when_action_then_start_unless_forced() {
        assert_eq!(
            ToggleAction::for_container(ContainerState::Stopped, false),
            ToggleAction::Start
        );
        assert_eq!(
            ToggleAction::for_container(ContainerState::Stopped, true),
            ToggleAction::Stop
        );
    }

    #[test]
    fn given_running_or_error_container_when_action_then_always_stop() {
        for force_stop in [false, true] {
            assert_eq!(
                ToggleAction::for_container(ContainerState::Running, force_stop),
                ToggleAction::Stop
            );
            assert_eq!(
                ToggleAction::for_container(ContainerState::Error, force_stop),
                ToggleAction::Stop
            );
        }
    }

    #[tokio::test]
    async fn given_registry_listing_when_list_projects_twice_then_results_are_equal() {
        let mut client = MockContainerClient::new();
        client.expect_list_containers().times(2).returning(|| {
            Ok(vec![
                summary("a", "running", Some("web")),
                summary("b", "exited", Some("db")),
                summary("c", "exited", None),
            ])
        });
        let usecase = usecase(client);

        let first = usecase.list_projects().await.unwrap();
        let second = usecase.list_projects().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[tokio::test]
    async fn given_registry_unavailable_when_list_projects_then_propagate_error() {
        let mut client = MockContainerClient::new();
        client.expect_list_containers().returning(|| {
            Err(ContainerClientError::RegistryUnavailable {
                reason: "connection refused".to_string(),
            })
        });

        let result = usecase(client).list_projects().await;

        assert!(matches!(
            result,
            Err(DtoggleError::Project(ProjectUsecaseError::ListProjectsFailed {
                source: ContainerClientError::RegistryUnavailable { .. }
            }))
        ));
    }

    #[tokio::test]
    async fn given_running_container_when_toggle_container_then_stop_it() {
        let mut client = MockContainerClient::new();
        client
            .expect_stop_container()
            .with(eq("a"))
            .times(1)
            .returning(|_| Ok(()));
        client.expect_start_container().never();
        let mut container = Container::new("a", "web-a", ContainerState::Running);

        let result = usecase(client).toggle_container(&mut container, false).await;

        assert!(result);
        assert!(!container.is_toggling);
        assert_eq!(container.state, ContainerState::Running);
    }

    #[tokio::test]
    async fn given_stopped_container_when_toggle_container_then_start_it() {
        let mut client = MockContainerClient::new();
        client
            .expect_start_container()
            .with(eq("a"))
            .times(1)
            .returning(|_| Ok(()));
        client.expect_stop_container().never();
        let mut container = Container::new("a", "web-a", ContainerState::Stopped);

        assert!(usecase(client).toggle_container(&mut container, false).await);
    }

    #[tokio::test]
    async fn given_stopped_container_and_force_stop_when_toggle_container_then_stop_it() {
        let mut client = MockContainerClient::new();
        client
            .expect_stop_container()
            .with(eq("a"))
            .times(1)
            .returning(|_| Ok(()));
        client.expect_start_container().never();
        let mut container = Container::new("a", "web-a", ContainerState::Stopped);

        assert!(usecase(client).toggle_container(&mut container, true).await);
    }

    #[tokio::test]
    async fn given_failing_engine_when_toggle_container_then_return_false_and_keep_state() {
        let mut client = MockContainerClient::new();
        client.expect_start_container().returning(|id| {
            Err(ContainerClientError::StartFailed {
                id: id.to_string(),
                reason: "no such image".to_string(),
            })
        });
        let mut container = Container::new("a", "web-a", ContainerState::Stopped);

        let result = usecase(client).toggle_container(&mut container, false).await;

        assert!(!result);
        assert!(!container.is_toggling);
        assert_eq!(container.state, ContainerState::Stopped);
    }

    #[tokio::test]
    async fn given_mixed_project_when_toggle_project_then_stop_every_container_in_order() {
        let mut seq = Sequence::new();
        let mut client = MockContainerClient::new();
        client
            .expect_stop_container()
            .with(eq("a"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_stop_container()
            .with(eq("b"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client.expect_start_container().never();
        let mut project = project_of(
            "web",
            &[("a", ContainerState::Running), ("b", ContainerState::Stopped)],
        );

        let result = usecase(client).toggle_project(&mut project).await;

        assert!(result);
        assert!(!project.is_toggling);
    }

    #[tokio::test]
    async fn given_stopped_project_when_toggle_project_then_start_every_container() {
        let mut client = MockContainerClient::new();
        client
            .expect_start_container()
            .times(2)
            .returning(|_| Ok(()));
        client.expect_stop_container().never();
        let mut project = project_of(
            "web",
            &[("a", ContainerState::Stopped), ("b", ContainerState::Stopped)],
        );

        assert!(usecase(client).toggle_project(&mut project).await);
    }

    #[tokio::test]
    async fn given_running_project_when_toggle_project_then_stop_every_container() {
        let mut client = MockContainerClient::new();
        client.expect_stop_container().times(2).returning(|_| Ok(()));
        client.expect_start_container().never();
        let mut project = project_of(
            "web",
            &[("a", ContainerState::Running), ("b", ContainerState::Running)],
        );

        assert!(usecase(client).toggle_project(&mut project).await);
    }

    #[tokio::test]
    async fn given_first_container_fails_when_toggle_project_then_attempt_rest_and_return_false() {
        let mut client = MockContainerClient::new();
        client
            .expect_stop_container()
            .with(eq("a"))
            .times(1)
            .returning(|id| {
                Err(ContainerClientError::StopFailed {
                    id: id.to_string(),
                    reason: "timeout".to_string(),
                })
            });
        client
            .expect_stop_container()
            .with(eq("b"))
            .times(1)
            .returning(|_| Ok(()));
        let mut project = project_of(
            "web",
            &[("a", ContainerState::Running), ("b", ContainerState::Running)],
        );
        let usecase = usecase(client);

        let result = usecase.toggle_project(&mut project).await;

        assert!(!result);
        assert!(!project.is_toggling);
        assert!(!usecase.tracker.is_project_toggling("web"));
        assert!(project.containers.iter().all(|c| !c.is_toggling));
    }

    #[tokio::test]
    async fn given_existing_project_when_toggle_by_name_then_use_fresh_listing() {
        let mut client = MockContainerClient::new();
        client.expect_list_containers().times(1).returning(|| {
            Ok(vec![
                summary("a", "exited", Some("web")),
                summary("b", "running", Some("db")),
            ])
        });
        client
            .expect_start_container()
            .with(eq("a"))
            .times(1)
            .returning(|_| Ok(()));
        client.expect_stop_container().never();

        let result = usecase(client).toggle_project_by_name("web").await;

        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn given_unknown_project_when_toggle_by_name_then_return_not_found() {
        let mut client = MockContainerClient::new();
        client
            .expect_list_containers()
            .returning(|| Ok(vec![summary("a", "running", Some("web"))]));

        let result = usecase(client).toggle_project_by_name("nope").await;

        assert!(matches!(
            result,
            Err(DtoggleError::Project(ProjectUsecaseError::ProjectNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn given_many_unknown_projects_when_toggle_by_name_then_tracker_keeps_nothing() {
        let mut client = MockContainerClient::new();
        client.expect_list_containers().returning(|| Ok(vec![]));
        let usecase = usecase(client);

        for i in 0..1000 {
            let result = usecase.toggle_project_by_name(&format!("nope-{i}")).await;
            assert!(result.is_err());
        }

        assert_eq!(usecase.tracker.tracked_projects(), 0);
    }

    #[tokio::test]
    async fn given_completed_toggle_when_finished_then_tracker_keeps_nothing() {
        let mut client = MockContainerClient::new();
        client
            .expect_list_containers()
            .returning(|| Ok(vec![summary("a", "running", Some("web"))]));
        client.expect_stop_container().times(2).returning(|_| Ok(()));
        let usecase = usecase(client);

        assert!(usecase.toggle_project_by_name("web").await.unwrap());
        let mut project = usecase.find_project("web").await.unwrap();
        assert!(usecase.toggle_project(&mut project).await);

        assert_eq!(usecase.tracker.tracked_projects(), 0);
    }
}
