use async_trait::async_trait;
use tracing::{info, warn};

use tododo_core::domain::task::{NewTask, TaskStatus};
use tododo_db::repositories::{RepositoryError, TaskRepository};
use tododo_slack::blocks::{self, Message};
use tododo_slack::commands::{CommandRouteError, TaskCommandService};

/// The store-backed command engine. Argument shape has already been checked
/// by the command router; this layer owns the store-call failure policy: an
/// ambiguous update renders the soft "no task with this ID" payload, every
/// other store failure propagates to the transport.
pub struct TaskCommandEngine<R> {
    repository: R,
}

impl<R> TaskCommandEngine<R>
where
    R: TaskRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn update_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<Message, CommandRouteError> {
        match self.repository.set_status(task_id, status).await {
            Ok(()) => {}
            Err(RepositoryError::AmbiguousUpdate { rows, .. }) => {
                warn!(
                    event_name = "task.command.status_missed",
                    task_id,
                    rows,
                    "status update matched no single task"
                );
                return Ok(blocks::no_such_task_message());
            }
            Err(error) => return Err(service_error(error)),
        }

        let task = self.repository.get_by_id(task_id).await.map_err(service_error)?;
        info!(
            event_name = "task.command.status_updated",
            task_id,
            status = task.status.as_str(),
            "task status updated"
        );
        Ok(blocks::task_status_message(&task.title, task.status.as_str()))
    }
}

#[async_trait]
impl<R> TaskCommandService for TaskCommandEngine<R>
where
    R: TaskRepository,
{
    async fn add_task(
        &self,
        title: String,
        channel_id: &str,
    ) -> Result<Message, CommandRouteError> {
        let task = NewTask::new(title, channel_id);
        let task_id = self.repository.persist(&task).await.map_err(service_error)?;
        info!(event_name = "task.command.added", task_id, channel_id, "task created");

        Ok(blocks::task_added_message(&task.title))
    }

    async fn show_tasks(&self, channel_id: &str) -> Result<Message, CommandRouteError> {
        let tasks = self.repository.get_all_in_channel(channel_id).await.map_err(service_error)?;

        Ok(blocks::task_list_message(&tasks))
    }

    async fn assign_task(
        &self,
        task_id: i64,
        assignee_id: &str,
    ) -> Result<Message, CommandRouteError> {
        match self.repository.assign_to(task_id, assignee_id).await {
            Ok(()) => {}
            Err(RepositoryError::AmbiguousUpdate { rows, .. }) => {
                warn!(
                    event_name = "task.command.assign_missed",
                    task_id,
                    rows,
                    "assign matched no single task"
                );
                return Ok(blocks::no_such_task_message());
            }
            Err(error) => return Err(service_error(error)),
        }

        let task = self.repository.get_by_id(task_id).await.map_err(service_error)?;
        info!(
            event_name = "task.command.assigned",
            task_id,
            assignee_id = task.assignee_id.as_str(),
            "task assigned"
        );
        Ok(blocks::task_assigned_message(&task.title, &task.assignee_id))
    }

    async fn start_task(&self, task_id: i64) -> Result<Message, CommandRouteError> {
        self.update_status(task_id, TaskStatus::InProgress).await
    }

    async fn finish_task(&self, task_id: i64) -> Result<Message, CommandRouteError> {
        self.update_status(task_id, TaskStatus::Done).await
    }
}

fn service_error(error: RepositoryError) -> CommandRouteError {
    CommandRouteError::Service(error.to_string())
}
