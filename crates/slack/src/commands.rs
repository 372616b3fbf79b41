use async_trait::async_trait;
use thiserror::Error;

use crate::blocks::{self, Message};

pub const ASSIGN_USAGE_TEXT: &str = "Bad arguments. Please enter /tododo-assign [task ID] [@user]";
pub const START_USAGE_TEXT: &str = "Bad arguments. Please enter /tododo-start [task ID]";
pub const DONE_USAGE_TEXT: &str = "Bad arguments. Please enter /tododo-done [task ID]";

/// A slash-command request as handed over by the webhook transport, already
/// token-verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashCommandPayload {
    pub command: String,
    pub text: String,
    pub channel_id: String,
    pub user_id: String,
    pub request_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskCommand {
    Help,
    Add { title: String },
    Show,
    Assign { task_id: i64, assignee_id: String },
    Start { task_id: i64 },
    Done { task_id: i64 },
    Invalid { usage: &'static str },
    Unknown { command: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandRouteError {
    #[error("unrecognized slash command: {0}")]
    UnrecognizedCommand(String),
    #[error("command service failed: {0}")]
    Service(String),
}

/// Maps the command name and its free-text tail onto a typed command. The
/// match is case-sensitive; argument-shape violations collapse to `Invalid`
/// carrying the usage text to render.
pub fn classify_task_command(command: &str, text: &str) -> TaskCommand {
    match command {
        "/tododo-help" => TaskCommand::Help,
        "/tododo-add" => TaskCommand::Add { title: text.to_owned() },
        "/tododo-show" => TaskCommand::Show,
        "/tododo-assign" => match parse_assign_args(text) {
            Some((task_id, assignee_id)) => TaskCommand::Assign { task_id, assignee_id },
            None => TaskCommand::Invalid { usage: ASSIGN_USAGE_TEXT },
        },
        "/tododo-start" => match parse_task_id_arg(text) {
            Some(task_id) => TaskCommand::Start { task_id },
            None => TaskCommand::Invalid { usage: START_USAGE_TEXT },
        },
        "/tododo-done" => match parse_task_id_arg(text) {
            Some(task_id) => TaskCommand::Done { task_id },
            None => TaskCommand::Invalid { usage: DONE_USAGE_TEXT },
        },
        other => TaskCommand::Unknown { command: other.to_owned() },
    }
}

// Argument tails split on single spaces, so doubled spaces produce empty
// tokens and fail the shape check.

fn parse_assign_args(text: &str) -> Option<(i64, String)> {
    let args: Vec<&str> = text.split(' ').collect();
    if args.len() != 2 {
        return None;
    }

    let task_id = args[0].parse::<i64>().ok().filter(|id| *id >= 1)?;
    Some((task_id, args[1].to_owned()))
}

fn parse_task_id_arg(text: &str) -> Option<i64> {
    let args: Vec<&str> = text.split(' ').collect();
    if args.len() != 1 {
        return None;
    }

    args[0].parse::<i64>().ok().filter(|id| *id >= 1)
}

/// Routes a verified payload: help and soft errors are answered here without
/// touching the service; the four store-backed commands dispatch to it; an
/// unrecognized command name is the only parse outcome that propagates as an
/// error.
pub struct CommandRouter<S> {
    service: S,
}

impl<S> CommandRouter<S>
where
    S: TaskCommandService,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn route(&self, payload: SlashCommandPayload) -> Result<Message, CommandRouteError> {
        match classify_task_command(&payload.command, &payload.text) {
            TaskCommand::Help => Ok(blocks::help_message()),
            TaskCommand::Add { title } => self.service.add_task(title, &payload.channel_id).await,
            TaskCommand::Show => self.service.show_tasks(&payload.channel_id).await,
            TaskCommand::Assign { task_id, assignee_id } => {
                self.service.assign_task(task_id, &assignee_id).await
            }
            TaskCommand::Start { task_id } => self.service.start_task(task_id).await,
            TaskCommand::Done { task_id } => self.service.finish_task(task_id).await,
            TaskCommand::Invalid { usage } => Ok(blocks::bad_arguments_message(usage)),
            TaskCommand::Unknown { command } => {
                Err(CommandRouteError::UnrecognizedCommand(command))
            }
        }
    }
}

#[async_trait]
pub trait TaskCommandService: Send + Sync {
    async fn add_task(&self, title: String, channel_id: &str)
        -> Result<Message, CommandRouteError>;

    async fn show_tasks(&self, channel_id: &str) -> Result<Message, CommandRouteError>;

    async fn assign_task(
        &self,
        task_id: i64,
        assignee_id: &str,
    ) -> Result<Message, CommandRouteError>;

    async fn start_task(&self, task_id: i64) -> Result<Message, CommandRouteError>;

    async fn finish_task(&self, task_id: i64) -> Result<Message, CommandRouteError>;
}

/// Store-free service for wiring and router tests.
#[derive(Default)]
pub struct NoopTaskCommandService;

#[async_trait]
impl TaskCommandService for NoopTaskCommandService {
    async fn add_task(
        &self,
        title: String,
        _channel_id: &str,
    ) -> Result<Message, CommandRouteError> {
        Ok(blocks::task_added_message(&title))
    }

    async fn show_tasks(&self, _channel_id: &str) -> Result<Message, CommandRouteError> {
        Ok(blocks::task_list_message(&[]))
    }

    async fn assign_task(
        &self,
        task_id: i64,
        assignee_id: &str,
    ) -> Result<Message, CommandRouteError> {
        Ok(blocks::task_assigned_message(&format!("task {task_id}"), assignee_id))
    }

    async fn start_task(&self, task_id: i64) -> Result<Message, CommandRouteError> {
        Ok(blocks::task_status_message(&format!("task {task_id}"), "In Progress"))
    }

    async fn finish_task(&self, task_id: i64) -> Result<Message, CommandRouteError> {
        Ok(blocks::task_status_message(&format!("task {task_id}"), "Done"))
    }
}
