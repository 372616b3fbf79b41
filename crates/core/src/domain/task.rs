use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assignee value written for tasks nobody has claimed yet.
pub const UNASSIGNED: &str = "Not assigned";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Canonical string persisted in the `task.status` column. These three
    /// values are the only ones the engine ever writes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Open" => Ok(Self::Open),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown task status `{0}`")]
pub struct UnknownStatus(pub String);

/// A persisted task. The id is assigned by the store and a task never leaves
/// the channel it was created in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub status: TaskStatus,
    pub title: String,
    pub assignee_id: String,
    pub channel_id: String,
}

/// A task that has not been persisted yet, so it carries no id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    pub status: TaskStatus,
    pub title: String,
    pub assignee_id: String,
    pub channel_id: String,
}

impl NewTask {
    /// Any title is accepted verbatim, including the empty string.
    pub fn new(title: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Open,
            title: title.into(),
            assignee_id: UNASSIGNED.to_owned(),
            channel_id: channel_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, TaskStatus, UnknownStatus, UNASSIGNED};

    #[test]
    fn new_tasks_start_open_and_unassigned() {
        let task = NewTask::new("Buy milk", "C1");

        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.assignee_id, UNASSIGNED);
        assert_eq!(task.channel_id, "C1");
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert_eq!(
            "in progress".parse::<TaskStatus>(),
            Err(UnknownStatus("in progress".to_owned()))
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let error = "Blocked".parse::<TaskStatus>().expect_err("must reject");
        assert_eq!(error, UnknownStatus("Blocked".to_owned()));
    }
}
