use serde::Serialize;

use tododo_core::domain::task::Task;

pub const HELP_HEADER: &str = "Welcome! ToDo do can:";
pub const SHOW_HEADER: &str = "ToDo";
pub const ADD_HEADER: &str = "ToDo: Add task";
pub const UPDATE_HEADER: &str = "ToDo: Task updated";
pub const NO_SUCH_TASK_TEXT: &str = "Bad arguments. No task with this ID";

const HELP_LINES: [&str; 5] = [
    "*/tododo-add [task]*: add a task to your ToDo list",
    "*/tododo-show*: show the tasks in your ToDo list",
    "*/tododo-assign [taskId] [@user]*: assign a task to a user",
    "*/tododo-start [taskId]*: start progress on a task",
    "*/tododo-done [taskId]*: finish a task",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

/// One Block Kit layout block. Sections carry either a text node or a fields
/// list; the absent node is omitted from the wire payload, never null.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Divider,
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<TextObject>>,
    },
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header { text: TextObject::plain(text) }
    }

    pub fn divider() -> Self {
        Self::Divider
    }

    pub fn section(text: TextObject) -> Self {
        Self::Section { text: Some(text), fields: None }
    }

    pub fn fields(fields: Vec<TextObject>) -> Self {
        Self::Section { text: None, fields: Some(fields) }
    }
}

/// The top-level response payload returned to Slack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub blocks: Vec<Block>,
}

/// Appends blocks in call order; the wire payload preserves that order.
#[derive(Default)]
pub struct MessageBuilder {
    blocks: Vec<Block>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::header(text));
        self
    }

    pub fn divider(mut self) -> Self {
        self.blocks.push(Block::divider());
        self
    }

    pub fn plain(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::section(TextObject::plain(text)));
        self
    }

    pub fn mrkdwn(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::section(TextObject::mrkdwn(text)));
        self
    }

    pub fn fields(mut self, fields: Vec<TextObject>) -> Self {
        self.blocks.push(Block::fields(fields));
        self
    }

    pub fn build(self) -> Message {
        Message { blocks: self.blocks }
    }
}

pub fn help_message() -> Message {
    let mut builder = MessageBuilder::new().header(HELP_HEADER).divider();
    for line in HELP_LINES {
        builder = builder.mrkdwn(line);
    }
    builder.build()
}

pub fn task_added_message(title: &str) -> Message {
    MessageBuilder::new()
        .header(ADD_HEADER)
        .divider()
        .mrkdwn(format!("*Task added*: {title}"))
        .build()
}

pub fn task_list_message(tasks: &[Task]) -> Message {
    let mut builder = MessageBuilder::new().header(SHOW_HEADER).divider();
    for task in tasks {
        builder = builder.fields(vec![
            TextObject::mrkdwn(format!("*{}*: {}", task.id, task.title)),
            TextObject::mrkdwn(status_emoji(task.status.as_str())),
            TextObject::mrkdwn(task.assignee_id.clone()),
            TextObject::mrkdwn(status_label(task.status.as_str())),
        ]);
    }
    builder.build()
}

pub fn task_assigned_message(title: &str, assignee_id: &str) -> Message {
    MessageBuilder::new()
        .header(UPDATE_HEADER)
        .divider()
        .mrkdwn(format!("Assigned: {title} - {assignee_id}"))
        .build()
}

pub fn task_status_message(title: &str, status: &str) -> Message {
    MessageBuilder::new()
        .header(UPDATE_HEADER)
        .divider()
        .mrkdwn(format!("Status: {title} - {status}"))
        .build()
}

pub fn bad_arguments_message(usage: &str) -> Message {
    MessageBuilder::new().header(UPDATE_HEADER).divider().plain(usage).build()
}

pub fn no_such_task_message() -> Message {
    MessageBuilder::new().header(UPDATE_HEADER).divider().plain(NO_SUCH_TASK_TEXT).build()
}

pub fn status_emoji(status: &str) -> &'static str {
    match status {
        "Open" => ":question:",
        "In Progress" => ":hourglass_flowing_sand:",
        "Done" => ":white_check_mark:",
        _ => "",
    }
}

pub fn status_label(status: &str) -> &'static str {
    match status {
        "Open" => "Open",
        "In Progress" => "In progress",
        "Done" => "Done",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use tododo_core::domain::task::{Task, TaskStatus};

    use super::{
        help_message, no_such_task_message, status_emoji, status_label, task_added_message,
        task_assigned_message, task_list_message, Block, MessageBuilder, TextObject,
        HELP_HEADER, NO_SUCH_TASK_TEXT, UPDATE_HEADER,
    };

    fn task(id: i64, status: TaskStatus, title: &str, assignee_id: &str) -> Task {
        Task {
            id,
            status,
            title: title.to_owned(),
            assignee_id: assignee_id.to_owned(),
            channel_id: "C1".to_owned(),
        }
    }

    #[test]
    fn header_serializes_with_plain_text_node() {
        let json = serde_json::to_string(&Block::header("hello")).expect("serialize");
        assert_eq!(json, r#"{"type":"header","text":{"type":"plain_text","text":"hello"}}"#);
    }

    #[test]
    fn divider_serializes_to_bare_type() {
        let json = serde_json::to_string(&Block::divider()).expect("serialize");
        assert_eq!(json, r#"{"type":"divider"}"#);
    }

    #[test]
    fn text_section_omits_fields_node() {
        let json =
            serde_json::to_string(&Block::section(TextObject::mrkdwn("welcome"))).expect("serialize");
        assert_eq!(json, r#"{"type":"section","text":{"type":"mrkdwn","text":"welcome"}}"#);
    }

    #[test]
    fn fields_section_omits_text_node() {
        let json = serde_json::to_string(&Block::fields(vec![
            TextObject::mrkdwn("field1"),
            TextObject::mrkdwn("field2"),
        ]))
        .expect("serialize");
        assert_eq!(
            json,
            r#"{"type":"section","fields":[{"type":"mrkdwn","text":"field1"},{"type":"mrkdwn","text":"field2"}]}"#
        );
    }

    #[test]
    fn message_preserves_block_construction_order() {
        let message = MessageBuilder::new().header("hello").divider().mrkdwn("welcome").build();
        let json = serde_json::to_string(&message).expect("serialize");
        assert_eq!(
            json,
            r#"{"blocks":[{"type":"header","text":{"type":"plain_text","text":"hello"}},{"type":"divider"},{"type":"section","text":{"type":"mrkdwn","text":"welcome"}}]}"#
        );
    }

    #[test]
    fn help_message_lists_all_commands() {
        let message = help_message();

        assert_eq!(message.blocks.len(), 7);
        assert!(matches!(
            &message.blocks[0],
            Block::Header { text: TextObject::PlainText { text } } if text == HELP_HEADER
        ));
        assert!(matches!(&message.blocks[1], Block::Divider));

        let json = serde_json::to_string(&message).expect("serialize");
        for command in ["/tododo-add", "/tododo-show", "/tododo-assign", "/tododo-start", "/tododo-done"]
        {
            assert!(json.contains(command), "help should mention {command}");
        }
    }

    #[test]
    fn task_added_message_carries_title() {
        let message = task_added_message("Buy milk");
        assert!(matches!(
            &message.blocks[2],
            Block::Section { text: Some(TextObject::Mrkdwn { text }), fields: None }
                if text == "*Task added*: Buy milk"
        ));
    }

    #[test]
    fn task_list_renders_one_fields_section_per_task() {
        let message = task_list_message(&[
            task(1, TaskStatus::Open, "Buy milk", "Not assigned"),
            task(2, TaskStatus::InProgress, "Walk dog", "@mary"),
        ]);

        assert_eq!(message.blocks.len(), 4);

        let fields = match &message.blocks[2] {
            Block::Section { text: None, fields: Some(fields) } => fields,
            other => panic!("expected fields section, got {other:?}"),
        };
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], TextObject::mrkdwn("*1*: Buy milk"));
        assert_eq!(fields[1], TextObject::mrkdwn(":question:"));
        assert_eq!(fields[2], TextObject::mrkdwn("Not assigned"));
        assert_eq!(fields[3], TextObject::mrkdwn("Open"));

        let fields = match &message.blocks[3] {
            Block::Section { text: None, fields: Some(fields) } => fields,
            other => panic!("expected fields section, got {other:?}"),
        };
        assert_eq!(fields[1], TextObject::mrkdwn(":hourglass_flowing_sand:"));
        assert_eq!(fields[3], TextObject::mrkdwn("In progress"));
    }

    #[test]
    fn task_assigned_message_names_title_and_assignee() {
        let message = task_assigned_message("Buy milk", "@mary");
        assert!(matches!(
            &message.blocks[0],
            Block::Header { text: TextObject::PlainText { text } } if text == UPDATE_HEADER
        ));
        assert!(matches!(
            &message.blocks[2],
            Block::Section { text: Some(TextObject::Mrkdwn { text }), .. }
                if text == "Assigned: Buy milk - @mary"
        ));
    }

    #[test]
    fn no_such_task_message_is_plain_text_under_update_header() {
        let message = no_such_task_message();
        assert!(matches!(
            &message.blocks[2],
            Block::Section { text: Some(TextObject::PlainText { text }), .. }
                if text == NO_SUCH_TASK_TEXT
        ));
    }

    #[test]
    fn status_display_mapping_matches_fixed_table() {
        assert_eq!(status_emoji("Open"), ":question:");
        assert_eq!(status_emoji("In Progress"), ":hourglass_flowing_sand:");
        assert_eq!(status_emoji("Done"), ":white_check_mark:");
        assert_eq!(status_emoji("Blocked"), "");

        assert_eq!(status_label("Open"), "Open");
        assert_eq!(status_label("In Progress"), "In progress");
        assert_eq!(status_label("Done"), "Done");
        assert_eq!(status_label("Blocked"), "");
    }
}
