//! Trajectory message model
//!
//! A trajectory is an ordered slice of [`Message`]s recorded during one
//! episode. Assistant and user turns may carry tool invocations; the
//! evaluator only reads them.

use serde::{Deserialize, Serialize};

use crate::value::Arguments;

/// Who issued a tool call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requestor {
    #[default]
    Assistant,
    User,
}

impl Requestor {
    pub(crate) fn is_assistant(&self) -> bool {
        matches!(self, Requestor::Assistant)
    }
}

/// A single tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier
    #[serde(default)]
    pub id: String,

    /// Tool name
    pub name: String,

    /// Arguments the tool was called with
    #[serde(default)]
    pub arguments: Arguments,

    /// Who made the call
    #[serde(default, skip_serializing_if = "Requestor::is_assistant")]
    pub requestor: Requestor,
}

impl ToolCall {
    /// Create a new assistant tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
            requestor: Requestor::Assistant,
        }
    }

    /// Set who issued the call
    pub fn with_requestor(mut self, requestor: Requestor) -> Self {
        self.requestor = requestor;
        self
    }
}

/// System prompt turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_idx: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// User turn (text and, in dual-control domains, tool calls)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_idx: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl UserMessage {
    /// Create a text-only user turn
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

/// Assistant turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Text response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool invocations made in this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_idx: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl AssistantMessage {
    /// Create an empty assistant turn
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append a tool call
    pub fn with_tool_call(mut self, call: ToolCall) -> Self {
        self.tool_calls.get_or_insert_with(Vec::new).push(call);
        self
    }

    /// Whether this turn invokes at least one tool
    pub fn is_tool_call(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty())
    }
}

/// Tool response turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    /// Id of the call this responds to
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Requestor::is_assistant")]
    pub requestor: Requestor,

    /// Whether the tool returned an error
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_idx: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// One turn of a trajectory, tagged by `role`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
    Tool(ToolMessage),
}

impl Message {
    /// Tool invocations carried by this turn
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::User(m) => m.tool_calls.as_deref().unwrap_or_default(),
            Message::Assistant(m) => m.tool_calls.as_deref().unwrap_or_default(),
            Message::System(_) | Message::Tool(_) => &[],
        }
    }
}

impl From<AssistantMessage> for Message {
    fn from(message: AssistantMessage) -> Self {
        Message::Assistant(message)
    }
}

impl From<UserMessage> for Message {
    fn from(message: UserMessage) -> Self {
        Message::User(message)
    }
}

/// Flatten a trajectory into its tool invocations.
///
/// Turn order first, then invocation order within a turn.
pub fn tool_calls(trajectory: &[Message]) -> impl Iterator<Item = &ToolCall> {
    trajectory.iter().flat_map(Message::tool_calls)
}
