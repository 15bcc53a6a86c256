//! Expected and forbidden actions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TauError};
use crate::message::{Requestor, ToolCall};
use crate::value::{Arguments, arguments_subset, values_equal};

/// An expected (or, with `forbid`, prohibited) tool invocation.
///
/// Actions are validated when constructed or deserialized: a missing or
/// empty `name` is rejected there, so evaluation never sees one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ActionRecord")]
pub struct Action {
    /// Author-supplied identifier, carried through to results
    pub action_id: String,

    /// Who is expected to make the call
    #[serde(skip_serializing_if = "Requestor::is_assistant")]
    pub requestor: Requestor,

    /// Tool name to match
    pub name: String,

    /// Expected arguments
    #[serde(skip_serializing_if = "Arguments::is_empty")]
    pub arguments: Arguments,

    /// Author note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    /// Restricts comparison to these keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_args: Option<Vec<String>>,

    /// Satisfied only when no qualifying call exists
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub forbid: bool,
}

/// Unvalidated wire form of [`Action`]
#[derive(Deserialize)]
struct ActionRecord {
    action_id: String,
    #[serde(default)]
    requestor: Requestor,
    name: String,
    #[serde(default)]
    arguments: Arguments,
    #[serde(default)]
    info: Option<String>,
    #[serde(default)]
    compare_args: Option<Vec<String>>,
    #[serde(default)]
    forbid: bool,
}

impl TryFrom<ActionRecord> for Action {
    type Error = TauError;

    fn try_from(record: ActionRecord) -> Result<Self> {
        let mut action = Action::new(record.action_id, record.name)?;
        action.requestor = record.requestor;
        action.arguments = record.arguments;
        action.info = record.info;
        action.compare_args = record.compare_args;
        action.forbid = record.forbid;
        Ok(action)
    }
}

impl Action {
    /// Create a required action with no expected arguments.
    ///
    /// # Errors
    ///
    /// Returns [`TauError::Validation`] if `name` is empty.
    pub fn new(action_id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let action_id = action_id.into();
        let name = name.into();
        if name.is_empty() {
            return Err(TauError::Validation(format!(
                "action '{}' has an empty tool name",
                action_id
            )));
        }
        Ok(Self {
            action_id,
            requestor: Requestor::Assistant,
            name,
            arguments: Arguments::new(),
            info: None,
            compare_args: None,
            forbid: false,
        })
    }

    /// Replace the expected arguments
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Add a single expected argument
    pub fn with_argument(mut self, key: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }

    /// Restrict comparison to the given keys
    pub fn with_compare_args<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compare_args = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an author note
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the expected requestor
    pub fn with_requestor(mut self, requestor: Requestor) -> Self {
        self.requestor = requestor;
        self
    }

    /// Mark as forbidden
    pub fn forbidden(mut self) -> Self {
        self.forbid = true;
        self
    }

    /// Whether `call` qualifies for this action.
    ///
    /// The forbid flag is not consulted here; callers invert the verdict.
    pub fn compare_with_tool_call(&self, call: &ToolCall) -> bool {
        if self.name != call.name {
            return false;
        }

        match &self.compare_args {
            Some(keys) => keys.iter().all(|key| {
                match (self.arguments.get(key), call.arguments.get(key)) {
                    (Some(expected), Some(actual)) => values_equal(expected, actual),
                    (None, None) => true,
                    _ => false,
                }
            }),
            None => arguments_subset(&self.arguments, &call.arguments),
        }
    }
}
