//! Task description, user scenario, and initial state records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::Message;
use crate::value::Arguments;

/// Environment a function call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvType {
    User,
    Assistant,
}

/// Human-readable description of a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_policies: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Instructions for the simulated user, split into sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredUserInstructions {
    pub domain: String,

    pub reason_for_call: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_info: Option<String>,

    pub task_instructions: String,
}

/// User instructions, either structured or free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserInstructions {
    Structured(StructuredUserInstructions),
    Text(String),
}

/// What the simulated user knows and wants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserScenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    pub instructions: UserInstructions,
}

impl UserScenario {
    /// Scenario with free-text instructions
    pub fn text(instructions: impl Into<String>) -> Self {
        Self {
            persona: None,
            instructions: UserInstructions::Text(instructions.into()),
        }
    }
}

/// A function call used to set up the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvFunctionCall {
    pub env_type: EnvType,

    pub func_name: String,

    #[serde(default, skip_serializing_if = "Arguments::is_empty")]
    pub arguments: Arguments,
}

/// Data merged into the environment databases before the episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitializationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Value>,
}

/// State the episode starts from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization_data: Option<InitializationData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization_actions: Option<Vec<EnvFunctionCall>>,

    /// Conversation replayed before the agent takes over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_history: Option<Vec<Message>>,
}
