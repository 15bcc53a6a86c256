//! Evaluation criteria attached to a task

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::scenario::EnvType;
use crate::value::Arguments;

/// Component of the task reward an evaluation is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardType {
    Db,
    EnvAssertion,
    NlAssertion,
    Action,
    Communicate,
}

fn default_reward_basis() -> Vec<RewardType> {
    vec![RewardType::Db, RewardType::Communicate]
}

fn is_default_reward_basis(basis: &[RewardType]) -> bool {
    basis == default_reward_basis().as_slice()
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Expected outcomes of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCriteria {
    /// Tool calls that must (or, when forbidden, must not) appear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,

    /// Assertions over the final environment state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_assertions: Option<Vec<EnvAssertion>>,

    /// Information the agent must communicate to the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communicate_info: Option<Vec<String>>,

    /// Natural-language assertions for a judge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nl_assertions: Option<Vec<String>>,

    /// Reward components that count toward the task score
    #[serde(
        default = "default_reward_basis",
        skip_serializing_if = "is_default_reward_basis"
    )]
    pub reward_basis: Vec<RewardType>,
}

impl Default for EvaluationCriteria {
    fn default() -> Self {
        Self {
            actions: None,
            env_assertions: None,
            communicate_info: None,
            nl_assertions: None,
            reward_basis: default_reward_basis(),
        }
    }
}

impl EvaluationCriteria {
    /// Criteria consisting only of actions
    pub fn with_actions(actions: Vec<Action>) -> Self {
        Self {
            actions: Some(actions),
            ..Default::default()
        }
    }
}

/// An assertion evaluated by calling an environment function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvAssertion {
    pub env_type: EnvType,

    pub func_name: String,

    #[serde(default, skip_serializing_if = "Arguments::is_empty")]
    pub arguments: Arguments,

    /// Value the function is expected to return
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub assert_value: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
