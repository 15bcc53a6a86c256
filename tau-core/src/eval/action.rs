//! Action evaluation over a recorded trajectory

use serde::{Deserialize, Serialize};

use crate::message::{Message, ToolCall, tool_calls};
use crate::task::{Action, Task};

/// Verdict for a single [`Action`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCheck {
    /// The action that was checked
    pub action: Action,

    /// Whether the action's condition holds
    pub action_match: bool,

    /// 1.0 when matched, 0.0 otherwise
    pub action_reward: f64,

    /// Id of the first qualifying call, if any.
    ///
    /// For a forbidden action this is the offending call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifying_call: Option<String>,
}

impl ActionCheck {
    /// Id of the checked action
    pub fn action_id(&self) -> &str {
        &self.action.action_id
    }
}

/// Scores trajectories against expected and forbidden actions.
///
/// Evaluation is a pure function of its inputs: nothing is mutated, nothing
/// is cached, and identical inputs give identical checks. Callers may score
/// many trajectories in parallel without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionEvaluator;

impl ActionEvaluator {
    /// Check every action against the trajectory.
    ///
    /// Returns one [`ActionCheck`] per action, in input order. A required
    /// action matches when some call in the trajectory qualifies; a forbidden
    /// action matches when none does.
    pub fn evaluate_actions(trajectory: &[Message], actions: &[Action]) -> Vec<ActionCheck> {
        tracing::trace!(
            actions = actions.len(),
            turns = trajectory.len(),
            "Evaluating actions"
        );

        actions
            .iter()
            .map(|action| Self::check_action(trajectory, action))
            .collect()
    }

    /// Check the expected actions of `task`
    pub fn evaluate_task(trajectory: &[Message], task: &Task) -> Vec<ActionCheck> {
        Self::evaluate_actions(trajectory, task.actions())
    }

    fn check_action(trajectory: &[Message], action: &Action) -> ActionCheck {
        let qualifying: Option<&ToolCall> =
            tool_calls(trajectory).find(|call| action.compare_with_tool_call(call));

        // forbid inverts the verdict, never the predicate
        let action_match = qualifying.is_some() != action.forbid;

        tracing::debug!(
            action_id = %action.action_id,
            name = %action.name,
            forbid = action.forbid,
            matched = action_match,
            "Checked action"
        );

        ActionCheck {
            action: action.clone(),
            action_match,
            action_reward: if action_match { 1.0 } else { 0.0 },
            qualifying_call: qualifying.map(|call| call.id.clone()),
        }
    }
}
