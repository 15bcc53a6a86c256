//! Trajectory evaluation
//!
//! Given the messages of a completed episode and the [`Action`]s a task
//! expects, [`ActionEvaluator`] produces one [`ActionCheck`] per action.
//!
//! - A required action matches when at least one tool call in the trajectory
//!   has the same name and agreeing arguments.
//! - A forbidden action matches when no such call exists.
//! - Rewards are binary per action. Combining them into a task score is left
//!   to the caller.
//!
//! # Example
//!
//! ```rust
//! use tau_core::eval::ActionEvaluator;
//! use tau_core::message::{AssistantMessage, Message, ToolCall};
//! use tau_core::task::Action;
//! use tau_core::value::Arguments;
//!
//! let trajectory: Vec<Message> = vec![
//!     AssistantMessage::new()
//!         .with_tool_call(ToolCall::new("tc_0", "send_email", Arguments::new()))
//!         .into(),
//! ];
//! let actions = vec![
//!     Action::new("req_1", "send_email")?,
//!     Action::new("forb_1", "delete_user")?.forbidden(),
//! ];
//!
//! let checks = ActionEvaluator::evaluate_actions(&trajectory, &actions);
//! assert!(checks.iter().all(|c| c.action_match));
//! # Ok::<(), tau_core::error::TauError>(())
//! ```
//!
//! [`Action`]: crate::task::Action

mod action;

pub use action::{ActionCheck, ActionEvaluator};

#[cfg(test)]
mod tests;
