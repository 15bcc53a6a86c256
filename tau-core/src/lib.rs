//! # tau - trajectory evaluation for tool-agent benchmarks
//!
//! tau scores recorded agent conversations against the outcomes a task
//! expects:
//! - Typed message model for trajectories (assistant, user, tool turns)
//! - Task definitions with expected and forbidden actions
//! - Pure, deterministic action evaluation with binary per-action rewards
//! - Task store loading and lossless round-trip validation
//!
//! ## Quick Start
//!
//! ```rust
//! use tau_core::prelude::*;
//! use serde_json::json;
//!
//! let trajectory: Vec<Message> = vec![
//!     AssistantMessage::new()
//!         .with_tool_call(ToolCall::new(
//!             "tc_0",
//!             "create_task",
//!             arguments_from(json!({"title": "Meeting", "priority": "high"})).unwrap(),
//!         ))
//!         .into(),
//! ];
//!
//! let action = Action::new("create_1", "create_task")?
//!     .with_argument("title", json!("Meeting"))
//!     .with_compare_args(["title"]);
//!
//! let checks = ActionEvaluator::evaluate_actions(&trajectory, &[action]);
//! assert!(checks[0].action_match);
//! assert_eq!(checks[0].action_reward, 1.0);
//! # Ok::<(), TauError>(())
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod message;
pub mod simulation;
pub mod task;
pub mod value;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{EvaluationConfig, OutputFormat, TauConfig};
    pub use crate::error::{Result, TauError};
    pub use crate::eval::{ActionCheck, ActionEvaluator};
    pub use crate::message::{
        AssistantMessage, Message, Requestor, SystemMessage, ToolCall, ToolMessage, UserMessage,
        tool_calls,
    };
    pub use crate::simulation::{Results, SimulationRun};
    pub use crate::task::{
        Action, EvaluationCriteria, RewardType, RoundTripReport, Task, TaskStore,
        check_round_trip,
    };
    pub use crate::value::{Arguments, arguments_from, values_equal};
}
