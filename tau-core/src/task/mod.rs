//! Task definitions
//!
//! A [`Task`] describes one benchmark episode: who the simulated user is,
//! what state the environment starts in, and which outcomes are expected.
//! Tasks live in a per-domain `tasks.json` loaded through [`TaskStore`].
//!
//! Serialized tasks follow a canonical projection: optional fields are
//! omitted when unset and defaulted fields are omitted when equal to their
//! default. [`check_round_trip`] uses that projection to verify a loaded task
//! is lossless against its stored form.

mod action;
mod canonical;
mod criteria;
mod scenario;
mod store;

pub use action::Action;
pub use canonical::{
    RoundTripReport, ValueDiff, canonical_form, canonical_json, check_round_trip, dict_diff,
    dict_hash, strip_nulls,
};
pub use criteria::{EnvAssertion, EvaluationCriteria, RewardType};
pub use scenario::{
    Description, EnvFunctionCall, EnvType, InitialState, InitializationData,
    StructuredUserInstructions, UserInstructions, UserScenario,
};
pub use store::TaskStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A benchmark task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task id within a domain
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    pub user_scenario: UserScenario,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<InitialState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_criteria: Option<EvaluationCriteria>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Value>,
}

impl Task {
    /// Create a task with free-text user instructions
    pub fn new(id: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            user_scenario: UserScenario::text(instructions),
            ticket: None,
            initial_state: None,
            evaluation_criteria: None,
            annotations: None,
        }
    }

    /// Set the evaluation criteria
    pub fn with_evaluation_criteria(mut self, criteria: EvaluationCriteria) -> Self {
        self.evaluation_criteria = Some(criteria);
        self
    }

    /// Expected outcome actions, empty when the task defines none
    pub fn actions(&self) -> &[Action] {
        self.evaluation_criteria
            .as_ref()
            .and_then(|c| c.actions.as_deref())
            .unwrap_or_default()
    }
}
