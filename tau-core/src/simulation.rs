//! Recorded simulation runs
//!
//! A results file holds the completed episodes of a benchmark run. Each
//! [`SimulationRun`] names the task it was played against and carries the
//! full message trajectory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::message::Message;

/// One completed episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Run identifier
    pub id: String,

    /// Task the episode was played against
    pub task_id: String,

    /// Trial number when a task is run several times
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial: Option<u32>,

    /// Full trajectory
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A set of recorded runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub simulations: Vec<SimulationRun>,
}

impl Results {
    /// Load results from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let results: Results = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            runs = results.simulations.len(),
            "Loaded simulation results"
        );
        Ok(results)
    }

    /// Save results to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
