//! Loading tasks from a domain's `tasks.json`

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::Task;
use crate::error::{Result, TauError};

/// File-backed task store for one domain
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Open the store for `domain` under `data_dir`.
    ///
    /// Tasks are read from `<data_dir>/tau2/domains/<domain>/tasks.json`.
    pub fn open(data_dir: impl AsRef<Path>, domain: &str) -> Self {
        Self {
            path: data_dir
                .as_ref()
                .join("tau2")
                .join("domains")
                .join(domain)
                .join("tasks.json"),
        }
    }

    /// Use an explicit tasks file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<Value>> {
        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<Value> = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Read task records");
        Ok(records)
    }

    /// Stored task records keyed by id, exactly as written on disk
    pub fn load_raw(&self) -> Result<BTreeMap<String, Value>> {
        self.read_records()?
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let id = record
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        TauError::Validation(format!("task record {} has no string id", i))
                    })?
                    .to_string();
                Ok((id, record))
            })
            .collect()
    }

    /// All tasks in file order
    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        let tasks = self
            .read_records()?
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Task>, _>>()?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    /// Tasks with the given ids, in the requested order.
    ///
    /// An empty id list returns every task.
    ///
    /// # Errors
    ///
    /// Returns [`TauError::TaskNotFound`] for an id not present in the store.
    pub fn get_tasks(&self, task_ids: &[&str]) -> Result<Vec<Task>> {
        let tasks = self.load_tasks()?;
        if task_ids.is_empty() {
            return Ok(tasks);
        }

        let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        task_ids
            .iter()
            .map(|id| {
                by_id
                    .get(id)
                    .map(|task| (*task).clone())
                    .ok_or_else(|| TauError::TaskNotFound(id.to_string()))
            })
            .collect()
    }
}
