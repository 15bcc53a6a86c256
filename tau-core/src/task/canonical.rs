//! Canonical projection, hashing and diffing of task records
//!
//! A loaded task round-trips losslessly when its canonical form hashes to the
//! same value as the stored record. Both sides have `null` members stripped
//! first: stored files may spell out `"ticket": null`, the projection never
//! emits it.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

use super::Task;
use crate::error::Result;

/// Remove `null` object members, recursively.
///
/// `null` array elements are positional and are kept.
pub fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        _ => value.clone(),
    }
}

/// Project a record to its non-default fields.
pub fn canonical_form<T: Serialize>(record: &T) -> Result<Value> {
    Ok(serde_json::to_value(record)?)
}

/// Compact JSON with object keys sorted at every level.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Hex SHA-256 of the canonical JSON encoding.
pub fn dict_hash(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(value).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One difference between two JSON documents
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDiff {
    /// Present only in the actual document
    Added { path: String, value: Value },
    /// Present only in the expected document
    Removed { path: String, value: Value },
    /// Present in both with different values
    Changed {
        path: String,
        expected: Value,
        actual: Value,
    },
}

impl ValueDiff {
    /// Path of the differing member, `$`-rooted
    pub fn path(&self) -> &str {
        match self {
            ValueDiff::Added { path, .. }
            | ValueDiff::Removed { path, .. }
            | ValueDiff::Changed { path, .. } => path,
        }
    }
}

impl fmt::Display for ValueDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueDiff::Added { path, value } => write!(f, "+ {}: {}", path, value),
            ValueDiff::Removed { path, value } => write!(f, "- {}: {}", path, value),
            ValueDiff::Changed {
                path,
                expected,
                actual,
            } => write!(f, "~ {}: {} -> {}", path, expected, actual),
        }
    }
}

/// Path-addressed differences from `expected` to `actual`.
pub fn dict_diff(expected: &Value, actual: &Value) -> Vec<ValueDiff> {
    let mut diffs = Vec::new();
    diff_into("$".to_string(), expected, actual, &mut diffs);
    diffs
}

fn diff_into(path: String, expected: &Value, actual: &Value, diffs: &mut Vec<ValueDiff>) {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            let mut keys: Vec<&String> = exp.keys().collect();
            keys.sort();
            for key in keys {
                let exp_value = &exp[key];
                let child = format!("{}.{}", path, key);
                match act.get(key) {
                    Some(act_value) => diff_into(child, exp_value, act_value, diffs),
                    None => diffs.push(ValueDiff::Removed {
                        path: child,
                        value: exp_value.clone(),
                    }),
                }
            }
            let mut added: Vec<(&String, &Value)> =
                act.iter().filter(|(k, _)| !exp.contains_key(*k)).collect();
            added.sort_by(|a, b| a.0.cmp(b.0));
            for (key, act_value) in added {
                diffs.push(ValueDiff::Added {
                    path: format!("{}.{}", path, key),
                    value: act_value.clone(),
                });
            }
        }
        (Value::Array(exp), Value::Array(act)) => {
            for i in 0..exp.len().max(act.len()) {
                let child = format!("{}[{}]", path, i);
                match (exp.get(i), act.get(i)) {
                    (Some(e), Some(a)) => diff_into(child, e, a, diffs),
                    (Some(e), None) => diffs.push(ValueDiff::Removed {
                        path: child,
                        value: e.clone(),
                    }),
                    (None, Some(a)) => diffs.push(ValueDiff::Added {
                        path: child,
                        value: a.clone(),
                    }),
                    (None, None) => {}
                }
            }
        }
        _ if expected != actual => diffs.push(ValueDiff::Changed {
            path,
            expected: expected.clone(),
            actual: actual.clone(),
        }),
        _ => {}
    }
}

/// Outcome of comparing a stored task record with its loaded form
#[derive(Debug, Clone)]
pub struct RoundTripReport {
    pub task_id: String,
    pub stored_hash: String,
    pub loaded_hash: String,
    /// Differences from stored to loaded, empty when lossless
    pub diffs: Vec<ValueDiff>,
}

impl RoundTripReport {
    /// Whether the loaded task reproduces the stored record exactly
    pub fn is_lossless(&self) -> bool {
        self.stored_hash == self.loaded_hash
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}

impl fmt::Display for RoundTripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_lossless() {
            return write!(f, "{}: lossless ({})", self.task_id, short_hash(&self.stored_hash));
        }
        writeln!(
            f,
            "{}: stored {} != loaded {}",
            self.task_id,
            short_hash(&self.stored_hash),
            short_hash(&self.loaded_hash)
        )?;
        for diff in &self.diffs {
            writeln!(f, "  {}", diff)?;
        }
        Ok(())
    }
}

/// Compare a stored task record against the task loaded from it.
pub fn check_round_trip(stored: &Value, task: &Task) -> Result<RoundTripReport> {
    let stored = strip_nulls(stored);
    let loaded = strip_nulls(&canonical_form(task)?);

    let stored_hash = dict_hash(&stored);
    let loaded_hash = dict_hash(&loaded);
    let diffs = if stored_hash == loaded_hash {
        Vec::new()
    } else {
        dict_diff(&stored, &loaded)
    };

    if !diffs.is_empty() {
        tracing::debug!(task_id = %task.id, diffs = diffs.len(), "Task does not round-trip");
    }

    Ok(RoundTripReport {
        task_id: task.id.clone(),
        stored_hash,
        loaded_hash,
        diffs,
    })
}
