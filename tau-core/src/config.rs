//! Configuration types for tau

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TauConfig {
    /// Root of the benchmark data tree
    pub data_dir: PathBuf,

    /// Domain whose tasks are loaded
    pub domain: String,

    /// Evaluation settings
    pub evaluation: EvaluationConfig,

    /// Report format
    pub output: OutputFormat,
}

impl Default for TauConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            domain: "mock".to_string(),
            evaluation: EvaluationConfig::default(),
            output: OutputFormat::Text,
        }
    }
}

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Maximum number of runs scored at once
    pub max_concurrency: usize,

    /// Warn and skip runs whose task is missing instead of failing
    pub skip_missing_tasks: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            skip_missing_tasks: false,
        }
    }
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl TauConfig {
    /// Load and validate configuration from `tau.toml` and the environment.
    ///
    /// Sources, later ones winning:
    /// 1. `tau.toml` in the working directory
    /// 2. `TAU_`-prefixed environment variables (`__` separates nested keys,
    ///    e.g. `TAU_EVALUATION__MAX_CONCURRENCY`)
    /// 3. the file named by `TAU_CONFIG_PATH`
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the result fails validation.
    pub fn load() -> crate::error::Result<Self> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge the same sources as [`TauConfig::load`] without validating.
    ///
    /// For callers that apply further overrides and validate afterwards.
    pub fn load_unvalidated() -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Serialized, Toml},
        };

        let mut figment = Figment::from(Serialized::defaults(TauConfig::default()))
            .merge(Toml::file("tau.toml"))
            .merge(Env::prefixed("TAU_").ignore(&["CONFIG_PATH"]).split("__"));

        if let Ok(path) = std::env::var("TAU_CONFIG_PATH") {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(|e| {
            crate::error::TauError::Configuration(format!("Failed to load configuration: {}", e))
        })
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };

        let config: TauConfig = Figment::from(Serialized::defaults(TauConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| {
                crate::error::TauError::Configuration(format!(
                    "Failed to load configuration file: {}",
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Path of the configured domain's `tasks.json`
    pub fn tasks_path(&self) -> PathBuf {
        crate::task::TaskStore::open(&self.data_dir, &self.domain)
            .path()
            .to_path_buf()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.domain.trim().is_empty() {
            return Err(crate::error::TauError::Configuration(
                "domain must not be empty".to_string(),
            ));
        }
        if self.evaluation.max_concurrency == 0 {
            return Err(crate::error::TauError::Configuration(
                "evaluation.max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
