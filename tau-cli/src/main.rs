//! tau CLI - score recorded trajectories and validate task files

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tau_core::prelude::*;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(name = "tau")]
#[command(about = "Trajectory action evaluation CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Root of the benchmark data tree
    #[arg(long, global = true, env = "TAU_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Task domain
    #[arg(long, global = true, env = "TAU_DOMAIN")]
    domain: Option<String>,

    /// Report format
    #[arg(long, global = true, value_enum)]
    format: Option<Format>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score recorded runs against their tasks' expected actions
    Evaluate {
        /// Results file containing recorded simulations
        #[arg(short, long)]
        results: PathBuf,
    },
    /// Check that tasks load losslessly from tasks.json
    CheckTasks {
        /// Only check these task ids
        #[arg(long = "task-id")]
        task_ids: Vec<String>,
    },
    /// Version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Checks for one recorded run
struct RunReport {
    run_id: String,
    task_id: String,
    checks: Vec<ActionCheck>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(TauConfig::load_unvalidated()?, &cli)?;

    match cli.command {
        Commands::Version => {
            println!("tau {}", env!("CARGO_PKG_VERSION"));
            println!("tau-core {}", tau_core::VERSION);
        }
        Commands::Evaluate { results } => {
            let reports = evaluate(&config, &results).await?;
            print_reports(&reports, config.output)?;
        }
        Commands::CheckTasks { task_ids } => {
            if !check_tasks(&config, &task_ids)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of loaded configuration, then validate
fn resolve_config(mut config: TauConfig, cli: &Cli) -> Result<TauConfig> {
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(domain) = &cli.domain {
        config.domain = domain.clone();
    }
    if let Some(format) = cli.format {
        config.output = format.into();
    }
    config.validate()?;
    Ok(config)
}

async fn evaluate(config: &TauConfig, results_path: &Path) -> Result<Vec<RunReport>> {
    let store = TaskStore::open(&config.data_dir, &config.domain);
    let tasks: HashMap<String, Arc<Task>> = store
        .load_tasks()
        .with_context(|| format!("loading tasks from {}", store.path().display()))?
        .into_iter()
        .map(|task| (task.id.clone(), Arc::new(task)))
        .collect();

    let results = Results::load(results_path)
        .with_context(|| format!("loading results from {}", results_path.display()))?;

    score_runs(&tasks, results.simulations, &config.evaluation).await
}

/// Score runs concurrently, returning reports in input order
async fn score_runs(
    tasks: &HashMap<String, Arc<Task>>,
    runs: Vec<SimulationRun>,
    settings: &EvaluationConfig,
) -> Result<Vec<RunReport>> {
    let semaphore = Arc::new(Semaphore::new(settings.max_concurrency));
    let mut join_set = JoinSet::new();

    for (index, run) in runs.into_iter().enumerate() {
        let Some(task) = tasks.get(&run.task_id).cloned() else {
            if settings.skip_missing_tasks {
                tracing::warn!(run_id = %run.id, task_id = %run.task_id, "Task not found, skipping run");
                continue;
            }
            bail!(TauError::TaskNotFound(run.task_id));
        };

        let permit = semaphore.clone().acquire_owned().await?;
        join_set.spawn_blocking(move || {
            let checks = ActionEvaluator::evaluate_task(&run.messages, &task);
            drop(permit);
            (
                index,
                RunReport {
                    run_id: run.id,
                    task_id: run.task_id,
                    checks,
                },
            )
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        reports.push(joined?);
    }
    reports.sort_by_key(|(index, _)| *index);

    tracing::info!(runs = reports.len(), "Evaluated recorded runs");
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

fn print_reports(reports: &[RunReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value: Vec<serde_json::Value> = reports
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "run_id": r.run_id,
                        "task_id": r.task_id,
                        "action_checks": r.checks,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for report in reports {
                println!("{} (task {})", report.run_id, report.task_id);
                if report.checks.is_empty() {
                    println!("  no actions to check");
                }
                for check in &report.checks {
                    println!(
                        "  [{}] {:<24} {}{:<24} reward={:.1}",
                        if check.action_match { "PASS" } else { "FAIL" },
                        check.action_id(),
                        if check.action.forbid { "!" } else { " " },
                        check.action.name,
                        check.action_reward,
                    );
                }
            }
        }
    }
    Ok(())
}

fn check_tasks(config: &TauConfig, task_ids: &[String]) -> Result<bool> {
    let store = TaskStore::open(&config.data_dir, &config.domain);
    let raw = store
        .load_raw()
        .with_context(|| format!("reading {}", store.path().display()))?;
    let ids: Vec<&str> = task_ids.iter().map(String::as_str).collect();
    let tasks = store.get_tasks(&ids)?;

    let mut all_lossless = true;
    let mut reports = Vec::new();
    for task in &tasks {
        let stored = raw
            .get(&task.id)
            .ok_or_else(|| TauError::TaskNotFound(task.id.clone()))?;
        let report = check_round_trip(stored, task)?;
        all_lossless &= report.is_lossless();
        reports.push(report);
    }

    match config.output {
        OutputFormat::Json => {
            let value: Vec<serde_json::Value> = reports
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "task_id": r.task_id,
                        "lossless": r.is_lossless(),
                        "stored_hash": r.stored_hash,
                        "loaded_hash": r.loaded_hash,
                        "diffs": r.diffs.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.to_string().trim_end());
            }
        }
    }

    tracing::info!(tasks = reports.len(), lossless = all_lossless, "Checked task round-trips");
    Ok(all_lossless)
}
