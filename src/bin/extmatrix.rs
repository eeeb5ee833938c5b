//! `extmatrix` command line.
//!
//! ```text
//! extmatrix build:add <pattern> | --all
//! extmatrix build:builder [--sleep N] [--limit N] [--live]
//!                         [--skipMinCheck] [--skipMaxCheck] [--skipVersionCheck]
//! extmatrix build:status
//! extmatrix maintenance:clear-dangling [--lease-timeout-secs N]
//! ```
//!
//! Every command reads the queue from `--database-url` (or `DATABASE_URL`)
//! and the spec documents from `--spec-dir` (or `EXTMATRIX_SPEC_DIR`).

use camino::Utf8PathBuf;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use extmatrix::build::{adapters::DockerCliEngine, domain::CompatibilityGate};
use extmatrix::persistence::{PgPool, build_pool};
use extmatrix::queue::{
    adapters::postgres::PostgresJobRepository,
    services::{DanglingJobSweeper, JobQueue, TriggerService},
};
use extmatrix::spec::{adapters::JsonSpecSource, services::SpecRegistry};
use extmatrix::status::adapters::postgres::PostgresStatusRepository;
use extmatrix::worker::{
    BuildWorker, ShutdownSignal, WorkerConfig, WorkerDependencies, install_signal_handlers,
};
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// PHP extension compatibility build matrix.
#[derive(Parser, Debug)]
#[command(name = "extmatrix", version, about, long_about = None)]
struct Cli {
    /// `PostgreSQL` connection URL
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Directory holding the JSON spec documents
    #[arg(long, env = "EXTMATRIX_SPEC_DIR", default_value = "config", global = true)]
    spec_dir: Utf8PathBuf,

    /// Maximum number of database connections
    #[arg(long, default_value_t = 4, global = true)]
    pool_size: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add build tasks to the job queue
    #[command(name = "build:add")]
    Add {
        /// Tag pattern, e.g. `amqp:*@*-buster` or `*`
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        pattern: Option<String>,

        /// Enqueue the whole build matrix
        #[arg(long)]
        all: bool,
    },

    /// Execute build tasks from the job queue
    #[command(name = "build:builder")]
    Builder {
        /// Seconds to sleep between checks for new tasks (requires --live)
        #[arg(short, long, default_value_t = 60)]
        sleep: u64,

        /// Maximum number of tasks to execute; zero or less means unlimited
        #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
        limit: i64,

        /// Keep monitoring the queue for new tasks
        #[arg(long)]
        live: bool,

        /// Skip the minimum required PHP version check
        #[arg(long = "skipMinCheck")]
        skip_min_check: bool,

        /// Skip the maximum required PHP version check
        #[arg(long = "skipMaxCheck")]
        skip_max_check: bool,

        /// Skip both required PHP version checks
        #[arg(long = "skipVersionCheck")]
        skip_version_check: bool,
    },

    /// Report the job queue status
    #[command(name = "build:status")]
    Status,

    /// Fail jobs whose lease has expired
    #[command(name = "maintenance:clear-dangling")]
    ClearDangling {
        /// Lease length in seconds
        #[arg(long, default_value_t = 3600)]
        lease_timeout_secs: i64,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!(pid = std::process::id(), "started");
    let pool = connect(&cli)?;
    let clock = Arc::new(DefaultClock);
    let jobs = Arc::new(PostgresJobRepository::new(pool.clone()));

    match cli.command {
        Command::Add { pattern, all } => {
            let registry = open_specs(&cli.spec_dir)?;
            let trigger = TriggerService::new(registry, JobQueue::new(jobs, clock));
            let created = match pattern {
                Some(raw) if !all => trigger.enqueue_pattern(&raw).await?,
                _ => trigger.enqueue_build_matrix().await?,
            };
            info!(count = created.len(), "created build tasks");
        }
        Command::Builder {
            sleep,
            limit,
            live,
            skip_min_check,
            skip_max_check,
            skip_version_check,
        } => {
            let gate = CompatibilityGate::new(
                !(skip_min_check || skip_version_check),
                !(skip_max_check || skip_version_check),
            );
            let config = WorkerConfig::new()
                .with_cli_limit(limit)
                .live(live)
                .with_sleep(Duration::from_secs(sleep))
                .with_gate(gate);
            let shutdown = ShutdownSignal::new();
            install_signal_handlers(&shutdown).wrap_err("failed to install signal handlers")?;

            let worker = BuildWorker::new(
                WorkerDependencies {
                    jobs,
                    statuses: Arc::new(PostgresStatusRepository::new(pool)),
                    specs: open_specs(&cli.spec_dir)?,
                    engine: Arc::new(DockerCliEngine::new()),
                    clock,
                },
                config,
                shutdown,
            );
            let summary = worker.run().await?;
            info!(
                processed = summary.processed,
                interrupted = summary.interrupted,
                "builder finished"
            );
        }
        Command::Status => {
            let counts = JobQueue::new(jobs, clock).counts().await?;
            info!(total = counts.total, waiting = counts.waiting(), "jobs");
            info!(assigned = counts.assigned, "assigned jobs");
            info!(finished = counts.finished, "finished jobs");
            info!(failed = counts.failed, successful = counts.successful, "failed jobs");
        }
        Command::ClearDangling { lease_timeout_secs } => {
            let lease = TimeDelta::try_seconds(lease_timeout_secs)
                .filter(|delta| *delta > TimeDelta::zero())
                .ok_or_else(|| eyre!("invalid lease timeout: {lease_timeout_secs}"))?;
            let sweeper = DanglingJobSweeper::new(
                jobs,
                Arc::new(PostgresStatusRepository::new(pool)),
                clock,
            );
            let reclaimed = sweeper.sweep(lease).await?;
            info!(reclaimed, "cleared dangling jobs");
        }
    }

    Ok(())
}

fn connect(cli: &Cli) -> eyre::Result<PgPool> {
    let url = cli
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("--database-url or DATABASE_URL is required"))?;
    build_pool(url, cli.pool_size).wrap_err("failed to connect to PostgreSQL")
}

fn open_specs(root: &camino::Utf8Path) -> eyre::Result<SpecRegistry<JsonSpecSource>> {
    let source = JsonSpecSource::open(root)?;
    Ok(SpecRegistry::new(Arc::new(source)))
}
