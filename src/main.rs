use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;
mod config;
mod replay;

use cli::Cli;
use cli::commands::Commands;
use config::Config;
use replay::{AttemptFile, ConsoleDialog, ConsoleRenderer, ReplayTooling};

use tmcrun::background::TokioTaskRunner;
use tmcrun::course::CourseSnapshot;
use tmcrun::notify::{ExerciseScan, NotificationBoard, NotificationToken, ProjectsReadiness, UnopenedExerciseNotifier};
use tmcrun::results::{LocalTestRun, RenderLoop};

fn setup_logging(level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tmcrun")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tmcrun.log");

    // Setup env_logger with file output; RUST_LOG wins over the config level
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Verdict { attempt } => handle_verdict_command(attempt, config),
        Commands::Unopened { course, force, open } => handle_unopened_command(course, *force, *open, config),
    }
}

fn handle_verdict_command(path: &Path, config: &Config) -> Result<()> {
    let attempt = AttemptFile::load(path)?;
    let exercise = attempt.exercise.clone();

    if !LocalTestRun::<TokioTaskRunner, ReplayTooling>::enabled_for(&exercise) {
        println!(
            "{} running tests locally is not enabled for {}",
            "Note:".yellow(),
            exercise.name
        );
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let (dispatcher, render_loop) = RenderLoop::spawn(ConsoleRenderer).context("Failed to start render thread")?;

    let verdict = runtime.block_on(async {
        let local = LocalTestRun::new(
            TokioTaskRunner::current(),
            Arc::new(ReplayTooling::new(&attempt)),
            dispatcher,
        )
        .with_mailbox_capacity(config.channels.aggregator_capacity);
        let running = local.start(exercise, None).await?;
        running.finished().await
    })?;

    render_loop.join().context("Render thread failed")?;

    match verdict {
        Some(submittable) => {
            info!("Attempt finished, submittable: {}", submittable);
            Ok(())
        }
        None => Err(eyre!("Attempt for {} never produced results", attempt.exercise.name)),
    }
}

fn handle_unopened_command(path: &Path, force: bool, open: bool, config: &Config) -> Result<()> {
    if !force && !config.startup.check_unopened_exercises {
        println!("{}", "Unopened exercise check is disabled (use --force)".yellow());
        return Ok(());
    }

    let snapshot = Arc::new(CourseSnapshot::load(path).context("Failed to load course snapshot")?);
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;

    let readiness = Arc::new(ProjectsReadiness::new(runtime.handle().clone()));
    let board = Arc::new(NotificationBoard::new());
    let notifier = Arc::new(
        UnopenedExerciseNotifier::new(
            ExerciseScan::new(snapshot.clone(), snapshot.clone()),
            board.clone(),
            Arc::new(ConsoleDialog),
            readiness.clone(),
            NotificationToken::new(),
        )
        .with_icon(config.notifications.icon.clone())
        .with_priority(config.notifications.priority),
    );

    let scanned = notifier.schedule_check();
    readiness.mark_completely_opened();
    let count = runtime
        .block_on(scanned)
        .context("Unopened exercise scan did not run")?;

    info!("Unopened exercise scan for {} found {} actionable", snapshot.course(), count);
    match board.get(notifier.token()) {
        Some(notification) => {
            println!("{} {}", "Notification:".green(), notification.message);
            println!("  {}", notification.action_label);
            if open {
                board.click(notifier.token());
            }
        }
        None => println!("{}", "No unopened exercises need attention".cyan()),
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging at the configured level
    let level = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    setup_logging(&level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
