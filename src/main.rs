//! `deadrepo-doctor` — submit a GitHub repository to the DeadRepo backend and
//! report its dependency health.
//!
//! # Flow
//! 1. Parse CLI arguments and load config.
//! 2. Pick the URL: the argument, or the last submitted one.
//! 3. Run the fetch → analyze workflow against the HTTP backend, showing the
//!    loading message on a spinner.
//! 4. Print notifications and render the report.
//! 5. Exit `0` (succeeded), `1` (backend failure) or `2` (invalid URL).

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use deadrepo_doctor::cli::{Cli, ReportFormat};
use deadrepo_doctor::client::HttpBackend;
use deadrepo_doctor::config::load_config;
use deadrepo_doctor::report;
use deadrepo_doctor::report::view::ReportView;
use deadrepo_doctor::storage::UrlStore;
use deadrepo_doctor::toast::ToastQueue;
use deadrepo_doctor::workflow::{Orchestrator, Phase, WorkflowState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let backend_url = cli.backend.as_deref().unwrap_or(&config.backend_url);
    let backend = HttpBackend::new(backend_url)?;

    if cli.check {
        let status = backend.ping().await?;
        println!("{} {}: {}", "✓".green(), backend_url, status);
        return Ok(());
    }

    let toasts = ToastQueue::new(Duration::from_millis(config.toast_duration_ms));
    let mut orchestrator = Orchestrator::new(
        Arc::new(backend),
        UrlStore::new(config.state_file()),
        toasts,
    );

    let url = cli
        .url
        .clone()
        .unwrap_or_else(|| orchestrator.state().last_submitted_url);

    let spinner = (!cli.quiet).then(|| spawn_spinner(orchestrator.subscribe()));

    let phase = match orchestrator.submit(&url).await {
        Ok(phase) => phase,
        Err(e) => {
            if let Some(spinner) = spinner {
                spinner.abort();
            }
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    };
    if let Some(spinner) = spinner {
        spinner.await?;
    }

    report::terminal::render_toasts(&orchestrator.toasts().snapshot());

    let state = orchestrator.state();
    if let (Phase::Succeeded, Some(analysis)) = (phase, &state.report) {
        match cli.report {
            ReportFormat::Terminal => {
                let view = ReportView::new(analysis);
                let stdout = std::io::stdout();
                let animate = stdout.is_terminal();
                report::terminal::render(
                    &mut stdout.lock(),
                    &view,
                    &state.last_submitted_url,
                    cli.collapse,
                    cli.quiet,
                    animate,
                )
                .await?;
            }
            ReportFormat::Json => {
                println!("{}", serde_json::to_string_pretty(analysis)?);
            }
        }
    }

    if phase == Phase::Failed {
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "deadrepo_doctor=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Show the loading message while a run is in flight.
fn spawn_spinner(mut rx: watch::Receiver<WorkflowState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }

        while rx.changed().await.is_ok() {
            let (phase, message) = {
                let state = rx.borrow_and_update();
                (state.phase, state.loading_message.clone())
            };
            if !phase.is_loading() {
                break;
            }
            pb.enable_steady_tick(Duration::from_millis(80));
            pb.set_message(message);
        }
        pb.finish_and_clear();
    })
}
