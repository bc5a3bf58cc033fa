// Framework bootstrap for one interactive run.

use crate::domain::RunReport;
use crate::frameworks::config;
use crate::frameworks::spawner::TokioSpawner;
use crate::interface_adapters::report;
use crate::interface_adapters::terminal::{TerminalGuard, TerminalSurface};
use crate::use_cases::{Session, SessionSettings};

use std::fs::OpenOptions;
use std::io::{self, Result};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // The terminal owns stdout; logs go to stderr or a file.
    let (writer, ansi, open_error) = log_writer();
    if config::json_logs() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(writer)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .compact()
            .init();
    }
    if let Some((path, e)) = open_error {
        tracing::warn!(%path, error = %e, "failed to open log file; logging to stderr");
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn log_writer() -> (BoxMakeWriter, bool, Option<(String, io::Error)>) {
    let Some(path) = config::log_file() else {
        return (BoxMakeWriter::new(io::stderr), true, None);
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false, None),
        Err(e) => (BoxMakeWriter::new(io::stderr), true, Some((path, e))),
    }
}

/// Plays one run in the terminal and prints the result once the terminal is restored.
pub async fn run(settings: SessionSettings) -> Result<RunReport> {
    let guard = TerminalGuard::enter().inspect_err(|e| {
        tracing::error!(error = %e, "failed to prepare terminal");
    })?;

    let session = Session::start(
        settings,
        Box::new(TerminalSurface::new()),
        Arc::new(TokioSpawner),
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "failed to start session");
        io::Error::other(e)
    })?;

    let report = session.finish().await;
    drop(guard);
    Ok(report)
}

pub async fn run_with_config(difficulty_arg: Option<String>) -> Result<()> {
    init_runtime();

    let difficulty = config::difficulty(difficulty_arg.as_deref());
    let settings = SessionSettings {
        frame_interval: config::FRAME_INTERVAL,
        input_poll_interval: config::INPUT_POLL_INTERVAL,
        threat_capacity: config::THREAT_CAPACITY,
        interceptor_capacity: config::INTERCEPTOR_CAPACITY,
        max_launchers: config::MAX_LAUNCHERS,
        ..SessionSettings::new(difficulty, config::seed())
    };
    tracing::debug!(difficulty = difficulty.name, seed = settings.seed, "configuration loaded");

    let result = run(settings).await?;

    let rendered = if config::json_report() {
        report::to_json(&result).map_err(io::Error::other)?
    } else {
        report::to_text(&result)
    };
    println!("{rendered}");
    Ok(())
}
