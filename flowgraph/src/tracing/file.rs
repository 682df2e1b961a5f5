use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

use super::filter::DebugOnlyFilter;
#[cfg(feature = "prod")]
use super::filter::ErrorOnlyFilter;
use super::filter::ErrorWarnFilter;
#[cfg(feature = "dev")]
use super::filter::InfoAndAboveFilter;
use super::format::FlowgraphFormat;
use crate::config::LoggingConfig;
use crate::error::Context;
use crate::error::Result;

// Appender workers flush on drop, so their guards live for the whole process
static GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());

pub fn setup_tracing(
    engine_name: &str,
    logging: &LoggingConfig,
) -> Result<()> {
    let base_logs_dir = Path::new(logging.directory());
    let debug_dir = base_logs_dir.join("debug");
    let error_dir = base_logs_dir.join("error");

    for dir in [base_logs_dir, debug_dir.as_path(), error_dir.as_path()] {
        std::fs::create_dir_all(dir).with_context(|| format!("failed to create logs directory: {}", dir.display()))?;
    }

    let file_name = format!("{}.log", engine_name);

    #[cfg(feature = "dev")]
    let info_appender = RollingFileAppender::new(Rotation::DAILY, base_logs_dir, &file_name);
    let debug_appender = RollingFileAppender::new(Rotation::DAILY, &debug_dir, &file_name);
    let error_appender = RollingFileAppender::new(Rotation::DAILY, &error_dir, &file_name);

    #[cfg(feature = "dev")]
    let (non_blocking_info, info_guard) = tracing_appender::non_blocking(info_appender);
    let (non_blocking_debug, debug_guard) = tracing_appender::non_blocking(debug_appender);
    let (non_blocking_error, error_guard) = tracing_appender::non_blocking(error_appender);

    let format = FlowgraphFormat {
        engine_name: engine_name.to_string(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_writer(non_blocking_debug)
                .with_filter(DebugOnlyFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_writer(non_blocking_error)
                .with_filter(ErrorWarnFilter),
        );

    #[cfg(feature = "prod")]
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::Layer::default()
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .event_format(format.clone())
            .with_filter(ErrorOnlyFilter),
    );

    #[cfg(feature = "dev")]
    let subscriber = subscriber
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_filter(InfoAndAboveFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_writer(non_blocking_info)
                .with_filter(InfoAndAboveFilter),
        );

    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing subscriber")?;

    #[cfg(feature = "dev")]
    keep_guard(&GUARDS, info_guard);
    keep_guard(&GUARDS, debug_guard);
    keep_guard(&GUARDS, error_guard);

    tracing::info!("{}_logging_started::logs::{}", engine_name, base_logs_dir.display());
    Ok(())
}

/// Holds `guard` for the life of `store`. A poisoned lock still takes the guard.
fn keep_guard(
    store: &Mutex<Vec<WorkerGuard>>,
    guard: WorkerGuard,
) {
    store.lock().unwrap_or_else(PoisonError::into_inner).push(guard);
}
