//! Tracing subscriber setup.
//!
//! The terminal UI owns the screen, so interactive sessions only log when a
//! file is given. Headless runs log to stderr, keeping stdout for results.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Levels follow `RUST_LOG`, default `info`.
pub fn init(target: &LogTarget) -> anyhow::Result<()> {
    match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .try_init()
                .context("installing stderr subscriber")?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .try_init()
                .context("installing file subscriber")?;
        }
    }

    tracing::debug!(destination = ?target, "logging initialized");
    Ok(())
}
