//! Bootstrap utilities for the fixture binaries.
//!
//! Shared initialization code for every script entry point.

use std::fmt::Display;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the FIXTURES_LOG environment variable.
///
/// Defaults to "info" level if FIXTURES_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Config file path from `--config <path>`, `--config=<path>` or `-c <path>`.
///
/// Other arguments are ignored. Returns `None` when no path is given.
pub fn parse_config_path() -> Option<String> {
    config_path_from(std::env::args().skip(1))
}

fn config_path_from<I: IntoIterator<Item = String>>(args: I) -> Option<String> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            return args.next();
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    None
}

/// Map the outcome of a script run to a process exit code.
///
/// Failures are logged once here so every binary reports them the same way.
pub fn exit_code<E: Display>(script: &str, result: Result<(), E>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(script = %script, error = %e, "Script failed");
            ExitCode::FAILURE
        }
    }
}
