//! Logging bootstrap
//!
//! Diagnostics go to stderr through flexi_logger so they never mix with
//! command output. `RUST_LOG` takes precedence over the computed level.

use flexi_logger::{Logger, LoggerHandle};

use crate::error::{CliError, Result};

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Start the logger; keep the handle alive for the life of the process
pub fn init_logging(configured: &str, verbosity: u8) -> Result<LoggerHandle> {
    let level = effective_level(configured, verbosity)?;
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;
    Ok(handle)
}

/// Configured level, raised one step per `-v`
fn effective_level(configured: &str, verbosity: u8) -> Result<&'static str> {
    let normalized = configured.trim().to_ascii_lowercase();
    let base = LEVELS
        .iter()
        .position(|l| *l == normalized)
        .ok_or_else(|| CliError::logging(format!("unsupported log level `{}`", configured)))?;

    let index = (base + usize::from(verbosity)).min(LEVELS.len() - 1);
    Ok(LEVELS[index])
}
