// ============================================================================
// mkvdefault-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern Dispatch for Console and File Output
//
// Installs the process-wide `log` backend. Library code (including the rayon
// workers in mkvdefault-core) only uses the stateless `log` macros, so no
// per-worker setup is needed.
//
// - Console: stderr, timestamped, level colored when color is enabled
// - File (--log-file): same lines with ANSI codes stripped

// ---- Internal crate imports ----
use crate::cli::Verbosity;
use crate::error::{CliErrorContext, CliResult};

// ---- External crate imports ----
use log::Level;
use mkvdefault_core::CoreError;
use owo_colors::OwoColorize;

// ---- Standard library imports ----
use std::path::Path;

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn colored_level(level: Level) -> String {
    match level {
        Level::Error => level.red().bold().to_string(),
        Level::Warn => level.yellow().to_string(),
        Level::Info => level.green().to_string(),
        Level::Debug => level.cyan().to_string(),
        Level::Trace => level.dimmed().to_string(),
    }
}

/// Installs the global logger.
///
/// Must be called once, before any work starts.
pub fn init_logging(verbosity: Verbosity, log_file: Option<&Path>, use_color: bool) -> CliResult<()> {
    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = if use_color {
                colored_level(record.level())
            } else {
                record.level().to_string()
            };
            out.finish(format_args!("{} [{}] {}", get_timestamp(), level, message))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .level(verbosity.level_filter())
        .chain(console);

    if let Some(path) = log_file {
        let file = fern::log_file(path)
            .cli_with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        let file_dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                let plain = strip_ansi_escapes::strip_str(message.to_string());
                out.finish(format_args!(
                    "{} [{}] [{}] {}",
                    get_timestamp(),
                    record.level(),
                    record.target(),
                    plain
                ))
            })
            .chain(file);
        dispatch = dispatch.chain(file_dispatch);
    }

    dispatch
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))?;

    log::debug!("Logging initialized at level {:?}", verbosity);
    Ok(())
}
