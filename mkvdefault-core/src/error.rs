// ============================================================================
// mkvdefault-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for mkvdefault-core
//
// This module defines the error type used throughout the core library. Only
// conditions that are fatal for a run live here: configuration problems,
// missing tools and inspection failures. Recoverable per-file conditions
// (missing tracks, editor failures, invalid files) are outcomes, not errors.
//
// KEY COMPONENTS:
// - CoreError: Main error enum with variants for each error category
// - CoreResult: Type alias for Result<T, CoreError>
// - Helper constructors for external command failures

// ---- Internal crate imports ----
use crate::tracks::TrackType;

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Errors that can abort a mkvdefault run.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Invalid regex filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error("No processable media files found")]
    NoFilesFound,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(
        "{} language code (\"{code}\") could not be found/verified, check code and try again",
        capitalized(.track_type)
    )]
    UnknownLanguageCode { track_type: TrackType, code: String },

    #[error("Required external command '{0}' was not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Command '{0}' failed with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed to inspect '{}': {message}", .path.display())]
    InspectionFailed { path: PathBuf, message: String },

    #[error("Failed to parse JSON output: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Track ids out of order in '{}': {message}", .path.display())]
    TrackOrdering { path: PathBuf, message: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

fn capitalized(track_type: &TrackType) -> String {
    let name = track_type.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// HELPER CONSTRUCTORS
// ============================================================================

/// Wraps a spawn failure, mapping `NotFound` to [`CoreError::DependencyNotFound`].
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    let cmd = cmd.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(cmd)
    } else {
        CoreError::CommandStart(cmd, err)
    }
}

/// Wraps a non-zero exit of an external command.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    output: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, output.into())
}
