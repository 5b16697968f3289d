// ============================================================================
// mkvdefault-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reports everything through mkvdefault-core's CoreError, adding
// context where a bare core error would not tell the user what was being
// attempted.

// ---- Internal crate imports ----
use mkvdefault_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

// ============================================================================
// ERROR CONVERSION UTILITIES
// ============================================================================

/// Extension trait for adding context to errors in the CLI.
///
/// Works like anyhow's `context` but produces [`CoreError::OperationFailed`].
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Add context using a closure (for lazy evaluation).
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| CoreError::OperationFailed(f().to_string()))
    }
}

/// Short hint printed under a fatal error, when one helps.
pub fn suggestion_for(error: &CoreError) -> Option<&'static str> {
    match error {
        CoreError::DependencyNotFound(_) => Some(
            "Install mkvtoolnix or point --mkvmerge/--mkvpropedit (or MKVDEFAULT_MKVMERGE/MKVDEFAULT_MKVPROPEDIT) at the binaries",
        ),
        CoreError::UnknownLanguageCode { .. } => {
            Some("Run `mkvdefault languages` to list the accepted codes")
        }
        CoreError::InspectionFailed { .. } => {
            Some("Use --continue-on-error to record unreadable files as failed and keep going")
        }
        CoreError::InvalidFilter(_) => Some("Check the --regex-filter pattern"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn context_wraps_core_errors() {
        let result: Result<(), io::Error> = Err(io::Error::other("disk on fire"));
        let err = result.cli_context("Failed to open log file").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to open log file: I/O error: disk on fire"
        );
    }

    #[test]
    fn option_context() {
        let value: Option<u8> = None;
        let err = value.cli_with_context(|| "no input path").unwrap_err();
        assert!(matches!(err, CoreError::OperationFailed(msg) if msg == "no input path"));
    }

    #[test]
    fn suggestions_cover_common_failures() {
        assert!(suggestion_for(&CoreError::DependencyNotFound("mkvmerge".into())).is_some());
        assert!(suggestion_for(&CoreError::NoFilesFound).is_none());
    }
}
