// ============================================================================
// mkvdefault-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the mkvtoolnix Binaries
//
// This module encapsulates every process the library spawns. Container
// inspection (mkvmerge -J) and container editing (mkvpropedit) sit behind
// traits so the reconciler and batch coordinator can be driven by fakes in
// tests.
//
// KEY COMPONENTS:
// - ContainerInspector / ContainerEditor: the two seams
// - MkvmergeInspector / MkvpropeditEditor: process-backed implementations
// - check_dependency: verifies a binary can be started
// - tool_error_message: extracts a readable diagnostic from tool output

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::tracks::Container;
use crate::translator::EditCommand;

// ---- External crate imports ----
use serde::Deserialize;

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// mkvmerge identification (`-J`) parsing and the process-backed inspector
pub mod mkvmerge;

/// mkvpropedit invocation
pub mod mkvpropedit;

/// In-memory fakes for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use mkvmerge::{MkvmergeInspector, parse_identification};
pub use mkvpropedit::MkvpropeditEditor;

// ============================================================================
// TRAITS
// ============================================================================

/// Reads a media file's track list.
///
/// Implementations must be shareable across the batch worker threads.
pub trait ContainerInspector: Send + Sync {
    /// Returns the file's audio and subtitle tracks.
    ///
    /// Any failure to run the tool or understand its output is an error; the
    /// batch coordinator decides whether that aborts the run.
    fn inspect(&self, path: &Path) -> CoreResult<Container>;
}

/// Result of one editor invocation that actually ran.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorOutcome {
    pub success: bool,
    /// The tool's own error text when `success` is false.
    pub diagnostic: Option<String>,
}

impl EditorOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Applies translated default-flag edits to a file in place.
pub trait ContainerEditor: Send + Sync {
    /// Runs all `commands` against `path` in a single invocation.
    ///
    /// A non-zero exit is reported through [`EditorOutcome`]; `Err` is
    /// reserved for failing to start the tool at all.
    fn apply(&self, path: &Path, commands: &[EditCommand]) -> CoreResult<EditorOutcome>;
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `binary` exists and answers `--version` successfully.
///
/// Returns the first line of the version banner.
pub fn check_dependency(binary: &Path) -> CoreResult<String> {
    let name = binary.display().to_string();

    let output = Command::new(binary)
        .arg("--version")
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) if !output.status.success() => {
            let message = tool_error_message(&output.stdout, &output.stderr);
            log::error!("Dependency check '{} --version' failed: {}", name, message);
            Err(command_failed_error(name, output.status, message))
        }
        Ok(output) => {
            let banner = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            log::debug!("Found dependency {}: {}", name, banner);
            Ok(banner)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", name);
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", name, e);
            Err(CoreError::CommandStart(name, e))
        }
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

#[derive(Deserialize)]
struct ToolErrors {
    #[serde(default)]
    errors: Vec<String>,
}

/// Extracts a diagnostic from a failed tool run.
///
/// mkvtoolnix reports failures as a JSON `errors` array when asked for JSON
/// output; anything else is passed through as trimmed text, falling back to
/// stderr when stdout is empty.
pub fn tool_error_message(stdout: &[u8], stderr: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ToolErrors>(stdout) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join(" ");
        }
    }

    let text = String::from_utf8_lossy(stdout).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    String::from_utf8_lossy(stderr).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_joined() {
        let stdout = br#"{"errors": ["The file could not be opened.", "Bad header."]}"#;
        assert_eq!(
            tool_error_message(stdout, b""),
            "The file could not be opened. Bad header."
        );
    }

    #[test]
    fn plain_text_is_passed_through() {
        assert_eq!(
            tool_error_message(b"Error: no such track\n", b""),
            "Error: no such track"
        );
        assert_eq!(tool_error_message(b"", b"  boom \n"), "boom");
    }

    #[test]
    fn missing_binary_is_reported_as_dependency() {
        let result = check_dependency(Path::new("/nonexistent/mkvdefault-missing-tool"));
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}
