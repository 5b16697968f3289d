//! Applies default-flag edits with mkvpropedit.

use super::{ContainerEditor, EditorOutcome, tool_error_message};
use crate::error::{CoreResult, command_start_error};
use crate::translator::{EditCommand, command_args};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Edits files in place with `mkvpropedit <file> --edit ... --set ...`.
#[derive(Debug, Clone)]
pub struct MkvpropeditEditor {
    binary: PathBuf,
}

impl MkvpropeditEditor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Full argument list for one invocation, file path first.
    pub fn arguments(path: &Path, commands: &[EditCommand]) -> Vec<OsString> {
        std::iter::once(path.as_os_str().to_os_string())
            .chain(command_args(commands).into_iter().map(OsString::from))
            .collect()
    }
}

impl ContainerEditor for MkvpropeditEditor {
    fn apply(&self, path: &Path, commands: &[EditCommand]) -> CoreResult<EditorOutcome> {
        let cmd_name = self.binary.display().to_string();
        let args = Self::arguments(path, commands);
        log::debug!(
            "Constructed CMD: {} {}",
            cmd_name,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(cmd_name.clone(), e))?;

        if output.status.success() {
            Ok(EditorOutcome::succeeded())
        } else {
            let message = tool_error_message(&output.stdout, &output.stderr);
            log::error!("{} failed on {}: {}", cmd_name, path.display(), message);
            Ok(EditorOutcome::failed(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::translator::TrackSelector;
    use crate::tracks::TrackType;

    #[test]
    fn arguments_start_with_the_file() {
        let commands = [EditCommand {
            selector: TrackSelector {
                track_type: TrackType::Subtitle,
                number: 0,
            },
            default_flag: true,
        }];
        let args = MkvpropeditEditor::arguments(Path::new("/m/a.mkv"), &commands);
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["/m/a.mkv", "--edit", "track:s0", "--set", "flag-default=1"]
        );
    }

    #[test]
    fn missing_editor_is_an_error() {
        let editor = MkvpropeditEditor::new("/nonexistent/mkvpropedit-missing");
        let result = editor.apply(Path::new("/m/a.mkv"), &[]);
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}
