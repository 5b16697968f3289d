// ============================================================================
// mkvdefault-core/src/reconciler.rs
// ============================================================================
//
// FILE RECONCILER: One File from Inspection to Outcome
//
// Drives a single file through the pipeline: extension check, inspection,
// resolution, translation and (outside dry-run) the editor call, then
// classifies the result into exactly one Outcome. The batch runs the first
// two steps and the rest as separate parallel passes.
//
// KEY COMPONENTS:
// - Outcome: the per-file result taxonomy
// - FileReport: outcome plus the commands and diagnostic that led to it
// - FileReconciler: the pipeline, parameterized by config and editor

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{ContainerEditor, ContainerInspector};
use crate::resolver::resolve;
use crate::tracks::{Container, TrackType};
use crate::translator::{EditCommand, translate_all};

// ---- External crate imports ----
use serde::Serialize;

// ---- Standard library imports ----
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// OUTCOMES
// ============================================================================

/// Result of reconciling one file. Every processed file gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The editor applied every staged change.
    Successful,
    /// Dry-run: changes were staged but not applied.
    EstimatedSuccessful,
    /// The requested defaults were already in place.
    Unchanged,
    /// A desired track is absent and the policy forbade a partial edit.
    MissingTrack,
    /// The file's extension is not editable.
    InvalidFile,
    /// The editor (or, when tolerated, the inspector) failed.
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Successful => "successful",
            Outcome::EstimatedSuccessful => "estimated successful",
            Outcome::Unchanged => "unchanged",
            Outcome::MissingTrack => "missing track",
            Outcome::InvalidFile => "invalid file",
            Outcome::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Per-file result handed to the batch coordinator and reporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Lower-cased `.ext`, or `(none)`
    pub extension: String,
    pub outcome: Outcome,
    /// Translated edits, applied or (in dry-run) only staged.
    pub commands: Vec<EditCommand>,
    pub diagnostic: Option<String>,
}

impl FileReport {
    fn new(path: &Path, outcome: Outcome) -> Self {
        Self {
            path: path.to_path_buf(),
            extension: extension_label(path),
            outcome,
            commands: Vec::new(),
            diagnostic: None,
        }
    }

    /// Report for a file whose extension the editor cannot handle.
    pub fn invalid(path: &Path) -> Self {
        Self::new(path, Outcome::InvalidFile)
    }

    /// Report for a file that failed with `diagnostic`.
    pub fn failed(path: &Path, diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: Some(diagnostic.into()),
            ..Self::new(path, Outcome::Failed)
        }
    }
}

/// Histogram key for a path: `.mkv`, `.mp4`, ... or `(none)`.
pub fn extension_label(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| "(none)".to_string())
}

// ============================================================================
// RECONCILER
// ============================================================================

/// Reconciles files against one run configuration.
pub struct FileReconciler<'a> {
    config: &'a CoreConfig,
    editor: &'a dyn ContainerEditor,
}

impl<'a> FileReconciler<'a> {
    pub fn new(config: &'a CoreConfig, editor: &'a dyn ContainerEditor) -> Self {
        Self { config, editor }
    }

    /// Full pipeline for one file.
    ///
    /// Inspection errors are returned rather than classified; the caller
    /// decides whether they abort the run.
    pub fn reconcile(
        &self,
        path: &Path,
        inspector: &dyn ContainerInspector,
    ) -> CoreResult<FileReport> {
        match self.inspect(path, inspector)? {
            Some(container) => Ok(self.reconcile_container(&container)),
            None => Ok(FileReport::invalid(path)),
        }
    }

    /// Inspects `path`, or returns `None` for a file the editor cannot touch.
    pub fn inspect(
        &self,
        path: &Path,
        inspector: &dyn ContainerInspector,
    ) -> CoreResult<Option<Container>> {
        if !self.config.is_editable(path) {
            log::info!("Skipping non-editable file: {}", path.display());
            return Ok(None);
        }
        inspector.inspect(path).map(Some)
    }

    /// Resolves, translates and applies edits for an already inspected file.
    pub fn reconcile_container(&self, container: &Container) -> FileReport {
        let path = container.path();
        let resolution = resolve(
            container,
            self.config.audio.as_ref(),
            self.config.subtitle.as_ref(),
            self.config.policy,
        );

        for (track_type, status) in &resolution.statuses {
            log::debug!("{}: {} -> {:?}", path.display(), track_type, status);
        }

        if resolution.aborted {
            let missing: Vec<TrackType> = resolution.missing_types().collect();
            log::warn!(
                "No changes were made because {} track(s) did not exist in \"{}\"",
                missing
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("/"),
                path.display()
            );
            return FileReport::new(path, Outcome::MissingTrack);
        }

        if resolution.operations.is_empty() {
            log::info!("No media file changes were made: {}", path.display());
            return FileReport::new(path, Outcome::Unchanged);
        }

        let commands = match translate_all(container, &resolution.operations) {
            Ok(commands) => commands,
            Err(e) => {
                log::error!("{}", e);
                return FileReport::failed(path, e.to_string());
            }
        };

        if self.config.dry_run {
            log::debug!(
                "Constructed CMD (dry run): {} {}",
                path.display(),
                commands
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            log::info!("Dry run (no changes) - would process: {}", path.display());
            return FileReport {
                commands,
                ..FileReport::new(path, Outcome::EstimatedSuccessful)
            };
        }

        let (outcome, diagnostic) = match self.editor.apply(path, &commands) {
            Ok(result) if result.success => {
                log::info!("Successfully processed: {}", path.display());
                (Outcome::Successful, None)
            }
            Ok(result) => (Outcome::Failed, result.diagnostic),
            Err(e) => {
                log::error!("Could not run the editor on {}: {}", path.display(), e);
                (Outcome::Failed, Some(e.to_string()))
            }
        };

        FileReport {
            commands,
            diagnostic,
            ..FileReport::new(path, outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfigBuilder;
    use crate::external::mocks::{FakeEditor, FakeInspector};
    use crate::resolver::DefaultPolicy;
    use crate::tracks::Track;

    const SAMPLE: &str = "/media/sample.mkv";

    fn sample() -> Container {
        Container::new(
            SAMPLE,
            vec![
                Track::audio(0).with_language("eng").with_default(true),
                Track::audio(1).with_language("jpn"),
                Track::subtitle(2).with_language("eng"),
                Track::subtitle(3).with_language("jpn").with_default(true),
            ],
        )
    }

    fn config(audio: &str, subtitle: &str, policy: DefaultPolicy, dry_run: bool) -> CoreConfig {
        CoreConfigBuilder::new()
            .audio(audio)
            .subtitle(subtitle)
            .policy(policy)
            .dry_run(dry_run)
            .build()
            .unwrap()
    }

    #[test]
    fn applies_all_commands_in_one_call() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());

        assert_eq!(report.outcome, Outcome::Successful);
        assert_eq!(report.extension, ".mkv");

        let calls = editor.calls();
        assert_eq!(calls.len(), 1);
        let rendered: Vec<String> = calls[0].commands.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "--edit track:a0 --set flag-default=0",
                "--edit track:a1 --set flag-default=1",
                "--edit track:s1 --set flag-default=0",
                "--edit track:s0 --set flag-default=1",
            ]
        );
    }

    #[test]
    fn dry_run_never_calls_the_editor() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, true);
        let editor = FakeEditor::new();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());

        assert_eq!(report.outcome, Outcome::EstimatedSuccessful);
        assert_eq!(report.commands.len(), 4);
        assert!(editor.calls().is_empty());
    }

    #[test]
    fn strict_missing_track_is_classified() {
        let config = config("fra", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());

        assert_eq!(report.outcome, Outcome::MissingTrack);
        assert!(report.commands.is_empty());
        assert!(editor.calls().is_empty());
    }

    #[test]
    fn lazy_missing_track_still_edits_the_other_type() {
        let config = config("fra", "eng", DefaultPolicy::Lazy, false);
        let editor = FakeEditor::new();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());

        assert_eq!(report.outcome, Outcome::Successful);
        assert!(
            report
                .commands
                .iter()
                .all(|c| c.selector.track_type == TrackType::Subtitle)
        );
    }

    #[test]
    fn already_default_is_unchanged() {
        let config = config("eng", "jpn", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());

        assert_eq!(report.outcome, Outcome::Unchanged);
        assert!(editor.calls().is_empty());
    }

    #[test]
    fn editor_failure_carries_the_diagnostic() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new().with_rejection(SAMPLE, "Error: the file is read-only");
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());

        assert_eq!(report.outcome, Outcome::Failed);
        assert_eq!(
            report.diagnostic.as_deref(),
            Some("Error: the file is read-only")
        );
    }

    #[test]
    fn unstartable_editor_is_a_failed_file() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new().unstartable();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&sample());
        assert_eq!(report.outcome, Outcome::Failed);
        assert!(report.diagnostic.is_some());
    }

    #[test]
    fn interleaved_ids_fail_without_editing() {
        let container = Container::new(
            "/media/odd.mkv",
            vec![
                Track::audio(0).with_language("eng").with_default(true),
                Track::subtitle(1).with_language("eng"),
                Track::audio(2).with_language("jpn"),
            ],
        );
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let report = FileReconciler::new(&config, &editor).reconcile_container(&container);

        assert_eq!(report.outcome, Outcome::Failed);
        assert!(editor.calls().is_empty());
    }

    #[test]
    fn wrong_extension_skips_inspection() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let inspector = FakeInspector::new();
        let report = FileReconciler::new(&config, &editor)
            .reconcile(Path::new("/media/clip.MP4"), &inspector)
            .unwrap();

        assert_eq!(report.outcome, Outcome::InvalidFile);
        assert_eq!(report.extension, ".mp4");
        assert!(inspector.calls().is_empty());
    }

    #[test]
    fn reconcile_runs_the_whole_pipeline() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let inspector = FakeInspector::new().with_container(sample());
        let report = FileReconciler::new(&config, &editor)
            .reconcile(Path::new(SAMPLE), &inspector)
            .unwrap();

        assert_eq!(report.outcome, Outcome::Successful);
        assert_eq!(inspector.calls(), vec![PathBuf::from(SAMPLE)]);
        assert_eq!(editor.calls().len(), 1);
    }

    #[test]
    fn inspection_errors_propagate() {
        let config = config("jpn", "eng", DefaultPolicy::Strict, false);
        let editor = FakeEditor::new();
        let inspector = FakeInspector::new().with_failure(SAMPLE, "EBML header parsing failed");
        let result = FileReconciler::new(&config, &editor).reconcile(Path::new(SAMPLE), &inspector);
        assert!(matches!(result, Err(crate::error::CoreError::InspectionFailed { .. })));
        assert!(editor.calls().is_empty());
    }

    #[test]
    fn extension_labels() {
        assert_eq!(extension_label(Path::new("a/b.MKV")), ".mkv");
        assert_eq!(extension_label(Path::new("a/README")), "(none)");
    }
}
