// ============================================================================
// mkvdefault-core/src/batch.rs
// ============================================================================
//
// BATCH COORDINATOR: Parallel Inspection and Reconciliation
//
// Fans a file list out over a bounded rayon pool in two passes:
//
// 1. Inspect: run the container inspector for every editable file
// 2. Reconcile: resolve, translate and apply edits per file
//
// Workers share nothing but read-only config and the tool adapters. Results
// come back in submission order and are aggregated on the calling thread.
//
// An inspection failure aborts the batch unless the configuration asks for
// it to be recorded as a failed file instead. A lone file given directly
// skips the pool and goes through `FileReconciler::reconcile`.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{ContainerEditor, ContainerInspector};
use crate::reconciler::{FileReconciler, FileReport};
use crate::reporting::AggregateSummary;
use crate::tracks::Container;

// ---- External crate imports ----
use rayon::prelude::*;

// ---- Standard library imports ----
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// PROGRESS OBSERVATION
// ============================================================================

/// The two parallel passes of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchPass {
    Inspect,
    Reconcile,
}

impl fmt::Display for BatchPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchPass::Inspect => f.write_str("Gathering media file info"),
            BatchPass::Reconcile => f.write_str("Processing media files"),
        }
    }
}

/// Observer for batch progress.
///
/// `file_completed` is called from worker threads in completion order;
/// everything else is called from the coordinating thread.
pub trait BatchReporter: Send + Sync {
    fn pass_started(&self, _pass: BatchPass, _total: usize) {}

    fn file_completed(&self, _pass: BatchPass, _path: &Path) {}

    fn pass_finished(&self, _pass: BatchPass) {}

    /// Called once per file, in submission order, after both passes.
    fn file_reconciled(&self, _report: &FileReport) {}
}

/// Reporter that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl BatchReporter for NullReporter {}

// ============================================================================
// BATCH EXECUTION
// ============================================================================

/// Everything a finished batch produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: AggregateSummary,
    /// Per-file reports in submission order
    pub files: Vec<FileReport>,
}

enum Inspection {
    NotEditable,
    Inspected(Container),
    Failed(String),
}

/// Processes `files` with `config.concurrency` workers.
///
/// Returns the aggregated summary and per-file reports. Fails only on
/// pool construction or, unless `continue_on_inspect_error` is set, on the
/// first inspection failure in submission order.
pub fn run_batch(
    config: &CoreConfig,
    files: &[PathBuf],
    inspector: &dyn ContainerInspector,
    editor: &dyn ContainerEditor,
    reporter: &dyn BatchReporter,
) -> CoreResult<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.concurrency)
        .thread_name(|i| format!("mkvdefault-worker-{i}"))
        .build()?;

    log::debug!(
        "Processing {} file(s) with {} worker(s)",
        files.len(),
        config.concurrency
    );

    let reconciler = FileReconciler::new(config, editor);

    // ---- Pass A: inspection ----
    reporter.pass_started(BatchPass::Inspect, files.len());
    let inspected: Vec<CoreResult<Option<Container>>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = reconciler.inspect(path, inspector);
                reporter.file_completed(BatchPass::Inspect, path);
                result
            })
            .collect()
    });
    reporter.pass_finished(BatchPass::Inspect);

    let mut staged = Vec::with_capacity(files.len());
    for (path, result) in files.iter().zip(inspected) {
        let inspection = match result {
            Ok(Some(container)) => Inspection::Inspected(container),
            Ok(None) => Inspection::NotEditable,
            Err(e) if config.continue_on_inspect_error => {
                log::error!("{}", e);
                Inspection::Failed(e.to_string())
            }
            Err(e) => return Err(e),
        };
        staged.push((path, inspection));
    }

    // ---- Pass B: reconciliation ----
    reporter.pass_started(BatchPass::Reconcile, staged.len());
    let reports: Vec<FileReport> = pool.install(|| {
        staged
            .par_iter()
            .map(|(path, inspection)| {
                let report = match inspection {
                    Inspection::Inspected(container) => reconciler.reconcile_container(container),
                    Inspection::NotEditable => FileReport::invalid(path),
                    Inspection::Failed(message) => FileReport::failed(path, message.clone()),
                };
                reporter.file_completed(BatchPass::Reconcile, path);
                report
            })
            .collect()
    });
    reporter.pass_finished(BatchPass::Reconcile);

    // ---- Aggregation ----
    let mut summary = AggregateSummary::new(config.dry_run);
    for report in &reports {
        summary.record(report);
        reporter.file_reconciled(report);
    }

    Ok(BatchReport {
        summary,
        files: reports,
    })
}

/// Processes one file on the calling thread, without a worker pool.
///
/// Same classification and abort rules as [`run_batch`].
pub fn run_single_file(
    config: &CoreConfig,
    path: &Path,
    inspector: &dyn ContainerInspector,
    editor: &dyn ContainerEditor,
    reporter: &dyn BatchReporter,
) -> CoreResult<BatchReport> {
    let reconciler = FileReconciler::new(config, editor);

    let report = match reconciler.reconcile(path, inspector) {
        Ok(report) => report,
        Err(e) if config.continue_on_inspect_error => {
            log::error!("{}", e);
            FileReport::failed(path, e.to_string())
        }
        Err(e) => return Err(e),
    };

    let mut summary = AggregateSummary::new(config.dry_run);
    summary.record(&report);
    reporter.file_reconciled(&report);

    Ok(BatchReport {
        summary,
        files: vec![report],
    })
}
