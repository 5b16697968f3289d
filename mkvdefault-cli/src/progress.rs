//! Progress bars for the two batch passes.
//!
//! Implements mkvdefault-core's `BatchReporter` with one indicatif bar per
//! pass. Bars are hidden when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mkvdefault_core::{BatchPass, BatchReporter, FileReport, Outcome};

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

/// Batch observer drawing a bar per pass and collecting per-file problems.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    visible: bool,
    problems: Mutex<Vec<String>>,
}

impl ProgressReporter {
    pub fn new(visible: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            visible: visible && std::io::stderr().is_terminal(),
            problems: Mutex::new(Vec::new()),
        }
    }

    /// Failed/missing-track lines gathered during the run, in submission order.
    pub fn problems(&self) -> Vec<String> {
        self.problems.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{msg}: {percent:>3}% [{bar:30}] {pos}/{len} files ({elapsed_precise})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##.")
    }
}

impl BatchReporter for ProgressReporter {
    fn pass_started(&self, pass: BatchPass, total: usize) {
        let bar = ProgressBar::new(total as u64);
        if self.visible {
            bar.set_style(Self::style());
            bar.set_message(pass.to_string());
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(mut current) = self.bar.lock() {
            *current = Some(bar);
        }
    }

    fn file_completed(&self, _pass: BatchPass, _path: &Path) {
        if let Ok(current) = self.bar.lock() {
            if let Some(bar) = current.as_ref() {
                bar.inc(1);
            }
        }
    }

    fn pass_finished(&self, _pass: BatchPass) {
        if let Ok(mut current) = self.bar.lock() {
            if let Some(bar) = current.take() {
                bar.finish();
            }
        }
    }

    fn file_reconciled(&self, report: &FileReport) {
        let line = match report.outcome {
            Outcome::Failed => format!(
                "Failed: {} ({})",
                report.path.display(),
                report.diagnostic.as_deref().unwrap_or("no diagnostic")
            ),
            Outcome::MissingTrack => {
                format!("Missing track(s): {}", report.path.display())
            }
            _ => return,
        };
        if let Ok(mut problems) = self.problems.lock() {
            problems.push(line);
        }
    }
}
