//! Summary reporting module
//!
//! Per-outcome counters plus the extension histogram, and the table printed
//! at the end of every run.

use crate::reconciler::{FileReport, Outcome};
use crate::utils::format_count;

use serde::Serialize;

use std::collections::BTreeMap;
use std::fmt;

const RULE_WIDTH: usize = 28;
const LABEL_WIDTH: usize = 21;

/// Aggregated outcome counts for a batch.
///
/// Merging is commutative and associative, so partial summaries from any
/// number of workers can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub dry_run: bool,
    pub total_files: usize,
    /// File extension (`.mkv`, `(none)`, ...) to number of files
    pub extensions: BTreeMap<String, usize>,
    pub successful: usize,
    pub estimated_successful: usize,
    pub unchanged: usize,
    pub missing_track: usize,
    pub invalid_file: usize,
    pub failed: usize,
}

impl AggregateSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Counts one file.
    pub fn record(&mut self, report: &FileReport) {
        self.total_files += 1;
        *self.extensions.entry(report.extension.clone()).or_insert(0) += 1;
        *self.counter_mut(report.outcome) += 1;
    }

    /// Adds `other`'s counts into `self`.
    pub fn merge(&mut self, other: &AggregateSummary) {
        self.dry_run |= other.dry_run;
        self.total_files += other.total_files;
        for (ext, count) in &other.extensions {
            *self.extensions.entry(ext.clone()).or_insert(0) += count;
        }
        self.successful += other.successful;
        self.estimated_successful += other.estimated_successful;
        self.unchanged += other.unchanged;
        self.missing_track += other.missing_track;
        self.invalid_file += other.invalid_file;
        self.failed += other.failed;
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Successful => self.successful,
            Outcome::EstimatedSuccessful => self.estimated_successful,
            Outcome::Unchanged => self.unchanged,
            Outcome::MissingTrack => self.missing_track,
            Outcome::InvalidFile => self.invalid_file,
            Outcome::Failed => self.failed,
        }
    }

    fn counter_mut(&mut self, outcome: Outcome) -> &mut usize {
        match outcome {
            Outcome::Successful => &mut self.successful,
            Outcome::EstimatedSuccessful => &mut self.estimated_successful,
            Outcome::Unchanged => &mut self.unchanged,
            Outcome::MissingTrack => &mut self.missing_track,
            Outcome::InvalidFile => &mut self.invalid_file,
            Outcome::Failed => &mut self.failed,
        }
    }
}

impl fmt::Display for AggregateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.dry_run { "(DRY RUN)" } else { "" };
        writeln!(
            f,
            "{:>9} Total Files: {}",
            marker,
            format_count(self.total_files)
        )?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        for (ext, count) in &self.extensions {
            writeln!(f, "{:>LABEL_WIDTH$}: {}", ext, format_count(*count))?;
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        let rows = [
            if self.dry_run {
                ("Estimated Successful", self.estimated_successful)
            } else {
                ("Successful Processing", self.successful)
            },
            ("Unchanged/Untouched", self.unchanged),
            ("Missing Track(s)", self.missing_track),
            ("Invalid File", self.invalid_file),
            ("Failed Processing", self.failed),
        ];
        for (label, count) in rows {
            writeln!(f, "{:>LABEL_WIDTH$}: {}", label, format_count(count))?;
        }
        Ok(())
    }
}
