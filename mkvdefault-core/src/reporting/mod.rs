//! Run reporting for mkvdefault.
//!
//! Aggregates per-file reports into the end-of-run tally.

pub mod summary;

pub use summary::AggregateSummary;
