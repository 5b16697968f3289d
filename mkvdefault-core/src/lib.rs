//! Core library for flagging the default audio and subtitle tracks of
//! Matroska files using mkvmerge and mkvpropedit.
//!
//! This crate provides media file discovery, the track model, the
//! default-track resolver, translation into mkvpropedit edits, per-file
//! reconciliation and the parallel batch coordinator.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mkvdefault_core::config::CoreConfigBuilder;
//! use mkvdefault_core::discovery::{DiscoveryOptions, find_media_files};
//! use mkvdefault_core::external::{MkvmergeInspector, MkvpropeditEditor};
//! use mkvdefault_core::{NullReporter, run_batch};
//! use std::path::Path;
//!
//! let config = CoreConfigBuilder::new()
//!     .audio("jpn")
//!     .subtitle("eng")
//!     .concurrency(4)
//!     .build()
//!     .unwrap();
//!
//! let files = find_media_files(Path::new("/srv/anime"), &DiscoveryOptions::default()).unwrap();
//! let inspector = MkvmergeInspector::new(&config.mkvmerge_path);
//! let editor = MkvpropeditEditor::new(&config.mkvpropedit_path);
//!
//! let report = run_batch(&config, &files, &inspector, &editor, &NullReporter).unwrap();
//! println!("{}", report.summary);
//! ```

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod languages;
pub mod reconciler;
pub mod reporting;
pub mod resolver;
pub mod tracks;
pub mod translator;
pub mod utils;

// Re-exports for public API
pub use batch::{BatchPass, BatchReport, BatchReporter, NullReporter, run_batch, run_single_file};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::{DiscoveryOptions, find_media_files};
pub use error::{CoreError, CoreResult};
pub use external::{
    ContainerEditor, ContainerInspector, EditorOutcome, MkvmergeInspector, MkvpropeditEditor,
    check_dependency,
};
pub use languages::DesiredLanguage;
pub use reconciler::{FileReconciler, FileReport, Outcome};
pub use reporting::AggregateSummary;
pub use resolver::{DefaultPolicy, EditOperation, Resolution, TypeStatus, resolve};
pub use tracks::{Container, Track, TrackType};
pub use translator::{EditCommand, TrackSelector, translate, translate_all};
pub use utils::{format_count, format_runtime};
