//! Configuration structures and constants for the mkvdefault-core library.
//!
//! This module provides the run configuration: which languages should become
//! the default, how missing tracks are handled, how many workers to use and
//! where the mkvtoolnix binaries live.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::languages::DesiredLanguage;
use crate::resolver::DefaultPolicy;

use std::path::{Path, PathBuf};

pub use builder::CoreConfigBuilder;

// Default constants

/// Default container inspector binary, resolved through `PATH`.
pub const DEFAULT_MKVMERGE: &str = "mkvmerge";

/// Default container editor binary, resolved through `PATH`.
pub const DEFAULT_MKVPROPEDIT: &str = "mkvpropedit";

/// Default number of files processed concurrently (sequential).
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Extensions mkvpropedit can edit in place (the Matroska family).
pub const MATROSKA_EXTENSIONS: &[&str] = &["mkv", "mka", "mks", "mk3d"];

/// Main configuration structure for a mkvdefault run.
///
/// Desired languages are stored already verified, so a `CoreConfig` that
/// passed [`CoreConfig::validate`] can be handed to every worker unchanged.
///
/// # Examples
///
/// ```rust
/// use mkvdefault_core::config::CoreConfigBuilder;
/// use mkvdefault_core::DefaultPolicy;
///
/// let config = CoreConfigBuilder::new()
///     .audio("jpn")
///     .subtitle("eng")
///     .policy(DefaultPolicy::Lazy)
///     .concurrency(4)
///     .dry_run(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.concurrency, 4);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Desired default audio language (never "off")
    pub audio: Option<DesiredLanguage>,

    /// Desired default subtitle language, or "off"
    pub subtitle: Option<DesiredLanguage>,

    /// Missing-track policy
    pub policy: DefaultPolicy,

    /// Resolve and count edits without invoking the editor
    pub dry_run: bool,

    /// Number of worker threads for each batch pass
    pub concurrency: usize,

    /// Lower-cased extensions (without dot) the editor may touch
    pub editable_extensions: Vec<String>,

    /// Location of the mkvmerge binary
    pub mkvmerge_path: PathBuf,

    /// Location of the mkvpropedit binary
    pub mkvpropedit_path: PathBuf,

    /// Record inspection failures as `failed` instead of aborting the batch
    pub continue_on_inspect_error: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            audio: None,
            subtitle: None,
            policy: DefaultPolicy::default(),
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
            editable_extensions: MATROSKA_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            mkvmerge_path: PathBuf::from(DEFAULT_MKVMERGE),
            mkvpropedit_path: PathBuf::from(DEFAULT_MKVPROPEDIT),
            continue_on_inspect_error: false,
        }
    }
}

impl CoreConfig {
    /// Validates the configuration before any file is processed.
    pub fn validate(&self) -> CoreResult<()> {
        if self.audio.is_none() && self.subtitle.is_none() {
            return Err(CoreError::Config(
                "at least one of the audio or subtitle languages must be set".to_string(),
            ));
        }

        if matches!(self.audio, Some(DesiredLanguage::Off)) {
            return Err(CoreError::Config(
                "the audio language cannot be set to \"off\"".to_string(),
            ));
        }

        if self.concurrency == 0 {
            return Err(CoreError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }

        if self.editable_extensions.is_empty() {
            return Err(CoreError::Config(
                "at least one editable extension is required".to_string(),
            ));
        }

        Ok(())
    }

    /// True if `path` has one of the editable extensions (case-insensitive).
    pub fn is_editable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.editable_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::TrackType;

    fn with_audio() -> CoreConfig {
        CoreConfig {
            audio: Some(DesiredLanguage::parse("eng", TrackType::Audio).unwrap()),
            ..CoreConfig::default()
        }
    }

    #[test]
    fn default_config_needs_a_language() {
        assert!(matches!(
            CoreConfig::default().validate(),
            Err(CoreError::Config(_))
        ));
        assert!(with_audio().validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = CoreConfig {
            concurrency: 0,
            ..with_audio()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn editable_extensions_are_case_insensitive() {
        let config = with_audio();
        assert!(config.is_editable(Path::new("/m/Movie.MKV")));
        assert!(config.is_editable(Path::new("/m/album.mka")));
        assert!(!config.is_editable(Path::new("/m/movie.mp4")));
        assert!(!config.is_editable(Path::new("/m/README")));
    }
}
