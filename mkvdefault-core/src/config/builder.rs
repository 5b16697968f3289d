// ============================================================================
// mkvdefault-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig from raw user input. Language codes are
// kept as strings until `build`, which verifies them against the language
// registry and runs `CoreConfig::validate`, so configuration errors surface
// before any file is touched.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;
use crate::error::CoreResult;
use crate::languages::DesiredLanguage;
use crate::resolver::DefaultPolicy;
use crate::tracks::TrackType;

/// Builder for creating CoreConfig instances.
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    audio: Option<String>,
    subtitle: Option<String>,
    policy: Option<DefaultPolicy>,
    dry_run: bool,
    concurrency: Option<usize>,
    editable_extensions: Option<Vec<String>>,
    mkvmerge_path: Option<PathBuf>,
    mkvpropedit_path: Option<PathBuf>,
    continue_on_inspect_error: bool,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desired default audio language code.
    pub fn audio(mut self, code: impl Into<String>) -> Self {
        self.audio = Some(code.into());
        self
    }

    /// Desired default subtitle language code, or `off`.
    pub fn subtitle(mut self, code: impl Into<String>) -> Self {
        self.subtitle = Some(code.into());
        self
    }

    pub fn policy(mut self, policy: DefaultPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Extensions the editor may touch; a leading dot is ignored.
    pub fn editable_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.editable_extensions = Some(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        );
        self
    }

    pub fn mkvmerge_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mkvmerge_path = Some(path.into());
        self
    }

    pub fn mkvpropedit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mkvpropedit_path = Some(path.into());
        self
    }

    pub fn continue_on_inspect_error(mut self, enabled: bool) -> Self {
        self.continue_on_inspect_error = enabled;
        self
    }

    /// Verifies language codes and builds a validated [`CoreConfig`].
    pub fn build(self) -> CoreResult<CoreConfig> {
        let defaults = CoreConfig::default();

        let audio = self
            .audio
            .as_deref()
            .map(|code| DesiredLanguage::parse(code, TrackType::Audio))
            .transpose()?;
        let subtitle = self
            .subtitle
            .as_deref()
            .map(|code| DesiredLanguage::parse(code, TrackType::Subtitle))
            .transpose()?;

        let config = CoreConfig {
            audio,
            subtitle,
            policy: self.policy.unwrap_or(defaults.policy),
            dry_run: self.dry_run,
            concurrency: self.concurrency.unwrap_or(defaults.concurrency),
            editable_extensions: self
                .editable_extensions
                .unwrap_or(defaults.editable_extensions),
            mkvmerge_path: self.mkvmerge_path.unwrap_or(defaults.mkvmerge_path),
            mkvpropedit_path: self.mkvpropedit_path.unwrap_or(defaults.mkvpropedit_path),
            continue_on_inspect_error: self.continue_on_inspect_error,
        };

        config.validate()?;
        Ok(config)
    }
}
