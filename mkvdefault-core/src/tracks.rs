// ============================================================================
// mkvdefault-core/src/tracks.rs
// ============================================================================
//
// TRACK MODEL: Normalized Audio/Subtitle Track Metadata
//
// In-memory representation of one container's audio and subtitle tracks, as
// reported by the container inspector. Built once per file, never mutated,
// discarded after the file has been reconciled.
//
// Track ids are global within a container. The edit translator relies on the
// muxer placing every audio track below every subtitle track, so the model
// can verify that ordering before any edit is translated.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;

use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of track the resolver cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Audio,
    Subtitle,
}

impl TrackType {
    /// Letter used by mkvpropedit track selectors (`track:a1`, `track:s0`).
    pub fn letter(self) -> char {
        match self {
            TrackType::Audio => 'a',
            TrackType::Subtitle => 's',
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackType::Audio => write!(f, "audio"),
            TrackType::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// One audio or subtitle track inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: u32,
    pub track_type: TrackType,
    /// Lower-cased language code, if the track declares one.
    pub language: Option<String>,
    pub is_default: bool,
    pub is_enabled: bool,
    pub is_forced: bool,
    /// Display name, diagnostic only.
    pub name: Option<String>,
}

impl Track {
    /// Creates an enabled, non-default, non-forced track without language.
    pub fn new(id: u32, track_type: TrackType) -> Self {
        Self {
            id,
            track_type,
            language: None,
            is_default: false,
            is_enabled: true,
            is_forced: false,
            name: None,
        }
    }

    pub fn audio(id: u32) -> Self {
        Self::new(id, TrackType::Audio)
    }

    pub fn subtitle(id: u32) -> Self {
        Self::new(id, TrackType::Subtitle)
    }

    pub fn with_language(mut self, language: impl AsRef<str>) -> Self {
        self.language = Some(language.as_ref().to_lowercase());
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn with_forced(mut self, is_forced: bool) -> Self {
        self.is_forced = is_forced;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// True if the track's language equals `code` (already lower-cased).
    pub fn has_language(&self, code: &str) -> bool {
        self.language.as_deref() == Some(code)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}]",
            self.id,
            self.track_type,
            self.language.as_deref().unwrap_or("und")
        )?;
        if let Some(name) = &self.name {
            write!(f, " \"{name}\"")?;
        }
        if self.is_default {
            write!(f, " (default)")?;
        }
        if self.is_forced {
            write!(f, " (forced)")?;
        }
        if !self.is_enabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}

/// One media file's audio and subtitle tracks, each ordered by ascending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub path: PathBuf,
    pub audio_tracks: Vec<Track>,
    pub subtitle_tracks: Vec<Track>,
}

impl Container {
    /// Partitions `tracks` by type and sorts each partition by id.
    pub fn new(path: impl Into<PathBuf>, tracks: impl IntoIterator<Item = Track>) -> Self {
        let (mut audio_tracks, mut subtitle_tracks): (Vec<Track>, Vec<Track>) = tracks
            .into_iter()
            .partition(|t| t.track_type == TrackType::Audio);
        audio_tracks.sort_by_key(|t| t.id);
        subtitle_tracks.sort_by_key(|t| t.id);

        Self {
            path: path.into(),
            audio_tracks,
            subtitle_tracks,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tracks(&self, track_type: TrackType) -> &[Track] {
        match track_type {
            TrackType::Audio => &self.audio_tracks,
            TrackType::Subtitle => &self.subtitle_tracks,
        }
    }

    pub fn audio_track_count(&self) -> usize {
        self.audio_tracks.len()
    }

    /// Checks that every audio id sits below every subtitle id.
    ///
    /// Subtitle selectors are derived as `global id - audio track count`; a
    /// container violating this ordering would be silently mis-addressed.
    pub fn validate_id_ordering(&self) -> CoreResult<()> {
        let max_audio = self.audio_tracks.iter().map(|t| t.id).max();
        let min_subtitle = self.subtitle_tracks.iter().map(|t| t.id).min();

        match (max_audio, min_subtitle) {
            (Some(audio), Some(subtitle)) if audio >= subtitle => Err(CoreError::TrackOrdering {
                path: self.path.clone(),
                message: format!(
                    "audio track #{audio} is not below subtitle track #{subtitle}"
                ),
            }),
            _ => Ok(()),
        }
    }
}
