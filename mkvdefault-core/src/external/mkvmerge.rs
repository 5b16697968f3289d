//! mkvmerge identification output (`mkvmerge -J <file>`) and the inspector
//! that produces it.
//!
//! Only audio and subtitle tracks are kept; video, button and other tracks are
//! ignored but still occupy global ids.

use super::{ContainerInspector, tool_error_message};
use crate::error::{CoreError, CoreResult, command_start_error};
use crate::tracks::{Container, Track, TrackType};

use serde::Deserialize;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Deserialize)]
struct Identification {
    #[serde(default)]
    container: Option<IdentifiedContainer>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    tracks: Vec<IdentifiedTrack>,
}

#[derive(Debug, Deserialize)]
struct IdentifiedContainer {
    #[serde(default)]
    recognized: bool,
}

#[derive(Debug, Deserialize)]
struct IdentifiedTrack {
    id: u32,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: TrackProperties,
}

#[derive(Debug, Default, Deserialize)]
struct TrackProperties {
    language: Option<String>,
    track_name: Option<String>,
    default_track: Option<bool>,
    enabled_track: Option<bool>,
    forced_track: Option<bool>,
}

impl IdentifiedTrack {
    fn into_track(self) -> Option<Track> {
        let track_type = match self.kind.as_str() {
            "audio" => TrackType::Audio,
            "subtitles" => TrackType::Subtitle,
            _ => return None,
        };

        let props = self.properties;
        let mut track = Track::new(self.id, track_type)
            .with_default(props.default_track.unwrap_or(false))
            .with_enabled(props.enabled_track.unwrap_or(true))
            .with_forced(props.forced_track.unwrap_or(false));
        if let Some(language) = props.language {
            track = track.with_language(language);
        }
        if let Some(name) = props.track_name {
            track = track.with_name(name);
        }
        Some(track)
    }
}

/// Parses `mkvmerge -J` output for `path` into a [`Container`].
pub fn parse_identification(path: &Path, json: &[u8]) -> CoreResult<Container> {
    let identification: Identification =
        serde_json::from_slice(json).map_err(|e| CoreError::InspectionFailed {
            path: path.to_path_buf(),
            message: format!("unreadable mkvmerge output: {e}"),
        })?;

    let recognized = identification
        .container
        .as_ref()
        .is_none_or(|c| c.recognized);
    if !recognized || !identification.errors.is_empty() {
        let message = if identification.errors.is_empty() {
            "container format not recognized".to_string()
        } else {
            identification.errors.join(" ")
        };
        return Err(CoreError::InspectionFailed {
            path: path.to_path_buf(),
            message,
        });
    }

    let tracks = identification
        .tracks
        .into_iter()
        .filter_map(IdentifiedTrack::into_track);
    Ok(Container::new(path, tracks))
}

/// Inspects files by running `mkvmerge -J`.
#[derive(Debug, Clone)]
pub struct MkvmergeInspector {
    binary: PathBuf,
}

impl MkvmergeInspector {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl ContainerInspector for MkvmergeInspector {
    fn inspect(&self, path: &Path) -> CoreResult<Container> {
        let cmd_name = self.binary.display().to_string();
        log::debug!("Running {} -J {}", cmd_name, path.display());

        let output = Command::new(&self.binary)
            .arg("-J")
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(cmd_name.clone(), e))?;

        if !output.status.success() {
            let message = tool_error_message(&output.stdout, &output.stderr);
            log::debug!(
                "{} exited with {} for {}: {}",
                cmd_name,
                output.status,
                path.display(),
                message
            );
            return Err(CoreError::InspectionFailed {
                path: path.to_path_buf(),
                message,
            });
        }

        parse_identification(path, &output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "container": {"recognized": true, "supported": true, "type": "Matroska"},
        "errors": [],
        "tracks": [
            {"id": 0, "type": "video", "properties": {"default_track": true}},
            {"id": 1, "type": "audio", "properties": {
                "language": "jpn", "track_name": "Japanese 5.1",
                "default_track": false, "enabled_track": true, "forced_track": false}},
            {"id": 2, "type": "audio", "properties": {
                "language": "ENG", "default_track": true}},
            {"id": 3, "type": "subtitles", "properties": {
                "language": "eng", "default_track": false, "forced_track": true}}
        ]
    }"#;

    #[test]
    fn keeps_audio_and_subtitle_tracks_only() {
        let container = parse_identification(Path::new("/m/show.mkv"), SAMPLE.as_bytes()).unwrap();

        assert_eq!(container.audio_tracks.len(), 2);
        assert_eq!(container.subtitle_tracks.len(), 1);

        let jpn = &container.audio_tracks[0];
        assert_eq!(jpn.id, 1);
        assert_eq!(jpn.language.as_deref(), Some("jpn"));
        assert_eq!(jpn.name.as_deref(), Some("Japanese 5.1"));
        assert!(!jpn.is_default);

        let eng = &container.audio_tracks[1];
        assert_eq!(eng.language.as_deref(), Some("eng"));
        assert!(eng.is_default);
        assert!(eng.is_enabled);

        let sub = &container.subtitle_tracks[0];
        assert_eq!(sub.id, 3);
        assert!(sub.is_forced);
    }

    #[test]
    fn missing_flags_take_matroska_defaults() {
        let json = br#"{"tracks": [{"id": 0, "type": "subtitles"}]}"#;
        let container = parse_identification(Path::new("a.mkv"), json).unwrap();
        let track = &container.subtitle_tracks[0];
        assert!(!track.is_default);
        assert!(track.is_enabled);
        assert!(track.language.is_none());
    }

    #[test]
    fn unrecognized_container_is_an_inspection_failure() {
        let json = br#"{"container": {"recognized": false}, "errors": [], "tracks": []}"#;
        let result = parse_identification(Path::new("notes.txt"), json);
        assert!(matches!(result, Err(CoreError::InspectionFailed { .. })));
    }

    #[test]
    fn tool_errors_are_surfaced() {
        let json = br#"{"errors": ["The file 'x.mkv' could not be opened for reading."]}"#;
        match parse_identification(Path::new("x.mkv"), json) {
            Err(CoreError::InspectionFailed { message, .. }) => {
                assert!(message.contains("could not be opened"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn garbage_is_an_inspection_failure() {
        assert!(parse_identification(Path::new("x.mkv"), b"not json").is_err());
    }
}
