// ============================================================================
// mkvdefault-core/src/translator.rs
// ============================================================================
//
// EDIT TRANSLATOR: Global Track Ids to mkvpropedit Selectors
//
// mkvpropedit addresses tracks per type (`track:a1`, `track:s0`) rather than by
// the global id the inspector reports. Audio ids are used unchanged; subtitle
// ids are shifted down by the number of audio tracks in the container.

use crate::error::{CoreError, CoreResult};
use crate::resolver::EditOperation;
use crate::tracks::{Container, TrackType};

use serde::Serialize;

use std::fmt;

/// Type-relative track address understood by the container editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackSelector {
    pub track_type: TrackType,
    pub number: u32,
}

impl fmt::Display for TrackSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track:{}{}", self.track_type.letter(), self.number)
    }
}

/// A translated edit: select one track, then set its default flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditCommand {
    pub selector: TrackSelector,
    pub default_flag: bool,
}

impl EditCommand {
    /// Editor argument fragment, e.g. `--edit track:s0 --set flag-default=1`.
    pub fn to_args(&self) -> [String; 4] {
        [
            "--edit".to_string(),
            self.selector.to_string(),
            "--set".to_string(),
            format!("flag-default={}", u8::from(self.default_flag)),
        ]
    }
}

impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_args().join(" "))
    }
}

/// Translates one operation given the container's audio track count.
pub fn translate(operation: &EditOperation, audio_track_count: usize) -> CoreResult<EditCommand> {
    let number = match operation.track_type {
        TrackType::Audio => operation.global_id,
        TrackType::Subtitle => {
            let offset = u32::try_from(audio_track_count).map_err(|_| {
                CoreError::OperationFailed(format!(
                    "audio track count {audio_track_count} does not fit a track selector"
                ))
            })?;
            operation.global_id.checked_sub(offset).ok_or_else(|| {
                CoreError::OperationFailed(format!(
                    "subtitle track #{} sits below {} audio track(s)",
                    operation.global_id, audio_track_count
                ))
            })?
        }
    };

    Ok(EditCommand {
        selector: TrackSelector {
            track_type: operation.track_type,
            number,
        },
        default_flag: operation.default_flag,
    })
}

/// Translates every operation for `container`, preserving order.
///
/// Verifies the audio-before-subtitle id ordering first so that a file which
/// breaks it is rejected instead of mis-addressed.
pub fn translate_all(
    container: &Container,
    operations: &[EditOperation],
) -> CoreResult<Vec<EditCommand>> {
    container.validate_id_ordering()?;

    let audio_track_count = container.audio_track_count();
    operations
        .iter()
        .map(|operation| {
            translate(operation, audio_track_count).map_err(|e| CoreError::TrackOrdering {
                path: container.path.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Flattens commands into the editor's argument list.
pub fn command_args(commands: &[EditCommand]) -> Vec<String> {
    commands.iter().flat_map(EditCommand::to_args).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::Track;

    fn op(track_type: TrackType, global_id: u32, default_flag: bool) -> EditOperation {
        EditOperation {
            track_type,
            global_id,
            default_flag,
        }
    }

    #[test]
    fn audio_numbers_are_identity() {
        for id in [0, 1, 7] {
            let command = translate(&op(TrackType::Audio, id, true), 3).unwrap();
            assert_eq!(command.selector.number, id);
            assert_eq!(command.selector.to_string(), format!("track:a{id}"));
        }
    }

    #[test]
    fn subtitle_numbers_subtract_audio_count() {
        let command = translate(&op(TrackType::Subtitle, 3, false), 2).unwrap();
        assert_eq!(command.selector.number, 1);
        assert_eq!(
            command.to_args(),
            [
                "--edit".to_string(),
                "track:s1".to_string(),
                "--set".to_string(),
                "flag-default=0".to_string()
            ]
        );

        let command = translate(&op(TrackType::Subtitle, 2, true), 2).unwrap();
        assert_eq!(command.to_string(), "--edit track:s0 --set flag-default=1");
    }

    #[test]
    fn subtitle_below_audio_count_is_rejected() {
        assert!(translate(&op(TrackType::Subtitle, 1, true), 2).is_err());
    }

    #[test]
    fn translate_all_keeps_order_and_flattens() {
        let container = Container::new(
            "/media/sample.mkv",
            vec![
                Track::audio(0),
                Track::audio(1),
                Track::subtitle(2),
                Track::subtitle(3),
            ],
        );
        let operations = [
            op(TrackType::Audio, 0, false),
            op(TrackType::Audio, 1, true),
            op(TrackType::Subtitle, 3, false),
            op(TrackType::Subtitle, 2, true),
        ];

        let commands = translate_all(&container, &operations).unwrap();
        let selectors: Vec<String> = commands.iter().map(|c| c.selector.to_string()).collect();
        assert_eq!(selectors, vec!["track:a0", "track:a1", "track:s1", "track:s0"]);
        assert_eq!(command_args(&commands).len(), 16);
    }

    #[test]
    fn translate_all_rejects_interleaved_ids() {
        let container = Container::new(
            "/media/odd.mkv",
            vec![Track::subtitle(0), Track::audio(1)],
        );
        let result = translate_all(&container, &[op(TrackType::Audio, 1, true)]);
        assert!(matches!(result, Err(CoreError::TrackOrdering { .. })));
    }
}
