// ============================================================================
// mkvdefault-core/src/resolver.rs
// ============================================================================
//
// TRACK RESOLVER: Deciding Which Default Flags Must Change
//
// Given a container's tracks and the desired audio/subtitle languages, this
// module computes the ordered list of default-flag edits for one file. It is a
// pure function: no I/O, no logging, no external calls.
//
// KEY COMPONENTS:
// - DefaultPolicy: strict (all-or-nothing per file) or lazy (per type)
// - EditOperation: one staged flag change, addressed by global track id
// - Resolution: the staged operations plus per-type diagnostics
// - resolve: the resolution algorithm
//
// INVARIANT:
// Under the strict policy a file either gets every requested default or no
// change at all. A missing desired track for either type discards every
// staged operation for the file, including those of the other type.

use crate::error::CoreError;
use crate::languages::DesiredLanguage;
use crate::tracks::{Container, Track, TrackType};

use serde::Serialize;

use std::fmt;
use std::str::FromStr;

// ============================================================================
// POLICY
// ============================================================================

/// How a missing desired track affects the rest of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPolicy {
    /// Both requested defaults must be satisfiable, otherwise nothing changes.
    #[default]
    Strict,
    /// Each type is applied independently; a missing track only skips its own type.
    Lazy,
}

impl FromStr for DefaultPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(DefaultPolicy::Strict),
            "lazy" => Ok(DefaultPolicy::Lazy),
            other => Err(CoreError::Config(format!(
                "default policy must be 'strict' or 'lazy', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DefaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultPolicy::Strict => write!(f, "strict"),
            DefaultPolicy::Lazy => write!(f, "lazy"),
        }
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// One staged mutation of a track's default flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditOperation {
    pub track_type: TrackType,
    /// Container-global track id as reported by the inspector.
    pub global_id: u32,
    pub default_flag: bool,
}

impl EditOperation {
    fn set(track: &Track) -> Self {
        Self {
            track_type: track.track_type,
            global_id: track.id,
            default_flag: true,
        }
    }

    fn clear(track: &Track) -> Self {
        Self {
            track_type: track.track_type,
            global_id: track.id,
            default_flag: false,
        }
    }
}

/// What happened to one requested track type. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeStatus {
    /// The desired track (or "off") is already the current state.
    AlreadyDefault,
    /// Subtitles requested "off" and the file has no subtitle tracks.
    NoTracks,
    /// A new default was staged.
    Changed,
    /// The current default subtitle is cleared.
    TurnedOff,
    /// No matching track; aborts the file under the strict policy.
    Missing,
    /// No matching track; ignored under the lazy policy.
    Skipped,
}

/// The resolver's verdict for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Ordered edits: audio before subtitles, clears before sets.
    pub operations: Vec<EditOperation>,
    pub statuses: Vec<(TrackType, TypeStatus)>,
    /// True when the strict policy rejected the file; `operations` is then empty.
    pub aborted: bool,
}

impl Resolution {
    pub fn is_unchanged(&self) -> bool {
        !self.aborted && self.operations.is_empty()
    }

    /// Track types whose desired track does not exist in the file.
    pub fn missing_types(&self) -> impl Iterator<Item = TrackType> + '_ {
        self.statuses
            .iter()
            .filter(|(_, status)| matches!(status, TypeStatus::Missing | TypeStatus::Skipped))
            .map(|(track_type, _)| *track_type)
    }
}

struct TypeOutcome {
    status: TypeStatus,
    operations: Vec<EditOperation>,
}

impl TypeOutcome {
    fn new(status: TypeStatus, operations: Vec<EditOperation>) -> Self {
        Self { status, operations }
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Computes the default-flag edits needed for `container`.
///
/// `None` for a type means the user did not ask to change it.
pub fn resolve(
    container: &Container,
    audio: Option<&DesiredLanguage>,
    subtitle: Option<&DesiredLanguage>,
    policy: DefaultPolicy,
) -> Resolution {
    let mut resolution = Resolution::default();

    for (track_type, desired) in [(TrackType::Audio, audio), (TrackType::Subtitle, subtitle)] {
        let Some(desired) = desired else {
            continue;
        };

        let outcome = resolve_type(container.tracks(track_type), desired, policy);
        if outcome.status == TypeStatus::Missing {
            resolution.aborted = true;
        }
        resolution.statuses.push((track_type, outcome.status));
        resolution.operations.extend(outcome.operations);
    }

    if resolution.aborted {
        resolution.operations.clear();
    }

    resolution
}

fn resolve_type(tracks: &[Track], desired: &DesiredLanguage, policy: DefaultPolicy) -> TypeOutcome {
    match desired {
        DesiredLanguage::Code(code) => resolve_code(tracks, code.as_str(), policy),
        DesiredLanguage::Off => resolve_off(tracks, policy),
    }
}

fn resolve_code(tracks: &[Track], code: &str, policy: DefaultPolicy) -> TypeOutcome {
    let mut operations: Vec<EditOperation> = tracks
        .iter()
        .filter(|t| t.is_default && !t.has_language(code))
        .map(EditOperation::clear)
        .collect();

    match tracks.iter().find(|t| t.has_language(code)) {
        // Staged clears are dropped with the type: a file never loses its
        // default for a type whose desired track is absent.
        None => match policy {
            DefaultPolicy::Strict => TypeOutcome::new(TypeStatus::Missing, Vec::new()),
            DefaultPolicy::Lazy => TypeOutcome::new(TypeStatus::Skipped, Vec::new()),
        },
        Some(target) if target.is_default => {
            let status = if operations.is_empty() {
                TypeStatus::AlreadyDefault
            } else {
                TypeStatus::Changed
            };
            TypeOutcome::new(status, operations)
        }
        Some(target) => {
            operations.push(EditOperation::set(target));
            TypeOutcome::new(TypeStatus::Changed, operations)
        }
    }
}

fn resolve_off(tracks: &[Track], policy: DefaultPolicy) -> TypeOutcome {
    if tracks.is_empty() {
        return TypeOutcome::new(TypeStatus::NoTracks, Vec::new());
    }

    let clears: Vec<EditOperation> = tracks
        .iter()
        .filter(|t| t.is_default)
        .map(EditOperation::clear)
        .collect();

    if clears.is_empty() {
        return TypeOutcome::new(TypeStatus::AlreadyDefault, Vec::new());
    }

    match policy {
        DefaultPolicy::Strict => TypeOutcome::new(TypeStatus::TurnedOff, clears),
        DefaultPolicy::Lazy => TypeOutcome::new(TypeStatus::Skipped, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str, track_type: TrackType) -> DesiredLanguage {
        DesiredLanguage::parse(code, track_type).unwrap()
    }

    fn audio(code: &str) -> DesiredLanguage {
        lang(code, TrackType::Audio)
    }

    fn subs(code: &str) -> DesiredLanguage {
        lang(code, TrackType::Subtitle)
    }

    fn op(track_type: TrackType, global_id: u32, default_flag: bool) -> EditOperation {
        EditOperation {
            track_type,
            global_id,
            default_flag,
        }
    }

    /// audio {0: eng, default}, {1: jpn}; subtitles {2: eng}, {3: jpn, default}
    fn sample_container() -> Container {
        Container::new(
            "/media/sample.mkv",
            vec![
                Track::audio(0).with_language("eng").with_default(true),
                Track::audio(1).with_language("jpn"),
                Track::subtitle(2).with_language("eng"),
                Track::subtitle(3).with_language("jpn").with_default(true),
            ],
        )
    }

    #[test]
    fn swaps_both_defaults_in_order() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("jpn")),
            Some(&subs("eng")),
            DefaultPolicy::Strict,
        );

        assert!(!resolution.aborted);
        assert_eq!(
            resolution.operations,
            vec![
                op(TrackType::Audio, 0, false),
                op(TrackType::Audio, 1, true),
                op(TrackType::Subtitle, 3, false),
                op(TrackType::Subtitle, 2, true),
            ]
        );
        assert_eq!(
            resolution.statuses,
            vec![
                (TrackType::Audio, TypeStatus::Changed),
                (TrackType::Subtitle, TypeStatus::Changed)
            ]
        );
    }

    #[test]
    fn already_default_yields_no_operations() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("eng")),
            Some(&subs("jpn")),
            DefaultPolicy::Strict,
        );

        assert!(resolution.is_unchanged());
        assert!(
            resolution
                .statuses
                .iter()
                .all(|(_, status)| *status == TypeStatus::AlreadyDefault)
        );
    }

    #[test]
    fn strict_missing_audio_discards_subtitle_edits() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("fra")),
            Some(&subs("eng")),
            DefaultPolicy::Strict,
        );

        assert!(resolution.aborted);
        assert!(resolution.operations.is_empty());
        assert!(!resolution.is_unchanged());
        assert_eq!(resolution.missing_types().collect::<Vec<_>>(), vec![TrackType::Audio]);
    }

    #[test]
    fn strict_missing_subtitle_discards_audio_edits() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("jpn")),
            Some(&subs("ger")),
            DefaultPolicy::Strict,
        );

        assert!(resolution.aborted);
        assert!(resolution.operations.is_empty());
    }

    #[test]
    fn lazy_missing_audio_keeps_subtitle_edits() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("fra")),
            Some(&subs("eng")),
            DefaultPolicy::Lazy,
        );

        assert!(!resolution.aborted);
        assert_eq!(
            resolution.operations,
            vec![op(TrackType::Subtitle, 3, false), op(TrackType::Subtitle, 2, true)]
        );
        assert_eq!(
            resolution.statuses[0],
            (TrackType::Audio, TypeStatus::Skipped)
        );
    }

    #[test]
    fn lazy_with_both_missing_is_unchanged() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("fra")),
            Some(&subs("spa")),
            DefaultPolicy::Lazy,
        );

        assert!(resolution.is_unchanged());
        assert_eq!(resolution.missing_types().count(), 2);
    }

    #[test]
    fn off_without_subtitle_tracks_is_satisfied() {
        let container = Container::new(
            "/media/nosubs.mkv",
            vec![Track::audio(0).with_language("eng").with_default(true)],
        );

        for policy in [DefaultPolicy::Strict, DefaultPolicy::Lazy] {
            let resolution = resolve(&container, None, Some(&subs("off")), policy);
            assert!(resolution.is_unchanged());
            assert_eq!(
                resolution.statuses,
                vec![(TrackType::Subtitle, TypeStatus::NoTracks)]
            );
        }
    }

    #[test]
    fn off_with_no_default_subtitle_is_satisfied() {
        let container = Container::new(
            "/media/quiet.mkv",
            vec![
                Track::audio(0).with_language("eng").with_default(true),
                Track::subtitle(1).with_language("eng"),
            ],
        );

        let resolution = resolve(&container, None, Some(&subs("off")), DefaultPolicy::Strict);
        assert!(resolution.is_unchanged());
        assert_eq!(
            resolution.statuses,
            vec![(TrackType::Subtitle, TypeStatus::AlreadyDefault)]
        );
    }

    #[test]
    fn strict_off_clears_current_default_subtitle() {
        let resolution = resolve(
            &sample_container(),
            Some(&audio("eng")),
            Some(&subs("off")),
            DefaultPolicy::Strict,
        );

        assert!(!resolution.aborted);
        assert_eq!(resolution.operations, vec![op(TrackType::Subtitle, 3, false)]);
        assert_eq!(
            resolution.statuses[1],
            (TrackType::Subtitle, TypeStatus::TurnedOff)
        );
    }

    #[test]
    fn lazy_off_with_default_subtitle_is_skipped() {
        let resolution = resolve(
            &sample_container(),
            None,
            Some(&subs("off")),
            DefaultPolicy::Lazy,
        );

        assert!(resolution.is_unchanged());
        assert_eq!(
            resolution.statuses,
            vec![(TrackType::Subtitle, TypeStatus::Skipped)]
        );
    }

    #[test]
    fn first_matching_track_wins() {
        let container = Container::new(
            "/media/dub.mkv",
            vec![
                Track::audio(0).with_language("jpn").with_default(true),
                Track::audio(1).with_language("eng").with_name("Dub"),
                Track::audio(2).with_language("eng").with_name("Commentary"),
            ],
        );

        let resolution = resolve(&container, Some(&audio("eng")), None, DefaultPolicy::Strict);
        assert_eq!(
            resolution.operations,
            vec![op(TrackType::Audio, 0, false), op(TrackType::Audio, 1, true)]
        );
    }

    #[test]
    fn uppercase_track_languages_still_match() {
        let container = Container::new(
            "/media/caps.mkv",
            vec![
                Track::audio(0).with_language("ENG"),
                Track::audio(1).with_language("JPN").with_default(true),
            ],
        );

        let resolution = resolve(&container, Some(&audio("Eng")), None, DefaultPolicy::Strict);
        assert_eq!(
            resolution.operations,
            vec![op(TrackType::Audio, 1, false), op(TrackType::Audio, 0, true)]
        );
    }

    #[test]
    fn multiple_defaults_do_not_crash() {
        let container = Container::new(
            "/media/messy.mkv",
            vec![
                Track::audio(0).with_language("eng").with_default(true),
                Track::audio(1).with_language("jpn").with_default(true),
                Track::audio(2).with_language("fre").with_default(true),
            ],
        );

        let resolution = resolve(&container, Some(&audio("jpn")), None, DefaultPolicy::Strict);
        assert_eq!(
            resolution.operations,
            vec![op(TrackType::Audio, 0, false), op(TrackType::Audio, 2, false)]
        );
        assert_eq!(resolution.statuses[0], (TrackType::Audio, TypeStatus::Changed));
    }

    #[test]
    fn tracks_without_language_never_match() {
        let container = Container::new(
            "/media/und.mkv",
            vec![Track::audio(0).with_default(true), Track::subtitle(1)],
        );

        let resolution = resolve(&container, Some(&audio("und")), None, DefaultPolicy::Strict);
        assert!(resolution.aborted);
    }

    #[test]
    fn unrequested_types_are_left_alone() {
        let resolution = resolve(&sample_container(), None, None, DefaultPolicy::Strict);
        assert!(resolution.is_unchanged());
        assert!(resolution.statuses.is_empty());
    }

    #[test]
    fn resolving_applied_state_again_is_idempotent() {
        let desired_audio = audio("jpn");
        let desired_subs = subs("eng");
        let first = resolve(
            &sample_container(),
            Some(&desired_audio),
            Some(&desired_subs),
            DefaultPolicy::Strict,
        );

        // Apply the staged edits to a copy of the tracks.
        let mut tracks: Vec<Track> = sample_container()
            .audio_tracks
            .into_iter()
            .chain(sample_container().subtitle_tracks)
            .collect();
        for operation in &first.operations {
            if let Some(track) = tracks.iter_mut().find(|t| t.id == operation.global_id) {
                track.is_default = operation.default_flag;
            }
        }
        let edited = Container::new("/media/sample.mkv", tracks);

        let second = resolve(
            &edited,
            Some(&desired_audio),
            Some(&desired_subs),
            DefaultPolicy::Strict,
        );
        assert!(second.is_unchanged());
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Strict".parse::<DefaultPolicy>().unwrap(), DefaultPolicy::Strict);
        assert_eq!("lazy".parse::<DefaultPolicy>().unwrap(), DefaultPolicy::Lazy);
        assert!(matches!(
            "eager".parse::<DefaultPolicy>(),
            Err(CoreError::Config(_))
        ));
        assert_eq!(DefaultPolicy::default(), DefaultPolicy::Strict);
    }
}
