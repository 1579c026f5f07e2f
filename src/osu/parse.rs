//! Parser of the `.osu` token list into a [`Beatset`].
//!
//! The parser walks the token list with a current-section state machine. Properties feed the
//! media and play settings, `[TimingPoints]` rows become [`TimingEvent`]s and `[HitObjects]`
//! rows become [`HitObject`]s. Malformed rows are dropped with a recoverable
//! [`ParseWarning`]; a beatset that cannot be transformed at all raises an [`OsuParseError`].

use std::str::FromStr;

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind};
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use crate::diagnostics::{SimpleSource, ToAriadne};

use super::{
    lex::{Token, TokenWithRange},
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::{
        Beatset, HitKind, HitObject, HitSound, MAP_HEIGHT, MAP_WIDTH, Media, PlayMode,
        PlaySettings, TimingEvent, TimingEventKind,
    },
    timing,
};

/// Fallback beat subdivision when the `GridSize` property is absent.
const DEFAULT_SUBDIVISION: u8 = 8;

/// Hit object type bit for a circle.
const KIND_CIRCLE: u8 = 1;
/// Hit object type bit for a slider.
const KIND_SLIDER: u8 = 1 << 1;
/// Hit object type bit marking the start of a new combo.
const NEW_COMBO: u8 = 1 << 2;
/// Hit object type bit for a spinner.
const KIND_SPINNER: u8 = 1 << 3;
/// Hit object type bit for a mania hold.
const KIND_HOLD: u8 = 1 << 7;
/// All type bits that select the kind of a hit object.
const KIND_MASK: u8 = KIND_CIRCLE | KIND_SLIDER | KIND_SPINNER | KIND_HOLD;

/// A fatal error of `.osu` parsing. The beatset cannot be used for a transform.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum OsuParseError {
    /// The `[General]` section declared no audio file name.
    #[error("audio file name is missing")]
    MissingAudioFilename,
    /// The `Mode` property was missing or not a known play mode code.
    #[error("play mode is missing or unknown")]
    UnknownPlayMode,
    /// No timing point with a usable beat duration was found.
    #[error("tempo information is missing or invalid")]
    MissingTempo,
    /// The `[HitObjects]` section yielded no hit objects.
    #[error("no hit objects")]
    NoHitObjects,
}

/// A recoverable warning of `.osu` parsing. The offending row is dropped.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ParseWarning {
    /// A hit object row carried a `-` outside the trailing attribute field.
    #[error("negative value in hit object row")]
    NegativeValue,
    /// A data row did not have enough fields for its kind.
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields {
        /// How many fields the row kind requires.
        expected: usize,
        /// How many fields the row actually had.
        found: usize,
    },
    /// A numeric field could not be parsed.
    #[error("`{value}` is not a number")]
    InvalidNumber {
        /// The field content that failed to parse.
        value: String,
    },
    /// The type bits of a hit object selected zero or several kinds at once.
    #[error("hit object type `{type_bits:#010b}` does not select exactly one kind")]
    AmbiguousKind {
        /// The raw type bits of the row.
        type_bits: u8,
    },
}

/// The parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

/// type alias of core::result::Result<T, ParseWarning>
pub(crate) type Result<T> = core::result::Result<T, ParseWarning>;

/// Parse results of the `.osu` token list, includes the beatset and warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct OsuParseOutput {
    /// The parsed beatset.
    pub beatset: Beatset,
    /// warnings
    pub parse_warnings: Vec<ParseWarningWithRange>,
}

/// The section a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    General,
    Metadata,
    TimingPoints,
    HitObjects,
    Other,
}

impl Section {
    fn from_name(name: &str) -> Self {
        match name {
            "General" => Self::General,
            "Metadata" => Self::Metadata,
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::Other,
        }
    }
}

/// Running state of the timing row classifier.
#[derive(Debug, Clone, Copy)]
struct TimingState {
    /// Beat duration of the last uninherited timing point, in milliseconds.
    base_period: f64,
    /// Beat duration announced by the last tempo event.
    last_period: f64,
    /// Whether a kiai passage is currently open.
    kiai: bool,
}

impl Default for TimingState {
    fn default() -> Self {
        Self {
            base_period: 1.0,
            last_period: 1.0,
            kiai: false,
        }
    }
}

fn number_field<T: FromStr>(fields: &[&str], index: usize) -> Result<T> {
    let Some(field) = fields.get(index) else {
        return Err(ParseWarning::TooFewFields {
            expected: index + 1,
            found: fields.len(),
        });
    };
    let field = field.trim();
    field.parse().map_err(|_| ParseWarning::InvalidNumber {
        value: field.to_string(),
    })
}

/// Parses a decimal field. A non-finite value is as unusable as text, it reads as
/// [`ParseWarning::InvalidNumber`]; everything downstream may rely on finite
/// timestamps and durations.
fn decimal_field(fields: &[&str], index: usize) -> Result<f64> {
    let value: f64 = number_field(fields, index)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseWarning::InvalidNumber {
            value: fields
                .get(index)
                .map_or_else(String::new, |field| field.trim().to_string()),
        })
    }
}

/// Classifies one timing row into a [`TimingEvent`].
///
/// An inherited point (negative beat duration) scales the last uninherited duration instead
/// of replacing it. The event kind marks the opening of a kiai passage, a change of tempo or
/// kiai state, or a plain tick.
fn parse_timing_event(fields: &[&str], state: &mut TimingState) -> Result<TimingEvent> {
    let time_ms = decimal_field(fields, 0)?;
    let raw_period = decimal_field(fields, 1)?;
    let beat_period_ms = if raw_period < 0.0 {
        raw_period.abs() / 100.0 * state.base_period
    } else {
        state.base_period = raw_period;
        raw_period
    };

    // Old format revisions carry fewer fields, they never flag kiai.
    let kiai_flag = fields
        .get(7)
        .and_then(|field| field.trim().parse::<i64>().ok())
        .unwrap_or(0)
        != 0;
    let kind = if !state.kiai && kiai_flag {
        state.kiai = true;
        TimingEventKind::KiaiStart
    } else if state.kiai != kiai_flag
        || timing::PERIOD_EPSILON < (beat_period_ms - state.last_period).abs()
    {
        state.last_period = beat_period_ms;
        state.kiai = kiai_flag;
        TimingEventKind::Tempo
    } else {
        TimingEventKind::Tick
    };

    Ok(TimingEvent {
        time_ms,
        beat_period_ms,
        kind,
    })
}

/// Decodes one hit object row.
///
/// Rows with a negative field, a missing payload or ambiguous type bits are rejected. The
/// type bits must select exactly one kind; the kind then decides which tail fields carry the
/// payload (hold end, slider extent or spinner end).
fn parse_hit_object(fields: &[&str]) -> Result<HitObject> {
    if let Some((_, head)) = fields.split_last() {
        // The trailing attribute list is the only place a `-` is legal in.
        if head.iter().any(|field| field.contains('-')) {
            return Err(ParseWarning::NegativeValue);
        }
    }

    let x = number_field::<u16>(fields, 0)?.min(MAP_WIDTH);
    let y = number_field::<u16>(fields, 1)?.min(MAP_HEIGHT);
    let time_ms = decimal_field(fields, 2)?;
    let type_bits = (number_field::<i64>(fields, 3)? & 0xFF) as u8;
    if (type_bits & KIND_MASK).count_ones() != 1 {
        return Err(ParseWarning::AmbiguousKind { type_bits });
    }

    let kind = if type_bits & KIND_HOLD != 0 {
        let tail = fields.last().copied().unwrap_or_default();
        let end_field = tail.split_once(':').map_or(tail, |(end, _)| end).trim();
        let end_ms = end_field
            .parse()
            .ok()
            .filter(|end: &f64| end.is_finite())
            .ok_or_else(|| ParseWarning::InvalidNumber {
                value: end_field.to_string(),
            })?;
        HitKind::Hold { end_ms }
    } else if type_bits & KIND_SLIDER != 0 {
        if fields.len() < 8 {
            return Err(ParseWarning::TooFewFields {
                expected: 8,
                found: fields.len(),
            });
        }
        // Total extent in map pixels: slide count times curve length.
        let slides = decimal_field(fields, 6)?;
        let length = decimal_field(fields, 7)?;
        HitKind::Slider {
            length: slides * length,
        }
    } else if type_bits & KIND_SPINNER != 0 {
        HitKind::Spinner {
            end_ms: decimal_field(fields, 5)?,
        }
    } else {
        let sound = fields
            .get(4)
            .and_then(|field| field.trim().parse::<i64>().ok())
            .map_or(0, |bits| (bits & 0xFF) as u8);
        HitKind::Circle {
            sound: HitSound::from_bits(sound),
        }
    };

    Ok(HitObject {
        x,
        y,
        time_ms,
        new_combo: type_bits & NEW_COMBO != 0,
        kind,
    })
}

/// Converts the token list of a `.osu` source into a [`Beatset`].
pub fn parse(tokens: &[TokenWithRange<'_>]) -> core::result::Result<OsuParseOutput, OsuParseError> {
    let mut section = Section::Other;
    let mut title = String::new();
    let mut artist = String::new();
    let mut author = String::new();
    let mut audio_filename = String::new();
    let mut preview_start_ms = 0.0;
    let mut lead_in_ms = 0.0;
    let mut mode = None;
    let mut subdivision = None;
    let mut timing_state = TimingState::default();
    let mut events: Vec<TimingEvent> = vec![];
    let mut hits = vec![];
    let mut warnings = vec![];

    for token in tokens {
        match *token.content() {
            Token::SectionHeading(name) => section = Section::from_name(name),
            Token::Property { key, value } => {
                // The grid size may live in any section, the first occurrence wins.
                if key == "GridSize" && subdivision.is_none() {
                    subdivision = Some(value.parse().unwrap_or(DEFAULT_SUBDIVISION));
                }
                match section {
                    Section::General => match key {
                        "AudioFilename" => audio_filename = value.to_string(),
                        "PreviewTime" => {
                            preview_start_ms = value.parse::<i64>().unwrap_or(0) as f64;
                        }
                        "AudioLeadIn" => {
                            lead_in_ms = value.parse::<i64>().unwrap_or(0) as f64;
                        }
                        "Mode" => mode = value.parse().ok().and_then(PlayMode::from_code),
                        _ => {}
                    },
                    Section::Metadata => match key {
                        "Title" => title = value.to_string(),
                        "Artist" => artist = value.to_string(),
                        "Creator" => author = value.to_string(),
                        _ => {}
                    },
                    _ => {}
                }
            }
            Token::Row(row) => {
                let fields: Vec<&str> = row.split(',').collect();
                match section {
                    Section::TimingPoints => {
                        match parse_timing_event(&fields, &mut timing_state) {
                            Ok(event) => match events.last_mut() {
                                // Points sharing a timestamp are re-evaluated in order of
                                // read-in, a tick never displaces its predecessor.
                                Some(last) if last.time_ms.to_bits() == event.time_ms.to_bits() => {
                                    if event.kind != TimingEventKind::Tick {
                                        *last = event;
                                    }
                                }
                                _ => events.push(event),
                            },
                            Err(warning) => warnings.push(warning.into_wrapper(token)),
                        }
                    }
                    Section::HitObjects => match parse_hit_object(&fields) {
                        Ok(hit) => hits.push(hit),
                        Err(warning) => warnings.push(warning.into_wrapper(token)),
                    },
                    _ => {}
                }
            }
            Token::Text(_) => {}
        }
    }

    if audio_filename.is_empty() {
        return Err(OsuParseError::MissingAudioFilename);
    }
    let Some(mode) = mode else {
        return Err(OsuParseError::UnknownPlayMode);
    };
    // The timing section must open with a beat duration over one millisecond, which also
    // rules out opening with an inherited point.
    if events
        .first()
        .is_none_or(|first| first.beat_period_ms <= 1.0)
    {
        return Err(OsuParseError::MissingTempo);
    }
    let average_bpm = timing::evaluate_average_bpm(&events)
        .filter(|bpm| bpm.is_finite())
        .ok_or(OsuParseError::MissingTempo)?;
    if hits.is_empty() {
        return Err(OsuParseError::NoHitObjects);
    }

    Ok(OsuParseOutput {
        beatset: Beatset {
            media: Media {
                title,
                artist,
                author,
                audio_filename,
                preview_start_ms,
                average_bpm,
            },
            settings: PlaySettings {
                mode,
                lead_in_ms,
                subdivision: subdivision.unwrap_or(DEFAULT_SUBDIVISION),
            },
            events,
            hits,
        },
        parse_warnings: warnings,
    })
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let (start, end) = self.as_span();
        let filename = src.name().to_string();
        Report::build(ReportKind::Warning, (filename.clone(), start..end))
            .with_message("parse: ".to_string() + &self.content().to_string())
            .with_label(Label::new((filename, start..end)).with_color(Color::Blue))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_rows_classify_tempo_kiai_and_tick() {
        let mut state = TimingState::default();

        let tempo = parse_timing_event(&["600", "500", "4", "2", "0", "60", "1", "0"], &mut state);
        assert_eq!(
            tempo,
            Ok(TimingEvent {
                time_ms: 600.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::Tempo,
            })
        );

        // An inherited point keeps the base duration, nothing changes.
        let tick = parse_timing_event(&["1600", "-100", "4", "2", "0", "60", "0", "0"], &mut state);
        assert_eq!(
            tick,
            Ok(TimingEvent {
                time_ms: 1600.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::Tick,
            })
        );

        let kiai = parse_timing_event(&["2600", "-100", "4", "2", "0", "60", "0", "1"], &mut state);
        assert_eq!(
            kiai,
            Ok(TimingEvent {
                time_ms: 2600.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::KiaiStart,
            })
        );

        // Falling edge of the kiai flag reads as a tempo event.
        let off = parse_timing_event(&["3600", "-100", "4", "2", "0", "60", "0", "0"], &mut state);
        assert_eq!(
            off,
            Ok(TimingEvent {
                time_ms: 3600.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::Tempo,
            })
        );
    }

    #[test]
    fn timing_rows_without_kiai_field_default_to_off() {
        let mut state = TimingState::default();
        let event = parse_timing_event(&["0", "400"], &mut state);
        assert_eq!(
            event,
            Ok(TimingEvent {
                time_ms: 0.0,
                beat_period_ms: 400.0,
                kind: TimingEventKind::Tempo,
            })
        );
    }

    #[test]
    fn hit_rows_decode_each_kind() {
        let circle = parse_hit_object(&["256", "192", "1600", "5", "4", "0:0:0:0:"]);
        assert_eq!(
            circle,
            Ok(HitObject {
                x: 256,
                y: 192,
                time_ms: 1600.0,
                new_combo: true,
                kind: HitKind::Circle {
                    sound: HitSound::from_bits(HitSound::FINISH),
                },
            })
        );

        let hold = parse_hit_object(&["448", "192", "1600", "128", "0", "2400:0:0:0:0:"]);
        assert_eq!(
            hold,
            Ok(HitObject {
                x: 448,
                y: 192,
                time_ms: 1600.0,
                new_combo: false,
                kind: HitKind::Hold { end_ms: 2400.0 },
            })
        );

        let slider = parse_hit_object(&[
            "100", "100", "1600", "2", "0", "B|200:200", "2", "140.5", "0:0",
        ]);
        assert_eq!(
            slider,
            Ok(HitObject {
                x: 100,
                y: 100,
                time_ms: 1600.0,
                new_combo: false,
                kind: HitKind::Slider { length: 281.0 },
            })
        );

        let spinner = parse_hit_object(&["256", "192", "1600", "12", "0", "3200", "0:0:0:0:"]);
        assert_eq!(
            spinner,
            Ok(HitObject {
                x: 256,
                y: 192,
                time_ms: 1600.0,
                new_combo: true,
                kind: HitKind::Spinner { end_ms: 3200.0 },
            })
        );
    }

    #[test]
    fn hit_rows_reject_bad_input() {
        assert_eq!(
            parse_hit_object(&["256", "-192", "1600", "1", "0", "0:0:0:0:"]),
            Err(ParseWarning::NegativeValue)
        );
        // A `-` in the trailing attribute list is fine.
        assert!(parse_hit_object(&["256", "192", "1600", "1", "0", "0:0:0:-1:"]).is_ok());
        assert_eq!(
            parse_hit_object(&["256", "192", "1600", "3", "0", "0:0:0:0:"]),
            Err(ParseWarning::AmbiguousKind { type_bits: 3 })
        );
        assert_eq!(
            parse_hit_object(&["256", "192", "1600", "2", "0", "B|200:200"]),
            Err(ParseWarning::TooFewFields {
                expected: 8,
                found: 6,
            })
        );
        assert_eq!(
            parse_hit_object(&["x", "192", "1600", "1", "0", "0:0:0:0:"]),
            Err(ParseWarning::InvalidNumber {
                value: "x".to_string(),
            })
        );
        // A decimal overflowing to infinity is as unusable as text.
        assert_eq!(
            parse_hit_object(&["256", "192", "1e999", "1", "0", "0:0:0:0:"]),
            Err(ParseWarning::InvalidNumber {
                value: "1e999".to_string(),
            })
        );
    }

    #[test]
    fn coordinates_clamp_to_the_map() {
        let hit = parse_hit_object(&["600", "400", "1600", "1", "0", "0:0:0:0:"]);
        assert_eq!(
            hit,
            Ok(HitObject {
                x: 512,
                y: 384,
                time_ms: 1600.0,
                new_combo: false,
                kind: HitKind::Circle {
                    sound: HitSound::from_bits(0),
                },
            })
        );
    }
}
