//! Serializable records of the beatmap `.dat` format.
//!
//! The game reads one JSON document per difficulty. All numeric codes of the
//! format live here; the rest of the crate works with the typed vocabulary
//! from [`crate::saber`] and converts through [`BeatmapDat::from`] right
//! before writing.

use serde::{Deserialize, Serialize};
use strict_num_extended::FinF64;

use super::{LightEvent, Note, Obstacle, SaberMap};

/// Top-level object of a difficulty beatmap file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatmapDat {
    /// Version of the beatmap schema, compared using
    /// [Semantic Version 2.0.0](http://semver.org/spec/v2.0.0.html).
    #[serde(rename = "_version")]
    pub version: String,
    /// Lighting and laser events, ordered by time.
    #[serde(rename = "_events", default)]
    pub events: Vec<EventRecord>,
    /// Notes and bombs, ordered by time.
    #[serde(rename = "_notes", default)]
    pub notes: Vec<NoteRecord>,
    /// Walls, ordered by time.
    #[serde(rename = "_obstacles", default)]
    pub obstacles: Vec<ObstacleRecord>,
}

/// One lighting event of a beatmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Trigger time in beats.
    #[serde(rename = "_time")]
    pub time: FinF64,
    /// Event type code, see [`crate::saber::EventKind::code`].
    #[serde(rename = "_type")]
    pub kind: u8,
    /// Event value code, see [`crate::saber::EventValue::code`].
    #[serde(rename = "_value")]
    pub value: u8,
}

/// One note of a beatmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Spawn time in beats.
    #[serde(rename = "_time")]
    pub time: FinF64,
    /// Column on the grid, 0 to 3 from the left.
    #[serde(rename = "_lineIndex")]
    pub line_index: u8,
    /// Row on the grid, 0 to 2 from the bottom.
    #[serde(rename = "_lineLayer")]
    pub line_layer: u8,
    /// Note type code, see [`crate::saber::NoteColor::code`].
    #[serde(rename = "_type")]
    pub kind: u8,
    /// Cut direction code, see [`crate::saber::CutDirection::code`].
    #[serde(rename = "_cutDirection")]
    pub cut_direction: u8,
}

/// One wall of a beatmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleRecord {
    /// Spawn time in beats.
    #[serde(rename = "_time")]
    pub time: FinF64,
    /// Leftmost column covered by the wall.
    #[serde(rename = "_lineIndex")]
    pub line_index: u8,
    /// Obstacle type code, see [`crate::saber::WallKind::code`].
    #[serde(rename = "_type")]
    pub kind: u8,
    /// Duration of the wall in beats.
    #[serde(rename = "_duration")]
    pub duration: FinF64,
    /// How many columns the wall covers.
    #[serde(rename = "_width")]
    pub width: u8,
}

impl From<&LightEvent> for EventRecord {
    fn from(event: &LightEvent) -> Self {
        Self {
            time: FinF64::new(event.beat).expect("event beat should be finite"),
            kind: event.kind.code(),
            value: event.value.code(),
        }
    }
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            time: FinF64::new(note.beat).expect("note beat should be finite"),
            line_index: note.column,
            line_layer: note.row,
            kind: note.color.code(),
            cut_direction: note.direction.code(),
        }
    }
}

impl From<&Obstacle> for ObstacleRecord {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            time: FinF64::new(obstacle.beat).expect("wall beat should be finite"),
            line_index: obstacle.column,
            kind: obstacle.kind.code(),
            duration: FinF64::new(obstacle.duration).expect("wall duration should be finite"),
            width: obstacle.width,
        }
    }
}

impl From<&SaberMap> for BeatmapDat {
    fn from(map: &SaberMap) -> Self {
        Self {
            version: super::MAP_VERSION.to_owned(),
            events: map.events.iter().map(EventRecord::from).collect(),
            notes: map.notes.iter().map(NoteRecord::from).collect(),
            obstacles: map.obstacles.iter().map(ObstacleRecord::from).collect(),
        }
    }
}
