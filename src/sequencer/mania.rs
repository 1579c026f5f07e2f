//! Mania beatset transformation.
//!
//! The four mania columns map one-to-one onto the saber lines, every note lands on the
//! bottom row with an any-direction cut. Holds become horizontal walls over their
//! column, sweep chains become vertical walls to lean away from, and combo starts
//! toggle the side lights between red and blue.

use crate::osu::model::{HitKind, HitObject};
use crate::saber::{
    CutDirection, EventKind, EventValue, LightEvent, LightValue, Note, NoteColor, Obstacle,
    WallKind,
};

use super::quantize::BeatQuantizer;
use super::sweep::detect_sweep;
use super::{BLOCK_PLACEMENT_DOWNTIME_MS, column_of};

/// Smallest audible gap between two saber notes on different lines, in milliseconds.
const NEIGHBOUR_DOWNTIME_MS: f64 = 125.0;

/// Transforms mania hit objects into saber notes and obstacles.
///
/// Only circles and hold heads place notes; the placement is dropped when the note
/// would land closer than [`NEIGHBOUR_DOWNTIME_MS`] to the previous timeline or
/// closer than [`BLOCK_PLACEMENT_DOWNTIME_MS`] to the previous note of its column.
/// Chords on one timeline are exempt from the neighbour rule. Every hand assignment
/// is left to a later pass, the notes come out left-handed.
///
/// Combo start toggles are pushed onto `events` in hit order; `first` is the index
/// of the first hit past the lead-in.
pub fn transform_mania(
    hits: &[HitObject],
    first: usize,
    beat_period_ms: f64,
    quantizer: &BeatQuantizer,
    events: &mut Vec<LightEvent>,
) -> (Vec<Note>, Vec<Obstacle>) {
    let mut notes = Vec::new();
    let mut obstacles = Vec::new();
    let mut is_left = true;
    let mut last_sample_beat = 0.0_f64;
    let mut wall_cooldown_beat = 0.0_f64;
    // Per column, the raw timestamp a cell was last occupied at.
    let mut time_slots = [[0.0_f64; 3]; 4];

    let mut index = first;
    while let Some(hit) = hits.get(index) {
        let column = column_of(hit.x);
        let spawn = quantizer.beats(hit.time_ms);
        if hit.new_combo {
            let value = if is_left {
                LightValue::RedOn
            } else {
                LightValue::BlueOn
            };
            events.push(LightEvent::new(
                spawn,
                EventKind::SideLight,
                EventValue::Switch(value),
            ));
            is_left = !is_left;
        }
        match hit.kind {
            HitKind::Hold { end_ms } => {
                let duration = quantizer.beats(end_ms - hit.time_ms);
                if duration >= 1.0 {
                    time_slots[usize::from(column)][1] = end_ms;
                    time_slots[usize::from(column)][2] = end_ms;
                    obstacles.push(Obstacle {
                        beat: spawn,
                        column,
                        kind: WallKind::Horizontal,
                        duration,
                        width: 1,
                    });
                }
            }
            HitKind::Circle { .. } if column == 0 || column == 3 => {
                if let Some(successor_index) = detect_sweep(hits, index, beat_period_ms)
                    && let Some(successor) = hits.get(successor_index)
                {
                    let (wall_column, slot_columns) = if hit.x > 127 {
                        (2, 1..=3)
                    } else {
                        (0, 0..=2)
                    };
                    for slot_column in slot_columns {
                        time_slots[slot_column] =
                            [successor.time_ms + BLOCK_PLACEMENT_DOWNTIME_MS; 3];
                    }
                    let wall = Obstacle {
                        beat: spawn,
                        column: wall_column,
                        kind: WallKind::Vertical,
                        duration: quantizer.beats(successor.time_ms - hit.time_ms),
                        width: 2,
                    };
                    if wall.beat > wall_cooldown_beat {
                        wall_cooldown_beat = wall.beat + wall.duration + 1.0;
                        obstacles.push(wall);
                    }
                    index = successor_index;
                    continue;
                }
            }
            HitKind::Circle { .. } => {}
            _ => {
                index += 1;
                continue;
            }
        }
        if last_sample_beat.to_bits() != spawn.to_bits() {
            if NEIGHBOUR_DOWNTIME_MS > beat_period_ms * (spawn - last_sample_beat) {
                index += 1;
                continue;
            }
            last_sample_beat = spawn;
        }
        if BLOCK_PLACEMENT_DOWNTIME_MS < hit.time_ms - time_slots[usize::from(column)][0] {
            time_slots[usize::from(column)][0] = hit.time_ms;
            notes.push(Note {
                beat: spawn,
                column,
                row: 0,
                color: NoteColor::Left,
                direction: CutDirection::Any,
            });
        }
        index += 1;
    }
    (notes, obstacles)
}
