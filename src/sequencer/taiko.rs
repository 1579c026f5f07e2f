//! Taiko beatset transformation.
//!
//! Drums map by hit area: centre hits alternate hands over the middle lines, rim hits
//! go to the edges, big hits take both hands at once and finishers climb a row. Drum
//! rolls become a wall with filler cubes to drum along, spinners flood the edge lines
//! with bombs around a pair of cubes. An optional second pass steers every cube for
//! two-handed play.

use crate::osu::model::{HitArea, HitKind, HitObject};
use crate::saber::{
    CutDirection, EventKind, EventValue, LightEvent, LightValue, Note, NoteColor, Obstacle,
    WallKind,
};

use super::quantize::BeatQuantizer;
use super::{BLOCK_PLACEMENT_DOWNTIME_MS, LEAD_IN_TIME_MS};

/// Gap between two filler cubes of a drum roll, in milliseconds.
const ROLL_STEP_MS: f64 = 250.0;

/// Slider length covered by one beat period, in osu! pixels.
const SLIDER_PIXELS_PER_BEAT: f64 = 140.0;

const fn hand(is_left: bool) -> NoteColor {
    if is_left { NoteColor::Left } else { NoteColor::Right }
}

const fn cube(beat: f64, column: u8, row: u8, color: NoteColor) -> Note {
    Note {
        beat,
        column,
        row,
        color,
        direction: CutDirection::Any,
    }
}

/// Transforms taiko hit objects into saber notes and obstacles.
///
/// Circles closer than [`BLOCK_PLACEMENT_DOWNTIME_MS`] to the previous accepted hit
/// are dropped. A hit counts as a finisher when more than two beat periods pass
/// before the next object, which moves it up a row. Combo start toggles are pushed
/// onto `events` in hit order; `first` is the index of the first hit past the
/// lead-in. With `two_handed` set, a final pass assigns a cut direction to every
/// cube by its cell.
pub fn transform_taiko(
    hits: &[HitObject],
    first: usize,
    beat_period_ms: f64,
    quantizer: &BeatQuantizer,
    two_handed: bool,
    events: &mut Vec<LightEvent>,
) -> (Vec<Note>, Vec<Obstacle>) {
    let mut notes = Vec::new();
    let mut obstacles = Vec::new();
    let mut is_blue = true;
    let mut is_left = false;
    let mut last_hit_ms = 0.0_f64;

    for (index, hit) in hits.iter().enumerate().skip(first) {
        let next_ms = hits
            .get(index + 1)
            .map_or(hit.time_ms + LEAD_IN_TIME_MS, |next| next.time_ms);
        let spawn = quantizer.beats(hit.time_ms);
        if hit.new_combo {
            let value = if is_blue {
                LightValue::RedOn
            } else {
                LightValue::BlueOn
            };
            events.push(LightEvent::new(
                spawn,
                EventKind::SideLight,
                EventValue::Switch(value),
            ));
            is_blue = !is_blue;
        }
        match hit.kind {
            HitKind::Circle { sound } => {
                if BLOCK_PLACEMENT_DOWNTIME_MS > hit.time_ms - last_hit_ms {
                    continue;
                }
                last_hit_ms = hit.time_ms;
                let finisher = 2.0 * beat_period_ms < next_ms - hit.time_ms;
                match sound.area() {
                    HitArea::Center => {
                        let column = if is_left { 1 } else { 2 };
                        notes.push(cube(spawn, column, u8::from(finisher), hand(is_left)));
                        is_left = !is_left;
                    }
                    HitArea::Rim => {
                        let (column, row) = if finisher {
                            (if is_left { 1 } else { 2 }, 2)
                        } else {
                            (if is_left { 0 } else { 3 }, 1)
                        };
                        notes.push(cube(spawn, column, row, hand(is_left)));
                        is_left = !is_left;
                    }
                    HitArea::BigCenter => {
                        let row = u8::from(finisher);
                        notes.push(cube(spawn, 1, row, NoteColor::Left));
                        notes.push(cube(spawn, 2, row, NoteColor::Right));
                    }
                    HitArea::BigRim => {
                        if finisher {
                            notes.push(cube(spawn, 1, 2, NoteColor::Left));
                            notes.push(cube(spawn, 2, 2, NoteColor::Right));
                        } else {
                            notes.push(cube(spawn, 0, 1, NoteColor::Left));
                            notes.push(cube(spawn, 3, 1, NoteColor::Right));
                        }
                    }
                }
            }
            HitKind::Slider { length } => {
                let end_ms = beat_period_ms
                    .mul_add(length / SLIDER_PIXELS_PER_BEAT, hit.time_ms)
                    .min(next_ms);
                obstacles.push(Obstacle {
                    beat: spawn,
                    column: if is_left { 2 } else { 0 },
                    kind: WallKind::Vertical,
                    duration: quantizer.beats(end_ms - hit.time_ms),
                    width: 2,
                });
                let filler_column = if is_left { 0 } else { 3 };
                let mut filler_ms = hit.time_ms;
                while filler_ms < end_ms {
                    notes.push(cube(
                        quantizer.beats(filler_ms),
                        filler_column,
                        0,
                        hand(is_left),
                    ));
                    is_left = !is_left;
                    filler_ms += ROLL_STEP_MS;
                }
            }
            HitKind::Spinner { end_ms } => {
                let mut burst_ms = hit.time_ms;
                while burst_ms < end_ms && burst_ms < next_ms {
                    let beat = quantizer.beats(burst_ms);
                    let (left_row, right_row) = if is_left { (0, 2) } else { (2, 0) };
                    notes.push(cube(beat, 0, 1, NoteColor::Bomb));
                    notes.push(cube(beat, 3, 1, NoteColor::Bomb));
                    notes.push(cube(beat, 0, left_row, NoteColor::Bomb));
                    notes.push(cube(beat, 3, right_row, NoteColor::Bomb));
                    notes.push(cube(beat, 2, right_row, NoteColor::Right));
                    notes.push(cube(beat, 1, left_row, NoteColor::Left));
                    is_left = !is_left;
                    burst_ms += beat_period_ms;
                }
                last_hit_ms = end_ms;
            }
            _ => {}
        }
    }
    if two_handed {
        assign_two_hand_directions(&mut notes);
    }
    (notes, obstacles)
}

/// Steers every cube by its cell so both hands swing naturally; bombs are left alone.
fn assign_two_hand_directions(notes: &mut [Note]) {
    for note in notes {
        if note.color == NoteColor::Bomb {
            continue;
        }
        note.direction = match (note.row, note.column) {
            (0, 0 | 3) => {
                if note.color == NoteColor::Left {
                    CutDirection::DownRight
                } else {
                    CutDirection::DownLeft
                }
            }
            (0, _) => CutDirection::Down,
            (1, 0) => CutDirection::Left,
            (1, 3) => CutDirection::Right,
            (1, _) => CutDirection::Any,
            _ => CutDirection::Up,
        };
    }
}
