//! Hand assignment for mania notes.
//!
//! Notes sharing a quantized timeline form a run, and the run size picks the
//! pattern: lone notes and pairs split by playfield half, triples collapse their
//! left-packed side into bombs, quads alternate hands note by note.

use crate::saber::{Note, NoteColor};

/// Assigns a hand to every note, one equal-timeline run at a time.
///
/// Triple runs are sorted by column first; runs of five or more notes are left
/// untouched.
pub fn assign_hands(notes: &mut [Note]) {
    let mut is_left = true;
    for run in notes.chunk_by_mut(|a, b| a.beat.to_bits() == b.beat.to_bits()) {
        match run.len() {
            1 | 2 => {
                for note in run {
                    note.color = if note.column < 2 {
                        NoteColor::Left
                    } else {
                        NoteColor::Right
                    };
                }
            }
            3 => {
                run.sort_unstable_by_key(|note| note.column);
                let packed = run
                    .iter()
                    .enumerate()
                    .take_while(|(slot, note)| usize::from(note.column) == *slot)
                    .count();
                let colors = match packed {
                    0 => [NoteColor::Left; 3],
                    1 => [NoteColor::Left, NoteColor::Bomb, NoteColor::Bomb],
                    2 => [NoteColor::Bomb, NoteColor::Bomb, NoteColor::Right],
                    _ => [NoteColor::Right; 3],
                };
                for (note, color) in run.iter_mut().zip(colors) {
                    note.color = color;
                }
            }
            4 => {
                for (offset, note) in run.iter_mut().enumerate() {
                    let even = offset % 2 == 0;
                    note.color = if even == is_left {
                        NoteColor::Left
                    } else {
                        NoteColor::Right
                    };
                }
                is_left = !is_left;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::assign_hands;
    use crate::saber::{CutDirection, Note, NoteColor};

    fn note(beat: f64, column: u8) -> Note {
        Note {
            beat,
            column,
            row: 0,
            color: NoteColor::Left,
            direction: CutDirection::Any,
        }
    }

    fn colors(notes: &[Note]) -> Vec<NoteColor> {
        notes.iter().map(|note| note.color).collect()
    }

    #[test]
    fn singles_and_pairs_split_by_half() {
        let mut notes = vec![note(1.0, 3), note(2.0, 1), note(2.0, 2)];
        assign_hands(&mut notes);
        assert_eq!(
            colors(&notes),
            vec![NoteColor::Right, NoteColor::Left, NoteColor::Right]
        );
    }

    #[test]
    fn triples_sort_and_bomb_the_packed_side() {
        let mut notes = vec![note(1.0, 3), note(1.0, 0), note(1.0, 1)];
        assign_hands(&mut notes);
        let columns: Vec<u8> = notes.iter().map(|note| note.column).collect();
        assert_eq!(columns, vec![0, 1, 3]);
        assert_eq!(
            colors(&notes),
            vec![NoteColor::Bomb, NoteColor::Bomb, NoteColor::Right]
        );
    }

    #[test]
    fn triples_cover_every_packing() {
        let mut loose = vec![note(1.0, 1), note(1.0, 2), note(1.0, 3)];
        assign_hands(&mut loose);
        assert_eq!(colors(&loose), vec![NoteColor::Left; 3]);

        let mut seeded = vec![note(1.0, 0), note(1.0, 2), note(1.0, 3)];
        assign_hands(&mut seeded);
        assert_eq!(
            colors(&seeded),
            vec![NoteColor::Left, NoteColor::Bomb, NoteColor::Bomb]
        );

        let mut packed = vec![note(1.0, 0), note(1.0, 1), note(1.0, 2)];
        assign_hands(&mut packed);
        assert_eq!(colors(&packed), vec![NoteColor::Right; 3]);
    }

    #[test]
    fn quads_alternate_and_flip_between_runs() {
        let mut notes = vec![
            note(1.0, 0),
            note(1.0, 1),
            note(1.0, 2),
            note(1.0, 3),
            note(2.0, 0),
            note(2.0, 1),
            note(2.0, 2),
            note(2.0, 3),
        ];
        assign_hands(&mut notes);
        assert_eq!(
            colors(&notes),
            vec![
                NoteColor::Left,
                NoteColor::Right,
                NoteColor::Left,
                NoteColor::Right,
                NoteColor::Right,
                NoteColor::Left,
                NoteColor::Right,
                NoteColor::Left,
            ]
        );
    }

    #[test]
    fn oversized_runs_are_left_alone() {
        let mut notes = vec![
            note(1.0, 0),
            note(1.0, 0),
            note(1.0, 1),
            note(1.0, 2),
            note(1.0, 3),
        ];
        assign_hands(&mut notes);
        assert_eq!(colors(&notes), vec![NoteColor::Left; 5]);
    }
}
