//! Detection of temporal sweep patterns across the mania columns.
//!
//! A sweep is a run of four circles walking column by column from one edge of the
//! playfield to the other at an even pace. Played with sabers such a run degenerates
//! into wild flailing, so the caller replaces it with a wall to lean away from.

use crate::osu::model::{HitKind, HitObject};

use super::{BLOCK_PLACEMENT_DOWNTIME_MS, column_of};

/// Looks for a sweep chain seeded at `hits[start]`.
///
/// The seed must sit in an edge column; the chain then expects one circle per column
/// walking towards the opposite edge. Hits sharing a timeline with a chain member are
/// ignored, a hold or an uneven pace (more than half the block placement downtime off
/// the chain's first interval, or over `tolerance_ms` per step) breaks the chain.
///
/// Returns the index just past the fourth chain member, which the caller uses as the
/// bound of the replacement wall. Returns [`None`] when the chain stays incomplete or
/// runs into the end of `hits`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn detect_sweep(hits: &[HitObject], start: usize, tolerance_ms: f64) -> Option<usize> {
    let seed = hits.get(start)?;
    let is_left_sweep = seed.x > 127;
    let mut lane: i32 = if is_left_sweep { 2 } else { 1 };
    let mut times = [0.0_f64; 4];
    times[0] = seed.time_ms;
    let mut matched: usize = 1;
    let mut pace = 0.0;

    let mut index = start + 1;
    while matched < 4 {
        let Some(hit) = hits.get(index) else { break };
        if times[matched - 1] < hit.time_ms {
            if times[matched] == 0.0 {
                times[matched] = hit.time_ms;
            } else if hit.time_ms > times[matched] {
                // Already two timelines ahead, the chain misses a member.
                break;
            }
            let step = times[matched] - times[matched - 1];
            if matched == 1 {
                pace = step;
            }
            if matches!(hit.kind, HitKind::Hold { .. })
                || tolerance_ms < step
                || 0.5 * BLOCK_PLACEMENT_DOWNTIME_MS < (step - pace).abs()
            {
                break;
            }
            if matches!(hit.kind, HitKind::Circle { .. }) && lane == i32::from(column_of(hit.x)) {
                lane += if is_left_sweep { -1 } else { 1 };
                matched += 1;
            }
        }
        index += 1;
    }
    (matched >= 4 && index < hits.len()).then_some(index)
}
