//! Average tempo evaluation over the timing events.
//!
//! Beatmaps may change tempo mid-song. The whole transform still runs on a single beat
//! duration, so the distinct tempo periods are folded into their greatest common unit, which
//! turns e.g. a half-time section into two beats of the main tempo.

use itertools::Itertools;

use super::model::{TimingEvent, TimingEventKind};

/// Tolerance below which two beat durations count as equal.
pub(crate) const PERIOD_EPSILON: f64 = f32::EPSILON as f64;

/// Shortest supported beat duration in milliseconds (300 BPM).
const MIN_BEAT_PERIOD_MS: f64 = 200.0;

/// Greatest common unit of two beat durations, by repeated subtraction.
fn common_unit(mut a: f64, mut b: f64) -> f64 {
    if a == 0.0 {
        return b.abs();
    }
    if b == 0.0 {
        return a.abs();
    }
    loop {
        if b > a {
            std::mem::swap(&mut a, &mut b);
        }
        if b <= 1.0 {
            break;
        }
        a -= b;
        if a.abs() <= PERIOD_EPSILON {
            break;
        }
    }
    b.abs()
}

/// Evaluates the average tempo of the timing events, in beats per minute.
///
/// Folds the distinct tempo periods into their common unit, smallest first. When the fold
/// degenerates below the shortest supported beat duration, the first announced tempo wins.
/// Returns [`None`] when `events` is empty.
pub fn evaluate_average_bpm(events: &[TimingEvent]) -> Option<f64> {
    let first_period = events.first()?.beat_period_ms;
    let first_tempo = events
        .iter()
        .find(|event| event.kind == TimingEventKind::Tempo)
        .map_or(first_period, |event| event.beat_period_ms);

    let mut unit = events
        .iter()
        .filter(|event| event.kind == TimingEventKind::Tempo)
        .map(|event| event.beat_period_ms)
        .sorted_by(f64::total_cmp)
        .dedup()
        .reduce(common_unit)
        .unwrap_or(first_period);
    if unit < MIN_BEAT_PERIOD_MS {
        unit = first_tempo;
    }
    Some(60_000.0 / unit)
}
