//! Beat quantization of millisecond timestamps.
//!
//! All output times are expressed in beats. The quantizer snaps a timestamp onto a
//! power-of-two beat grid, so that converted patterns land on musically sensible
//! positions even when the source timestamps drift by a few milliseconds.

/// Maps millisecond timestamps onto the beat grid of a fixed tempo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatQuantizer {
    /// Duration of one beat in milliseconds.
    beat_period_ms: f64,
    /// Finest beat subdivision, as a power of two.
    max_denominator: u8,
}

impl BeatQuantizer {
    /// Creates a quantizer for the given beat duration and subdivision limit.
    #[must_use]
    pub const fn new(beat_period_ms: f64, max_denominator: u8) -> Self {
        Self {
            beat_period_ms,
            max_denominator,
        }
    }

    /// Converts a millisecond timestamp into quantized beats.
    ///
    /// The fractional part of the beat is snapped downwards through halves, quarters
    /// and so on up to the subdivision limit. A remainder below an eighth of a beat is
    /// dropped. A zero timestamp or a zero beat duration always maps to beat zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn beats(&self, time_ms: f64) -> f64 {
        if time_ms == 0.0 || self.beat_period_ms == 0.0 {
            return 0.0;
        }

        let ratio = (time_ms / self.beat_period_ms).abs();
        let mut fraction = ratio - ratio.floor();
        let mut whole = ratio.floor();
        let mut denominator: u32 = 2;
        while denominator <= u32::from(self.max_denominator) {
            let quant = 1.0 / f64::from(denominator);
            if fraction >= quant {
                fraction -= quant;
                whole += quant;
            }
            if fraction < 0.125 {
                break;
            }
            denominator <<= 1;
        }
        whole
    }
}

#[cfg(test)]
mod tests {
    use super::BeatQuantizer;

    #[test]
    fn zero_inputs_map_to_beat_zero() {
        assert_eq!(BeatQuantizer::new(500.0, 8).beats(0.0), 0.0);
        assert_eq!(BeatQuantizer::new(0.0, 8).beats(1234.0), 0.0);
    }

    #[test]
    fn whole_beats_pass_through() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        assert_eq!(quantizer.beats(500.0), 1.0);
        assert_eq!(quantizer.beats(4000.0), 8.0);
    }

    #[test]
    fn fractions_snap_down_onto_the_grid() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        // 600ms is beat 1.2, which snaps onto 1 + 1/8.
        assert_eq!(quantizer.beats(600.0), 1.125);
        // 850ms is beat 1.7, which snaps onto 1 + 1/2 + 1/8.
        assert_eq!(quantizer.beats(850.0), 1.625);
        // A remainder below an eighth is dropped.
        assert_eq!(quantizer.beats(530.0), 1.0);
    }

    #[test]
    fn subdivision_limit_bounds_the_grid() {
        // With a limit of 2 only halves survive.
        let coarse = BeatQuantizer::new(500.0, 2);
        assert_eq!(coarse.beats(850.0), 1.5);
        // With a limit below 2 the fraction is dropped entirely.
        let floor_only = BeatQuantizer::new(500.0, 1);
        assert_eq!(floor_only.beats(850.0), 1.0);
    }

    #[test]
    fn quantized_beats_grow_monotonically() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        let mut last = 0.0;
        for step in 0..200 {
            let beats = quantizer.beats(f64::from(step) * 25.0);
            assert!(last <= beats, "beat {beats} fell below {last}");
            last = beats;
        }
    }
}
