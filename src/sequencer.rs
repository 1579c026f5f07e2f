//! Beatset to saber map transformation.
//!
//! [`SaberSequencer`] drives the per-mode passes: [`events`] renders the lighting
//! show from the timing events, [`mania`] and [`taiko`] place notes and obstacles,
//! [`hands`] deals the mania notes onto hands. All passes work in quantized beats
//! produced by [`quantize::BeatQuantizer`].

pub mod events;
pub mod hands;
pub mod mania;
pub mod quantize;
pub mod sweep;
pub mod taiko;

use thiserror::Error;

use crate::osu::model::{Beatset, PlayMode};
use crate::saber::map::BeatmapDat;
use crate::saber::{Characteristic, MAP_VERSION, SaberMap, StageLevel};

/// Time reserved at the start of the song before any object may spawn, in milliseconds.
pub(crate) const LEAD_IN_TIME_MS: f64 = 3000.0;

/// Smallest gap between two objects sharing a placement cell, in milliseconds.
pub(crate) const BLOCK_PLACEMENT_DOWNTIME_MS: f64 = 200.0;

/// Fastest tempo a map is allowed to run at, in beats per minute.
const BS_MAX_BPM: f64 = 300.0;

/// Timestamps handed to the lighting pass saturate at the unsigned 16 bit range.
const TIMESTAMP_LIMIT_MS: f64 = 65_535.0;

/// Maps an osu! pixel coordinate onto one of the four saber lines.
pub(crate) const fn column_of(x: u16) -> u8 {
    let column = (x / 128) as u8;
    if column > 3 { 3 } else { column }
}

/// An error occurred when transforming a beatset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The beatset's play mode has no saber rendition.
    #[error("play mode `{0}` is not supported")]
    UnsupportedMode(PlayMode),
}

/// Turns parsed beatsets into saber maps.
pub trait Sequencer {
    /// The map format version this sequencer writes.
    fn version(&self) -> &'static str;

    /// Transforms a beatset into a saber map for the given stage level.
    ///
    /// # Errors
    ///
    /// When the beatset's play mode has no saber rendition.
    fn transform(&self, beatset: &Beatset, stage: StageLevel)
    -> Result<SaberMap, TransformError>;

    /// Serializes a transformed map into its one-line JSON form.
    ///
    /// # Errors
    ///
    /// When the map cannot be represented as JSON, such as a beat value
    /// quantized from a non-finite timestamp.
    fn serialize(&self, map: &SaberMap) -> serde_json::Result<String>;
}

/// The standard [`Sequencer`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaberSequencer {
    /// Steer taiko cubes for two-handed play.
    pub two_handed: bool,
}

impl Default for SaberSequencer {
    fn default() -> Self {
        Self { two_handed: true }
    }
}

impl Sequencer for SaberSequencer {
    fn version(&self) -> &'static str {
        MAP_VERSION
    }

    fn transform(
        &self,
        beatset: &Beatset,
        stage: StageLevel,
    ) -> Result<SaberMap, TransformError> {
        let beat_period_ms = 60_000.0 / beatset.media.average_bpm.clamp(1.0, BS_MAX_BPM);
        let quantizer = quantize::BeatQuantizer::new(beat_period_ms, beatset.settings.subdivision);

        let eligible = beatset
            .hits
            .iter()
            .position(|hit| hit.time_ms > LEAD_IN_TIME_MS);
        let first = eligible.unwrap_or(beatset.hits.len().saturating_sub(1));
        let first_hit_ms = beatset.hits.get(first).map_or(0.0, |hit| hit.time_ms);

        let mut events = events::build_events(
            &beatset.events,
            beatset.settings.lead_in_ms.clamp(0.0, TIMESTAMP_LIMIT_MS),
            first_hit_ms.min(TIMESTAMP_LIMIT_MS),
            &quantizer,
        );

        let (characteristic, (notes, obstacles)) = match beatset.settings.mode {
            PlayMode::Mania => {
                let (mut notes, obstacles) = mania::transform_mania(
                    &beatset.hits,
                    first,
                    beat_period_ms,
                    &quantizer,
                    &mut events,
                );
                hands::assign_hands(&mut notes);
                (Characteristic::NoArrows, (notes, obstacles))
            }
            PlayMode::Taiko => (
                Characteristic::Standard,
                taiko::transform_taiko(
                    &beatset.hits,
                    first,
                    beat_period_ms,
                    &quantizer,
                    self.two_handed,
                    &mut events,
                ),
            ),
            mode => return Err(TransformError::UnsupportedMode(mode)),
        };

        events.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        Ok(SaberMap {
            characteristic,
            stage,
            events,
            notes,
            obstacles,
        })
    }

    fn serialize(&self, map: &SaberMap) -> serde_json::Result<String> {
        serde_json::to_string(&BeatmapDat::from(map))
    }
}
