//! Serializable records of the `Info.dat` song manifest.
//!
//! Every converted song folder carries one `Info.dat` describing the audio,
//! the credits and which difficulty files exist. The game discovers the
//! individual `.dat` beatmaps only through this manifest.
//!
//! Audio and artwork are referenced under fixed names ([`default_song_filename`]
//! and [`default_cover_filename`]); the packaging step that copies the song
//! folder is expected to transcode the source audio accordingly.

use serde::{Deserialize, Serialize};
use strict_num_extended::FinF64;

use crate::osu::model::Media;

use super::{Characteristic, MAP_VERSION, StageLevel};

/// Top-level object of a song manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoDat {
    /// Version of the manifest schema, compared using
    /// [Semantic Version 2.0.0](http://semver.org/spec/v2.0.0.html).
    #[serde(rename = "_version")]
    pub version: String,
    /// Title of the song.
    #[serde(rename = "_songName")]
    pub song_name: String,
    /// Subtitle shown in smaller print under the title.
    #[serde(rename = "_songSubName", default)]
    pub song_sub_name: String,
    /// Artist of the song.
    #[serde(rename = "_songAuthorName")]
    pub song_author_name: String,
    /// Author of the source beatmap this song was converted from.
    #[serde(rename = "_levelAuthorName")]
    pub level_author_name: String,
    /// Dominant tempo of the song, used to convert beats to seconds.
    #[serde(rename = "_beatsPerMinute")]
    pub beats_per_minute: FinF64,
    /// Offset between audio and chart in seconds.
    #[serde(rename = "_songTimeOffset", default = "default_fin_zero")]
    pub song_time_offset: FinF64,
    /// How much note lanes may be shifted by the shuffle modifier.
    #[serde(rename = "_shuffle", default = "default_fin_zero")]
    pub shuffle: FinF64,
    /// Period of the shuffle modifier in beats.
    #[serde(rename = "_shufflePeriod", default = "default_shuffle_period")]
    pub shuffle_period: FinF64,
    /// Second of the audio at which the song select preview starts.
    #[serde(rename = "_previewStartTime", default)]
    pub preview_start_time: u32,
    /// Length of the song select preview in seconds.
    #[serde(rename = "_previewDuration", default = "default_preview_duration")]
    pub preview_duration: FinF64,
    /// Audio file of the song folder.
    #[serde(rename = "_songFilename", default = "default_song_filename")]
    pub song_filename: String,
    /// Cover image of the song folder.
    #[serde(rename = "_coverImageFilename", default = "default_cover_filename")]
    pub cover_image_filename: String,
    /// Name of the environment the charts are played in.
    #[serde(rename = "_environmentName", default = "default_environment")]
    pub environment_name: String,
    /// Difficulty beatmaps grouped by play style.
    #[serde(rename = "_difficultyBeatmapSets", default)]
    pub difficulty_beatmap_sets: Vec<BeatmapSet>,
}

/// All difficulty beatmaps of one play style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatmapSet {
    /// Name of the play style, see [`Characteristic::as_str`].
    #[serde(rename = "_beatmapCharacteristicName")]
    pub beatmap_characteristic_name: String,
    /// References to the difficulty files of this play style.
    #[serde(rename = "_difficultyBeatmaps", default)]
    pub difficulty_beatmaps: Vec<BeatmapRef>,
}

/// Reference to one difficulty beatmap file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatmapRef {
    /// Name of the difficulty tier, see [`StageLevel::as_str`].
    #[serde(rename = "_difficulty")]
    pub difficulty: String,
    /// Numeric rank of the tier, see [`StageLevel::rank`].
    #[serde(rename = "_difficultyRank")]
    pub difficulty_rank: u8,
    /// File name of the beatmap within the song folder.
    #[serde(rename = "_beatmapFilename")]
    pub beatmap_filename: String,
    /// Forward speed of spawned notes. Zero selects the game default.
    #[serde(rename = "_noteJumpMovementSpeed", default = "default_fin_zero")]
    pub note_jump_movement_speed: FinF64,
    /// Extra beats of spawn lead for this tier.
    #[serde(rename = "_noteJumpStartBeatOffset", default)]
    pub note_jump_start_beat_offset: u8,
}

/// Zero, the serde default of omitted `FinF64` fields.
fn default_fin_zero() -> FinF64 {
    FinF64::new(0.0).expect("0 should be finite")
}

/// Default period of the shuffle modifier, one beat.
#[must_use]
pub fn default_shuffle_period() -> FinF64 {
    FinF64::new(1.0).expect("1 should be finite")
}

/// Default length of the song select preview, 10 seconds.
#[must_use]
pub fn default_preview_duration() -> FinF64 {
    FinF64::new(10.0).expect("10 should be finite")
}

/// Audio file name every converted song folder uses.
#[must_use]
pub fn default_song_filename() -> String {
    "Track.ogg".into()
}

/// Cover image file name every converted song folder uses.
#[must_use]
pub fn default_cover_filename() -> String {
    "cover.png".into()
}

/// Environment every converted song is played in.
#[must_use]
pub fn default_environment() -> String {
    "DefaultEnvironment".into()
}

impl InfoDat {
    /// Builds a manifest for the song described by `media`, listing the
    /// given beatmap sets.
    #[must_use]
    pub fn new(media: &Media, difficulty_beatmap_sets: Vec<BeatmapSet>) -> Self {
        Self {
            version: MAP_VERSION.to_owned(),
            song_name: media.title.clone(),
            song_sub_name: String::new(),
            song_author_name: media.artist.clone(),
            level_author_name: media.author.clone(),
            beats_per_minute: FinF64::new(media.average_bpm)
                .expect("average BPM should be finite"),
            song_time_offset: FinF64::new(0.0).expect("0 should be finite"),
            shuffle: FinF64::new(0.0).expect("0 should be finite"),
            shuffle_period: default_shuffle_period(),
            preview_start_time: (media.preview_start_ms / 1000.0) as u32,
            preview_duration: default_preview_duration(),
            song_filename: default_song_filename(),
            cover_image_filename: default_cover_filename(),
            environment_name: default_environment(),
            difficulty_beatmap_sets,
        }
    }
}

impl BeatmapSet {
    /// Builds the set entry of `characteristic` covering `stages`.
    #[must_use]
    pub fn with_stages(
        characteristic: Characteristic,
        stages: impl IntoIterator<Item = StageLevel>,
    ) -> Self {
        Self {
            beatmap_characteristic_name: characteristic.as_str().to_owned(),
            difficulty_beatmaps: stages
                .into_iter()
                .map(|stage| BeatmapRef::new(characteristic, stage))
                .collect(),
        }
    }
}

impl BeatmapRef {
    /// Builds the manifest reference of the beatmap for `characteristic`
    /// at `stage`.
    #[must_use]
    pub fn new(characteristic: Characteristic, stage: StageLevel) -> Self {
        Self {
            difficulty: stage.as_str().to_owned(),
            difficulty_rank: stage.rank(),
            beatmap_filename: format!("{}{}.dat", characteristic.as_str(), stage.as_str()),
            note_jump_movement_speed: FinF64::new(0.0).expect("0 should be finite"),
            note_jump_start_beat_offset: stage.start_beat_offset(),
        }
    }
}
