//! Prelude module for the crate.
//!
//! This module re-exports all public types for convenient access.
//! You can use `use osu2saber::prelude::*;` to import all of them at once.

// Re-export diagnostics
pub use crate::diagnostics::SimpleSource;
#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{ToAriadne, collect_osu_reports, emit_osu_warnings};

// Re-export types from the osu module
pub use crate::osu::{
    OsuOutput, OsuWarning,
    lex::{LexWarning, LexWarningWithRange, OsuLexOutput, Token, TokenWithRange},
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::{
        Beatset, HitArea, HitKind, HitObject, HitSound, MAP_HEIGHT, MAP_WIDTH, Media, PlayMode,
        PlaySettings, TimingEvent, TimingEventKind,
    },
    parse::{OsuParseError, OsuParseOutput, ParseWarning, ParseWarningWithRange},
    parse_osu,
    timing::evaluate_average_bpm,
};

// Re-export types from the saber module
pub use crate::saber::{
    Characteristic, CutDirection, EventKind, EventValue, LAYER_COUNT, LINE_COUNT, LightEvent,
    LightValue, MAP_VERSION, Note, NoteColor, Obstacle, SaberMap, SpeedRank, StageLevel, WallKind,
    info::{BeatmapRef, BeatmapSet, InfoDat},
    map::{BeatmapDat, EventRecord, NoteRecord, ObstacleRecord},
};

// Re-export types from the sequencer module
pub use crate::sequencer::{
    SaberSequencer, Sequencer, TransformError, events::build_events, hands::assign_hands,
    mania::transform_mania, quantize::BeatQuantizer, sweep::detect_sweep, taiko::transform_taiko,
};

// Re-export types from the convert module
pub use crate::convert::{
    Batch, BatchOutput, ConvertError, ConvertOutput, INFO_FILENAME, MapFile, convert_beatmap,
    song_folder_name,
};
