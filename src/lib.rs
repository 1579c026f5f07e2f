//! The osu! beatmap to Beat Saber map converter.
//!
//! This crate reads an osu! beatmap (`.osu`) file, reinterprets its hit objects as Beat
//! Saber blocks, walls, bombs and a light show, and serializes the result into the
//! `.dat` documents a Beat Saber custom song is made of.
//!
//! The pipeline runs in three stages:
//!
//! - [`osu`] parses the `.osu` text into a [`osu::model::Beatset`]: song media, play
//!   settings, timing events and hit objects.
//! - [`sequencer`] transforms a beatset into a [`saber::SaberMap`]. osu!mania and
//!   osu!taiko beatsets are supported, each play mode with its own placement strategy.
//! - [`saber`] models the Beat Saber map and serializes it into the song manifest
//!   `Info.dat` and one beatmap `.dat` per difficulty.
//!
//! [`convert`] ties the stages together: single files with [`convert::convert_beatmap`],
//! whole song folders with [`convert::Batch`].
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `String` to input).
//! - Malformed beatmap rows are dropped with a warning instead of failing the file.
//! - The transform is deterministic, the same beatset always produces the same map.

pub mod convert;
pub mod diagnostics;
pub mod osu;
pub mod prelude;
pub mod saber;
pub mod sequencer;
