//! End-to-end conversion of beatmap sources into song folder files.
//!
//! [`convert_beatmap`] turns one source into one `.dat` file. A [`Batch`]
//! collects several difficulties of the same song and finishes with the
//! `Info.dat` manifest the game discovers them through; nothing here touches
//! the file system, the caller decides where the [`MapFile`]s end up.

use thiserror::Error;

use crate::osu::model::Media;
use crate::osu::parse::OsuParseError;
use crate::osu::{OsuOutput, OsuWarning, parse_osu};
use crate::saber::info::{BeatmapSet, InfoDat};
use crate::saber::{Characteristic, StageLevel};
use crate::sequencer::{Sequencer, TransformError};

/// File name of the song manifest within a song folder.
pub const INFO_FILENAME: &str = "Info.dat";

/// An error occurred while converting a beatmap source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The source could not be parsed into a beatset.
    #[error("parse: {0}")]
    Parse(#[from] OsuParseError),
    /// The beatset could not be transformed into a saber map.
    #[error("transform: {0}")]
    Transform(#[from] TransformError),
    /// The transformed map could not be serialized.
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One file of a converted song folder, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    /// File name within the song folder.
    pub name: String,
    /// JSON contents of the file.
    pub contents: String,
}

/// The outcome of converting a single beatmap source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOutput {
    /// The difficulty beatmap file.
    pub file: MapFile,
    /// Warnings collected while parsing the source.
    pub warnings: Vec<OsuWarning>,
}

/// Converts one beatmap source into the `.dat` file for `stage`.
///
/// # Errors
///
/// When the source cannot be parsed, its play mode has no saber rendition or
/// the map cannot be serialized.
///
/// # Examples
///
/// ```
/// use osu2saber::convert::convert_beatmap;
/// use osu2saber::saber::StageLevel;
/// use osu2saber::sequencer::SaberSequencer;
///
/// let source = concat!(
///     "osu file format v14\n",
///     "[General]\n",
///     "AudioFilename: audio.mp3\n",
///     "Mode: 3\n",
///     "[Metadata]\n",
///     "Title:Lonely Drive\n",
///     "Artist:Unknown\n",
///     "Creator:someone\n",
///     "[TimingPoints]\n",
///     "3000,500,4,2,0,100,1,0\n",
///     "[HitObjects]\n",
///     "64,192,4000,1,0,0:0:0:0:\n",
/// );
/// let output = convert_beatmap(source, StageLevel::Expert, &SaberSequencer::default())?;
/// assert_eq!(output.file.name, "NoArrowsExpert.dat");
/// assert_eq!(output.warnings, vec![]);
/// # Ok::<(), osu2saber::convert::ConvertError>(())
/// ```
pub fn convert_beatmap(
    source: &str,
    stage: StageLevel,
    sequencer: &impl Sequencer,
) -> Result<ConvertOutput, ConvertError> {
    let OsuOutput { beatset, warnings } = parse_osu(source)?;
    let map = sequencer.transform(&beatset, stage)?;
    let contents = sequencer.serialize(&map)?;
    Ok(ConvertOutput {
        file: MapFile {
            name: map.beatmap_filename(),
            contents,
        },
        warnings,
    })
}

/// Collects the difficulties of one song into a song folder.
///
/// Every [`Batch::append`] contributes one `.dat` file; [`Batch::finish`]
/// seals the folder with its `Info.dat`. The song credits are taken from the
/// first appended source.
#[derive(Debug, Clone)]
pub struct Batch<S> {
    sequencer: S,
    media: Option<Media>,
    files: Vec<MapFile>,
    sets: Vec<(Characteristic, Vec<StageLevel>)>,
}

/// A finished song folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    /// Directory name for the song folder.
    pub folder_name: String,
    /// All files of the folder, the manifest last.
    pub files: Vec<MapFile>,
}

impl<S: Sequencer> Batch<S> {
    /// Creates an empty batch converting through `sequencer`.
    pub const fn new(sequencer: S) -> Self {
        Self {
            sequencer,
            media: None,
            files: Vec::new(),
            sets: Vec::new(),
        }
    }

    /// Converts one beatmap source and adds its `.dat` file to the folder.
    ///
    /// Returns the warnings collected while parsing the source.
    ///
    /// # Errors
    ///
    /// When the source cannot be parsed, its play mode has no saber rendition
    /// or the map cannot be serialized. A failed append leaves the batch as it
    /// was.
    pub fn append(
        &mut self,
        source: &str,
        stage: StageLevel,
    ) -> Result<Vec<OsuWarning>, ConvertError> {
        let OsuOutput { beatset, warnings } = parse_osu(source)?;
        let map = self.sequencer.transform(&beatset, stage)?;
        let contents = self.sequencer.serialize(&map)?;
        self.files.push(MapFile {
            name: map.beatmap_filename(),
            contents,
        });
        match self
            .sets
            .iter_mut()
            .find(|(characteristic, _)| *characteristic == map.characteristic)
        {
            Some((_, stages)) => stages.push(stage),
            None => self.sets.push((map.characteristic, vec![stage])),
        }
        if self.media.is_none() {
            self.media = Some(beatset.media);
        }
        Ok(warnings)
    }

    /// Seals the folder, appending its `Info.dat` manifest.
    ///
    /// Returns [`None`] when nothing was appended.
    #[must_use]
    pub fn finish(self) -> Option<BatchOutput> {
        let media = self.media?;
        let mut sets = self.sets;
        sets.sort_by_key(|(characteristic, _)| match characteristic {
            Characteristic::NoArrows => 0,
            Characteristic::Standard => 1,
        });
        let sets = sets
            .into_iter()
            .map(|(characteristic, mut stages)| {
                stages.sort_by_key(|stage| stage.rank());
                stages.dedup();
                BeatmapSet::with_stages(characteristic, stages)
            })
            .collect();
        let info = InfoDat::new(&media, sets);
        let contents =
            serde_json::to_string(&info).expect("song manifest should serialize");
        let mut files = self.files;
        files.push(MapFile {
            name: INFO_FILENAME.to_owned(),
            contents,
        });
        Some(BatchOutput {
            folder_name: song_folder_name(&media),
            files,
        })
    }
}

/// Derives the song folder's directory name from its credits.
///
/// Characters that are unusable in directory names are stripped.
#[must_use]
pub fn song_folder_name(media: &Media) -> String {
    let raw = format!("{} - {} ({})", media.artist, media.title, media.author);
    let name: String = raw
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let name = name.trim();
    if name.is_empty() {
        "Converted Song".to_owned()
    } else {
        name.to_owned()
    }
}
