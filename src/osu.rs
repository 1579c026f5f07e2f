//! The parser module of the osu! beatmap (`.osu`) file.
//!
//! This module consists of two phases: lexical analyzing and token parsing.
//!
//! `lex` module provides definitions of the line tokens and a translator from string into
//! them. A `.osu` file is a line oriented mix of `[Section]` headings, `key: value`
//! properties and comma separated data rows.
//!
//! `parse` module builds the [`model::Beatset`] out of the token list: song media, play
//! settings, timing events and hit objects. `timing` folds the tempo changes into the
//! average tempo the transform runs on.
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `String` to input).
//! - Unknown sections and properties are ignored.
//! - Malformed data rows are dropped with a warning instead of failing the whole file.
//! - A beatset without audio, play mode, tempo or hit objects is rejected, such a file
//!   cannot be transformed into anything playable.

pub mod lex;
pub mod mixin;
pub mod model;
pub mod parse;
pub mod timing;

#[cfg(feature = "diagnostics")]
use ariadne::Report;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use crate::diagnostics::{SimpleSource, ToAriadne};

use self::{
    lex::{LexWarningWithRange, OsuLexOutput},
    model::Beatset,
    parse::{OsuParseError, OsuParseOutput, ParseWarningWithRange},
};

/// A warning occurred when parsing the `.osu` format file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum OsuWarning {
    /// A warning comes from lexical analyzer.
    #[error("Warn: lex: {0}")]
    LexWarning(#[from] LexWarningWithRange),
    /// A warning comes from syntax parser.
    #[error("Warn: parse: {0}")]
    ParseWarning(#[from] ParseWarningWithRange),
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for OsuWarning {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        match self {
            Self::LexWarning(warning) => warning.to_report(src),
            Self::ParseWarning(warning) => warning.to_report(src),
        }
    }
}

/// Output of parsing a `.osu` file.
#[derive(Debug, Clone, PartialEq)]
pub struct OsuOutput {
    /// The parsed beatset.
    pub beatset: Beatset,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<OsuWarning>,
}

/// Parse a `.osu` file from source text.
///
/// This function provides a convenient way to parse a `.osu` file in one step.
///
/// # Example
///
/// ```
/// use osu2saber::osu::{OsuOutput, model::PlayMode, parse_osu};
///
/// let source = "\
/// [General]
/// AudioFilename: audio.mp3
/// Mode: 3
///
/// [TimingPoints]
/// 600,500,4,2,0,60,1,0
///
/// [HitObjects]
/// 192,192,1600,1,0,0:0:0:0:
/// ";
/// let OsuOutput { beatset, warnings } = parse_osu(source).expect("beatmap should parse");
/// assert_eq!(beatset.settings.mode, PlayMode::Mania);
/// assert_eq!(warnings, vec![]);
/// ```
pub fn parse_osu(source: &str) -> Result<OsuOutput, OsuParseError> {
    let OsuLexOutput {
        tokens,
        lex_warnings,
    } = lex::parse(source);

    let OsuParseOutput {
        beatset,
        parse_warnings,
    } = parse::parse(&tokens)?;

    let mut warnings: Vec<OsuWarning> = lex_warnings
        .into_iter()
        .map(OsuWarning::LexWarning)
        .collect();

    warnings.extend(parse_warnings.into_iter().map(OsuWarning::ParseWarning));

    Ok(OsuOutput { beatset, warnings })
}
