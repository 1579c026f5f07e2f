//! Lexical analyzer of the `.osu` text format.
//!
//! Raw [String] == [lex] ==> [`Token`] list (in [`OsuLexOutput`]) == [parse] ==> `Beatset` (in
//! `OsuParseOutput`)
//!
//! The format is line oriented. Every line is truncated at the first `//`, then classified
//! into a section heading, a `key: value` property, a comma separated row, or free text.

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind};
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use crate::diagnostics::{SimpleSource, ToAriadne};

use super::mixin::{SourceRangeMixin, SourceRangeMixinExt};

/// An error occurred when lexical analysis.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum LexWarning {
    /// A line started a section heading with `[` but never closed it with `]`.
    #[error("section heading is not closed by `]`")]
    UnclosedSectionHeading,
    /// A `key: value` line had nothing before the `:`.
    #[error("property key is empty")]
    EmptyPropertyKey,
}

/// The lex warning with position information.
pub type LexWarningWithRange = SourceRangeMixin<LexWarning>;

/// type alias of core::result::Result<T, LexWarning>
pub(crate) type Result<T> = core::result::Result<T, LexWarning>;

/// A token content of the `.osu` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Token<'a> {
    /// `[name]`. Opens a section such as `[General]` or `[HitObjects]`. The name consists of
    /// word characters only.
    SectionHeading(&'a str),
    /// `key: value`. A property line, used by the `[General]` and `[Metadata]` sections.
    Property {
        /// String before the first `:`, without surrounding whitespace.
        key: &'a str,
        /// String after the first `:`, without leading whitespace.
        value: &'a str,
    },
    /// A comma separated data line, used by the `[TimingPoints]` and `[HitObjects]` sections.
    Row(&'a str),
    /// Any other non-empty line. Ignored by the parser.
    Text(&'a str),
}

/// A token with position information.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

impl<'a> Token<'a> {
    pub(crate) fn parse(line: &'a str) -> Result<Self> {
        if let Some(rest) = line.strip_prefix('[') {
            return match rest.split_once(']') {
                Some((name, _))
                    if !name.is_empty()
                        && name.chars().all(|c| c.is_alphanumeric() || c == '_') =>
                {
                    Ok(Self::SectionHeading(name))
                }
                Some(_) => Ok(Self::Text(line)),
                None => Err(LexWarning::UnclosedSectionHeading),
            };
        }
        match line.split_once(':') {
            // Data rows may carry `:` in their tail fields, so a `,` before the first `:`
            // marks the line as a row instead of a property.
            Some((key, _)) if key.contains(',') => Ok(Self::Row(line)),
            Some((key, value)) => {
                let key = key.trim_end();
                if key.is_empty() {
                    return Err(LexWarning::EmptyPropertyKey);
                }
                Ok(Self::Property {
                    key,
                    value: value.trim_start(),
                })
            }
            None if line.contains(',') => Ok(Self::Row(line)),
            None => Ok(Self::Text(line)),
        }
    }
}

/// Lex parsing results, includes tokens and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsuLexOutput<'a> {
    /// tokens
    pub tokens: Vec<TokenWithRange<'a>>,
    /// warnings
    pub lex_warnings: Vec<LexWarningWithRange>,
}

/// Analyzes and converts the `.osu` format text into a token list.
pub fn parse<'a>(source: &'a str) -> OsuLexOutput<'a> {
    let mut tokens = vec![];
    let mut warnings = vec![];

    let mut offset = 0;
    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        // A `//` truncates the rest of the line. When it opens the line, the whole line
        // is a comment.
        let line = match line.split_once("//") {
            Some((before, _)) => before,
            None => line,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let start = line_start + (line.len() - line.trim_start().len());
        let end = start + trimmed.len();
        match Token::parse(trimmed) {
            Ok(token) => tokens.push(token.into_wrapper_manual(start, end)),
            Err(warning) => warnings.push(warning.into_wrapper_manual(start, end)),
        }
    }

    OsuLexOutput {
        tokens,
        lex_warnings: warnings,
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for LexWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let (start, end) = self.as_span();
        let filename = src.name().to_string();
        Report::build(ReportKind::Warning, (filename.clone(), start..end))
            .with_message("lex: ".to_string() + &self.content().to_string())
            .with_label(Label::new((filename, start..end)).with_color(Color::Cyan))
            .finish()
    }
}
