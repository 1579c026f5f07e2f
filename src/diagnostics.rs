//! Fancy diagnostics support using `ariadne`.
//!
//! This module provides convenient methods to convert warnings carrying `SourceRangeMixin`
//! (such as `LexWarningWithRange`, `ParseWarningWithRange`, and the aggregated
//! `OsuWarning`) to `ariadne::Report` without modifying existing warning type
//! definitions.
//!
//! Since `SourceRangeMixin` contains index span information (start/end byte offsets), this
//! module lets ariadne automatically handle row/column calculations for display purposes.
//!
//! # Usage Example
//!
//! ```rust
//! # #[cfg(feature = "diagnostics")]
//! # {
//! use osu2saber::{diagnostics::emit_osu_warnings, osu::parse_osu};
//!
//! // Parse an osu! beatmap file
//! let source = "\
//! [General]
//! AudioFilename: audio.mp3
//! Mode: 3
//! [TimingPoints]
//! 600,500,4,2,0,60,1,0
//! [HitObjects]
//! oops,192,1600,1,0,0:0:0:0:
//! 192,192,1600,1,0,0:0:0:0:
//! ";
//! let output = parse_osu(source).expect("beatset should parse");
//!
//! // Output all warnings
//! emit_osu_warnings("song.osu", source, &output.warnings);
//! # }
//! ```

#[cfg(feature = "diagnostics")]
use ariadne::{Report, Source};

#[cfg(feature = "diagnostics")]
use crate::osu::OsuWarning;

/// Simple source container that holds the filename and source text.
/// Ariadne will automatically handle row/column calculations from byte offsets.
///
/// # Usage Example
///
/// ```rust
/// use osu2saber::diagnostics::SimpleSource;
///
/// // Create source container
/// let source_text = "[General]\nAudioFilename: audio.mp3\n";
/// let source = SimpleSource::new("song.osu", source_text);
///
/// // Get source text
/// assert_eq!(source.text(), source_text);
/// ```
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    ///
    /// # Parameters
    /// * `name` - Name of the source file
    /// * `text` - Complete text content of the source file
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned warnings to `ariadne::Report`.
///
/// # Usage Example
///
/// ```rust
/// use osu2saber::{diagnostics::{SimpleSource, ToAriadne}, osu::OsuWarning};
/// use ariadne::Source;
///
/// // Assume there are warnings generated during beatmap parsing
/// let warnings: Vec<OsuWarning> = vec![/* warnings obtained from parsing */];
/// let source_text = "[General]\nAudioFilename: audio.mp3\n";
///
/// let source = SimpleSource::new("song.osu", source_text);
/// let ariadne_source = Source::from(source_text);
///
/// for warning in &warnings {
///     let report = warning.to_report(&source);
///     // Ariadne will automatically handle row/column calculation
///     let _ = report.print(("song.osu".to_string(), ariadne_source.clone()));
/// }
/// ```
#[cfg(feature = "diagnostics")]
pub trait ToAriadne {
    /// Convert the warning to an ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Convenience method: batch render an `OsuWarning` list.
///
/// This function automatically creates a [`SimpleSource`] and generates diagnostic output
/// for each warning. Ariadne will automatically handle row/column calculations from the
/// provided byte ranges.
///
/// # Usage Example
///
/// ```rust
/// use osu2saber::{diagnostics::emit_osu_warnings, osu::OsuWarning};
///
/// let source = "[General]\nAudioFilename: audio.mp3\n";
///
/// // Assume warning list obtained from parsing
/// let warnings: Vec<OsuWarning> = vec![/* parsing warnings */];
///
/// // Batch output all warnings - ariadne will automatically calculate row/column positions
/// emit_osu_warnings("song.osu", source, &warnings);
/// ```
#[cfg(feature = "diagnostics")]
pub fn emit_osu_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarning>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for warning in warnings {
        let report = warning.to_report(&simple);
        let _ = report.print((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a list of `OsuWarning` without printing.
///
/// This is useful in tests to verify diagnostics can be generated while keeping test
/// output clean.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn collect_osu_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarning>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings
        .into_iter()
        .map(|warning| warning.to_report(&simple))
        .collect()
}
