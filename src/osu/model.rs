//! In-memory model of a parsed source beatmap.
//!
//! A [`Beatset`] is the unit of work of the whole crate: the parser produces
//! one per `.osu` file and the transformation engine consumes it. All times
//! are absolute milliseconds from the start of the audio, exactly as they
//! appear in the source file.

/// Width of the source playfield in osu! pixels.
pub const MAP_WIDTH: u16 = 512;

/// Height of the source playfield in osu! pixels.
pub const MAP_HEIGHT: u16 = 384;

/// A parsed source beatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Beatset {
    /// Song metadata and credits.
    pub media: Media,
    /// Play configuration of the beatmap.
    pub settings: PlaySettings,
    /// Timing and kiai changes, ordered ascending by time.
    pub events: Vec<TimingEvent>,
    /// Hit objects, ordered ascending by time.
    pub hits: Vec<HitObject>,
}

/// Song metadata of a beatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    /// Title of the song.
    pub title: String,
    /// Artist of the song.
    pub artist: String,
    /// Author of the beatmap.
    pub author: String,
    /// Audio file the beatmap is timed against.
    pub audio_filename: String,
    /// Offset of the song select preview in milliseconds.
    pub preview_start_ms: f64,
    /// Dominant tempo derived from the timing section, in beats per minute.
    pub average_bpm: f64,
}

/// Play configuration of a beatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaySettings {
    /// The play-mode the beatmap was authored for.
    pub mode: PlayMode,
    /// Silence inserted before the audio starts, in milliseconds.
    pub lead_in_ms: f64,
    /// Editor snap divisor, reused as the quantization denominator limit.
    pub subdivision: u8,
}

/// A play-mode of the source game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayMode {
    /// The classic pointer-based mode.
    Standard,
    /// The drum mode. Hit sounds select the drum area.
    Taiko,
    /// The fruit-catching mode.
    Catch,
    /// The piano-style column mode.
    Mania,
}

impl PlayMode {
    /// Decodes the numeric `Mode` property of a beatmap file.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Standard),
            1 => Some(Self::Taiko),
            2 => Some(Self::Catch),
            3 => Some(Self::Mania),
            _ => None,
        }
    }

    /// Returns the numeric code of the mode in the beatmap format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Standard => 0,
            Self::Taiko => 1,
            Self::Catch => 2,
            Self::Mania => 3,
        }
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Standard => "osu!",
            Self::Taiko => "osu!taiko",
            Self::Catch => "osu!catch",
            Self::Mania => "osu!mania",
        };
        f.write_str(name)
    }
}

/// What a timing point changed, as classified by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingEventKind {
    /// The beat period changed, or a kiai section ended.
    Tempo,
    /// A kiai section started.
    KiaiStart,
    /// Neither tempo nor kiai changed. Downstream these pulse the
    /// environment rings.
    Tick,
}

/// One entry of the beatmap's timing section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingEvent {
    /// Time the change applies from, in milliseconds.
    pub time_ms: f64,
    /// Beat period in effect from this point, in milliseconds.
    pub beat_period_ms: f64,
    /// What this timing point changed.
    pub kind: TimingEventKind,
}

/// Bitset of the sample layers attached to a hit.
///
/// In the drum mode the layers select the drum area instead of a sample:
/// whistle and clap mean a rim hit, finish marks the emphasized large hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HitSound(u8);

impl HitSound {
    /// The whistle sample layer.
    pub const WHISTLE: u8 = 1 << 1;
    /// The finish (cymbal) sample layer.
    pub const FINISH: u8 = 1 << 2;
    /// The clap sample layer.
    pub const CLAP: u8 = 1 << 3;

    /// Wraps the raw `hitSound` bits of a beatmap file.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw sample bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns the drum area this hit sound addresses in the drum mode.
    #[must_use]
    pub const fn area(self) -> HitArea {
        let rim = self.0 & (Self::WHISTLE | Self::CLAP) != 0;
        let big = self.0 & Self::FINISH != 0;
        match (rim, big) {
            (false, false) => HitArea::Center,
            (true, false) => HitArea::Rim,
            (false, true) => HitArea::BigCenter,
            (true, true) => HitArea::BigRim,
        }
    }
}

/// The drum area of a hit in the drum mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitArea {
    /// A centre hit (don).
    Center,
    /// A rim hit (katsu).
    Rim,
    /// A large centre hit, struck with both hands.
    BigCenter,
    /// A large rim hit, struck with both hands.
    BigRim,
}

/// The kind-specific payload of a hit object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitKind {
    /// A single tap.
    Circle {
        /// Sample layers of the tap.
        sound: HitSound,
    },
    /// A held slide along a curve.
    Slider {
        /// Total travel distance in pixels, slide count times curve length.
        length: f64,
    },
    /// A spinner.
    Spinner {
        /// Time the spin ends, in milliseconds.
        end_ms: f64,
    },
    /// A column hold of the piano-style mode.
    Hold {
        /// Time the hold ends, in milliseconds.
        end_ms: f64,
    },
}

/// One hit object of a beatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitObject {
    /// Horizontal position in pixels, `0..=MAP_WIDTH`.
    pub x: u16,
    /// Vertical position in pixels, `0..=MAP_HEIGHT`.
    pub y: u16,
    /// Time the object must be hit, in milliseconds.
    pub time_ms: f64,
    /// Whether this object starts a new combo.
    pub new_combo: bool,
    /// The kind of the object with its payload.
    pub kind: HitKind,
}
