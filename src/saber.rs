//! The Beat Saber side of the conversion: the playfield vocabulary and the
//! `.dat`/`Info.dat` file models.
//!
//! Beat Saber charts place content on a 4x3 grid in front of the player. A
//! chart file consists of three parallel streams, all timed in *beats*:
//!
//! - lighting and laser [`LightEvent`]s,
//! - cuttable (or bomb) [`Note`]s,
//! - [`Obstacle`] walls the player must dodge.
//!
//! The types in this module model those streams with their in-game meaning.
//! The numeric codes of the `.dat` format only appear in the [`map`] and
//! [`info`] submodules, which define the serializable file records.

pub mod info;
pub mod map;

/// Version of the beatmap schema emitted by this crate, compared using
/// [Semantic Version 2.0.0](http://semver.org/spec/v2.0.0.html).
pub const MAP_VERSION: &str = "2.0.0";

/// Number of note columns on the playfield, indexed left to right.
pub const LINE_COUNT: u8 = 4;

/// Number of note rows on the playfield, indexed bottom to top.
pub const LAYER_COUNT: u8 = 3;

/// A lighting or laser track that an event addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The large light rig behind the track.
    BackLight,
    /// The light tubes along both sides of the track.
    SideLight,
    /// The laser fan on the left side.
    LeftLaser,
    /// The laser fan on the right side.
    RightLaser,
    /// The lights above and under the track.
    OverheadLight,
    /// Spins the big rings around the track.
    RingRotation,
    /// Zooms the big rings along the track.
    RingMotion,
    /// Rotation speed control for the left laser fan.
    LeftLaserSpeed,
    /// Rotation speed control for the right laser fan.
    RightLaserSpeed,
}

impl EventKind {
    /// Returns the event type code used by the `.dat` format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::BackLight => 0,
            Self::SideLight => 1,
            Self::LeftLaser => 2,
            Self::RightLaser => 3,
            Self::OverheadLight => 4,
            Self::RingRotation => 8,
            Self::RingMotion => 9,
            Self::LeftLaserSpeed => 12,
            Self::RightLaserSpeed => 13,
        }
    }
}

/// A state that a light track can be switched to.
///
/// Values 1 to 3 light up in the environment's first color, 5 to 7 in the
/// second one. With the default environment these are blue and red.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LightValue {
    /// Turns the light off.
    #[default]
    Off,
    /// Stays on in the first color.
    BlueOn,
    /// Flashes bright in the first color, then returns to on.
    BlueFlash,
    /// Flashes bright in the first color, then fades to off.
    BlueFade,
    /// Stays on in the second color.
    RedOn,
    /// Flashes bright in the second color, then returns to on.
    RedFlash,
    /// Flashes bright in the second color, then fades to off.
    RedFade,
}

impl LightValue {
    /// Returns the event value code used by the `.dat` format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::BlueOn => 1,
            Self::BlueFlash => 2,
            Self::BlueFade => 3,
            Self::RedOn => 5,
            Self::RedFlash => 6,
            Self::RedFade => 7,
        }
    }
}

/// A laser rotation speed between 1 (slowest) and 7 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeedRank(u8);

impl SpeedRank {
    /// Derives a rotation speed from the milliseconds between two tempo
    /// changes, so that rapid tempo shifts spin the lasers faster.
    ///
    /// A gap of zero maps to the fastest rank.
    #[must_use]
    pub fn from_period(delta_ms: f64) -> Self {
        let rank = (1400.0 / delta_ms.abs()).clamp(1.0, 7.0);
        Self(rank as u8)
    }

    /// Returns the rank as the raw event value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// The payload of a [`LightEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventValue {
    /// Switches a light track to the given state.
    Switch(LightValue),
    /// Sets the rotation speed of a laser fan.
    Speed(SpeedRank),
    /// Triggers kinds that ignore their value, such as ring spins.
    Neutral,
}

impl EventValue {
    /// Returns the event value code used by the `.dat` format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Switch(value) => value.code(),
            Self::Speed(rank) => rank.get(),
            Self::Neutral => 0,
        }
    }
}

/// A timed lighting change on one of the environment's tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightEvent {
    /// Trigger time in beats from the start of the audio.
    pub beat: f64,
    /// The track this event addresses.
    pub kind: EventKind,
    /// The state or speed to apply.
    pub value: EventValue,
}

impl LightEvent {
    /// Creates an event on `kind` at `beat`.
    #[must_use]
    pub const fn new(beat: f64, kind: EventKind, value: EventValue) -> Self {
        Self { beat, kind, value }
    }
}

/// The saber a note must be cut with, or a bomb to be avoided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteColor {
    /// Cut with the left (red) saber.
    Left,
    /// Cut with the right (blue) saber.
    Right,
    /// A bomb, must not be touched by either saber.
    Bomb,
}

impl NoteColor {
    /// Returns the note type code used by the `.dat` format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Bomb => 3,
        }
    }

    /// Returns the opposite saber. Bombs stay bombs.
    #[must_use]
    pub const fn other_hand(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Bomb => Self::Bomb,
        }
    }
}

/// The direction a note must be cut in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CutDirection {
    /// Swing upwards.
    Up,
    /// Swing downwards.
    Down,
    /// Swing to the left.
    Left,
    /// Swing to the right.
    Right,
    /// Swing diagonally up-left.
    UpLeft,
    /// Swing diagonally up-right.
    UpRight,
    /// Swing diagonally down-left.
    DownLeft,
    /// Swing diagonally down-right.
    DownRight,
    /// A dot note, cuttable from any direction.
    #[default]
    Any,
}

impl CutDirection {
    /// Returns the cut direction code used by the `.dat` format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::UpLeft => 4,
            Self::UpRight => 5,
            Self::DownLeft => 6,
            Self::DownRight => 7,
            Self::Any => 8,
        }
    }
}

/// A cuttable cube or a bomb on the playfield grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Spawn time in beats from the start of the audio.
    pub beat: f64,
    /// Column on the grid, `0..LINE_COUNT` from the left.
    pub column: u8,
    /// Row on the grid, `0..LAYER_COUNT` from the bottom.
    pub row: u8,
    /// Which saber cuts this note, or a bomb.
    pub color: NoteColor,
    /// Required cut direction.
    pub direction: CutDirection,
}

/// The orientation of an [`Obstacle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallKind {
    /// A full-height wall the player must step around.
    Vertical,
    /// A crouch wall spanning the upper rows.
    Horizontal,
}

impl WallKind {
    /// Returns the obstacle type code used by the `.dat` format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Vertical => 0,
            Self::Horizontal => 1,
        }
    }
}

/// A wall on the track that the player must dodge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Spawn time in beats from the start of the audio.
    pub beat: f64,
    /// Leftmost column covered by the wall.
    pub column: u8,
    /// Whether the wall blocks columns or forces a crouch.
    pub kind: WallKind,
    /// How long the wall lasts, in beats.
    pub duration: f64,
    /// How many columns the wall covers.
    pub width: u8,
}

/// The play style a beatmap is authored for.
///
/// Beat Saber groups the difficulties of a song by characteristic. Charts
/// converted from one-dimensional source modes use [`NoArrows`](Self::NoArrows)
/// since cut directions carry no meaning there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// The regular two-saber mode with cut directions.
    Standard,
    /// Notes may be cut from any direction.
    NoArrows,
}

impl Characteristic {
    /// Returns the characteristic name used in `Info.dat` and filenames.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::NoArrows => "NoArrows",
        }
    }
}

/// A difficulty tier of a beatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageLevel {
    /// The easiest tier.
    Easy,
    /// The relaxed tier.
    Normal,
    /// The middle tier.
    Hard,
    /// The demanding tier.
    Expert,
    /// The hardest tier.
    ExpertPlus,
}

impl StageLevel {
    /// All tiers, ordered from easiest to hardest.
    pub const ALL: [Self; 5] = [
        Self::Easy,
        Self::Normal,
        Self::Hard,
        Self::Expert,
        Self::ExpertPlus,
    ];

    /// Returns the difficulty name used in `Info.dat` and filenames.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
            Self::ExpertPlus => "ExpertPlus",
        }
    }

    /// Returns the numeric difficulty rank shown by the game.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Normal => 3,
            Self::Hard => 5,
            Self::Expert => 7,
            Self::ExpertPlus => 9,
        }
    }

    /// Returns the note jump offset in beats for this tier.
    ///
    /// The hardest tier spawns notes one beat early to leave the player
    /// more reaction room at high densities.
    #[must_use]
    pub const fn start_beat_offset(self) -> u8 {
        match self {
            Self::ExpertPlus => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for StageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete converted beatmap for one difficulty tier.
#[derive(Debug, Clone, PartialEq)]
pub struct SaberMap {
    /// The play style this map was generated for.
    pub characteristic: Characteristic,
    /// The difficulty tier this map was generated for.
    pub stage: StageLevel,
    /// Lighting events, ordered by beat.
    pub events: Vec<LightEvent>,
    /// Notes and bombs, ordered by beat.
    pub notes: Vec<Note>,
    /// Walls, ordered by beat.
    pub obstacles: Vec<Obstacle>,
}

impl SaberMap {
    /// Creates an empty map for the given play style and tier.
    #[must_use]
    pub const fn new(characteristic: Characteristic, stage: StageLevel) -> Self {
        Self {
            characteristic,
            stage,
            events: Vec::new(),
            notes: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    /// Returns the file name this map is expected to be saved under,
    /// such as `NoArrowsExpert.dat`.
    #[must_use]
    pub fn beatmap_filename(&self) -> String {
        format!("{}{}.dat", self.characteristic.as_str(), self.stage.as_str())
    }
}
