use clap::ValueEnum;
use ratatui::style::Color;
use serde::Deserialize;

/// Playfield dimensions in world units, centred on the origin.
///
/// Replaces the anonymous `(f64, f64)` tuple a render surface reports, making
/// width vs. height unambiguous at every call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Playfield {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn half_width(self) -> f64 {
        self.width / 2.0
    }

    #[must_use]
    pub fn half_height(self) -> f64 {
        self.height / 2.0
    }
}

impl From<(f64, f64)> for Playfield {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// Selectable difficulty level.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Speed parameters attached to one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub base_speed: f64,
    pub speed_increment: f64,
}

impl Difficulty {
    /// Returns the immutable speed preset for this level.
    #[must_use]
    pub fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                base_speed: 1.5,
                speed_increment: 0.05,
            },
            Self::Normal => DifficultySettings {
                base_speed: 2.0,
                speed_increment: 0.1,
            },
            Self::Hard => DifficultySettings {
                base_speed: 3.0,
                speed_increment: 0.2,
            },
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

/// Default window width in world units.
pub const DEFAULT_WINDOW_WIDTH: f64 = 700.0;

/// Default window height in world units.
pub const DEFAULT_WINDOW_HEIGHT: f64 = 700.0;

/// Delay between two simulation ticks in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// World units travelled per tick for each unit of speed.
pub const STEP_PER_SPEED: f64 = 10.0;

/// Distance between a freshly seeded segment and the head.
pub const SEGMENT_SPACING: f64 = 20.0;

/// Side length of the square sprite drawn for head and segments.
pub const SEGMENT_SIZE: f64 = 20.0;

/// Segments created at the start of every game.
pub const INITIAL_SEGMENTS: usize = 2;

/// Head-to-item distance below which the item is eaten.
pub const PICKUP_THRESHOLD: f64 = 20.0;

/// Head-to-segment distance below which the creature bites itself.
pub const SELF_COLLISION_THRESHOLD: f64 = 10.0;

/// Inset from every window edge past which the head hits the wall.
pub const WALL_MARGIN: f64 = 20.0;

/// Inset from every window edge kept free of items.
pub const SPAWN_MARGIN: f64 = 200.0;

/// Sound played each time an item is placed.
pub const DEFAULT_PLACE_SOUND: &str = "assets/place.wav";

pub const BACKGROUND: Color = Color::Black;
pub const TEXT: Color = Color::White;
pub const HEAD_COLOR: Color = Color::Rgb(210, 105, 30);
pub const LEAF_COLOR: Color = Color::Rgb(0, 205, 0);

/// Segment shades, cycled from the head towards the tail.
pub const SEGMENT_COLORS: [Color; 4] = [
    Color::Rgb(210, 105, 30),
    Color::Rgb(205, 102, 29),
    Color::Rgb(238, 118, 33),
    Color::Rgb(255, 127, 36),
];

/// Outline of the leaf sprite relative to the item position.
pub const LEAF_OUTLINE: [(f64, f64); 6] = [
    (0.0, 0.0),
    (14.0, 2.0),
    (18.0, 6.0),
    (20.0, 20.0),
    (6.0, 18.0),
    (2.0, 14.0),
];
