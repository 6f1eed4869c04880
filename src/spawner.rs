use std::path::{Path, PathBuf};

use rand::Rng;

use crate::audio::AudioCue;
use crate::config::{Playfield, SPAWN_MARGIN};
use crate::creature::Point;

/// The consumable currently placed on the playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub position: Point,
}

impl Item {
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self { position }
    }
}

/// Owns the single item and decides where the next one appears.
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    item: Option<Item>,
    margin: f64,
    sound: PathBuf,
    rng: R,
}

impl<R: Rng> Spawner<R> {
    #[must_use]
    pub fn new(rng: R, sound: impl Into<PathBuf>) -> Self {
        Self {
            item: None,
            margin: SPAWN_MARGIN,
            sound: sound.into(),
            rng,
        }
    }

    /// Replaces the item with one at a random position and plays the cue.
    pub fn place_item(&mut self, playfield: Playfield, audio: &mut dyn AudioCue) -> Item {
        audio.play_sound(&self.sound);

        let item = Item::at(spawn_position(&mut self.rng, playfield, self.margin));
        self.item = Some(item);
        item
    }

    /// Puts an item at an explicit position, without sound.
    pub fn set_item(&mut self, item: Item) {
        self.item = Some(item);
    }

    pub fn set_sound(&mut self, sound: impl Into<PathBuf>) {
        self.sound = sound.into();
    }

    /// Removes the item from the playfield.
    pub fn clear(&mut self) {
        self.item = None;
    }

    #[must_use]
    pub fn item(&self) -> Option<Item> {
        self.item
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    #[must_use]
    pub fn sound(&self) -> &Path {
        &self.sound
    }
}

/// Picks integer coordinates uniformly inside the playfield minus `margin`.
///
/// The range collapses to the centre when the playfield is smaller than twice
/// the margin.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, playfield: Playfield, margin: f64) -> Point {
    let max_x = spawn_extent(playfield.half_width(), margin);
    let max_y = spawn_extent(playfield.half_height(), margin);

    Point {
        x: f64::from(rng.gen_range(-max_x..=max_x)),
        y: f64::from(rng.gen_range(-max_y..=max_y)),
    }
}

fn spawn_extent(half: f64, margin: f64) -> i32 {
    ((half.trunc() - margin).max(0.0)) as i32
}
