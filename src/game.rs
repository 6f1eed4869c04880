use std::path::PathBuf;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::{AudioCue, Mute};
use crate::config::{
    DEFAULT_PLACE_SOUND, Difficulty, INITIAL_SEGMENTS, PICKUP_THRESHOLD, Playfield,
    SELF_COLLISION_THRESHOLD, STEP_PER_SPEED, WALL_MARGIN,
};
use crate::creature::{Creature, Point};
use crate::input::{Command, Heading};
use crate::scheduler::Schedule;
use crate::spawner::Spawner;

/// Scalar session values shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub running: bool,
    pub paused: bool,
    pub score: u32,
    pub high_score: u32,
    pub speed: f64,
    pub difficulty: Difficulty,
}

impl GameState {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            running: false,
            paused: false,
            score: 0,
            high_score: 0,
            speed: difficulty.settings().base_speed,
            difficulty,
        }
    }
}

/// Externally visible phase of the state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of the last finished game, kept for the end screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverSummary {
    pub score: u32,
    pub reason: DeathReason,
    pub new_high_score: bool,
}

/// Owns every piece of mutable game state and applies all transitions.
pub struct Game {
    pub state: GameState,
    pub creature: Creature,
    pub spawner: Spawner<StdRng>,
    pub last_game_over: Option<GameOverSummary>,
    playfield: Playfield,
    audio: Box<dyn AudioCue>,
}

impl Game {
    /// Creates an idle game with an entropy-seeded spawner and no sound.
    #[must_use]
    pub fn new(playfield: Playfield, difficulty: Difficulty) -> Self {
        Self::with_rng(playfield, difficulty, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(playfield: Playfield, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(playfield, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(playfield: Playfield, difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            state: GameState::new(difficulty),
            creature: Creature::new(Point::ORIGIN, Heading::Right),
            spawner: Spawner::new(rng, DEFAULT_PLACE_SOUND),
            last_game_over: None,
            playfield,
            audio: Box::new(Mute),
        }
    }

    /// Routes item sounds to `audio`, playing `sound` on every placement.
    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioCue>, sound: impl Into<PathBuf>) -> Self {
        self.audio = audio;
        self.spawner.set_sound(sound);
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.state.running, self.state.paused) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::Running,
            (true, true) => Phase::Paused,
        }
    }

    #[must_use]
    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Distance the head covers on the next tick.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.state.speed * STEP_PER_SPEED
    }

    /// Applies one input command.
    ///
    /// Returns how the tick timer must change, or `None` when it is unaffected.
    /// Commands that are illegal in the current phase are ignored.
    pub fn handle(&mut self, command: Command) -> Option<Schedule> {
        match command {
            Command::Start => self.start(),
            Command::Steer(heading) => {
                if self.phase() == Phase::Running {
                    self.creature.set_heading(heading);
                }
                None
            }
            Command::TogglePause => self.toggle_pause(),
            Command::SetDifficulty(difficulty) => {
                self.set_difficulty(difficulty);
                None
            }
            Command::Quit => None,
        }
    }

    /// Starts a new game from Idle; a no-op while a game is in progress.
    pub fn start(&mut self) -> Option<Schedule> {
        if self.state.running {
            return None;
        }

        self.state.running = true;
        self.state.paused = false;
        self.state.score = 0;
        self.state.speed = self.state.difficulty.settings().base_speed;
        self.last_game_over = None;
        self.creature = Creature::spawn(Point::ORIGIN, Heading::Right, INITIAL_SEGMENTS);
        self.spawner.place_item(self.playfield, self.audio.as_mut());

        info!("game started on {}", self.state.difficulty.label());
        Some(Schedule::Immediate)
    }

    /// Toggles pause while a game is in progress.
    pub fn toggle_pause(&mut self) -> Option<Schedule> {
        if !self.state.running {
            return None;
        }

        self.state.paused = !self.state.paused;
        info!("game {}", if self.state.paused { "paused" } else { "resumed" });

        if self.state.paused {
            Some(Schedule::Stop)
        } else {
            Some(Schedule::Immediate)
        }
    }

    /// Changes difficulty; only honoured while Idle.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.state.running {
            return;
        }

        self.state.difficulty = difficulty;
        self.state.speed = difficulty.settings().base_speed;
        self.last_game_over = None;
        info!("difficulty set to {}", difficulty.label());
    }

    /// Advances simulation by one tick: move, eat, then wall and self checks.
    pub fn tick(&mut self) -> Schedule {
        if self.phase() != Phase::Running {
            return Schedule::Stop;
        }

        self.creature.advance(self.step_size());
        let head = self.creature.head();

        if let Some(item) = self.spawner.item() {
            if head.distance(item.position) < PICKUP_THRESHOLD {
                self.spawner.place_item(self.playfield, self.audio.as_mut());
                self.creature.grow();
                self.state.score += 1;
                self.state.speed += self.state.difficulty.settings().speed_increment;
            }
        }

        if self.is_outside_walls(head) {
            self.game_over(DeathReason::WallCollision);
            return Schedule::Stop;
        }

        if self.creature.head_touches_body(SELF_COLLISION_THRESHOLD) {
            self.game_over(DeathReason::SelfCollision);
            return Schedule::Stop;
        }

        Schedule::Next
    }

    fn is_outside_walls(&self, position: Point) -> bool {
        let max_x = self.playfield.half_width() - WALL_MARGIN;
        let max_y = self.playfield.half_height() - WALL_MARGIN;

        position.x < -max_x || position.x > max_x || position.y < -max_y || position.y > max_y
    }

    fn game_over(&mut self, reason: DeathReason) {
        let score = self.state.score;
        let new_high_score = score > self.state.high_score;
        if new_high_score {
            self.state.high_score = score;
        }

        info!("game over ({reason:?}) with score {score}");

        self.last_game_over = Some(GameOverSummary {
            score,
            reason,
            new_high_score,
        });
        self.creature = Creature::new(Point::ORIGIN, Heading::Right);
        self.spawner.clear();
        self.state.running = false;
        self.state.paused = false;
        self.state.score = 0;
        self.state.speed = self.state.difficulty.settings().base_speed;
    }
}
