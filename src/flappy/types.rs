//! Flappy Biry data structures.
//!
//! World coordinates grow rightward and downward: y = 0 is the top of the
//! screen and the ground strip occupies the bottom `ground_height` units.

use crate::config::GameConfig;
use rand::Rng;
use std::time::Duration;

/// Axis-aligned box in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: boxes that only share an edge do not intersect, and
    /// an empty box intersects nothing.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Title screen, before the first run.
    NotStarted,
    Active,
    /// The last run ended in a collision; physics is frozen.
    GameOver,
}

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ground,
    Pipe,
}

/// The player-controlled bird. Its horizontal position never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Vertical velocity in units/tick (negative = upward).
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_start_y,
            velocity: 0.0,
            width: config.bird_width as f32,
            height: config.bird_height as f32,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// A top and bottom pipe segment with a gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    /// Left edge (float for smooth scrolling).
    pub x: f32,
    pub top_height: u16,
    pub bottom_height: u16,
    /// Whether the bird has already scored this pair.
    pub passed: bool,
}

impl PipePair {
    /// Top segment, hanging from the ceiling.
    pub fn top_rect(&self, config: &GameConfig) -> Aabb {
        Aabb::new(
            self.x,
            0.0,
            config.pipe_width as f32,
            self.top_height as f32,
        )
    }

    /// Bottom segment, standing on the ground.
    pub fn bottom_rect(&self, config: &GameConfig) -> Aabb {
        let height = self.bottom_height as f32;
        Aabb::new(
            self.x,
            config.ground_y() - height,
            config.pipe_width as f32,
            height,
        )
    }

    pub fn right(&self, config: &GameConfig) -> f32 {
        self.x + config.pipe_width as f32
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub config: GameConfig,
    pub mode: Mode,
    /// Cause of the last crash, kept for the game-over screen.
    pub crash: Option<Collision>,

    pub bird: Bird,
    /// Active pipes in spawn order (leftmost first).
    pub pipes: Vec<PipePair>,

    /// Pipes passed in the current (or last) run.
    pub score: u32,

    // Timing
    /// Physics ticks elapsed in the current run.
    pub tick_count: u64,
    /// Tick at which the last pipe spawned (0 at run start).
    pub last_spawn_tick: u64,
    /// Real time not yet consumed by whole ticks.
    pub accumulated_time: Duration,
}

impl FlappyGame {
    /// A game waiting on the start screen.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`]; pipe
    /// geometry that cannot fit is clamped rather than rejected here.
    pub fn new(config: GameConfig) -> Self {
        Self {
            bird: Bird::new(&config),
            config,
            mode: Mode::NotStarted,
            crash: None,
            pipes: Vec::new(),
            score: 0,
            tick_count: 0,
            last_spawn_tick: 0,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.mode == Mode::Active
    }

    /// Put everything back to its starting values and begin a run.
    pub fn start_run(&mut self) {
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.score = 0;
        self.crash = None;
        self.tick_count = 0;
        self.last_spawn_tick = 0;
        self.accumulated_time = Duration::ZERO;
        self.mode = Mode::Active;
    }

    /// Append a pipe pair at the right edge with a random gap position.
    pub fn spawn_pipe<R: Rng>(&mut self, rng: &mut R) {
        let (min_top, max_top) = self.config.top_height_range();
        let top_height = rng.gen_range(min_top..=max_top.max(min_top));
        let bottom_height = self
            .config
            .screen_height
            .saturating_sub(self.config.ground_height)
            .saturating_sub(top_height)
            .saturating_sub(self.config.pipe_gap);

        self.pipes.push(PipePair {
            x: self.config.screen_width as f32,
            top_height,
            bottom_height,
            passed: false,
        });
    }
}
