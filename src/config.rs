//! Game tuning and command-line configuration.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest accepted pipe spawn interval (one minute).
pub const MAX_SPAWN_INTERVAL_MS: u64 = 60_000;

/// Tuning constants for one game session.
///
/// Geometry is in world units (one unit = one pixel of the default 600×800
/// window), physics is per tick. Any field left out of a config file keeps
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub screen_width: u16,
    pub screen_height: u16,
    pub ground_height: u16,

    pub pipe_width: u16,
    /// Vertical opening between the top and bottom segment.
    pub pipe_gap: u16,
    /// Minimum top-segment height.
    pub pipe_top_clearance: u16,
    /// Minimum bottom-segment height.
    pub pipe_ground_clearance: u16,
    pub pipe_spawn_interval_ms: u64,
    /// Leftward scroll per tick.
    pub pipe_speed: f32,

    pub bird_x: f32,
    pub bird_start_y: f32,
    pub bird_width: u16,
    pub bird_height: u16,
    /// Added to velocity every tick (positive = downward).
    pub gravity: f32,
    /// Velocity set by a jump (negative = upward).
    pub jump_velocity: f32,

    /// Simulation and frame rate.
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 800,
            ground_height: 100,

            pipe_width: 80,
            pipe_gap: 200,
            pipe_top_clearance: 50,
            pipe_ground_clearance: 50,
            pipe_spawn_interval_ms: 1500,
            pipe_speed: 3.0,

            bird_x: 100.0,
            bird_start_y: 400.0,
            bird_width: 40,
            bird_height: 30,
            gravity: 0.5,
            jump_velocity: -9.0,

            fps: 60,
        }
    }
}

impl GameConfig {
    /// Read overrides from a JSON file.
    ///
    /// The result is not validated; command-line overrides may still apply.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&raw).map_err(|source| AppError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Y coordinate of the top of the ground strip.
    pub fn ground_y(&self) -> f32 {
        (self.screen_height - self.ground_height) as f32
    }

    /// Wall-clock length of one simulation tick.
    pub fn tick_length(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.fps as u64)
    }

    /// Spawn interval converted to ticks at the configured rate (90 at defaults).
    pub fn spawn_interval_ticks(&self) -> u64 {
        self.pipe_spawn_interval_ms
            .saturating_mul(self.fps as u64)
            .saturating_add(500)
            / 1000
    }

    /// Inclusive range the top-segment height is drawn from.
    pub fn top_height_range(&self) -> (u16, u16) {
        let max = self.screen_height as i32
            - self.ground_height as i32
            - self.pipe_gap as i32
            - self.pipe_ground_clearance as i32;
        (self.pipe_top_clearance, max.max(0) as u16)
    }

    /// Reject configurations the game cannot be played with.
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: impl Into<String>) -> Result<()> {
            Err(AppError::InvalidConfig(msg.into()))
        }

        if self.screen_width == 0 || self.screen_height == 0 {
            return invalid("screen dimensions must be positive");
        }
        if self.ground_height >= self.screen_height {
            return invalid("ground_height must be less than screen_height");
        }
        if self.pipe_width == 0 || self.pipe_gap == 0 {
            return invalid("pipe_width and pipe_gap must be positive");
        }
        let (min_top, max_top) = self.top_height_range();
        let needed = self.pipe_top_clearance as u32
            + self.pipe_gap as u32
            + self.pipe_ground_clearance as u32
            + self.ground_height as u32;
        if needed > self.screen_height as u32 || min_top > max_top {
            return invalid(format!(
                "pipe gap {} with clearances {}/{} does not fit above the ground",
                self.pipe_gap, self.pipe_top_clearance, self.pipe_ground_clearance
            ));
        }
        if !(1..=MAX_SPAWN_INTERVAL_MS).contains(&self.pipe_spawn_interval_ms) {
            return invalid(format!(
                "pipe_spawn_interval_ms must be between 1 and {}",
                MAX_SPAWN_INTERVAL_MS
            ));
        }
        if !(self.pipe_speed > 0.0) {
            return invalid("pipe_speed must be positive");
        }
        if self.bird_width == 0 || self.bird_height == 0 {
            return invalid("bird dimensions must be positive");
        }
        if self.bird_x < 0.0 || self.bird_x + self.bird_width as f32 > self.screen_width as f32 {
            return invalid("bird must fit horizontally on screen");
        }
        if self.bird_start_y < 0.0 || self.bird_start_y + self.bird_height as f32 >= self.ground_y()
        {
            return invalid("bird must start between the top of the screen and the ground");
        }
        if !(self.gravity > 0.0) {
            return invalid("gravity must be positive");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity must be negative (upward)");
        }
        if self.fps == 0 || self.fps > 1000 {
            return invalid("fps must be between 1 and 1000");
        }
        Ok(())
    }
}

/// Options for an interactive run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub config: GameConfig,
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunOptions),
    Version,
    Help,
}

pub const USAGE: &str = "\
Flappy Biry - terminal side-scroller

Usage: flappy-biry [OPTIONS]

Options:
  --seed N         Seed the pipe generator (default: random)
  --fps N          Simulation/frame rate (default: 60)
  --config FILE    Load tuning overrides from a JSON file
  --log FILE       Write a log file (default: no logging)
  --version, -v    Show version information
  --help, -h       Show this help message";

/// Parse command-line arguments (without the program name).
///
/// `--config` is applied before `--fps`, whatever their order, so the flag
/// always wins over the file.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seed = None;
    let mut fps = None;
    let mut config_path: Option<PathBuf> = None;
    let mut log_path = None;

    let args: Vec<S> = args.into_iter().collect();
    let mut iter = args.iter().map(|s: &S| -> &str { s.as_ref() });
    while let Some(arg) = iter.next() {
        match arg {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--seed" => seed = Some(parse_number::<u64>("--seed", iter.next())?),
            "--fps" => fps = Some(parse_number::<u32>("--fps", iter.next())?),
            "--config" => {
                config_path = Some(PathBuf::from(require_value("--config", iter.next())?));
            }
            "--log" => log_path = Some(PathBuf::from(require_value("--log", iter.next())?)),
            other => return Err(AppError::Usage(format!("Unknown argument: {}", other))),
        }
    }

    let mut config = match config_path {
        Some(path) => GameConfig::load(&path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = fps {
        config.fps = fps;
    }
    config.validate()?;

    Ok(Command::Run(RunOptions {
        config,
        seed,
        log_path,
    }))
}

fn require_value<'a>(flag: &str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| AppError::Usage(format!("{} requires a value", flag)))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&str>) -> Result<T> {
    let value = require_value(flag, value)?;
    value
        .parse()
        .map_err(|_| AppError::Usage(format!("{} requires a number, got '{}'", flag, value)))
}
