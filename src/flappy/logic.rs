//! Flappy Biry game logic: input, physics, collision detection, scoring.

use super::types::{Collision, FlappyGame, Mode};
use rand::Rng;
use std::time::Duration;

/// Largest slice of real time consumed per `tick` call, so a stall doesn't
/// fast-forward the bird into the ground.
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyInput {
    /// Space/Up/Enter: starts a run when idle, jumps while playing.
    Flap,
    /// Any other key; ignored.
    Other,
}

/// What happened during one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    pub spawned_pipe: bool,
    /// Pipes scored this step.
    pub scored: u32,
    pub collision: Option<Collision>,
}

/// What happened during one `tick` call (zero or more steps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    pub steps: u32,
    pub scored: u32,
    pub collision: Option<Collision>,
}

impl TickResult {
    fn absorb(&mut self, step: StepResult) {
        self.steps += 1;
        self.scored += step.scored;
        if step.collision.is_some() {
            self.collision = step.collision;
        }
    }
}

/// Apply one input event immediately.
pub fn process_input(game: &mut FlappyGame, input: FlappyInput) {
    match input {
        FlappyInput::Flap => match game.mode {
            Mode::NotStarted | Mode::GameOver => {
                let restart = game.mode == Mode::GameOver;
                game.start_run();
                if restart {
                    log::info!("run restarted");
                } else {
                    log::info!("run started");
                }
            }
            // Overrides whatever gravity has built up
            Mode::Active => game.bird.velocity = game.config.jump_velocity,
        },
        FlappyInput::Other => {}
    }
}

/// Advance the game by `dt` of real time, in whole fixed-length steps.
///
/// Leftover time carries into the next call. Stops early once the run ends.
/// Does nothing unless a run is active.
pub fn tick<R: Rng>(game: &mut FlappyGame, dt: Duration, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();
    if !game.is_active() {
        return result;
    }

    let step_len = game.config.tick_length();
    game.accumulated_time += dt.min(MAX_FRAME_TIME);

    while game.accumulated_time >= step_len {
        game.accumulated_time -= step_len;
        result.absorb(step(game, rng));

        if !game.is_active() {
            game.accumulated_time = Duration::ZERO;
            break;
        }
    }

    result
}

/// Single physics step. Frozen (returns an empty result) unless active.
pub fn step<R: Rng>(game: &mut FlappyGame, rng: &mut R) -> StepResult {
    let mut result = StepResult::default();
    if !game.is_active() {
        return result;
    }

    game.tick_count += 1;

    // 1. Gravity, then integrate
    let bird = &mut game.bird;
    bird.velocity += game.config.gravity;
    bird.y += bird.velocity;

    // 2. The ceiling stops the bird without hurting it
    if bird.y < 0.0 {
        bird.y = 0.0;
        bird.velocity = 0.0;
    }

    // 3. Spawn on the first tick past the interval
    if game.tick_count - game.last_spawn_tick > game.config.spawn_interval_ticks() {
        game.spawn_pipe(rng);
        game.last_spawn_tick = game.tick_count;
        result.spawned_pipe = true;
        if let Some(pipe) = game.pipes.last() {
            log::debug!(
                "tick {}: pipe spawned (top {}, bottom {})",
                game.tick_count,
                pipe.top_height,
                pipe.bottom_height
            );
        }
    }

    // 4. Scroll left and drop pipes that are fully off screen
    let speed = game.config.pipe_speed;
    for pipe in &mut game.pipes {
        pipe.x -= speed;
    }
    let config = &game.config;
    game.pipes.retain(|p| p.right(config) > 0.0);

    // 5. Collision ends the run
    if let Some(collision) = check_collision(game) {
        game.mode = Mode::GameOver;
        game.crash = Some(collision);
        result.collision = Some(collision);
        log::info!(
            "tick {}: hit {:?}, final score {}",
            game.tick_count,
            collision,
            game.score
        );
    }

    // 6. Score pipes whose right edge is behind the bird
    result.scored = update_score(game);

    result
}

/// Test the bird against the ground and every pipe segment.
pub fn check_collision(game: &FlappyGame) -> Option<Collision> {
    let bird = game.bird.bounds();

    if bird.bottom() >= game.config.ground_y() {
        return Some(Collision::Ground);
    }

    let config = &game.config;
    game.pipes
        .iter()
        .any(|pipe| {
            bird.intersects(&pipe.top_rect(config)) || bird.intersects(&pipe.bottom_rect(config))
        })
        .then_some(Collision::Pipe)
}

/// Mark passed pipes and add them to the score. Returns how many were new.
fn update_score(game: &mut FlappyGame) -> u32 {
    let bird_left = game.bird.bounds().left();
    let width = game.config.pipe_width as f32;
    let mut scored = 0;

    for pipe in &mut game.pipes {
        if !pipe.passed && pipe.x + width < bird_left {
            pipe.passed = true;
            scored += 1;
        }
    }

    game.score += scored;
    scored
}
