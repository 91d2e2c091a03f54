//! Frame description: turns game state into a flat list of draw commands.
//!
//! Commands are in world coordinates and in paint order; a renderer draws
//! them front to back without knowing anything about the game.

use super::types::{Aabb, FlappyGame, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(255, 255, 255);
pub const TEXT: Rgb = Rgb(0, 0, 0);
pub const GROUND: Rgb = Rgb(100, 200, 50);
pub const PIPE: Rgb = Rgb(0, 255, 0);
pub const BIRD: Rgb = Rgb(0, 0, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Large,
    Small,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Aabb,
        color: Rgb,
    },
    /// Text centred on (x, y).
    Text {
        text: String,
        x: f32,
        y: f32,
        size: TextSize,
        color: Rgb,
    },
}

impl DrawCommand {
    fn fill(rect: Aabb, color: Rgb) -> Self {
        DrawCommand::Fill { rect, color }
    }

    fn text(text: impl Into<String>, x: f32, y: f32, size: TextSize) -> Self {
        DrawCommand::Text {
            text: text.into(),
            x,
            y,
            size,
            color: TEXT,
        }
    }
}

/// Build the draw commands for the current frame.
pub fn frame(game: &FlappyGame) -> Vec<DrawCommand> {
    let c = &game.config;
    let width = c.screen_width as f32;
    let height = c.screen_height as f32;
    let mid_x = width / 2.0;
    let mid_y = height / 2.0;

    let mut commands = vec![
        DrawCommand::fill(Aabb::new(0.0, 0.0, width, height), BACKGROUND),
        DrawCommand::fill(
            Aabb::new(0.0, c.ground_y(), width, c.ground_height as f32),
            GROUND,
        ),
    ];

    match game.mode {
        Mode::Active => {
            for pipe in &game.pipes {
                commands.push(DrawCommand::fill(pipe.top_rect(c), PIPE));
                commands.push(DrawCommand::fill(pipe.bottom_rect(c), PIPE));
            }
            commands.push(DrawCommand::fill(game.bird.bounds(), BIRD));
            commands.push(DrawCommand::text(
                game.score.to_string(),
                mid_x,
                50.0,
                TextSize::Large,
            ));
        }
        Mode::GameOver => {
            commands.push(DrawCommand::text(
                "GAME OVER",
                mid_x,
                mid_y - 50.0,
                TextSize::Large,
            ));
            commands.push(DrawCommand::text(
                format!("Score: {}", game.score),
                mid_x,
                mid_y + 10.0,
                TextSize::Small,
            ));
            commands.push(DrawCommand::text(
                "Press SPACE to Restart",
                mid_x,
                mid_y + 70.0,
                TextSize::Small,
            ));
        }
        Mode::NotStarted => {
            commands.push(DrawCommand::text(
                "Flappy Biry",
                mid_x,
                mid_y - 50.0,
                TextSize::Large,
            ));
            commands.push(DrawCommand::text(
                "Press SPACE to Start",
                mid_x,
                mid_y + 20.0,
                TextSize::Small,
            ));
            commands.push(DrawCommand::fill(game.bird.bounds(), BIRD));
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::super::types::PipePair;
    use super::*;
    use crate::config::GameConfig;

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn fills_of(commands: &[DrawCommand], wanted: Rgb) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == wanted))
            .count()
    }

    #[test]
    fn test_background_and_ground_first() {
        let game = FlappyGame::new(GameConfig::default());
        let commands = frame(&game);
        assert_eq!(
            commands[0],
            DrawCommand::Fill {
                rect: Aabb::new(0.0, 0.0, 600.0, 800.0),
                color: BACKGROUND
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::Fill {
                rect: Aabb::new(0.0, 700.0, 600.0, 100.0),
                color: GROUND
            }
        );
    }

    #[test]
    fn test_start_screen() {
        let game = FlappyGame::new(GameConfig::default());
        let commands = frame(&game);
        assert_eq!(
            texts(&commands),
            vec!["Flappy Biry", "Press SPACE to Start"]
        );
        assert_eq!(fills_of(&commands, BIRD), 1);
        assert_eq!(fills_of(&commands, PIPE), 0);
    }

    #[test]
    fn test_active_frame_draws_pipes_bird_score() {
        let mut game = FlappyGame::new(GameConfig::default());
        game.start_run();
        game.score = 4;
        for x in [200.0, 450.0] {
            game.pipes.push(PipePair {
                x,
                top_height: 150,
                bottom_height: 350,
                passed: false,
            });
        }

        let commands = frame(&game);
        assert_eq!(fills_of(&commands, PIPE), 4);
        assert_eq!(fills_of(&commands, BIRD), 1);
        assert_eq!(texts(&commands), vec!["4"]);

        // Bird is painted over the pipes
        let bird_idx = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == BIRD))
            .unwrap();
        let last_pipe_idx = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == PIPE))
            .unwrap();
        assert!(bird_idx > last_pipe_idx);
    }

    #[test]
    fn test_game_over_screen() {
        let mut game = FlappyGame::new(GameConfig::default());
        game.mode = Mode::GameOver;
        game.score = 0;
        game.pipes.push(PipePair {
            x: 200.0,
            top_height: 150,
            bottom_height: 350,
            passed: false,
        });

        let commands = frame(&game);
        assert_eq!(
            texts(&commands),
            vec!["GAME OVER", "Score: 0", "Press SPACE to Restart"]
        );
        assert_eq!(fills_of(&commands, PIPE), 0);
        assert_eq!(fills_of(&commands, BIRD), 0);

        match &commands[2] {
            DrawCommand::Text { x, y, size, .. } => {
                assert!((x - 300.0).abs() < f32::EPSILON);
                assert!((y - 350.0).abs() < f32::EPSILON);
                assert_eq!(*size, TextSize::Large);
            }
            other => panic!("expected title text, got {:?}", other),
        }
    }
}
