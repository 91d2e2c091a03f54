//! Terminal rendering.

pub mod flappy_scene;
pub mod game_common;
pub mod playfield;

use flappy_biry::FlappyGame;
use ratatui::Frame;

/// Draw one frame of the game into the whole terminal.
pub fn draw_ui(frame: &mut Frame, game: &FlappyGame) {
    let area = frame.size();
    flappy_scene::render_flappy(frame, area, game);
}
