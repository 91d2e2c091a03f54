//! The game screen: playfield, status bar and info panel.

use crate::ui::game_common::{
    create_game_layout, info_line, render_info_panel_frame, render_status_bar,
};
use crate::ui::playfield::Playfield;
use flappy_biry::flappy::{self, Collision, FlappyGame, Mode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 22;

/// Render the whole game screen into `area`.
pub fn render_flappy(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let layout = create_game_layout(
        frame,
        area,
        " Flappy Biry ",
        Color::Cyan,
        INFO_PANEL_WIDTH,
    );

    let commands = flappy::frame(game);
    frame.render_widget(
        Playfield::new(
            &commands,
            game.config.screen_width as f32,
            game.config.screen_height as f32,
        ),
        layout.content,
    );

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    match game.mode {
        Mode::NotStarted => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            &[("[Space/Up/Enter]", "Start"), ("[Esc/q]", "Quit")],
        ),
        Mode::Active => render_status_bar(
            frame,
            area,
            &format!("Score: {}", game.score),
            Color::Green,
            &[("[Space/Up/Enter]", "Flap"), ("[Esc/q]", "Quit")],
        ),
        Mode::GameOver => render_status_bar(
            frame,
            area,
            &crash_message(game),
            Color::Red,
            &[("[Space/Up/Enter]", "Restart"), ("[Esc/q]", "Quit")],
        ),
    }
}

fn crash_message(game: &FlappyGame) -> String {
    let what = match game.crash {
        Some(Collision::Ground) => "hit the ground",
        Some(Collision::Pipe) => "hit a pipe",
        None => "crashed",
    };
    let plural = if game.score == 1 { "" } else { "s" };
    format!("You {} after {} pipe{}.", what, game.score, plural)
}

fn mode_label(mode: Mode) -> (&'static str, Color) {
    match mode {
        Mode::NotStarted => ("Ready", Color::Yellow),
        Mode::Active => ("Flying", Color::Green),
        Mode::GameOver => ("Crashed", Color::Red),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (label, color) = mode_label(game.mode);
    let seconds = game.tick_count as f64 / game.config.fps as f64;

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        info_line("Score", game.score.to_string(), Color::White),
        info_line("Pipes", game.pipes.len().to_string(), Color::Green),
        info_line("Time", format!("{:.1}s", seconds), Color::Cyan),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flappy_biry::GameConfig;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(game: &FlappyGame) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_flappy(frame, area, game);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_start_screen_status() {
        let game = FlappyGame::new(GameConfig::default());
        let text = screen_text(&render(&game));
        assert!(text.contains("Flappy Biry"));
        assert!(text.contains("Press Space to start!"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_active_status_shows_score() {
        let mut game = FlappyGame::new(GameConfig::default());
        game.start_run();
        game.score = 7;
        let text = screen_text(&render(&game));
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Flying"));
    }

    #[test]
    fn test_game_over_status_names_cause() {
        let mut game = FlappyGame::new(GameConfig::default());
        game.mode = Mode::GameOver;
        game.crash = Some(Collision::Pipe);
        game.score = 1;
        let text = screen_text(&render(&game));
        assert!(text.contains("You hit a pipe after 1 pipe."));
        assert!(text.contains("Restart"));
    }

    #[test]
    fn test_crash_message_plural() {
        let mut game = FlappyGame::new(GameConfig::default());
        game.crash = Some(Collision::Ground);
        game.score = 3;
        assert_eq!(crash_message(&game), "You hit the ground after 3 pipes.");
    }
}
