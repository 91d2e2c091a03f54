//! Rasterizes draw commands into terminal cells.
//!
//! Each cell shows two vertically stacked pixels with the upper half-block
//! glyph: the foreground colour is the upper pixel, the background colour
//! the lower one. A cell is roughly twice as tall as it is wide, so the two
//! halves come out close to square.

use flappy_biry::flappy::{DrawCommand, Rgb, TextSize};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

const HALF_BLOCK: char = '▀';

/// Widget drawing one frame's commands, scaled to fit its area.
pub struct Playfield<'a> {
    commands: &'a [DrawCommand],
    world_width: f32,
    world_height: f32,
}

impl<'a> Playfield<'a> {
    pub fn new(commands: &'a [DrawCommand], world_width: f32, world_height: f32) -> Self {
        Self {
            commands,
            world_width,
            world_height,
        }
    }

    /// Topmost fill colour at a world point.
    fn color_at(&self, x: f32, y: f32) -> Option<Rgb> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Fill { rect, color } if rect.contains_point(x, y) => Some(*color),
            _ => None,
        })
    }
}

/// Largest centred rect in `area` that keeps the world's aspect ratio.
pub fn fit_area(area: Rect, world_width: f32, world_height: f32) -> Rect {
    if area.width == 0 || area.height == 0 || world_width <= 0.0 || world_height <= 0.0 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    // Columns per row, counting two pixels per row
    let cols_per_row = 2.0 * world_width / world_height;

    let mut rows = area.height;
    let mut cols = (rows as f32 * cols_per_row).round() as u16;
    if cols > area.width {
        cols = area.width;
        rows = ((cols as f32 / cols_per_row).round() as u16).clamp(1, area.height);
    }
    let cols = cols.clamp(1, area.width);

    Rect::new(
        area.x + (area.width - cols) / 2,
        area.y + (area.height - rows) / 2,
        cols,
        rows,
    )
}

fn to_color(rgb: Option<Rgb>) -> Color {
    match rgb {
        Some(Rgb(r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Reset,
    }
}

impl Widget for Playfield<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let field = fit_area(area, self.world_width, self.world_height);
        if field.width == 0 || field.height == 0 {
            return;
        }

        // World units per pixel
        let px_w = self.world_width / field.width as f32;
        let px_h = self.world_height / (field.height as f32 * 2.0);

        for row in 0..field.height {
            let upper_y = (row as f32 * 2.0 + 0.5) * px_h;
            let lower_y = (row as f32 * 2.0 + 1.5) * px_h;
            for col in 0..field.width {
                let x = (col as f32 + 0.5) * px_w;
                buf.get_mut(field.x + col, field.y + row)
                    .set_char(HALF_BLOCK)
                    .set_fg(to_color(self.color_at(x, upper_y)))
                    .set_bg(to_color(self.color_at(x, lower_y)));
            }
        }

        for command in self.commands {
            let DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
            } = command
            else {
                continue;
            };

            let len = text.chars().count().min(field.width as usize) as u16;
            let center_col = (x / px_w) as i32;
            let row = ((y / (px_h * 2.0)) as u16).min(field.height - 1);
            let start = (center_col - len as i32 / 2).clamp(0, (field.width - len) as i32) as u16;

            let mut style = Style::default().fg(to_color(Some(*color)));
            if *size == TextSize::Large {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf.set_stringn(
                field.x + start,
                field.y + row,
                text,
                len as usize,
                style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flappy_biry::flappy::{self, FlappyGame, GROUND};
    use flappy_biry::GameConfig;

    fn render_game(game: &FlappyGame, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let commands = flappy::frame(game);
        Playfield::new(
            &commands,
            game.config.screen_width as f32,
            game.config.screen_height as f32,
        )
        .render(area, &mut buf);
        buf
    }

    #[test]
    fn test_fit_area_keeps_aspect() {
        // 600x800 world: 1.5 columns per row
        let fit = |w, h| fit_area(Rect::new(0, 0, w, h), 600.0, 800.0);
        assert_eq!(fit(30, 20), Rect::new(0, 0, 30, 20));
        assert_eq!(fit(100, 20), Rect::new(35, 0, 30, 20));
        assert_eq!(fit(15, 40), Rect::new(0, 15, 15, 10));
    }

    #[test]
    fn test_fit_area_empty() {
        let r = fit_area(Rect::new(3, 4, 0, 10), 600.0, 800.0);
        assert_eq!(r.width, 0);
    }

    #[test]
    fn test_ground_rows_are_ground_colored() {
        let game = FlappyGame::new(GameConfig::default());
        let buf = render_game(&game, 30, 20);
        let Rgb(r, g, b) = GROUND;
        let cell = buf.get(0, 19);
        assert_eq!(cell.fg, Color::Rgb(r, g, b));
        assert_eq!(cell.bg, Color::Rgb(r, g, b));
        // Sky above
        assert_eq!(buf.get(0, 0).fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_title_text_centered() {
        let game = FlappyGame::new(GameConfig::default());
        let buf = render_game(&game, 30, 20);
        // "Flappy Biry" centred on (300, 350): column 15, row 8
        let row: String = (10..21).map(|x| buf.get(x, 8).symbol().to_string()).collect();
        assert_eq!(row, "Flappy Biry");
        assert!(buf.get(10, 8).modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_long_text_is_clipped() {
        let game = FlappyGame::new(GameConfig::default());
        // 6x4 field, 100 world units per column and per pixel row
        let buf = render_game(&game, 6, 4);
        let row = |y: u16| -> String {
            (0..6).map(|x| buf.get(x, y).symbol().to_string()).collect()
        };
        // Title (y 350) on row 1, prompt (y 420) on row 2, each cut to the field
        assert_eq!(row(1), "Flappy");
        assert_eq!(row(2), "Press ");
        assert!(buf.get(0, 1).modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_bird_is_drawn_when_active() {
        let mut game = FlappyGame::new(GameConfig::default());
        game.start_run();
        let buf = render_game(&game, 60, 40);
        // Bird spans x 100..140, y 400..430: 10 units per column/pixel
        let blue = Color::Rgb(0, 0, 255);
        assert_eq!(buf.get(11, 20).fg, blue);
    }
}
