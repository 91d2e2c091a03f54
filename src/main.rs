mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_biry::build_info;
use flappy_biry::config::{self, Command, RunOptions, USAGE};
use flappy_biry::error::{AppError, Result};
use flappy_biry::flappy::{self, FlappyGame};
use flappy_biry::logging;
use input::KeyAction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Instant;

fn main() {
    let options = match config::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return;
        }
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return;
        }
        Err(AppError::Usage(msg)) => {
            eprintln!("{}", msg);
            eprintln!("Run 'flappy-biry --help' for usage.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(options: RunOptions) -> Result<()> {
    if let Some(path) = &options.log_path {
        logging::init_file_logger(path)?;
    }
    log::info!("config: {:?}", options.config);

    let mut rng = match options.seed {
        Some(seed) => {
            log::info!("pipe seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let game = FlappyGame::new(options.config);
    let outcome = game_loop(&mut terminal, game, &mut rng);

    // Restore the terminal even if the loop failed
    let restored = restore_terminal(&mut terminal);
    outcome?;
    restored?;
    log::info!("shut down cleanly");
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Draw, collect input until the next frame is due, advance the game.
fn game_loop<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    mut game: FlappyGame,
    rng: &mut R,
) -> Result<()> {
    let frame_len = game.config.tick_length();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &game))?;

        let deadline = last_frame + frame_len;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                match input::map_key(key) {
                    Some(KeyAction::Quit) => {
                        log::info!("quit requested (score {})", game.score);
                        return Ok(());
                    }
                    Some(KeyAction::Game(action)) => flappy::process_input(&mut game, action),
                    None => {}
                }
            }
        }

        let now = Instant::now();
        let result = flappy::tick(&mut game, now - last_frame, rng);
        if result.scored > 0 {
            log::debug!("score {} (+{})", game.score, result.scored);
        }
        if result.collision.is_some() {
            log::info!("game over after {} steps", game.tick_count);
        }
        last_frame = now;
    }
}
