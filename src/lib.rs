//! Flappy Biry - terminal side-scroller.
//!
//! The library holds the UI-agnostic game core plus the configuration,
//! error and logging plumbing shared with the binary and the tests.

pub mod build_info;
pub mod config;
pub mod error;
pub mod flappy;
pub mod logging;

pub use config::GameConfig;
pub use error::AppError;
pub use flappy::{FlappyGame, FlappyInput, Mode};
