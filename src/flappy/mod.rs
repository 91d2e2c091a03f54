//! Flappy Biry: the bird, the pipes and the fixed-step update.
//!
//! The player keeps a bird aloft by flapping through gaps in pipes that
//! scroll in from the right. Gravity pulls the bird down each tick, and
//! hitting a pipe or the ground ends the run.

pub mod draw;
pub mod logic;
pub mod types;

pub use draw::*;
pub use logic::*;
pub use types::*;
