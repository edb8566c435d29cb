//! tengen-go: Go rules, board state, move generation, and area scoring.
//!
//! The board is the single place that mutates position state via rules:
//! stone placement with capture resolution, simple-ko enforcement, suicide
//! rejection, and exact undo through a per-board capture pool.

pub mod board;
pub mod eyes;
pub mod render;
pub mod scoring;
pub mod types;

pub use board::{Board, MoveError, Undo};
pub use types::{Color, Move, Point};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod eyes_tests;
