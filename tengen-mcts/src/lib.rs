//! Monte Carlo Tree Search for Go.
//!
//! The design uses:
//! - Arena-backed node storage addressed by `NodeId`
//! - Heuristic random playouts (`tengen-go` pseudo-legal moves plus ko and
//!   capture move sources)
//! - A configurable selection score: RAVE blending by default, plain UCB1
//!   as the baseline alternative

pub mod arena;
pub mod config;
pub mod mcts;
pub mod node;
pub mod playout;

pub use config::{Config, ConfigError, GameConfig, MctsConfig, PlayoutConfig, SelectionPolicy};
pub use mcts::{Mcts, MctsError, SearchStats};
pub use playout::{gen_playout_moves_capture, gen_playout_moves_ko, play_heuristic_move, PlayoutBuffers};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
