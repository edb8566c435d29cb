//! Shared fixtures for the criterion benches.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tengen_go::{Board, Move};

/// Deterministic mid-game position: `plies` pseudo-legal moves played from
/// an empty board under a fixed seed.
pub fn midgame_position(size: usize, plies: usize, seed: u64) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::new(size, 6.5);
    let mut buf = Vec::new();
    for _ in 0..plies {
        board.gen_pseudo_legal_moves(&mut buf);
        buf.shuffle(&mut rng);
        let mut moved = false;
        for i in 0..buf.len() {
            if board.play(buf[i]).is_ok() {
                moved = true;
                break;
            }
        }
        if !moved {
            let _ = board.play(Move::PASS);
        }
    }
    board
}
