//! Heuristic rollout policy.
//!
//! Three move sources are probed in order: the stale-ko recapture, capture
//! moves in the vicinity of the last two stones, then all pseudo-legal
//! moves. Each source's candidates are shuffled and tried until the board
//! accepts one; a source that yields nothing playable falls through to the
//! next, and a position with no playable move at all passes.

use rand::seq::SliceRandom;
use rand::Rng;
use tengen_go::{Board, Move};

use crate::config::PlayoutConfig;

/// Reusable candidate storage so rollouts never allocate per move.
pub struct PlayoutBuffers {
    candidates: Vec<Move>,
}

impl PlayoutBuffers {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl Default for PlayoutBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill `out` with the ko-recapture candidate, if the ko went stale within
/// the last four plies. The candidate may still be illegal; `play` filters.
pub fn gen_playout_moves_ko(board: &Board, out: &mut Vec<Move>) {
    out.clear();
    if board.ko_point() < 0 {
        return;
    }
    let age_gap = board.ply_count() as i64 - i64::from(board.ko_age());
    if (1..=4).contains(&age_gap) {
        out.push(Move::new(board.ko_point() as usize));
    }
}

/// Fill `out` with capturing moves in the 8-neighbourhood of the last two
/// stones played.
pub fn gen_playout_moves_capture(board: &Board, out: &mut Vec<Move>) {
    board.last_moves_neigh(out);
    out.retain(|&m| board.is_capture(m));
}

/// Shuffle the candidates and play the first one the board accepts.
fn try_shuffled<R: Rng>(board: &mut Board, candidates: &mut [Move], rng: &mut R) -> Option<Move> {
    candidates.shuffle(rng);
    for &m in candidates.iter() {
        if board.play(m).is_ok() {
            return Some(m);
        }
    }
    None
}

/// Pick and apply one rollout move for the side to move; returns the move
/// actually played (possibly Pass).
pub fn play_heuristic_move<R: Rng>(
    board: &mut Board,
    cfg: &PlayoutConfig,
    rng: &mut R,
    bufs: &mut PlayoutBuffers,
) -> Move {
    if rng.gen::<f64>() < cfg.ko_prob {
        gen_playout_moves_ko(board, &mut bufs.candidates);
        if let Some(m) = try_shuffled(board, &mut bufs.candidates, rng) {
            return m;
        }
    }

    if rng.gen::<f64>() < cfg.capture_prob {
        gen_playout_moves_capture(board, &mut bufs.candidates);
        if let Some(m) = try_shuffled(board, &mut bufs.candidates, rng) {
            return m;
        }
    }

    board.gen_pseudo_legal_moves(&mut bufs.candidates);
    if let Some(m) = try_shuffled(board, &mut bufs.candidates, rng) {
        return m;
    }

    let _ = board.play(Move::PASS);
    Move::PASS
}
