//! The search loop: selection, expansion, playout, backpropagation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use tengen_go::{Board, Color, Move, Point};

use crate::arena::Arena;
use crate::config::{MctsConfig, SelectionPolicy};
use crate::node::{Node, NodeId};
use crate::playout::{play_heuristic_move, PlayoutBuffers};

#[derive(Debug, Error)]
pub enum MctsError {
    #[error("invalid config: {msg}")]
    InvalidConfig { msg: &'static str },
}

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    pub node_count: usize,
    pub expansions: u32,
    pub playouts: u32,
    pub playout_moves: u64,
}

/// All-moves-as-first map: for every vertex, the first color that occupied
/// it during this iteration's descent or playout. Zeroed per iteration.
struct AmafMap {
    cells: Vec<Point>,
}

impl AmafMap {
    fn new() -> Self {
        Self { cells: Vec::new() }
    }

    fn reset(&mut self, grid_len: usize) {
        self.cells.clear();
        self.cells.resize(grid_len, Point::Empty);
    }

    fn record(&mut self, m: Move, mover: Color) {
        if m.is_pass() {
            return;
        }
        let v = m.vertex();
        if self.cells[v] == Point::Empty {
            self.cells[v] = mover.to_point();
        }
    }

    fn matches(&self, m: Move, c: Color) -> bool {
        !m.is_pass() && self.cells[m.vertex()] == c.to_point()
    }
}

/// Single-threaded Monte Carlo Tree Search over a Go position.
///
/// One instance owns its arena, RNG, and scratch buffers; independent
/// searches run in parallel only by constructing independent instances.
pub struct Mcts {
    cfg: MctsConfig,
    arena: Arena,
    rng: ChaCha8Rng,
    amaf: AmafMap,
    move_buf: Vec<Move>,
    playout_bufs: PlayoutBuffers,
    stats: SearchStats,
}

impl Mcts {
    pub fn new(cfg: MctsConfig) -> Result<Self, MctsError> {
        match cfg.selection {
            SelectionPolicy::Rave { rave_equiv } => {
                if !(rave_equiv.is_finite() && rave_equiv > 0.0) {
                    return Err(MctsError::InvalidConfig {
                        msg: "rave_equiv must be finite and > 0",
                    });
                }
            }
            SelectionPolicy::Ucb1 { exploration } => {
                if !(exploration.is_finite() && exploration > 0.0) {
                    return Err(MctsError::InvalidConfig {
                        msg: "exploration must be finite and > 0",
                    });
                }
            }
        }
        let ko = cfg.playout.ko_prob;
        if !(ko.is_finite() && (0.0..=1.0).contains(&ko)) {
            return Err(MctsError::InvalidConfig {
                msg: "ko_prob must be in [0, 1]",
            });
        }
        let cap = cfg.playout.capture_prob;
        if !(cap.is_finite() && (0.0..=1.0).contains(&cap)) {
            return Err(MctsError::InvalidConfig {
                msg: "capture_prob must be in [0, 1]",
            });
        }

        Ok(Self {
            cfg,
            arena: Arena::new(),
            rng: ChaCha8Rng::seed_from_u64(cfg.seed),
            amaf: AmafMap::new(),
            move_buf: Vec::new(),
            playout_bufs: PlayoutBuffers::new(),
            stats: SearchStats::default(),
        })
    }

    /// Stats from the most recent `search` call.
    pub fn last_stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Run `iters` iterations from `pos` and return the most-visited root
    /// move (Pass when the root never grows children).
    ///
    /// The board is taken by value: the search mutates it during descent
    /// and playouts and rolls it back to the root state between iterations.
    pub fn search(&mut self, mut pos: Board, iters: u32) -> Move {
        self.arena.clear();
        self.stats = SearchStats::default();
        let root = self
            .arena
            .push(Node::new(Move::PASS, None, pos.to_play().opp()));
        let root_ply = pos.ply_count();
        let use_rave = matches!(self.cfg.selection, SelectionPolicy::Rave { .. });

        for _ in 0..iters {
            if use_rave {
                self.amaf.reset(pos.grid_len());
            }

            // Selection: walk toward a leaf, playing child moves as we go.
            // Pseudo-legal children can still be suicides; a rejection
            // leaves the position untouched and the walk continues.
            let mut cur = root;
            while !self.arena.get(cur).children.is_empty() {
                let child = self.select_child(cur);
                let (mv, just_played) = {
                    let c = self.arena.get(child);
                    (c.mv, c.just_played)
                };
                let _ = pos.play(mv);
                if use_rave {
                    self.amaf.record(mv, just_played);
                }
                cur = child;
            }

            // Expansion, then step into the first child so every expansion
            // contributes one playout from an unexplored edge.
            if !self.arena.get(cur).is_expanded {
                self.expand(cur, &pos);
                if let Some(&first) = self.arena.get(cur).children.first() {
                    let (mv, just_played) = {
                        let c = self.arena.get(first);
                        (c.mv, c.just_played)
                    };
                    let _ = pos.play(mv);
                    if use_rave {
                        self.amaf.record(mv, just_played);
                    }
                    cur = first;
                }
            }

            let score = self.playout(&mut pos, use_rave);
            self.backprop(cur, score, use_rave);

            let plies = pos.ply_count() - root_ply;
            pos.undo(plies);
        }
        self.stats.node_count = self.arena.len();

        // Most-visited root child; ties broken by the first encountered.
        let mut best: Option<(NodeId, u32)> = None;
        for i in 0..self.arena.get(root).children.len() {
            let cid = self.arena.get(root).children[i];
            let v = self.arena.get(cid).v;
            match best {
                Some((_, best_v)) if v <= best_v => {}
                _ => best = Some((cid, v)),
            }
        }
        match best {
            Some((cid, _)) => self.arena.get(cid).mv,
            None => Move::PASS,
        }
    }

    /// Child with the highest selection score; ties go to the first.
    fn select_child(&self, parent: NodeId) -> NodeId {
        let p = self.arena.get(parent);
        let mut best = p.children[0];
        let mut best_score = f64::NEG_INFINITY;

        for &cid in &p.children {
            let c = self.arena.get(cid);
            let score = match self.cfg.selection {
                SelectionPolicy::Rave { rave_equiv } => {
                    let v = f64::from(c.v + c.pv);
                    let w = f64::from(c.w + c.pw);
                    let expectation = w / v;
                    if c.av == 0 {
                        expectation
                    } else {
                        let av = f64::from(c.av);
                        let beta = av / (av + v + v * av / rave_equiv);
                        beta * (f64::from(c.aw) / av) + (1.0 - beta) * expectation
                    }
                }
                SelectionPolicy::Ucb1 { exploration } => {
                    if c.v == 0 {
                        f64::INFINITY
                    } else {
                        let v = f64::from(c.v);
                        let exploitation = f64::from(c.w) / v;
                        exploitation + exploration * ((f64::from(p.v) + 1.0).ln() / v).sqrt()
                    }
                }
            };
            if score > best_score {
                best_score = score;
                best = cid;
            }
        }
        best
    }

    /// Append one child per pseudo-legal move of the position at `leaf`.
    fn expand(&mut self, leaf: NodeId, pos: &Board) {
        let mover = pos.to_play();
        pos.gen_pseudo_legal_moves(&mut self.move_buf);
        for i in 0..self.move_buf.len() {
            let m = self.move_buf[i];
            let id = self.arena.push(Node::new(m, Some(leaf), mover));
            self.arena.get_mut(leaf).children.push(id);
        }
        self.arena.get_mut(leaf).is_expanded = true;
        self.stats.expansions += 1;
    }

    /// Roll out to two consecutive passes or the move bound; the returned
    /// score is from the viewpoint of the side to move at rollout start.
    fn playout(&mut self, pos: &mut Board, use_rave: bool) -> f32 {
        let perspective = pos.to_play();
        let max_moves = 3 * pos.size() * pos.size();
        let mut passes = 0;
        let mut moves = 0;
        while passes < 2 && moves < max_moves {
            let mover = pos.to_play();
            let m = play_heuristic_move(pos, &self.cfg.playout, &mut self.rng, &mut self.playout_bufs);
            if m.is_pass() {
                passes += 1;
            } else {
                passes = 0;
                if use_rave {
                    self.amaf.record(m, mover);
                }
            }
            moves += 1;
            self.stats.playout_moves += 1;
        }
        self.stats.playouts += 1;
        pos.evaluate(perspective)
    }

    /// Walk the parent chain: a negative score at a node is a loss for the
    /// side about to play there, hence a win for the move stored at the
    /// node. The sign flips each level. With RAVE active, siblings seen in
    /// the AMAF map under the matching color absorb the same outcome.
    fn backprop(&mut self, leaf: NodeId, score: f32, use_rave: bool) {
        let mut cur = Some(leaf);
        let mut s = score;
        while let Some(id) = cur {
            {
                let n = self.arena.get_mut(id);
                n.v += 1;
                if s < 0.0 {
                    n.w += 1;
                }
            }
            if use_rave {
                for i in 0..self.arena.get(id).children.len() {
                    let cid = self.arena.get(id).children[i];
                    let (cmv, cjust) = {
                        let c = self.arena.get(cid);
                        (c.mv, c.just_played)
                    };
                    if self.amaf.matches(cmv, cjust) {
                        let c = self.arena.get_mut(cid);
                        c.av += 1;
                        if s > 0.0 {
                            c.aw += 1;
                        }
                    }
                }
            }
            s = -s;
            cur = self.arena.get(id).parent;
        }
    }
}
