//! Board state and rule-enforced move execution.
//!
//! The board is a dense `stride x stride` grid with a one-cell `Wall` ring,
//! so neighbour loops never bounds-check. Captures are logged into a single
//! append-only pool addressed by per-move ranges, which makes `undo` a pop
//! with no allocation.

use std::cell::RefCell;

use thiserror::Error;

use crate::types::{Color, Move, Point};

/// Why a move was rejected. State is untouched on rejection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("point is occupied")]
    Occupied,
    #[error("move retakes the ko")]
    Ko,
    #[error("move is suicide")]
    Suicide,
}

/// Reversal record for one accepted move.
///
/// `cap_begin..cap_begin + cap_count` addresses this move's captures in the
/// board's capture pool, in removal order.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    pub mv: Move,
    pub played: Color,
    pub prev_ko: i32,
    pub prev_ko_age: u32,
    pub cap_begin: usize,
    pub cap_count: usize,
}

/// Flood-fill scratch shared by liberty, scoring, and capture queries.
///
/// Bumping `mark_id` invalidates every previous mark in O(1). Held in a
/// `RefCell` so observers stay `&self`; this is observer state, not position
/// state, and it is exactly why `Board` must not be shared across threads.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    pub(crate) mark: Vec<u32>,
    pub(crate) mark_id: u32,
    pub(crate) stack: Vec<usize>,
}

/// A Go position: grid, side to move, ko state, and the undo log.
#[derive(Clone)]
pub struct Board {
    pub(crate) n: usize,
    pub(crate) stride: usize,
    pub(crate) cells: Vec<Point>,
    pub(crate) komi: f32,
    pub(crate) to_play: Color,
    pub(crate) history: Vec<Undo>,
    pub(crate) capture_pool: Vec<u32>,
    pub(crate) ko_point: i32,
    pub(crate) ko_age: u32,
    pub(crate) scratch: RefCell<Scratch>,
}

impl Board {
    /// An empty `n x n` board, Black to move.
    pub fn new(n: usize, komi: f32) -> Board {
        assert!((2..=25).contains(&n), "board size must be in 2..=25");
        let stride = n + 2;
        let mut cells = vec![Point::Wall; stride * stride];
        for y in 0..n {
            for x in 0..n {
                cells[(y + 1) * stride + (x + 1)] = Point::Empty;
            }
        }
        let grid_len = cells.len();
        Board {
            n,
            stride,
            cells,
            komi,
            to_play: Color::Black,
            history: Vec::new(),
            capture_pool: Vec::new(),
            ko_point: -1,
            ko_age: 0,
            scratch: RefCell::new(Scratch {
                mark: vec![0; grid_len],
                mark_id: 0,
                stack: Vec::new(),
            }),
        }
    }

    // ---- introspection ----

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn komi(&self) -> f32 {
        self.komi
    }

    #[inline]
    pub fn to_play(&self) -> Color {
        self.to_play
    }

    /// Number of accepted moves (passes included).
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn ko_point(&self) -> i32 {
        self.ko_point
    }

    #[inline]
    pub fn ko_age(&self) -> u32 {
        self.ko_age
    }

    /// Total cell count of the bordered grid.
    #[inline]
    pub fn grid_len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn history(&self) -> &[Undo] {
        &self.history
    }

    #[inline]
    pub fn last_undo(&self) -> Option<&Undo> {
        self.history.last()
    }

    #[inline]
    pub fn capture_pool(&self) -> &[u32] {
        &self.capture_pool
    }

    // ---- coordinates ----

    /// Linear vertex for play-area coordinates in `0..n`.
    #[inline]
    pub fn vertex(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.n && y < self.n);
        (y + 1) * self.stride + (x + 1)
    }

    #[inline]
    pub fn at(&self, v: usize) -> Point {
        self.cells[v]
    }

    #[inline]
    pub fn at_xy(&self, x: usize, y: usize) -> Point {
        self.cells[self.vertex(x, y)]
    }

    // ---- neighbours ----

    /// Orthogonal neighbours. Always valid cells thanks to the wall ring.
    #[inline]
    pub fn neigh4(&self, v: usize) -> [usize; 4] {
        [v - 1, v + 1, v - self.stride, v + self.stride]
    }

    /// Diagonal neighbours.
    #[inline]
    pub fn diag_neigh(&self, v: usize) -> [usize; 4] {
        [
            v - self.stride - 1,
            v - self.stride + 1,
            v + self.stride - 1,
            v + self.stride + 1,
        ]
    }

    /// Orthogonal plus diagonal neighbours.
    #[inline]
    pub fn neigh8(&self, v: usize) -> [usize; 8] {
        [
            v - 1,
            v + 1,
            v - self.stride,
            v + self.stride,
            v - self.stride - 1,
            v - self.stride + 1,
            v + self.stride - 1,
            v + self.stride + 1,
        ]
    }

    // ---- liberty queries ----

    /// Whether the group containing the stone at `v` has any liberty.
    /// Early-exits on the first empty neighbour found.
    pub fn has_liberty(&self, v: usize) -> bool {
        let mut sc = self.scratch.borrow_mut();
        let sc = &mut *sc;
        sc.mark_id += 1;
        let id = sc.mark_id;
        sc.stack.clear();
        let color = self.cells[v];
        debug_assert!(color.is_stone());
        sc.mark[v] = id;
        sc.stack.push(v);
        while let Some(cur) = sc.stack.pop() {
            for nb in self.neigh4(cur) {
                match self.cells[nb] {
                    Point::Empty => return true,
                    p if p == color => {
                        if sc.mark[nb] != id {
                            sc.mark[nb] = id;
                            sc.stack.push(nb);
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }

    /// Exact liberty count (distinct empty neighbours) of the group at `v`.
    ///
    /// One mark id serves both the group walk and the liberty set: group
    /// cells are stones, liberties are empties, so the marks never collide.
    pub fn count_liberties(&self, v: usize) -> usize {
        let mut sc = self.scratch.borrow_mut();
        let sc = &mut *sc;
        sc.mark_id += 1;
        let id = sc.mark_id;
        sc.stack.clear();
        let color = self.cells[v];
        debug_assert!(color.is_stone());
        sc.mark[v] = id;
        sc.stack.push(v);
        let mut liberties = 0;
        while let Some(cur) = sc.stack.pop() {
            for nb in self.neigh4(cur) {
                if sc.mark[nb] == id {
                    continue;
                }
                match self.cells[nb] {
                    Point::Empty => {
                        sc.mark[nb] = id;
                        liberties += 1;
                    }
                    p if p == color => {
                        sc.mark[nb] = id;
                        sc.stack.push(nb);
                    }
                    _ => {}
                }
            }
        }
        liberties
    }

    /// Remove the group at `v`, logging every vertex into the capture pool.
    fn remove_group(&mut self, v: usize, u: &mut Undo) {
        let color = self.cells[v];
        debug_assert!(color.is_stone());
        let mut sc = self.scratch.borrow_mut();
        sc.stack.clear();
        sc.stack.push(v);
        self.cells[v] = Point::Empty;
        self.capture_pool.push(v as u32);
        u.cap_count += 1;
        while let Some(cur) = sc.stack.pop() {
            for nb in self.neigh4(cur) {
                if self.cells[nb] == color {
                    sc.stack.push(nb);
                    self.cells[nb] = Point::Empty;
                    self.capture_pool.push(nb as u32);
                    u.cap_count += 1;
                }
            }
        }
    }

    // ---- move execution ----

    /// Play `m` for the side to move.
    ///
    /// On rejection (`Occupied`, `Ko`, `Suicide`) every observable piece of
    /// state is exactly as before the call; partial captures are reversed.
    pub fn play(&mut self, m: Move) -> Result<(), MoveError> {
        let mut u = Undo {
            mv: m,
            played: self.to_play,
            prev_ko: self.ko_point,
            prev_ko_age: self.ko_age,
            cap_begin: self.capture_pool.len(),
            cap_count: 0,
        };

        if m.is_pass() {
            // Passing does not clear the ko; the age check retires it.
            self.to_play = self.to_play.opp();
            self.history.push(u);
            return Ok(());
        }

        let v = m.vertex();
        if self.cells[v] != Point::Empty {
            return Err(MoveError::Occupied);
        }
        // Simple ko: the banned vertex is live only on the exact ply it was
        // set for.
        if self.ko_point == v as i32 && self.ko_age == self.history.len() as u32 {
            return Err(MoveError::Ko);
        }

        let opp = self.to_play.opp();
        let in_enemy_eye = self.is_eyeish(v) == Some(opp);

        self.cells[v] = self.to_play.to_point();

        for nb in self.neigh4(v) {
            if self.cells[nb].matches(opp) && !self.has_liberty(nb) {
                self.remove_group(nb, &mut u);
            }
        }

        if !self.has_liberty(v) {
            // Suicide: take the stone back and resurrect any captures.
            self.cells[v] = Point::Empty;
            let restored = opp.to_point();
            for &cv in &self.capture_pool[u.cap_begin..] {
                self.cells[cv as usize] = restored;
            }
            self.capture_pool.truncate(u.cap_begin);
            return Err(MoveError::Suicide);
        }

        if in_enemy_eye && u.cap_count == 1 {
            self.ko_point = self.capture_pool[u.cap_begin] as i32;
            self.ko_age = self.history.len() as u32 + 1;
        }

        self.to_play = self.to_play.opp();
        self.history.push(u);
        Ok(())
    }

    /// Unwind the last `count` accepted moves.
    pub fn undo(&mut self, count: usize) {
        assert!(count <= self.history.len(), "undo past the start of the game");
        for _ in 0..count {
            let u = match self.history.pop() {
                Some(u) => u,
                None => unreachable!("guarded by the assert above"),
            };
            self.to_play = u.played;
            self.ko_point = u.prev_ko;
            self.ko_age = u.prev_ko_age;
            if !u.mv.is_pass() {
                self.cells[u.mv.vertex()] = Point::Empty;
                let restored = u.played.opp().to_point();
                for &cv in &self.capture_pool[u.cap_begin..u.cap_begin + u.cap_count] {
                    self.cells[cv as usize] = restored;
                }
                self.capture_pool.truncate(u.cap_begin);
            }
        }
    }

    // ---- move generation ----

    /// Fill `out` with every interior empty vertex that is not the current
    /// ko point and not a true eye of the side to move.
    ///
    /// The set still contains suicides; `play` rejects those. Own eyes are
    /// excluded so playouts terminate.
    pub fn gen_pseudo_legal_moves(&self, out: &mut Vec<Move>) {
        out.clear();
        for y in 0..self.n {
            for x in 0..self.n {
                let v = self.vertex(x, y);
                if self.cells[v] != Point::Empty {
                    continue;
                }
                if v as i32 == self.ko_point {
                    continue;
                }
                if self.is_eye(v) == Some(self.to_play) {
                    continue;
                }
                out.push(Move::new(v));
            }
        }
    }

    /// Fill `out` with the 8-neighbourhoods of the last two non-pass moves,
    /// walls skipped. Duplicates are fine; callers shuffle and try.
    pub fn last_moves_neigh(&self, out: &mut Vec<Move>) {
        out.clear();
        let len = self.history.len();
        for idx in len.saturating_sub(2)..len {
            let mv = self.history[idx].mv;
            if mv.is_pass() {
                continue;
            }
            for nb in self.neigh8(mv.vertex()) {
                if self.cells[nb] != Point::Wall {
                    out.push(Move::new(nb));
                }
            }
        }
    }

    /// Whether playing `m` would capture at least one opposing stone: some
    /// adjacent opposing group has exactly one liberty, and that liberty
    /// can only be `m`'s vertex.
    pub fn is_capture(&self, m: Move) -> bool {
        if m.is_pass() {
            return false;
        }
        let v = m.vertex();
        if self.cells[v] != Point::Empty {
            return false;
        }
        let opp = self.to_play.opp();
        self.neigh4(v)
            .into_iter()
            .any(|nb| self.cells[nb].matches(opp) && self.count_liberties(nb) == 1)
    }
}
