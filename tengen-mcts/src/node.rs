//! Search-tree node statistics.

use tengen_go::{Color, Move};

pub type NodeId = u32;

/// Prior visit/win counts injected into every fresh node: an even-game
/// assumption that keeps the selection score defined before the first real
/// visit and damps early noise.
pub const PRIOR_VISITS: u32 = 10;
pub const PRIOR_WINS: u32 = 5;

/// One node of the search tree.
///
/// `w` counts wins for the side that just played `mv`; `av`/`aw` are the
/// all-moves-as-first statistics consumed by RAVE selection.
#[derive(Clone)]
pub struct Node {
    pub mv: Move,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub just_played: Color,
    pub is_expanded: bool,

    pub v: u32,
    pub w: u32,
    pub av: u32,
    pub aw: u32,
    pub pv: u32,
    pub pw: u32,
}

impl Node {
    pub fn new(mv: Move, parent: Option<NodeId>, just_played: Color) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            just_played,
            is_expanded: false,
            v: 0,
            w: 0,
            av: 0,
            aw: 0,
            pv: PRIOR_VISITS,
            pw: PRIOR_WINS,
        }
    }

    /// Prior-injected win expectation.
    pub fn winrate(&self) -> f64 {
        f64::from(self.w + self.pw) / f64::from(self.v + self.pv)
    }
}
