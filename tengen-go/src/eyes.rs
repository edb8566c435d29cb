//! Eye shape classification.
//!
//! The diagonal rule is a playout heuristic, not a life-and-death solver:
//! it keeps rollouts from filling their own eyes so games terminate with
//! sensible positions.

use crate::board::Board;
use crate::types::{Color, Point};

impl Board {
    /// The single color surrounding an empty `v` orthogonally, if any.
    ///
    /// All four orthogonal neighbours must be that color's stones or Wall,
    /// with at least one stone. False eyes still pass this test.
    pub fn is_eyeish(&self, v: usize) -> Option<Color> {
        let mut eye: Option<Color> = None;
        for nb in self.neigh4(v) {
            match self.cells[nb] {
                Point::Wall => {}
                Point::Empty => return None,
                Point::Black => match eye {
                    None => eye = Some(Color::Black),
                    Some(Color::White) => return None,
                    _ => {}
                },
                Point::White => match eye {
                    None => eye = Some(Color::White),
                    Some(Color::Black) => return None,
                    _ => {}
                },
            }
        }
        eye
    }

    /// Eyeish plus the diagonal false-eye guard.
    ///
    /// Count diagonals held by the opponent; any Wall diagonal adds one
    /// (edge penalty). Two or more disqualify the eye.
    pub fn is_eye(&self, v: usize) -> Option<Color> {
        let c = self.is_eyeish(v)?;
        let opp = c.opp();
        let mut opp_count = 0;
        let mut at_edge = false;
        for nb in self.diag_neigh(v) {
            match self.cells[nb] {
                Point::Wall => at_edge = true,
                p if p.matches(opp) => opp_count += 1,
                _ => {}
            }
        }
        if at_edge {
            opp_count += 1;
        }
        if opp_count < 2 {
            Some(c)
        } else {
            None
        }
    }
}
