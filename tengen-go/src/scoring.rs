//! Terminal evaluation by area scoring.

use crate::board::Board;
use crate::types::{Color, Point};

impl Board {
    /// Signed area score from `perspective`'s point of view.
    ///
    /// Stones count one point each; a maximal empty region counts its full
    /// size for whichever single color borders it, and nothing when both or
    /// neither do. Komi is subtracted from Black and added to White, so
    /// `evaluate(Black) == -evaluate(White)` holds exactly.
    pub fn evaluate(&self, perspective: Color) -> f32 {
        let me = perspective.to_point();
        let them = perspective.opp().to_point();

        let mut sc = self.scratch.borrow_mut();
        let sc = &mut *sc;
        sc.mark_id += 1;
        let id = sc.mark_id;

        let mut score: i64 = 0;
        for y in 0..self.n {
            for x in 0..self.n {
                let v = self.vertex(x, y);
                let p = self.cells[v];
                if p == me {
                    score += 1;
                    continue;
                }
                if p == them {
                    score -= 1;
                    continue;
                }
                if p != Point::Empty || sc.mark[v] == id {
                    continue;
                }

                // Flood one maximal empty region, noting who borders it.
                sc.stack.clear();
                sc.stack.push(v);
                sc.mark[v] = id;
                let mut region = 0i64;
                let mut touches_me = false;
                let mut touches_them = false;
                while let Some(cur) = sc.stack.pop() {
                    region += 1;
                    for nb in self.neigh4(cur) {
                        let q = self.cells[nb];
                        if q == Point::Empty {
                            if sc.mark[nb] != id {
                                sc.mark[nb] = id;
                                sc.stack.push(nb);
                            }
                        } else if q == me {
                            touches_me = true;
                        } else if q == them {
                            touches_them = true;
                        }
                    }
                }
                if touches_me && !touches_them {
                    score += region;
                } else if touches_them && !touches_me {
                    score -= region;
                }
            }
        }

        let komi = match perspective {
            Color::Black => -self.komi,
            Color::White => self.komi,
        };
        score as f32 + komi
    }
}
