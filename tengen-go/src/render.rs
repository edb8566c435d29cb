//! Board-to-text rendering for tests, logs, and demos.

use std::fmt;

use crate::board::Board;
use crate::types::{Move, Point};

/// Column letter for play-area column `x`, skipping `I` per Go convention.
fn col_letter(x: usize) -> char {
    (b'A' + x as u8 + u8::from(x >= 8)) as char
}

fn point_char(p: Point) -> char {
    match p {
        Point::Black => 'X',
        Point::White => 'O',
        Point::Empty => '.',
        Point::Wall => '#',
    }
}

impl Board {
    /// Stable ASCII rendering: a column-letter header, `n` labeled rows,
    /// and a trailing copy of the header. With `flip_vertical`, row `n`
    /// prints first (the usual Go orientation).
    pub fn dump(&self, flip_vertical: bool) -> String {
        let mut out = String::new();

        out.push_str("   ");
        for x in 0..self.n {
            out.push(col_letter(x));
            out.push(' ');
        }
        out.push('\n');

        for ry in 0..self.n {
            let y = if flip_vertical { self.n - 1 - ry } else { ry };
            let label = y + 1;
            out.push_str(&format!("{:>2} ", label));
            for x in 0..self.n {
                out.push(point_char(self.at_xy(x, y)));
                out.push(' ');
            }
            out.push_str(&format!("{:>2}\n", label));
        }

        out.push_str("   ");
        for x in 0..self.n {
            out.push(col_letter(x));
            out.push(' ');
        }
        out.push('\n');

        out
    }

    /// Human coordinate for a move, e.g. `"C4"`, or `"pass"`.
    pub fn coord_str(&self, m: Move) -> String {
        if m.is_pass() {
            return "pass".to_string();
        }
        let v = m.vertex();
        let x = v % self.stride - 1;
        let y = v / self.stride - 1;
        format!("{}{}", col_letter(x), y + 1)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(true))
    }
}
