#[cfg(test)]
mod tests {
    use crate::{Board, Color, Move};

    fn place(b: &mut Board, black: &[(usize, usize)], white: &[(usize, usize)]) {
        let rounds = black.len().max(white.len());
        for i in 0..rounds {
            match black.get(i) {
                Some(&(x, y)) => b.play(Move::new(b.vertex(x, y))).unwrap_or_else(|e| {
                    panic!("black setup at ({},{}) rejected: {e}", x, y)
                }),
                None => b.play(Move::PASS).unwrap(),
            }
            match white.get(i) {
                Some(&(x, y)) => b.play(Move::new(b.vertex(x, y))).unwrap_or_else(|e| {
                    panic!("white setup at ({},{}) rejected: {e}", x, y)
                }),
                None => b.play(Move::PASS).unwrap(),
            }
        }
    }

    #[test]
    fn open_point_is_not_eyeish() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[(3, 4), (5, 4), (4, 3)], &[]);
        // (4,4) still has an empty orthogonal neighbour at (4,5).
        assert_eq!(b.is_eyeish(b.vertex(4, 4)), None);
    }

    #[test]
    fn mixed_surround_is_not_eyeish() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[(3, 4), (5, 4), (4, 3)], &[(4, 5)]);
        assert_eq!(b.is_eyeish(b.vertex(4, 4)), None);
    }

    #[test]
    fn center_eye_with_clean_diagonals() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[(3, 4), (5, 4), (4, 3), (4, 5)], &[]);
        let v = b.vertex(4, 4);
        assert_eq!(b.is_eyeish(v), Some(Color::Black));
        assert_eq!(b.is_eye(v), Some(Color::Black));
    }

    #[test]
    fn one_opposing_diagonal_keeps_the_eye() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[(3, 4), (5, 4), (4, 3), (4, 5)], &[(3, 3)]);
        assert_eq!(b.is_eye(b.vertex(4, 4)), Some(Color::Black));
    }

    #[test]
    fn two_opposing_diagonals_make_a_false_eye() {
        let mut b = Board::new(9, 6.5);
        place(
            &mut b,
            &[(3, 4), (5, 4), (4, 3), (4, 5)],
            &[(3, 3), (5, 5)],
        );
        let v = b.vertex(4, 4);
        assert_eq!(b.is_eyeish(v), Some(Color::Black));
        assert_eq!(b.is_eye(v), None);
    }

    #[test]
    fn edge_eye_pays_the_wall_penalty() {
        let mut b = Board::new(9, 6.5);
        // Eye candidate at (4,0): three stone neighbours plus the wall.
        place(&mut b, &[(3, 0), (5, 0), (4, 1)], &[]);
        let v = b.vertex(4, 0);
        assert_eq!(b.is_eye(v), Some(Color::Black));

        // A single opposing diagonal now reaches the threshold of two.
        place(&mut b, &[], &[(3, 1)]);
        assert_eq!(b.is_eyeish(v), Some(Color::Black));
        assert_eq!(b.is_eye(v), None);
    }

    #[test]
    fn corner_eye() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[(1, 0), (0, 1)], &[]);
        let v = b.vertex(0, 0);
        assert_eq!(b.is_eye(v), Some(Color::Black));

        // The lone diagonal turning hostile kills the corner eye.
        place(&mut b, &[], &[(1, 1)]);
        assert_eq!(b.is_eye(v), None);
    }

    #[test]
    fn white_eyes_are_classified_too() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[], &[(3, 4), (5, 4), (4, 3), (4, 5)]);
        assert_eq!(b.is_eye(b.vertex(4, 4)), Some(Color::White));
    }

    #[test]
    fn own_eyes_are_excluded_from_pseudo_legal_moves() {
        let mut b = Board::new(9, 6.5);
        place(&mut b, &[(3, 4), (5, 4), (4, 3), (4, 5)], &[]);
        let eye = b.vertex(4, 4);
        assert_eq!(b.is_eye(eye), Some(Color::Black));
        assert_eq!(b.to_play(), Color::Black);

        let mut moves = Vec::new();
        b.gen_pseudo_legal_moves(&mut moves);
        assert!(!moves.iter().any(|m| m.vertex() == eye));

        // The opponent is free to consider throwing in.
        b.play(Move::PASS).unwrap();
        b.gen_pseudo_legal_moves(&mut moves);
        assert!(moves.iter().any(|m| m.vertex() == eye));
    }
}
