#[cfg(test)]
use super::{ChessField, Color, GameState, Move, PieceKind, Square};

/// Applies a sequence of long-algebraic moves, asserting each is accepted.
#[cfg(test)]
pub fn play(state: &mut GameState, moves: &[&str]) {
    for notation in moves {
        let mv = Move::from_algebraic(notation).unwrap();
        assert!(
            state.apply_move(mv.from, mv.to),
            "move {} was rejected in {}",
            notation,
            state.to_fen()
        );
    }
}

/// Asserts `is_legal_shape` for a batch of destinations from one square.
#[cfg(test)]
pub fn assert_shapes(state: &GameState, from: &str, legal: &[&str], illegal: &[&str]) {
    let from = ChessField::from_algebraic(from).unwrap();
    for to in legal {
        let to_field = ChessField::from_algebraic(to).unwrap();
        assert!(
            state.is_legal_shape(from, to_field),
            "{}{} should be a legal shape in {}",
            from.as_algebraic(),
            to,
            state.to_fen()
        );
    }
    for to in illegal {
        let to_field = ChessField::from_algebraic(to).unwrap();
        assert!(
            !state.is_legal_shape(from, to_field),
            "{}{} should be an illegal shape in {}",
            from.as_algebraic(),
            to,
            state.to_fen()
        );
    }
}

#[cfg(test)]
pub fn count_kings(state: &GameState, color: Color) -> usize {
    let mut kings = 0;
    for row in 0..8 {
        for col in 0..8 {
            if let Square::Occupied(piece) = state.squares[row][col] {
                if piece.kind == PieceKind::King && piece.color == color {
                    kings += 1;
                }
            }
        }
    }
    kings
}
