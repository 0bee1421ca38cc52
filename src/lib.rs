pub mod rules;

pub use rules::{ChessField, Color, GameState, Move, MoveOutcome, Piece, PieceKind, Square};
