pub mod fen;
pub mod model;
pub use model::{CastlingLedger, ChessField, Color, Move, Piece, PieceKind, Square, Wing};

mod game;
mod validation;
pub mod test_utils;
pub use game::{GameState, MoveOutcome};
