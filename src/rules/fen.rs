use super::Square::Occupied;
use super::{ChessField, Color, GameState, Piece, PieceKind, Square, Wing};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a FEN position into a `GameState`.
///
/// The first four fields (placement, side to move, castling availability,
/// en-passant square) are consumed; the clock fields are accepted and ignored
/// since the engine does not track draw rules.
pub fn from_fen(fen: &str) -> Result<GameState, String> {
    let mut state = GameState::empty();
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(String::from("Invalid FEN string: must have at least 4 fields."));
    }

    // Parse board squares; FEN lists rank 8 first, which is row 0 here.
    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(String::from("Invalid FEN string: expected 8 rows"));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0;

        for c in row.chars() {
            if col_index > 7 {
                return Err(String::from("Invalid FEN string: too many columns"));
            }
            if c.is_ascii_digit() {
                col_index += c.to_digit(10).unwrap() as usize;
            } else {
                let piece = match c {
                    'p' => Some((Color::Black, PieceKind::Pawn)),
                    'r' => Some((Color::Black, PieceKind::Rook)),
                    'n' => Some((Color::Black, PieceKind::Knight)),
                    'b' => Some((Color::Black, PieceKind::Bishop)),
                    'q' => Some((Color::Black, PieceKind::Queen)),
                    'k' => Some((Color::Black, PieceKind::King)),
                    'P' => Some((Color::White, PieceKind::Pawn)),
                    'R' => Some((Color::White, PieceKind::Rook)),
                    'N' => Some((Color::White, PieceKind::Knight)),
                    'B' => Some((Color::White, PieceKind::Bishop)),
                    'Q' => Some((Color::White, PieceKind::Queen)),
                    'K' => Some((Color::White, PieceKind::King)),
                    _ => None,
                };

                if let Some((color, kind)) = piece {
                    state.squares[row_index][col_index] = Occupied(Piece { color, kind });
                    col_index += 1;
                } else {
                    return Err(format!("Invalid piece character in FEN string: {}", c));
                }
            }
        }
        if col_index > 8 {
            return Err(format!("Too many squares in row {} when parsing FEN", row_index));
        }
    }

    // Parse active color
    state.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(String::from("Invalid FEN string: invalid active color.")),
    };

    // Map castling availability onto the moved-flag ledger. A missing right
    // reads as "the rook has moved"; when a side has neither right, the king
    // itself counts as moved, which reproduces the availability semantics.
    let white_kingside = parts[2].contains('K');
    let white_queenside = parts[2].contains('Q');
    let black_kingside = parts[2].contains('k');
    let black_queenside = parts[2].contains('q');
    state.castling.white_rook_kingside_moved = !white_kingside;
    state.castling.white_rook_queenside_moved = !white_queenside;
    state.castling.white_king_moved = !white_kingside && !white_queenside;
    state.castling.black_rook_kingside_moved = !black_kingside;
    state.castling.black_rook_queenside_moved = !black_queenside;
    state.castling.black_king_moved = !black_kingside && !black_queenside;

    // Parse en passant square
    state.en_passant_target = if parts[3] == "-" {
        None
    } else {
        Some(ChessField::from_algebraic(parts[3])?)
    };

    Ok(state)
}

/// Prints the four position fields (placement, side to move, castling
/// availability, en-passant square); clocks are not tracked and not emitted.
pub fn to_fen(state: &GameState) -> String {
    let mut board_representation = String::new();

    for row in 0..8 {
        let mut empty_count = 0;

        for col in 0..8 {
            match state.squares[row][col] {
                Occupied(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                Square::Empty => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if row < 7 {
            board_representation.push('/');
        }
    }

    let active_color = if state.side_to_move == Color::White { "w" } else { "b" };

    let mut castling = String::new();
    if state.castling.may_castle(Color::White, Wing::KingSide) {
        castling.push('K');
    }
    if state.castling.may_castle(Color::White, Wing::QueenSide) {
        castling.push('Q');
    }
    if state.castling.may_castle(Color::Black, Wing::KingSide) {
        castling.push('k');
    }
    if state.castling.may_castle(Color::Black, Wing::QueenSide) {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant_square = match state.en_passant_target {
        Some(square) => square.as_algebraic(),
        None => "-".to_string(),
    };

    format!(
        "{} {} {} {}",
        board_representation, active_color, castling, en_passant_square
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fen_empty_board() {
        let state = from_fen("8/8/8/8/8/8/8/8 w - -").expect("Failed to parse FEN");

        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(state.squares[row][col], Square::Empty);
            }
        }
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.en_passant_target, None);
        assert!(state.castling.white_king_moved);
        assert!(state.castling.black_king_moved);
    }

    #[test]
    fn fen_initial_board() {
        let state = from_fen(INITIAL_POSITION).expect("Failed to parse FEN");

        for col in 0..8 {
            assert_eq!(
                state.squares[6][col],
                Occupied(Piece {
                    color: Color::White,
                    kind: PieceKind::Pawn
                })
            );
            assert_eq!(
                state.squares[1][col],
                Occupied(Piece {
                    color: Color::Black,
                    kind: PieceKind::Pawn
                })
            );
        }

        // Row 0 is black's home rank, row 7 white's.
        assert_eq!(
            state.squares[0][0],
            Occupied(Piece {
                color: Color::Black,
                kind: PieceKind::Rook
            })
        );
        assert_eq!(
            state.squares[7][4],
            Occupied(Piece {
                color: Color::White,
                kind: PieceKind::King
            })
        );
        assert_eq!(state.squares[4][4], Square::Empty);

        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.castling, Default::default());
        assert_eq!(state.en_passant_target, None);
    }

    #[test]
    fn fen_invalid_square() {
        assert!(from_fen("8/8/8/8/8/8/8/X7 w - - 0 1").is_err());
    }

    #[test]
    fn fen_invalid_fen_extra_columns() {
        let fen = "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(from_fen(fen).is_err());
    }

    #[test]
    fn test_invalid_fen_missing_parts() {
        assert!(from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
    }

    #[test]
    fn test_en_passant_parsing() {
        let state = from_fen("8/8/8/8/4pP2/8/8/8 b - f3 0 1").expect("Failed to parse FEN");

        assert_eq!(state.side_to_move, Color::Black);
        assert_eq!(
            state.en_passant_target,
            Some(ChessField::from_algebraic("f3").unwrap())
        );
    }

    #[test]
    fn fen_castling_rights_map_onto_the_ledger() {
        let state = from_fen("8/8/8/8/8/8/8/8 w Kq - 0 1").expect("Failed to parse FEN");

        assert!(!state.castling.white_king_moved);
        assert!(!state.castling.white_rook_kingside_moved);
        assert!(state.castling.white_rook_queenside_moved);
        assert!(!state.castling.black_king_moved);
        assert!(state.castling.black_rook_kingside_moved);
        assert!(!state.castling.black_rook_queenside_moved);
    }

    #[test]
    fn test_to_fen_initial_position() {
        let state = from_fen(INITIAL_POSITION).unwrap();
        assert_eq!(state.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
    }

    #[test]
    fn test_to_fen_round_trips_position_fields() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b Kq e3";
        let state = from_fen(fen).unwrap();
        assert_eq!(state.to_fen(), fen);
    }

    #[test]
    fn test_clock_fields_are_ignored() {
        let a = from_fen("8/8/8/8/8/8/8/K6k w - - 12 34").unwrap();
        let b = from_fen("8/8/8/8/8/8/8/K6k w - -").unwrap();
        assert_eq!(a, b);
    }
}
