use lazy_static::lazy_static;

use super::Square::Occupied;
use super::{fen, ChessField, Color, Piece, PieceKind, Square, Wing};
use super::model::CastlingLedger;

lazy_static! {
    static ref OPENING_POSITION: GameState =
        fen::from_fen(fen::INITIAL_POSITION).expect("initial position FEN is well-formed");
}

/// The full state of one game: the 8x8 board plus the auxiliary state needed
/// to adjudicate castling and en-passant. Cloning the state is the only
/// mechanism for speculative evaluation; the authoritative instance is
/// mutated in place and only ever by a fully validated move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub squares: [[Square; 8]; 8],
    pub side_to_move: Color,
    /// Square a pawn may move to this half-move to capture en-passant.
    pub en_passant_target: Option<ChessField>,
    pub castling: CastlingLedger,
}

/// What `attempt_move` reports back to the caller. The `capture`,
/// `en_passant` and `castling` flags describe the move itself (computed from
/// the pre-move board, for notation rendering); `check` and `checkmate`
/// describe the side that is now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub accepted: bool,
    pub check: Option<ChessField>,
    pub checkmate: bool,
    pub capture: bool,
    pub en_passant: bool,
    pub castling: bool,
}

impl MoveOutcome {
    fn rejected() -> Self {
        Self {
            accepted: false,
            check: None,
            checkmate: false,
            capture: false,
            en_passant: false,
            castling: false,
        }
    }
}

impl GameState {
    /// Creates a state with an empty board; used by the FEN parser.
    pub fn empty() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
            side_to_move: Color::White,
            en_passant_target: None,
            castling: CastlingLedger::default(),
        }
    }

    /// Standard initial position, white to move, no castling rights consumed.
    pub fn new_game() -> Self {
        OPENING_POSITION.clone()
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    pub fn piece_at(&self, field: ChessField) -> Option<Piece> {
        if field.row > 7 || field.col > 7 {
            return None;
        }
        match self.squares[field.row as usize][field.col as usize] {
            Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    pub fn current_side(&self) -> Color {
        self.side_to_move
    }

    pub fn find_king(&self, color: Color) -> Option<ChessField> {
        for row in 0..8u8 {
            for col in 0..8u8 {
                if let Occupied(piece) = self.squares[row as usize][col as usize] {
                    if piece.kind == PieceKind::King && piece.color == color {
                        return Some(ChessField::new(row, col));
                    }
                }
            }
        }
        None
    }

    /// Returns the king's square when `color`'s king is attacked by any enemy
    /// piece under pure movement rules, `None` otherwise.
    ///
    /// Precondition: exactly one king of `color` is on the board. A missing
    /// king is a precondition violation and panics rather than answering
    /// "no check".
    pub fn king_in_check(&self, color: Color) -> Option<ChessField> {
        let king = self
            .find_king(color)
            .unwrap_or_else(|| panic!("no {} king on the board", color));
        for row in 0..8u8 {
            for col in 0..8u8 {
                if let Occupied(piece) = self.squares[row as usize][col as usize] {
                    if piece.color != color && self.is_legal_shape(ChessField::new(row, col), king) {
                        return Some(king);
                    }
                }
            }
        }
        None
    }

    /// Columns the king and rook travel between for a castle on this wing:
    /// (king destination, rook origin, rook destination).
    fn castling_columns(wing: Wing) -> (u8, u8, u8) {
        match wing {
            Wing::KingSide => (6, 7, 5),
            Wing::QueenSide => (2, 0, 3),
        }
    }

    /// Recognises the two-file king move that denotes a castle.
    pub(crate) fn castling_wing(from: ChessField, to: ChessField) -> Option<Wing> {
        if from.row != to.row || from.col != 4 {
            return None;
        }
        match to.col {
            6 => Some(Wing::KingSide),
            2 => Some(Wing::QueenSide),
            _ => None,
        }
    }

    /// Validates and applies one move. Returns false, leaving the state
    /// untouched, when the shape is illegal, the piece is not the side to
    /// move's, or the move would leave the mover's own king in check.
    pub fn apply_move(&mut self, from: ChessField, to: ChessField) -> bool {
        if !self.is_legal_shape(from, to) {
            return false;
        }
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };
        if piece.color != self.side_to_move {
            return false;
        }

        if piece.kind == PieceKind::King {
            if let Some(wing) = Self::castling_wing(from, to) {
                self.perform_castling(piece, wing);
                return true;
            }
        }

        // Shape validation already matched the target against the en-passant
        // square, so a sideways pawn move onto an empty square is en-passant.
        let is_en_passant = piece.kind == PieceKind::Pawn
            && from.col != to.col
            && self.squares[to.row as usize][to.col as usize] == Square::Empty;

        // The victim square differs from the destination for en-passant.
        let victim = if is_en_passant {
            ChessField::new(from.row, to.col)
        } else {
            to
        };
        let captured = self.squares[victim.row as usize][victim.col as usize];

        self.squares[to.row as usize][to.col as usize] = Occupied(piece);
        self.squares[from.row as usize][from.col as usize] = Square::Empty;
        if is_en_passant {
            self.squares[victim.row as usize][victim.col as usize] = Square::Empty;
        }

        if self.king_in_check(piece.color).is_some() {
            // Reverse every mutation exactly, including the en-passant victim
            // on its own square.
            self.squares[from.row as usize][from.col as usize] = Occupied(piece);
            if is_en_passant {
                self.squares[to.row as usize][to.col as usize] = Square::Empty;
            }
            self.squares[victim.row as usize][victim.col as usize] = captured;
            return false;
        }

        self.en_passant_target = if piece.kind == PieceKind::Pawn
            && (to.row as isize - from.row as isize).abs() == 2
        {
            Some(ChessField::new((from.row + to.row) / 2, from.col))
        } else {
            None
        };

        self.record_departure(piece, from);
        self.side_to_move = self.side_to_move.opposite();
        true
    }

    /// Relocates king and rook in one atomic step. Shape validation has
    /// already proven the transit squares safe, so no rollback is needed.
    fn perform_castling(&mut self, king: Piece, wing: Wing) {
        let row = king.color.home_row() as usize;
        let (king_to, rook_from, rook_to) = Self::castling_columns(wing);
        self.squares[row][king_to as usize] = Occupied(king);
        self.squares[row][4] = Square::Empty;
        self.squares[row][rook_to as usize] = self.squares[row][rook_from as usize];
        self.squares[row][rook_from as usize] = Square::Empty;
        self.castling.mark_king(king.color);
        self.castling.mark_rook(king.color, wing);
        self.en_passant_target = None;
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Marks the castling ledger when a king moves, or a rook leaves its
    /// home corner, whether or not the move was a castle.
    fn record_departure(&mut self, piece: Piece, from: ChessField) {
        match piece.kind {
            PieceKind::King => self.castling.mark_king(piece.color),
            PieceKind::Rook if from.row == piece.color.home_row() => {
                for wing in [Wing::QueenSide, Wing::KingSide] {
                    if from.col == wing.rook_home_col() {
                        self.castling.mark_rook(piece.color, wing);
                    }
                }
            }
            _ => {}
        }
    }

    /// Validates, applies and reports one move on behalf of a caller that
    /// wants to render it (notation, check markers, game-over banners).
    pub fn attempt_move(&mut self, from: ChessField, to: ChessField) -> MoveOutcome {
        let piece = self.piece_at(from);
        let target = self.piece_at(to);
        let en_passant = matches!(piece, Some(p) if p.kind == PieceKind::Pawn)
            && from.col != to.col
            && target.is_none()
            && self.en_passant_target == Some(to);
        let castling = matches!(piece, Some(p) if p.kind == PieceKind::King)
            && Self::castling_wing(from, to).is_some();

        if !self.apply_move(from, to) {
            return MoveOutcome::rejected();
        }

        let next = self.side_to_move;
        MoveOutcome {
            accepted: true,
            check: self.king_in_check(next),
            checkmate: self.is_checkmate(next),
            capture: target.is_some() || en_passant,
            en_passant,
            castling,
        }
    }

    /// True when `color` is in check and no move escapes it. Deliberately
    /// brute-force over all 64x64 square pairs on cloned states; the board is
    /// fixed-size and small, so no pruning is required.
    pub fn is_checkmate(&self, color: Color) -> bool {
        if self.king_in_check(color).is_none() {
            return false;
        }

        for from_row in 0..8u8 {
            for from_col in 0..8u8 {
                let from = ChessField::new(from_row, from_col);
                match self.piece_at(from) {
                    Some(piece) if piece.color == color => {}
                    _ => continue,
                }
                for to_row in 0..8u8 {
                    for to_col in 0..8u8 {
                        let mut probe = self.clone();
                        probe.side_to_move = color;
                        // apply_move folds in the self-check filter, so any
                        // accepted probe is a legal escape.
                        if probe.apply_move(from, ChessField::new(to_row, to_col)) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in 0..8 {
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for col in 0..8 {
                let square = match &self.squares[row][col] {
                    Square::Empty => ' ',
                    Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::play;
    use super::super::Move;
    use super::*;

    fn field(square: &str) -> ChessField {
        ChessField::from_algebraic(square).unwrap()
    }

    #[test]
    fn test_apply_move_updates_board_and_turn() {
        let mut state = GameState::new_game();
        assert!(state.apply_move(field("e2"), field("e4")));
        assert_eq!(state.piece_at(field("e2")), None);
        assert_eq!(
            state.piece_at(field("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(state.current_side(), Color::Black);
    }

    #[test]
    fn test_wrong_turn_is_rejected() {
        let mut state = GameState::new_game();
        let snapshot = state.clone();
        assert!(!state.apply_move(field("e7"), field("e5")));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_double_pawn_advance_sets_en_passant_target() {
        let mut state = GameState::new_game();
        assert!(state.apply_move(field("e2"), field("e4")));
        assert_eq!(state.en_passant_target, Some(field("e3")));
        assert!(state.apply_move(field("e7"), field("e5")));
        assert_eq!(state.en_passant_target, Some(field("e6")));
        assert!(state.apply_move(field("g1"), field("f3")));
        assert_eq!(state.en_passant_target, None);
    }

    #[test]
    fn test_en_passant_removes_the_passed_pawn() {
        let mut state = GameState::from_fen("k7/8/8/3pP3/8/8/8/K7 w - d6 0 1").unwrap();
        assert!(state.apply_move(field("e5"), field("d6")));
        assert_eq!(
            state.piece_at(field("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(state.piece_at(field("d5")), None);
        assert_eq!(state.piece_at(field("e5")), None);
    }

    #[test]
    fn test_pinned_piece_move_is_rolled_back() {
        // Rook on b2 shields the a1 king from the d4 queen.
        let mut state = GameState::from_fen("1k6/8/8/8/3q4/8/1R6/K7 w - - 0 1").unwrap();
        let snapshot = state.clone();
        assert!(!state.apply_move(field("b2"), field("b7")));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_en_passant_rollback_restores_victim_square() {
        // Capturing en-passant on d6 would clear rank 5 between the a5 rook
        // and the h5 king.
        let mut state = GameState::from_fen("k7/8/8/r2pP2K/8/8/8/8 w - d6 0 1").unwrap();
        let snapshot = state.clone();
        assert!(!state.apply_move(field("e5"), field("d6")));
        assert_eq!(state, snapshot);
        assert_eq!(state.en_passant_target, Some(field("d6")));
    }

    #[test]
    fn test_kingside_castling_moves_both_pieces() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(state.apply_move(field("e1"), field("g1")));
        assert_eq!(
            state.piece_at(field("g1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            state.piece_at(field("f1")),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(state.piece_at(field("e1")), None);
        assert_eq!(state.piece_at(field("h1")), None);
        assert!(state.castling.white_king_moved);
        assert!(state.castling.white_rook_kingside_moved);
        assert!(!state.castling.white_rook_queenside_moved);
        assert_eq!(state.current_side(), Color::Black);
    }

    #[test]
    fn test_queenside_castling_moves_both_pieces() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        assert!(state.apply_move(field("e8"), field("c8")));
        assert_eq!(
            state.piece_at(field("c8")),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(
            state.piece_at(field("d8")),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(state.piece_at(field("a8")), None);
        assert!(state.castling.black_king_moved);
        assert!(state.castling.black_rook_queenside_moved);
    }

    #[test]
    fn test_rook_departure_marks_ledger() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(state.apply_move(field("h1"), field("h5")));
        assert!(state.castling.white_rook_kingside_moved);
        assert!(!state.castling.white_rook_queenside_moved);
        assert!(!state.castling.white_king_moved);
        assert!(state.apply_move(field("e8"), field("e7")));
        assert!(state.castling.black_king_moved);
    }

    #[test]
    fn test_check_reports_the_king_square() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert_eq!(state.king_in_check(Color::White), Some(field("e1")));
        assert_eq!(state.king_in_check(Color::Black), None);
    }

    #[test]
    fn test_pawn_straight_advance_is_not_an_attack() {
        // A pawn directly in front of the king gives no check; only the
        // diagonal capture shape attacks.
        let state = GameState::from_fen("k7/8/8/8/8/4p3/4K3/8 w - - 0 1").unwrap();
        assert_eq!(state.king_in_check(Color::White), None);

        let state = GameState::from_fen("k7/8/8/8/8/3p4/4K3/8 w - - 0 1").unwrap();
        assert_eq!(state.king_in_check(Color::White), Some(field("e2")));
    }

    #[test]
    #[should_panic(expected = "no White king")]
    fn test_missing_king_is_a_loud_precondition_violation() {
        let state = GameState::from_fen("k7/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        state.king_in_check(Color::White);
    }

    #[test]
    fn test_smothered_corner_mate() {
        let state = GameState::from_fen("1k6/8/8/8/8/8/PPn5/KN6 w - - 0 1").unwrap();
        assert!(state.is_checkmate(Color::White));
    }

    #[test]
    fn test_stalemate_is_not_checkmate() {
        let state = GameState::from_fen("1k6/8/8/8/8/1r6/7r/K7 w - - 0 1").unwrap();
        assert!(!state.is_checkmate(Color::White));
    }

    #[test]
    fn test_check_with_escape_is_not_checkmate() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert!(state.king_in_check(Color::White).is_some());
        assert!(!state.is_checkmate(Color::White));
    }

    #[test]
    fn test_attempt_move_reports_capture_metadata() {
        let mut state = GameState::new_game();
        play(&mut state, &["e2e4", "d7d5"]);
        let outcome = state.attempt_move(field("e4"), field("d5"));
        assert!(outcome.accepted);
        assert!(outcome.capture);
        assert!(!outcome.en_passant);
        assert!(!outcome.castling);
        assert_eq!(outcome.check, None);
        assert!(!outcome.checkmate);
    }

    #[test]
    fn test_attempt_move_reports_castling_metadata() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let outcome = state.attempt_move(field("e1"), field("c1"));
        assert!(outcome.accepted);
        assert!(outcome.castling);
        assert!(!outcome.capture);
    }

    #[test]
    fn test_attempt_move_rejection_is_all_false() {
        let mut state = GameState::new_game();
        let outcome = state.attempt_move(field("e2"), field("e5"));
        assert_eq!(
            outcome,
            MoveOutcome {
                accepted: false,
                check: None,
                checkmate: false,
                capture: false,
                en_passant: false,
                castling: false,
            }
        );
    }

    #[test]
    fn test_render_to_string_shows_the_initial_position() {
        let rendered = GameState::new_game().render_to_string();
        assert!(rendered.starts_with("    a   b   c   d   e   f   g   h  \n"));
        assert!(rendered.contains("8 │ r │ n │ b │ q │ k │ b │ n │ r │ 8"));
        assert!(rendered.contains("1 │ R │ N │ B │ Q │ K │ B │ N │ R │ 1"));
    }

    #[test]
    fn test_moves_parse_through_the_move_type() {
        let mut state = GameState::new_game();
        let mv = Move::from_algebraic("b1c3").unwrap();
        assert!(state.apply_move(mv.from, mv.to));
    }
}
