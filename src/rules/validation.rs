use super::Square::Occupied;
use super::{ChessField, GameState, Piece, PieceKind, Square, Wing};

impl GameState {
    /// Shape legality: is `to` a legal destination for the piece on `from`
    /// under piece-movement rules and board occupancy? Whether the move
    /// leaves the mover's own king in check is not considered here; the
    /// executor layers that on.
    pub fn is_legal_shape(&self, from: ChessField, to: ChessField) -> bool {
        if from.row > 7 || from.col > 7 || to.row > 7 || to.col > 7 {
            return false;
        }
        let piece = match self.squares[from.row as usize][from.col as usize] {
            Occupied(piece) => piece,
            Square::Empty => return false,
        };
        // A same-color destination is illegal for every piece kind; this also
        // rules out from == to.
        if let Occupied(target) = self.squares[to.row as usize][to.col as usize] {
            if target.color == piece.color {
                return false;
            }
        }

        let row_delta = to.row as isize - from.row as isize;
        let col_delta = to.col as isize - from.col as isize;

        match piece.kind {
            PieceKind::Pawn => self.is_legal_pawn_shape(piece, from, to),
            PieceKind::Knight => {
                (row_delta.abs() == 2 && col_delta.abs() == 1) || (row_delta.abs() == 1 && col_delta.abs() == 2)
            }
            PieceKind::Rook => (row_delta == 0 || col_delta == 0) && self.is_path_clear(from, to),
            PieceKind::Bishop => row_delta.abs() == col_delta.abs() && self.is_path_clear(from, to),
            PieceKind::Queen => {
                (row_delta == 0 || col_delta == 0 || row_delta.abs() == col_delta.abs())
                    && self.is_path_clear(from, to)
            }
            PieceKind::King => self.is_legal_king_shape(piece, from, to),
        }
    }

    fn is_legal_pawn_shape(&self, pawn: Piece, from: ChessField, to: ChessField) -> bool {
        let forward = pawn.color.pawn_direction();
        let row_delta = to.row as isize - from.row as isize;
        let col_delta = (to.col as isize - from.col as isize).abs();
        let target_empty = self.squares[to.row as usize][to.col as usize] == Square::Empty;

        // Single advance onto an empty square.
        if col_delta == 0 && row_delta == forward && target_empty {
            return true;
        }

        // Double advance from the starting rank through two empty squares.
        if col_delta == 0
            && row_delta == 2 * forward
            && from.row == pawn.color.pawn_start_row()
            && target_empty
            && self.squares[(from.row as isize + forward) as usize][from.col as usize] == Square::Empty
        {
            return true;
        }

        // Diagonal capture; the target is an enemy piece since same-color
        // targets were screened out above.
        if col_delta == 1 && row_delta == forward && !target_empty {
            return true;
        }

        // Diagonal onto an empty square only when it is the en-passant target.
        if col_delta == 1 && row_delta == forward && target_empty && self.en_passant_target == Some(to) {
            return true;
        }

        false
    }

    fn is_legal_king_shape(&self, king: Piece, from: ChessField, to: ChessField) -> bool {
        let row_delta = (to.row as isize - from.row as isize).abs();
        let col_delta = (to.col as isize - from.col as isize).abs();

        if row_delta <= 1 && col_delta <= 1 {
            return true;
        }
        if row_delta == 0 && col_delta == 2 {
            return self.is_legal_castling_shape(king, from, to);
        }
        false
    }

    fn is_legal_castling_shape(&self, king: Piece, from: ChessField, to: ChessField) -> bool {
        let home = king.color.home_row();
        let wing = match Self::castling_wing(from, to) {
            Some(wing) if from.row == home => wing,
            _ => return false,
        };

        if !self.castling.may_castle(king.color, wing) {
            return false;
        }

        // The rook must still be standing on its home corner; an unmoved
        // ledger flag alone does not survive the rook being captured there.
        let rook_home = self.squares[home as usize][wing.rook_home_col() as usize];
        match rook_home {
            Occupied(piece) if piece.color == king.color && piece.kind == PieceKind::Rook => {}
            _ => return false,
        }

        let between: &[u8] = match wing {
            Wing::KingSide => &[5, 6],
            Wing::QueenSide => &[1, 2, 3],
        };
        if between
            .iter()
            .any(|&col| self.squares[home as usize][col as usize] != Square::Empty)
        {
            return false;
        }

        // The king's current square, the square it passes through and its
        // destination must all be safe: plant the king on each in turn on a
        // clone and ask the check oracle.
        let transit: [u8; 3] = match wing {
            Wing::KingSide => [4, 5, 6],
            Wing::QueenSide => [4, 3, 2],
        };
        for &col in &transit {
            let mut probe = self.clone();
            probe.squares[home as usize][from.col as usize] = Square::Empty;
            probe.squares[home as usize][col as usize] = Occupied(king);
            if probe.king_in_check(king.color).is_some() {
                return false;
            }
        }
        true
    }

    /// Every square strictly between `from` and `to` (which must share a
    /// rank, file or diagonal) is empty.
    pub(crate) fn is_path_clear(&self, from: ChessField, to: ChessField) -> bool {
        let row_step = (to.row as isize - from.row as isize).signum();
        let col_step = (to.col as isize - from.col as isize).signum();

        let mut row = from.row as isize + row_step;
        let mut col = from.col as isize + col_step;
        while (row, col) != (to.row as isize, to.col as isize) {
            if self.squares[row as usize][col as usize] != Square::Empty {
                return false;
            }
            row += row_step;
            col += col_step;
        }
        true
    }
}
