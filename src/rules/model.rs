use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    pub fn home_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row direction this side's pawns advance in.
    pub fn pawn_direction(&self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "P"),
            PieceKind::Knight => write!(f, "N"),
            PieceKind::Bishop => write!(f, "B"),
            PieceKind::Rook => write!(f, "R"),
            PieceKind::Queen => write!(f, "Q"),
            PieceKind::King => write!(f, "K"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        if self.color == Color::White {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }

    /// Unicode chess glyph for terminal display.
    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

/// A board coordinate. Row 0 is black's home rank (rank 8), row 7 is white's
/// home rank (rank 1); columns run from the a-file (0) to the h-file (7).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, String> {
        let mut chars = algebraic.chars();
        let file = chars.next().ok_or_else(|| format!("Invalid square: {}", algebraic))?;
        let rank = chars.next().ok_or_else(|| format!("Invalid square: {}", algebraic))?;
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(format!("Invalid square: {}", algebraic));
        }
        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Ok(Self { row, col })
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

/// A candidate move given as origin and destination squares.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
}

impl Move {
    pub fn new(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Self {
        Self {
            from: ChessField::new(from_row, from_col),
            to: ChessField::new(to_row, to_col),
        }
    }

    /// Parses long algebraic notation, e.g. "e2e4".
    pub fn from_algebraic(algebraic: &str) -> Result<Self, String> {
        if algebraic.len() != 4 || !algebraic.is_ascii() {
            return Err(format!("Invalid move: {}", algebraic));
        }
        let from = ChessField::from_algebraic(&algebraic[0..2])?;
        let to = ChessField::from_algebraic(&algebraic[2..4])?;
        Ok(Self { from, to })
    }

    pub fn as_algebraic(&self) -> String {
        format!(
            "{}{}",
            to_algebraic_square(self.from.row, self.from.col),
            to_algebraic_square(self.to.row, self.to.col)
        )
    }
}

pub fn to_algebraic_square(row: u8, col: u8) -> String {
    let file = (b'a' + col) as char;
    let rank = (b'8' - row) as char;
    format!("{}{}", file, rank)
}

/// The two castling directions, seen from the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wing {
    KingSide,
    QueenSide,
}

impl Wing {
    /// Column of the rook that participates in a castle on this wing.
    pub fn rook_home_col(&self) -> u8 {
        match self {
            Wing::KingSide => 7,
            Wing::QueenSide => 0,
        }
    }
}

/// Which kings and rooks have left their home squares. Flags only ever flip
/// from false to true; a piece returning home does not restore castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingLedger {
    pub white_king_moved: bool,
    pub white_rook_queenside_moved: bool,
    pub white_rook_kingside_moved: bool,
    pub black_king_moved: bool,
    pub black_rook_queenside_moved: bool,
    pub black_rook_kingside_moved: bool,
}

impl CastlingLedger {
    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, color: Color, wing: Wing) -> bool {
        match (color, wing) {
            (Color::White, Wing::QueenSide) => self.white_rook_queenside_moved,
            (Color::White, Wing::KingSide) => self.white_rook_kingside_moved,
            (Color::Black, Wing::QueenSide) => self.black_rook_queenside_moved,
            (Color::Black, Wing::KingSide) => self.black_rook_kingside_moved,
        }
    }

    pub fn mark_king(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_moved = true,
            Color::Black => self.black_king_moved = true,
        }
    }

    pub fn mark_rook(&mut self, color: Color, wing: Wing) {
        match (color, wing) {
            (Color::White, Wing::QueenSide) => self.white_rook_queenside_moved = true,
            (Color::White, Wing::KingSide) => self.white_rook_kingside_moved = true,
            (Color::Black, Wing::QueenSide) => self.black_rook_queenside_moved = true,
            (Color::Black, Wing::KingSide) => self.black_rook_kingside_moved = true,
        }
    }

    /// True when neither the king nor the rook on `wing` has moved yet.
    pub fn may_castle(&self, color: Color, wing: Wing) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, wing)
    }
}
