//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;

use serde::Serialize;
use shakmaty::{Color as SColor, File, Rank, Role};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in prompt order
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    /// Map a promotion key (q/r/b/n, any case) to a piece kind
    pub fn from_promotion_key(key: &str) -> Option<PieceKind> {
        match key.to_ascii_lowercase().as_str() {
            "q" => Some(PieceKind::Queen),
            "r" => Some(PieceKind::Rook),
            "b" => Some(PieceKind::Bishop),
            "n" => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// Lowercase letter used in UCI promotion suffixes
    pub fn uci_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// The rank a pawn of this color promotes on
    pub fn last_rank(self) -> u8 {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "white"),
            PieceColor::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    /// Unicode glyph for rendering (hollow for white, filled for black)
    pub fn glyph(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::King, PieceColor::White) => "♔",
            (PieceKind::Queen, PieceColor::White) => "♕",
            (PieceKind::Rook, PieceColor::White) => "♖",
            (PieceKind::Bishop, PieceColor::White) => "♗",
            (PieceKind::Knight, PieceColor::White) => "♘",
            (PieceKind::Pawn, PieceColor::White) => "♙",
            (PieceKind::King, PieceColor::Black) => "♚",
            (PieceKind::Queen, PieceColor::Black) => "♛",
            (PieceKind::Rook, PieceColor::Black) => "♜",
            (PieceKind::Bishop, PieceColor::Black) => "♝",
            (PieceKind::Knight, PieceColor::Black) => "♞",
            (PieceKind::Pawn, PieceColor::Black) => "♟",
        }
    }
}

/// A board square. File 0 is the a-file, rank 0 is the first rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Returns None when either coordinate is off the board
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Parse algebraic notation such as "e4"
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Self::new(file as u8 - b'a', rank as u8 - b'1')
    }

    /// All 64 squares, a1 first, rank by rank
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }

    pub fn to_shakmaty(self) -> shakmaty::Square {
        shakmaty::Square::from_coords(File::new(self.file as u32), Rank::new(self.rank as u32))
    }

    pub fn from_shakmaty(sq: shakmaty::Square) -> Self {
        Self {
            file: sq.file() as u8,
            rank: sq.rank() as u8,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

/// A fully specified move. Castling is the king's two-square move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

/// UCI notation, e.g. "e2e4" or "e7e8q"
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.uci_char())?;
        }
        Ok(())
    }
}

/// Convert shakmaty role to our domain kind
pub fn role_to_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

pub fn color_from_shakmaty(color: SColor) -> PieceColor {
    match color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    }
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    Piece {
        kind: role_to_kind(piece.role),
        color: color_from_shakmaty(piece.color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        let e4 = Square::parse("e4").unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.to_string(), "e4");
        assert!(Square::parse("i1").is_none());
        assert!(Square::parse("a9").is_none());
        assert!(Square::parse("a10").is_none());
        assert!(Square::new(8, 0).is_none());
    }

    #[test]
    fn test_all_squares() {
        let all: Vec<_> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0].to_string(), "a1");
        assert_eq!(all[63].to_string(), "h8");
    }

    #[test]
    fn test_shakmaty_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::from_shakmaty(sq.to_shakmaty()), sq);
        }
        assert_eq!(
            Square::parse("g1").unwrap().to_shakmaty(),
            shakmaty::Square::G1
        );
    }

    #[test]
    fn test_move_uci() {
        let e2 = Square::parse("e2").unwrap();
        let e4 = Square::parse("e4").unwrap();
        assert_eq!(Move::new(e2, e4).to_string(), "e2e4");

        let e7 = Square::parse("e7").unwrap();
        let e8 = Square::parse("e8").unwrap();
        assert_eq!(
            Move::with_promotion(e7, e8, PieceKind::Knight).to_string(),
            "e7e8n"
        );
    }

    #[test]
    fn test_promotion_keys() {
        assert_eq!(PieceKind::from_promotion_key("Q"), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_promotion_key("n"), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_promotion_key("k"), None);
        assert!(!PieceKind::King.is_promotion_choice());
        assert!(!PieceKind::Pawn.is_promotion_choice());
    }

    #[test]
    fn test_last_rank() {
        assert_eq!(PieceColor::White.last_rank(), 7);
        assert_eq!(PieceColor::Black.last_rank(), 0);
        assert_eq!(PieceColor::White.opposite(), PieceColor::Black);
    }
}
