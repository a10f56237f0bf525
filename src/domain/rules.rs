//! Rules engine seam and its shakmaty-backed implementation.
//!
//! The match controller never decides legality itself. It asks a
//! [`RulesEngine`] for the legal move set, applies moves through it and reads
//! back the terminal predicates. [`ShakmatyRules`] is the implementation used
//! by the application:
//! - legal move generation and application
//! - SAN with check/mate suffix (`SanPlus`)
//! - fifty-move and threefold-repetition claims (shakmaty keeps no history,
//!   so positions are counted here)

use std::collections::HashMap;

use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, File, Position, Role};

use crate::domain::{Move, Piece, PieceColor, Square, color_from_shakmaty, shakmaty_to_piece};
use crate::error::RulesError;

/// Notation produced by applying a move
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedMove {
    pub san: String,
    pub uci: String,
}

/// The capability set the controller consumes from a chess rules library
pub trait RulesEngine {
    /// All legal moves in the current position
    fn legal_moves(&self) -> Vec<Move>;

    /// Apply a move, returning its notation. Fails without mutating on an illegal move.
    fn apply(&mut self, mv: &Move) -> Result<AppliedMove, RulesError>;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Side to move
    fn turn(&self) -> PieceColor;

    fn fullmove_number(&self) -> u32;

    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn can_claim_fifty_moves(&self) -> bool;
    fn can_claim_threefold_repetition(&self) -> bool;

    /// Back to the starting position with an empty history
    fn reset(&mut self);
}

/// Identity of a position for repetition purposes
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PositionKey {
    placement: [Option<Piece>; 64],
    turn: PieceColor,
    castling: u64,
    // only when an en passant capture is actually legal
    en_passant: Option<Square>,
}

fn position_key(position: &Chess) -> PositionKey {
    let mut placement = [None; 64];
    for (slot, sq) in placement.iter_mut().zip(Square::all()) {
        *slot = position.board().piece_at(sq.to_shakmaty()).map(shakmaty_to_piece);
    }

    let en_passant = position.legal_moves().iter().find_map(|m| match m {
        shakmaty::Move::EnPassant { to, .. } => Some(Square::from_shakmaty(*to)),
        _ => None,
    });

    PositionKey {
        placement,
        turn: color_from_shakmaty(position.turn()),
        castling: u64::from(position.castles().castling_rights()),
        en_passant,
    }
}

/// Convert a shakmaty move to our domain move.
/// Castling becomes the king's two-square move; drops have no counterpart.
fn to_domain(m: &shakmaty::Move) -> Option<Move> {
    match m {
        shakmaty::Move::Normal {
            from,
            to,
            promotion,
            ..
        } => Some(Move {
            from: Square::from_shakmaty(*from),
            to: Square::from_shakmaty(*to),
            promotion: promotion.map(crate::domain::role_to_kind),
        }),
        shakmaty::Move::EnPassant { from, to } => Some(Move::new(
            Square::from_shakmaty(*from),
            Square::from_shakmaty(*to),
        )),
        shakmaty::Move::Castle { king, rook } => {
            let king_dest = if rook.file() == File::H {
                shakmaty::Square::from_coords(File::G, rook.rank())
            } else {
                shakmaty::Square::from_coords(File::C, rook.rank())
            };
            Some(Move::new(
                Square::from_shakmaty(*king),
                Square::from_shakmaty(king_dest),
            ))
        }
        shakmaty::Move::Put { .. } => None,
    }
}

/// Standard chess rules backed by shakmaty
#[derive(Clone, Debug)]
pub struct ShakmatyRules {
    start: Chess,
    position: Chess,
    /// Occurrence count of every position reached since the start
    history: HashMap<PositionKey, u32>,
}

impl ShakmatyRules {
    /// Create a new game from the standard starting position
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Create a game from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen
            .parse()
            .map_err(|e| RulesError::InvalidFen(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidFen(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let mut rules = Self {
            start: position.clone(),
            position,
            history: HashMap::new(),
        };
        rules.record_position();
        rules
    }

    /// The current shakmaty position
    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }

    fn record_position(&mut self) {
        *self.history.entry(position_key(&self.position)).or_insert(0) += 1;
    }

    fn occurrences(&self, position: &Chess) -> u32 {
        self.history
            .get(&position_key(position))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for ShakmatyRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyRules {
    fn legal_moves(&self) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(to_domain)
            .collect()
    }

    fn apply(&mut self, mv: &Move) -> Result<AppliedMove, RulesError> {
        let legal = self.position.legal_moves();
        let m = legal
            .iter()
            .find(|m| to_domain(m).as_ref() == Some(mv))
            .cloned()
            .ok_or_else(|| RulesError::IllegalMove(mv.to_string()))?;

        // m came from the legal move list
        let mut next = self.position.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut next, m).to_string();

        self.position = next;
        self.record_position();

        Ok(AppliedMove {
            san,
            uci: mv.to_string(),
        })
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(square.to_shakmaty())
            .map(shakmaty_to_piece)
    }

    fn turn(&self) -> PieceColor {
        color_from_shakmaty(self.position.turn())
    }

    fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn can_claim_fifty_moves(&self) -> bool {
        let clock = self.position.halfmoves();
        if clock >= 100 {
            return true;
        }
        // one more quiet move reaches the limit
        clock == 99
            && self
                .position
                .legal_moves()
                .iter()
                .any(|m| !m.is_capture() && m.role() != Role::Pawn)
    }

    fn can_claim_threefold_repetition(&self) -> bool {
        if self.occurrences(&self.position) >= 3 {
            return true;
        }
        // a move into a position already seen twice may be claimed in advance
        self.position.legal_moves().iter().any(|m| {
            self.position
                .clone()
                .play(m.clone())
                .map(|next| self.occurrences(&next) >= 2)
                .unwrap_or(false)
        })
    }

    fn reset(&mut self) {
        self.position = self.start.clone();
        self.history.clear();
        self.record_position();
    }
}
