//! Game termination - which condition ended the game and how it scores.

use std::fmt;

use serde::Serialize;

use crate::domain::PieceColor;
use crate::domain::rules::RulesEngine;

/// Result code as written in the move log
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResultCode {
    #[serde(rename = "1-0")]
    WhiteWins,
    #[serde(rename = "0-1")]
    BlackWins,
    #[serde(rename = "1/2-1/2")]
    Draw,
}

impl ResultCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::WhiteWins => "1-0",
            ResultCode::BlackWins => "0-1",
            ResultCode::Draw => "1/2-1/2",
        }
    }

    /// Decisive result in favour of `winner`
    pub fn win_for(winner: PieceColor) -> Self {
        match winner {
            PieceColor::White => ResultCode::WhiteWins,
            PieceColor::Black => ResultCode::BlackWins,
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal conditions, in evaluation priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoves,
    ThreefoldRepetition,
}

impl Termination {
    pub const PRIORITY: [Termination; 5] = [
        Termination::Checkmate,
        Termination::Stalemate,
        Termination::InsufficientMaterial,
        Termination::FiftyMoves,
        Termination::ThreefoldRepetition,
    ];

    /// Human-readable reason for the log and the result panel
    pub fn reason(self) -> &'static str {
        match self {
            Termination::Checkmate => "Checkmate",
            Termination::Stalemate => "Stalemate",
            Termination::InsufficientMaterial => "Insufficient material",
            Termination::FiftyMoves => "50-move rule (claimable)",
            Termination::ThreefoldRepetition => "Threefold repetition (claimable)",
        }
    }

    fn holds<R: RulesEngine + ?Sized>(self, rules: &R) -> bool {
        match self {
            Termination::Checkmate => rules.is_checkmate(),
            Termination::Stalemate => rules.is_stalemate(),
            Termination::InsufficientMaterial => rules.is_insufficient_material(),
            Termination::FiftyMoves => rules.can_claim_fifty_moves(),
            Termination::ThreefoldRepetition => rules.can_claim_threefold_repetition(),
        }
    }
}

/// How a finished game ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub termination: Termination,
    pub code: ResultCode,
    pub reason: String,
}

impl GameOutcome {
    pub fn new(termination: Termination, code: ResultCode) -> Self {
        Self {
            termination,
            code,
            reason: termination.reason().to_string(),
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.reason)
    }
}

/// Check the position after a move for a terminal condition.
///
/// Stops at the first condition that holds. On checkmate the side to move
/// is the one mated, so its opponent wins; every other condition is a draw.
pub fn evaluate<R: RulesEngine + ?Sized>(rules: &R) -> Option<GameOutcome> {
    let termination = Termination::PRIORITY
        .into_iter()
        .find(|t| t.holds(rules))?;

    let code = match termination {
        Termination::Checkmate => ResultCode::win_for(rules.turn().opposite()),
        _ => ResultCode::Draw,
    };
    Some(GameOutcome::new(termination, code))
}
