//! Turns a click on a destination into a move, and hands moves to the rules engine.

use tracing::error;

use crate::domain::rules::{AppliedMove, RulesEngine};
use crate::domain::{Move, PieceColor, PieceKind, SelectionState, Square};
use crate::error::{InputRejection, MatchError};

/// What a click on a legal destination means
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A complete move, ready to apply
    Move(Move),
    /// A pawn reaching its last rank; the promotion piece is still unknown
    RequiresPromotion {
        from: Square,
        to: Square,
        moving_color: PieceColor,
    },
}

/// Resolve a click on `target` while a piece is selected.
///
/// The target must be one of the selection's destinations.
pub fn resolve<R: RulesEngine + ?Sized>(
    rules: &R,
    selection: &SelectionState,
    target: Square,
) -> Result<Resolution, InputRejection> {
    let SelectionState::Selected {
        square,
        destinations,
    } = selection
    else {
        return Err(InputRejection::InvalidTarget(target));
    };

    if !destinations.contains(&target) {
        return Err(InputRejection::InvalidTarget(target));
    }

    let moving = rules
        .piece_at(*square)
        .ok_or(InputRejection::InvalidTarget(target))?;

    if moving.kind == PieceKind::Pawn && target.rank() == moving.color.last_rank() {
        return Ok(Resolution::RequiresPromotion {
            from: *square,
            to: target,
            moving_color: moving.color,
        });
    }

    Ok(Resolution::Move(Move::new(*square, target)))
}

/// Build the promotion move once the piece is chosen
pub fn complete_promotion(
    pending: &SelectionState,
    kind: PieceKind,
) -> Result<Move, InputRejection> {
    let SelectionState::AwaitingPromotion { from, to, .. } = pending else {
        return Err(InputRejection::InvalidPromotionChoice);
    };
    if !kind.is_promotion_choice() {
        return Err(InputRejection::InvalidPromotionChoice);
    }
    Ok(Move::with_promotion(*from, *to, kind))
}

/// Apply a move drawn from the legal set.
///
/// A refusal here means the cached legal set and the board disagree, which
/// is fatal for the match.
pub fn apply<R: RulesEngine + ?Sized>(rules: &mut R, mv: Move) -> Result<AppliedMove, MatchError> {
    rules.apply(&mv).map_err(|source| {
        error!(%mv, %source, "rules engine rejected a move from its own legal set");
        MatchError::RulesEngineInconsistency { mv, source }
    })
}
