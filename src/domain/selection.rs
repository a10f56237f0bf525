//! Selection state of the match - exactly one variant is active at a time.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{GameOutcome, PieceColor, Square};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing selected
    #[default]
    Idle,
    /// A piece of the side to move is selected, with its legal destinations
    Selected {
        square: Square,
        destinations: BTreeSet<Square>,
    },
    /// A pawn reached its last rank; waiting for the promotion piece
    AwaitingPromotion {
        from: Square,
        to: Square,
        moving_color: PieceColor,
    },
    /// Game over. Absorbing until restart.
    Terminal(GameOutcome),
}

impl SelectionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SelectionState::Terminal(_))
    }

    /// Square to highlight, if any
    pub fn selected_square(&self) -> Option<Square> {
        match self {
            SelectionState::Selected { square, .. } => Some(*square),
            SelectionState::AwaitingPromotion { from, .. } => Some(*from),
            _ => None,
        }
    }

    /// Destination markers to draw (empty unless a piece is selected)
    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        let set = match self {
            SelectionState::Selected { destinations, .. } => Some(destinations),
            _ => None,
        };
        set.into_iter().flatten().copied()
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        match self {
            SelectionState::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }
}
