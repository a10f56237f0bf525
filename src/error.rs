//! Error types for the match controller and its collaborators.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Move, Square};

/// Input the controller ignored, and why. State is unchanged when one of
/// these is reported.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InputRejection {
    /// Click on a square that is neither selectable nor a legal destination.
    #[error("{0} is not a valid target")]
    InvalidTarget(Square),

    /// Promotion input that is not queen/rook/bishop/knight, or no promotion pending.
    #[error("invalid promotion choice")]
    InvalidPromotionChoice,

    /// Click outside the board.
    #[error("click at ({x}, {y}) is off the board")]
    CoordinateOutOfBounds { x: f32, y: f32 },

    /// Board clicks wait until the promotion piece is chosen.
    #[error("waiting for a promotion choice")]
    PromotionPending,

    /// The game is over; only restart is accepted.
    #[error("game is over")]
    GameOver,

    /// Key with no meaning in the current state.
    #[error("key is not bound")]
    UnboundKey,
}

/// Errors reported by a rules engine.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Invalid FEN string.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Errors from the move log and its sinks.
#[derive(Debug, Error)]
pub enum MoveLogError {
    /// The sink failed to write or flush.
    #[error("log write failed: {0}")]
    Io(#[from] io::Error),

    /// Could not create the log file.
    #[error("cannot create log file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A result entry was already appended for this game.
    #[error("result already recorded")]
    ResultAlreadyRecorded,

    /// Moves cannot follow the result entry.
    #[error("move appended after the result entry")]
    MoveAfterResult,

    /// The writer thread is no longer accepting records.
    #[error("log writer thread is gone")]
    WriterGone,
}

/// Fatal errors surfaced by the controller's event dispatch.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The rules engine refused a move taken from its own legal set.
    #[error("rules engine rejected {mv}, which it reported as legal: {source}")]
    RulesEngineInconsistency {
        mv: Move,
        #[source]
        source: RulesError,
    },

    /// The match was aborted by an earlier fatal error; only restart is accepted.
    #[error("match aborted; restart required")]
    Aborted,
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
