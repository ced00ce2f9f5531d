//! Error taxonomy for the rule engine

use crate::grid::Hex;
use thiserror::Error;

/// All engine failures are local and synchronous: a returned error means the
/// state was left untouched. Illegal moves from a remote peer surface as
/// `IllegalMove` and are rejections, not crashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell ({}, {}) is outside the board or blocked", .0.q, .0.r)]
    InvalidCell(Hex),

    #[error("cell ({}, {}) is already occupied", .0.q, .0.r)]
    OccupiedCell(Hex),

    #[error("cell ({}, {}) holds no piece", .0.q, .0.r)]
    EmptyCell(Hex),

    #[error("illegal move from ({}, {}) to ({}, {})", from.q, from.r, to.q, to.r)]
    IllegalMove { from: Hex, to: Hex },

    #[error("match has already ended")]
    MatchOver,

    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),
}
