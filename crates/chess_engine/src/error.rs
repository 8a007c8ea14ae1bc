//! Error types for chess engine
//!
//! [`ChessEngineError`] covers malformed input (text that is not a square or a move)
//! and replay of a move log that does not describe a legal game. [`MoveError`] is the
//! ordinary "not a legal move" answer from [`GameState::play`](crate::GameState::play);
//! it is a plain value describing why, never a fault.

use thiserror::Error;

use crate::types::{Color, Square};

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Text is not an algebraic square such as `e4`
    #[error("Invalid square: {text:?} (expected a file a-h followed by a rank 1-8)")]
    InvalidSquare { text: String },

    /// Text is not a long algebraic move such as `e2e4` or `e7e8q`
    #[error("Invalid move text: {text:?}")]
    InvalidMoveText { text: String },

    /// A move in a replayed log was not legal at its ply
    #[error("Move {ply} in log was rejected during replay: {reason}")]
    ReplayRejected { ply: usize, reason: MoveError },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;

/// Why a proposed move is not a member of the legal move set
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("no piece on {square}")]
    NoPiece { square: Square },

    #[error("the piece on {square} belongs to {owner}, not the side to move")]
    NotYourPiece { square: Square, owner: Color },

    #[error("{from} to {to} is not a legal move")]
    Unreachable { from: Square, to: Square },
}
