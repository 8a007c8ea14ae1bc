//! Error types for game module
//!
//! Covers move input on the client side, optimistic move bookkeeping and
//! reconciliation with the server's move log.

use chess_engine::{ChessEngineError, Color, Move, MoveError};

/// Errors that can occur in client-side game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Move text that does not parse
    #[error("Invalid move: {message}")]
    InvalidMove { message: String },

    /// The move is not legal in the current position
    #[error("Illegal move {mv}: {source}")]
    Illegal {
        mv: Move,
        #[source]
        source: MoveError,
    },

    /// The local seat does not have the move
    #[error("Not your turn: {to_move} to move")]
    NotYourTurn { to_move: Color },

    /// An optimistic move is still waiting for the server
    #[error("A move is already waiting for confirmation")]
    MovePending,

    #[error("Game is over")]
    GameOver,

    /// The server's move log does not replay from the initial position
    #[error("Server history rejected: {0}")]
    History(#[from] ChessEngineError),

    /// A confirmed move arrived with an unexpected ply number
    #[error("Out-of-order move: expected ply {expected}, got {got}")]
    OutOfOrder { expected: u32, got: u32 },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
