//! # Chess Engine - Rules Core
//!
//! Pure, synchronous chess rules shared by the authoritative server and the
//! optimistic client mirror. Every call takes an explicit board or state value and
//! returns a new value, so the engine can be used from any number of sessions
//! concurrently without locking.
//!
//! ## Layers
//!
//! 1. [`board`] and [`types`] - the 64-square board value and piece metadata
//! 2. [`move_gen`] - pseudo-legal destinations per piece, attack detection and the
//!    legality filter
//! 3. [`api::moves`] - pure move application returning [`MoveAnnotations`]
//! 4. [`api::state`] - check, mate, stalemate and draw adjudication
//! 5. [`notation`] and [`hash`] - SAN rendering and the repetition position key
//! 6. [`api::game`] - [`GameState`], the per-match rules state with replay
//!
//! ## Example
//!
//! ```rust,ignore
//! use chess_engine::{GameState, Move};
//!
//! let mut game = GameState::new();
//! let played = game.play("e2e4".parse::<Move>()?)?;
//! assert_eq!(played.san, "e4");
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod move_gen;
pub mod notation;
pub mod types;


pub use api::game::{GameState, PlayedMove};
pub use api::moves::apply_move;
pub use api::state::{
    evaluate_outcome, has_any_legal_move, insufficient_material, is_check, is_checkmate,
    is_stalemate,
};
pub use board::Board;
pub use error::{ChessEngineError, ChessEngineResult, MoveError};
pub use hash::{position_key, CastlingRights, PositionKey};
pub use move_gen::{all_legal_moves, legal_moves, pseudo_legal_moves};
pub use notation::move_to_san;
pub use types::{Color, DrawReason, Move, MoveAnnotations, Outcome, Piece, PieceKind, Square};
