//! Public API for the chess engine
//!
//! ## Module Organization
//!
//! - `moves` - pure move application (`apply_move`)
//! - `state` - check, checkmate, stalemate and draw queries (`evaluate_outcome`)
//! - `game` - `GameState`, the per-match rules state (`play`, `replay`)

pub mod game;
pub mod moves;
pub mod state;
