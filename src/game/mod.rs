//! Client-side game logic
//!
//! # Module Organization
//!
//! - `mirror` - optimistic mirror of a networked game, reconciled with the server
//! - `local` - games played at one terminal, human or AI on either side
//! - `ai` - the one-reply-deep opponent and game modes
//! - `error` - [`GameError`]
//!
//! All rules come from `chess_engine`; nothing here decides legality on its own.

pub mod ai;
pub mod error;
pub mod local;
pub mod mirror;

pub use ai::{GameMode, SimpleAi};
pub use error::{GameError, GameResult};
pub use local::LocalGame;
pub use mirror::ClientMirror;
