pub mod game;

pub use game::{ClientMirror, GameError, GameMode, GameResult, LocalGame, SimpleAi};
