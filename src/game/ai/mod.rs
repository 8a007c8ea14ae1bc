//! Chess AI opponent
//!
//! A shallow opponent built only on the public engine API: it enumerates the
//! legal moves, plays each on a copy of the game and looks at every reply.
//!
//! # Game Modes
//!
//! - **VsHuman**: two humans at one terminal
//! - **VsAi**: one human against [`SimpleAi`] playing `ai_color`
//! - **SelfPlay**: [`SimpleAi`] on both sides

pub mod simple;

pub use simple::SimpleAi;

use chess_engine::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    VsHuman,
    VsAi { ai_color: Color },
    SelfPlay,
}

impl GameMode {
    /// Whether the AI moves for `color` in this mode
    pub fn ai_moves_for(self, color: Color) -> bool {
        match self {
            GameMode::VsHuman => false,
            GameMode::VsAi { ai_color } => ai_color == color,
            GameMode::SelfPlay => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_moves_for() {
        assert!(!GameMode::VsHuman.ai_moves_for(Color::White));
        let mode = GameMode::VsAi {
            ai_color: Color::Black,
        };
        assert!(mode.ai_moves_for(Color::Black));
        assert!(!mode.ai_moves_for(Color::White));
        assert!(GameMode::SelfPlay.ai_moves_for(Color::White));
    }
}
