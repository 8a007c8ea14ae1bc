//! Local games at one terminal
//!
//! [`LocalGame`] drives a [`GameState`] directly: humans submit move text, the AI
//! is asked for a move whenever [`GameMode`] says it has the turn.

use chess_engine::{Color, GameState, Move, Outcome, PlayedMove};
use tracing::info;

use crate::game::ai::{GameMode, SimpleAi};
use crate::game::error::{GameError, GameResult};

pub struct LocalGame {
    state: GameState,
    mode: GameMode,
    ai: SimpleAi,
}

impl LocalGame {
    pub fn new(mode: GameMode, ai: SimpleAi) -> Self {
        Self {
            state: GameState::new(),
            mode,
            ai,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Whether the side to move is played by the AI
    pub fn ai_to_move(&self) -> bool {
        !self.state.is_over() && self.mode.ai_moves_for(self.state.turn())
    }

    /// Plays a human move given in long algebraic form (`e2e4`, `e7e8q`)
    pub fn submit_text(&mut self, text: &str) -> GameResult<PlayedMove> {
        let mv: Move = text.trim().parse().map_err(|e| GameError::InvalidMove {
            message: format!("{e}"),
        })?;
        self.submit(mv)
    }

    pub fn submit(&mut self, mv: Move) -> GameResult<PlayedMove> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        if self.ai_to_move() {
            return Err(GameError::NotYourTurn {
                to_move: self.state.turn(),
            });
        }
        self.play(mv)
    }

    /// Lets the AI move if it has the turn
    pub fn ai_turn(&mut self) -> GameResult<Option<PlayedMove>> {
        if !self.ai_to_move() {
            return Ok(None);
        }
        match self.ai.choose(&self.state) {
            Some(mv) => self.play(mv).map(Some),
            None => Ok(None),
        }
    }

    fn play(&mut self, mv: Move) -> GameResult<PlayedMove> {
        let played = self
            .state
            .play(mv)
            .map_err(|source| GameError::Illegal { mv, source })?;
        if let Some(outcome) = self.state.outcome() {
            info!("[LOCAL] Game over after {} plies: {}", self.state.ply(), outcome.message());
        }
        Ok(played)
    }

    /// SAN move list with move numbers, `1. e4 e5 2. Nf3`
    pub fn move_list(&self) -> String {
        format_move_list(self.state.history().iter().map(|p| p.san.as_str()))
    }

    pub fn turn(&self) -> Color {
        self.state.turn()
    }
}

pub fn format_move_list<'a>(sans: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (index, san) in sans.into_iter().enumerate() {
        if index % 2 == 0 {
            if index > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{}. ", index / 2 + 1));
        } else {
            out.push(' ');
        }
        out.push_str(san);
    }
    out
}
