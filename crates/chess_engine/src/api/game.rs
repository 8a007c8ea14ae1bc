//! Game lifecycle management
//!
//! [`GameState`] owns everything needed to adjudicate a match: the board, side to
//! move, en passant target, halfmove clock, repetition counts, the history of
//! played moves and the outcome once the game ends.
//!
//! ## Move pipeline
//!
//! [`GameState::play`] validates a move against the legal move set, resolves
//! promotion (pawns always become queens), renders SAN against the pre-move board,
//! applies the move and updates the derived counters, then evaluates terminal
//! conditions for the new side to move. All checks happen before the first field
//! is written, so a rejected move leaves the state exactly as it was.
//!
//! ## Replay
//!
//! The move history is the durable record. [`GameState::replay`] rebuilds a state
//! by playing a move list from the initial position; the result is identical to the
//! live state that produced the list.

use std::collections::HashMap;

use crate::api::moves::{apply_move, en_passant_target_after};
use crate::api::state::{evaluate_outcome, is_check};
use crate::board::Board;
use crate::error::{ChessEngineError, ChessEngineResult, MoveError};
use crate::hash::{position_key, PositionKey};
use crate::move_gen::{all_legal_moves, legal_moves};
use crate::notation::move_to_san;
use crate::types::*;

/// A move accepted by [`GameState::play`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    /// The move as applied, promotion resolved
    pub mv: Move,
    pub color: Color,
    pub san: String,
    pub annotations: MoveAnnotations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    repetitions: HashMap<PositionKey, u32>,
    history: Vec<PlayedMove>,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Standard starting position, White to move
    pub fn new() -> Self {
        Self::from_position(Board::initial(), Color::White, None)
    }

    /// Starts from an arbitrary position
    ///
    /// The position is counted once for repetition purposes and evaluated
    /// immediately, so a dead position starts out finished.
    pub fn from_position(board: Board, turn: Color, en_passant: Option<Square>) -> Self {
        let mut repetitions = HashMap::new();
        repetitions.insert(position_key(&board, turn, en_passant), 1);
        let outcome = evaluate_outcome(&board, turn, en_passant, 0, 1);
        Self {
            board,
            turn,
            en_passant,
            halfmove_clock: 0,
            repetitions,
            history: Vec::new(),
            outcome,
        }
    }

    /// Rebuilds a game by playing `moves` from the initial position
    ///
    /// # Errors
    ///
    /// Returns [`ChessEngineError::ReplayRejected`] with the 1-based ply of the first
    /// move that is not legal where it occurs.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let moves: Vec<Move> = ["f2f3", "e7e5", "g2g4", "d8h4"]
    ///     .iter()
    ///     .map(|m| m.parse().unwrap())
    ///     .collect();
    /// let game = GameState::replay(moves)?;
    /// assert_eq!(game.outcome(), Some(Outcome::Winner(Color::Black)));
    /// ```
    pub fn replay(moves: impl IntoIterator<Item = Move>) -> ChessEngineResult<Self> {
        let mut game = Self::new();
        for (index, mv) in moves.into_iter().enumerate() {
            game.play(mv)
                .map_err(|reason| ChessEngineError::ReplayRejected {
                    ply: index + 1,
                    reason,
                })?;
        }
        Ok(game)
    }

    /// Validates and plays a move for the side to move
    ///
    /// A pawn reaching the last rank always promotes to a queen; any other
    /// promotion request is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] describing why the move is not legal. The state is
    /// unchanged in that case.
    pub fn play(&mut self, mv: Move) -> Result<PlayedMove, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .get(mv.from)
            .ok_or(MoveError::NoPiece { square: mv.from })?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourPiece {
                square: mv.from,
                owner: piece.color,
            });
        }
        if !legal_moves(&self.board, mv.from, self.turn, self.en_passant).contains(&mv.to) {
            return Err(MoveError::Unreachable {
                from: mv.from,
                to: mv.to,
            });
        }

        let mv = resolve_promotion(piece, mv);
        let san = move_to_san(&self.board, mv, self.turn, self.en_passant);
        let (board, annotations) = apply_move(&self.board, mv, self.en_passant);

        let mover = self.turn;
        let turn = mover.opposite();
        let en_passant = en_passant_target_after(piece, mv);
        let halfmove_clock = if piece.kind == PieceKind::Pawn || annotations.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };

        let count = self
            .repetitions
            .entry(position_key(&board, turn, en_passant))
            .or_insert(0);
        *count += 1;
        let repetitions = *count;

        self.outcome = evaluate_outcome(&board, turn, en_passant, halfmove_clock, repetitions);
        self.board = board;
        self.turn = turn;
        self.en_passant = en_passant;
        self.halfmove_clock = halfmove_clock;

        let played = PlayedMove {
            mv,
            color: mover,
            san,
            annotations,
        };
        self.history.push(played.clone());
        Ok(played)
    }

    /// Legal destinations from `from` for the side to move
    ///
    /// Empty once the game is over or when `from` does not hold a piece of the
    /// side to move.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        legal_moves(&self.board, from, self.turn, self.en_passant)
    }

    /// Every legal move for the side to move
    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        all_legal_moves(&self.board, self.turn, self.en_passant)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Number of plies played
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.history.last()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether the side to move is in check
    pub fn is_check(&self) -> bool {
        is_check(&self.board, self.turn)
    }

    pub fn position_key(&self) -> PositionKey {
        position_key(&self.board, self.turn, self.en_passant)
    }

    pub fn repetition_count(&self, key: &PositionKey) -> u32 {
        self.repetitions.get(key).copied().unwrap_or(0)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pawns reaching the last rank become queens; other moves carry no promotion
fn resolve_promotion(piece: Piece, mv: Move) -> Move {
    let promotes = piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank();
    Move {
        promotion: promotes.then_some(PieceKind::Queen),
        ..mv
    }
}
