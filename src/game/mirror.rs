//! Client-side mirror of a networked game
//!
//! The server is authoritative. The mirror keeps the last confirmed state, built by
//! replaying `History` and extended by every `MoveMade`, and at most one
//! optimistic move played ahead of confirmation so the local board can update
//! immediately.
//!
//! ```text
//! propose ──► pending ──MoveMade (same move)──► confirmed
//!                │
//!                ├──MoveMade (other move)──► rolled back, server move applied
//!                └──MoveRejected──────────► rolled back
//! ```

use chess_engine::{GameState, Move, Square};
use shared::{GameMessage, MoveRecord, Seat};
use tracing::{debug, warn};

use crate::game::error::{GameError, GameResult};

#[derive(Debug, Clone)]
struct PendingMove {
    mv: Move,
    state: GameState,
}

#[derive(Debug, Clone)]
pub struct ClientMirror {
    seat: Seat,
    confirmed: GameState,
    pending: Option<PendingMove>,
}

impl ClientMirror {
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            confirmed: GameState::new(),
            pending: None,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Last state the server confirmed
    pub fn confirmed(&self) -> &GameState {
        &self.confirmed
    }

    /// State to display: the optimistic one while a move is pending
    pub fn view(&self) -> &GameState {
        self.pending
            .as_ref()
            .map_or(&self.confirmed, |pending| &pending.state)
    }

    pub fn pending_move(&self) -> Option<Move> {
        self.pending.as_ref().map(|pending| pending.mv)
    }

    /// Whether the local seat may propose a move right now
    pub fn is_my_turn(&self) -> bool {
        self.pending.is_none()
            && !self.confirmed.is_over()
            && self.seat.color() == Some(self.confirmed.turn())
    }

    /// Legal destinations for move hints; empty when it is not our move
    pub fn hints(&self, from: Square) -> Vec<Square> {
        if !self.is_my_turn() {
            return Vec::new();
        }
        self.confirmed.legal_moves(from)
    }

    /// Replaces the confirmed state with a replay of the server's log
    pub fn rehydrate(&mut self, moves: &[MoveRecord]) -> GameResult<()> {
        self.confirmed = GameState::replay(moves.iter().map(MoveRecord::to_move))?;
        self.pending = None;
        debug!("[CLIENT] Mirror rehydrated at ply {}", self.confirmed.ply());
        Ok(())
    }

    /// Plays a move optimistically and returns the message to send
    pub fn propose(&mut self, from: Square, to: Square) -> GameResult<GameMessage> {
        if self.confirmed.is_over() {
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            return Err(GameError::MovePending);
        }
        if self.seat.color() != Some(self.confirmed.turn()) {
            return Err(GameError::NotYourTurn {
                to_move: self.confirmed.turn(),
            });
        }

        let mut state = self.confirmed.clone();
        let mv = Move::new(from, to);
        let played = state
            .play(mv)
            .map_err(|source| GameError::Illegal { mv, source })?;

        self.pending = Some(PendingMove {
            mv: played.mv,
            state,
        });
        Ok(GameMessage::SubmitMove {
            from,
            to,
            promotion: played.mv.promotion,
        })
    }

    /// Applies a move confirmed by the server
    ///
    /// A matching pending move is promoted to confirmed; any other pending move is
    /// discarded. Records already applied are ignored.
    pub fn on_move_made(&mut self, record: &MoveRecord) -> GameResult<()> {
        let applied = self.confirmed.ply() as u32;
        if record.ply <= applied {
            return Ok(());
        }
        if record.ply != applied + 1 {
            return Err(GameError::OutOfOrder {
                expected: applied + 1,
                got: record.ply,
            });
        }

        let mv = record.to_move();
        match self.pending.take() {
            Some(pending) if pending.mv == mv => {
                self.confirmed = pending.state;
            }
            other => {
                if let Some(pending) = other {
                    warn!("[CLIENT] Dropping optimistic {} for server move {}", pending.mv, mv);
                }
                self.confirmed
                    .play(mv)
                    .map_err(|source| GameError::Illegal { mv, source })?;
            }
        }
        Ok(())
    }

    /// Rolls back the pending move, returning it
    pub fn on_move_rejected(&mut self) -> Option<Move> {
        self.pending.take().map(|pending| pending.mv)
    }

    /// Feeds one server game message into the mirror
    pub fn apply(&mut self, msg: &GameMessage) -> GameResult<()> {
        match msg {
            GameMessage::History { moves } => self.rehydrate(moves),
            GameMessage::MoveMade { record, .. } => self.on_move_made(record),
            GameMessage::MoveRejected { .. } => {
                self.on_move_rejected();
                Ok(())
            }
            GameMessage::GameOver { .. } | GameMessage::SubmitMove { .. } => Ok(()),
        }
    }
}
