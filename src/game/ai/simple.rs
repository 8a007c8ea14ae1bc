//! One-reply-deep move picker
//!
//! 1. A move that mates immediately is always taken.
//! 2. Otherwise every candidate is scored by the material balance, from the
//!    mover's side, after the opponent's best reply. Getting mated scores
//!    [`MATED_SCORE`]; a drawn position scores [`DRAW_SCORE`].
//! 3. Ties are broken at random.

use chess_engine::api::moves::en_passant_target_after;
use chess_engine::evaluation::evaluate_material;
use chess_engine::{
    all_legal_moves, apply_move, insufficient_material, is_checkmate, is_stalemate, Color,
    GameState, Move, Outcome,
};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::debug;

pub const MATED_SCORE: i32 = -100_000;
pub const DRAW_SCORE: i32 = 0;

pub struct SimpleAi {
    rng: StdRng,
}

impl SimpleAi {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic tie-breaking, for tests and reproducible self-play
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a move for the side to move, `None` once the game is over
    pub fn choose(&mut self, game: &GameState) -> Option<Move> {
        let mover = game.turn();
        let candidates = game.all_legal_moves();
        if candidates.is_empty() {
            return None;
        }

        let mut mates = Vec::new();
        let mut best = Vec::new();
        let mut best_score = i32::MIN;

        for mv in candidates {
            let mut after = game.clone();
            if after.play(mv).is_err() {
                continue;
            }
            if after.outcome() == Some(Outcome::Winner(mover)) {
                mates.push(mv);
                continue;
            }
            if !mates.is_empty() {
                continue;
            }

            let score = worst_case_after_reply(&after, mover);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(mv);
            } else if score == best_score {
                best.push(mv);
            }
        }

        if let Some(mv) = mates.choose(&mut self.rng).copied() {
            debug!("[AI] {} mates with {}", mover, mv);
            return Some(mv);
        }
        let choice = best.choose(&mut self.rng).copied();
        if let Some(mv) = choice {
            debug!(
                "[AI] {} plays {} (score {}, {} tied)",
                mover,
                mv,
                best_score,
                best.len()
            );
        }
        choice
    }
}

impl Default for SimpleAi {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowest score `mover` can be held to by any reply
///
/// Replies are simulated with the pure engine functions; repetition and the
/// fifty-move rule are not considered one ply ahead.
fn worst_case_after_reply(after: &GameState, mover: Color) -> i32 {
    if let Some(outcome) = after.outcome() {
        return score_outcome(outcome, mover);
    }

    let ep = after.en_passant();
    all_legal_moves(after.board(), after.turn(), ep)
        .into_iter()
        .map(|reply| {
            let (board, _) = apply_move(after.board(), reply, ep);
            let reply_ep = after
                .board()
                .get(reply.from)
                .and_then(|piece| en_passant_target_after(piece, reply));
            if is_checkmate(&board, mover, reply_ep) {
                MATED_SCORE
            } else if is_stalemate(&board, mover, reply_ep) || insufficient_material(&board) {
                DRAW_SCORE
            } else {
                evaluate_material(&board, mover)
            }
        })
        .min()
        .unwrap_or(DRAW_SCORE)
}

fn score_outcome(outcome: Outcome, mover: Color) -> i32 {
    match outcome.winner() {
        Some(winner) if winner == mover => -MATED_SCORE,
        Some(_) => MATED_SCORE,
        None => DRAW_SCORE,
    }
}
