//! Game state queries
//!
//! Check, checkmate and stalemate detection plus draw adjudication. After every
//! move the new side to move is evaluated in a fixed order, and only the first
//! condition that holds is reported:
//!
//! 1. checkmate (the side that just moved wins)
//! 2. stalemate
//! 3. insufficient material
//! 4. fifty-move rule
//! 5. threefold repetition

use crate::board::Board;
use crate::constants::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::move_gen::{is_in_check, legal_moves};
use crate::types::*;

/// Whether `color`'s king is attacked
pub fn is_check(board: &Board, color: Color) -> bool {
    is_in_check(board, color)
}

/// Whether any piece of `color` has a legal move
pub fn has_any_legal_move(board: &Board, color: Color, en_passant: Option<Square>) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(board, from, color, en_passant).is_empty())
}

pub fn is_checkmate(board: &Board, color: Color, en_passant: Option<Square>) -> bool {
    is_check(board, color) && !has_any_legal_move(board, color, en_passant)
}

pub fn is_stalemate(board: &Board, color: Color, en_passant: Option<Square>) -> bool {
    !is_check(board, color) && !has_any_legal_move(board, color, en_passant)
}

/// Neither side can possibly mate
///
/// True when only kings remain, when a single knight or bishop remains besides the
/// kings, or when exactly two bishops remain and they stand on squares of the same
/// color (whichever sides they belong to).
pub fn insufficient_material(board: &Board) -> bool {
    let others: Vec<(Square, Piece)> = board
        .pieces()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => true,
        [(_, piece)] => piece.kind.is_minor(),
        [(a, first), (b, second)] => {
            first.kind == PieceKind::Bishop
                && second.kind == PieceKind::Bishop
                && a.is_light() == b.is_light()
        }
        _ => false,
    }
}

/// Terminal outcome for the side to move, if any
///
/// # Arguments
///
/// * `board` - Position after the last move
/// * `to_move` - Side to move in that position
/// * `en_passant` - En passant target square in that position
/// * `halfmove_clock` - Plies since the last pawn move or capture
/// * `repetitions` - How often the current position key has occurred, this one included
pub fn evaluate_outcome(
    board: &Board,
    to_move: Color,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    repetitions: u32,
) -> Option<Outcome> {
    if !has_any_legal_move(board, to_move, en_passant) {
        return Some(if is_check(board, to_move) {
            Outcome::Winner(to_move.opposite())
        } else {
            Outcome::Draw(DrawReason::Stalemate)
        });
    }
    if insufficient_material(board) {
        return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
    }
    if halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
    }
    if repetitions >= REPETITION_LIMIT {
        return Some(Outcome::Draw(DrawReason::ThreefoldRepetition));
    }
    None
}
