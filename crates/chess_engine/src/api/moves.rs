//! Move execution
//!
//! [`apply_move`] is a pure function: it copies the board, performs the move on the
//! copy and reports what it inferred (castle, en passant, capture, promotion) in a
//! [`MoveAnnotations`] value. The legality filter calls it speculatively for every
//! candidate, so it must never touch its input.

use crate::board::Board;
use crate::move_gen::king::{castling_rook_squares, is_castling_move};
use crate::move_gen::pawn::passed_pawn_square;
use crate::types::*;

/// Apply a move to a copy of the board
///
/// Steps, in order: clear the origin; relocate the rook of a castle (marking it
/// moved); remove the passed pawn of an en passant capture; override the kind if a
/// promotion is given; mark the piece moved and place it on the destination.
///
/// # Arguments
///
/// * `board` - Position before the move
/// * `mv` - The move; only `from`, `to` and `promotion` are read
/// * `en_passant` - En passant target square before the move
///
/// # Returns
///
/// The new board and the annotations inferred while applying. A move whose `from`
/// square is empty returns the board unchanged; callers are expected to validate
/// moves with [`legal_moves`](crate::legal_moves) first.
///
/// # Examples
///
/// ```rust,ignore
/// let (next, notes) = apply_move(&board, Move::new(sq("e1"), sq("g1")), None);
/// assert!(notes.is_castle);
/// ```
pub fn apply_move(board: &Board, mv: Move, en_passant: Option<Square>) -> (Board, MoveAnnotations) {
    debug_assert!(
        board.get(mv.from).is_some(),
        "apply_move called with no piece on {}",
        mv.from
    );
    let Some(piece) = board.get(mv.from) else {
        return (*board, MoveAnnotations::default());
    };

    let mut next = *board;
    let mut notes = MoveAnnotations {
        captured: board.get(mv.to),
        ..MoveAnnotations::default()
    };

    next.set(mv.from, None);

    if is_castling_move(piece, mv.from, mv.to) {
        if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to) {
            if let Some(rook) = next.get(rook_from) {
                next.set(rook_from, None);
                next.set(
                    rook_to,
                    Some(Piece {
                        has_moved: true,
                        ..rook
                    }),
                );
                notes.is_castle = true;
            }
        }
    }

    let diagonal_pawn_step = piece.kind == PieceKind::Pawn && mv.from.file() != mv.to.file();
    if diagonal_pawn_step && board.is_empty(mv.to) && en_passant == Some(mv.to) {
        if let Some(victim) = passed_pawn_square(mv.to, piece.color) {
            notes.captured = next.get(victim);
            notes.is_en_passant = true;
            next.set(victim, None);
        }
    }

    let mut moved = Piece {
        has_moved: true,
        ..piece
    };
    if let Some(kind) = mv.promotion {
        moved.kind = kind;
        notes.promoted = Some(kind);
    }
    next.set(mv.to, Some(moved));

    (next, notes)
}

/// En passant target square created by `mv`, if it is a pawn double push
pub fn en_passant_target_after(piece: Piece, mv: Move) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || mv.from.file() != mv.to.file() {
        return None;
    }
    if mv.from.rank().abs_diff(mv.to.rank()) != 2 {
        return None;
    }
    Square::new((mv.from.rank() + mv.to.rank()) / 2, mv.from.file())
}
