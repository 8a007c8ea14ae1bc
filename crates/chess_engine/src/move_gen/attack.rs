//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//!
//! ## Algorithm
//!
//! Instead of generating every opposing move, we look outward from the target square:
//! pawn and knight and king patterns are checked directly, and each of the eight rays
//! is followed to its first blocker, which attacks the square if it is a slider of
//! the right kind. Castling and pawn pushes never attack, so this agrees with "the
//! opponent's pseudo-legal moves include the king square" for any occupied square.

use super::sliding::first_blocker;
use crate::board::Board;
use crate::constants::*;
use crate::types::*;

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `board` - Position to inspect
/// * `square` - Target square
/// * `by_color` - Color of the pieces that might attack
///
/// # Returns
///
/// `true` if the square is attacked by any piece of `by_color`
///
/// # Examples
///
/// ```rust,ignore
/// // f3 is covered by the g1 knight and the e2/g2 pawns
/// assert!(is_square_attacked(&Board::initial(), sq("f3"), Color::White));
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    let is = |target: Option<Square>, kind: PieceKind| {
        target
            .and_then(|s| board.get(s))
            .is_some_and(|p| p.color == by_color && p.kind == kind)
    };

    // A pawn attacks one rank forward, so look one rank backward from the target
    let back = -by_color.pawn_direction();
    if is(square.offset(back, -1), PieceKind::Pawn) || is(square.offset(back, 1), PieceKind::Pawn) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, df)| is(square.offset(dr, df), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, df)| is(square.offset(dr, df), PieceKind::King))
    {
        return true;
    }

    let slider_hits = |directions: &[(i8, i8)], kind: PieceKind| {
        directions.iter().any(|&dir| {
            first_blocker(board, square, dir).is_some_and(|(_, p)| {
                p.color == by_color && (p.kind == kind || p.kind == PieceKind::Queen)
            })
        })
    };

    slider_hits(&ROOK_DIRECTIONS[..], PieceKind::Rook)
        || slider_hits(&BISHOP_DIRECTIONS[..], PieceKind::Bishop)
}

/// Check if the king of the given color is in check
///
/// A board without a king of `color` is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}
