//! Move generation
//!
//! Two levels of move enumeration:
//!
//! - [`pseudo_legal_moves`] obeys piece movement rules (including castling, en passant
//!   and double pawn pushes) but ignores whether the mover's king is left attacked.
//! - [`legal_moves`] filters those destinations by simulating each one on a scratch
//!   board and rejecting any that leave the mover's king attacked.
//!
//! Attack detection ([`attack`]) works from attack patterns rather than from the
//! pseudo-legal generator, so it never recurses into castling and never counts a
//! forward pawn push as an attack.

pub mod attack;
pub mod king;
pub mod knight;
pub mod legal;
pub mod pawn;
pub mod sliding;

pub use attack::{is_in_check, is_square_attacked};
pub use legal::{all_legal_moves, legal_moves};

use crate::board::Board;
use crate::constants::*;
use crate::types::*;

/// Pseudo-legal destinations for the piece on `from`
///
/// Returns an empty list for an empty square.
///
/// # Arguments
///
/// * `board` - Position to generate on
/// * `from` - Square of the moving piece
/// * `en_passant` - Square skipped by the previous double push, if any
///
/// # Examples
///
/// ```rust,ignore
/// let targets = pseudo_legal_moves(&Board::initial(), sq("g1"), None);
/// assert_eq!(targets.len(), 2); // f3, h3
/// ```
pub fn pseudo_legal_moves(board: &Board, from: Square, en_passant: Option<Square>) -> Vec<Square> {
    let mut moves = Vec::new();
    let Some(piece) = board.get(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => pawn::generate_pawn_moves(board, from, piece.color, en_passant, &mut moves),
        PieceKind::Knight => knight::generate_knight_moves(board, from, piece.color, &mut moves),
        PieceKind::Bishop => {
            sliding::generate_sliding_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves)
        }
        PieceKind::Rook => {
            sliding::generate_sliding_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves)
        }
        PieceKind::Queen => {
            sliding::generate_sliding_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves);
            sliding::generate_sliding_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves);
        }
        PieceKind::King => king::generate_king_moves(board, from, piece, &mut moves),
    }

    moves
}

/// Shared occupancy rule for stepping pieces: empty or enemy-occupied
#[inline]
pub(crate) fn can_land_on(board: &Board, to: Square, color: Color) -> bool {
    board.get(to).map_or(true, |occupant| occupant.color != color)
}
