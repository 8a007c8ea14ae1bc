//! Legality filter
//!
//! Every pseudo-legal destination is applied to a scratch copy of the board and kept
//! only if the mover's king is not attacked afterwards. Castling additionally
//! requires that the king's start and transit squares are not attacked. Attacks are
//! recomputed from scratch on each scratch board; at 64 squares that is cheap.

use super::attack::{is_in_check, is_square_attacked};
use super::king::is_castling_move;
use super::pseudo_legal_moves;
use crate::api::moves::apply_move;
use crate::board::Board;
use crate::types::*;

/// Legal destinations for the piece on `from`
///
/// Returns an empty list when `from` is empty or holds a piece that is not `color`.
/// Never mutates `board`.
///
/// # Arguments
///
/// * `board` - Current position
/// * `from` - Square of the piece to move
/// * `color` - Side to move
/// * `en_passant` - Current en passant target square
///
/// # Examples
///
/// ```rust,ignore
/// let hints = legal_moves(&Board::initial(), sq("e2"), Color::White, None);
/// assert_eq!(hints, vec![sq("e3"), sq("e4")]);
/// ```
pub fn legal_moves(board: &Board, from: Square, color: Color, en_passant: Option<Square>) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    if piece.color != color {
        return Vec::new();
    }

    pseudo_legal_moves(board, from, en_passant)
        .into_iter()
        .filter(|&to| keeps_king_safe(board, piece, Move::new(from, to), en_passant))
        .collect()
}

/// Every legal move for `color`, pawns reaching the last rank promoting to a queen
pub fn all_legal_moves(board: &Board, color: Color, en_passant: Option<Square>) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces_of(color) {
        for to in legal_moves(board, from, color, en_passant) {
            if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                moves.push(Move::with_promotion(from, to, PieceKind::Queen));
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

fn keeps_king_safe(board: &Board, piece: Piece, mv: Move, en_passant: Option<Square>) -> bool {
    let opponent = piece.color.opposite();

    if is_castling_move(piece, mv.from, mv.to) {
        let transit = Square::new(mv.from.rank(), (mv.from.file() + mv.to.file()) / 2);
        if is_square_attacked(board, mv.from, opponent)
            || transit.is_some_and(|square| is_square_attacked(board, square, opponent))
        {
            return false;
        }
    }

    let (next, _) = apply_move(board, mv, en_passant);
    !is_in_check(&next, piece.color)
}
