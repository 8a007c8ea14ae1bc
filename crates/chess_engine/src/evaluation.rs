//! Material evaluation
//!
//! Counts piece values in centipawns. Positive scores favor the side passed as
//! `perspective`. Used by the heuristic move selector; the rules never depend on it.

use crate::board::Board;
use crate::constants::*;
use crate::types::*;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Material balance from `perspective`'s point of view
pub fn evaluate_material(board: &Board, perspective: Color) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece_value(piece.kind);
            if piece.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_material_balance() {
        let score = evaluate_material(&Board::initial(), Color::White);
        assert_eq!(score, 0, "Starting position should have 0 material balance");
    }

    #[test]
    fn test_white_up_queen() {
        let board = Board::initial().with_piece("d8".parse().unwrap(), None);
        assert_eq!(evaluate_material(&board, Color::White), QUEEN_VALUE);
        assert_eq!(evaluate_material(&board, Color::Black), -QUEEN_VALUE);
    }

    #[test]
    fn test_black_up_pawn() {
        let board = Board::initial().with_piece("e2".parse().unwrap(), None);
        assert_eq!(
            evaluate_material(&board, Color::White),
            -PAWN_VALUE,
            "Score should be exactly negative pawn value"
        );
    }
}
