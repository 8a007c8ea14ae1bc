//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, onto an empty square
//! - **Double push**: two squares from the starting rank, both squares empty
//! - **Captures**: one square diagonally forward onto an opposing piece
//! - **En passant**: diagonally onto the empty en passant target square, taking the
//!   opposing pawn that sits beside the capturing pawn
//!
//! Promotion is not a generation concern; it is applied when the move is played.

use crate::board::Board;
use crate::types::*;

/// Generate pawn moves from a given square
///
/// # Arguments
///
/// * `board` - Current position
/// * `from` - Square of the pawn
/// * `color` - Color of the pawn
/// * `en_passant` - Current en passant target square
/// * `moves` - Output vector to append destinations to
pub fn generate_pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    moves: &mut Vec<Square>,
) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(one);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for d_file in [-1, 1] {
        let Some(to) = from.offset(dir, d_file) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color != color => moves.push(to),
            None if en_passant == Some(to) && has_passed_pawn(board, to, color) => moves.push(to),
            _ => {}
        }
    }
}

/// Square of the pawn taken by an en passant capture landing on `target`
pub fn passed_pawn_square(target: Square, color: Color) -> Option<Square> {
    target.offset(-color.pawn_direction(), 0)
}

fn has_passed_pawn(board: &Board, target: Square, color: Color) -> bool {
    passed_pawn_square(target, color)
        .and_then(|square| board.get(square))
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn pawn_moves(board: &Board, from: &str, ep: Option<Square>) -> Vec<Square> {
        let square = sq(from);
        let color = board.get(square).unwrap().color;
        let mut moves = Vec::new();
        generate_pawn_moves(board, square, color, ep, &mut moves);
        moves
    }

    #[test]
    fn test_double_push_only_from_start_rank() {
        let board = Board::initial();
        assert_eq!(pawn_moves(&board, "e2", None), vec![sq("e3"), sq("e4")]);

        let advanced = Board::from_pieces([(sq("e3"), Piece::moved(PieceKind::Pawn, Color::White))]);
        assert_eq!(pawn_moves(&advanced, "e3", None), vec![sq("e4")]);
    }

    #[test]
    fn test_blocked_pawn_cannot_jump() {
        let board = Board::initial().with_piece(sq("e3"), Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert!(pawn_moves(&board, "e2", None).is_empty());
    }

    #[test]
    fn test_black_pawn_captures_forward_diagonals() {
        let board = Board::from_pieces([
            (sq("d5"), Piece::moved(PieceKind::Pawn, Color::Black)),
            (sq("c4"), Piece::moved(PieceKind::Knight, Color::White)),
            (sq("e4"), Piece::moved(PieceKind::Pawn, Color::Black)),
        ]);
        let moves = pawn_moves(&board, "d5", None);
        assert!(moves.contains(&sq("c4")), "Capture of enemy knight expected");
        assert!(!moves.contains(&sq("e4")), "Own piece cannot be captured");
        assert!(moves.contains(&sq("d4")));
    }

    #[test]
    fn test_en_passant_requires_passed_pawn() {
        let board = Board::from_pieces([
            (sq("e5"), Piece::moved(PieceKind::Pawn, Color::White)),
            (sq("d5"), Piece::moved(PieceKind::Pawn, Color::Black)),
        ]);
        assert!(pawn_moves(&board, "e5", Some(sq("d6"))).contains(&sq("d6")));
        assert!(!pawn_moves(&board, "e5", Some(sq("f6"))).contains(&sq("f6")));
        assert!(!pawn_moves(&board, "e5", None).contains(&sq("d6")));
    }
}
