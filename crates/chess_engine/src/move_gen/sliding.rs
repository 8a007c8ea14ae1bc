//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens). Each ray is
//! followed until the board edge, a friendly piece (excluded) or an opposing piece
//! (included, the ray stops there). Queens cast both the diagonal and the
//! orthogonal rays.

use crate::board::Board;
use crate::types::*;

/// Generate moves along each of `directions` from `from`
///
/// # Arguments
///
/// * `board` - Current position
/// * `from` - Square of the sliding piece
/// * `color` - Color of the sliding piece
/// * `directions` - `(d_rank, d_file)` ray steps
/// * `moves` - Output vector to append destinations to
pub fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(dr, df) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, df) {
            match board.get(next) {
                None => moves.push(next),
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// First occupied square along a ray, if any
pub fn first_blocker(board: &Board, from: Square, (dr, df): (i8, i8)) -> Option<(Square, Piece)> {
    let mut current = from;
    while let Some(next) = current.offset(dr, df) {
        if let Some(piece) = board.get(next) {
            return Some((next, piece));
        }
        current = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_rook_on_empty_board_has_fourteen_moves() {
        let board = Board::from_pieces([(sq("d4"), Piece::new(PieceKind::Rook, Color::White))]);
        let mut moves = Vec::new();
        generate_sliding_moves(&board, sq("d4"), Color::White, &ROOK_DIRECTIONS, &mut moves);
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn test_ray_stops_at_capture_and_before_friend() {
        let board = Board::from_pieces([
            (sq("c1"), Piece::new(PieceKind::Bishop, Color::White)),
            (sq("e3"), Piece::new(PieceKind::Pawn, Color::Black)),
            (sq("b2"), Piece::new(PieceKind::Pawn, Color::White)),
        ]);
        let mut moves = Vec::new();
        generate_sliding_moves(&board, sq("c1"), Color::White, &BISHOP_DIRECTIONS, &mut moves);
        assert_eq!(moves, vec![sq("d2"), sq("e3")]);
    }

    #[test]
    fn test_first_blocker() {
        let board = Board::initial();
        let (square, piece) = first_blocker(&board, sq("e4"), (-1, 0)).unwrap();
        assert_eq!(square, sq("e7"));
        assert_eq!(piece.color, Color::Black);
        assert_eq!(first_blocker(&Board::empty(), sq("e4"), (1, 1)), None);
    }
}
