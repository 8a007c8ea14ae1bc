//! King move generation
//!
//! ## King Movement Rules
//!
//! - One square in any direction, onto an empty or opposing square
//! - Castling: an unmoved king on its home square moves two files toward an unmoved
//!   rook when every square strictly between them is empty
//!
//! ## Note on Castling
//!
//! Only the occupancy conditions are checked here. That the king's start and transit
//! squares are not attacked is enforced by the legality filter
//! ([`legal_moves`](crate::legal_moves)); the destination is covered by the
//! ordinary "king left in check" test.

use super::can_land_on;
use crate::board::Board;
use crate::constants::*;
use crate::types::*;

/// Generate king moves, including castling candidates
///
/// # Arguments
///
/// * `board` - Current position
/// * `from` - Square of the king
/// * `king` - The king itself (its `has_moved` flag gates castling)
/// * `moves` - Output vector to append destinations to
pub fn generate_king_moves(board: &Board, from: Square, king: Piece, moves: &mut Vec<Square>) {
    moves.extend(
        KING_OFFSETS
            .iter()
            .filter_map(|&(dr, df)| from.offset(dr, df))
            .filter(|&to| can_land_on(board, to, king.color)),
    );

    let home = king.color.home_rank();
    if king.has_moved || from.rank() != home || from.file() != KING_FILE {
        return;
    }

    if castling_path_clear(board, king.color, KINGSIDE_ROOK_FILE) {
        if let Some(to) = Square::new(home, KINGSIDE_CASTLE_FILE) {
            moves.push(to);
        }
    }
    if castling_path_clear(board, king.color, QUEENSIDE_ROOK_FILE) {
        if let Some(to) = Square::new(home, QUEENSIDE_CASTLE_FILE) {
            moves.push(to);
        }
    }
}

/// Both castling pieces unmoved and every square between them empty
pub fn castling_path_clear(board: &Board, color: Color, rook_file: u8) -> bool {
    if !board.has_castling_pieces(color, rook_file) {
        return false;
    }
    let (low, high) = if rook_file > KING_FILE {
        (KING_FILE + 1, rook_file)
    } else {
        (rook_file + 1, KING_FILE)
    };
    (low..high).all(|file| {
        Square::new(color.home_rank(), file).is_some_and(|square| board.is_empty(square))
    })
}

/// Whether a king move from `from` to `to` is a castle
pub fn is_castling_move(piece: Piece, from: Square, to: Square) -> bool {
    piece.kind == PieceKind::King && from.rank() == to.rank() && from.file().abs_diff(to.file()) == 2
}

/// Rook origin and destination for a castle landing the king on `king_to`
pub fn castling_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    let rank = king_to.rank();
    if king_to.file() == KINGSIDE_CASTLE_FILE {
        Some((
            Square::new(rank, KINGSIDE_ROOK_FILE)?,
            Square::new(rank, KINGSIDE_ROOK_TARGET_FILE)?,
        ))
    } else if king_to.file() == QUEENSIDE_CASTLE_FILE {
        Some((
            Square::new(rank, QUEENSIDE_ROOK_FILE)?,
            Square::new(rank, QUEENSIDE_ROOK_TARGET_FILE)?,
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn castling_board() -> Board {
        Board::from_pieces([
            (sq("e1"), Piece::new(PieceKind::King, Color::White)),
            (sq("a1"), Piece::new(PieceKind::Rook, Color::White)),
            (sq("h1"), Piece::new(PieceKind::Rook, Color::White)),
        ])
    }

    #[test]
    fn test_castling_candidates_with_clear_paths() {
        let board = castling_board();
        let king = board.get(sq("e1")).unwrap();
        let mut moves = Vec::new();
        generate_king_moves(&board, sq("e1"), king, &mut moves);
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
    }

    #[test]
    fn test_queenside_blocked_by_b_file_piece() {
        let board = castling_board().with_piece(sq("b1"), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert!(!castling_path_clear(&board, Color::White, QUEENSIDE_ROOK_FILE));
        assert!(castling_path_clear(&board, Color::White, KINGSIDE_ROOK_FILE));
    }

    #[test]
    fn test_moved_king_never_castles() {
        let board = castling_board().with_piece(sq("e1"), Some(Piece::moved(PieceKind::King, Color::White)));
        let king = board.get(sq("e1")).unwrap();
        let mut moves = Vec::new();
        generate_king_moves(&board, sq("e1"), king, &mut moves);
        assert!(!moves.contains(&sq("g1")));
        assert!(!moves.contains(&sq("c1")));
    }

    #[test]
    fn test_rook_squares_for_castles() {
        assert_eq!(castling_rook_squares(sq("g8")), Some((sq("h8"), sq("f8"))));
        assert_eq!(castling_rook_squares(sq("c1")), Some((sq("a1"), sq("d1"))));
        assert_eq!(castling_rook_squares(sq("e1")), None);
    }
}
