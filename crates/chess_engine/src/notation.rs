//! Standard algebraic notation
//!
//! SAN is always rendered against the position *before* the move, because
//! disambiguation depends on which other pieces could reach the destination. The
//! move is then applied to decide the `+` / `#` suffix.
//!
//! ## Format
//!
//! ```text
//! O-O  O-O-O                 castling
//! Nbd7  R1e2  Qh4e1          piece letter + disambiguation + destination
//! exd5  Bxf7                 captures (pawns give their origin file)
//! e8=Q                       promotion
//! Qxf7#  Bb5+                mate and check suffixes
//! ```

use crate::api::moves::{apply_move, en_passant_target_after};
use crate::api::state::{has_any_legal_move, is_check};
use crate::board::Board;
use crate::move_gen::legal_moves;
use crate::types::*;

/// Render `mv`, played by `color`, as SAN
///
/// The move is assumed legal. A move from an empty square falls back to its long
/// algebraic form (`e2e4`).
///
/// # Arguments
///
/// * `board` - Position before the move
/// * `mv` - The move, with its promotion already resolved
/// * `color` - Side making the move
/// * `en_passant` - En passant target square before the move
///
/// # Examples
///
/// ```rust,ignore
/// let san = move_to_san(&Board::initial(), Move::new(sq("g1"), sq("f3")), Color::White, None);
/// assert_eq!(san, "Nf3");
/// ```
pub fn move_to_san(board: &Board, mv: Move, color: Color, en_passant: Option<Square>) -> String {
    let Some(piece) = board.get(mv.from) else {
        return mv.to_string();
    };
    let (next, notes) = apply_move(board, mv, en_passant);

    let mut san = String::new();
    if notes.is_castle {
        san.push_str(if mv.to.file() > mv.from.file() { "O-O" } else { "O-O-O" });
    } else {
        match piece.kind.san_letter() {
            None => {
                if notes.is_capture() {
                    san.push(mv.from.file_char());
                }
            }
            Some(letter) => {
                san.push(letter);
                san.push_str(&disambiguation(board, piece, mv, color, en_passant));
            }
        }
        if notes.is_capture() {
            san.push('x');
        }
        san.push_str(&mv.to.to_string());
        if let Some(kind) = notes.promoted {
            san.push('=');
            san.push(kind.letter());
        }
    }

    let opponent = color.opposite();
    if is_check(&next, opponent) {
        let next_ep = en_passant_target_after(piece, mv);
        san.push(if has_any_legal_move(&next, opponent, next_ep) { '+' } else { '#' });
    }
    san
}

/// File, rank or both of the origin when another piece of the same kind could
/// also legally reach the destination
fn disambiguation(board: &Board, piece: Piece, mv: Move, color: Color, en_passant: Option<Square>) -> String {
    let rivals: Vec<Square> = board
        .pieces_of(color)
        .filter(|(square, other)| *square != mv.from && other.kind == piece.kind)
        .filter(|(square, _)| legal_moves(board, *square, color, en_passant).contains(&mv.to))
        .map(|(square, _)| square)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let shares_file = rivals.iter().any(|s| s.file() == mv.from.file());
    let shares_rank = rivals.iter().any(|s| s.rank() == mv.from.rank());

    if !shares_file {
        mv.from.file_char().to_string()
    } else if !shares_rank {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn san(board: &Board, mv: &str, color: Color) -> String {
        move_to_san(board, mv.parse().unwrap(), color, None)
    }

    fn kings_and(extra: &[(&str, PieceKind, Color)]) -> Board {
        let mut pieces = vec![
            (sq("h1"), Piece::moved(PieceKind::King, Color::White)),
            (sq("h8"), Piece::moved(PieceKind::King, Color::Black)),
        ];
        pieces.extend(extra.iter().map(|&(s, k, c)| (sq(s), Piece::moved(k, c))));
        Board::from_pieces(pieces)
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::initial();
        assert_eq!(san(&board, "e2e4", Color::White), "e4");
        assert_eq!(san(&board, "g1f3", Color::White), "Nf3");
    }

    #[test]
    fn test_file_disambiguation() {
        let board = kings_and(&[
            ("b1", PieceKind::Knight, Color::White),
            ("f1", PieceKind::Knight, Color::White),
        ]);
        assert_eq!(san(&board, "b1d2", Color::White), "Nbd2");
    }

    #[test]
    fn test_rank_disambiguation() {
        let board = kings_and(&[
            ("a1", PieceKind::Rook, Color::White),
            ("a5", PieceKind::Rook, Color::White),
        ]);
        assert_eq!(san(&board, "a1a3", Color::White), "R1a3");
    }

    #[test]
    fn test_full_square_disambiguation() {
        let board = kings_and(&[
            ("e4", PieceKind::Queen, Color::White),
            ("e2", PieceKind::Queen, Color::White),
            ("c4", PieceKind::Queen, Color::White),
        ]);
        assert_eq!(san(&board, "e4d3", Color::White), "Qe4d3");
    }

    #[test]
    fn test_pawn_capture_and_promotion() {
        let board = kings_and(&[
            ("e4", PieceKind::Pawn, Color::White),
            ("d5", PieceKind::Pawn, Color::Black),
            ("b7", PieceKind::Pawn, Color::White),
        ]);
        assert_eq!(san(&board, "e4d5", Color::White), "exd5");
        assert_eq!(
            move_to_san(&board, Move::with_promotion(sq("b7"), sq("b8"), PieceKind::Queen), Color::White, None),
            "b8=Q+"
        );
    }

    #[test]
    fn test_castling_notation() {
        let board = Board::from_pieces([
            (sq("e1"), Piece::new(PieceKind::King, Color::White)),
            (sq("a1"), Piece::new(PieceKind::Rook, Color::White)),
            (sq("h1"), Piece::new(PieceKind::Rook, Color::White)),
            (sq("b6"), Piece::moved(PieceKind::King, Color::Black)),
        ]);
        assert_eq!(san(&board, "e1g1", Color::White), "O-O");
        assert_eq!(san(&board, "e1c1", Color::White), "O-O-O");
    }

    #[test]
    fn test_mate_suffix_wins_over_check() {
        let board = Board::from_pieces([
            (sq("g8"), Piece::moved(PieceKind::King, Color::Black)),
            (sq("f7"), Piece::moved(PieceKind::Pawn, Color::Black)),
            (sq("g7"), Piece::moved(PieceKind::Pawn, Color::Black)),
            (sq("h7"), Piece::moved(PieceKind::Pawn, Color::Black)),
            (sq("e1"), Piece::moved(PieceKind::Rook, Color::White)),
            (sq("g1"), Piece::moved(PieceKind::King, Color::White)),
        ]);
        assert_eq!(san(&board, "e1e8", Color::White), "Re8#");
    }
}
