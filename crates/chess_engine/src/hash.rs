//! Position keys for repetition detection
//!
//! A [`PositionKey`] is a FEN-like string made of four fields:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -
//! ```
//!
//! piece placement, side to move, castling rights and the en passant square. The en
//! passant field is only filled when the side to move can actually capture en
//! passant, so a double push that nobody can answer does not make an otherwise
//! identical position look different.

use std::fmt;

use crate::board::Board;
use crate::constants::{KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::move_gen::legal_moves;
use crate::types::*;

/// Canonical encoding of a position for repetition counting
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionKey(String);

impl PositionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Castling rights derived from the `has_moved` flags of kings and rooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn from_board(board: &Board) -> Self {
        Self {
            white_kingside: board.has_castling_pieces(Color::White, KINGSIDE_ROOK_FILE),
            white_queenside: board.has_castling_pieces(Color::White, QUEENSIDE_ROOK_FILE),
            black_kingside: board.has_castling_pieces(Color::Black, KINGSIDE_ROOK_FILE),
            black_queenside: board.has_castling_pieces(Color::Black, QUEENSIDE_ROOK_FILE),
        }
    }
}

/// `KQkq` style, `-` when nobody may castle
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        let text: String = flags.iter().filter(|(on, _)| *on).map(|(_, c)| *c).collect();
        if text.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&text)
        }
    }
}

/// Piece placement field of the key, rank 8 first
pub fn placement(board: &Board) -> String {
    let mut rows = Vec::with_capacity(8);
    for rank in 0..8u8 {
        let mut row = String::new();
        let mut empty = 0;
        for file in 0..8u8 {
            match Square::new(rank, file).and_then(|square| board.get(square)) {
                Some(piece) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }
    rows.join("/")
}

/// Builds the repetition key for a position
///
/// # Arguments
///
/// * `board` - Piece placement
/// * `to_move` - Side to move
/// * `en_passant` - En passant target square left by the last move
pub fn position_key(board: &Board, to_move: Color, en_passant: Option<Square>) -> PositionKey {
    let side = match to_move {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let ep = capturable_en_passant(board, to_move, en_passant)
        .map_or_else(|| "-".to_string(), |square| square.to_string());

    PositionKey(format!(
        "{} {} {} {}",
        placement(board),
        side,
        CastlingRights::from_board(board),
        ep
    ))
}

fn capturable_en_passant(board: &Board, to_move: Color, en_passant: Option<Square>) -> Option<Square> {
    let target = en_passant?;
    let behind = -to_move.pawn_direction();
    let can_capture = [-1, 1].into_iter().any(|d_file| {
        target.offset(behind, d_file).is_some_and(|from| {
            board
                .get(from)
                .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == to_move)
                && legal_moves(board, from, to_move, en_passant).contains(&target)
        })
    });
    can_capture.then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::moves::apply_move;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_initial_position_key() {
        let key = position_key(&Board::initial(), Color::White, None);
        assert_eq!(
            key.as_str(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }

    #[test]
    fn test_uncapturable_en_passant_is_ignored() {
        let (board, _) = apply_move(&Board::initial(), Move::new(sq("e2"), sq("e4")), None);
        let with_ep = position_key(&board, Color::Black, Some(sq("e3")));
        let without = position_key(&board, Color::Black, None);
        assert_eq!(with_ep, without);
        assert!(with_ep.as_str().ends_with("b KQkq -"));
    }

    #[test]
    fn test_capturable_en_passant_is_recorded() {
        let board = Board::from_pieces([
            (sq("e1"), Piece::moved(PieceKind::King, Color::White)),
            (sq("e8"), Piece::moved(PieceKind::King, Color::Black)),
            (sq("e5"), Piece::moved(PieceKind::Pawn, Color::White)),
            (sq("d5"), Piece::moved(PieceKind::Pawn, Color::Black)),
        ]);
        let key = position_key(&board, Color::White, Some(sq("d6")));
        assert!(key.as_str().ends_with("w - d6"), "got {key}");
    }

    #[test]
    fn test_castling_rights_shrink_when_rook_moves() {
        let board = Board::initial().with_piece(sq("a8"), Some(Piece::moved(PieceKind::Rook, Color::Black)));
        assert_eq!(CastlingRights::from_board(&board).to_string(), "KQk");
    }
}
