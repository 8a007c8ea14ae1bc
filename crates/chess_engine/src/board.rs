//! Board value type
//!
//! A [`Board`] is a fixed 64-element, rank-major array of optional pieces. It is
//! `Copy`: every move application produces a fresh value and nothing ever mutates
//! a board that another component can observe. Mutation helpers are crate-private
//! and only used on scratch copies inside [`apply_move`](crate::apply_move).

use std::fmt;

use crate::constants::*;
use crate::types::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Standard starting position
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                if let Some(square) = Square::new(color.home_rank(), file as u8) {
                    board.set(square, Some(Piece::new(*kind, color)));
                }
                if let Some(square) = Square::new(color.pawn_start_rank(), file as u8) {
                    board.set(square, Some(Piece::new(PieceKind::Pawn, color)));
                }
            }
        }
        board
    }

    /// Builds an arbitrary position
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let board = Board::from_pieces([
    ///     (sq("e1"), Piece::new(PieceKind::King, Color::White)),
    ///     (sq("e8"), Piece::new(PieceKind::King, Color::Black)),
    /// ]);
    /// ```
    pub fn from_pieces(pieces: impl IntoIterator<Item = (Square, Piece)>) -> Self {
        let mut board = Self::empty();
        for (square, piece) in pieces {
            board.set(square, Some(piece));
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Returns a copy with `square` replaced; the receiver is untouched
    pub fn with_piece(&self, square: Square, piece: Option<Piece>) -> Board {
        let mut next = *self;
        next.set(square, piece);
        next
    }

    /// Occupied squares in rank-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Whether `color`'s king sits unmoved on its home square beside an unmoved rook
    /// on `rook_file`. Emptiness and attack checks are left to move generation.
    pub fn has_castling_pieces(&self, color: Color, rook_file: u8) -> bool {
        let home = color.home_rank();
        let king_ok = Square::new(home, KING_FILE)
            .and_then(|square| self.get(square))
            .is_some_and(|p| p.kind == PieceKind::King && p.color == color && !p.has_moved);
        let rook_ok = Square::new(home, rook_file)
            .and_then(|square| self.get(square))
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
        king_ok && rook_ok
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// ASCII diagram, rank 8 at the top
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8u8 {
                let c = Square::new(rank, file)
                    .and_then(|square| self.get(square))
                    .map_or('.', |piece| piece.fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_initial_position_layout() {
        let board = Board::initial();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.get(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.get(sq("e7")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(board.is_empty(sq("e4")));
    }

    #[test]
    fn test_with_piece_leaves_original_untouched() {
        let board = Board::initial();
        let next = board.with_piece(sq("e2"), None);
        assert!(board.get(sq("e2")).is_some(), "Original board must not change");
        assert!(next.get(sq("e2")).is_none());
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn test_castling_pieces_lost_after_rook_moves() {
        let board = Board::initial();
        assert!(board.has_castling_pieces(Color::White, KINGSIDE_ROOK_FILE));
        let moved = board.with_piece(
            sq("h1"),
            Some(Piece::moved(PieceKind::Rook, Color::White)),
        );
        assert!(!moved.has_castling_pieces(Color::White, KINGSIDE_ROOK_FILE));
        assert!(moved.has_castling_pieces(Color::White, QUEENSIDE_ROOK_FILE));
    }

    #[test]
    fn test_display_diagram() {
        let text = Board::initial().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("a b c d e f g h"));
    }
}
