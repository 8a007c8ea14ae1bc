//! # Chess Engine Core Types
//!
//! ## Overview
//!
//! Value types shared by every layer of the engine. They are all small `Copy` values
//! so boards and moves can be passed around freely during speculative look-ahead
//! without any aliasing between the scratch copies and the authoritative position.
//!
//! ## Coordinates
//!
//! A [`Square`] is a `(rank, file)` pair with both components in `0..8`. Rank 0 is
//! the far (black) side of the board, so White's back rank is rank 7 and the square
//! `e2` is `(6, 4)`. Squares render as algebraic text (`e4`) and parse from it.
//!
//! ```text
//!   rank 0  a8 b8 c8 d8 e8 f8 g8 h8   <- black home rank
//!   rank 1  a7 ...                     <- black pawn start rank
//!   ...
//!   rank 6  a2 ...                     <- white pawn start rank
//!   rank 7  a1 b1 c1 d1 e1 f1 g1 h1   <- white home rank
//! ```
//!
//! ## Moves
//!
//! Callers only ever supply `from`, `to` and an optional promotion. Whether a move
//! is a castle or an en passant capture is inferred from the board at apply time and
//! reported back as [`MoveAnnotations`].

use std::fmt;
use std::str::FromStr;

use crate::error::ChessEngineError;

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a forward pawn step (White moves toward rank 0)
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Rank holding the king and rooks at the start of the game
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank the pawns start on; double pushes are only allowed from here
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Rank on which a pawn of this color promotes
    pub fn promotion_rank(self) -> u8 {
        self.opposite().home_rank()
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Letter used in SAN; pawns have none
    pub fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Uppercase FEN letter
    pub fn letter(self) -> char {
        self.san_letter().unwrap_or('P')
    }

    /// Parses a piece letter in either case
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

/// A piece on the board
///
/// `has_moved` flips to `true` the first time the piece is relocated, including a
/// rook moved implicitly by castling. It only gates castling; pawn double pushes
/// are derived from the starting rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// An unmoved piece
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    /// A piece that has already moved (no castling rights)
    pub const fn moved(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: true,
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn fen_char(&self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }
}

/// Board coordinate, rank 0 being the black side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Returns `None` when either component is outside `0..8`
    pub const fn new(rank: u8, file: u8) -> Option<Square> {
        if rank < 8 && file < 8 {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Rank-major index in `0..64`
    pub fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square {
                rank: (index / 8) as u8,
                file: (index % 8) as u8,
            })
        } else {
            None
        }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Square displaced by `(d_rank, d_file)`, or `None` off the board
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank as i8 + d_rank;
        let file = self.file as i8 + d_file;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Parity used for bishop square colors
    pub fn is_light(self) -> bool {
        (self.rank + self.file) % 2 == 0
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.rank) as char
    }

    /// Iterates all 64 squares in rank-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessEngineError::InvalidSquare {
            text: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Square::new(b'8' - rank, file - b'a').ok_or_else(invalid)
    }
}

impl From<Square> for String {
    fn from(square: Square) -> String {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ChessEngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A move as supplied by a caller
///
/// Special-move nature is never an input; see [`MoveAnnotations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Parses long algebraic text such as `e2e4` or `e7e8q`
impl FromStr for Move {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ChessEngineError::InvalidMoveText {
            text: s.to_string(),
        };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from: Square = text[0..2].parse().map_err(|_| invalid())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(PieceKind::Pawn) | Some(PieceKind::King) | None => return Err(invalid()),
                kind => kind,
            },
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// What move application inferred from the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAnnotations {
    pub is_castle: bool,
    pub is_en_passant: bool,
    /// Piece removed from the board, including a pawn taken en passant
    pub captured: Option<Piece>,
    /// Kind the moving pawn became, if it promoted
    pub promoted: Option<PieceKind>,
}

impl MoveAnnotations {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "the fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        })
    }
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Winner(Color),
    Draw(DrawReason),
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Winner(color) => Some(*color),
            Outcome::Draw(_) => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw(_))
    }

    pub fn draw_reason(&self) -> Option<DrawReason> {
        match self {
            Outcome::Winner(_) => None,
            Outcome::Draw(reason) => Some(*reason),
        }
    }

    /// Message shown when the game ends
    pub fn message(&self) -> String {
        match self {
            Outcome::Winner(color) => format!("Checkmate - {} wins", color),
            Outcome::Draw(reason) => format!("Draw by {}", reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_algebraic_round_trip() {
        let e2: Square = "e2".parse().unwrap();
        assert_eq!((e2.rank(), e2.file()), (6, 4));
        assert_eq!(e2.to_string(), "e2");

        let a8: Square = "a8".parse().unwrap();
        assert_eq!(a8.index(), 0);
        let h1: Square = "h1".parse().unwrap();
        assert_eq!(h1.index(), 63);
    }

    #[test]
    fn test_square_rejects_bad_text() {
        for text in ["", "e", "e9", "i1", "e22", "11"] {
            assert!(text.parse::<Square>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let a8: Square = "a8".parse().unwrap();
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(0, -1), None);
        assert_eq!(a8.offset(1, 1), Some("b7".parse().unwrap()));
    }

    #[test]
    fn test_move_parsing() {
        let mv: Move = "e7e8q".parse().unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.to_string(), "e7e8q");

        let plain: Move = "g1f3".parse().unwrap();
        assert_eq!(plain.promotion, None);

        assert!("e7e8k".parse::<Move>().is_err());
        assert!("e7".parse::<Move>().is_err());
    }

    #[test]
    fn test_color_geometry() {
        assert_eq!(Color::White.pawn_direction(), -1);
        assert_eq!(Color::White.promotion_rank(), 0);
        assert_eq!(Color::Black.promotion_rank(), 7);
        assert_eq!(Color::Black.pawn_start_rank(), 1);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Winner(Color::Black).message(), "Checkmate - Black wins");
        assert_eq!(
            Outcome::Draw(DrawReason::ThreefoldRepetition).message(),
            "Draw by threefold repetition"
        );
    }
}
