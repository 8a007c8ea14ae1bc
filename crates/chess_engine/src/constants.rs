//! # Chess Engine Constants - Directions, Material Values & Draw Limits
//!
//! ## Direction Vectors
//!
//! Movement is expressed as `(d_rank, d_file)` offsets applied to a [`Square`](crate::Square)
//! rather than linear index arithmetic, so a step that would wrap around the board
//! edge simply yields no square. Rank deltas are negative toward White's opponent:
//! "north" (`-1, 0`) is the direction White's pawns advance.
//!
//! ## Centipawn Valuation
//!
//! Material is counted in centipawns for the heuristic move selector:
//!
//! - **Pawn**: 100
//! - **Knight**: 320
//! - **Bishop**: 330
//! - **Rook**: 500
//! - **Queen**: 900
//! - **King**: 0 (never captured, so it never contributes to a material balance)
//!
//! ## Draw Limits
//!
//! The fifty-move rule is counted in plies: a draw is declared once
//! [`FIFTY_MOVE_HALFMOVES`] plies have passed without a pawn move or capture.
//! Threefold repetition triggers at [`REPETITION_LIMIT`] occurrences of a position key.

/// Orthogonal ray directions (rook, queen)
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions (bishop, queen)
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight neighbours (king, queen)
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// L-shaped knight jumps
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_FILE: u8 = 4;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;

/// Files the king lands on when castling
pub const KINGSIDE_CASTLE_FILE: u8 = 6;
pub const QUEENSIDE_CASTLE_FILE: u8 = 2;

/// Files the rook lands on when castling
pub const KINGSIDE_ROOK_TARGET_FILE: u8 = 5;
pub const QUEENSIDE_ROOK_TARGET_FILE: u8 = 3;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 0;

/// Plies without a pawn move or capture before the fifty-move draw
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position key that end the game in a draw
pub const REPETITION_LIMIT: u32 = 3;
