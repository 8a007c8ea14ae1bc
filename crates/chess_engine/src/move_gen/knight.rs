//! Knight move generation
//!
//! Knights jump to the eight L-shaped offsets regardless of intervening pieces.

use super::can_land_on;
use crate::board::Board;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::*;

pub fn generate_knight_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    moves.extend(
        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, df)| from.offset(dr, df))
            .filter(|&to| can_land_on(board, to, color)),
    );
}
