//! Bitboard set operations and lazy square iteration.
//!
//! Square `i` (`0 == A1`, `7 == H1`, `63 == H8`) maps to bit `i`. Bitboards are
//! plain `u64` values, so every operation here takes and returns by value.

use std::iter::FusedIterator;

use crate::bitboard::bit_scan::lowest_set_square;
use crate::game_state::chess_types::Square;

pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;
pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = 0x8080_8080_8080_8080;
pub const RANK_1: Bitboard = 0x0000_0000_0000_00FF;
/// A1..H8.
pub const DIAG_A1H8: Bitboard = 0x8040_2010_0804_0201;

#[inline]
pub const fn square_bitboard(square: Square) -> Bitboard {
    1u64 << square.index()
}

#[inline]
pub const fn is_empty(bb: Bitboard) -> bool {
    bb == EMPTY
}

#[inline]
pub const fn test_bit(bb: Bitboard, square: Square) -> bool {
    bb & square_bitboard(square) != 0
}

#[inline]
pub const fn set_bit(bb: Bitboard, square: Square) -> Bitboard {
    bb | square_bitboard(square)
}

#[inline]
pub const fn clear_bit(bb: Bitboard, square: Square) -> Bitboard {
    bb & !square_bitboard(square)
}

/// Iterate the set squares of `bb` from A1 towards H8.
///
/// The iterator owns a copy of the bitboard; the caller's value is untouched.
#[inline]
pub fn occupied_squares(bb: Bitboard) -> OccupiedSquares {
    OccupiedSquares { remaining: bb }
}

/// Finite, single-pass producer of the squares in a bitboard.
#[derive(Debug)]
pub struct OccupiedSquares {
    remaining: Bitboard,
}

impl Iterator for OccupiedSquares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.remaining == EMPTY {
            return None;
        }
        let square = lowest_set_square(self.remaining);
        self.remaining &= self.remaining - 1;
        Some(square)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for OccupiedSquares {}

impl FusedIterator for OccupiedSquares {}
