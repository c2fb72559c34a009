//! Constant-time bit scans and population count.
//!
//! Both scans isolate a single bit and hash it with a De Bruijn multiply, so
//! they cost one multiply and one table read regardless of the input.

use crate::bitboard::bitboard_ops::Bitboard;
use crate::game_state::chess_types::Square;

/// De Bruijn sequence B(2, 6); the top six bits of `bit * DEBRUIJN_64` are unique per bit.
pub const DEBRUIJN_64: u64 = 0x03F7_9D71_B4CB_0A89;

const DEBRUIJN_INDEX: [u8; 64] = [
    0, 1, 48, 2, 57, 49, 28, 3, //
    61, 58, 50, 42, 38, 29, 17, 4, //
    62, 55, 59, 36, 53, 51, 43, 22, //
    45, 39, 33, 30, 24, 18, 12, 5, //
    63, 47, 56, 27, 60, 41, 37, 16, //
    54, 35, 52, 21, 44, 32, 23, 11, //
    46, 26, 40, 15, 34, 20, 31, 10, //
    25, 14, 19, 9, 13, 8, 7, 6,
];

#[inline]
fn single_bit_index(single_bit: Bitboard) -> u8 {
    DEBRUIJN_INDEX[(single_bit.wrapping_mul(DEBRUIJN_64) >> 58) as usize]
}

/// Square of the least significant set bit.
///
/// The caller must guard against an empty bitboard; debug builds panic on it.
#[inline]
pub fn lowest_set_square(bb: Bitboard) -> Square {
    debug_assert!(bb != 0, "lowest_set_square called on an empty bitboard");
    Square::from_index_unchecked(single_bit_index(bb & bb.wrapping_neg()))
}

/// Square of the most significant set bit.
///
/// The caller must guard against an empty bitboard; debug builds panic on it.
#[inline]
pub fn highest_set_square(bb: Bitboard) -> Square {
    debug_assert!(bb != 0, "highest_set_square called on an empty bitboard");
    let mut filled = bb;
    filled |= filled >> 1;
    filled |= filled >> 2;
    filled |= filled >> 4;
    filled |= filled >> 8;
    filled |= filled >> 16;
    filled |= filled >> 32;
    Square::from_index_unchecked(single_bit_index(filled ^ (filled >> 1)))
}

#[inline]
pub fn pop_count(bb: Bitboard) -> u32 {
    bb.count_ones()
}
