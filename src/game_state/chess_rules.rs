//! Canonical chess-rule constants.
//!
//! Stores the standard starting layout, both as piece bitboards used by
//! `Position::initial_standard_setup` and as the equivalent FEN string.

use crate::bitboard::bitboard_ops::Bitboard;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// `[color][piece_kind]` bitboards of the standard starting position.
pub const STANDARD_SETUP: [[Bitboard; 6]; 2] = [
    [
        0x0000_0000_0000_FF00,
        0x0000_0000_0000_0042,
        0x0000_0000_0000_0024,
        0x0000_0000_0000_0081,
        0x0000_0000_0000_0008,
        0x0000_0000_0000_0010,
    ],
    [
        0x00FF_0000_0000_0000,
        0x4200_0000_0000_0000,
        0x2400_0000_0000_0000,
        0x8100_0000_0000_0000,
        0x0800_0000_0000_0000,
        0x1000_0000_0000_0000,
    ],
];

/// Rank index a pawn of each color starts on (and may double-push from).
pub const PAWN_START_RANK: [u8; 2] = [1, 6];

/// Rank index from which a pawn of each color promotes on its next step.
pub const PAWN_PRE_PROMOTION_RANK: [u8; 2] = [6, 1];
