//! Pawn push and capture tables.
//!
//! The quiet table holds the double push for start-rank pawns, but whether
//! it may be played depends on the square in between being empty. That
//! check needs the live occupancy, so `pawn_moves` performs it at run time.

use crate::bitboard::bitboard_ops::Bitboard;
use crate::game_state::chess_rules::PAWN_START_RANK;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::attack_tables::AttackTables;

pub(crate) const fn generate_pawn_quiet_moves() -> [[Bitboard; 64]; 2] {
    let mut table = [[0u64; 64]; 2];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = (sq / 8) as u8;

        if rank < 7 {
            table[0][sq] = 1u64 << (sq + 8);
            if rank == PAWN_START_RANK[0] {
                table[0][sq] |= 1u64 << (sq + 16);
            }
        }
        if rank > 0 {
            table[1][sq] = 1u64 << (sq - 8);
            if rank == PAWN_START_RANK[1] {
                table[1][sq] |= 1u64 << (sq - 16);
            }
        }

        sq += 1;
    }

    table
}

pub(crate) const fn generate_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut table = [[0u64; 64]; 2];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;

        if rank < 7 {
            if file > 0 {
                table[0][sq] |= 1u64 << (sq + 7);
            }
            if file < 7 {
                table[0][sq] |= 1u64 << (sq + 9);
            }
        }
        if rank > 0 {
            if file > 0 {
                table[1][sq] |= 1u64 << (sq - 9);
            }
            if file < 7 {
                table[1][sq] |= 1u64 << (sq - 7);
            }
        }

        sq += 1;
    }

    table
}

impl AttackTables {
    #[inline]
    pub fn pawn_quiet(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_quiet[color.index()][square.index() as usize]
    }

    #[inline]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_attacks[color.index()][square.index() as usize]
    }

    /// Pushes onto empty squares plus captures onto enemy pieces.
    ///
    /// A double push is only produced when the square directly ahead is
    /// empty as well.
    pub fn pawn_moves(
        &self,
        color: Color,
        square: Square,
        enemy_occupancy: Bitboard,
        all_occupancy: Bitboard,
    ) -> Bitboard {
        let captures = self.pawn_attacks(color, square) & enemy_occupancy;

        let from = 1u64 << square.index();
        let one_step = match color {
            Color::White => from << 8,
            Color::Black => from >> 8,
        };
        let pushes = if one_step & all_occupancy == 0 {
            self.pawn_quiet(color, square) & !all_occupancy
        } else {
            0
        };

        captures | pushes
    }
}
