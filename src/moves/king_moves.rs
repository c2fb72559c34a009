//! King attack table and lookup.

use crate::bitboard::bitboard_ops::{Bitboard, FILE_A, FILE_H};
use crate::game_state::chess_types::Square;
use crate::moves::attack_tables::AttackTables;

pub(crate) const fn generate_king_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let bb = 1u64 << sq;
        let east_ok = bb & !FILE_H;
        let west_ok = bb & !FILE_A;

        table[sq] = (bb << 8)
            | (bb >> 8)
            | (east_ok << 1)
            | (east_ok << 9)
            | (east_ok >> 7)
            | (west_ok >> 1)
            | (west_ok << 7)
            | (west_ok >> 9);
        sq += 1;
    }

    table
}

impl AttackTables {
    #[inline]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king_attacks[square.index() as usize]
    }

    /// King destinations, excluding squares held by the mover's own pieces.
    #[inline]
    pub fn king_moves(&self, square: Square, own_occupancy: Bitboard) -> Bitboard {
        self.king_attacks(square) & !own_occupancy
    }
}
