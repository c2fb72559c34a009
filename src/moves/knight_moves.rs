use crate::bitboard::bitboard_ops::Bitboard;
use crate::game_state::chess_types::Square;
use crate::moves::attack_tables::AttackTables;

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const fn generate_knight_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut jump = 0usize;

        while jump < KNIGHT_JUMPS.len() {
            let f = file + KNIGHT_JUMPS[jump].0;
            let r = rank + KNIGHT_JUMPS[jump].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            jump += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

impl AttackTables {
    #[inline]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight_attacks[square.index() as usize]
    }

    #[inline]
    pub fn knight_moves(&self, square: Square, own_occupancy: Bitboard) -> Bitboard {
        self.knight_attacks(square) & !own_occupancy
    }
}
