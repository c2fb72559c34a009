//! Sliding attacks via first-rank lookups.
//!
//! All four line directions share one 8x256 table of attacks along rank 1.
//! A line's occupancy is isolated with its mask, gathered onto a single byte
//! by a multiply-and-shift, looked up, and the resulting byte is spread back
//! over the line by the inverse multiply before masking to the line again.
//!
//! Ranks and both diagonals gather with a multiply by the A file: every bit of
//! those lines sits on a distinct file, so the copies never overlap and the
//! top byte ends up indexed by file. Files need a different route: the file is
//! shifted onto the A file and gathered with the A1-H8 diagonal, which leaves
//! the byte indexed by `7 - rank`; the inverse multiply lands on the H file.

use crate::bitboard::bitboard_ops::{Bitboard, DIAG_A1H8, FILE_A, FILE_H, RANK_1};
use crate::game_state::chess_types::Square;
use crate::moves::attack_tables::AttackTables;

pub(crate) const fn generate_rank_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = RANK_1 << (8 * (sq / 8));
        sq += 1;
    }
    table
}

pub(crate) const fn generate_file_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = FILE_A << (sq % 8);
        sq += 1;
    }
    table
}

/// Squares with the same `rank - file` as the index square, itself included.
pub(crate) const fn generate_diag_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let key = (sq / 8) as i32 - (sq % 8) as i32;
        let mut t = 0usize;
        while t < 64 {
            if (t / 8) as i32 - (t % 8) as i32 == key {
                table[sq] |= 1u64 << t;
            }
            t += 1;
        }
        sq += 1;
    }
    table
}

/// Squares with the same `rank + file` as the index square, itself included.
pub(crate) const fn generate_anti_diag_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let key = sq / 8 + sq % 8;
        let mut t = 0usize;
        while t < 64 {
            if t / 8 + t % 8 == key {
                table[sq] |= 1u64 << t;
            }
            t += 1;
        }
        sq += 1;
    }
    table
}

/// Attacks of a slider on `file` of an 8-square line with occupancy `occ`.
///
/// Each ray runs up to and including the first occupied square. The upward
/// ray uses `o ^ (o - 2r)`; the downward ray is walked bit by bit.
pub(crate) const fn generate_first_rank_attacks() -> [[u8; 256]; 8] {
    let mut table = [[0u8; 256]; 8];
    let mut file = 0usize;

    while file < 8 {
        let slider = 1u32 << file;
        let above = 0xFFu32 & !((slider << 1) - 1);
        let mut occ = 0usize;

        while occ < 256 {
            let blockers_above = occ as u32 & above;
            let up = (blockers_above.wrapping_sub(slider << 1) ^ blockers_above) & above;

            let mut down = 0u32;
            let mut x = file as i32 - 1;
            while x >= 0 {
                down |= 1u32 << x;
                if occ & (1usize << x) != 0 {
                    break;
                }
                x -= 1;
            }

            table[file][occ] = (up | down) as u8;
            occ += 1;
        }
        file += 1;
    }

    table
}

impl AttackTables {
    #[inline]
    pub fn rank_mask(&self, square: Square) -> Bitboard {
        self.rank_masks[square.index() as usize]
    }

    #[inline]
    pub fn file_mask(&self, square: Square) -> Bitboard {
        self.file_masks[square.index() as usize]
    }

    #[inline]
    pub fn diag_mask(&self, square: Square) -> Bitboard {
        self.diag_masks[square.index() as usize]
    }

    #[inline]
    pub fn anti_diag_mask(&self, square: Square) -> Bitboard {
        self.anti_diag_masks[square.index() as usize]
    }

    #[inline]
    pub fn first_rank_attacks(&self, file: u8, occupancy_byte: u8) -> u8 {
        self.first_rank_attacks[file as usize & 7][occupancy_byte as usize]
    }

    /// Shared path for ranks and both diagonals.
    #[inline]
    fn line_attacks(&self, square: Square, line_mask: Bitboard, occupancy: Bitboard) -> Bitboard {
        let occupancy_byte = ((occupancy & line_mask).wrapping_mul(FILE_A) >> 56) as u8;
        let attacks = self.first_rank_attacks(square.file(), occupancy_byte) as u64;
        attacks.wrapping_mul(FILE_A) & line_mask
    }

    #[inline]
    pub fn rank_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.line_attacks(square, self.rank_mask(square), occupancy)
    }

    #[inline]
    pub fn diag_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.line_attacks(square, self.diag_mask(square), occupancy)
    }

    #[inline]
    pub fn anti_diag_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.line_attacks(square, self.anti_diag_mask(square), occupancy)
    }

    #[inline]
    pub fn file_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        let file = square.file();
        let on_a_file = FILE_A & (occupancy >> file);
        let occupancy_byte = (on_a_file.wrapping_mul(DIAG_A1H8) >> 56) as u8;
        let attacks = self.first_rank_attacks(7 - square.rank(), occupancy_byte) as u64;
        (attacks.wrapping_mul(DIAG_A1H8) & FILE_H) >> (7 - file)
    }

    /// Raw bishop attacks, own pieces not yet excluded.
    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.diag_attacks(square, occupancy) ^ self.anti_diag_attacks(square, occupancy)
    }

    /// Raw rook attacks, own pieces not yet excluded.
    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.rank_attacks(square, occupancy) ^ self.file_attacks(square, occupancy)
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.rook_attacks(square, occupancy) | self.bishop_attacks(square, occupancy)
    }

    #[inline]
    pub fn bishop_moves(&self, square: Square, occupancy: Bitboard, own: Bitboard) -> Bitboard {
        self.bishop_attacks(square, occupancy) & !own
    }

    #[inline]
    pub fn rook_moves(&self, square: Square, occupancy: Bitboard, own: Bitboard) -> Bitboard {
        self.rook_attacks(square, occupancy) & !own
    }

    #[inline]
    pub fn queen_moves(&self, square: Square, occupancy: Bitboard, own: Bitboard) -> Bitboard {
        self.queen_attacks(square, occupancy) & !own
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::game_state::chess_types::Square;
    use crate::moves::attack_tables::AttackTables;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
        let mut file = square.file() as i32 + file_step;
        let mut rank = square.rank() as i32 + rank_step;
        let mut attacks = 0u64;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }

        attacks
    }

    fn slow_rook(square: Square, occupancy: u64) -> u64 {
        trace_ray(square, 1, 0, occupancy)
            | trace_ray(square, -1, 0, occupancy)
            | trace_ray(square, 0, 1, occupancy)
            | trace_ray(square, 0, -1, occupancy)
    }

    fn slow_bishop(square: Square, occupancy: u64) -> u64 {
        trace_ray(square, 1, 1, occupancy)
            | trace_ray(square, -1, 1, occupancy)
            | trace_ray(square, 1, -1, occupancy)
            | trace_ray(square, -1, -1, occupancy)
    }

    #[test]
    fn line_masks_from_d4() {
        let tables = AttackTables::shared();
        let d4 = sq("D4");
        assert_eq!(tables.rank_mask(d4), 0x0000_0000_FF00_0000);
        assert_eq!(tables.file_mask(d4), 0x0808_0808_0808_0808);
        assert_eq!(tables.diag_mask(d4), 0x8040_2010_0804_0201);
        assert_eq!(tables.anti_diag_mask(d4).count_ones(), 7);
        assert_ne!(tables.anti_diag_mask(d4) & (1u64 << sq("A7").index()), 0);
        assert_ne!(tables.anti_diag_mask(d4) & (1u64 << sq("G1").index()), 0);
    }

    #[test]
    fn first_rank_rays_stop_on_blockers() {
        let tables = AttackTables::shared();
        assert_eq!(tables.first_rank_attacks(0, 0), 0b1111_1110);
        assert_eq!(tables.first_rank_attacks(3, 0), 0b1111_0111);
        // slider on D, blockers on B and F
        assert_eq!(tables.first_rank_attacks(3, 0b0010_1010), 0b0011_0110);
        assert_eq!(tables.first_rank_attacks(7, 0b0100_0000), 0b0100_0000);
    }

    #[test]
    fn empty_board_ray_counts_from_d4() {
        let tables = AttackTables::shared();
        assert_eq!(tables.rook_attacks(sq("D4"), 0).count_ones(), 14);
        assert_eq!(tables.bishop_attacks(sq("D4"), 0).count_ones(), 13);
        assert_eq!(tables.queen_attacks(sq("D4"), 0).count_ones(), 27);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let tables = AttackTables::shared();
        let blocker_on_a4 = 1u64 << 24;
        let attacks = tables.rook_attacks(sq("A1"), blocker_on_a4);
        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }

    #[test]
    fn file_attacks_on_every_file() {
        let tables = AttackTables::shared();
        for square in Square::all() {
            let occupancy = 1u64 << square.index();
            assert_eq!(
                tables.file_attacks(square, occupancy),
                tables.file_mask(square) & !occupancy,
                "open file from {square}"
            );
        }
    }

    #[test]
    fn sliding_attacks_match_ray_tracing_on_random_boards() {
        let tables = AttackTables::shared();
        let mut rng = StdRng::seed_from_u64(0xD1A6_0A1E);
        for _ in 0..64 {
            let occupancy: u64 = rng.random::<u64>() & rng.random::<u64>();
            for square in Square::all() {
                assert_eq!(
                    tables.rook_attacks(square, occupancy),
                    slow_rook(square, occupancy),
                    "rook on {square}, occupancy {occupancy:#018x}"
                );
                assert_eq!(
                    tables.bishop_attacks(square, occupancy),
                    slow_bishop(square, occupancy),
                    "bishop on {square}, occupancy {occupancy:#018x}"
                );
            }
        }
    }

    #[test]
    fn own_pieces_are_excluded_but_enemies_are_not() {
        let tables = AttackTables::shared();
        let own = 1u64 << sq("D6").index();
        let enemy = 1u64 << sq("F4").index();
        let moves = tables.rook_moves(sq("D4"), own | enemy, own);
        assert_eq!(moves & own, 0);
        assert_ne!(moves & enemy, 0);
        assert_ne!(moves & (1u64 << sq("D5").index()), 0);
        assert_eq!(moves & (1u64 << sq("D7").index()), 0);
    }
}
