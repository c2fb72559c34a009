//! Precomputed attack lookup tables.
//!
//! `AttackTables` is a plain immutable value. Every table is a pure function
//! of the square index (or, for the first-rank table, of a file and an
//! occupancy byte), so the whole value is built by const evaluation and a
//! shared instance lives in read-only static memory. Components take it by
//! shared reference; nothing ever mutates it, so any number of concurrent
//! searches may read it without locking.
//!
//! Lookups are grouped by piece in sibling modules (`king_moves`,
//! `knight_moves`, `pawn_moves`, `sliding_moves`), each adding its own
//! `impl AttackTables` block next to the generator of its tables.

use crate::bitboard::bitboard_ops::Bitboard;
use crate::moves::king_moves::generate_king_attacks;
use crate::moves::knight_moves::generate_knight_attacks;
use crate::moves::pawn_moves::{generate_pawn_attacks, generate_pawn_quiet_moves};
use crate::moves::sliding_moves::{
    generate_anti_diag_masks, generate_diag_masks, generate_file_masks,
    generate_first_rank_attacks, generate_rank_masks,
};

static SHARED_TABLES: AttackTables = AttackTables::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTables {
    pub(crate) king_attacks: [Bitboard; 64],
    pub(crate) knight_attacks: [Bitboard; 64],
    /// `[color][square]`; single push plus, from the start rank, the double push.
    pub(crate) pawn_quiet: [[Bitboard; 64]; 2],
    /// `[color][square]`; diagonal capture targets.
    pub(crate) pawn_attacks: [[Bitboard; 64]; 2],
    pub(crate) rank_masks: [Bitboard; 64],
    pub(crate) file_masks: [Bitboard; 64],
    pub(crate) diag_masks: [Bitboard; 64],
    pub(crate) anti_diag_masks: [Bitboard; 64],
    /// `[file][occupancy byte]` -> attacked squares of a slider on that file of rank 1.
    pub(crate) first_rank_attacks: [[u8; 256]; 8],
}

impl AttackTables {
    pub const fn new() -> Self {
        Self {
            king_attacks: generate_king_attacks(),
            knight_attacks: generate_knight_attacks(),
            pawn_quiet: generate_pawn_quiet_moves(),
            pawn_attacks: generate_pawn_attacks(),
            rank_masks: generate_rank_masks(),
            file_masks: generate_file_masks(),
            diag_masks: generate_diag_masks(),
            anti_diag_masks: generate_anti_diag_masks(),
            first_rank_attacks: generate_first_rank_attacks(),
        }
    }

    /// Process-wide instance, computed at compile time.
    #[inline]
    pub fn shared() -> &'static AttackTables {
        &SHARED_TABLES
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}
