//! King-safety tests by attack symmetry.
//!
//! Instead of generating the opponent's replies, each attacker kind is
//! "placed" on the target square and its attack set is intersected with the
//! real attackers of that kind. Pawns use the defender's attack table, since
//! a white pawn attacks a square exactly when a black pawn on that square
//! would attack the pawn's square, and vice versa.

use crate::bitboard::bit_scan::lowest_set_square;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::position::Position;
use crate::moves::attack_tables::AttackTables;

#[inline]
pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    let kings = position.pieces(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(lowest_set_square(kings))
    }
}

/// True if `color` has a king and it is attacked. A side without a king is
/// never in check.
#[inline]
pub fn is_king_in_check(tables: &AttackTables, position: &Position, color: Color) -> bool {
    let Some(king_sq) = king_square(position, color) else {
        return false;
    };
    is_square_attacked(tables, position, king_sq, color.opposite())
}

pub fn is_square_attacked(
    tables: &AttackTables,
    position: &Position,
    square: Square,
    attacker_color: Color,
) -> bool {
    let occupancy = position.occupancy_all();
    let defender_color = attacker_color.opposite();

    if tables.pawn_attacks(defender_color, square) & position.pieces(attacker_color, PieceKind::Pawn)
        != 0
    {
        return true;
    }

    if tables.knight_attacks(square) & position.pieces(attacker_color, PieceKind::Knight) != 0 {
        return true;
    }

    if tables.king_attacks(square) & position.pieces(attacker_color, PieceKind::King) != 0 {
        return true;
    }

    let queens = position.pieces(attacker_color, PieceKind::Queen);

    let bishops_queens = position.pieces(attacker_color, PieceKind::Bishop) | queens;
    if tables.bishop_attacks(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = position.pieces(attacker_color, PieceKind::Rook) | queens;
    if tables.rook_attacks(square, occupancy) & rooks_queens != 0 {
        return true;
    }

    false
}
