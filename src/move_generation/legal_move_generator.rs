//! Full legal move generation pipeline.
//!
//! Pseudo-legal moves are produced piece kind by piece kind in
//! `ALL_PIECE_KINDS` order, squares ascending, destinations ascending. Each
//! candidate is applied to a fresh copy of the position and dropped if it
//! leaves the mover's king attacked; survivors keep their relative order.

use crate::bitboard::bitboard_ops::{occupied_squares, square_bitboard, Bitboard};
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_rules::PAWN_PRE_PROMOTION_RANK;
use crate::game_state::chess_types::{PieceKind, Square, ALL_PIECE_KINDS, PROMOTION_PIECES};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::attack_tables::AttackTables;

#[derive(Debug, Clone, Copy)]
pub struct LegalMoveGenerator<'t> {
    tables: &'t AttackTables,
}

impl<'t> LegalMoveGenerator<'t> {
    pub fn new(tables: &'t AttackTables) -> Self {
        Self { tables }
    }

    #[inline]
    pub fn tables(&self) -> &'t AttackTables {
        self.tables
    }

    /// Moves that follow piece movement and occupancy, ignoring king safety.
    pub fn generate_pseudo_legal_moves(&self, position: &Position) -> Vec<ChessMove> {
        self.pseudo_legal_with_movers(position)
            .into_iter()
            .map(|(_, mv)| mv)
            .collect()
    }

    fn pseudo_legal_with_movers(&self, position: &Position) -> Vec<(PieceKind, ChessMove)> {
        let us = position.side_to_move();
        let own = position.occupancy(us);
        let enemy = position.occupancy(us.opposite());
        let all = position.occupancy_all();

        let mut moves = Vec::with_capacity(64);

        for piece in ALL_PIECE_KINDS {
            for from in occupied_squares(position.pieces(us, piece)) {
                let targets = match piece {
                    PieceKind::Pawn => self.tables.pawn_moves(us, from, enemy, all),
                    PieceKind::Knight => self.tables.knight_moves(from, own),
                    PieceKind::Bishop => self.tables.bishop_moves(from, all, own),
                    PieceKind::Rook => self.tables.rook_moves(from, all, own),
                    PieceKind::Queen => self.tables.queen_moves(from, all, own),
                    PieceKind::King => self.tables.king_moves(from, own),
                };

                if piece == PieceKind::Pawn && from.rank() == PAWN_PRE_PROMOTION_RANK[us.index()] {
                    push_promotions(&mut moves, from, targets);
                } else {
                    moves.extend(
                        occupied_squares(targets).map(|to| (piece, ChessMove::new(from, to))),
                    );
                }
            }
        }

        moves
    }
}

fn push_promotions(moves: &mut Vec<(PieceKind, ChessMove)>, from: Square, targets: Bitboard) {
    for to in occupied_squares(targets) {
        for promotion in PROMOTION_PIECES {
            moves.push((PieceKind::Pawn, ChessMove::with_promotion(from, to, promotion)));
        }
    }
}

impl Default for LegalMoveGenerator<'static> {
    fn default() -> Self {
        Self::new(AttackTables::shared())
    }
}

impl MoveGenerator for LegalMoveGenerator<'_> {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove> {
        let us = position.side_to_move();
        let enemy = position.occupancy(us.opposite());
        let pseudo = self.pseudo_legal_with_movers(position);

        let mut legal = Vec::with_capacity(pseudo.len());
        for (piece, mv) in pseudo {
            let next = position.apply_move_unchecked(mv, piece);
            if is_king_in_check(self.tables, &next, us) {
                continue;
            }

            let captured = if enemy & square_bitboard(mv.to) != 0 {
                position.piece_on_square_for_color(us.opposite(), mv.to)
            } else {
                None
            };

            legal.push(GeneratedMove {
                chess_move: mv,
                captured,
                game_after_move: next,
            });
        }

        legal
    }

    #[inline]
    fn side_to_move_in_check(&self, position: &Position) -> bool {
        is_king_in_check(self.tables, position, position.side_to_move())
    }
}
