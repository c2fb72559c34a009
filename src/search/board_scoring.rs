//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.

use crate::bitboard::bitboard_ops::Bitboard;
use crate::game_state::chess_types::{Color, PieceKind, ALL_PIECE_KINDS};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::attack_tables::AttackTables;

/// Score of a side that has been checkmated, negated for the winner.
pub const MATE_SCORE: i32 = 1_000_000;
pub const DRAW_SCORE: i32 = 0;

pub const CENTER_SQUARE_BONUS: i32 = 5;
pub const MOBILITY_BONUS: i32 = 5;

/// D4, E4, D5, E5.
pub const CENTER_SQUARES: Bitboard = 0x0000_0018_1800_0000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    ///
    /// Expected within `-MATE_SCORE..=MATE_SCORE`; search saturates anything
    /// outside `i32` negation range.
    fn score(&self, position: &Position) -> i32;
}

/// Score of a position without legal moves: lost if in check, drawn otherwise.
pub fn terminal_score<G: MoveGenerator + ?Sized>(generator: &G, position: &Position) -> i32 {
    if generator.side_to_move_in_check(position) {
        -MATE_SCORE
    } else {
        DRAW_SCORE
    }
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

fn material_for(position: &Position, color: Color) -> i32 {
    ALL_PIECE_KINDS
        .into_iter()
        .map(|piece| position.pieces(color, piece).count_ones() as i32 * piece_value(piece))
        .sum()
}

/// Own material minus opponent material.
pub fn material_balance(position: &Position) -> i32 {
    let us = position.side_to_move();
    material_for(position, us) - material_for(position, us.opposite())
}

/// Own pieces on the center squares minus opponent pieces there, weighted.
pub fn center_balance(position: &Position) -> i32 {
    let us = position.side_to_move();
    let own = (position.occupancy(us) & CENTER_SQUARES).count_ones() as i32;
    let theirs = (position.occupancy(us.opposite()) & CENTER_SQUARES).count_ones() as i32;
    (own - theirs) * CENTER_SQUARE_BONUS
}

/// Material, center occupation and mobility of the side to move.
///
/// Positions without legal moves get `terminal_score` instead.
#[derive(Debug, Clone, Copy)]
pub struct StandardScorer<'t> {
    generator: LegalMoveGenerator<'t>,
}

impl<'t> StandardScorer<'t> {
    pub fn new(tables: &'t AttackTables) -> Self {
        Self {
            generator: LegalMoveGenerator::new(tables),
        }
    }
}

impl Default for StandardScorer<'static> {
    fn default() -> Self {
        Self::new(AttackTables::shared())
    }
}

impl BoardScorer for StandardScorer<'_> {
    fn score(&self, position: &Position) -> i32 {
        let legal_moves = self.generator.generate_legal_moves(position).len();
        if legal_moves == 0 {
            return terminal_score(&self.generator, position);
        }

        material_balance(position) + center_balance(position) + MOBILITY_BONUS * legal_moves as i32
    }
}

/// Material only. Does not generate moves, so terminal positions are not
/// recognised at the horizon; `negamax` still scores them at interior nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        material_balance(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn start_position_is_balanced_apart_from_mobility() {
        let game = Position::new_game();
        assert_eq!(material_balance(&game), 0);
        assert_eq!(center_balance(&game), 0);
        assert_eq!(StandardScorer::default().score(&game), 20 * MOBILITY_BONUS);
        assert_eq!(MaterialScorer.score(&game), 0);
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        // White is a queen up.
        let white_to_move = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        let black_to_move = position("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
        assert_eq!(MaterialScorer.score(&white_to_move), 900);
        assert_eq!(MaterialScorer.score(&black_to_move), -900);
    }

    #[test]
    fn center_pieces_count_for_both_sides() {
        let game = position("4k3/8/8/3pp3/3P4/8/8/4K3 w - - 0 1");
        assert_eq!(center_balance(&game), -CENTER_SQUARE_BONUS);
        assert_eq!(material_balance(&game), -100);
    }

    #[test]
    fn standard_score_sums_terms() {
        let game = position("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
        // Pawn push D5 plus five king moves.
        let expected = 100 + CENTER_SQUARE_BONUS + 6 * MOBILITY_BONUS;
        assert_eq!(StandardScorer::default().score(&game), expected);
    }

    #[test]
    fn checkmate_scores_as_loss() {
        let fools_mate = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(StandardScorer::default().score(&fools_mate), -MATE_SCORE);
    }

    #[test]
    fn stalemate_scores_as_draw() {
        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(StandardScorer::default().score(&stalemate), DRAW_SCORE);
    }

    #[test]
    fn mirrored_positions_score_the_same() {
        let scorer = StandardScorer::default();
        let game = position("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10");
        assert_eq!(scorer.score(&game), scorer.score(&game.mirrored()));
    }
}
