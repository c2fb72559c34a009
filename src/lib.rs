//! Crate root module declarations for the Kestrel chess engine.
//!
//! This file exposes all top-level subsystems (bitboards, game state, attack
//! tables, move generation, search, engines and utility helpers) so the
//! binary, benches and external tooling can import stable module paths. The
//! free functions at the bottom are the short entry points for callers that
//! are happy with the shared attack tables and the standard scorer.

pub mod errors;

pub mod bitboard {
    pub mod bit_scan;
    pub mod bitboard_ops;
}

pub mod game_state {
    pub mod chess_move;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod moves {
    pub mod attack_tables;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
}

pub mod engines {
    pub mod engine_negamax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod fen_parser;
    pub mod render_game_state;
}

use crate::game_state::chess_move::ChessMove;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{BoardScorer, StandardScorer};

/// Legal moves of the side to move, in generation order.
pub fn generate_legal_moves(position: &Position) -> Vec<ChessMove> {
    LegalMoveGenerator::default().legal_moves(position)
}

/// Standard evaluation, relative to the side to move.
pub fn evaluate(position: &Position) -> i32 {
    StandardScorer::default().score(position)
}

/// Fixed-depth negamax choice; `None` when there is no legal move.
pub fn best_move(position: &Position, depth: u8) -> Option<ChessMove> {
    search::negamax::best_move(
        position,
        &LegalMoveGenerator::default(),
        &StandardScorer::default(),
        depth,
    )
}
