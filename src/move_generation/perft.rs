//! Perft: exhaustive legal move counting with leaf statistics.

use crate::game_state::chess_move::ChessMove;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(position) {
        perft_recurse(generator, &mv, depth, 1, &mut total);
    }
    total
}

/// Leaf node count below each root move, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Vec<(ChessMove, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    generator
        .generate_legal_moves(position)
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(generator, &mv, depth, 1, &mut counts);
            (mv.chess_move, counts.nodes)
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        counts.merge(leaf_counts(generator, mv));
        return;
    }

    for child in generator.generate_legal_moves(&mv.game_after_move) {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts);
    }
}

fn leaf_counts<G: MoveGenerator>(generator: &G, mv: &GeneratedMove) -> PerftCounts {
    let gives_check = generator.side_to_move_in_check(&mv.game_after_move);
    // Replies are only generated for checking leaves.
    let is_checkmate =
        gives_check && generator.generate_legal_moves(&mv.game_after_move).is_empty();

    PerftCounts {
        nodes: 1,
        captures: u64::from(mv.is_capture()),
        promotions: u64::from(mv.chess_move.promotion.is_some()),
        checks: u64::from(gives_check),
        checkmates: u64::from(is_checkmate),
    }
}
