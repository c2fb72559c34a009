//! Move generation interface shared by search, perft and the engines.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;

/// A legal move together with the position it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub captured: Option<PieceKind>,
    pub game_after_move: Position,
}

impl GeneratedMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

pub trait MoveGenerator: Send + Sync {
    /// Legal moves for the side to move, in generation order.
    ///
    /// An empty result marks a terminal position; telling checkmate from
    /// stalemate is left to `side_to_move_in_check`.
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove>;

    fn side_to_move_in_check(&self, position: &Position) -> bool;

    fn legal_moves(&self, position: &Position) -> Vec<ChessMove> {
        self.generate_legal_moves(position)
            .into_iter()
            .map(|generated| generated.chess_move)
            .collect()
    }

    /// Apply `mv` only if it is one of the legal moves of `position`.
    fn apply_legal_move(&self, position: &Position, mv: ChessMove) -> ChessResult<Position> {
        self.generate_legal_moves(position)
            .into_iter()
            .find(|generated| generated.chess_move == mv)
            .map(|generated| generated.game_after_move)
            .ok_or(ChessError::IllegalMove(mv))
    }
}
