//! Errors used throughout the engine.
//!
//! `ChessError` is the single error type of the crate. Parsing variants are
//! recoverable and suitable for showing to a user; the remaining variants flag
//! a broken caller contract (placing a piece on an occupied square, applying a
//! move that is not legal, re-initializing a populated position) and are not
//! meant to be retried.

use thiserror::Error;

use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_types::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Square text outside `[A-H][1-8]`, or an index outside `0..64`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text not of the form `E2 -> E4` / `E7 -> E8 = Q`.
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Standard setup was requested on a position that already holds pieces.
    #[error("position is not empty")]
    PositionNotEmpty,

    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// The source square holds no piece of the side to move.
    #[error("no piece of the side to move on {0}")]
    NoPieceToMove(Square),

    #[error("illegal move: {0}")]
    IllegalMove(ChessMove),

    /// An engine was asked for a move in a checkmate or stalemate position.
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid engine option {name}: {value:?}")]
    InvalidOption { name: String, value: String },
}

pub type ChessResult<T> = Result<T, ChessError>;
