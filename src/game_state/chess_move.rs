//! Move value type and its textual form.
//!
//! A move is only a source square, a destination square and an optional
//! promotion piece; captures are implied by the destination occupancy of the
//! position the move is applied to.

use std::fmt;
use std::str::FromStr;

use crate::errors::ChessError;
use crate::game_state::chess_types::{PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// `E2 -> E4`, or `E7 -> E8 = Q` for a promotion.
impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion {
            Some(piece) => write!(f, "{} -> {} = {}", self.from, self.to, piece.to_char()),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}

impl FromStr for ChessMove {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidMoveText(s.to_owned());

        let (from_text, rest) = s.split_once(" -> ").ok_or_else(invalid)?;
        let (to_text, promotion) = match rest.split_once(" = ") {
            Some((to_text, piece_text)) => {
                let mut chars = piece_text.chars();
                let piece = match (chars.next(), chars.next()) {
                    (Some(c), None) => PieceKind::from_char(c).ok_or_else(invalid)?,
                    _ => return Err(invalid()),
                };
                if matches!(piece, PieceKind::Pawn | PieceKind::King) {
                    return Err(invalid());
                }
                (to_text, Some(piece))
            }
            None => (rest, None),
        };

        let from = from_text.parse::<Square>().map_err(|_| invalid())?;
        let to = to_text.parse::<Square>().map_err(|_| invalid())?;
        Ok(ChessMove {
            from,
            to,
            promotion,
        })
    }
}
