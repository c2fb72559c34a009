//! Bitboard board state.
//!
//! `Position` stores one bitboard per (color, piece kind) plus occupancy caches
//! derived from them. Every mutating method keeps the caches in sync, so
//! `occupancy_by_color[c]` is always the union of color `c`'s piece boards and
//! `occupancy_all` the union of both colors. Applying a move returns a new
//! value and never touches `self`, which keeps sibling branches of a search
//! independent.

use std::fmt;

use crate::bitboard::bitboard_ops::{square_bitboard, Bitboard, EMPTY};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_rules::STANDARD_SETUP;
use crate::game_state::chess_types::{Color, PieceKind, Square, ALL_PIECE_KINDS};
use crate::utils::fen_parser::{generate_fen_placement, parse_fen};
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    // [color][piece_kind]
    pieces: [[Bitboard; 6]; 2],

    // Occupancy caches.
    occupancy_by_color: [Bitboard; 2],
    occupancy_all: Bitboard,

    side_to_move: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces: [[EMPTY; 6]; 2],
            occupancy_by_color: [EMPTY; 2],
            occupancy_all: EMPTY,
            side_to_move: Color::White,
        }
    }
}

impl Position {
    /// Empty board, White to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position, White to move.
    pub fn new_game() -> Self {
        let mut position = Self::new_empty();
        position.pieces = STANDARD_SETUP;
        position.recalc_occupancy();
        position
    }

    /// Populate an empty position with the standard starting layout.
    pub fn initial_standard_setup(&mut self) -> ChessResult<()> {
        if !self.is_empty() {
            return Err(ChessError::PositionNotEmpty);
        }
        self.pieces = STANDARD_SETUP;
        self.side_to_move = Color::White;
        self.recalc_occupancy();
        Ok(())
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Placement and side-to-move fields of the FEN for this position.
    #[inline]
    pub fn to_fen_placement(&self) -> String {
        generate_fen_placement(self)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupancy_all == EMPTY
    }

    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn piece_on_square_for_color(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bitboard(square);
        if self.occupancy_by_color[color.index()] & mask == 0 {
            return None;
        }
        ALL_PIECE_KINDS
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
    }

    pub fn piece_on_square(&self, square: Square) -> Option<(Color, PieceKind)> {
        Color::BOTH.into_iter().find_map(|color| {
            self.piece_on_square_for_color(color, square)
                .map(|piece| (color, piece))
        })
    }

    /// Place a piece on an empty square.
    pub fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) -> ChessResult<()> {
        let mask = square_bitboard(square);
        if self.occupancy_all & mask != 0 {
            return Err(ChessError::SquareOccupied(square));
        }
        self.pieces[color.index()][piece.index()] |= mask;
        self.occupancy_by_color[color.index()] |= mask;
        self.occupancy_all |= mask;
        Ok(())
    }

    /// Remove and return whatever stands on `square`.
    pub fn remove_piece(&mut self, square: Square) -> Option<(Color, PieceKind)> {
        let found = self.piece_on_square(square)?;
        let mask = !square_bitboard(square);
        self.pieces[found.0.index()][found.1.index()] &= mask;
        self.occupancy_by_color[found.0.index()] &= mask;
        self.occupancy_all &= mask;
        Some(found)
    }

    /// Position after `mv`, with the other side to move.
    ///
    /// Only checks that the side to move owns the source square and not the
    /// destination. Whether `mv` is legal is the caller's responsibility; see
    /// `MoveGenerator::apply_legal_move` for the validating variant.
    pub fn apply_move(&self, mv: ChessMove) -> ChessResult<Position> {
        let moved_piece = self
            .piece_on_square_for_color(self.side_to_move, mv.from)
            .ok_or(ChessError::NoPieceToMove(mv.from))?;
        if self.occupancy(self.side_to_move) & square_bitboard(mv.to) != 0 {
            return Err(ChessError::SquareOccupied(mv.to));
        }
        Ok(self.apply_move_unchecked(mv, moved_piece))
    }

    /// `moved_piece` must be the side to move's piece on `mv.from`.
    pub(crate) fn apply_move_unchecked(&self, mv: ChessMove, moved_piece: PieceKind) -> Position {
        let us = self.side_to_move.index();
        let them = self.side_to_move.opposite().index();
        let from_mask = square_bitboard(mv.from);
        let to_mask = square_bitboard(mv.to);

        let mut next = self.clone();

        next.pieces[us][moved_piece.index()] &= !from_mask;
        if next.occupancy_by_color[them] & to_mask != 0 {
            for board in next.pieces[them].iter_mut() {
                *board &= !to_mask;
            }
        }
        let placed = mv.promotion.unwrap_or(moved_piece);
        next.pieces[us][placed.index()] |= to_mask;

        next.occupancy_by_color[us] = (next.occupancy_by_color[us] & !from_mask) | to_mask;
        next.occupancy_by_color[them] &= !to_mask;
        next.occupancy_all = next.occupancy_by_color[0] | next.occupancy_by_color[1];
        next.side_to_move = self.side_to_move.opposite();

        debug_assert!(next.occupancy_is_consistent());
        next
    }

    /// Color-flipped copy: ranks mirrored, colors swapped, other side to move.
    pub fn mirrored(&self) -> Position {
        let mut out = Position::new_empty();
        for color in Color::BOTH {
            for piece in ALL_PIECE_KINDS {
                out.pieces[color.opposite().index()][piece.index()] =
                    self.pieces[color.index()][piece.index()].swap_bytes();
            }
        }
        out.side_to_move = self.side_to_move.opposite();
        out.recalc_occupancy();
        out
    }

    /// True when the occupancy caches match the piece boards and no square
    /// is claimed by two (color, piece) cells.
    pub fn occupancy_is_consistent(&self) -> bool {
        let mut seen = EMPTY;
        let mut by_color = [EMPTY; 2];
        for color in Color::BOTH {
            for board in self.pieces[color.index()] {
                if seen & board != 0 {
                    return false;
                }
                seen |= board;
                by_color[color.index()] |= board;
            }
        }
        by_color == self.occupancy_by_color && seen == self.occupancy_all
    }

    fn recalc_occupancy(&mut self) {
        for color in Color::BOTH {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(EMPTY, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}
