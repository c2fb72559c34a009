//! FEN placement parser and generator.
//!
//! Only the piece placement and side-to-move fields carry meaning for this
//! engine. Castling, en-passant and clock fields are accepted when present
//! and otherwise ignored.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::position::Position;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFen("missing board layout".to_owned()))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFen("missing side to move".to_owned()))?;

    if parts.count() > 4 {
        return Err(ChessError::InvalidFen("too many fields".to_owned()));
    }

    let mut position = Position::new_empty();
    parse_board(board_part, &mut position)?;
    position.set_side_to_move(parse_side_to_move(side_part)?);
    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "rank '{rank_str}' has more than 8 files"
                    )));
                }
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch).ok_or_else(|| {
                ChessError::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;
            if file >= 8 {
                return Err(ChessError::InvalidFen(format!(
                    "rank '{rank_str}' has more than 8 files"
                )));
            }

            position.put_piece(color, piece, Square::from_rank_file(board_rank, file))?;
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::InvalidFen(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    PieceKind::from_char(ch).map(|piece| (color, piece))
}

/// Placement and side-to-move fields, e.g. `8/8/8/8/8/8/8/4K2k w`.
pub fn generate_fen_placement(position: &Position) -> String {
    let mut out = String::new();
    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            match position.piece_on_square(Square::from_rank_file(rank, file)) {
                Some((color, piece)) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    let c = piece.to_char();
                    out.push(match color {
                        Color::White => c,
                        Color::Black => c.to_ascii_lowercase(),
                    });
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out.push(' ');
    out.push(match position.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    });
    out
}
