//! Plain-text board dump for debugging and tests.
//!
//! Eight lines of eight characters, rank 8 first. White pieces are upper-case,
//! Black pieces lower-case, empty squares are `.`.

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;

pub fn render_game_state(position: &Position) -> String {
    let mut out = String::with_capacity(8 * 9);

    for rank in (0..8u8).rev() {
        for file in 0..8u8 {
            let ch = match position.piece_on_square(Square::from_rank_file(rank, file)) {
                Some((Color::White, piece)) => piece.to_char(),
                Some((Color::Black, piece)) => piece.to_char().to_ascii_lowercase(),
                None => '.',
            };
            out.push(ch);
        }
        if rank > 0 {
            out.push('\n');
        }
    }

    out
}
