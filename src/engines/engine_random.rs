//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used as a baseline
//! opponent and for smoke-testing the game loop.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator<'static>,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Reproducible move sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            move_generator: LegalMoveGenerator::default(),
            rng,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Kestrel Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        if !name.eq_ignore_ascii_case("Seed") {
            return Err(invalid());
        }
        let seed = value.trim().parse::<u64>().map_err(|_| invalid())?;
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn choose_move(&mut self, position: &Position, params: &GoParams) -> ChessResult<EngineOutput> {
        let legal_moves = self.move_generator.legal_moves(position);

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine legal_moves {}", legal_moves.len()));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        out.best_move = legal_moves.choose(&mut self.rng).copied();
        debug!(
            engine = self.name(),
            best_move = ?out.best_move.map(|mv| mv.to_string()),
            "move chosen"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move() {
        let mut engine = RandomEngine::seeded(7);
        let game = Position::new_game();
        let legal = LegalMoveGenerator::default().legal_moves(&game);

        for _ in 0..20 {
            let out = engine
                .choose_move(&game, &GoParams::default())
                .expect("random engine should not fail");
            let mv = out.best_move.expect("start position has moves");
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let game = Position::new_game();
        let mut a = RandomEngine::seeded(42);
        let mut b = RandomEngine::new();
        b.set_option("Seed", "42").expect("numeric seed is accepted");

        for _ in 0..5 {
            let left = a.choose_move(&game, &GoParams::default()).expect("move");
            let right = b.choose_move(&game, &GoParams::default()).expect("move");
            assert_eq!(left.best_move, right.best_move);
        }
    }

    #[test]
    fn bad_seed_is_rejected() {
        let mut engine = RandomEngine::new();
        assert!(matches!(
            engine.set_option("Seed", "abc"),
            Err(ChessError::InvalidOption { .. })
        ));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut engine = RandomEngine::seeded(1);
        assert_eq!(
            engine.set_option("Hash", "16"),
            Err(ChessError::InvalidOption {
                name: "Hash".to_owned(),
                value: "16".to_owned(),
            })
        );
        assert!(engine.set_option("seed", "16").is_ok());
    }

    #[test]
    fn no_move_in_terminal_position() {
        let mut engine = RandomEngine::seeded(1);
        let stalemate =
            Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("test FEN should parse");
        let out = engine
            .choose_move(&stalemate, &GoParams { depth: Some(2), ..GoParams::default() })
            .expect("terminal position is not an error");
        assert_eq!(out.best_move, None);
        assert_eq!(out.info_lines.len(), 2);
    }
}
