//! Fixed-depth negamax engine.
//!
//! Thin adapter from the `Engine` interface onto `search::negamax::search`
//! with the standard scorer. Per-request `GoParams` override the configured
//! depth and limits for a single move.

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::StandardScorer;
use crate::search::negamax::{search, SearchConfig};

pub struct NegamaxEngine {
    move_generator: LegalMoveGenerator<'static>,
    scorer: StandardScorer<'static>,
    config: SearchConfig,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            move_generator: LegalMoveGenerator::default(),
            scorer: StandardScorer::default(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn resolve_config(&self, params: &GoParams) -> SearchConfig {
        SearchConfig {
            depth: params.depth.unwrap_or(self.config.depth),
            node_limit: params.nodes.or(self.config.node_limit),
            movetime_ms: params.movetime_ms.or(self.config.movetime_ms),
        }
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value.trim().parse::<T>().map_err(|_| ChessError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "Kestrel Negamax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        match name.to_ascii_lowercase().as_str() {
            "depth" => self.config.depth = parse_option(name, value)?,
            "nodes" => self.config.node_limit = Some(parse_option(name, value)?),
            "movetime" => self.config.movetime_ms = Some(parse_option(name, value)?),
            _ => {
                return Err(ChessError::InvalidOption {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })
            }
        }
        Ok(())
    }

    fn choose_move(&mut self, position: &Position, params: &GoParams) -> ChessResult<EngineOutput> {
        let config = self.resolve_config(params);
        let result = search(position, &self.move_generator, &self.scorer, &config);

        let mut out = EngineOutput {
            best_move: result.best_move,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {} time {}",
            result.depth, result.best_score, result.nodes, result.elapsed_ms
        ));
        if result.aborted {
            out.info_lines
                .push("info string negamax_engine search aborted by limit".to_owned());
        }
        if let Some(mv) = result.best_move {
            out.info_lines.push(format!("info pv {mv}"));
        }

        debug!(
            engine = self.name(),
            depth = result.depth,
            score = result.best_score,
            best_move = ?result.best_move.map(|mv| mv.to_string()),
            "move chosen"
        );
        Ok(out)
    }
}
