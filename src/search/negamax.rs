//! Fixed-depth negamax without pruning.
//!
//! `negamax` and `best_move` enumerate the whole tree to the requested depth.
//! `search` wraps the same expansion with node accounting and an optional
//! abort signal polled before every child expansion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::game_state::chess_move::ChessMove;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{terminal_score, BoardScorer};

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub node_limit: Option<u64>,
    pub movetime_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            node_limit: None,
            movetime_ms: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub aborted: bool,
    pub elapsed_ms: u64,
}

/// Polled between child expansions with the number of nodes visited so far.
pub trait AbortSignal {
    fn should_abort(&self, nodes: u64) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    #[inline]
    fn should_abort(&self, _nodes: u64) -> bool {
        false
    }
}

/// External stop flag, e.g. set by another thread.
impl AbortSignal for AtomicBool {
    #[inline]
    fn should_abort(&self, _nodes: u64) -> bool {
        self.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    pub node_limit: Option<u64>,
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    pub fn from_config(config: &SearchConfig, start: Instant) -> Self {
        Self {
            node_limit: config.node_limit,
            deadline: config
                .movetime_ms
                .map(|ms| start + Duration::from_millis(ms)),
        }
    }
}

impl AbortSignal for SearchLimits {
    fn should_abort(&self, nodes: u64) -> bool {
        self.node_limit.is_some_and(|limit| nodes >= limit)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Best score reachable from `position` in `depth` plies, side-to-move relative.
pub fn negamax<G, S>(position: &Position, generator: &G, scorer: &S, depth: u8) -> i32
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    if depth == 0 {
        return scorer.score(position);
    }

    let moves = generator.generate_legal_moves(position);
    if moves.is_empty() {
        return terminal_score(generator, position);
    }

    let mut best = i32::MIN;
    for mv in moves {
        let score = negamax(&mv.game_after_move, generator, scorer, depth - 1).saturating_neg();
        best = best.max(score);
    }
    best
}

/// Move with the highest negamax score; the first one generated wins ties.
///
/// `None` when the side to move has no legal moves. Depth 0 searches one ply.
pub fn best_move<G, S>(
    position: &Position,
    generator: &G,
    scorer: &S,
    depth: u8,
) -> Option<ChessMove>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let child_depth = depth.saturating_sub(1);
    let mut best_score = i32::MIN;
    let mut best = None;

    for mv in generator.generate_legal_moves(position) {
        let score = negamax(&mv.game_after_move, generator, scorer, child_depth).saturating_neg();
        if score > best_score {
            best_score = score;
            best = Some(mv.chess_move);
        }
    }

    best
}

/// `best_move` under the node and time limits of `config`.
pub fn search<G, S>(
    position: &Position,
    generator: &G,
    scorer: &S,
    config: &SearchConfig,
) -> SearchResult
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let limits = SearchLimits::from_config(config, Instant::now());
    search_with_signal(position, generator, scorer, config.depth, &limits)
}

/// Root search that stops as soon as `signal` asks it to.
///
/// On abort the best fully searched root move is kept; if no root move was
/// completed the first legal move is returned with the static score.
pub fn search_with_signal<G, S, A>(
    position: &Position,
    generator: &G,
    scorer: &S,
    depth: u8,
    signal: &A,
) -> SearchResult
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
    A: AbortSignal + ?Sized,
{
    let start = Instant::now();
    let depth = depth.max(1);
    let mut ctx = SearchContext {
        generator,
        scorer,
        signal,
        nodes: 1,
        aborted: false,
    };

    let moves = generator.generate_legal_moves(position);
    let mut result = SearchResult {
        depth,
        ..SearchResult::default()
    };

    if moves.is_empty() {
        result.best_score = terminal_score(generator, position);
    } else {
        let mut best_score = i32::MIN;
        let mut best = None;

        for mv in &moves {
            if ctx.signal.should_abort(ctx.nodes) {
                ctx.aborted = true;
                break;
            }
            let Some(child_score) = ctx.negamax(&mv.game_after_move, depth - 1) else {
                break;
            };
            let score = child_score.saturating_neg();
            trace!(mv = %mv.chess_move, score, "root move searched");

            if score > best_score {
                best_score = score;
                best = Some(mv.chess_move);
            }
        }

        match best {
            Some(mv) => {
                result.best_move = Some(mv);
                result.best_score = best_score;
            }
            None => {
                result.best_move = moves.first().map(|mv| mv.chess_move);
                result.best_score = scorer.score(position);
            }
        }
    }

    result.nodes = ctx.nodes;
    result.aborted = ctx.aborted;
    result.elapsed_ms = start.elapsed().as_millis() as u64;

    debug!(
        depth = result.depth,
        nodes = result.nodes,
        score = result.best_score,
        best_move = ?result.best_move.map(|mv| mv.to_string()),
        aborted = result.aborted,
        elapsed_ms = result.elapsed_ms,
        "search finished"
    );

    result
}

struct SearchContext<'a, G: ?Sized, S: ?Sized, A: ?Sized> {
    generator: &'a G,
    scorer: &'a S,
    signal: &'a A,
    nodes: u64,
    aborted: bool,
}

impl<G, S, A> SearchContext<'_, G, S, A>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
    A: AbortSignal + ?Sized,
{
    /// `None` once the signal fired; the partial subtree is discarded.
    fn negamax(&mut self, position: &Position, depth: u8) -> Option<i32> {
        self.nodes += 1;

        if depth == 0 {
            return Some(self.scorer.score(position));
        }

        let moves = self.generator.generate_legal_moves(position);
        if moves.is_empty() {
            return Some(terminal_score(self.generator, position));
        }

        let mut best = i32::MIN;
        for mv in moves {
            if self.signal.should_abort(self.nodes) {
                self.aborted = true;
                return None;
            }
            let score = self.negamax(&mv.game_after_move, depth - 1)?.saturating_neg();
            best = best.max(score);
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::search::board_scoring::{MaterialScorer, StandardScorer, DRAW_SCORE, MATE_SCORE};

    const BACK_RANK_MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("test FEN should parse")
    }

    fn mv(text: &str) -> ChessMove {
        text.parse().expect("test move should parse")
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        let game = Position::new_game();
        assert_eq!(negamax(&game, &generator, &scorer, 0), scorer.score(&game));
    }

    #[test]
    fn finds_back_rank_mate() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        let game = position(BACK_RANK_MATE_IN_ONE);

        assert_eq!(best_move(&game, &generator, &scorer, 1), Some(mv("A1 -> A8")));
        assert_eq!(best_move(&game, &generator, &scorer, 2), Some(mv("A1 -> A8")));
        assert_eq!(negamax(&game, &generator, &scorer, 1), MATE_SCORE);
    }

    #[test]
    fn interior_terminal_nodes_are_scored_without_scorer() {
        // Material alone cannot see the mate at the horizon, one ply deeper it can.
        let generator = LegalMoveGenerator::default();
        let game = position(BACK_RANK_MATE_IN_ONE);
        assert_eq!(negamax(&game, &generator, &MaterialScorer, 2), MATE_SCORE);
        assert_eq!(
            best_move(&game, &generator, &MaterialScorer, 2),
            Some(mv("A1 -> A8"))
        );
    }

    #[test]
    fn terminal_positions() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();

        let mated = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(negamax(&mated, &generator, &scorer, 3), -MATE_SCORE);
        assert_eq!(best_move(&mated, &generator, &scorer, 3), None);

        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(negamax(&stalemate, &generator, &scorer, 2), DRAW_SCORE);
        assert_eq!(best_move(&stalemate, &generator, &scorer, 2), None);
    }

    #[test]
    fn ties_go_to_first_generated_move() {
        let generator = LegalMoveGenerator::default();
        // Two kings only: every move scores the same under material.
        let game = position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let first = generator.legal_moves(&game)[0];
        assert_eq!(best_move(&game, &generator, &MaterialScorer, 1), Some(first));
    }

    struct ExtremeScorer;

    impl BoardScorer for ExtremeScorer {
        fn score(&self, _position: &Position) -> i32 {
            i32::MIN
        }
    }

    #[test]
    fn extreme_scores_saturate_instead_of_overflowing() {
        let generator = LegalMoveGenerator::default();
        let game = Position::new_game();
        let first = generator.legal_moves(&game)[0];

        assert_eq!(negamax(&game, &generator, &ExtremeScorer, 1), i32::MAX);
        assert_eq!(negamax(&game, &generator, &ExtremeScorer, 2), -i32::MAX);
        assert_eq!(best_move(&game, &generator, &ExtremeScorer, 1), Some(first));

        let result = search_with_signal(&game, &generator, &ExtremeScorer, 2, &NeverAbort);
        assert_eq!(result.best_move, Some(first));
        assert_eq!(result.best_score, -i32::MAX);
    }

    #[test]
    fn mirrored_positions_search_the_same() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        for fen in [
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/3pp3/3P4/8/8/4K3 w - - 0 1",
        ] {
            let game = position(fen);
            let mirrored = game.mirrored();
            for depth in 0..=2 {
                assert_eq!(
                    negamax(&game, &generator, &scorer, depth),
                    negamax(&mirrored, &generator, &scorer, depth),
                    "{fen} at depth {depth}"
                );
            }
        }
    }

    #[test]
    fn unlimited_search_matches_best_move() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        let game = position(BACK_RANK_MATE_IN_ONE);
        let config = SearchConfig {
            depth: 2,
            ..SearchConfig::default()
        };

        let result = search(&game, &generator, &scorer, &config);
        assert_eq!(result.best_move, best_move(&game, &generator, &scorer, 2));
        assert_eq!(result.best_score, negamax(&game, &generator, &scorer, 2));
        assert_eq!(result.depth, 2);
        assert!(!result.aborted);
        assert!(result.nodes > 1);
    }

    #[test]
    fn exhausted_node_budget_falls_back_to_first_move() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        let game = Position::new_game();
        let config = SearchConfig {
            depth: 3,
            node_limit: Some(1),
            movetime_ms: None,
        };

        let result = search(&game, &generator, &scorer, &config);
        assert!(result.aborted);
        assert_eq!(result.nodes, 1);
        assert_eq!(result.best_move, Some(mv("A2 -> A3")));
        assert_eq!(result.best_score, scorer.score(&game));
    }

    #[test]
    fn partial_root_keeps_best_completed_move() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        let game = Position::new_game();
        let first_four: Vec<ChessMove> = generator.legal_moves(&game).into_iter().take(4).collect();

        let limits = SearchLimits {
            node_limit: Some(5),
            deadline: None,
        };
        let result = search_with_signal(&game, &generator, &scorer, 1, &limits);
        assert!(result.aborted);
        assert_eq!(result.nodes, 5);
        let best = result.best_move.expect("some root move completed");
        assert!(first_four.contains(&best));
    }

    #[test]
    fn stop_flag_aborts_search() {
        let generator = LegalMoveGenerator::default();
        let scorer = MaterialScorer;
        let stop = AtomicBool::new(true);
        let result = search_with_signal(&Position::new_game(), &generator, &scorer, 4, &stop);
        assert!(result.aborted);
        assert_eq!(result.best_move, Some(mv("A2 -> A3")));

        let never = search_with_signal(&Position::new_game(), &generator, &scorer, 1, &NeverAbort);
        assert!(!never.aborted);
        assert_eq!(never.nodes, 21);
    }

    #[test]
    fn terminal_root_reports_no_move() {
        let generator = LegalMoveGenerator::default();
        let scorer = StandardScorer::default();
        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let result = search(&stalemate, &generator, &scorer, &SearchConfig::default());
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, DRAW_SCORE);
        assert!(!result.aborted);
    }
}
