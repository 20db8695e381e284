// This file is part of the kingsafe library.
// Copyright (C) 2026 The kingsafe developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Move selectors.
//!
//! A [`Selector`] picks one of the legal moves of a position. Two are
//! provided: [`RandomSelector`] chooses uniformly at random, and
//! [`Negamax`] runs a fixed-depth alpha-beta search over a static
//! [`Evaluate`] function.
//!
//! # Examples
//!
//! ```
//! use kingsafe::{fen::Fen, search::{Negamax, Selector}, Square};
//!
//! // Back rank mate in one.
//! let mut state = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse::<Fen>()?.into_state()?;
//! let legal = state.legal_moves();
//!
//! let mut negamax = Negamax::default();
//! let m = negamax.choose(&mut state, &legal).expect("not game over");
//! assert_eq!(m.to, Square::A8);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::time::{Duration, Instant};

use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::{board::Board, color::Color, m::Move, position::GameState};

/// Score of a checkmate, from the point of view of the winner. Mates found
/// closer to the root score slightly higher.
pub const MATE_SCORE: i32 = 100_000;

const INFINITY: i32 = MATE_SCORE + 1;

/// Static evaluation of a board.
pub trait Evaluate {
    /// Scores the board. Positive values favor White.
    fn evaluate(&self, board: &Board) -> i32;
}

/// Counts material using [`Role::value()`](crate::Role::value).
#[derive(Copy, Clone, Debug, Default)]
pub struct Material;

impl Evaluate for Material {
    fn evaluate(&self, board: &Board) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| piece.color.fold(piece.value(), -piece.value()))
            .sum()
    }
}

/// Picks a move to play.
pub trait Selector {
    /// Chooses one of `legal`, the legal moves of `state`. Returns `None`
    /// only if `legal` is empty.
    ///
    /// The state may be used as scratch space but is restored before this
    /// returns.
    fn choose(&mut self, state: &mut GameState, legal: &[Move]) -> Option<Move>;
}

/// Chooses a legal move uniformly at random.
#[derive(Debug)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> RandomSelector<R> {
        RandomSelector { rng }
    }
}

impl<R: Rng> Selector for RandomSelector<R> {
    fn choose(&mut self, _state: &mut GameState, legal: &[Move]) -> Option<Move> {
        legal.choose(&mut self.rng).copied()
    }
}

/// Limits for [`Negamax`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// Plies to look ahead. A depth of 0 picks the first legal move.
    pub depth: u32,
    /// Stop expanding new nodes once this much time has passed. The best
    /// move found so far is returned.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            depth: 2,
            time_limit: None,
        }
    }
}

/// Fixed-depth negamax search with alpha-beta pruning.
///
/// Scores are relative to the side to move at each node. Checkmate scores
/// [`MATE_SCORE`] minus the distance to the root, stalemate scores 0, and
/// other positions at the depth limit are scored by the evaluator. Moves
/// are searched in generation order, so equal positions always produce the
/// same choice.
#[derive(Debug)]
pub struct Negamax<E> {
    evaluator: E,
    config: SearchConfig,
    nodes: u64,
    deadline: Option<Instant>,
}

impl Default for Negamax<Material> {
    fn default() -> Negamax<Material> {
        Negamax::new(Material, SearchConfig::default())
    }
}

impl<E: Evaluate> Negamax<E> {
    pub fn new(evaluator: E, config: SearchConfig) -> Negamax<E> {
        Negamax {
            evaluator,
            config,
            nodes: 0,
            deadline: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of positions visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches the legal moves of `state` and returns the best one with
    /// its score, or `None` if the game is over.
    pub fn search(&mut self, state: &mut GameState) -> Option<(Move, i32)> {
        let legal = state.legal_moves();
        self.search_moves(state, &legal)
    }

    fn search_moves(&mut self, state: &mut GameState, legal: &[Move]) -> Option<(Move, i32)> {
        self.nodes = 0;
        self.deadline = self.config.time_limit.map(|limit| Instant::now() + limit);

        let mut best_move = *legal.first()?;
        if self.config.depth == 0 {
            return Some((best_move, self.leaf_score(state)));
        }

        let mut best = -INFINITY;

        for m in legal {
            if best > -INFINITY && self.is_out_of_time() {
                debug!(nodes = self.nodes, "search deadline reached");
                break;
            }

            state.execute_move(m);
            let score = -self.negamax(state, self.config.depth - 1, 1, -INFINITY, -best);
            state.undo_move();

            debug!(%m, score, "root move");

            if score > best {
                best = score;
                best_move = *m;
            }
        }

        debug!(best = %best_move, score = best, nodes = self.nodes, "search finished");
        Some((best_move, best))
    }

    fn negamax(&mut self, state: &mut GameState, depth: u32, ply: i32, alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let moves = state.legal_moves();
        if state.is_checkmate() {
            return -(MATE_SCORE - ply);
        }
        if state.is_stalemate() {
            return 0;
        }

        if depth == 0 || self.is_out_of_time() {
            return self.leaf_score(state);
        }

        let mut best = -INFINITY;

        for m in &moves {
            state.execute_move(m);
            let score = -self.negamax(state, depth - 1, ply + 1, -beta, -alpha.max(best));
            state.undo_move();

            best = best.max(score);
            if best >= beta {
                break;
            }
        }

        best
    }

    fn leaf_score(&self, state: &GameState) -> i32 {
        let score = self.evaluator.evaluate(state.board());
        match state.turn() {
            Color::White => score,
            Color::Black => -score,
        }
    }

    fn is_out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl<E: Evaluate> Selector for Negamax<E> {
    fn choose(&mut self, state: &mut GameState, legal: &[Move]) -> Option<Move> {
        self.search_moves(state, legal).map(|(m, _)| m)
    }
}
