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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use kingsafe::{perft, GameState};
//!
//! let mut state = GameState::new();
//! assert_eq!(perft(&mut state, 1), 20);
//! assert_eq!(perft(&mut state, 2), 400);
//! assert_eq!(perft(&mut state, 3), 8902);
//! ```

use crate::{position::GameState, uci::Uci};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the
/// final position. Useful for comparing, testing and debugging move
/// generation correctness and performance.
///
/// Moves are played and taken back on the given state, so it is unchanged
/// when this returns.
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = state.gen_legal();

    if depth == 1 {
        moves.len() as u64
    } else {
        moves
            .iter()
            .map(|m| {
                state.execute_move(m);
                let nodes = perft(state, depth - 1);
                state.undo_move();
                nodes
            })
            .sum()
    }
}

/// Like [`perft()`], but also prints the perft of each child for debugging.
pub fn debug_perft(state: &mut GameState, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    state
        .gen_legal()
        .iter()
        .map(|m| {
            state.execute_move(m);
            let nodes = perft(state, depth - 1);
            state.undo_move();
            println!("{} {} {}: {}", Uci::from_move(m), m, depth - 1, nodes);
            nodes
        })
        .sum()
}
