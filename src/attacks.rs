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

//! Movement tables and attack detection.
//!
//! Directions are `(row delta, col delta)` pairs. Row deltas are negative
//! towards Black's side of the board. The order of each table is the order
//! in which moves are generated.

use std::iter;

use crate::{board::Board, color::Color, square::Square, types::Piece};

/// Orthogonal rays: up, left, down, right.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Diagonal rays: up-left, down-left, down-right, up-right.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

/// Rook rays followed by bishop rays.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (1, -1),
    (1, 1),
    (-1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Squares reached by repeatedly stepping from `from` in `direction`,
/// excluding `from` itself and ending at the edge of the board.
///
/// # Examples
///
/// ```
/// use kingsafe::{attacks, Square};
///
/// let ray: Vec<Square> = attacks::ray(Square::F6, (-1, 1)).collect();
/// assert_eq!(ray, [Square::G7, Square::H8]);
/// ```
pub fn ray(from: Square, (dr, dc): (i8, i8)) -> impl Iterator<Item = Square> {
    iter::successors(from.offset(dr, dc), move |sq| sq.offset(dr, dc))
}

/// The first occupied square along a ray, if any.
fn first_blocker(board: &Board, from: Square, direction: (i8, i8)) -> Option<Square> {
    ray(from, direction).find(|&sq| board.piece_at(sq).is_some())
}

/// Tests if any piece of `attacker` could capture on `sq`.
///
/// This looks outward from the target square instead of generating every
/// move of the attacking side, and does not depend on whose turn it is.
/// For a square holding a piece of the other color it agrees with
/// checking whether any pseudo-legal move of `attacker` ends on `sq`.
///
/// # Examples
///
/// ```
/// use kingsafe::{attacks, Board, Color, Square};
///
/// let board = Board::default();
/// assert!(attacks::is_attacked(&board, Square::F3, Color::White));
/// assert!(!attacks::is_attacked(&board, Square::E4, Color::White));
/// ```
pub fn is_attacked(board: &Board, sq: Square, attacker: Color) -> bool {
    let occupant_is = |target: Option<Square>, pieces: &[Piece]| {
        target
            .and_then(|t| board.piece_at(t))
            .is_some_and(|piece| pieces.contains(&piece))
    };

    let knight = [attacker.knight()];
    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, dc)| occupant_is(sq.offset(dr, dc), &knight))
    {
        return true;
    }

    let king = [attacker.king()];
    if KING_OFFSETS
        .iter()
        .any(|&(dr, dc)| occupant_is(sq.offset(dr, dc), &king))
    {
        return true;
    }

    // A pawn captures one row forward, so it stands one row behind the
    // target from its own point of view.
    let pawn = [attacker.pawn()];
    let behind = -attacker.forward();
    if occupant_is(sq.offset(behind, -1), &pawn) || occupant_is(sq.offset(behind, 1), &pawn) {
        return true;
    }

    let orthogonal = [attacker.rook(), attacker.queen()];
    if ROOK_DIRECTIONS
        .iter()
        .any(|&dir| occupant_is(first_blocker(board, sq, dir), &orthogonal))
    {
        return true;
    }

    let diagonal = [attacker.bishop(), attacker.queen()];
    BISHOP_DIRECTIONS
        .iter()
        .any(|&dir| occupant_is(first_blocker(board, sq, dir), &diagonal))
}
