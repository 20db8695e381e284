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

use std::{
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
};

use arrayvec::ArrayVec;

use crate::{board::Board, role::Role, square::Square, types::Piece};

/// A single board transition.
///
/// A move remembers the piece that was moved and the piece that was
/// captured, as they stood on the board it was generated from. That is
/// enough to take the move back, but it also means a move is only
/// meaningful for that board: it must not be replayed after the board has
/// changed in other ways.
///
/// Two moves are equal if they have the same origin, target, moved piece
/// and captured piece. The promotion target does not take part in
/// comparisons, so a move picked from the squares a user clicked matches
/// the generated move regardless of the piece chosen for promotion.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using long algebraic
/// notation, e.g. `Nb1-c3`, `e4xd5` or `e7-e8=Q`.
#[derive(Copy, Clone, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood on `from`.
    pub piece: Piece,
    /// The piece that stood on `to`, if any.
    pub capture: Option<Piece>,
    /// The piece a pawn turns into. Set exactly when the move is a pawn
    /// reaching the last row.
    pub promotion: Option<Role>,
}

impl Move {
    /// Builds a move from a board snapshot. Returns `None` if `from` is
    /// empty.
    ///
    /// Promotions are filled in with `promotion` as the target.
    pub fn from_board(board: &Board, from: Square, to: Square, promotion: Role) -> Option<Move> {
        let piece = board.piece_at(from)?;
        Some(Move::new(piece, from, board.piece_at(to), to, promotion))
    }

    pub(crate) fn new(
        piece: Piece,
        from: Square,
        capture: Option<Piece>,
        to: Square,
        promotion: Role,
    ) -> Move {
        let promotes = piece.role == Role::Pawn && to.row() == piece.color.promotion_row();
        Move {
            from,
            to,
            piece,
            capture,
            promotion: if promotes { Some(promotion) } else { None },
        }
    }

    /// Gets the role of the moved piece.
    #[inline]
    pub fn role(&self) -> Role {
        self.piece.role
    }

    /// Checks if the move is a capture.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Checks if the move is a pawn reaching the last row.
    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Replaces the promotion target of a promoting move. Moves that do not
    /// promote, and targets a pawn cannot become, are left unchanged.
    #[must_use]
    pub fn with_promotion(mut self, role: Role) -> Move {
        if self.is_promotion() && role.is_promotion_target() {
            self.promotion = Some(role);
        }
        self
    }

    /// The piece that ends up on `to`.
    pub fn landing_piece(&self) -> Piece {
        match self.promotion {
            Some(role) if role.is_promotion_target() => role.of(self.piece.color),
            Some(_) => self.piece.color.queen(),
            None => self.piece,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.piece == other.piece
            && self.capture == other.capture
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.piece.hash(state);
        self.capture.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.piece.role != Role::Pawn {
            f.write_char(self.piece.role.upper_char())?;
        }

        write!(
            f,
            "{}{}{}",
            self.from,
            if self.is_capture() { 'x' } else { '-' },
            self.to
        )?;

        if self.is_promotion() {
            write!(f, "={}", self.landing_piece().role.upper_char())?;
        }

        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough to hold the pseudo-legal moves of any reachable
/// position.
///
/// # Example
///
/// ```
/// use kingsafe::{GameState, Role};
///
/// let mut state = GameState::new();
/// let mut moves = state.legal_moves();
/// moves.retain(|m| m.role() == Role::Pawn);
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<Move, 256>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_structural_equality() {
        let board = Board::new();
        let a = Move::from_board(&board, Square::E2, Square::E4, Role::Queen).unwrap();
        let b = Move {
            from: Square::E2,
            to: Square::E4,
            piece: Color::White.pawn(),
            capture: None,
            promotion: None,
        };
        assert_eq!(a, b);
        assert_ne!(a, Move { capture: Some(Color::Black.pawn()), ..b });
        assert_eq!(Move::from_board(&board, Square::E4, Square::E5, Role::Queen), None);
    }

    #[test]
    fn test_promotion_flag() {
        let mut board = Board::empty();
        board.set_piece_at(Square::B7, Color::White.pawn());
        board.set_piece_at(Square::C8, Color::Black.rook());
        board.set_piece_at(Square::G2, Color::Black.pawn());

        let push = Move::from_board(&board, Square::B7, Square::B8, Role::Queen).unwrap();
        assert!(push.is_promotion());
        assert_eq!(push.landing_piece(), Color::White.queen());
        assert_eq!(push.to_string(), "b7-b8=Q");

        let capture = Move::from_board(&board, Square::B7, Square::C8, Role::Queen)
            .unwrap()
            .with_promotion(Role::Knight);
        assert_eq!(capture.landing_piece(), Color::White.knight());
        assert_eq!(capture.to_string(), "b7xc8=N");

        let black = Move::from_board(&board, Square::G2, Square::G1, Role::Rook).unwrap();
        assert_eq!(black.landing_piece(), Color::Black.rook());

        let quiet = Move::from_board(&board, Square::C8, Square::C1, Role::Queen).unwrap();
        assert!(!quiet.is_promotion());
        assert_eq!(quiet.with_promotion(Role::Knight).landing_piece(), Color::Black.rook());
        assert_eq!(quiet.to_string(), "Rc8-c1");
    }
}
