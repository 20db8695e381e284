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

//! Pseudo-legal move generation.
//!
//! The generators here follow the movement rules of each piece but do not
//! look at checks. Filtering out moves that expose the king happens in
//! [`GameState`](crate::GameState).

use crate::{
    attacks,
    board::Board,
    color::Color,
    m::{Move, MoveList},
    role::Role,
    square::Square,
    types::Piece,
};

/// Pieces that move to a fixed set of offsets.
trait Stepper {
    const OFFSETS: &'static [(i8, i8)];

    fn gen_moves(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
        for &(dr, dc) in Self::OFFSETS {
            if let Some(to) = from.offset(dr, dc) {
                push_unless_own(board, from, piece, to, moves);
            }
        }
    }
}

/// Pieces that move along rays until blocked.
trait Slider {
    const DIRECTIONS: &'static [(i8, i8)];

    fn gen_moves(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
        for &direction in Self::DIRECTIONS {
            for to in attacks::ray(from, direction) {
                push_unless_own(board, from, piece, to, moves);
                if board.piece_at(to).is_some() {
                    break;
                }
            }
        }
    }
}

struct KingTag;
struct KnightTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

impl Stepper for KingTag {
    const OFFSETS: &'static [(i8, i8)] = &attacks::KING_OFFSETS;
}

impl Stepper for KnightTag {
    const OFFSETS: &'static [(i8, i8)] = &attacks::KNIGHT_OFFSETS;
}

impl Slider for BishopTag {
    const DIRECTIONS: &'static [(i8, i8)] = &attacks::BISHOP_DIRECTIONS;
}

impl Slider for RookTag {
    const DIRECTIONS: &'static [(i8, i8)] = &attacks::ROOK_DIRECTIONS;
}

impl Slider for QueenTag {
    const DIRECTIONS: &'static [(i8, i8)] = &attacks::QUEEN_DIRECTIONS;
}

/// Adds the move to `to` if that square is empty or holds an enemy piece.
fn push_unless_own(board: &Board, from: Square, piece: Piece, to: Square, moves: &mut MoveList) {
    match board.piece_at(to) {
        Some(occupant) if occupant.color == piece.color => (),
        capture => moves.push(Move::new(piece, from, capture, to, Role::Queen)),
    }
}

fn gen_pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    promotion: Role,
    moves: &mut MoveList,
) {
    let pawn = color.pawn();
    let forward = color.forward();

    if let Some(single) = from.offset(forward, 0).filter(|&sq| board.piece_at(sq).is_none()) {
        moves.push(Move::new(pawn, from, None, single, promotion));

        if from.row() == color.pawn_row() {
            if let Some(double) = single.offset(forward, 0).filter(|&sq| board.piece_at(sq).is_none()) {
                moves.push(Move::new(pawn, from, None, double, promotion));
            }
        }
    }

    for side in [-1, 1] {
        if let Some(to) = from.offset(forward, side) {
            if let Some(victim) = board.piece_at(to).filter(|victim| victim.color != color) {
                moves.push(Move::new(pawn, from, Some(victim), to, promotion));
            }
        }
    }
}

impl Piece {
    /// Appends the pseudo-legal moves of this piece standing on `from`.
    ///
    /// Pawn moves onto the last row are marked as promotions to
    /// `promotion`. Moves are generated in a fixed order: ray by ray for
    /// sliders, offset table order for knights and kings, and for pawns the
    /// single push, the double push, then the captures towards the lower
    /// and the higher column.
    ///
    /// # Examples
    ///
    /// ```
    /// use kingsafe::{Board, MoveList, Role, Square};
    ///
    /// let board = Board::default();
    /// let knight = board.piece_at(Square::G1).unwrap();
    ///
    /// let mut moves = MoveList::new();
    /// knight.pseudo_legal_moves(Square::G1, &board, Role::Queen, &mut moves);
    /// let targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
    /// assert_eq!(targets, [Square::F3, Square::H3]);
    /// ```
    pub fn pseudo_legal_moves(self, from: Square, board: &Board, promotion: Role, moves: &mut MoveList) {
        match self.role {
            Role::Pawn => gen_pawn_moves(board, from, self.color, promotion, moves),
            Role::Knight => KnightTag::gen_moves(board, from, self, moves),
            Role::Bishop => BishopTag::gen_moves(board, from, self, moves),
            Role::Rook => RookTag::gen_moves(board, from, self, moves),
            Role::Queen => QueenTag::gen_moves(board, from, self, moves),
            Role::King => KingTag::gen_moves(board, from, self, moves),
        }
    }
}

/// Generates the pseudo-legal moves of every piece of `color`, scanning the
/// board in row-major order.
pub fn pseudo_legal_moves(board: &Board, color: Color, promotion: Role) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in board.pieces().filter(|(_, piece)| piece.color == color) {
        piece.pseudo_legal_moves(from, board, promotion, &mut moves);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_board_fen(fen.as_bytes()).expect("valid board fen")
    }

    fn targets(board: &Board, from: Square) -> Vec<Square> {
        let mut moves = MoveList::new();
        let piece = board.piece_at(from).expect("piece on from square");
        piece.pseudo_legal_moves(from, board, Role::Queen, &mut moves);
        moves.iter().map(|m| m.to).collect()
    }

    #[test]
    fn test_starting_position() {
        let board = Board::default();
        assert_eq!(pseudo_legal_moves(&board, Color::White, Role::Queen).len(), 20);
        assert_eq!(pseudo_legal_moves(&board, Color::Black, Role::Queen).len(), 20);
        assert_eq!(targets(&board, Square::E2), [Square::E3, Square::E4]);
        assert_eq!(targets(&board, Square::D7), [Square::D6, Square::D5]);
        assert!(targets(&board, Square::A1).is_empty());
    }

    #[test]
    fn test_rook_ray_order_and_blocking() {
        // Own knight on d6 blocks upwards, enemy pawn on f4 is captured.
        let b = board("4k3/8/3N4/8/3R1p2/8/8/4K3");
        assert_eq!(
            targets(&b, Square::D4),
            [
                Square::D5,
                Square::C4,
                Square::B4,
                Square::A4,
                Square::D3,
                Square::D2,
                Square::D1,
                Square::E4,
                Square::F4,
            ]
        );
    }

    #[test]
    fn test_bishop_and_queen_rays() {
        let b = board("4k3/8/8/2p5/3B4/8/5P2/4K3");
        assert_eq!(
            targets(&b, Square::D4),
            [Square::C5, Square::C3, Square::B2, Square::A1, Square::E3, Square::E5, Square::F6, Square::G7, Square::H8]
        );

        let b = board("4k3/8/8/8/8/8/8/Q3K3");
        assert_eq!(targets(&b, Square::A1).len(), 7 + 3 + 7);
    }

    #[test]
    fn test_knight_offsets() {
        let b = board("4k3/8/8/8/8/8/2p5/N3K3");
        assert_eq!(targets(&b, Square::A1), [Square::C2, Square::B3]);
        let b = board("4k3/8/8/8/8/8/2P5/N3K3");
        assert_eq!(targets(&b, Square::A1), [Square::B3]);
    }

    #[test]
    fn test_king_offsets() {
        let b = board("4k3/8/8/8/8/8/3Pp3/4K3");
        assert_eq!(targets(&b, Square::E1), [Square::E2, Square::D1, Square::F1, Square::F2]);
    }

    #[test]
    fn test_pawn_moves() {
        // Blocked double push, captures only onto enemy pieces.
        let b = board("4k3/8/8/8/4n3/3p1P2/4P3/4K3");
        assert_eq!(targets(&b, Square::E2), [Square::E3, Square::D3]);

        let b = board("4k3/8/8/8/8/4n3/4P3/4K3");
        assert!(targets(&b, Square::E2).is_empty());

        // Not on the starting row, no double push.
        let b = board("4k3/8/8/8/8/4P3/8/4K3");
        assert_eq!(targets(&b, Square::E3), [Square::E4]);

        let b = board("4k3/8/8/8/8/8/1p6/R3K3");
        assert_eq!(targets(&b, Square::B2), [Square::B1, Square::A1]);
    }

    #[test]
    fn test_pawn_promotion_flag() {
        let b = board("1n2k3/P7/8/8/8/8/8/4K3");
        let mut moves = MoveList::new();
        Color::White
            .pawn()
            .pseudo_legal_moves(Square::A7, &b, Role::Rook, &mut moves);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.promotion == Some(Role::Rook)));
        assert_eq!(moves[1].capture, Some(Color::Black.knight()));
    }
}
