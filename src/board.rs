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
    ops,
};

use crate::{
    color::Color,
    role::Role,
    square::Square,
    types::Piece,
};

/// [`Piece`] positions on an 8x8 grid.
///
/// Each cell holds at most one piece. The board has no notion of whose turn
/// it is and does not validate what is placed on it.
///
/// # Examples
///
/// ```
/// use kingsafe::{Board, Color, Square};
///
/// let board = Board::default();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.king_of(Color::Black), Some(Square::E8));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();

        for color in Color::ALL {
            for (col, role) in (0..8).zip(BACKRANK) {
                board.set_piece_at(Square::new(color.backrank(), col), role.of(color));
                board.set_piece_at(Square::new(color.pawn_row(), col), color.pawn());
            }
        }

        board
    }

    /// A board without any pieces.
    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Puts a piece on a square, returning whatever stood there before.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cells[sq.index()].replace(piece)
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Sets a cell to exactly the given contents.
    #[inline]
    pub fn set(&mut self, sq: Square, contents: Option<Piece>) {
        self.cells[sq.index()] = contents;
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Iterates over all pieces in row-major order, starting at `a8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Finds the first king of the given color.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == color.king())
            .map(|(sq, _)| sq)
    }

    /// Counts pieces of the given kind.
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }

    /// Renders the piece placement part of a FEN, such as
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);

        for row in 0..8 {
            let mut empty = 0;

            for col in 0..8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }

            if row < 7 {
                fen.push('/');
            }
        }

        fen
    }

    /// Parses the piece placement part of a FEN.
    pub fn from_board_fen(board_fen: &[u8]) -> Option<Board> {
        let mut board = Board::empty();

        let mut row = 0;
        let mut col = 0;

        for &ch in board_fen {
            if ch == b'/' && col == 8 {
                row += 1;
                col = 0;
            } else if (b'1'..=b'8').contains(&ch) {
                col += ch - b'0';
                if col > 8 {
                    return None;
                }
            } else {
                let piece = Piece::from_char(char::from(ch))?;
                let sq = Square::from_coords(row as i8, col as i8)?;
                board.set_piece_at(sq, piece);
                col += 1;
            }
        }

        if row == 7 && col == 8 {
            Some(board)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl ops::Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, sq: Square) -> &Option<Piece> {
        &self.cells[sq.index()]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                f.write_char(
                    self.piece_at(Square::new(row, col))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}
