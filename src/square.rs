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

use std::{error::Error, fmt, str::FromStr};

/// A square of the 8x8 grid, addressed by `(row, col)`.
///
/// Row 0 is Black's back rank and row 7 is White's, so
/// [`Square::E2`] is `(6, 4)`. Constructing a square out of range is
/// impossible through the checked constructors, which is what keeps every
/// ray and offset walk in bounds.
///
/// # Examples
///
/// ```
/// use kingsafe::Square;
///
/// let sq = Square::new(6, 4);
/// assert_eq!(sq, Square::E2);
/// assert_eq!(sq.to_string(), "e2");
/// assert_eq!(sq.offset(-2, 0), Some(Square::E4));
/// assert_eq!(Square::H8.offset(0, 1), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Gets the square at `row` and `col`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is not in `0..8`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Square {
        assert!(row < 8 && col < 8, "square coordinates out of range");
        Square(row * 8 + col)
    }

    /// Gets the square at `row` and `col`, or `None` if that is off the
    /// board.
    #[inline]
    pub const fn from_coords(row: i8, col: i8) -> Option<Square> {
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Row-major index in `0..64`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Steps by `(dr, dc)`, or returns `None` when that leaves the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        Square::from_coords(self.row() as i8 + dr, self.col() as i8 + dc)
    }

    /// All 64 squares in row-major order, starting at `a8`.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }

    /// Gets the file letter, `a` to `h`.
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Gets the rank digit, `1` to `8`.
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }

    /// Parses a square name such as `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Square::new(b'8' - rank, file - b'a'))
            }
            _ => Err(ParseSquareError),
        }
    }

    pub const A1: Square = Square::new(7, 0);
    pub const B1: Square = Square::new(7, 1);
    pub const C1: Square = Square::new(7, 2);
    pub const D1: Square = Square::new(7, 3);
    pub const E1: Square = Square::new(7, 4);
    pub const F1: Square = Square::new(7, 5);
    pub const G1: Square = Square::new(7, 6);
    pub const H1: Square = Square::new(7, 7);
    pub const A2: Square = Square::new(6, 0);
    pub const B2: Square = Square::new(6, 1);
    pub const C2: Square = Square::new(6, 2);
    pub const D2: Square = Square::new(6, 3);
    pub const E2: Square = Square::new(6, 4);
    pub const F2: Square = Square::new(6, 5);
    pub const G2: Square = Square::new(6, 6);
    pub const H2: Square = Square::new(6, 7);
    pub const A3: Square = Square::new(5, 0);
    pub const B3: Square = Square::new(5, 1);
    pub const C3: Square = Square::new(5, 2);
    pub const D3: Square = Square::new(5, 3);
    pub const E3: Square = Square::new(5, 4);
    pub const F3: Square = Square::new(5, 5);
    pub const G3: Square = Square::new(5, 6);
    pub const H3: Square = Square::new(5, 7);
    pub const A4: Square = Square::new(4, 0);
    pub const B4: Square = Square::new(4, 1);
    pub const C4: Square = Square::new(4, 2);
    pub const D4: Square = Square::new(4, 3);
    pub const E4: Square = Square::new(4, 4);
    pub const F4: Square = Square::new(4, 5);
    pub const G4: Square = Square::new(4, 6);
    pub const H4: Square = Square::new(4, 7);
    pub const A5: Square = Square::new(3, 0);
    pub const B5: Square = Square::new(3, 1);
    pub const C5: Square = Square::new(3, 2);
    pub const D5: Square = Square::new(3, 3);
    pub const E5: Square = Square::new(3, 4);
    pub const F5: Square = Square::new(3, 5);
    pub const G5: Square = Square::new(3, 6);
    pub const H5: Square = Square::new(3, 7);
    pub const A6: Square = Square::new(2, 0);
    pub const B6: Square = Square::new(2, 1);
    pub const C6: Square = Square::new(2, 2);
    pub const D6: Square = Square::new(2, 3);
    pub const E6: Square = Square::new(2, 4);
    pub const F6: Square = Square::new(2, 5);
    pub const G6: Square = Square::new(2, 6);
    pub const H6: Square = Square::new(2, 7);
    pub const A7: Square = Square::new(1, 0);
    pub const B7: Square = Square::new(1, 1);
    pub const C7: Square = Square::new(1, 2);
    pub const D7: Square = Square::new(1, 3);
    pub const E7: Square = Square::new(1, 4);
    pub const F7: Square = Square::new(1, 5);
    pub const G7: Square = Square::new(1, 6);
    pub const H7: Square = Square::new(1, 7);
    pub const A8: Square = Square::new(0, 0);
    pub const B8: Square = Square::new(0, 1);
    pub const C8: Square = Square::new(0, 2);
    pub const D8: Square = Square::new(0, 3);
    pub const E8: Square = Square::new(0, 4);
    pub const F8: Square = Square::new(0, 5);
    pub const G8: Square = Square::new(0, 6);
    pub const H8: Square = Square::new(0, 7);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char().to_ascii_uppercase(), self.rank_char())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

serde_via_str!(Square, "square name");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col);
                assert_eq!(sq.row(), row);
                assert_eq!(sq.col(), col);
            }
        }
    }

    #[test]
    fn test_square_names() {
        assert_eq!(Square::A8, Square::new(0, 0));
        assert_eq!(Square::H1, Square::new(7, 7));
        assert_eq!("e2".parse::<Square>().unwrap(), Square::new(6, 4));
        assert_eq!(Square::C7.to_string(), "c7");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>().unwrap(), sq);
        }
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::A1.offset(1, 0), None);
        assert_eq!(Square::A1.offset(-1, 1), Some(Square::B2));
        assert_eq!(Square::from_coords(-1, 3), None);
    }
}
