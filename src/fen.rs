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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! Castling rights and en passant squares are not part of the rules played
//! here. Their fields are accepted when parsing, as long as they are well
//! formed, and written as `-`.
//!
//! # Examples
//!
//! ```
//! use kingsafe::{fen::Fen, Color};
//!
//! let fen: Fen = "8/8/8/8/8/8/8/4K2k b - - 0 42".parse()?;
//! assert_eq!(fen.turn, Color::Black);
//! assert_eq!(fen.fullmoves, 42);
//!
//! let state = fen.into_state()?;
//! assert_eq!(Fen::from_state(&state).to_string(), "8/8/8/8/8/8/8/4K2k b - - 0 42");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    color::Color,
    position::{GameState, PositionError},
    square::Square,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A parsed FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            board: Board::default(),
            turn: Color::White,
            fullmoves: 1,
        }
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            ..Fen::default()
        }
    }

    pub fn from_state(state: &GameState) -> Fen {
        Fen {
            board: state.board().clone(),
            turn: state.turn(),
            fullmoves: state.fullmoves(),
        }
    }

    /// Sets up a game from the parsed position.
    ///
    /// # Errors
    ///
    /// Errors if the position is not a legal starting point. See
    /// [`GameState::from_setup()`].
    pub fn into_state(self) -> Result<GameState, PositionError> {
        let mut state = GameState::from_setup(self.board, self.turn)?;
        state.set_fullmoves(self.fullmoves);
        Ok(state)
    }

    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ');
        let mut result = Fen::empty();

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        result.board = Board::from_board_fen(board_part).ok_or(ParseFenError::InvalidBoard)?;

        result.turn = match parts.next() {
            None => Color::White,
            Some(&[ch]) => Color::from_char(char::from(ch)).ok_or(ParseFenError::InvalidTurn)?,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        if let Some(castling_part) = parts.next() {
            let well_formed = castling_part == b"-"
                || (!castling_part.is_empty()
                    && castling_part.len() <= 4
                    && castling_part.iter().all(|ch| b"KQkq".contains(ch)));
            if !well_formed {
                return Err(ParseFenError::InvalidCastling);
            }
        }

        match parts.next() {
            Some(b"-") | None => (),
            Some(ep_part) => {
                Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?;
            }
        }

        if let Some(halfmoves_part) = parts.next() {
            btoi::btou::<u32>(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            let fullmoves = btoi::btou::<u32>(fullmoves_part)
                .map_err(|_| ParseFenError::InvalidFullmoves)?;
            result.fullmoves = fullmoves.max(1);
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(result)
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - - 0 {}",
            self.board.board_fen(),
            self.turn.char(),
            self.fullmoves
        )
    }
}

serde_via_str!(Fen, "fen string");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_fen() {
        let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(fen, Fen::default());
        assert_eq!(
            fen.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
        );
    }

    #[test]
    fn test_optional_fields() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3".parse().expect("valid fen");
        assert_eq!(fen.turn, Color::White);
        assert_eq!(fen.fullmoves, 1);

        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b - e3".parse().expect("valid fen");
        assert_eq!(fen.turn, Color::Black);
    }

    #[test]
    fn test_invalid_fen() {
        let err = |s: &str| s.parse::<Fen>().unwrap_err();

        assert_eq!(err("4k3/8/8/8/8/8/8"), ParseFenError::InvalidBoard);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K4"), ParseFenError::InvalidBoard);
        assert_eq!(err("4k3/8/8/8/8/8/8/4X3"), ParseFenError::InvalidBoard);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 x"), ParseFenError::InvalidTurn);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 wb"), ParseFenError::InvalidTurn);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 "), ParseFenError::InvalidTurn);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 w KZ"), ParseFenError::InvalidCastling);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 w - z9"), ParseFenError::InvalidEpSquare);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 w - - x"), ParseFenError::InvalidHalfmoveClock);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 w - - 0 -1"), ParseFenError::InvalidFullmoves);
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"), ParseFenError::InvalidFen);
    }

    #[test]
    fn test_state_round_trip() {
        let mut state = GameState::new();
        let m = state.legal_moves()[0];
        state.play(&m).expect("legal move");

        let fen = Fen::from_state(&state);
        assert_eq!(fen.turn, Color::Black);
        assert_eq!(fen.fullmoves, 1);

        let restored = fen.clone().into_state().expect("legal position");
        assert_eq!(restored.board(), state.board());
        assert_eq!(restored.turn(), Color::Black);
        assert!(restored.move_log().is_empty());
    }
}
