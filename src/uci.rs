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

//! Parse and write moves in the notation of the Universal Chess Interface.
//!
//! A UCI move names the origin and target squares, followed by the
//! promotion piece if any, for example `e2e4` or `b7b8q`.
//!
//! # Examples
//!
//! ```
//! use kingsafe::{uci::Uci, GameState, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//!
//! let mut state = GameState::new();
//! let m = uci.to_move(&state)?;
//! assert_eq!(m.from, Square::G1);
//! state.play(&m)?;
//!
//! assert_eq!(state.ucis(), [uci]);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Move, position::GameState, role::Role, square::Square};

/// Error when parsing an invalid UCI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// Error when a UCI is not a legal move in the current position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciError {
    uci: Uci,
}

impl fmt::Display for IllegalUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal uci: {}", self.uci)
    }
}

impl Error for IllegalUciError {}

/// A move as represented in the UCI protocol.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    pub fn from_ascii(s: &[u8]) -> Result<Uci, ParseUciError> {
        if s.len() != 4 && s.len() != 5 {
            return Err(ParseUciError);
        }

        let from = Square::from_ascii(&s[0..2]).map_err(|_| ParseUciError)?;
        let to = Square::from_ascii(&s[2..4]).map_err(|_| ParseUciError)?;

        let promotion = match s.get(4) {
            Some(&ch) => Some(
                Role::from_char(char::from(ch))
                    .filter(|role| role.is_promotion_target())
                    .ok_or(ParseUciError)?,
            ),
            None => None,
        };

        Ok(Uci {
            from,
            to,
            promotion,
        })
    }

    pub fn from_move(m: &Move) -> Uci {
        Uci {
            from: m.from,
            to: m.to,
            promotion: m.promotion.map(|_| m.landing_piece().role),
        }
    }

    /// Tries to convert the `Uci` to a legal [`Move`] in the context of a
    /// game. A promotion without an explicit piece uses the game's
    /// promotion policy.
    ///
    /// # Errors
    ///
    /// Errors if the move is not legal.
    pub fn to_move(&self, state: &GameState) -> Result<Move, IllegalUciError> {
        let candidate = Move::from_board(state.board(), self.from, self.to, state.promotion())
            .filter(|m| self.promotion.is_none() || m.is_promotion())
            .map(|m| match self.promotion {
                Some(role) => m.with_promotion(role),
                None => m,
            });

        match candidate {
            Some(m) if state.is_legal(&m) => Ok(m),
            _ => Err(IllegalUciError { uci: *self }),
        }
    }
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

impl From<&Move> for Uci {
    fn from(m: &Move) -> Uci {
        Uci::from_move(m)
    }
}

serde_via_str!(Uci, "uci move string");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, fen::Fen};

    #[test]
    fn test_parse_uci() {
        let uci: Uci = "e7e8n".parse().expect("valid uci");
        assert_eq!(
            uci,
            Uci {
                from: Square::E7,
                to: Square::E8,
                promotion: Some(Role::Knight),
            }
        );
        assert_eq!(uci.to_string(), "e7e8n");

        for invalid in ["", "e2", "e2e", "e2e4qq", "e2e9", "i2e4", "e7e8k", "e7e8p", "e7e8x"] {
            assert_eq!(invalid.parse::<Uci>(), Err(ParseUciError), "{invalid}");
        }
    }

    #[test]
    fn test_to_move() {
        let state = GameState::new();

        let m = "e2e4".parse::<Uci>().unwrap().to_move(&state).expect("legal");
        assert_eq!(m.piece, Color::White.pawn());

        for illegal in ["e2e5", "e7e5", "e3e4", "e2e4q"] {
            let uci: Uci = illegal.parse().unwrap();
            assert!(uci.to_move(&state).is_err(), "{illegal}");
        }
    }

    #[test]
    fn test_promotion_choice() {
        let state: GameState = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_state()
            .unwrap();

        let implicit = "a7a8".parse::<Uci>().unwrap().to_move(&state).unwrap();
        assert_eq!(implicit.promotion, Some(Role::Queen));
        assert_eq!(Uci::from_move(&implicit).to_string(), "a7a8q");

        let explicit = "a7a8b".parse::<Uci>().unwrap().to_move(&state).unwrap();
        assert_eq!(explicit.landing_piece(), Color::White.bishop());
        assert_eq!(Uci::from(&explicit).to_string(), "a7a8b");
    }

    #[test]
    fn test_replay() {
        let ucis: Vec<Uci> = ["e2e4", "e7e5", "g1f3"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let state = GameState::replay(&ucis).expect("legal game");
        assert_eq!(state.turn(), Color::Black);
        assert_eq!(state.fullmoves(), 2);
        assert_eq!(state.ucis(), ucis);

        let twice: Uci = "e2e4".parse().unwrap();
        let err = GameState::replay(&[twice, twice]).unwrap_err();
        assert_eq!(err.to_string(), "illegal uci: e2e4");
    }
}
