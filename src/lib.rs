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

//! A two-player chess rules engine.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use kingsafe::GameState;
//!
//! let mut state = GameState::new();
//! let legals = state.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use kingsafe::{GameState, Move, Role, Square};
//!
//! let mut state = GameState::new();
//!
//! // 1. e4
//! let m = Move::from_board(state.board(), Square::E2, Square::E4, Role::Queen).unwrap();
//! state.play(&m)?;
//! assert_eq!(state.move_log(), [m]);
//! # Ok::<_, kingsafe::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use kingsafe::{fen::Fen, Color, Outcome};
//!
//! let mut state = "7k/6Q1/6K1/8/8/8/8/8 b - - 0 1".parse::<Fen>()?.into_state()?;
//! assert!(state.legal_moves().is_empty());
//! assert!(state.is_checkmate());
//! assert_eq!(state.outcome(), Some(Outcome::Decisive { winner: Color::White }));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Let the computer pick a reply with a [`search::Selector`]:
//!
//! ```
//! use kingsafe::{search::{Negamax, Selector}, GameState};
//!
//! let mut state = GameState::new();
//! let legals = state.legal_moves();
//! let reply = Negamax::default().choose(&mut state, &legals);
//! assert!(reply.is_some());
//! ```
//!
//! Also supports [FEN](fen) for positions and [UCI](uci) for moves. A game
//! can be saved as its [`GameState::ucis()`] and restored with
//! [`GameState::replay()`].
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![doc(html_root_url = "https://docs.rs/kingsafe/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[macro_use]
mod util;
mod color;
mod m;
mod movegen;
mod perft;
mod position;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod board;
pub mod fen;
pub mod search;
pub mod uci;

pub use board::Board;
pub use color::{ByColor, Color, ParseColorError};
pub use m::{Move, MoveList};
pub use movegen::pseudo_legal_moves;
pub use perft::{debug_perft, perft};
pub use position::{
    GameState, Outcome, ParseOutcomeError, PlayError, PositionError, PositionErrorKinds,
};
pub use role::{ParseRoleError, Role};
pub use square::{ParseSquareError, Square};
pub use types::Piece;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
