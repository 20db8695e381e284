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

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::{
    attacks,
    board::Board,
    color::{ByColor, Color},
    m::{Move, MoveList},
    movegen,
    role::Role,
    square::Square,
    uci::{IllegalUciError, Uci},
};

/// Outcome of a game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// Error when parsing the outcome of a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        Ok(match s {
            "1-0" => Outcome::Decisive {
                winner: Color::White,
            },
            "0-1" => Outcome::Decisive {
                winner: Color::Black,
            },
            "1/2-1/2" => Outcome::Draw,
            _ => return Err(ParseOutcomeError),
        })
    }
}

/// Error when trying to play an illegal move.
#[derive(Debug)]
pub struct PlayError {
    m: Move,
}

impl PlayError {
    /// The rejected move.
    pub fn into_move(self) -> Move {
        self.m
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}", self.m)
    }
}

impl Error for PlayError {}

bitflags! {
    /// Reasons for a board not being a legal starting point for a game.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A side has no king.
        const MISSING_KING = 1 << 1;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;

        /// There are pawns on the first or last row. Pawns could never
        /// have got there, and pawns on their own promotion row would
        /// never have been promoted.
        const PAWNS_ON_BACKRANK = 1 << 3;

        /// The side that just moved left its king in check.
        const OPPOSITE_CHECK = 1 << 4;

        /// A side has more material than promotions from its eight pawns
        /// could ever produce. Such boards could overflow a
        /// [`MoveList`](crate::MoveList).
        const TOO_MUCH_MATERIAL = 1 << 5;
    }
}

/// Error when trying to create a [`GameState`] from an illegal setup.
#[derive(Clone, Debug)]
pub struct PositionError {
    errors: PositionErrorKinds,
}

impl PositionError {
    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position")?;

        let mut reasons = Vec::new();
        if self.errors.contains(PositionErrorKinds::EMPTY_BOARD) {
            reasons.push("empty board");
        }
        if self.errors.contains(PositionErrorKinds::MISSING_KING) {
            reasons.push("missing king");
        }
        if self.errors.contains(PositionErrorKinds::TOO_MANY_KINGS) {
            reasons.push("too many kings");
        }
        if self.errors.contains(PositionErrorKinds::PAWNS_ON_BACKRANK) {
            reasons.push("pawns on backrank");
        }
        if self.errors.contains(PositionErrorKinds::OPPOSITE_CHECK) {
            reasons.push("opposite check");
        }
        if self.errors.contains(PositionErrorKinds::TOO_MUCH_MATERIAL) {
            reasons.push("too much material");
        }

        if !reasons.is_empty() {
            write!(f, ": {}", reasons.join(", "))?;
        }

        Ok(())
    }
}

impl Error for PositionError {}

/// The state of a game: board, side to move, move history and the
/// checkmate and stalemate flags.
///
/// The flags are only raised by [`GameState::legal_moves()`] finding that
/// the side to move has nothing to play, and are cleared again by any
/// move executed or undone.
///
/// # Examples
///
/// ```
/// use kingsafe::{GameState, Square};
///
/// let mut state = GameState::new();
/// let legals = state.legal_moves();
/// assert_eq!(legals.len(), 20);
///
/// let m = legals.iter().find(|m| m.from == Square::E2 && m.to == Square::E4).unwrap();
/// state.play(m)?;
/// assert_eq!(state.move_log().len(), 1);
///
/// state.undo_move();
/// assert!(state.move_log().is_empty());
/// # Ok::<_, kingsafe::PlayError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    turn: Color,
    log: Vec<Move>,
    kings: ByColor<Square>,
    fullmoves: u32,
    promotion: Role,
    checkmate: bool,
    stalemate: bool,
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

impl GameState {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            turn: Color::White,
            log: Vec::new(),
            kings: ByColor {
                white: Square::E1,
                black: Square::E8,
            },
            fullmoves: 1,
            promotion: Role::Queen,
            checkmate: false,
            stalemate: false,
        }
    }

    /// Starts a game from an arbitrary arrangement of pieces.
    ///
    /// # Errors
    ///
    /// Errors if the board does not have exactly one king per side, has
    /// pawns on the first or last row, has more pieces for a side than
    /// promotion could produce, or if the side not to move is in check.
    pub fn from_setup(board: Board, turn: Color) -> Result<GameState, PositionError> {
        let mut errors = PositionErrorKinds::empty();

        if board.is_empty() {
            errors |= PositionErrorKinds::EMPTY_BOARD;
        }

        for color in Color::ALL {
            match board.count(color.king()) {
                0 => errors |= PositionErrorKinds::MISSING_KING,
                1 => (),
                _ => errors |= PositionErrorKinds::TOO_MANY_KINGS,
            }
        }

        if board
            .pieces()
            .any(|(sq, piece)| piece.role == Role::Pawn && (sq.row() == 0 || sq.row() == 7))
        {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        if Color::ALL.into_iter().any(|color| too_much_material(&board, color)) {
            errors |= PositionErrorKinds::TOO_MUCH_MATERIAL;
        }

        let kings = ByColor::new_with(|color| board.king_of(color));

        if let Some(their_king) = kings.get(!turn) {
            if attacks::is_attacked(&board, *their_king, turn) {
                errors |= PositionErrorKinds::OPPOSITE_CHECK;
            }
        }

        match kings {
            ByColor {
                white: Some(white),
                black: Some(black),
            } if errors.is_empty() => Ok(GameState {
                board,
                turn,
                kings: ByColor { white, black },
                ..GameState::new()
            }),
            _ => Err(PositionError { errors }),
        }
    }

    /// Starts a game from the standard starting position and plays the
    /// given moves.
    ///
    /// # Errors
    ///
    /// Errors on the first move that is not legal in the position reached
    /// so far.
    pub fn replay(ucis: &[Uci]) -> Result<GameState, IllegalUciError> {
        let mut state = GameState::new();
        for uci in ucis {
            let m = uci.to_move(&state)?;
            state.execute_move(&m);
        }
        Ok(state)
    }

    /// Discards the game and returns to the starting position. The
    /// promotion policy is kept.
    pub fn reset(&mut self) {
        *self = GameState {
            promotion: self.promotion,
            ..GameState::new()
        };
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Moves played so far, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.log
    }

    /// The move log in UCI notation, suitable for [`GameState::replay()`].
    pub fn ucis(&self) -> Vec<Uci> {
        self.log.iter().map(Uci::from_move).collect()
    }

    /// Gets the square of the king of the given color.
    #[inline]
    pub fn king_of(&self, color: Color) -> Square {
        *self.kings.get(color)
    }

    /// The number of the current move, starting at 1 and incremented after
    /// each Black move.
    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    pub(crate) fn set_fullmoves(&mut self, fullmoves: u32) {
        self.fullmoves = fullmoves;
    }

    /// The piece pawns are promoted to when a move does not ask for a
    /// specific one. Defaults to [`Role::Queen`].
    #[inline]
    pub fn promotion(&self) -> Role {
        self.promotion
    }

    /// Sets the default promotion piece for moves generated from now on.
    /// Pawns and kings are not promotion pieces and leave the policy
    /// unchanged.
    pub fn set_promotion(&mut self, role: Role) {
        if role.is_promotion_target() {
            self.promotion = role;
        }
    }

    /// Generates the pseudo-legal moves of the side to move. These obey the
    /// movement rules of each piece, but may leave the own king in check.
    pub fn possible_moves(&self) -> MoveList {
        movegen::pseudo_legal_moves(&self.board, self.turn, self.promotion)
    }

    /// Generates the legal moves of the side to move.
    ///
    /// If there are none, this raises the checkmate or stalemate flag,
    /// depending on whether the side to move is in check.
    pub fn legal_moves(&mut self) -> MoveList {
        let moves = self.gen_legal();

        if moves.is_empty() {
            self.check_gameover_conditions();
        }

        moves
    }

    /// Like [`GameState::legal_moves()`], but leaves the flags alone.
    pub(crate) fn gen_legal(&self) -> MoveList {
        let mut moves = self.possible_moves();
        moves.retain(|m| self.keeps_king_safe(m));
        moves
    }

    /// Plays the move on a copy of the board and tests if the mover's king
    /// is attacked afterwards.
    fn keeps_king_safe(&self, m: &Move) -> bool {
        let mut board = self.board.clone();
        apply(&mut board, m);

        let king = if m.role() == Role::King {
            m.to
        } else {
            self.king_of(m.piece.color)
        };

        !attacks::is_attacked(&board, king, !m.piece.color)
    }

    /// Tests whether any pseudo-legal move of `attacker` ends on `sq`.
    ///
    /// The turn is not consulted, so this can be asked for either side at
    /// any time.
    pub fn square_under_attack(&self, sq: Square, attacker: Color) -> bool {
        movegen::pseudo_legal_moves(&self.board, attacker, self.promotion)
            .iter()
            .any(|m| m.to == sq)
    }

    /// Tests whether `attacker` attacks `sq`, looking outward from the
    /// square. Agrees with [`GameState::square_under_attack()`] on occupied
    /// squares.
    #[inline]
    pub fn is_attacked(&self, sq: Square, attacker: Color) -> bool {
        attacks::is_attacked(&self.board, sq, attacker)
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_attacked(self.king_of(self.turn), !self.turn)
    }

    fn check_gameover_conditions(&mut self) {
        if self.is_check() {
            debug!(loser = %self.turn, "checkmate");
            self.checkmate = true;
        } else {
            debug!(turn = %self.turn, "stalemate");
            self.stalemate = true;
        }
    }

    /// Tests if the move is legal in the current position.
    pub fn is_legal(&self, m: &Move) -> bool {
        self.gen_legal().contains(m)
    }

    /// Validates and plays a move, for example one assembled from two
    /// squares the user picked.
    ///
    /// If the given move asks for a promotion piece, that choice is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] and leaves the state untouched if the move is
    /// not legal.
    pub fn play(&mut self, m: &Move) -> Result<(), PlayError> {
        match self.gen_legal().iter().find(|legal| *legal == m) {
            Some(legal) => {
                let chosen = m.promotion.map_or(*legal, |role| legal.with_promotion(role));
                self.execute_move(&chosen);
                Ok(())
            }
            None => {
                debug!(%m, "rejected illegal move");
                Err(PlayError { m: *m })
            }
        }
    }

    /// Plays a move without checking it for legality.
    ///
    /// The move must have been generated from the current position. Pawns
    /// reaching the last row are replaced by the promotion piece the move
    /// carries.
    ///
    /// # Panics
    ///
    /// Panics if the move captures a king. Legal moves never do.
    pub fn execute_move(&mut self, m: &Move) {
        debug_assert_eq!(
            self.board.piece_at(m.from),
            Some(m.piece),
            "move {m} does not belong to this position"
        );

        assert!(
            m.capture.is_none_or(|piece| piece.role != Role::King),
            "move {m} captures a king"
        );

        apply(&mut self.board, m);

        if m.role() == Role::King {
            *self.kings.get_mut(m.piece.color) = m.to;
        }

        if self.turn == Color::Black {
            self.fullmoves += 1;
        }

        self.log.push(*m);
        self.turn = !self.turn;
        self.checkmate = false;
        self.stalemate = false;
    }

    /// Takes back the last move and returns it, or returns `None` if no
    /// moves have been played.
    pub fn undo_move(&mut self) -> Option<Move> {
        let m = self.log.pop()?;
        trace!(%m, "undo");

        self.board.set(m.to, m.capture);
        self.board.set(m.from, Some(m.piece));

        if m.role() == Role::King {
            *self.kings.get_mut(m.piece.color) = m.from;
        }

        self.turn = !self.turn;

        if self.turn == Color::Black {
            self.fullmoves -= 1;
        }

        self.checkmate = false;
        self.stalemate = false;

        Some(m)
    }

    /// Whether the last call to [`GameState::legal_moves()`] found the side
    /// to move checkmated.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Whether the last call to [`GameState::legal_moves()`] found the side
    /// to move stalemated.
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.stalemate
    }

    /// The outcome of the game, if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.checkmate {
            Some(Outcome::Decisive { winner: !self.turn })
        } else if self.stalemate {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

/// Whether `color` has more pieces than its starting set plus one promotion
/// per missing pawn.
fn too_much_material(board: &Board, color: Color) -> bool {
    let count = |role: Role| board.count(role.of(color));
    let pawns = count(Role::Pawn);
    let promoted = count(Role::Knight).saturating_sub(2)
        + count(Role::Bishop).saturating_sub(2)
        + count(Role::Rook).saturating_sub(2)
        + count(Role::Queen).saturating_sub(1);
    pawns > 8 || promoted > 8 - pawns
}

/// Moves the piece and applies the promotion. Shared by the live board and
/// the scratch copies used for legality checks.
fn apply(board: &mut Board, m: &Move) {
    board.remove_piece_at(m.from);
    board.set_piece_at(m.to, m.landing_piece());
}
