use kingsafe::{
    fen::Fen,
    search::{RandomSelector, Selector},
    Board, Color, GameState, Move, Role, Square,
};
use rand::{rngs::SmallRng, SeedableRng};

fn setup(fen: &str) -> GameState {
    fen.parse::<Fen>()
        .expect("valid fen")
        .into_state()
        .expect("legal position")
}

fn find(state: &GameState, from: Square, to: Square) -> Move {
    *state
        .clone()
        .legal_moves()
        .iter()
        .find(|m| m.from == from && m.to == to)
        .expect("legal move")
}

/// Plays random games from the starting position and calls `f` on every
/// position reached before each move.
fn random_walk(seed: u64, plies: usize, mut f: impl FnMut(&mut GameState)) {
    let mut state = GameState::new();
    let mut selector = RandomSelector::new(SmallRng::seed_from_u64(seed));

    for _ in 0..plies {
        f(&mut state);
        let legal = state.legal_moves();
        match selector.choose(&mut state, &legal) {
            Some(m) => state.play(&m).expect("legal move"),
            None => break,
        }
    }
}

#[test]
fn test_twenty_moves_at_depth_one() {
    let mut state = GameState::new();
    let moves = state.legal_moves();
    assert_eq!(moves.len(), 20);
    assert_eq!(moves.iter().filter(|m| m.role() == Role::Pawn).count(), 16);
    assert_eq!(moves.iter().filter(|m| m.role() == Role::Knight).count(), 4);
}

#[test]
fn test_no_self_check() {
    for seed in 0..8 {
        random_walk(seed, 120, |state| {
            let mover = state.turn();
            for m in state.legal_moves() {
                state.execute_move(&m);
                let king = state.king_of(mover);
                assert!(
                    !state.square_under_attack(king, !mover),
                    "{m} leaves the king on {king} attacked"
                );
                state.undo_move();
            }
        });
    }
}

#[test]
fn test_execute_undo_round_trip() {
    for seed in 100..108 {
        random_walk(seed, 120, |state| {
            let before = state.clone();
            for m in state.possible_moves() {
                if m.capture.is_some_and(|piece| piece.role == Role::King) {
                    continue;
                }
                state.execute_move(&m);
                assert_eq!(state.undo_move(), Some(m));
                assert_eq!(state.board(), before.board());
                assert_eq!(state.turn(), before.turn());
                assert_eq!(state.move_log(), before.move_log());
                assert_eq!(state.fullmoves(), before.fullmoves());
                for color in Color::ALL {
                    assert_eq!(state.king_of(color), before.king_of(color));
                    assert_eq!(state.board().king_of(color), Some(state.king_of(color)));
                }
            }
        });
    }
}

#[test]
fn test_default_promotion_is_queen() {
    for col in 0..8 {
        let mut board = Board::empty();
        board.set_piece_at(Square::new(1, col), Color::White.pawn());
        board.set_piece_at(Square::new(7, (col + 4) % 8), Color::White.king());
        board.set_piece_at(Square::new(3, (col + 4) % 8), Color::Black.king());

        let mut state = GameState::from_setup(board, Color::White).expect("legal position");
        let m = find(&state, Square::new(1, col), Square::new(0, col));
        state.execute_move(&m);

        assert_eq!(state.board().piece_at(Square::new(0, col)), Some(Color::White.queen()));
        assert_eq!(state.board().piece_at(Square::new(1, col)), None);
    }
}

#[test]
fn test_fools_mate() {
    let mut state = GameState::new();
    for (from, to) in [
        (Square::F2, Square::F3),
        (Square::E7, Square::E5),
        (Square::G2, Square::G4),
        (Square::D8, Square::H4),
    ] {
        let m = find(&state, from, to);
        state.play(&m).expect("legal move");
    }

    assert!(state.legal_moves().is_empty());
    assert!(state.is_checkmate());
    assert!(!state.is_stalemate());
}

#[test]
fn test_stalemate_is_not_checkmate() {
    for fen in [
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
        "k7/P7/K7/8/8/8/8/8 b - - 0 1",
        "8/8/8/8/8/5k2/5p2/5K2 w - - 0 1",
    ] {
        let mut state = setup(fen);
        assert!(state.legal_moves().is_empty(), "{fen}");
        assert!(state.is_stalemate(), "{fen}");
        assert!(!state.is_checkmate(), "{fen}");
    }
}

#[test]
fn test_sliding_pieces_are_blocked() {
    // Rook on d4, own pawn on d6, enemy knight on g4.
    let state = setup("4k3/8/3P4/8/3R2n1/8/8/4K3 w - - 0 1");
    let targets: Vec<Square> = state
        .possible_moves()
        .into_iter()
        .filter(|m| m.from == Square::D4)
        .map(|m| m.to)
        .collect();

    assert!(targets.contains(&Square::D5));
    assert!(!targets.contains(&Square::D6));
    assert!(!targets.contains(&Square::D7));
    assert!(targets.contains(&Square::G4));
    assert!(!targets.contains(&Square::H4));

    let capture = Move::from_board(state.board(), Square::D4, Square::G4, Role::Queen).unwrap();
    assert_eq!(capture.capture, Some(Color::Black.knight()));
}

#[test]
#[should_panic(expected = "captures a king")]
fn test_king_capture_halts() {
    // The rook could take the king if White were to move.
    let mut board = Board::empty();
    board.set_piece_at(Square::E1, Color::White.king());
    board.set_piece_at(Square::E8, Color::Black.king());
    board.set_piece_at(Square::E4, Color::White.rook());

    let mut state = GameState::from_setup(board, Color::Black).expect("legal position");
    let m = Move::from_board(state.board(), Square::E4, Square::E8, Role::Queen).unwrap();
    state.execute_move(&m);
}
