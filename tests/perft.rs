use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use kingsafe::{fen::Fen, perft, GameState};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut state = GameState::new();

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{}", line);

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                state = slices
                    .next()
                    .expect("missing epd")
                    .parse::<Fen>()
                    .expect("invalid fen")
                    .into_state()
                    .expect("illegal fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&mut state, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_kingsafe_perft() {
    test_perft_file("tests/kingsafe.perft", 10_000);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_kingsafe_perft_deep() {
    test_perft_file("tests/kingsafe.perft", 200_000);
}
