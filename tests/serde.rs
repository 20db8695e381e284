#![cfg(feature = "serde")]

use kingsafe::{fen::Fen, uci::Uci, Color, Role, Square};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    color: Color,
    role: Role,
    square: Square,
    uci: Uci,
    fen: Fen,
}

fn write(records: &[Record]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record).expect("serialize");
    }
    String::from_utf8(writer.into_inner().expect("flush")).expect("utf-8")
}

fn read(data: &str) -> Result<Vec<Record>, csv::Error> {
    csv::Reader::from_reader(data.as_bytes())
        .deserialize()
        .collect()
}

#[test]
fn test_string_round_trip() {
    let records = vec![
        Record {
            color: Color::White,
            role: Role::Knight,
            square: Square::E4,
            uci: "e7e8n".parse().expect("valid uci"),
            fen: "4k3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid fen"),
        },
        Record {
            color: Color::Black,
            role: Role::Queen,
            square: Square::H8,
            uci: "a2a1".parse().expect("valid uci"),
            fen: "8/8/8/8/8/8/p7/K6k b - - 0 7".parse().expect("valid fen"),
        },
    ];

    let data = write(&records);
    assert_eq!(
        data.lines().nth(1),
        Some("white,knight,e4,e7e8n,4k3/4P3/8/8/8/8/8/4K3 w - - 0 1")
    );
    assert_eq!(read(&data).expect("deserialize"), records);
}

#[test]
fn test_rejects_invalid_strings() {
    let header = "color,role,square,uci,fen\n";
    let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
    for row in [
        format!("red,knight,e4,e2e4,{fen}"),
        format!("white,wizard,e4,e2e4,{fen}"),
        format!("white,knight,i9,e2e4,{fen}"),
        format!("white,knight,e4,e2,{fen}"),
        "white,knight,e4,e2e4,4k3/8 x".to_owned(),
    ] {
        assert!(read(&format!("{header}{row}\n")).is_err(), "{row}");
    }
}
