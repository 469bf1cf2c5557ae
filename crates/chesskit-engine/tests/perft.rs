//! Perft reference counts for well-known positions.
//!
//! Deeper counts are `#[ignore]`d; run them with
//! `cargo test -p chesskit-engine --release --test perft -- --ignored`.

use chesskit_core::Position;
use chesskit_engine::{perft, perft_divide};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn startpos() {
    let start = Position::startpos();
    assert_eq!(perft(&start, 1), 20);
    assert_eq!(perft(&start, 2), 400);
    assert_eq!(perft(&start, 3), 8_902);
}

#[test]
#[ignore = "slow in debug builds"]
fn startpos_depth_4() {
    assert_eq!(perft(&Position::startpos(), 4), 197_281);
}

#[test]
fn kiwipete() {
    let position = position(KIWIPETE);
    assert_eq!(perft(&position, 1), 48);
    assert_eq!(perft(&position, 2), 2_039);
}

#[test]
#[ignore = "slow in debug builds"]
fn kiwipete_depth_3() {
    assert_eq!(perft(&position(KIWIPETE), 3), 97_862);
}

#[test]
fn position_3() {
    let position = position(POSITION_3);
    assert_eq!(perft(&position, 1), 14);
    assert_eq!(perft(&position, 2), 191);
    assert_eq!(perft(&position, 3), 2_812);
}

#[test]
fn position_4() {
    let position = position(POSITION_4);
    assert_eq!(perft(&position, 1), 6);
    assert_eq!(perft(&position, 2), 264);
    assert_eq!(perft(&position, 3), 9_467);
}

#[test]
fn position_5() {
    let position = position(POSITION_5);
    assert_eq!(perft(&position, 1), 44);
    assert_eq!(perft(&position, 2), 1_486);
}

#[test]
fn divide_matches_total() {
    let position = position(KIWIPETE);
    let divided = perft_divide(&position, 2);
    assert_eq!(divided.len(), 48);
    assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 2_039);
    assert!(divided.iter().any(|(uci, _)| uci == "e1g1"));
    assert!(divided.iter().any(|(uci, _)| uci == "e1c1"));
}
