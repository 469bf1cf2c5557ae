//! Persistable game records and move text.

use chesskit_core::{Color, Position};
use serde::{Deserialize, Serialize};

/// Everything needed to rebuild a game: where it started and the moves
/// played, in SAN.
///
/// Replaying the moves through [`Session::replay`](crate::Session::replay)
/// reconstructs the position and the full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    #[serde(default)]
    pub moves: Vec<String>,
}

impl GameRecord {
    pub fn new(start_fen: impl Into<String>, moves: Vec<String>) -> Self {
        GameRecord {
            start_fen: start_fen.into(),
            moves,
        }
    }
}

/// Numbered move list such as `1. e4 e5 2. Nf3`.
///
/// Numbering follows the start position's full-move number. A game that
/// starts with Black to move opens with `N...`.
pub fn movetext<'a, I>(start: &Position, sans: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut text = String::new();
    let mut number = start.fullmove_number;
    let mut side = start.side_to_move;

    for (i, san) in sans.into_iter().enumerate() {
        if !text.is_empty() {
            text.push(' ');
        }
        match side {
            Color::White => text.push_str(&format!("{}. ", number)),
            Color::Black if i == 0 => text.push_str(&format!("{}... ", number)),
            Color::Black => {}
        }
        text.push_str(san);
        if side == Color::Black {
            number += 1;
        }
        side = side.opposite();
    }
    text
}
