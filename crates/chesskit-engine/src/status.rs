//! Game state classification.
//!
//! Everything here is computed from a position on demand; nothing is cached.
//! Repetition needs the game's history, so [`classify`] takes the number of
//! times the position has occurred as an argument.

use crate::attacks::is_king_attacked;
use crate::movegen::has_legal_move;
use chesskit_core::{Color, PieceKind, Position, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-moves without a pawn move or capture that make a draw.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that make a draw.
pub const REPETITION_LIMIT: usize = 3;

/// Why a game ended in a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::InsufficientMaterial => "insufficient material",
        };
        f.write_str(text)
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

impl GameOutcome {
    /// The winning side, `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::WhiteWins => Some(Color::White),
            GameOutcome::BlackWins => Some(Color::Black),
            GameOutcome::Draw(_) => None,
        }
    }

    /// Result token as written at the end of a move list.
    pub fn result_text(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "1-0",
            GameOutcome::BlackWins => "0-1",
            GameOutcome::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::WhiteWins => f.write_str("White wins"),
            GameOutcome::BlackWins => f.write_str("Black wins"),
            GameOutcome::Draw(reason) => write!(f, "Draw by {}", reason),
        }
    }
}

/// Snapshot of where a game stands.
///
/// `draw_reason` is `Some` whenever the game is drawn, stalemate included;
/// it is always `None` on checkmate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub turn: Color,
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw_reason: Option<DrawReason>,
}

impl GameStatus {
    pub fn game_over(&self) -> bool {
        self.checkmate || self.stalemate || self.draw_reason.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.checkmate {
            // The side to move is the one mated.
            return Some(match self.turn {
                Color::White => GameOutcome::BlackWins,
                Color::Black => GameOutcome::WhiteWins,
            });
        }
        self.draw_reason.map(GameOutcome::Draw)
    }
}

/// Classifies `position`, given how many times it has occurred in the game
/// (counting the current occurrence).
///
/// Draw reasons are checked in the order stalemate, repetition, fifty-move
/// rule, insufficient material; the first that applies is reported.
pub fn classify(position: &Position, occurrences: usize) -> GameStatus {
    let turn = position.side_to_move;
    let in_check = is_king_attacked(position, turn);
    let can_move = has_legal_move(position);
    let checkmate = in_check && !can_move;
    let stalemate = !in_check && !can_move;

    let draw_reason = if checkmate {
        None
    } else if stalemate {
        Some(DrawReason::Stalemate)
    } else if occurrences >= REPETITION_LIMIT {
        Some(DrawReason::ThreefoldRepetition)
    } else if is_fifty_move_draw(position) {
        Some(DrawReason::FiftyMoveRule)
    } else if is_insufficient_material(position) {
        Some(DrawReason::InsufficientMaterial)
    } else {
        None
    };

    GameStatus {
        turn,
        in_check,
        checkmate,
        stalemate,
        draw_reason,
    }
}

/// Returns true if the side to move is in check.
pub fn in_check(position: &Position) -> bool {
    is_king_attacked(position, position.side_to_move)
}

pub fn is_checkmate(position: &Position) -> bool {
    in_check(position) && !has_legal_move(position)
}

pub fn is_stalemate(position: &Position) -> bool {
    !in_check(position) && !has_legal_move(position)
}

pub fn is_fifty_move_draw(position: &Position) -> bool {
    position.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

/// Returns true for exactly these material balances: king against king,
/// king and one minor piece against a bare king, and king and bishop against
/// king and bishop with both bishops on the same square color.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors: [Vec<(PieceKind, Square)>; 2] = [Vec::new(), Vec::new()];
    for (sq, piece) in position.board.occupied() {
        if piece.kind == PieceKind::King {
            continue;
        }
        if !piece.kind.is_minor() {
            return false;
        }
        minors[piece.color.index()].push((piece.kind, sq));
    }

    match (minors[0].as_slice(), minors[1].as_slice()) {
        ([], []) | ([_], []) | ([], [_]) => true,
        ([(PieceKind::Bishop, white)], [(PieceKind::Bishop, black)]) => {
            white.is_light() == black.is_light()
        }
        _ => false,
    }
}
