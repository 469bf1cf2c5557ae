//! Chess rules engine.
//!
//! This crate provides:
//! - Legal move generation ([`legal_moves`], [`legal_moves_from`]) and
//!   attack detection
//! - Move application ([`apply`]) that never mutates its input position
//! - Game status classification: check, checkmate, stalemate and draws
//! - SAN rendering and parsing ([`move_to_san`], [`san_to_move`])
//! - [`Session`], a position plus history with undo, repetition tracking and
//!   replayable [`GameRecord`]s
//!
//! Positions are values. Every rule function takes a `&Position` and returns
//! a new value; only a [`Session`] holds mutable game state.
//!
//! # Example
//!
//! ```
//! use chesskit_engine::Session;
//!
//! let mut session = Session::new_game(None).unwrap();
//! session.make_move_san("e4").unwrap();
//! session.make_move_uci("e7e5").unwrap();
//! assert_eq!(session.movetext(), "1. e4 e5");
//! assert!(!session.status().game_over());
//! ```

mod attacks;
mod execute;
mod history;
pub mod movegen;
mod record;
pub mod san;
mod session;
pub mod status;
mod zobrist;

pub use attacks::{is_king_attacked, is_square_attacked};
pub use execute::{apply, make_move};
pub use history::{History, HistoryEntry};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{legal_moves, legal_moves_from, pseudo_legal_moves, MoveList};
pub use record::{movetext, GameRecord};
pub use san::{move_to_san, san_to_move, SanError};
pub use session::{GameError, Session};
pub use status::{classify, DrawReason, GameOutcome, GameStatus};
pub use zobrist::position_key;
