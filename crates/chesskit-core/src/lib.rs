//! Core types for chess.
//!
//! This crate provides the data model shared by the rules engine and its
//! callers:
//! - [`Square`] addressing, [`Color`], [`PieceKind`] and [`Piece`]
//! - [`Board`] piece placement and the full [`Position`]
//! - [`Move`] values and caller-side [`MoveRequest`]s
//! - FEN parsing and serialization ([`fen`])
//!
//! It contains no rules: move generation and game status live in
//! `chesskit-engine`.

mod board;
mod castling;
mod color;
pub mod fen;
mod mov;
mod piece;
mod position;
mod square;

pub use board::Board;
pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{FenError, STARTPOS};
pub use mov::{Move, MoveKind, MoveRequest, ParseMoveError};
pub use piece::{Piece, PieceKind};
pub use position::Position;
pub use square::{ParseSquareError, Square};
