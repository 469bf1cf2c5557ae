//! Game sessions: a position plus its history.
//!
//! [`Session`] is the boundary the presentation layer talks to. It owns the
//! current position and the history of accepted moves, validates every
//! request against the legal move set, and re-classifies the game after each
//! change. A failed operation leaves the session exactly as it was.

use crate::execute::make_move;
use crate::history::{History, HistoryEntry};
use crate::movegen::{legal_moves, legal_moves_from, MoveList};
use crate::record::{movetext, GameRecord};
use crate::san::{move_to_san, san_to_move, SanError};
use crate::status::{classify, GameOutcome, GameStatus};
use chesskit_core::{FenError, Move, MoveRequest, Piece, Position, Square};
use thiserror::Error;

/// Error type for session operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("malformed FEN: {0}")]
    MalformedFen(#[from] FenError),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("game has already ended")]
    GameAlreadyOver,

    #[error("no move to undo")]
    NoMoveToUndo,

    #[error("invalid SAN: {0}")]
    InvalidSan(#[from] SanError),
}

/// One game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    start: Position,
    position: Position,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_position(Position::startpos())
    }
}

impl Session {
    /// Starts a game from `fen`, or from the standard position when `None`.
    pub fn new_game(fen: Option<&str>) -> Result<Self, GameError> {
        let position = match fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::startpos(),
        };
        Ok(Self::from_position(position))
    }

    /// Starts a game from an existing position.
    pub fn from_position(position: Position) -> Self {
        tracing::debug!(fen = %position, "New game");
        Session {
            start: position.clone(),
            position,
            history: History::new(),
        }
    }

    /// Rebuilds a game by playing the record's SAN moves from its start.
    pub fn replay(record: &GameRecord) -> Result<Self, GameError> {
        let mut session = Self::new_game(Some(&record.start_fen))?;
        for san in &record.moves {
            session.make_move_san(san)?;
        }
        Ok(session)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn start_position(&self) -> &Position {
        &self.start
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of half-moves played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.piece_at(sq)
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Legal moves of the side to move, or only those from `square`.
    pub fn legal_moves(&self, square: Option<Square>) -> MoveList {
        match square {
            Some(sq) => legal_moves_from(&self.position, sq),
            None => legal_moves(&self.position),
        }
    }

    pub fn status(&self) -> GameStatus {
        let occurrences = self.history.repetition_count(&self.position);
        classify(&self.position, occurrences)
    }

    pub fn is_game_over(&self) -> bool {
        self.status().game_over()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.status().outcome()
    }

    /// Plays the legal move matching the `(from, to, promotion)` triple.
    pub fn make_move(&mut self, request: MoveRequest) -> Result<Move, GameError> {
        self.ensure_in_progress()?;
        match legal_moves(&self.position).find(&request) {
            Some(m) => Ok(self.commit(m)),
            None => {
                tracing::trace!(request = %request, fen = %self.position, "Rejected move");
                Err(GameError::IllegalMove(request.to_string()))
            }
        }
    }

    /// Plays a move given in SAN.
    pub fn make_move_san(&mut self, san: &str) -> Result<Move, GameError> {
        self.ensure_in_progress()?;
        let m = san_to_move(&self.position, san).map_err(|e| {
            tracing::trace!(san = san, fen = %self.position, error = %e, "Rejected SAN");
            e
        })?;
        Ok(self.commit(m))
    }

    /// Plays a move given in UCI notation such as `e2e4` or `e7e8q`.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, GameError> {
        let request =
            MoveRequest::from_uci(uci).map_err(|e| GameError::IllegalMove(e.to_string()))?;
        self.make_move(request)
    }

    /// Takes back the last move and returns it.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let entry = self.history.pop().ok_or(GameError::NoMoveToUndo)?;
        tracing::debug!(mv = %entry.mv, san = %entry.san, "Undo");
        self.position = entry.before;
        Ok(entry.mv)
    }

    /// Discards all moves and returns to the start position.
    pub fn reset(&mut self) {
        self.history.clear();
        self.position = self.start.clone();
    }

    /// SAN of every move played, oldest first.
    pub fn san_moves(&self) -> Vec<String> {
        self.history.iter().map(|entry| entry.san.clone()).collect()
    }

    /// Numbered move list such as `1. e4 e5 2. Nf3`.
    pub fn movetext(&self) -> String {
        movetext(&self.start, self.history.iter().map(|entry| entry.san.as_str()))
    }

    pub fn record(&self) -> GameRecord {
        GameRecord::new(self.start.to_fen(), self.san_moves())
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        Ok(())
    }

    /// Records and plays a move already known to be legal.
    fn commit(&mut self, m: Move) -> Move {
        let san = move_to_san(&self.position, &m);
        let next = make_move(&self.position, &m);
        tracing::debug!(
            ply = self.history.len() + 1,
            mv = %m,
            san = %san,
            "Move played"
        );
        let before = std::mem::replace(&mut self.position, next);
        self.history.push(HistoryEntry::new(m, before, san));
        m
    }
}
