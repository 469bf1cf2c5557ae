//! Line-oriented interactive play over stdin.
//!
//! Each input line is a command (`undo`, `moves [square]`, `fen`, `status`,
//! `help`, `quit`) or a move in UCI (`e2e4`, `e7e8q`) or SAN (`Nf3`, `exd8=Q`).
//! Pawn moves to the last rank that name no piece promote to the configured
//! default.

use crate::report::StatusReport;
use chesskit_core::{MoveRequest, PieceKind, Square};
use chesskit_engine::{GameError, Session};
use std::io::{self, BufRead, Write};

const HELP: &str = "commands: <move> | undo | moves [square] | fen | status | help | quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(String),
    Undo,
    Moves(Option<Square>),
    Fen,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Command, String>> {
        let mut words = line.split_whitespace();
        let first = words.next()?;
        let command = match (first, words.next()) {
            ("undo", None) => Ok(Command::Undo),
            ("moves", None) => Ok(Command::Moves(None)),
            ("moves", Some(sq)) => sq
                .parse()
                .map(|sq| Command::Moves(Some(sq)))
                .map_err(|e: chesskit_core::ParseSquareError| e.to_string()),
            ("fen", None) => Ok(Command::Fen),
            ("status", None) => Ok(Command::Status),
            ("help", None) => Ok(Command::Help),
            ("quit" | "exit", None) => Ok(Command::Quit),
            (text, None) => Ok(Command::Move(text.to_string())),
            _ => Err(format!("unexpected input: {}", line.trim())),
        };
        Some(command)
    }
}

/// A session driven by text commands.
pub struct Player {
    session: Session,
    promotion: PieceKind,
}

impl Player {
    pub fn new(session: Session, promotion: PieceKind) -> Self {
        Player { session, promotion }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", self.session.to_fen())?;
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                None => continue,
                Some(Ok(command)) => command,
                Some(Err(message)) => {
                    writeln!(output, "error: {message}")?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            writeln!(output, "{}", self.execute(command))?;
        }
        output.flush()
    }

    /// Executes one command and returns the text to print.
    pub fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Move(text) => match self.play(&text) {
                Ok(san) => self.after_move(san),
                Err(e) => format!("error: {e}"),
            },
            Command::Undo => match self.session.undo() {
                Ok(m) => format!("undid {m}"),
                Err(e) => format!("error: {e}"),
            },
            Command::Moves(square) => {
                let moves = self.session.legal_moves(square);
                let list: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
                list.join(" ")
            }
            Command::Fen => self.session.to_fen(),
            Command::Status => StatusReport::new(&self.session)
                .to_json()
                .unwrap_or_else(|e| format!("error: {e}")),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }

    /// Plays UCI or SAN text and returns the move's SAN.
    pub fn play(&mut self, text: &str) -> Result<String, GameError> {
        match MoveRequest::from_uci(text) {
            Ok(request) => {
                let request = self.with_default_promotion(request);
                self.session.make_move(request)?
            }
            Err(_) => match self.session.make_move_san(text) {
                Ok(m) => m,
                Err(GameError::InvalidSan(e)) if !text.contains('=') => {
                    let base = text.trim_end_matches(['+', '#', '!', '?']);
                    let letter = self.promotion.to_char().to_ascii_uppercase();
                    self.session
                        .make_move_san(&format!("{base}={letter}"))
                        .map_err(|_| GameError::InvalidSan(e))?
                }
                Err(e) => return Err(e),
            },
        };
        Ok(self
            .session
            .history()
            .last()
            .map(|entry| entry.san.clone())
            .unwrap_or_default())
    }

    fn with_default_promotion(&self, request: MoveRequest) -> MoveRequest {
        if request.promotion.is_some() {
            return request;
        }
        let promotes = self
            .session
            .legal_moves(Some(request.from))
            .iter()
            .any(|m| m.to == request.to && m.promotion.is_some());
        if promotes {
            request.with_promotion(self.promotion)
        } else {
            request
        }
    }

    fn after_move(&self, san: String) -> String {
        match self.session.outcome() {
            Some(outcome) => format!("{san}\n{outcome} ({})", outcome.result_text()),
            None => san,
        }
    }
}
