//! JSON status reports.

use chesskit_engine::{GameOutcome, GameStatus, Session};
use serde::Serialize;

/// Snapshot of a session printed by `status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub fen: String,
    #[serde(flatten)]
    pub status: GameStatus,
    pub outcome: Option<GameOutcome>,
    pub result: &'static str,
    pub movetext: String,
}

impl StatusReport {
    pub fn new(session: &Session) -> Self {
        let status = session.status();
        let outcome = status.outcome();
        StatusReport {
            fen: session.to_fen(),
            status,
            outcome,
            result: outcome.map_or("*", GameOutcome::result_text),
            movetext: session.movetext(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_game_in_progress() {
        let mut session = Session::default();
        session.make_move_san("e4").unwrap();
        let json: serde_json::Value =
            serde_json::to_value(StatusReport::new(&session)).unwrap();
        assert_eq!(
            json["fen"],
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(json["turn"], "black");
        assert_eq!(json["in_check"], false);
        assert!(json["outcome"].is_null());
        assert_eq!(json["result"], "*");
        assert_eq!(json["movetext"], "1. e4");
    }

    #[test]
    fn test_report_for_checkmate() {
        let mut session = Session::default();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            session.make_move_san(san).unwrap();
        }
        let json: serde_json::Value =
            serde_json::to_value(StatusReport::new(&session)).unwrap();
        assert_eq!(json["checkmate"], true);
        assert_eq!(json["outcome"], "black_wins");
        assert_eq!(json["result"], "0-1");
    }
}
