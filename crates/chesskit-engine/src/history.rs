//! Move history of a game.

use crate::zobrist::position_key;
use chesskit_core::{Move, Position};

/// One accepted move together with the position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    /// Position before the move; undo restores it verbatim.
    pub before: Position,
    /// SAN of the move, rendered against `before`.
    pub san: String,
    /// Zobrist key of `before`.
    key: u64,
}

impl HistoryEntry {
    pub fn new(mv: Move, before: Position, san: String) -> Self {
        let key = position_key(&before);
        HistoryEntry {
            mv,
            before,
            san,
            key,
        }
    }
}

/// Ordered record of the moves played in a game, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// How many times `current` has occurred in the game, counting itself.
    ///
    /// Positions match on placement, side to move, castling rights and en
    /// passant target. Keys filter the candidates; a full comparison confirms
    /// each hit.
    pub fn repetition_count(&self, current: &Position) -> usize {
        let key = position_key(current);
        let earlier = self
            .entries
            .iter()
            .filter(|entry| entry.key == key && entry.before.same_placement(current))
            .count();
        earlier + 1
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::make_move;
    use crate::movegen::legal_moves;
    use chesskit_core::MoveRequest;

    /// Plays `moves` from `start`, recording each one.
    fn record(start: Position, moves: &[&str]) -> (History, Position) {
        let mut history = History::new();
        let mut position = start;
        for uci in moves {
            let request: MoveRequest = uci.parse().unwrap();
            let m = legal_moves(&position).find(&request).unwrap();
            let next = make_move(&position, &m);
            history.push(HistoryEntry::new(m, position, uci.to_string()));
            position = next;
        }
        (history, position)
    }

    #[test]
    fn push_pop_and_last() {
        let (mut history, _) = record(Position::startpos(), &["e2e4", "e7e5"]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|e| e.san.as_str()), Some("e7e5"));

        let entry = history.pop().unwrap();
        assert_eq!(entry.mv.to_uci(), "e7e5");
        assert_eq!(
            entry.before.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }

    #[test]
    fn knight_shuffle_repeats() {
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        let (history, position) = record(Position::startpos(), &shuffle);
        assert!(position.same_placement(&Position::startpos()));
        assert_eq!(history.repetition_count(&position), 2);

        let twice: Vec<&str> = shuffle.iter().chain(shuffle.iter()).copied().collect();
        let (history, position) = record(Position::startpos(), &twice);
        assert_eq!(history.repetition_count(&position), 3);
    }

    #[test]
    fn en_passant_target_breaks_repetition() {
        // After 1. e4 the target e3 is set, so the later position with the
        // same placement but no target is a different position.
        let (history, position) = record(
            Position::startpos(),
            &["e2e4", "g8f6", "g1f3", "f6g8", "f3g1"],
        );
        assert_eq!(position.en_passant, None);
        assert_eq!(history.repetition_count(&position), 1);
    }

    #[test]
    fn iteration_is_oldest_first() {
        let (history, _) = record(Position::startpos(), &["d2d4", "d7d5", "c2c4"]);
        let sans: Vec<&str> = history.iter().map(|e| e.san.as_str()).collect();
        assert_eq!(sans, ["d2d4", "d7d5", "c2c4"]);
        assert_eq!((&history).into_iter().count(), 3);
    }
}
