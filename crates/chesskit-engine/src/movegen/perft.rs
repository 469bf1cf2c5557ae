//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree at a given depth. The
//! counts for well-known positions are published, so any mismatch points at
//! a generator bug.

use super::legal_moves;
use crate::execute::make_move;
use chesskit_core::Position;

/// Counts the leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&make_move(position, m), depth - 1))
        .sum()
}

/// Perft split by root move, sorted by UCI text.
///
/// Comparing each root move's count against a reference engine narrows a
/// wrong total down to the subtree that produced it.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(position);
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&make_move(position, m), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(perft(&Position::startpos(), 0), 1);
    }

    #[test]
    fn startpos_shallow() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 1), 20);
        assert_eq!(perft(&position, 2), 400);
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = Position::startpos();
        let results = perft_divide(&position, 2);
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, n)| *n == 20));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert_eq!(results[0].0, "a2a3");
    }

    #[test]
    fn mated_position_has_no_children() {
        let position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert_eq!(perft(&position, 1), 0);
        assert_eq!(perft(&position, 3), 0);
        assert!(perft_divide(&position, 2).is_empty());
    }
}
