//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the conventional way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1", "Qh4#"

use crate::attacks::is_king_attacked;
use crate::execute::make_move;
use crate::movegen::{has_legal_move, legal_moves};
use chesskit_core::{Move, MoveKind, PieceKind, Position, Square};
use thiserror::Error;

/// Error type for SAN parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,

    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),

    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),

    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

/// Renders a move in SAN.
///
/// `position` is the state BEFORE the move, and `m` must be one of its legal
/// moves. Disambiguation is worked out against the full legal move set.
pub fn move_to_san(position: &Position, m: &Move) -> String {
    let mut san = match m.kind {
        MoveKind::CastleKingside => "O-O".to_string(),
        MoveKind::CastleQueenside => "O-O-O".to_string(),
        _ => {
            let mut san = String::with_capacity(8);
            if m.piece.kind == PieceKind::Pawn {
                if m.is_capture() {
                    san.push(m.from.file_char());
                }
            } else {
                san.push(piece_letter(m.piece.kind));
                san.push_str(&disambiguation(position, m));
            }
            if m.is_capture() {
                san.push('x');
            }
            san.push_str(&m.to.to_algebraic());
            if let Some(kind) = m.promotion {
                san.push('=');
                san.push(piece_letter(kind));
            }
            san
        }
    };

    let next = make_move(position, m);
    if is_king_attacked(&next, next.side_to_move) {
        san.push(if has_legal_move(&next) { '+' } else { '#' });
    }
    san
}

/// Finds the legal move in `position` that `text` describes.
///
/// Trailing `+`, `#`, `!` and `?` are ignored, and castling may be spelled
/// with zeros.
pub fn san_to_move(position: &Position, text: &str) -> Result<Move, SanError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SanError::Empty);
    }
    let core = text.trim_end_matches(['+', '#', '!', '?']);

    let castle = match core {
        "O-O" | "0-0" => Some(MoveKind::CastleKingside),
        "O-O-O" | "0-0-0" => Some(MoveKind::CastleQueenside),
        _ => None,
    };
    if let Some(kind) = castle {
        return legal_moves(position)
            .iter()
            .find(|m| m.kind == kind)
            .copied()
            .ok_or_else(|| SanError::NoMatchingMove(text.to_string()));
    }

    let pattern = SanPattern::parse(core).ok_or_else(|| SanError::InvalidFormat(text.to_string()))?;

    let moves = legal_moves(position);
    let mut candidates = moves.iter().filter(|m| pattern.matches(m));
    match (candidates.next(), candidates.next()) {
        (Some(m), None) => Ok(*m),
        (None, _) => Err(SanError::NoMatchingMove(text.to_string())),
        (Some(_), Some(_)) => Err(SanError::AmbiguousMove(text.to_string())),
    }
}

/// The constraints a non-castling SAN string puts on a move.
#[derive(Debug, PartialEq, Eq)]
struct SanPattern {
    kind: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    capture: bool,
    to: Square,
    promotion: Option<PieceKind>,
}

impl SanPattern {
    fn parse(text: &str) -> Option<Self> {
        let (body, promotion) = match text.split_once('=') {
            Some((body, promo)) => {
                let mut chars = promo.chars();
                let kind = chars.next().and_then(letter_piece)?;
                if chars.next().is_some() || !PieceKind::PROMOTIONS.contains(&kind) {
                    return None;
                }
                (body, Some(kind))
            }
            None => (text, None),
        };

        let (kind, rest) = match body.chars().next().and_then(letter_piece) {
            Some(kind) => (kind, &body[1..]),
            None => (PieceKind::Pawn, body),
        };

        // Destination is the last two characters.
        let split = rest.len().checked_sub(2)?;
        if !rest.is_char_boundary(split) {
            return None;
        }
        let (prefix, dest) = rest.split_at(split);
        let to = Square::from_algebraic(dest)?;

        let (prefix, capture) = match prefix.strip_suffix('x') {
            Some(prefix) => (prefix, true),
            None => (prefix, false),
        };

        let mut from_file = None;
        let mut from_rank = None;
        for c in prefix.chars() {
            match c {
                'a'..='h' if from_file.is_none() && from_rank.is_none() => {
                    from_file = Some(c as u8 - b'a');
                }
                '1'..='8' if from_rank.is_none() => from_rank = Some(c as u8 - b'1'),
                _ => return None,
            }
        }

        Some(SanPattern {
            kind,
            from_file,
            from_rank,
            capture,
            to,
            promotion,
        })
    }

    fn matches(&self, m: &Move) -> bool {
        m.piece.kind == self.kind
            && m.to == self.to
            && !m.is_castle()
            && m.promotion == self.promotion
            && self.capture_matches(m)
            && self.from_file.map_or(true, |file| m.from.file() == file)
            && self.from_rank.map_or(true, |rank| m.from.rank() == rank)
    }

    /// Pieces may omit the `x`; pawns may not, or `d5` would also match `exd5`.
    fn capture_matches(&self, m: &Move) -> bool {
        if self.capture {
            m.is_capture()
        } else {
            self.kind != PieceKind::Pawn || !m.is_capture()
        }
    }
}

/// Origin file, rank or square needed to tell `m` apart from other legal
/// moves of the same piece kind to the same square.
fn disambiguation(position: &Position, m: &Move) -> String {
    let moves = legal_moves(position);
    let rivals: Vec<Square> = moves
        .iter()
        .filter(|o| o.piece.kind == m.piece.kind && o.to == m.to && o.from != m.from)
        .map(|o| o.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != m.from.file()) {
        m.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != m.from.rank()) {
        m.from.rank_char().to_string()
    } else {
        m.from.to_algebraic()
    }
}

fn piece_letter(kind: PieceKind) -> char {
    kind.to_char().to_ascii_uppercase()
}

/// Piece named by an uppercase SAN letter; lowercase letters are files.
fn letter_piece(c: char) -> Option<PieceKind> {
    if c.is_ascii_uppercase() {
        PieceKind::from_char(c)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chesskit_core::MoveRequest;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn san_of(position: &Position, uci: &str) -> String {
        let request: MoveRequest = uci.parse().unwrap();
        let m = legal_moves(position).find(&request).unwrap();
        move_to_san(position, &m)
    }

    #[test]
    fn pawn_and_piece_moves() {
        let start = Position::startpos();
        assert_eq!(san_of(&start, "e2e4"), "e4");
        assert_eq!(san_of(&start, "g1f3"), "Nf3");
    }

    #[test]
    fn pawn_capture_names_the_file() {
        let position = pos("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        assert_eq!(san_of(&position, "e4d5"), "exd5");
    }

    #[test]
    fn en_passant_is_a_capture() {
        let position = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(san_of(&position, "e5d6"), "exd6");
    }

    #[test]
    fn castling() {
        let position = pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert_eq!(san_of(&position, "e1g1"), "O-O");
        assert_eq!(san_of(&position, "e1c1"), "O-O-O");
    }

    #[test]
    fn promotion() {
        let position = pos("8/P7/8/8/8/8/8/4K1k1 w - - 0 1");
        assert_eq!(san_of(&position, "a7a8q"), "a8=Q");
        assert_eq!(san_of(&position, "a7a8n"), "a8=N");
    }

    #[test]
    fn disambiguation_by_file() {
        let position = pos("8/8/8/8/8/8/8/1N1K1N1k w - - 0 1");
        assert_eq!(san_of(&position, "b1d2"), "Nbd2");
        assert_eq!(san_of(&position, "f1d2"), "Nfd2");
        // Only one knight reaches a3.
        assert_eq!(san_of(&position, "b1a3"), "Na3");
    }

    #[test]
    fn disambiguation_by_rank() {
        let position = pos("R7/8/7k/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(san_of(&position, "a1a4"), "R1a4");
        assert_eq!(san_of(&position, "a8a4"), "R8a4");
    }

    #[test]
    fn disambiguation_by_square() {
        // Queens on a1, a5 and e1 all reach c3. The a1 queen shares its file
        // with one rival and its rank with the other.
        let position = pos("8/7k/8/Q7/8/8/8/Q3Q2K w - - 0 1");
        assert_eq!(san_of(&position, "a1c3"), "Qa1c3");
        assert_eq!(san_of(&position, "a5c3"), "Q5c3");
        assert_eq!(san_of(&position, "e1c3"), "Qec3");
    }

    #[test]
    fn check_and_mate_suffixes() {
        let position = pos("8/8/8/8/8/8/8/4K1Qk w - - 0 1");
        assert_eq!(san_of(&position, "g1h2"), "Qh2+");

        let position = pos("6k1/5ppp/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(san_of(&position, "a1a8"), "Ra8#");

        let position = pos("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
        assert_eq!(san_of(&position, "d8h4"), "Qh4#");
    }

    #[test]
    fn parse_simple_moves() {
        let start = Position::startpos();
        let m = san_to_move(&start, "e4").unwrap();
        assert_eq!(m.to_uci(), "e2e4");
        assert!(m.is_double_push());
        let m = san_to_move(&start, "Nf3").unwrap();
        assert_eq!(m.to_uci(), "g1f3");
    }

    #[test]
    fn parse_castling_spellings() {
        let position = pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        for text in ["O-O", "0-0", "O-O+", "O-O!"] {
            let m = san_to_move(&position, text).unwrap();
            assert_eq!(m.kind, MoveKind::CastleKingside, "{text}");
        }
        for text in ["O-O-O", "0-0-0"] {
            let m = san_to_move(&position, text).unwrap();
            assert_eq!(m.kind, MoveKind::CastleQueenside, "{text}");
        }
        assert_eq!(
            san_to_move(&Position::startpos(), "O-O"),
            Err(SanError::NoMatchingMove("O-O".to_string()))
        );
    }

    #[test]
    fn parse_suffixes_and_annotations() {
        let position = pos("8/8/8/8/8/8/8/4K1Qk w - - 0 1");
        for text in ["Qh2+", "Qh2", "Qh2!?", "Qh2+!", "  Qh2  "] {
            assert_eq!(san_to_move(&position, text).unwrap().to_uci(), "g1h2", "{text}");
        }
    }

    #[test]
    fn parse_promotion_and_disambiguation() {
        let position = pos("8/P7/8/8/8/8/8/4K1k1 w - - 0 1");
        let m = san_to_move(&position, "a8=N").unwrap();
        assert_eq!(m.promotion, Some(PieceKind::Knight));
        // A promotion must name its piece.
        assert!(matches!(
            san_to_move(&position, "a8"),
            Err(SanError::NoMatchingMove(_))
        ));
        assert!(matches!(
            san_to_move(&position, "a8=K"),
            Err(SanError::InvalidFormat(_))
        ));

        let position = pos("8/8/8/8/8/8/8/1N1K1N1k w - - 0 1");
        assert_eq!(san_to_move(&position, "Nbd2").unwrap().to_uci(), "b1d2");
        assert_eq!(san_to_move(&position, "Nfd2").unwrap().to_uci(), "f1d2");
        assert_eq!(
            san_to_move(&position, "Nd2"),
            Err(SanError::AmbiguousMove("Nd2".to_string()))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        let start = Position::startpos();
        assert_eq!(san_to_move(&start, ""), Err(SanError::Empty));
        assert_eq!(san_to_move(&start, "   "), Err(SanError::Empty));
        assert!(matches!(san_to_move(&start, "xyz"), Err(SanError::InvalidFormat(_))));
        assert!(matches!(san_to_move(&start, "+"), Err(SanError::InvalidFormat(_))));
        assert!(matches!(san_to_move(&start, "Ze4"), Err(SanError::InvalidFormat(_))));
        assert!(matches!(san_to_move(&start, "e9"), Err(SanError::InvalidFormat(_))));
        assert!(matches!(san_to_move(&start, "Ke4"), Err(SanError::NoMatchingMove(_))));
        // Marked as a capture, but e4 is empty.
        assert!(matches!(san_to_move(&start, "dxe4"), Err(SanError::NoMatchingMove(_))));
    }

    #[test]
    fn roundtrip_over_legal_moves() {
        for fen in [
            chesskit_core::STARTPOS,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ] {
            let position = pos(fen);
            for m in &legal_moves(&position) {
                let san = move_to_san(&position, m);
                assert_eq!(san_to_move(&position, &san), Ok(*m), "{san} in {fen}");
            }
        }
    }
}
