//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Board, CastlingRights, Color, Piece, PieceKind, Position, Square};
use thiserror::Error;

/// The standard starting position.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Reasons a FEN string is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("{field} out of range: {value} is larger than 4294967295")]
    CounterOutOfRange { field: &'static str, value: String },

    #[error("{color} must have exactly one king, found {count}")]
    InvalidKingCount { color: Color, count: usize },
}

/// Parses a FEN string into a position.
pub fn parse(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::InvalidFieldCount(fields.len()));
    }

    let board = parse_placement(fields[0])?;

    let side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidActiveColor(other.to_string())),
    };

    let castling = parse_castling(fields[2])?;

    let en_passant = match fields[3] {
        "-" => None,
        text => Some(
            Square::from_algebraic(text)
                .ok_or_else(|| FenError::InvalidEnPassantSquare(text.to_string()))?,
        ),
    };

    let halfmove_clock = parse_counter(fields[4], "halfmove clock")?
        .ok_or_else(|| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;
    let fullmove_number = parse_counter(fields[5], "fullmove number")?
        .ok_or_else(|| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;

    for color in Color::BOTH {
        let count = board.count(PieceKind::King, color);
        if count != 1 {
            return Err(FenError::InvalidKingCount { color, count });
        }
    }

    Ok(Position {
        board,
        side_to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first.
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(gap) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += gap as u8;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                if let Some(sq) = Square::from_coords(file, rank) {
                    board.set(sq, Some(piece));
                }
                file += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    rank + 1
                )));
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} does not cover exactly 8 files",
                rank + 1
            )));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, side) = CastlingRights::from_fen_char(c).ok_or_else(|| {
            FenError::InvalidCastlingRights(format!("invalid character '{}' in '{}'", c, field))
        })?;
        rights.insert(color, side);
    }
    Ok(rights)
}

/// Non-negative decimal integer made of ASCII digits only.
///
/// `Ok(None)` for text that is not such a number; an error for one that does
/// not fit in a `u32`.
fn parse_counter(text: &str, field: &'static str) -> Result<Option<u32>, FenError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| FenError::CounterOutOfRange {
        field,
        value: text.to_string(),
    })
}

/// Writes the FEN string for a position.
pub fn produce(position: &Position) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut gap = 0;
        for file in 0..8u8 {
            match Square::from_coords(file, rank).and_then(|sq| position.board.piece_at(sq)) {
                Some(piece) => {
                    if gap > 0 {
                        fen.push_str(&gap.to_string());
                        gap = 0;
                    }
                    fen.push(piece.to_fen_char());
                }
                None => gap += 1,
            }
        }
        if gap > 0 {
            fen.push_str(&gap.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    let en_passant = position
        .en_passant
        .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());

    format!(
        "{} {} {} {} {} {}",
        fen,
        position.side_to_move.fen_char(),
        position.castling.to_fen(),
        en_passant,
        position.halfmove_clock,
        position.fullmove_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let pos = parse(STARTPOS).unwrap();
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.castling, CastlingRights::ALL);
        assert_eq!(pos.en_passant, None);
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.board.occupied().count(), 32);
        assert_eq!(produce(&pos), STARTPOS);
    }

    #[test]
    fn roundtrip_with_en_passant_and_clocks() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "8/8/8/8/8/8/8/R3K2k w Q - 99 140",
        ] {
            assert_eq!(produce(&parse(fen).unwrap()), fen);
        }
    }

    #[test]
    fn normalizes_castling_order_and_whitespace() {
        let pos = parse("  r3k2r/8/8/8/8/8/8/R3K2R   w qkQK -  0  1 ").unwrap();
        assert_eq!(produce(&pos), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(parse("invalid"), Err(FenError::InvalidFieldCount(1)));
        assert!(matches!(
            parse("8/8/8/8/8/8/8/8 w - - 0"),
            Err(FenError::InvalidFieldCount(5))
        ));
        assert!(matches!(
            parse(&format!("{} extra", STARTPOS)),
            Err(FenError::InvalidFieldCount(7))
        ));
    }

    #[test]
    fn rejects_bad_placement() {
        for fen in [
            "8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ] {
            assert!(
                matches!(parse(fen), Err(FenError::InvalidPiecePlacement(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_bad_side_to_move() {
        assert!(matches!(
            parse("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            parse("4k3/8/8/8/8/8/8/4K3 W - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn rejects_bad_castling() {
        for field in ["XYZ", "K-", "KQkqx", "--"] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {} - 0 1", field);
            assert!(
                matches!(parse(&fen), Err(FenError::InvalidCastlingRights(_))),
                "{field} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_bad_en_passant() {
        for field in ["abc", "x3", "e9", "E3", "3e"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w - {} 0 1", field);
            assert!(
                matches!(parse(&fen), Err(FenError::InvalidEnPassantSquare(_))),
                "{field} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_bad_counters() {
        assert!(matches!(
            parse("4k3/8/8/8/8/8/8/4K3 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            parse("4k3/8/8/8/8/8/8/4K3 w - - -1 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            parse("4k3/8/8/8/8/8/8/4K3 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            parse("4k3/8/8/8/8/8/8/4K3 w - - 0 +3"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn counters_beyond_u32_are_out_of_range() {
        let max = parse("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 4294967295").unwrap();
        assert_eq!(max.halfmove_clock, u32::MAX);
        assert_eq!(max.fullmove_number, u32::MAX);

        assert_eq!(
            parse("4k3/8/8/8/8/8/8/4K3 w - - 5000000000 1"),
            Err(FenError::CounterOutOfRange {
                field: "halfmove clock",
                value: "5000000000".into(),
            })
        );
        let err = parse("4k3/8/8/8/8/8/8/4K3 w - - 0 4294967296").unwrap_err();
        assert_eq!(
            err.to_string(),
            "fullmove number out of range: 4294967296 is larger than 4294967295"
        );
    }

    #[test]
    fn rejects_missing_or_extra_kings() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::White,
                count: 0
            })
        );
        assert_eq!(
            parse("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::White,
                count: 2
            })
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::Black,
                count: 0
            })
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        assert!(FenError::InvalidFieldCount(3).to_string().contains('3'));
        assert!(FenError::InvalidHalfmoveClock("abc".into())
            .to_string()
            .contains("abc"));
        let kings = FenError::InvalidKingCount {
            color: Color::Black,
            count: 2,
        };
        assert_eq!(kings.to_string(), "Black must have exactly one king, found 2");
    }
}
