use super::ChessBoard;
use super::{Color, Piece, Square};
use crate::error::{FenError, FenResult};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

enum State {
    ReadingPosition,
    ReadingSideToMove,
    Trailing,
}

/// Checks that the layout ended on a full eighth rank.
fn finish_layout(rank_index: usize, file: usize) -> FenResult<()> {
    if rank_index < 7 {
        return Err(FenError::MissingRanks { found: rank_index + 1 });
    }
    if file != 8 {
        return Err(FenError::IncompleteRank { rank: 8 - rank_index, files: file });
    }
    Ok(())
}

/// Parses a FEN string and sets up a ChessBoard.
///
/// Only the piece layout and the side to move are interpreted. Castling,
/// en passant and the move counters are skipped, and a missing side-to-move
/// field leaves White to move.
pub fn from_fen(fen: &str) -> FenResult<ChessBoard> {
    if fen.is_empty() || fen.starts_with(' ') {
        return Err(FenError::Empty);
    }

    let mut board = ChessBoard::new();
    let mut state = State::ReadingPosition;
    let mut side_to_move = String::new();

    // rank_index 0 is the first rank in the string, rank 8 on the board
    let mut rank_index = 0usize;
    let mut file = 0usize;

    for c in fen.chars() {
        match state {
            State::ReadingPosition => match c {
                ' ' => {
                    finish_layout(rank_index, file)?;
                    state = State::ReadingSideToMove;
                }
                '/' => {
                    if file != 8 {
                        return Err(FenError::IncompleteRank { rank: 8 - rank_index, files: file });
                    }
                    rank_index += 1;
                    if rank_index > 7 {
                        return Err(FenError::TooManyRanks);
                    }
                    file = 0;
                }
                '1'..='8' => {
                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(FenError::TooManyFiles { rank: 8 - rank_index });
                    }
                }
                '0' | '9' => return Err(FenError::InvalidEmptyCount(c)),
                _ => {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece(c))?;
                    if file > 7 {
                        return Err(FenError::TooManyFiles { rank: 8 - rank_index });
                    }
                    board.squares[rank_index * 8 + file] = Square::Occupied(piece);
                    file += 1;
                }
            },
            State::ReadingSideToMove => {
                if c == ' ' {
                    state = State::Trailing;
                } else {
                    side_to_move.push(c);
                }
            }
            State::Trailing => break,
        }
    }

    if let State::ReadingPosition = state {
        finish_layout(rank_index, file)?;
    }

    board.active_color = match side_to_move.as_str() {
        "w" | "" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidSideToMove(other.to_string())),
    };

    Ok(board)
}

/// Writes the layout and side to move. The fields the loader ignores are
/// written as `- - 0 1`.
pub fn to_fen(board: &ChessBoard) -> String {
    let mut board_representation = String::new();

    for row in 0..8 {
        let mut empty_count = 0;

        for file in 0..8 {
            match board.squares[row * 8 + file] {
                Square::Occupied(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                Square::Empty => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if row < 7 {
            board_representation.push('/');
        }
    }

    let active_color = if board.active_color == Color::White { "w" } else { "b" };

    format!("{} {} - - 0 1", board_representation, active_color)
}

#[cfg(test)]
mod test {
    use super::super::PieceType;
    use super::*;

    fn piece(color: Color, kind: PieceType) -> Square {
        Square::Occupied(Piece { color, kind })
    }

    #[test]
    fn fen_empty_board() {
        let board = ChessBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").expect("Failed to parse FEN");

        for square in 0..64 {
            assert_eq!(board.squares[square], Square::Empty);
        }
        assert_eq!(board.active_color, Color::White);
    }

    #[test]
    fn fen_one_pawn() {
        // a1 is the bottom-left square, mailbox index 56
        let board = ChessBoard::from_fen("8/8/8/8/8/8/8/P7 w - - 0 1").expect("Failed to parse FEN");
        assert_eq!(board.squares[56], piece(Color::White, PieceType::Pawn));
        assert_eq!(board.all_pieces_with_coordinates().count(), 1);
    }

    #[test]
    fn fen_two_pawns() {
        let board = ChessBoard::from_fen("8/8/8/8/8/8/8/P3P3 w - - 0 1").expect("Failed to parse FEN");

        assert_eq!(board.squares[56], piece(Color::White, PieceType::Pawn));
        assert_eq!(board.squares[60], piece(Color::White, PieceType::Pawn));
    }

    #[test]
    fn fen_initial_board() {
        let board = ChessBoard::from_fen(INITIAL_POSITION).expect("Failed to parse FEN");

        for file in 0..8 {
            assert_eq!(board.squares[8 + file], piece(Color::Black, PieceType::Pawn));
            assert_eq!(board.squares[48 + file], piece(Color::White, PieceType::Pawn));
        }

        // Check some specific squares
        assert_eq!(board.squares[0], piece(Color::Black, PieceType::Rook));
        assert_eq!(board.squares[3], piece(Color::Black, PieceType::Queen));
        assert_eq!(board.squares[4], piece(Color::Black, PieceType::King));
        assert_eq!(board.squares[60], piece(Color::White, PieceType::King));
        assert_eq!(board.squares[62], piece(Color::White, PieceType::Knight));
        assert_eq!(board.squares[36], Square::Empty); // e4

        assert_eq!(board.active_color, Color::White);
    }

    #[test]
    fn fen_initial_board_piece_counts() {
        let board = ChessBoard::from_fen(INITIAL_POSITION).unwrap();
        let expected = [
            (PieceType::Pawn, 8),
            (PieceType::Rook, 2),
            (PieceType::Knight, 2),
            (PieceType::Bishop, 2),
            (PieceType::Queen, 1),
            (PieceType::King, 1),
        ];
        for (kind, count) in expected {
            for color in [Color::White, Color::Black] {
                assert_eq!(board.count(Piece { color, kind }), count, "{:?} {:?}", color, kind);
            }
        }
        assert_eq!(board.all_pieces_with_coordinates().count(), 32);
    }

    #[test]
    fn fen_black_to_move() {
        let board = ChessBoard::from_fen("8/8/8/8/4pP2/8/8/8 b - f3 0 1").expect("Failed to parse FEN");
        assert_eq!(board.active_color, Color::Black);
    }

    #[test]
    fn fen_without_side_to_move_defaults_to_white() {
        let board = ChessBoard::from_fen("8/p7/k7/8/8/K7/P7/8").expect("Failed to parse FEN");
        assert_eq!(board.active_color, Color::White);
        assert_eq!(board.squares[16], piece(Color::Black, PieceType::King));
        assert_eq!(board.squares[40], piece(Color::White, PieceType::King));
    }

    #[test]
    fn fen_trailing_fields_are_ignored() {
        let a = ChessBoard::from_fen("8/8/8/8/8/8/8/R3K2R w KQ e3 12 34").unwrap();
        let b = ChessBoard::from_fen("8/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fen_invalid_square() {
        let result = ChessBoard::from_fen("8/8/8/8/8/8/8/X7 w - - 0 1");
        assert_eq!(result, Err(FenError::InvalidPiece('X')));
    }

    #[test]
    fn fen_invalid_fen_extra_columns() {
        // Too many pieces in the first row
        let fen = "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(ChessBoard::from_fen(fen), Err(FenError::TooManyFiles { rank: 8 }));

        let fen = "8/8/8/44P/8/8/8/8 w - - 0 1";
        assert_eq!(ChessBoard::from_fen(fen), Err(FenError::TooManyFiles { rank: 5 }));
    }

    #[test]
    fn fen_invalid_rank_count() {
        assert_eq!(ChessBoard::from_fen("8/8/8/8 w - - 0 1"), Err(FenError::MissingRanks { found: 4 }));
        assert_eq!(ChessBoard::from_fen("8/8/8/8/8/8/8/8/8 w - - 0 1"), Err(FenError::TooManyRanks));
        assert_eq!(
            ChessBoard::from_fen("8/8/8/7/8/8/8/8 w - - 0 1"),
            Err(FenError::IncompleteRank { rank: 5, files: 7 })
        );
    }

    #[test]
    fn fen_invalid_digits_and_colors() {
        assert_eq!(ChessBoard::from_fen("9/8/8/8/8/8/8/8 w"), Err(FenError::InvalidEmptyCount('9')));
        assert_eq!(
            ChessBoard::from_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::InvalidSideToMove("x".to_string()))
        );
        assert_eq!(ChessBoard::from_fen(""), Err(FenError::Empty));
    }

    #[test]
    fn test_to_fen_initial_position() {
        let board = ChessBoard::from_fen(INITIAL_POSITION).unwrap();
        assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");
    }

    #[test]
    fn test_to_fen_custom_position() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1";
        let board = ChessBoard::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }
}
