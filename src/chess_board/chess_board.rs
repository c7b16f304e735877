use super::{fen, Color, Move, Piece, Square};
use crate::error::FenResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub squares: [Square; 64],
    pub active_color: Color,
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 64],
            active_color: Color::White, // Default active color to White
        }
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    #[inline]
    pub fn square(&self, square: u8) -> Square {
        self.squares[square as usize]
    }

    pub fn piece_at(&self, square: u8) -> Option<Piece> {
        self.squares[square as usize].piece()
    }

    pub fn set_square(&mut self, square: u8, value: Square) {
        self.squares[square as usize] = value;
    }

    /// Empties `square` and returns what was on it.
    pub fn take(&mut self, square: u8) -> Square {
        std::mem::take(&mut self.squares[square as usize])
    }

    /// Returns an iterator over the active side's pieces with their squares.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (u8, &Piece)> {
        let color = self.active_color;
        self.all_pieces_with_coordinates().filter(move |(_, piece)| piece.color == color)
    }

    pub fn all_pieces_with_coordinates(&self) -> impl Iterator<Item = (u8, &Piece)> {
        self.squares.iter().enumerate().filter_map(|(square, value)| match value {
            Square::Occupied(piece) => Some((square as u8, piece)),
            Square::Empty => None,
        })
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.all_pieces_with_coordinates().filter(|(_, p)| **p == piece).count()
    }

    /// Moves the piece on `mv.from` to `mv.to`, replacing whatever stood there,
    /// and passes the turn. Callers only apply moves taken from the current
    /// move list.
    pub fn make_move(&mut self, mv: Move) {
        let piece = self.take(mv.from);
        self.set_square(mv.to, piece);

        // Switch the active color after a move
        self.active_color = self.active_color.opposite();
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        // Row 0 of the mailbox is rank 8
        for row in 0..8u8 {
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for file in 0..8u8 {
                let square = match self.square(row * 8 + file) {
                    Square::Empty => ' ',
                    Square::Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
