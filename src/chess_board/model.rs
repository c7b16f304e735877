use std::fmt;

use crate::error::MoveParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Square {
    Occupied(Piece),
    #[default]
    Empty,
}

/// The eight compass directions in mailbox order. Even discriminants are
/// diagonals, odd ones are orthogonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    East = 3,
    SouthEast = 4,
    South = 5,
    SouthWest = 6,
    West = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
    ];

    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONALS: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Linear index delta of one step on the 0..64 board.
    pub const fn offset(self) -> i8 {
        match self {
            Direction::NorthWest => -9,
            Direction::North => -8,
            Direction::NorthEast => -7,
            Direction::East => 1,
            Direction::SouthEast => 9,
            Direction::South => 8,
            Direction::SouthWest => 7,
            Direction::West => -1,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 0
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: u8,
    pub to: u8,
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

impl PieceType {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'q' => Some(PieceType::Queen),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            'r' => Some(PieceType::Rook),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind }
    }

    /// Decodes a layout letter: upper case is White, lower case is Black.
    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { color, kind })
    }

    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

impl Square {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Square::Occupied(piece) => Some(*piece),
            Square::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Square::Empty
    }

    pub fn has_color(&self, color: Color) -> bool {
        matches!(self, Square::Occupied(piece) if piece.color == color)
    }
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", to_algebraic_square(self.from), to_algebraic_square(self.to))
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, MoveParseError> {
        if algebraic.len() != 4 || !algebraic.is_ascii() {
            return Err(MoveParseError::InvalidLength(algebraic.to_string()));
        }
        let from = square_from_algebraic(&algebraic[0..2])?;
        let to = square_from_algebraic(&algebraic[2..4])?;
        Ok(Self { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// Mailbox index of a square written as `e4`. Index 0 is a8, 63 is h1.
pub fn square_from_algebraic(algebraic: &str) -> Result<u8, MoveParseError> {
    let bytes = algebraic.as_bytes();
    if bytes.len() != 2 {
        return Err(MoveParseError::InvalidSquare(algebraic.to_string()));
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(MoveParseError::InvalidSquare(algebraic.to_string()));
    }
    let row = b'8' - rank;
    Ok(row * 8 + (file - b'a'))
}

pub fn to_algebraic_square(square: u8) -> String {
    let file = (b'a' + square % 8) as char;
    let rank = 8 - square / 8;
    format!("{}{}", file, rank)
}
