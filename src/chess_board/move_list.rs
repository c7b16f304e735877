use super::Move;

/// Moves generated for the side to move. Cleared at the start of every turn
/// and only read until the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self { moves: Vec::with_capacity(128) }
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn contains(&self, from: u8, to: u8) -> bool {
        self.moves.iter().any(|m| m.from == from && m.to == to)
    }

    /// Moves starting on `square`, in generation order.
    pub fn from_square(&self, square: u8) -> impl Iterator<Item = &Move> + '_ {
        self.moves.iter().filter(move |m| m.from == square)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
