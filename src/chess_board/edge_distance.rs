use super::Direction;
use lazy_static::lazy_static;

const BOARD_SIZE: usize = 8;

/// Number of steps available from every square in every direction before
/// leaving the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDistances {
    distances: [[u8; 8]; BOARD_SIZE * BOARD_SIZE],
}

lazy_static! {
    pub static ref EDGE_DISTANCES: EdgeDistances = EdgeDistances::new();
}

impl EdgeDistances {
    pub fn new() -> Self {
        let mut distances = [[0u8; 8]; BOARD_SIZE * BOARD_SIZE];

        for (square, entry) in distances.iter_mut().enumerate() {
            let row = (square / BOARD_SIZE) as u8;
            let file = (square % BOARD_SIZE) as u8;

            let north = row;
            let east = 7 - file;
            let south = 7 - row;
            let west = file;

            entry[Direction::North.index()] = north;
            entry[Direction::East.index()] = east;
            entry[Direction::South.index()] = south;
            entry[Direction::West.index()] = west;

            entry[Direction::NorthWest.index()] = north.min(west);
            entry[Direction::NorthEast.index()] = north.min(east);
            entry[Direction::SouthEast.index()] = south.min(east);
            entry[Direction::SouthWest.index()] = south.min(west);
        }

        Self { distances }
    }

    #[inline]
    pub fn get(&self, square: u8, direction: Direction) -> u8 {
        self.distances[square as usize][direction.index()]
    }

    /// All eight distances of one square, indexed by `Direction::index`.
    pub fn of(&self, square: u8) -> &[u8; 8] {
        &self.distances[square as usize]
    }
}

impl Default for EdgeDistances {
    fn default() -> Self {
        Self::new()
    }
}
