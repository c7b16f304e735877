//! Error types for position loading and move text parsing.

/// Errors raised while decoding a position description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The description has no piece layout at all
    #[error("Invalid FEN string: empty piece layout")]
    Empty,

    /// A character in the layout is neither a piece letter, a digit nor `/`
    #[error("Invalid piece character in FEN string: {0}")]
    InvalidPiece(char),

    /// Empty-square counts must be 1 through 8
    #[error("Invalid empty square count in FEN string: {0}")]
    InvalidEmptyCount(char),

    /// A rank describes more than eight files
    #[error("Too many squares in rank {rank} when parsing FEN")]
    TooManyFiles { rank: usize },

    /// A rank describes fewer than eight files
    #[error("Rank {rank} only describes {files} squares")]
    IncompleteRank { rank: usize, files: usize },

    /// The layout has more than eight ranks
    #[error("Invalid FEN string: more than 8 ranks")]
    TooManyRanks,

    /// The layout has fewer than eight ranks
    #[error("Invalid FEN string: expected 8 ranks, found {found}")]
    MissingRanks { found: usize },

    /// The side-to-move field is something other than `w` or `b`
    #[error("Invalid FEN string: invalid active color '{0}'")]
    InvalidSideToMove(String),
}

/// Errors raised while reading coordinate move text such as `e2e4`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("Move text must be four characters like e2e4, got '{0}'")]
    InvalidLength(String),

    #[error("Invalid square: {0}")]
    InvalidSquare(String),
}

/// Result type alias for position loading
pub type FenResult<T> = Result<T, FenError>;
