//! Error types shared by every solver component.

use thiserror::Error;

/// Everything that can go wrong while building, filtering or ranking.
///
/// None of these are transient. `EmptyCandidateSet` is the one expected
/// during normal use: it means the observations entered so far contradict
/// every word in the corpus.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("expected length {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("pattern id {id} is outside 0..{limit}")]
    InvalidId { id: usize, limit: usize },
    #[error("the corpus contains no words")]
    EmptyCorpus,
    #[error("word '{word}' has length {actual}, corpus words have length {expected}")]
    InconsistentWordLength {
        word: String,
        expected: usize,
        actual: usize,
    },
    #[error("no corpus word is consistent with the observations so far")]
    EmptyCandidateSet,
    #[error("guess has length {guess}, pattern has length {pattern}, expected {expected}")]
    LengthMismatch {
        guess: usize,
        pattern: usize,
        expected: usize,
    },
    #[error("word length {0} is not supported (1..=10)")]
    UnsupportedWordLength(usize),
    #[error("'{0}' is not a lowercase ascii word")]
    InvalidWord(String),
    #[error("pattern has unset positions")]
    IncompletePattern,
    #[error("'{0}' is not a feedback character (use g/y/b, 2/1/0 or c/v/i)")]
    InvalidPatternChar(char),
    #[error("position {position} is outside a corpus of {len} words")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("matrix has {cells} cells, expected {size}x{size}")]
    MatrixShape { size: usize, cells: usize },
    #[error("matrix was built for words of length {actual}, corpus words have length {expected}")]
    MatrixWordLength { expected: usize, actual: usize },
    #[error("operation cancelled")]
    Cancelled,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
