//! # Wordle Entropy
//!
//! A multithreaded solver for fixed-length word-guessing puzzles.
//!
//! The feedback for every (guess, answer) pair in the corpus is computed once
//! into a [`FeedbackMatrix`]. Each round, observed feedback narrows the
//! [`CandidateSet`], and every corpus word is re-ranked by the expected
//! information (entropy) of the feedback it would produce.

pub mod cancel;
pub mod config;
pub mod corpus;
pub mod entropy;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod matrix;
pub mod session;

pub use cancel::CancelToken;
pub use config::SolverConfig;
pub use corpus::Corpus;
pub use entropy::{expected_information, rank_guesses, GuessAnalysis, GuessRanking};
pub use error::{Result, SolverError};
pub use feedback::{Feedback, FeedbackPattern, PatternCodec, PatternDraft, PatternId};
pub use filter::{filter_candidates, CandidateSet};
pub use matrix::FeedbackMatrix;
pub use session::{FilterOutcome, Observation, SolverSession};

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Longest supported word; 3^10 pattern ids still fit in a `u16`.
pub const MAX_WORD_LENGTH: usize = 10;

pub const ALPHABET_SIZE: usize = 26;

/// Load the embedded dictionary, keeping words of `word_length` letters.
pub fn load_dictionary(word_length: usize) -> Result<Corpus> {
    Corpus::from_text(include_str!("../dictionary/dictionary.txt"), word_length)
}

/// Build the feedback matrix for an ordered list of equal-length words.
///
/// The word length is taken from the first word; any other length is
/// [`SolverError::InconsistentWordLength`].
pub fn build_feedback_matrix<S: AsRef<str>>(words: &[S]) -> Result<FeedbackMatrix> {
    let first = words.first().ok_or(SolverError::EmptyCorpus)?;
    let word_length = first.as_ref().len();
    let words = words.iter().map(|w| w.as_ref().to_string()).collect();
    let corpus = Corpus::new(words, word_length)?;
    FeedbackMatrix::build(&corpus)
}
