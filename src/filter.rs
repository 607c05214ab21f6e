//! Narrowing the candidate set with an observed feedback pattern.

use crate::corpus::{check_word, Corpus};
use crate::error::{Result, SolverError};
use crate::feedback::FeedbackPattern;

/// Corpus positions still consistent with every observation so far.
///
/// Positions always refer to the full corpus, never to an offset within a
/// previously filtered set, so they stay valid as matrix indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    positions: Vec<usize>,
}

impl CandidateSet {
    /// Every position of a corpus of `len` words.
    pub fn full(len: usize) -> Self {
        Self {
            positions: (0..len).collect(),
        }
    }

    /// A set from explicit positions, which must all be below `corpus_len`.
    /// Duplicates are removed and positions are kept in corpus order.
    pub fn from_positions(mut positions: Vec<usize>, corpus_len: usize) -> Result<Self> {
        if let Some(&position) = positions.iter().find(|&&p| p >= corpus_len) {
            return Err(SolverError::PositionOutOfRange {
                position,
                len: corpus_len,
            });
        }
        positions.sort_unstable();
        positions.dedup();
        Ok(Self { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    pub fn words<'a>(&'a self, corpus: &'a Corpus) -> impl Iterator<Item = &'a str> + 'a {
        self.positions
            .iter()
            .filter_map(move |&p| corpus.words().get(p).map(String::as_str))
    }
}

/// Keep the candidates that would have produced exactly `observed` for `guess`.
///
/// The guess does not have to be in the corpus. Fails with
/// [`SolverError::EmptyCandidateSet`] when nothing survives, leaving the
/// caller's set untouched.
pub fn filter_candidates(
    corpus: &Corpus,
    guess: &str,
    observed: &FeedbackPattern,
    candidates: &CandidateSet,
) -> Result<CandidateSet> {
    let word_length = corpus.word_length();
    if guess.len() != word_length || observed.len() != word_length {
        return Err(SolverError::LengthMismatch {
            guess: guess.len(),
            pattern: observed.len(),
            expected: word_length,
        });
    }
    if let Some(&position) = candidates.positions().last() {
        if position >= corpus.len() {
            return Err(SolverError::PositionOutOfRange {
                position,
                len: corpus.len(),
            });
        }
    }
    let guess_bytes = check_word(guess, word_length)?;
    let codec = corpus.codec();
    let target = codec.encode(observed)?;
    let words = corpus.words();

    let positions: Vec<usize> = candidates
        .positions()
        .iter()
        .copied()
        .filter(|&p| codec.compute_id(guess_bytes, words[p].as_bytes()) == target)
        .collect();

    log::debug!(
        "filter {} {}: {} -> {} candidates",
        guess,
        observed,
        candidates.len(),
        positions.len()
    );

    if positions.is_empty() {
        log::warn!("no candidates match {} {}", guess, observed);
        return Err(SolverError::EmptyCandidateSet);
    }
    Ok(CandidateSet { positions })
}
