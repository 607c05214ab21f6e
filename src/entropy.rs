//! Ranking guesses by expected information.
//!
//! A guess splits the current candidates into buckets by the feedback it
//! would produce. The Shannon entropy of that split, in bits, is how much we
//! expect to learn from it; higher is better.

use crate::cancel::CancelToken;
use crate::corpus::Corpus;
use crate::error::{Result, SolverError};
use crate::filter::CandidateSet;
use crate::matrix::FeedbackMatrix;
use rayon::prelude::*;

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: String,
    /// Fixed corpus position of `word`.
    pub position: usize,
    /// Expected information in bits.
    pub entropy: f64,
    /// Expected number of candidates left after this guess.
    pub expected_remaining: f64,
    pub is_possible_answer: bool,
}

/// Guesses ordered by descending entropy; ties keep corpus order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuessRanking {
    entries: Vec<GuessAnalysis>,
}

impl GuessRanking {
    pub fn entries(&self) -> &[GuessAnalysis] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&GuessAnalysis> {
        self.entries.first()
    }

    pub fn top(&self, n: usize) -> &[GuessAnalysis] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Only the guesses that are themselves still possible answers.
    pub fn restricted_to_candidates(&self) -> GuessRanking {
        GuessRanking {
            entries: self
                .entries
                .iter()
                .filter(|a| a.is_possible_answer)
                .cloned()
                .collect(),
        }
    }

    pub fn into_entries(self) -> Vec<GuessAnalysis> {
        self.entries
    }
}

struct Score {
    entropy: f64,
    expected_remaining: f64,
}

fn score(
    matrix: &FeedbackMatrix,
    guess_position: usize,
    candidates: &CandidateSet,
    num_patterns: usize,
) -> Score {
    let mut pattern_counts = vec![0u32; num_patterns];
    let row = matrix.row(guess_position);
    for &answer in candidates.positions() {
        pattern_counts[row[answer] as usize] += 1;
    }

    let n = candidates.len() as f64;
    let mut entropy = 0.0;
    let mut sum_squares = 0.0;
    for &count in &pattern_counts {
        if count > 0 {
            let c = count as f64;
            let p = c / n;
            entropy -= p * p.log2();
            sum_squares += c * c;
        }
    }

    Score {
        entropy,
        expected_remaining: sum_squares / n,
    }
}

fn check_inputs(matrix: &FeedbackMatrix, candidates: &CandidateSet) -> Result<()> {
    if candidates.is_empty() {
        return Err(SolverError::EmptyCandidateSet);
    }
    if let Some(&position) = candidates.positions().last() {
        if position >= matrix.size() {
            return Err(SolverError::PositionOutOfRange {
                position,
                len: matrix.size(),
            });
        }
    }
    Ok(())
}

/// Entropy in bits of the feedback distribution `guess_position` induces
/// over `candidates`. Zero means every candidate gives the same feedback.
pub fn expected_information(
    matrix: &FeedbackMatrix,
    guess_position: usize,
    candidates: &CandidateSet,
) -> Result<f64> {
    check_inputs(matrix, candidates)?;
    if guess_position >= matrix.size() {
        return Err(SolverError::PositionOutOfRange {
            position: guess_position,
            len: matrix.size(),
        });
    }
    let num_patterns = 3usize.pow(matrix.word_length() as u32);
    Ok(score(matrix, guess_position, candidates, num_patterns).entropy)
}

/// Score every corpus word as a guess against `candidates`.
///
/// The guess pool is the whole corpus, including words already ruled out as
/// answers; use [`GuessRanking::restricted_to_candidates`] to narrow it.
pub fn rank_guesses(
    corpus: &Corpus,
    matrix: &FeedbackMatrix,
    candidates: &CandidateSet,
) -> Result<GuessRanking> {
    rank(corpus, matrix, candidates, None)
}

/// Like [`rank_guesses`], but stops between guesses once `cancel` fires.
pub fn rank_cancellable(
    corpus: &Corpus,
    matrix: &FeedbackMatrix,
    candidates: &CandidateSet,
    cancel: &CancelToken,
) -> Result<GuessRanking> {
    rank(corpus, matrix, candidates, Some(cancel))
}

fn rank(
    corpus: &Corpus,
    matrix: &FeedbackMatrix,
    candidates: &CandidateSet,
    cancel: Option<&CancelToken>,
) -> Result<GuessRanking> {
    if matrix.size() != corpus.len() {
        return Err(SolverError::MatrixShape {
            size: corpus.len(),
            cells: matrix.as_slice().len(),
        });
    }
    if matrix.word_length() != corpus.word_length() {
        return Err(SolverError::MatrixWordLength {
            expected: corpus.word_length(),
            actual: matrix.word_length(),
        });
    }
    check_inputs(matrix, candidates)?;
    let num_patterns = corpus.codec().num_patterns();

    let mut analyses: Vec<GuessAnalysis> = corpus
        .words()
        .par_iter()
        .enumerate()
        .map(|(position, word)| {
            if let Some(cancel) = cancel {
                cancel.check()?;
            }
            let score = score(matrix, position, candidates, num_patterns);
            Ok(GuessAnalysis {
                word: word.clone(),
                position,
                entropy: score.entropy,
                expected_remaining: score.expected_remaining,
                is_possible_answer: candidates.contains(position),
            })
        })
        .collect::<Result<_>>()?;

    // Stable, so equal entropies stay in corpus order.
    analyses.sort_by(|a, b| b.entropy.total_cmp(&a.entropy));

    log::debug!(
        "ranked {} guesses over {} candidates",
        analyses.len(),
        candidates.len()
    );
    Ok(GuessRanking { entries: analyses })
}
