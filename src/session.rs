//! A solving session: the candidate set and history for one puzzle.
//!
//! The corpus and matrix are shared read-only; the session owns only what
//! changes from round to round.

use crate::corpus::Corpus;
use crate::entropy::{rank_guesses, GuessAnalysis, GuessRanking};
use crate::error::{Result, SolverError};
use crate::feedback::FeedbackPattern;
use crate::filter::{filter_candidates, CandidateSet};
use crate::matrix::FeedbackMatrix;
use rayon::prelude::*;
use std::sync::Arc;

/// One applied guess and the feedback it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub guess: String,
    pub pattern: FeedbackPattern,
}

/// Outcome of [`SolverSession::apply_feedback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub before: usize,
    pub after: usize,
}

impl FilterOutcome {
    pub fn eliminated(&self) -> usize {
        self.before - self.after
    }
}

#[derive(Debug, Clone)]
pub struct SolverSession {
    corpus: Arc<Corpus>,
    matrix: Arc<FeedbackMatrix>,
    candidates: CandidateSet,
    history: Vec<Observation>,
}

impl SolverSession {
    pub fn new(corpus: Arc<Corpus>, matrix: Arc<FeedbackMatrix>) -> Result<Self> {
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
        Ok(Self {
            candidates: CandidateSet::full(corpus.len()),
            corpus,
            matrix,
            history: Vec::new(),
        })
    }

    /// Build the matrix for `corpus` and start a session over it.
    pub fn from_corpus(corpus: Corpus) -> Result<Self> {
        let matrix = FeedbackMatrix::build(&corpus)?;
        Self::new(Arc::new(corpus), Arc::new(matrix))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn matrix(&self) -> &FeedbackMatrix {
        &self.matrix
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn remaining_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn possible_answers(&self) -> Vec<&str> {
        self.candidates.words(&self.corpus).collect()
    }

    /// Number of observations applied so far.
    pub fn round(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.candidates = CandidateSet::full(self.corpus.len());
        self.history.clear();
    }

    /// Narrow the candidates with one observation.
    ///
    /// If no candidate would survive, the error is returned and the session
    /// is left exactly as it was.
    pub fn apply_feedback(&mut self, guess: &str, pattern: &FeedbackPattern) -> Result<FilterOutcome> {
        let before = self.candidates.len();
        let next = filter_candidates(&self.corpus, guess, pattern, &self.candidates)?;
        self.candidates = next;
        self.history.push(Observation {
            guess: guess.to_string(),
            pattern: pattern.clone(),
        });
        log::debug!("round {}: {} -> {} candidates", self.round(), before, self.candidates.len());
        Ok(FilterOutcome {
            before,
            after: self.candidates.len(),
        })
    }

    pub fn rank_guesses(&self) -> Result<GuessRanking> {
        rank_guesses(&self.corpus, &self.matrix, &self.candidates)
    }

    /// The guess to play next.
    ///
    /// With one or two candidates left, guessing a candidate is at least as
    /// good as any probe. Otherwise the top-entropy word, preferring a
    /// possible answer among equal scores.
    pub fn best_guess(&self) -> Result<GuessAnalysis> {
        let ranking = self.rank_guesses()?;
        if self.candidates.len() <= 2 {
            if let Some(found) = ranking.entries().iter().find(|a| a.is_possible_answer) {
                return Ok(found.clone());
            }
        }
        let best = ranking.best().ok_or(SolverError::EmptyCandidateSet)?;
        let pick = ranking
            .entries()
            .iter()
            .take_while(|a| a.entropy >= best.entropy)
            .find(|a| a.is_possible_answer)
            .unwrap_or(best);
        Ok(pick.clone())
    }

    /// Play until the feedback is a win or `max_rounds` guesses are made.
    /// Returns the sequence of guesses made.
    pub fn solve_with_feedback<F>(
        &mut self,
        mut get_feedback: F,
        max_rounds: usize,
    ) -> Result<Vec<(String, FeedbackPattern)>>
    where
        F: FnMut(&str) -> Result<FeedbackPattern>,
    {
        let mut guesses = Vec::new();

        for _ in 0..max_rounds {
            let best = self.best_guess()?;
            let pattern = get_feedback(&best.word)?;
            guesses.push((best.word.clone(), pattern.clone()));

            if pattern.is_win() {
                break;
            }

            self.apply_feedback(&best.word, &pattern)?;
        }

        Ok(guesses)
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(
        &mut self,
        target: &str,
        max_rounds: usize,
    ) -> Result<Vec<(String, FeedbackPattern)>> {
        let codec = *self.corpus.codec();
        self.solve_with_feedback(|guess| codec.compute_pattern(guess, target), max_rounds)
    }

    /// Self-play against every corpus word from this session's starting
    /// state. Returns (guesses used, word count) pairs; unsolved games
    /// count as `max_rounds + 1`.
    pub fn benchmark_guess_distribution(&self, max_rounds: usize) -> Result<Vec<(usize, usize)>> {
        let guess_counts: Vec<usize> = self
            .corpus
            .words()
            .par_iter()
            .map(|target| {
                let mut session = self.clone();
                let guesses = session.solve_for_target(target, max_rounds)?;
                let solved = guesses.last().is_some_and(|(_, p)| p.is_win());
                Ok(if solved { guesses.len() } else { max_rounds + 1 })
            })
            .collect::<Result<_>>()?;

        let max_guesses = guess_counts.iter().copied().max().unwrap_or(0);
        let mut distribution = vec![0usize; max_guesses + 1];

        for count in guess_counts {
            distribution[count] += 1;
        }

        Ok(distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    /// Average guesses over [`SolverSession::benchmark_guess_distribution`].
    pub fn benchmark_average_guesses(&self, max_rounds: usize) -> Result<f64> {
        let distribution = self.benchmark_guess_distribution(max_rounds)?;
        let total: usize = distribution.iter().map(|(_, c)| c).sum();
        let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
        Ok(total_guesses as f64 / total as f64)
    }
}
