//! Precomputed feedback for every (guess, answer) pair in the corpus.
//!
//! Cell `(g, a)` holds the [`PatternId`] produced by guessing `corpus[g]`
//! when the answer is `corpus[a]`. Building it is `O(N² · L)` and dominates
//! start-up, so rows are computed in parallel; each worker owns one row.

use crate::cancel::CancelToken;
use crate::corpus::Corpus;
use crate::error::{Result, SolverError};
use crate::feedback::PatternId;
use rayon::prelude::*;
use std::time::Instant;

/// Dense N×N matrix of pattern ids, stored row-major by guess position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMatrix {
    size: usize,
    word_length: usize,
    cells: Vec<u16>,
}

impl FeedbackMatrix {
    /// Build the matrix for `corpus`.
    pub fn build(corpus: &Corpus) -> Result<Self> {
        let (size, cells) = compute_cells(corpus, None)?;
        Ok(Self {
            size,
            word_length: corpus.word_length(),
            cells,
        })
    }

    /// Like [`FeedbackMatrix::build`], but stops between rows once `cancel` fires.
    pub fn build_cancellable(corpus: &Corpus, cancel: &CancelToken) -> Result<Self> {
        let (size, cells) = compute_cells(corpus, Some(cancel))?;
        Ok(Self {
            size,
            word_length: corpus.word_length(),
            cells,
        })
    }

    /// Accept a matrix back from a cache, in its canonical row-major shape.
    pub fn from_raw(size: usize, word_length: usize, cells: Vec<u16>) -> Result<Self> {
        let codec = crate::feedback::PatternCodec::new(word_length)?;
        if size == 0 {
            return Err(SolverError::EmptyCorpus);
        }
        if size.checked_mul(size) != Some(cells.len()) {
            return Err(SolverError::MatrixShape {
                size,
                cells: cells.len(),
            });
        }
        if let Some(&bad) = cells.iter().find(|&&c| c as usize >= codec.num_patterns()) {
            return Err(SolverError::InvalidId {
                id: bad as usize,
                limit: codec.num_patterns(),
            });
        }
        Ok(Self {
            size,
            word_length,
            cells,
        })
    }

    /// Number of corpus words (the matrix is `size × size`).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// # Panics
    ///
    /// If either position is `>= size()`.
    pub fn get(&self, guess: usize, answer: usize) -> PatternId {
        PatternId(self.cells[guess * self.size + answer])
    }

    /// All answers' pattern ids for one guess, indexed by answer position.
    ///
    /// # Panics
    ///
    /// If `guess >= size()`.
    pub fn row(&self, guess: usize) -> &[u16] {
        &self.cells[guess * self.size..(guess + 1) * self.size]
    }

    /// Raw row-major cells, for handing to a cache.
    pub fn as_slice(&self) -> &[u16] {
        &self.cells
    }

    pub fn into_raw(self) -> Vec<u16> {
        self.cells
    }
}

fn compute_cells(corpus: &Corpus, cancel: Option<&CancelToken>) -> Result<(usize, Vec<u16>)> {
    let size = corpus.len();
    if size == 0 {
        return Err(SolverError::EmptyCorpus);
    }
    let codec = corpus.codec();
    let words: Vec<&[u8]> = corpus.words().iter().map(|w| w.as_bytes()).collect();

    log::info!("computing {}x{} feedback matrix", size, size);
    let start = Instant::now();

    let mut cells = vec![0u16; size * size];
    cells
        .par_chunks_mut(size)
        .enumerate()
        .try_for_each(|(g, row)| {
            if let Some(cancel) = cancel {
                cancel.check()?;
            }
            let guess = words[g];
            for (cell, answer) in row.iter_mut().zip(&words) {
                *cell = codec.compute_id(guess, answer).0;
            }
            Ok::<(), SolverError>(())
        })?;

    log::info!("feedback matrix built in {:.2?}", start.elapsed());
    Ok((size, cells))
}
