//! Solver settings shared by the library session and the command line.

use crate::error::{Result, SolverError};
use crate::MAX_WORD_LENGTH;

/// How many turns a standard game allows.
pub const DEFAULT_MAX_ROUNDS: usize = 6;
/// How many ranked guesses to show.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Letters per word; words of other lengths are dropped from the corpus.
    pub word_length: usize,
    pub top_n: usize,
    /// Self-play gives up after this many guesses.
    pub max_rounds: usize,
    /// Worker threads for matrix build and ranking; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            word_length: crate::WORD_LENGTH,
            top_n: DEFAULT_TOP_N,
            max_rounds: DEFAULT_MAX_ROUNDS,
            threads: None,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 || self.word_length > MAX_WORD_LENGTH {
            return Err(SolverError::UnsupportedWordLength(self.word_length));
        }
        if self.top_n == 0 {
            return Err(SolverError::InvalidConfig("top must be at least 1".into()));
        }
        if self.max_rounds == 0 {
            return Err(SolverError::InvalidConfig("max rounds must be at least 1".into()));
        }
        if self.threads == Some(0) {
            return Err(SolverError::InvalidConfig("threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Size the global rayon pool. Only the first call in a process takes effect.
    pub fn init_thread_pool(&self) -> Result<()> {
        if let Some(threads) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .map_err(|e| SolverError::InvalidConfig(e.to_string()))?;
            log::debug!("using {} worker threads", threads);
        }
        Ok(())
    }
}
