//! Feedback calculation and the pattern codec.
//!
//! A feedback pattern is the per-letter verdict (green/yellow/gray) for a
//! guess against an answer. Patterns are stored as a compact [`PatternId`]:
//! each position contributes 0 (absent), 1 (present) or 2 (correct) times
//! `3^i`, with position 0 least significant.

use crate::error::{Result, SolverError};
use crate::{ALPHABET_SIZE, MAX_WORD_LENGTH};

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter not in word (gray)
    Absent,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Correct letter in correct position (green)
    Correct,
}

impl Feedback {
    pub const ALL: [Feedback; 3] = [Feedback::Absent, Feedback::Present, Feedback::Correct];

    /// Base-3 digit used by the codec.
    pub fn value(self) -> u16 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }

    fn from_value(value: u16) -> Self {
        match value {
            0 => Feedback::Absent,
            1 => Feedback::Present,
            _ => Feedback::Correct,
        }
    }

    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character: g/y/b colours, 2/1/0 digits, or the
    /// c/v/i (correct/valid/invalid) keys.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' | 'c' => Some(Feedback::Correct),
            'y' | '1' | 'v' => Some(Feedback::Present),
            'b' | 'x' | '0' | 'i' => Some(Feedback::Absent),
            _ => None,
        }
    }
}

/// Compact identifier of a finalized feedback pattern, in `0..3^L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(pub u16);

impl PatternId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A finalized feedback pattern: one [`Feedback`] per letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedbackPattern(Vec<Feedback>);

impl FeedbackPattern {
    pub fn new(feedbacks: Vec<Feedback>) -> Self {
        Self(feedbacks)
    }

    /// The pattern indicating all correct (winning)
    pub fn all_correct(word_length: usize) -> Self {
        Self(vec![Feedback::Correct; word_length])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.0
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&f| f == Feedback::Correct)
    }

    /// Parse a pattern from a string like "gybbb", "21000" or "cviii".
    pub fn parse(s: &str, word_length: usize) -> Result<Self> {
        let actual = s.chars().count();
        if actual != word_length {
            return Err(SolverError::InvalidLength {
                expected: word_length,
                actual,
            });
        }
        let mut draft = PatternDraft::new(word_length);
        for c in s.chars() {
            let feedback = Feedback::from_char(c).ok_or(SolverError::InvalidPatternChar(c))?;
            draft.push(feedback);
        }
        draft.finalize()
    }

    /// Display as emoji string
    pub fn to_emoji_string(&self) -> String {
        self.0.iter().map(|f| f.to_char()).collect()
    }
}

impl std::fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// A pattern being entered one letter at a time. Slots that have not been
/// entered yet are `None` (unset) and must all be filled before the draft
/// becomes a [`FeedbackPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDraft {
    slots: Vec<Option<Feedback>>,
    cursor: usize,
}

impl PatternDraft {
    pub fn new(word_length: usize) -> Self {
        Self {
            slots: vec![None; word_length],
            cursor: 0,
        }
    }

    /// Fill the next unset slot. Returns false when the draft is already full.
    pub fn push(&mut self, feedback: Feedback) -> bool {
        if self.cursor >= self.slots.len() {
            return false;
        }
        self.slots[self.cursor] = Some(feedback);
        self.cursor += 1;
        true
    }

    /// Clear the most recently filled slot (backspace).
    pub fn pop(&mut self) -> Option<Feedback> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.slots[self.cursor].take()
    }

    pub fn set(&mut self, position: usize, feedback: Option<Feedback>) -> Result<()> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(position)
            .ok_or(SolverError::PositionOutOfRange { position, len })?;
        *slot = feedback;
        self.cursor = self.slots.iter().take_while(|s| s.is_some()).count();
        Ok(())
    }

    pub fn slots(&self) -> &[Option<Feedback>] {
        &self.slots
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.cursor = 0;
    }

    pub fn finalize(&self) -> Result<FeedbackPattern> {
        self.slots
            .iter()
            .map(|s| s.ok_or(SolverError::IncompletePattern))
            .collect::<Result<Vec<_>>>()
            .map(FeedbackPattern)
    }
}

/// Converts between [`FeedbackPattern`] and [`PatternId`] for a fixed word
/// length, and computes the feedback rule itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCodec {
    word_length: usize,
    num_patterns: usize,
}

impl PatternCodec {
    pub fn new(word_length: usize) -> Result<Self> {
        if word_length == 0 || word_length > MAX_WORD_LENGTH {
            return Err(SolverError::UnsupportedWordLength(word_length));
        }
        Ok(Self {
            word_length,
            num_patterns: 3usize.pow(word_length as u32),
        })
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Total number of possible patterns (3^L)
    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// The id of the all-correct pattern, `3^L - 1`.
    pub fn all_correct(&self) -> PatternId {
        PatternId((self.num_patterns - 1) as u16)
    }

    pub fn is_win(&self, id: PatternId) -> bool {
        id == self.all_correct()
    }

    pub fn encode(&self, pattern: &FeedbackPattern) -> Result<PatternId> {
        if pattern.len() != self.word_length {
            return Err(SolverError::InvalidLength {
                expected: self.word_length,
                actual: pattern.len(),
            });
        }
        Ok(encode_values(pattern.feedbacks().iter().map(|f| f.value())))
    }

    pub fn decode(&self, id: PatternId) -> Result<FeedbackPattern> {
        if id.index() >= self.num_patterns {
            return Err(SolverError::InvalidId {
                id: id.index(),
                limit: self.num_patterns,
            });
        }
        Ok(self.decode_in_range(id))
    }

    fn decode_in_range(&self, id: PatternId) -> FeedbackPattern {
        let mut rest = id.0;
        let feedbacks = (0..self.word_length)
            .map(|_| {
                let digit = rest % 3;
                rest /= 3;
                Feedback::from_value(digit)
            })
            .collect();
        FeedbackPattern(feedbacks)
    }

    /// Every pattern for this word length, in id order.
    pub fn enumerate_patterns(&self) -> impl Iterator<Item = FeedbackPattern> + '_ {
        (0..self.num_patterns).map(move |id| self.decode_in_range(PatternId(id as u16)))
    }

    /// Calculate the feedback pattern for a guess against an answer.
    ///
    /// - Green (Correct): Letter is in the correct position
    /// - Yellow (Present): Letter is in the answer but wrong position
    /// - Gray (Absent): Letter is not in the answer (or all instances accounted for)
    pub fn compute_pattern(&self, guess: &str, answer: &str) -> Result<FeedbackPattern> {
        let guess = crate::corpus::check_word(guess, self.word_length)?;
        let answer = crate::corpus::check_word(answer, self.word_length)?;
        Ok(self.decode_in_range(self.compute_id(guess, answer)))
    }

    /// The feedback rule on raw lowercase ascii bytes, straight to an id.
    ///
    /// # Panics
    ///
    /// Both slices must already be validated words of this codec's length;
    /// other lengths or bytes outside `a..=z` index out of bounds.
    pub fn compute_id(&self, guess: &[u8], answer: &[u8]) -> PatternId {
        debug_assert_eq!(guess.len(), self.word_length);
        debug_assert_eq!(answer.len(), self.word_length);

        let mut feedback = [0u16; MAX_WORD_LENGTH];
        let mut remaining = [0u8; ALPHABET_SIZE];

        for &letter in answer {
            remaining[(letter - b'a') as usize] += 1;
        }

        for i in 0..self.word_length {
            if guess[i] == answer[i] {
                feedback[i] = 2;
                remaining[(guess[i] - b'a') as usize] -= 1;
            }
        }

        for i in 0..self.word_length {
            if feedback[i] == 0 {
                let idx = (guess[i] - b'a') as usize;
                if remaining[idx] > 0 {
                    feedback[i] = 1;
                    remaining[idx] -= 1;
                }
            }
        }

        encode_values(feedback[..self.word_length].iter().copied())
    }
}

fn encode_values(values: impl Iterator<Item = u16>) -> PatternId {
    let mut id: u16 = 0;
    let mut multiplier: u16 = 1;
    for value in values {
        id += value * multiplier;
        multiplier *= 3;
    }
    PatternId(id)
}
