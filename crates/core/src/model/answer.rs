use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::question::OptionKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("question #{0} already has an answer")]
    AlreadyAnswered(usize),
}

/// What the user committed for a question.
///
/// `Skipped` is an explicit "no answer" and differs from an index that was never visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Chosen(OptionKey),
    Skipped,
}

impl Answer {
    #[must_use]
    pub fn chosen(self) -> Option<OptionKey> {
        match self {
            Answer::Chosen(key) => Some(key),
            Answer::Skipped => None,
        }
    }
}

/// Committed answers by question index. Entries are write-once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    entries: BTreeMap<usize, Answer>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `AnswerError::AlreadyAnswered` if `index` already holds an answer.
    pub fn record(&mut self, index: usize, answer: Answer) -> Result<(), AnswerError> {
        if self.entries.contains_key(&index) {
            return Err(AnswerError::AlreadyAnswered(index));
        }
        self.entries.insert(index, answer);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Answer> {
        self.entries.get(&index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(usize, Answer)> for AnswerSheet {
    /// Later duplicates of an index are dropped, matching `record`.
    fn from_iter<T: IntoIterator<Item = (usize, Answer)>>(iter: T) -> Self {
        let mut sheet = AnswerSheet::new();
        for (index, answer) in iter {
            let _ = sheet.record(index, answer);
        }
        sheet
    }
}
