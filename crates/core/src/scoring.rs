use crate::model::{Answer, AnswerSheet, Question};

/// Points subtracted per wrong answer. Skips cost nothing.
pub const WRONG_ANSWER_PENALTY: f64 = 1.0 / 3.0;

/// Normalised score needed to pass.
pub const PASS_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Outcome of scoring a set of answers against a set of questions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    correct: usize,
    incorrect: usize,
    skipped: usize,
    total: usize,
    raw_score: f64,
    normalized_score: Option<f64>,
}

impl ScoreReport {
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `correct - incorrect / 3`.
    #[must_use]
    pub fn raw_score(&self) -> f64 {
        self.raw_score
    }

    /// Raw score as a percentage of the question count; `None` for an empty exam.
    /// Negative when wrong answers dominate.
    #[must_use]
    pub fn normalized_score(&self) -> Option<f64> {
        self.normalized_score
    }

    #[must_use]
    pub fn normalized_or_zero(&self) -> f64 {
        self.normalized_score.unwrap_or(0.0)
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self.normalized_score {
            Some(score) if score >= PASS_THRESHOLD => Verdict::Pass,
            _ => Verdict::Fail,
        }
    }
}

/// Score `answers` against `questions`.
///
/// An index with no entry, or with an explicit skip, counts as skipped.
/// Entries for indices past the end of `questions` are ignored.
#[must_use]
pub fn score(questions: &[Question], answers: &AnswerSheet) -> ScoreReport {
    let mut correct = 0_usize;
    let mut incorrect = 0_usize;
    let mut skipped = 0_usize;

    for (index, question) in questions.iter().enumerate() {
        match answers.get(index) {
            None | Some(Answer::Skipped) => skipped += 1,
            Some(Answer::Chosen(key)) if question.is_correct(key) => correct += 1,
            Some(Answer::Chosen(_)) => incorrect += 1,
        }
    }

    let total = questions.len();
    let raw_score = correct as f64 - incorrect as f64 * WRONG_ANSWER_PENALTY;
    let normalized_score = (total > 0).then(|| raw_score * 100.0 / total as f64);

    ScoreReport {
        correct,
        incorrect,
        skipped,
        total,
        raw_score,
        normalized_score,
    }
}
