use exam_core::model::{Answer, Difficulty, OptionKey};
use exam_core::session::{ExamSession, Phase};

use crate::vm::time_fmt::{format_countdown, is_warning};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Selectable.
    Open,
    /// The right answer, revealed after answering.
    Correct,
    /// The user's wrong pick.
    Wrong,
    /// Locked, neither chosen nor correct.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open => "exam-option",
            OptionState::Correct => "exam-option exam-option--correct",
            OptionState::Wrong => "exam-option exam-option--wrong",
            OptionState::Dimmed => "exam-option exam-option--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub label: &'static str,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub skipped: bool,
    pub correct_label: &'static str,
    pub correct_text: String,
    pub justification: String,
    pub continue_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub text: String,
    pub warning: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub position: usize,
    pub total: usize,
    pub percent: u32,
    pub block: String,
    pub difficulty: &'static str,
    pub statement: String,
    pub options: Vec<OptionVm>,
    pub locked: bool,
    pub awaiting_clock: bool,
    pub timer: Option<TimerVm>,
    pub feedback: Option<FeedbackVm>,
}

#[must_use]
pub fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Low => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::High => "Hard",
    }
}

/// Map the question on screen, if any.
#[must_use]
pub fn map_question(session: &ExamSession) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let progress = session.progress()?;
    let answer = session.current_answer();
    let answered = answer.is_some();
    let correct = question.correct_option();

    let options = question
        .options()
        .iter()
        .map(|(key, text)| {
            let state = match answer {
                None => OptionState::Open,
                Some(_) if key == correct => OptionState::Correct,
                Some(Answer::Chosen(chosen)) if chosen == key => OptionState::Wrong,
                Some(_) => OptionState::Dimmed,
            };
            OptionVm {
                key,
                label: key.label(),
                text: text.to_string(),
                state,
            }
        })
        .collect();

    let feedback = (session.phase() == Phase::ShowingFeedback).then(|| FeedbackVm {
        skipped: answer == Some(Answer::Skipped),
        correct_label: correct.label(),
        correct_text: question.options().text(correct).to_string(),
        justification: question.justification().to_string(),
        continue_label: if progress.is_last() {
            "Finish and score"
        } else {
            "Next question"
        },
    });

    let awaiting_clock = session.is_awaiting_timer_start();
    let timer = session.time_remaining().map(|remaining| TimerVm {
        text: format_countdown(remaining),
        warning: is_warning(remaining),
    });

    Some(QuestionVm {
        position: progress.position,
        total: progress.total,
        percent: progress.percent(),
        block: question.block().to_string(),
        difficulty: difficulty_label(question.difficulty()),
        statement: question.statement().to_string(),
        options,
        locked: answered || awaiting_clock,
        awaiting_clock,
        timer,
        feedback,
    })
}
