use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    Answer, AnswerSheet, ExamId, ExamRequest, MOCK_DURATION_SECS, OptionKey, Question,
};
use crate::scoring::{ScoreReport, score};
use crate::time::Clock;
use crate::timer::{Countdown, TickOutcome, TimerError};

//
// ─── PHASES, EVENTS, OUTCOMES ─────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configuring,
    Generating,
    Answering,
    ShowingFeedback,
    Finished,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Configuring => "configuring",
            Phase::Generating => "generating",
            Phase::Answering => "answering",
            Phase::ShowingFeedback => "showing_feedback",
            Phase::Finished => "finished",
        }
    }

    /// Phases in which a question is on screen and the countdown may run.
    #[must_use]
    pub fn is_in_exam(self) -> bool {
        matches!(self, Phase::Answering | Phase::ShowingFeedback)
    }

    /// Phases whose work a restart would throw away, so it asks first.
    #[must_use]
    pub fn is_in_progress(self) -> bool {
        self == Phase::Generating || self.is_in_exam()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one generation attempt. Responses carrying an older epoch are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    epoch: u64,
    request: ExamRequest,
}

impl GenerationTicket {
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn request(&self) -> ExamRequest {
        self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport error, non-success status, or an unusable response envelope.
    GenerationFailure,
    /// The response parsed but did not match the declared question shape.
    SchemaViolation,
}

/// User-visible description of a failed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationFailure {
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The generator returned a different number of questions than requested.
/// Tolerated: the session runs with what was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub requested: u32,
    pub received: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    TimeUp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Start(ExamRequest),
    GenerationSucceeded {
        ticket: GenerationTicket,
        questions: Vec<Question>,
    },
    GenerationFailed {
        ticket: GenerationTicket,
        failure: GenerationFailure,
    },
    ArmTimer,
    Answer(OptionKey),
    Skip,
    Continue,
    Tick,
    Restart {
        confirmed: bool,
    },
}

impl SessionEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Start(_) => "start",
            SessionEvent::GenerationSucceeded { .. } => "generation_succeeded",
            SessionEvent::GenerationFailed { .. } => "generation_failed",
            SessionEvent::ArmTimer => "arm_timer",
            SessionEvent::Answer(_) => "answer",
            SessionEvent::Skip => "skip",
            SessionEvent::Continue => "continue",
            SessionEvent::Tick => "tick",
            SessionEvent::Restart { .. } => "restart",
        }
    }
}

/// What a transition did, and what the owner of the session must do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Issue exactly one call to the question source for this ticket.
    GenerationRequested(GenerationTicket),
    Ready {
        received: usize,
        requested: u32,
    },
    ReturnedToSetup,
    TimerArmed,
    Feedback {
        chosen: Option<OptionKey>,
        correct: OptionKey,
    },
    Advanced {
        index: usize,
    },
    Finished,
    Ticked {
        remaining: u32,
    },
    TimeUp,
    /// Restart was requested without confirmation while an exam is in progress.
    ConfirmationRequired,
    Reset,
    /// A generation result for an abandoned epoch; nothing changed.
    Stale,
    Ignored,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("`{event}` is not valid while {phase}")]
    InvalidTransition { phase: Phase, event: &'static str },

    #[error("a generation request is already pending")]
    GenerationPending,

    #[error("question #{0} already has an answer")]
    AlreadyAnswered(usize),

    #[error("start the clock before answering")]
    TimerNotArmed,

    #[error("this exam has no countdown")]
    NotTimed,

    #[error("the countdown has already been started")]
    TimerAlreadyArmed,
}

/// Position within the exam, for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the question on screen.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
}

impl Progress {
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.position as f64 / self.total as f64) * 100.0).round() as u32
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position >= self.total
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// One exam session: configuration, generation wait, answering, results.
///
/// All changes go through [`ExamSession::apply`]. Side effects (the network call,
/// the ticker) are left to the owner, which acts on the returned [`Outcome`].
#[derive(Debug, Clone)]
pub struct ExamSession {
    clock: Clock,
    phase: Phase,
    epoch: u64,
    request: Option<ExamRequest>,
    exam_id: Option<ExamId>,
    questions: Vec<Question>,
    current_index: usize,
    answers: AnswerSheet,
    countdown: Countdown,
    count_mismatch: Option<CountMismatch>,
    failure: Option<GenerationFailure>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    finish_reason: Option<FinishReason>,
}

impl ExamSession {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            phase: Phase::Configuring,
            epoch: 0,
            request: None,
            exam_id: None,
            questions: Vec::new(),
            current_index: 0,
            answers: AnswerSheet::new(),
            countdown: Countdown::new(MOCK_DURATION_SECS),
            count_mismatch: None,
            failure: None,
            started_at: None,
            finished_at: None,
            finish_reason: None,
        }
    }

    /// Transition function: apply `event` to the current state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the event is not allowed in the current phase;
    /// the session is left unchanged in that case.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Outcome, SessionError> {
        let name = event.name();
        match event {
            SessionEvent::Start(request) => self.start(request).map(Outcome::GenerationRequested),
            SessionEvent::GenerationSucceeded { ticket, questions } => {
                Ok(self.generation_succeeded(ticket, questions))
            }
            SessionEvent::GenerationFailed { ticket, failure } => {
                Ok(self.generation_failed(ticket, failure))
            }
            SessionEvent::ArmTimer => self.arm_timer(name),
            SessionEvent::Answer(key) => self.answer(Answer::Chosen(key), name),
            SessionEvent::Skip => self.answer(Answer::Skipped, name),
            SessionEvent::Continue => match self.phase {
                Phase::ShowingFeedback => Ok(self.advance()),
                phase => Err(SessionError::InvalidTransition { phase, event: name }),
            },
            SessionEvent::Tick => Ok(self.tick()),
            SessionEvent::Restart { confirmed } => Ok(self.restart(confirmed)),
        }
    }

    /// Begin generating for `request`. Same as applying [`SessionEvent::Start`],
    /// but hands back the ticket directly.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::GenerationPending` while a request is outstanding, or
    /// `InvalidTransition` outside the configuring phase.
    pub fn start(&mut self, request: ExamRequest) -> Result<GenerationTicket, SessionError> {
        match self.phase {
            Phase::Configuring => {}
            Phase::Generating => return Err(SessionError::GenerationPending),
            phase => {
                return Err(SessionError::InvalidTransition {
                    phase,
                    event: "start",
                });
            }
        }

        self.epoch += 1;
        self.failure = None;
        self.request = Some(request);
        self.phase = Phase::Generating;
        Ok(GenerationTicket {
            epoch: self.epoch,
            request,
        })
    }

    fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.phase == Phase::Generating && ticket.epoch == self.epoch
    }

    fn generation_succeeded(
        &mut self,
        ticket: GenerationTicket,
        questions: Vec<Question>,
    ) -> Outcome {
        if !self.is_current(ticket) {
            return Outcome::Stale;
        }
        if questions.is_empty() {
            return self.generation_failed(
                ticket,
                GenerationFailure::new(
                    FailureKind::SchemaViolation,
                    "The generator returned no questions.",
                ),
            );
        }

        let request = ticket.request;
        let received = questions.len();
        let requested = request.count();
        self.count_mismatch = (usize::try_from(requested).ok() != Some(received)).then_some(
            CountMismatch {
                requested,
                received,
            },
        );
        self.questions = questions;
        self.current_index = 0;
        self.answers.clear();
        self.countdown = Countdown::new(request.duration_secs().unwrap_or(MOCK_DURATION_SECS));
        self.exam_id = Some(ExamId::random());
        self.started_at = Some(self.clock.now());
        self.finished_at = None;
        self.finish_reason = None;
        self.phase = Phase::Answering;

        Outcome::Ready {
            received,
            requested,
        }
    }

    fn generation_failed(&mut self, ticket: GenerationTicket, failure: GenerationFailure) -> Outcome {
        if !self.is_current(ticket) {
            return Outcome::Stale;
        }
        self.reset();
        self.failure = Some(failure);
        Outcome::ReturnedToSetup
    }

    fn arm_timer(&mut self, name: &'static str) -> Result<Outcome, SessionError> {
        if self.phase != Phase::Answering {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                event: name,
            });
        }
        if !self.is_timed() {
            return Err(SessionError::NotTimed);
        }
        self.countdown.arm().map_err(|err| match err {
            TimerError::AlreadyArmed | TimerError::Expired => SessionError::TimerAlreadyArmed,
        })?;
        Ok(Outcome::TimerArmed)
    }

    fn answer(&mut self, answer: Answer, name: &'static str) -> Result<Outcome, SessionError> {
        match self.phase {
            Phase::Answering => {}
            Phase::ShowingFeedback => {
                return Err(SessionError::AlreadyAnswered(self.current_index));
            }
            phase => return Err(SessionError::InvalidTransition { phase, event: name }),
        }
        if self.is_awaiting_timer_start() {
            return Err(SessionError::TimerNotArmed);
        }

        let index = self.current_index;
        let correct = self.questions[index].correct_option();
        self.answers
            .record(index, answer)
            .map_err(|_| SessionError::AlreadyAnswered(index))?;

        match answer {
            Answer::Chosen(key) if key == correct => Ok(self.advance()),
            _ => {
                self.phase = Phase::ShowingFeedback;
                Ok(Outcome::Feedback {
                    chosen: answer.chosen(),
                    correct,
                })
            }
        }
    }

    fn advance(&mut self) -> Outcome {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.phase = Phase::Answering;
            Outcome::Advanced {
                index: self.current_index,
            }
        } else {
            self.finish(FinishReason::Completed);
            Outcome::Finished
        }
    }

    fn tick(&mut self) -> Outcome {
        if !self.phase.is_in_exam() || !self.is_timed() {
            return Outcome::Ignored;
        }
        match self.countdown.tick() {
            TickOutcome::Ignored => Outcome::Ignored,
            TickOutcome::Running(remaining) => Outcome::Ticked { remaining },
            TickOutcome::Expired => {
                self.finish(FinishReason::TimeUp);
                Outcome::TimeUp
            }
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        self.phase = Phase::Finished;
        self.finished_at = Some(self.clock.now());
        self.finish_reason = Some(reason);
    }

    fn restart(&mut self, confirmed: bool) -> Outcome {
        match self.phase {
            Phase::Configuring => Outcome::Ignored,
            Phase::Finished => {
                self.reset();
                Outcome::Reset
            }
            phase if phase.is_in_progress() && !confirmed => Outcome::ConfirmationRequired,
            _ => {
                self.reset();
                Outcome::Reset
            }
        }
    }

    /// Back to an empty configuring session. The epoch moves on so any
    /// in-flight response is recognised as stale.
    fn reset(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Configuring;
        self.request = None;
        self.exam_id = None;
        self.questions.clear();
        self.current_index = 0;
        self.answers.clear();
        self.countdown = Countdown::new(MOCK_DURATION_SECS);
        self.count_mismatch = None;
        self.started_at = None;
        self.finished_at = None;
        self.finish_reason = None;
    }

    //
    // ─── READ ACCESS ──────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn request(&self) -> Option<ExamRequest> {
        self.request
    }

    #[must_use]
    pub fn exam_id(&self) -> Option<ExamId> {
        self.exam_id
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.request.is_some_and(|request| request.is_timed())
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question on screen, while answering or showing feedback.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase.is_in_exam() {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<Answer> {
        self.current_question()
            .and_then(|_| self.answers.get(self.current_index))
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Seconds left, for timed exams only.
    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.is_timed().then(|| self.countdown.remaining())
    }

    /// Timed exam loaded, clock not started yet: input stays locked.
    #[must_use]
    pub fn is_awaiting_timer_start(&self) -> bool {
        self.phase == Phase::Answering && self.is_timed() && !self.countdown.is_armed()
    }

    /// Whether the once-per-second tick source should be running.
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.phase.is_in_exam() && self.is_timed() && self.countdown.is_running()
    }

    #[must_use]
    pub fn count_mismatch(&self) -> Option<CountMismatch> {
        self.count_mismatch
    }

    #[must_use]
    pub fn failure(&self) -> Option<&GenerationFailure> {
        self.failure.as_ref()
    }

    /// Hand the pending failure notice to the caller; later calls return `None`.
    pub fn take_failure(&mut self) -> Option<GenerationFailure> {
        self.failure.take()
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.current_question().map(|_| Progress {
            position: self.current_index + 1,
            total: self.questions.len(),
            answered: self.answers.len(),
        })
    }

    #[must_use]
    pub fn score(&self) -> ScoreReport {
        score(&self.questions, &self.answers)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
