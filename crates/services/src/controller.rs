use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use exam_core::model::{ExamRequest, ExamScope, OptionKey, Question};
use exam_core::scoring::ScoreReport;
use exam_core::session::{
    ExamSession, GenerationFailure, GenerationTicket, Outcome, Progress, SessionEvent,
};

use crate::Clock;
use crate::error::{ControllerError, GenerationError};
use crate::question_source::QuestionSource;
use crate::ticker::{Tick, TickReceiver, TickSender, Ticker, tick_channel};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A generation call that has been authorised but not yet made.
///
/// Running it does not touch the session, so it can be awaited without holding
/// a borrow of the controller.
pub struct PendingGeneration {
    ticket: GenerationTicket,
    source: Arc<dyn QuestionSource>,
}

impl PendingGeneration {
    #[must_use]
    pub fn ticket(&self) -> GenerationTicket {
        self.ticket
    }

    pub async fn run(self) -> GenerationResult {
        let result = self.source.generate(&self.ticket.request()).await;
        GenerationResult {
            ticket: self.ticket,
            result,
        }
    }
}

impl fmt::Debug for PendingGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGeneration")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// What the question source produced for one ticket.
#[derive(Debug)]
pub struct GenerationResult {
    pub ticket: GenerationTicket,
    pub result: Result<Vec<Question>, GenerationError>,
}

/// Drives one `ExamSession`: issues generation calls, runs the countdown ticker,
/// and forwards user actions.
pub struct ExamController {
    session: ExamSession,
    source: Arc<dyn QuestionSource>,
    ticks: TickSender,
    ticker: Option<Ticker>,
    ticker_generation: u64,
    tick_period: Duration,
}

impl ExamController {
    /// Create a controller and the receiving end of its tick channel.
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, clock: Clock) -> (Self, TickReceiver) {
        let (ticks, receiver) = tick_channel();
        let controller = Self {
            session: ExamSession::new(clock),
            source,
            ticks,
            ticker: None,
            ticker_generation: 0,
            tick_period: TICK_PERIOD,
        };
        (controller, receiver)
    }

    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    #[must_use]
    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.session.progress()
    }

    #[must_use]
    pub fn score(&self) -> ScoreReport {
        self.session.score()
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Hand out the pending failure notice, once.
    pub fn take_failure(&mut self) -> Option<GenerationFailure> {
        self.session.take_failure()
    }

    /// Move to `generating` and return the single call to make.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` for an invalid scope/count or when a session is
    /// already under way.
    pub fn start(
        &mut self,
        scope: ExamScope,
        count: u32,
    ) -> Result<PendingGeneration, ControllerError> {
        let request = ExamRequest::resolve(scope, count)?;
        let ticket = self.session.start(request)?;
        info!(
            scope = %request.scope(),
            count = request.count(),
            epoch = ticket.epoch(),
            "exam generation started"
        );
        Ok(PendingGeneration {
            ticket,
            source: Arc::clone(&self.source),
        })
    }

    /// Feed a finished generation call back into the session.
    ///
    /// Results for an abandoned attempt come back as `Outcome::Stale`.
    ///
    /// # Errors
    ///
    /// Generation events are accepted in every phase; an error here means the
    /// session rejected the event outright.
    pub fn complete(&mut self, generation: GenerationResult) -> Result<Outcome, ControllerError> {
        let GenerationResult { ticket, result } = generation;
        let event = match result {
            Ok(questions) => SessionEvent::GenerationSucceeded { ticket, questions },
            Err(err) => {
                warn!(error = %err, epoch = ticket.epoch(), "question generation failed");
                SessionEvent::GenerationFailed {
                    ticket,
                    failure: GenerationFailure::new(err.kind(), err.user_message()),
                }
            }
        };

        let outcome = self.apply(event)?;
        match outcome {
            Outcome::Stale => {
                debug!(epoch = ticket.epoch(), "discarded stale generation result");
            }
            Outcome::Ready { received, requested } => {
                if let Some(mismatch) = self.session.count_mismatch() {
                    warn!(
                        requested = mismatch.requested,
                        received = mismatch.received,
                        "generator returned a different number of questions"
                    );
                }
                let exam = self.session.exam_id().map(|id| id.short());
                info!(exam = exam.as_deref(), received, requested, "exam ready");
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `ControllerError` unless a timed exam is waiting for its clock.
    pub fn arm_timer(&mut self) -> Result<Outcome, ControllerError> {
        self.apply(SessionEvent::ArmTimer)
    }

    /// # Errors
    ///
    /// Returns `ControllerError` when the current question cannot take an answer.
    pub fn answer(&mut self, key: OptionKey) -> Result<Outcome, ControllerError> {
        self.apply(SessionEvent::Answer(key))
    }

    /// # Errors
    ///
    /// Returns `ControllerError` when the current question cannot take an answer.
    pub fn skip(&mut self) -> Result<Outcome, ControllerError> {
        self.apply(SessionEvent::Skip)
    }

    /// # Errors
    ///
    /// Returns `ControllerError` unless feedback is showing.
    pub fn continue_(&mut self) -> Result<Outcome, ControllerError> {
        self.apply(SessionEvent::Continue)
    }

    /// # Errors
    ///
    /// Never fails for a restart; the signature matches the other actions.
    pub fn restart(&mut self, confirmed: bool) -> Result<Outcome, ControllerError> {
        let outcome = self.apply(SessionEvent::Restart { confirmed })?;
        if outcome == Outcome::Reset {
            info!("session restarted");
        }
        Ok(outcome)
    }

    /// Apply one tick from the channel. Ticks from a cancelled ticker are ignored.
    pub fn on_tick(&mut self, tick: Tick) -> Outcome {
        let current = self
            .ticker
            .as_ref()
            .is_some_and(|ticker| ticker.generation() == tick.generation());
        if !current {
            return Outcome::Ignored;
        }
        match self.apply(SessionEvent::Tick) {
            Ok(Outcome::TimeUp) => {
                info!("time is up; exam closed");
                Outcome::TimeUp
            }
            Ok(outcome) => outcome,
            Err(_) => Outcome::Ignored,
        }
    }

    fn apply(&mut self, event: SessionEvent) -> Result<Outcome, ControllerError> {
        let name = event.name();
        let outcome = self.session.apply(event).inspect_err(|err| {
            debug!(event = name, phase = %self.session.phase(), error = %err, "event rejected");
        })?;
        if !matches!(outcome, Outcome::Ticked { .. }) {
            debug!(event = name, phase = %self.session.phase(), ?outcome, "event applied");
        }
        self.sync_ticker();
        Ok(outcome)
    }

    /// Run the ticker exactly while the session's countdown is running.
    fn sync_ticker(&mut self) {
        match (self.session.needs_ticks(), self.ticker.is_some()) {
            (true, false) => {
                self.ticker_generation += 1;
                self.ticker = Some(Ticker::spawn(
                    self.ticker_generation,
                    self.tick_period,
                    self.ticks.clone(),
                ));
                debug!(generation = self.ticker_generation, "ticker started");
            }
            (false, true) => {
                if let Some(ticker) = self.ticker.take() {
                    debug!(generation = ticker.generation(), "ticker stopped");
                    ticker.cancel();
                }
            }
            _ => {}
        }
    }
}

impl fmt::Debug for ExamController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamController")
            .field("phase", &self.session.phase())
            .field("epoch", &self.session.epoch())
            .field("ticker", &self.ticker.as_ref().map(Ticker::generation))
            .finish_non_exhaustive()
    }
}
