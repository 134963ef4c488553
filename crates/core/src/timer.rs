use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("countdown is already armed")]
    AlreadyArmed,
    #[error("countdown has expired")]
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Waiting for the user to start the clock.
    Inert,
    Running,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Ignored,
    Running(u32),
    /// Reached zero on this tick. Reported once.
    Expired,
}

/// Exam countdown in whole seconds. Driven by an external once-per-second tick.
///
/// No pause: once armed it runs until zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            remaining: duration_secs,
            state: CountdownState::Inert,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state != CountdownState::Inert
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// # Errors
    ///
    /// Returns `TimerError` unless the countdown is still inert.
    pub fn arm(&mut self) -> Result<(), TimerError> {
        match self.state {
            CountdownState::Inert if self.remaining == 0 => {
                self.state = CountdownState::Expired;
                Err(TimerError::Expired)
            }
            CountdownState::Inert => {
                self.state = CountdownState::Running;
                Ok(())
            }
            CountdownState::Running => Err(TimerError::AlreadyArmed),
            CountdownState::Expired => Err(TimerError::Expired),
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            return TickOutcome::Expired;
        }
        TickOutcome::Running(self.remaining)
    }
}
