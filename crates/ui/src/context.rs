use std::sync::Arc;

use services::{Clock, QuestionSource};

pub trait UiApp: Send + Sync {
    fn question_source(&self) -> Arc<dyn QuestionSource>;
    fn clock(&self) -> Clock;

    /// Whether a generator is configured. Shown as a hint on the setup screen.
    fn generator_enabled(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    question_source: Arc<dyn QuestionSource>,
    clock: Clock,
    generator_enabled: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_source: app.question_source(),
            clock: app.clock(),
            generator_enabled: app.generator_enabled(),
        }
    }

    #[must_use]
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.question_source)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn generator_enabled(&self) -> bool {
        self.generator_enabled
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
