use services::ControllerError;
use exam_core::session::SessionError;

/// What the view layer can tell the user about a rejected action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidSelection,
    ClockNotStarted,
    Busy,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::InvalidSelection => "Pick a block and a number of questions.",
            ViewError::ClockNotStarted => "Start the clock to begin answering.",
            ViewError::Busy => "An exam is already being prepared.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&ControllerError> for ViewError {
    fn from(err: &ControllerError) -> Self {
        match err {
            ControllerError::Scope(_) => ViewError::InvalidSelection,
            ControllerError::Session(SessionError::TimerNotArmed) => ViewError::ClockNotStarted,
            ControllerError::Session(SessionError::GenerationPending) => ViewError::Busy,
            _ => ViewError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use exam_core::model::ScopeError;

    use super::*;

    #[test]
    fn controller_errors_map_to_user_messages() {
        let err = ControllerError::Scope(ScopeError::InvalidCount { count: 0, max: 100 });
        assert_eq!(ViewError::from(&err), ViewError::InvalidSelection);
        let err = ControllerError::Session(SessionError::TimerNotArmed);
        assert_eq!(ViewError::from(&err).message(), "Start the clock to begin answering.");
        let err = ControllerError::Session(SessionError::NotTimed);
        assert_eq!(ViewError::from(&err), ViewError::Unknown);
    }
}
