mod exam_vm;
mod results_vm;
mod time_fmt;

pub use exam_vm::{
    FeedbackVm, OptionState, OptionVm, QuestionVm, TimerVm, difficulty_label, map_question,
};
pub use results_vm::{ResultsVm, map_results};
pub use time_fmt::{WARNING_THRESHOLD_SECS, format_countdown, format_elapsed, is_warning};
