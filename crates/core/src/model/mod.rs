mod answer;
mod decode;
mod ids;
mod question;
mod scope;

pub use answer::{Answer, AnswerError, AnswerSheet};
pub use decode::{DecodeError, decode_questions};
pub use ids::{ExamId, QuestionId};
pub use question::{Difficulty, OptionKey, Question, QuestionError, QuestionOptions};
pub use scope::{
    Block, DEFAULT_QUESTION_COUNT, ExamRequest, ExamScope, MAX_QUESTION_COUNT,
    MOCK_DURATION_SECS, MOCK_QUESTION_COUNT, QUESTION_COUNT_CHOICES, ScopeError,
};
