mod gemini;
mod prompt;

use async_trait::async_trait;

use exam_core::model::{ExamRequest, Question};

use crate::error::GenerationError;

pub use gemini::GeminiQuestionSource;
pub use prompt::{response_schema, system_instruction, user_prompt};

/// Produces the questions for one exam. One call per generation attempt; no retries.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `GenerationError` when the questions cannot be obtained or decoded.
    async fn generate(&self, request: &ExamRequest) -> Result<Vec<Question>, GenerationError>;
}
