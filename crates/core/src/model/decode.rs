use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionError, RawQuestion};

/// Why a generator response could not be turned into questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("response is not a JSON array of questions: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains no questions")]
    Empty,

    #[error("question #{index} is malformed: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question id `{0}` appears more than once")]
    DuplicateId(QuestionId),
}

/// Decode a generator response into a validated, ordered question list.
///
/// The whole response is accepted or rejected; no record is skipped or repaired.
/// A surrounding Markdown code fence is the only tolerated decoration.
///
/// # Errors
///
/// Returns `DecodeError` for invalid JSON, an empty array, any malformed record,
/// or duplicated ids.
pub fn decode_questions(body: &str) -> Result<Vec<Question>, DecodeError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(strip_code_fence(body))?;
    if raw.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut questions = Vec::with_capacity(raw.len());
    for (index, record) in raw.into_iter().enumerate() {
        let question =
            Question::try_from(record).map_err(|source| DecodeError::Question { index, source })?;
        if !seen.insert(question.id().clone()) {
            return Err(DecodeError::DuplicateId(question.id().clone()));
        }
        questions.push(question);
    }

    Ok(questions)
}

fn strip_code_fence(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) up to the first line break.
    let rest = match rest.split_once('\n') {
        Some((info, content)) if !info.trim_start().starts_with('[') => content,
        _ => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
