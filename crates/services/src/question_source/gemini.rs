use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use exam_core::model::{ExamRequest, Question, decode_questions};

use crate::config::GeminiConfig;
use crate::error::GenerationError;
use crate::question_source::QuestionSource;
use crate::question_source::prompt::{response_schema, system_instruction, user_prompt};

/// Question source backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiQuestionSource {
    client: Client,
    config: Option<GeminiConfig>,
}

impl GeminiQuestionSource {
    #[must_use]
    pub fn new(config: Option<GeminiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn request_text(
        &self,
        config: &GeminiConfig,
        request: &ExamRequest,
    ) -> Result<String, GenerationError> {
        let system = system_instruction();
        let prompt = user_prompt(request);
        let payload = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                max_output_tokens: config.max_output_tokens(),
            },
        };

        let response = self
            .client
            .post(config.endpoint())
            .header("x-goog-api-key", config.api_key())
            .timeout(config.timeout())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        body.into_text()
    }
}

#[async_trait]
impl QuestionSource for GeminiQuestionSource {
    async fn generate(&self, request: &ExamRequest) -> Result<Vec<Question>, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        info!(
            scope = %request.scope(),
            count = request.count(),
            model = config.model(),
            "requesting questions"
        );
        let text = self.request_text(config, request).await?;
        debug!(bytes = text.len(), "generator response received");

        let questions = decode_questions(&text)?;
        info!(received = questions.len(), "questions decoded");
        Ok(questions)
    }
}

//
// ─── WIRE TYPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Finish reasons that mean the model withheld its output.
const REFUSAL_REASONS: [&str; 4] = ["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT"];

impl GenerateResponse {
    /// Text of the first candidate, thought parts excluded.
    fn into_text(self) -> Result<String, GenerationError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => GenerationError::Blocked(reason),
                None => GenerationError::EmptyResponse,
            });
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if !text.trim().is_empty() {
            return Ok(text);
        }
        match candidate.finish_reason {
            Some(reason) if REFUSAL_REASONS.contains(&reason.as_str()) => {
                Err(GenerationError::Blocked(reason))
            }
            _ => Err(GenerationError::EmptyResponse),
        }
    }
}
