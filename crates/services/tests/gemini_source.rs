use exam_core::model::{Block, ExamRequest, ExamScope, OptionKey};
use serde_json::{Value, json};
use services::{GeminiConfigDraft, GeminiQuestionSource, GenerationError, QuestionSource};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "test-model";
const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

fn source_for(server: &MockServer) -> GeminiQuestionSource {
    let config = GeminiConfigDraft {
        api_key: Some("test-key".into()),
        model: Some(MODEL.into()),
        base_url: Some(format!("{}/v1beta", server.uri())),
        ..GeminiConfigDraft::default()
    }
    .validate()
    .unwrap();
    GeminiQuestionSource::new(Some(config))
}

fn record(id: &str, correct: &str) -> Value {
    json!({
        "id": id,
        "block": "Bloque II",
        "statement": format!("Statement {id}"),
        "options": { "a": "one", "b": "two", "c": "three", "d": "four" },
        "correctOption": correct,
        "justification": "Per ISO/IEC 7498-1.",
        "difficulty": "media"
    })
}

fn envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn block_request(count: u32) -> ExamRequest {
    ExamRequest::resolve(ExamScope::Block(Block::BasicTechnology), count).unwrap()
}

#[tokio::test]
async fn decodes_questions_from_a_gemini_response() {
    let server = MockServer::start().await;
    let text = json!([record("q1", "a"), record("q2", "d")]).to_string();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user" }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "maxOutputTokens": 30000
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&text)))
        .expect(1)
        .mount(&server)
        .await;

    let questions = source_for(&server)
        .generate(&block_request(2))
        .await
        .unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].id().as_str(), "q1");
    assert_eq!(questions[1].correct_option(), OptionKey::D);
}

#[tokio::test]
async fn fenced_json_is_accepted() {
    let server = MockServer::start().await;
    let text = format!("```json\n{}\n```", json!([record("only", "b")]));

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&text)))
        .mount(&server)
        .await;

    let questions = source_for(&server)
        .generate(&block_request(1))
        .await
        .unwrap();
    assert_eq!(questions.len(), 1);
}

#[tokio::test]
async fn error_status_is_a_generation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = source_for(&server)
        .generate(&block_request(10))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::HttpStatus(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn malformed_record_is_a_schema_violation() {
    let server = MockServer::start().await;
    let mut broken = record("q1", "a");
    broken["correctOption"] = json!("e");
    let text = json!([broken]).to_string();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&text)))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .generate(&block_request(1))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Decode(_)));
    assert_eq!(err.kind(), exam_core::session::FailureKind::SchemaViolation);
}

#[tokio::test]
async fn refused_prompt_is_reported_as_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .generate(&block_request(10))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Blocked(reason) if reason == "SAFETY"));
}

#[tokio::test]
async fn mock_request_asks_for_the_full_exam() {
    let server = MockServer::start().await;
    let text = json!([record("m1", "c")]).to_string();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&text)))
        .expect(1)
        .mount(&server)
        .await;

    let request = ExamRequest::resolve(ExamScope::Mock, 10).unwrap();
    source_for(&server).generate(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("EXACTLY 100"));
    assert!(
        body["system_instruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("BL4")
    );
}
