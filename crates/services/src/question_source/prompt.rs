use std::fmt::Write as _;

use serde_json::{Value, json};

use exam_core::model::{Block, ExamRequest, ExamScope};

/// Persona, syllabus and output rules sent with every generation request.
#[must_use]
pub fn system_instruction() -> String {
    let mut text = String::from(
        "You are an expert examiner for the Spanish civil service IT systems exam (GSI, group A2). \
         Write multiple-choice questions with the rigour of the official selection board.\n\n\
         SYLLABUS:\n",
    );
    for block in Block::ALL {
        let _ = writeln!(text, "- {} ({}): {}.", block.id(), block.name(), block.syllabus());
    }
    text.push_str(
        "\nRULES:\n\
         1. COUNT: return exactly the number of questions requested, no more and no fewer.\n\
         2. ANSWER KEY: spread the correct option evenly across a, b, c and d.\n\
         3. LEVEL: conceptual and applied questions at A2 level.\n\
         4. JUSTIFICATION: always explain why the answer is correct, citing the law, article \
            or standard it comes from.\n\
         5. FORMAT: strict JSON matching the response schema; no prose around it.\n",
    );
    text
}

/// The user turn for one request.
#[must_use]
pub fn user_prompt(request: &ExamRequest) -> String {
    match request.scope() {
        ExamScope::Block(block) => format!(
            "Generate {count} multiple-choice exam questions for {id} ({name}), following the \
             official syllabus strictly.",
            count = request.count(),
            id = block.id(),
            name = block.name(),
        ),
        ExamScope::Mock => {
            let shares = Block::ALL
                .iter()
                .map(|block| format!("{} ~{}%", block.id(), block.mock_share()))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Act as the examining board: generate a complete official mock exam of EXACTLY \
                 {count} questions, keeping the official distribution: {shares}. Do not stop \
                 before all {count} questions are written.",
                count = request.count(),
            )
        }
    }
}

/// Shape the model is asked to produce: an array of question records.
#[must_use]
pub fn response_schema() -> Value {
    let string = json!({ "type": "STRING" });
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": string,
                "block": string,
                "statement": string,
                "options": {
                    "type": "OBJECT",
                    "properties": { "a": string, "b": string, "c": string, "d": string },
                    "required": ["a", "b", "c", "d"]
                },
                "correctOption": { "type": "STRING", "enum": ["a", "b", "c", "d"] },
                "justification": string,
                "difficulty": { "type": "STRING", "enum": ["low", "medium", "high"] }
            },
            "required": [
                "id",
                "block",
                "statement",
                "options",
                "correctOption",
                "justification",
                "difficulty"
            ]
        }
    })
}
