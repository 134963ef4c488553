use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a single question record is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("missing or blank field `{0}`")]
    MissingField(&'static str),

    #[error("missing or blank option `{0}`")]
    MissingOption(OptionKey),

    #[error("correct option `{0}` is not one of a, b, c, d")]
    InvalidCorrectOption(String),

    #[error("unknown difficulty `{0}`")]
    InvalidDifficulty(String),
}

//
// ─── OPTION KEY ───────────────────────────────────────────────────────────────
//

/// One of the four fixed answer keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "a",
            OptionKey::B => "b",
            OptionKey::C => "c",
            OptionKey::D => "d",
        }
    }

    /// Upper-case label used on option buttons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }

    fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(OptionKey::A),
            "b" => Ok(OptionKey::B),
            "c" => Ok(OptionKey::C),
            "d" => Ok(OptionKey::D),
            _ => Err(QuestionError::InvalidCorrectOption(s.trim().to_string())),
        }
    }
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Three-level difficulty declared by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    /// Accepts the English wire values and the Spanish ones used by the exam material.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" => Ok(Difficulty::Low),
            "medium" | "media" => Ok(Difficulty::Medium),
            "high" | "alta" => Ok(Difficulty::High),
            _ => Err(QuestionError::InvalidDifficulty(s.trim().to_string())),
        }
    }
}

//
// ─── OPTIONS ──────────────────────────────────────────────────────────────────
//

/// Exactly four non-blank option texts, addressed by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOptions([String; 4]);

impl QuestionOptions {
    /// # Errors
    ///
    /// Returns `QuestionError::MissingOption` for the first blank text.
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let texts = [a.into(), b.into(), c.into(), d.into()].map(|t| t.trim().to_string());
        for key in OptionKey::ALL {
            if texts[key.index()].is_empty() {
                return Err(QuestionError::MissingOption(key));
            }
        }
        Ok(Self(texts))
    }

    #[must_use]
    pub fn text(&self, key: OptionKey) -> &str {
        &self.0[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL
            .into_iter()
            .map(move |key| (key, self.text(key)))
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    block: String,
    statement: String,
    options: QuestionOptions,
    correct_option: OptionKey,
    justification: String,
    difficulty: Difficulty,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::MissingField` when the id, block or statement is blank.
    pub fn new(
        id: QuestionId,
        block: impl Into<String>,
        statement: impl Into<String>,
        options: QuestionOptions,
        correct_option: OptionKey,
        justification: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let block = block.into().trim().to_string();
        let statement = statement.into().trim().to_string();
        let justification = justification.into().trim().to_string();

        if id.is_blank() {
            return Err(QuestionError::MissingField("id"));
        }
        if block.is_empty() {
            return Err(QuestionError::MissingField("block"));
        }
        if statement.is_empty() {
            return Err(QuestionError::MissingField("statement"));
        }

        Ok(Self {
            id,
            block,
            statement,
            options,
            correct_option,
            justification,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn block(&self) -> &str {
        &self.block
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> OptionKey {
        self.correct_option
    }

    #[must_use]
    pub fn justification(&self) -> &str {
        &self.justification
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.correct_option == key
    }
}

//
// ─── WIRE RECORD ──────────────────────────────────────────────────────────────
//

/// Question record as declared in the response schema. Every field is optional
/// here so validation can name what is missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawQuestion {
    id: Option<QuestionId>,
    block: Option<String>,
    statement: Option<String>,
    options: Option<RawOptions>,
    correct_option: Option<String>,
    justification: Option<String>,
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOptions {
    a: Option<String>,
    b: Option<String>,
    c: Option<String>,
    d: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(QuestionError::MissingField("id"))?;
        let options = raw.options.ok_or(QuestionError::MissingField("options"))?;
        let options = QuestionOptions::new(
            options.a.ok_or(QuestionError::MissingOption(OptionKey::A))?,
            options.b.ok_or(QuestionError::MissingOption(OptionKey::B))?,
            options.c.ok_or(QuestionError::MissingOption(OptionKey::C))?,
            options.d.ok_or(QuestionError::MissingOption(OptionKey::D))?,
        )?;
        let correct_option: OptionKey = raw
            .correct_option
            .ok_or(QuestionError::MissingField("correctOption"))?
            .parse()?;
        let difficulty: Difficulty = raw
            .difficulty
            .ok_or(QuestionError::MissingField("difficulty"))?
            .parse()?;
        let justification = raw
            .justification
            .filter(|text| !text.trim().is_empty())
            .ok_or(QuestionError::MissingField("justification"))?;

        Question::new(
            id,
            raw.block.unwrap_or_default(),
            raw.statement.unwrap_or_default(),
            options,
            correct_option,
            justification,
            difficulty,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawQuestion {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn option_key_parses_case_insensitively() {
        assert_eq!(" B ".parse::<OptionKey>().unwrap(), OptionKey::B);
        assert_eq!("d".parse::<OptionKey>().unwrap(), OptionKey::D);
        let err = "e".parse::<OptionKey>().unwrap_err();
        assert_eq!(err, QuestionError::InvalidCorrectOption("e".into()));
    }

    #[test]
    fn difficulty_accepts_spanish_aliases() {
        assert_eq!("Alta".parse::<Difficulty>().unwrap(), Difficulty::High);
        assert_eq!("media".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("low".parse::<Difficulty>().unwrap(), Difficulty::Low);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn options_reject_blank_text() {
        let err = QuestionOptions::new("one", "  ", "three", "four").unwrap_err();
        assert_eq!(err, QuestionError::MissingOption(OptionKey::B));
    }

    #[test]
    fn options_iterate_in_key_order() {
        let options = QuestionOptions::new("w", "x", "y", "z").unwrap();
        let keys: Vec<_> = options.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, OptionKey::ALL.to_vec());
        assert_eq!(options.text(OptionKey::C), "y");
    }

    #[test]
    fn raw_record_converts_into_question() {
        let question = Question::try_from(raw(
            r#"{
                "id": 3,
                "block": "Bloque II",
                "statement": "Which layer routes packets?",
                "options": {"a": "Link", "b": "Network", "c": "Transport", "d": "Session"},
                "correctOption": "b",
                "justification": "OSI layer 3 handles routing.",
                "difficulty": "media"
            }"#,
        ))
        .unwrap();

        assert_eq!(question.id().as_str(), "3");
        assert_eq!(question.correct_option(), OptionKey::B);
        assert!(question.is_correct(OptionKey::B));
        assert!(!question.is_correct(OptionKey::A));
        assert_eq!(question.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn raw_record_missing_option_is_rejected() {
        let err = Question::try_from(raw(
            r#"{
                "id": "q1",
                "block": "Bloque I",
                "statement": "Q",
                "options": {"a": "1", "b": "2", "c": "3"},
                "correctOption": "a",
                "justification": "J",
                "difficulty": "baja"
            }"#,
        ))
        .unwrap_err();
        assert_eq!(err, QuestionError::MissingOption(OptionKey::D));
    }

    #[test]
    fn raw_record_with_unknown_correct_option_is_rejected() {
        let err = Question::try_from(raw(
            r#"{
                "id": "q1",
                "block": "Bloque I",
                "statement": "Q",
                "options": {"a": "1", "b": "2", "c": "3", "d": "4"},
                "correctOption": "e",
                "justification": "J",
                "difficulty": "baja"
            }"#,
        ))
        .unwrap_err();
        assert_eq!(err, QuestionError::InvalidCorrectOption("e".into()));
    }

    #[test]
    fn raw_record_with_blank_statement_is_rejected() {
        let err = Question::try_from(raw(
            r#"{
                "id": "q1",
                "block": "Bloque I",
                "statement": "   ",
                "options": {"a": "1", "b": "2", "c": "3", "d": "4"},
                "correctOption": "a",
                "justification": "J",
                "difficulty": "alta"
            }"#,
        ))
        .unwrap_err();
        assert_eq!(err, QuestionError::MissingField("statement"));
    }
}
