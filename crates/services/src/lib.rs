#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod question_source;
pub mod ticker;

pub use exam_core::Clock;

pub use config::{GeminiConfig, GeminiConfigDraft};
pub use controller::{ExamController, GenerationResult, PendingGeneration};
pub use error::{ConfigError, ControllerError, GenerationError};
pub use question_source::{GeminiQuestionSource, QuestionSource};
pub use ticker::{Tick, TickReceiver, TickSender, Ticker, tick_channel};
