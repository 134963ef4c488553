use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clock, ConfigError, GeminiConfig, GeminiConfigDraft, GeminiQuestionSource, QuestionSource,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, prelude::*};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} cannot be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

struct DesktopApp {
    question_source: Arc<dyn QuestionSource>,
    generator_enabled: bool,
}

impl UiApp for DesktopApp {
    fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.question_source)
    }

    fn clock(&self) -> Clock {
        Clock::system()
    }

    fn generator_enabled(&self) -> bool {
        self.generator_enabled
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--model <name>] [--base-url <url>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --model gemini-3-pro-preview");
    eprintln!("  --base-url https://generativelanguage.googleapis.com/v1beta");
    eprintln!("  --timeout-secs 300");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_AI_API_KEY (or GEMINI_API_KEY, API_KEY), EXAM_AI_MODEL,");
    eprintln!("  EXAM_AI_BASE_URL, EXAM_AI_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<String>,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => parsed.model = Some(require_value(args, "--model")?),
                "--base-url" => parsed.base_url = Some(require_value(args, "--base-url")?),
                "--timeout-secs" => {
                    parsed.timeout_secs = Some(require_value(args, "--timeout-secs")?);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    /// Command-line values win over the environment.
    fn apply_to(self, mut draft: GeminiConfigDraft) -> GeminiConfigDraft {
        if self.model.is_some() {
            draft.model = self.model;
        }
        if self.base_url.is_some() {
            draft.base_url = self.base_url;
        }
        if self.timeout_secs.is_some() {
            draft.timeout_secs = self.timeout_secs;
        }
        draft
    }
}

/// A missing key is not fatal: the app starts and explains itself on the setup screen.
fn resolve_config(draft: GeminiConfigDraft) -> Result<Option<GeminiConfig>, ConfigError> {
    match draft.validate() {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::MissingApiKey) => Ok(None),
        Err(err) => Err(err),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(log_fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let config = resolve_config(args.apply_to(GeminiConfigDraft::from_env()))?;
    match &config {
        Some(config) => info!(
            model = config.model(),
            base_url = %config.base_url(),
            "question generator configured"
        ),
        None => warn!("no API key found; exam generation is disabled"),
    }

    let generator_enabled = config.is_some();
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        question_source: Arc::new(GeminiQuestionSource::new(config)),
        generator_enabled,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("GSI Exam Trainer")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
