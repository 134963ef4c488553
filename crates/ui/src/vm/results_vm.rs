use exam_core::scoring::{PASS_THRESHOLD, Verdict};
use exam_core::session::{ExamSession, FinishReason, Phase};

use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: String,
    pub raw_score: String,
    pub normalized_score: String,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
    pub total: usize,
    pub passed: bool,
    pub verdict: String,
    pub time_up: bool,
    pub elapsed: Option<String>,
    /// Short exam reference printed with the report.
    pub reference: Option<String>,
}

/// Map a finished session to its report; `None` before the exam ends.
#[must_use]
pub fn map_results(session: &ExamSession) -> Option<ResultsVm> {
    if session.phase() != Phase::Finished {
        return None;
    }
    let report = session.score();
    let passed = report.verdict() == Verdict::Pass;
    let verdict = if passed {
        "Pass: at or above the cut-off".to_string()
    } else {
        format!("Below the cut-off of {PASS_THRESHOLD:.0} / 100")
    };
    let title = session
        .request()
        .map_or_else(|| "Results".to_string(), |r| format!("Results: {}", r.scope().name()));

    Some(ResultsVm {
        title,
        raw_score: format!("{:.2}", report.raw_score()),
        normalized_score: format!("{:.2}", report.normalized_or_zero()),
        correct: report.correct(),
        incorrect: report.incorrect(),
        skipped: report.skipped(),
        total: report.total(),
        passed,
        verdict,
        time_up: session.finish_reason() == Some(FinishReason::TimeUp),
        elapsed: format_elapsed(session.started_at(), session.finished_at()),
        reference: session.exam_id().map(|id| id.short()),
    })
}
