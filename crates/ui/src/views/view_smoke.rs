use dioxus::prelude::*;
use exam_core::model::{
    Block, Difficulty, ExamRequest, ExamScope, OptionKey, Question, QuestionId, QuestionOptions,
};
use exam_core::session::{ExamSession, Outcome, SessionEvent};
use exam_core::time::fixed_clock;

use super::exam::{QuestionPanel, ResultsPanel};
use super::test_harness::{render_fixture, setup_exam_harness};
use crate::vm::{map_question, map_results};

fn loaded_session(scope: ExamScope, count: usize) -> ExamSession {
    let mut session = ExamSession::new(fixed_clock());
    let request = ExamRequest::resolve(scope, count as u32).unwrap();
    let Outcome::GenerationRequested(ticket) =
        session.apply(SessionEvent::Start(request)).unwrap()
    else {
        panic!("expected a ticket");
    };
    let questions = (0..count)
        .map(|i| {
            Question::new(
                QuestionId::new(format!("q{i}")),
                "Bloque I",
                "Which article of the Constitution recognises the right to data protection?",
                QuestionOptions::new("Article 18.4", "Article 20", "Article 24", "Article 105")
                    .unwrap(),
                OptionKey::A,
                "Article 18.4 CE limits the use of information technology.",
                Difficulty::Medium,
            )
            .unwrap()
        })
        .collect();
    session
        .apply(SessionEvent::GenerationSucceeded { ticket, questions })
        .unwrap();
    session
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_renders_mock_rules() {
    let mut harness = setup_exam_harness(true);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Set up your exam"), "missing title in {html}");
    assert!(html.contains("Mock exam rules"), "missing mock rules in {html}");
    assert!(html.contains("about 15%"), "missing distribution in {html}");
    assert!(html.contains("Start mock exam"), "missing start button in {html}");
    assert!(!html.contains("No API key configured"), "unexpected key hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_warns_without_a_generator() {
    let mut harness = setup_exam_harness(false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No API key configured"), "missing key hint in {html}");
}

fn feedback_fixture() -> Element {
    let mut session = loaded_session(ExamScope::Block(Block::StateOrganisation), 2);
    session.apply(SessionEvent::Answer(OptionKey::C)).unwrap();
    let vm = map_question(&session).unwrap();
    rsx! {
        QuestionPanel {
            vm,
            on_arm: |_| {},
            on_answer: |_| {},
            on_skip: |_| {},
            on_continue: |_| {},
            on_restart: |_| {},
        }
    }
}

#[test]
fn question_panel_smoke_renders_feedback() {
    let html = render_fixture(feedback_fixture);
    assert!(html.contains("Question 1 / 2"), "missing progress in {html}");
    assert!(html.contains("exam-option--wrong"), "missing wrong marker in {html}");
    assert!(html.contains("exam-option--correct"), "missing correct marker in {html}");
    assert!(html.contains("Article 18.4 CE limits"), "missing justification in {html}");
    assert!(html.contains("Next question"), "missing continue in {html}");
    assert!(!html.contains("exam-timer"), "block exam should have no timer: {html}");
}

fn mock_gate_fixture() -> Element {
    let session = loaded_session(ExamScope::Mock, 100);
    let vm = map_question(&session).unwrap();
    rsx! {
        QuestionPanel {
            vm,
            on_arm: |_| {},
            on_answer: |_| {},
            on_skip: |_| {},
            on_continue: |_| {},
            on_restart: |_| {},
        }
    }
}

#[test]
fn question_panel_smoke_gates_the_mock_clock() {
    let html = render_fixture(mock_gate_fixture);
    assert!(html.contains("Start the clock"), "missing clock gate in {html}");
    assert!(html.contains("90:00"), "missing countdown in {html}");
    assert!(html.contains("disabled"), "options should be locked in {html}");
}

fn results_fixture() -> Element {
    let mut session = loaded_session(ExamScope::Block(Block::StateOrganisation), 3);
    session.apply(SessionEvent::Answer(OptionKey::A)).unwrap();
    session.apply(SessionEvent::Answer(OptionKey::B)).unwrap();
    session.apply(SessionEvent::Continue).unwrap();
    session.apply(SessionEvent::Skip).unwrap();
    session.apply(SessionEvent::Continue).unwrap();
    let vm = map_results(&session).unwrap();
    rsx! {
        ResultsPanel { vm, on_restart: |_| {}, on_export: |_| {} }
    }
}

#[test]
fn results_panel_smoke_renders_scores() {
    let html = render_fixture(results_fixture);
    assert!(html.contains("22.22"), "missing normalised score in {html}");
    assert!(html.contains("Raw score: 0.67"), "missing raw score in {html}");
    assert!(html.contains("Below the cut-off"), "missing verdict in {html}");
    assert!(html.contains("Print / save as PDF"), "missing export in {html}");
    assert!(html.contains("Exam ref."), "missing exam reference in {html}");
}
