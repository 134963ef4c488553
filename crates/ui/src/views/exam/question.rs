use dioxus::prelude::*;

use exam_core::model::OptionKey;

use crate::vm::QuestionVm;

#[component]
pub fn QuestionPanel(
    vm: QuestionVm,
    on_arm: Callback<()>,
    on_answer: Callback<OptionKey>,
    on_skip: Callback<()>,
    on_continue: Callback<()>,
    on_restart: Callback<()>,
) -> Element {
    let position = vm.position;
    let total = vm.total;
    let percent = vm.percent;
    let progress_style = format!("width: {percent}%");
    let locked = vm.locked;

    rsx! {
        section { class: "exam-question", id: "exam-root",
            div { class: "exam-toolbar",
                span { class: "exam-progress-label", "Question {position} / {total}" }
                span { class: "exam-progress-percent", "{percent}%" }
                if let Some(timer) = vm.timer.clone() {
                    span {
                        id: "exam-timer",
                        class: if timer.warning { "exam-timer exam-timer--warning" } else { "exam-timer" },
                        "{timer.text}"
                    }
                }
                button {
                    id: "exam-restart",
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Start over"
                }
            }
            div { class: "exam-progress-track",
                div { class: "exam-progress-fill", style: "{progress_style}" }
            }

            if vm.awaiting_clock {
                div { class: "exam-clock-gate",
                    p { "The 90-minute countdown starts when you are ready. Answers are locked until then." }
                    button {
                        id: "exam-arm",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_arm.call(()),
                        "Start the clock"
                    }
                }
            }

            div { class: "exam-badges",
                span { class: "badge badge-block", "{vm.block}" }
                span { class: "badge badge-difficulty", "{vm.difficulty}" }
            }
            h2 { class: "exam-statement", "{vm.statement}" }

            ul { class: "exam-options",
                for option in vm.options.clone() {
                    li { key: "{option.key}",
                        button {
                            class: option.state.class(),
                            r#type: "button",
                            disabled: locked,
                            onclick: move |_| on_answer.call(option.key),
                            span { class: "exam-option-label", "{option.label}" }
                            span { class: "exam-option-text", "{option.text}" }
                        }
                    }
                }
            }

            if let Some(feedback) = vm.feedback.clone() {
                div { class: "exam-feedback", role: "status",
                    if feedback.skipped {
                        h3 { "Skipped" }
                    } else {
                        h3 { "Not quite" }
                    }
                    p { class: "exam-feedback-answer",
                        "Correct answer: {feedback.correct_label}) {feedback.correct_text}"
                    }
                    p { class: "exam-feedback-justification", "{feedback.justification}" }
                    button {
                        id: "exam-continue",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_continue.call(()),
                        "{feedback.continue_label}"
                    }
                }
            } else {
                button {
                    id: "exam-skip",
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: locked,
                    onclick: move |_| on_skip.call(()),
                    "Skip question"
                }
            }
        }
    }
}
