use dioxus::prelude::*;

use crate::vm::ResultsVm;

#[component]
pub fn ResultsPanel(vm: ResultsVm, on_restart: Callback<()>, on_export: Callback<()>) -> Element {
    let verdict_class = if vm.passed {
        "exam-verdict exam-verdict--pass"
    } else {
        "exam-verdict exam-verdict--fail"
    };

    rsx! {
        section { class: "exam-results", id: "exam-results",
            h2 { "{vm.title}" }
            if vm.time_up {
                div { class: "banner banner-warning", "Time is up. Unanswered questions count as skipped." }
            }
            div { class: "exam-score",
                div { class: "exam-score-main",
                    span { class: "exam-score-value", "{vm.normalized_score}" }
                    span { class: "exam-score-scale", " / 100" }
                }
                p { class: "exam-score-raw", "Raw score: {vm.raw_score}" }
            }
            p { class: verdict_class, "{vm.verdict}" }
            dl { class: "exam-counts",
                dt { "Correct" }
                dd { "{vm.correct}" }
                dt { "Incorrect" }
                dd { "{vm.incorrect}" }
                dt { "Skipped" }
                dd { "{vm.skipped}" }
                dt { "Questions" }
                dd { "{vm.total}" }
                if let Some(elapsed) = vm.elapsed.clone() {
                    dt { "Time used" }
                    dd { "{elapsed}" }
                }
                if let Some(reference) = vm.reference.clone() {
                    dt { "Exam ref." }
                    dd { class: "exam-ref", "{reference}" }
                }
            }
            p { class: "muted", "Scoring: correct answers minus a third of the wrong ones, scaled to 100." }
            div { class: "exam-results-actions no-print",
                button {
                    id: "results-export",
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_export.call(()),
                    "Print / save as PDF"
                }
                button {
                    id: "results-restart",
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "New exam"
                }
            }
        }
    }
}
