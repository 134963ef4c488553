use dioxus::prelude::*;

use exam_core::model::{Block, ExamScope, MOCK_QUESTION_COUNT, QUESTION_COUNT_CHOICES};

use crate::views::ViewError;

#[component]
pub fn SetupPanel(
    scope: ExamScope,
    count: u32,
    generator_enabled: bool,
    notice: Option<String>,
    error: Option<ViewError>,
    on_scope: Callback<ExamScope>,
    on_count: Callback<u32>,
    on_start: Callback<()>,
    on_dismiss_notice: Callback<()>,
) -> Element {
    let scope_id = scope.id();
    let count_value = count.to_string();

    rsx! {
        section { class: "exam-setup",
            h2 { "Set up your exam" }

            if let Some(message) = notice {
                div { class: "banner banner-error", role: "alert",
                    p { "{message}" }
                    button {
                        id: "notice-dismiss",
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_dismiss_notice.call(()),
                        "Dismiss"
                    }
                }
            }
            if !generator_enabled {
                div { class: "banner banner-warning",
                    "No API key configured. Set EXAM_AI_API_KEY before starting an exam."
                }
            }

            label { class: "field",
                span { "Scope" }
                select {
                    id: "exam-scope",
                    value: "{scope_id}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(scope) = evt.value().parse::<ExamScope>() {
                            on_scope.call(scope);
                        }
                    },
                    for candidate in ExamScope::all() {
                        option {
                            key: "{candidate.id()}",
                            value: "{candidate.id()}",
                            selected: candidate == scope,
                            "{candidate.name()}"
                        }
                    }
                }
            }

            if scope.is_mock() {
                div { class: "exam-mock-rules",
                    h3 { "Mock exam rules" }
                    ul {
                        li { "{MOCK_QUESTION_COUNT} questions drawn across the four blocks:" }
                        for block in Block::ALL {
                            li { key: "{block.id()}", class: "exam-mock-share",
                                "{block.name()}: about {block.mock_share()}%"
                            }
                        }
                        li { "90 minutes. The clock starts when you press Start the clock." }
                        li { "Each wrong answer subtracts a third of a correct one. Skips cost nothing." }
                        li { "Pass mark: 50 out of 100." }
                    }
                }
            } else {
                label { class: "field",
                    span { "Questions" }
                    select {
                        id: "exam-count",
                        value: "{count_value}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(count) = evt.value().parse::<u32>() {
                                on_count.call(count);
                            }
                        },
                        for choice in QUESTION_COUNT_CHOICES {
                            option {
                                key: "{choice}",
                                value: "{choice}",
                                selected: choice == count,
                                "{choice}"
                            }
                        }
                    }
                }
            }

            if let Some(err) = error {
                p { class: "field-error", "{err.message()}" }
            }

            button {
                id: "exam-start",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                if scope.is_mock() { "Start mock exam" } else { "Generate questions" }
            }
        }
    }
}
