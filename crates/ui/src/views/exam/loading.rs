use dioxus::prelude::*;

#[component]
pub fn LoadingPanel(scope_name: String, count: u32, on_restart: Callback<()>) -> Element {
    rsx! {
        section { class: "exam-loading",
            div { class: "spinner" }
            h2 { "Writing your exam" }
            p { "{count} questions for {scope_name}." }
            p { class: "muted", "Large exams can take a couple of minutes." }
            button {
                id: "exam-restart",
                class: "btn btn-link",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Start over"
            }
        }
    }
}
