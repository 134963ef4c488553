use dioxus::prelude::*;

#[component]
pub fn RestartModal(on_cancel: Callback<()>, on_confirm: Callback<()>) -> Element {
    rsx! {
        div {
            class: "exam-modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "exam-modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "exam-modal-title", "Abandon this exam?" }
                p { class: "exam-modal-body",
                    "Your answers and the remaining time will be lost."
                }
                div { class: "exam-modal-actions",
                    button {
                        id: "restart-cancel",
                        class: "btn exam-modal-cancel",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Keep going"
                    }
                    button {
                        id: "restart-confirm",
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Start over"
                    }
                }
            }
        }
    }
}
