use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::ExamView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ExamView)] Exam {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "GSI Exam Trainer" }
                span { class: "app-header-subtitle", "Civil service IT systems, group A2" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
