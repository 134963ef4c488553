use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{ExamRequest, Question};
use exam_core::time::fixed_now;
use services::{Clock, GenerationError, QuestionSource};

use crate::context::{UiApp, build_app_context};
use crate::views::ExamView;

/// Never produces questions; views under test do not get past setup.
struct IdleSource;

#[async_trait]
impl QuestionSource for IdleSource {
    async fn generate(&self, _request: &ExamRequest) -> Result<Vec<Question>, GenerationError> {
        Err(GenerationError::Disabled)
    }
}

#[derive(Clone)]
struct TestApp {
    generator_enabled: bool,
}

impl UiApp for TestApp {
    fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::new(IdleSource)
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn generator_enabled(&self) -> bool {
        self.generator_enabled
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { ExamView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_exam_harness(generator_enabled: bool) -> ViewHarness {
    let app = Arc::new(TestApp { generator_enabled });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app });
    ViewHarness { dom }
}

/// Render a stand-alone component tree, for panels that need no app context.
pub fn render_fixture(fixture: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(fixture);
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}
