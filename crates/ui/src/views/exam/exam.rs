use std::cell::RefCell;
use std::rc::Rc;

use dioxus::document::eval;
use dioxus::prelude::*;

use exam_core::model::{DEFAULT_QUESTION_COUNT, ExamScope, MOCK_QUESTION_COUNT, OptionKey};
use exam_core::session::{Outcome, Phase};
use services::{ControllerError, ExamController, TickReceiver};

use super::loading::LoadingPanel;
use super::modals::RestartModal;
use super::question::QuestionPanel;
use super::results::ResultsPanel;
use super::scripts::print_results_script;
use super::setup::SetupPanel;
use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{map_question, map_results};

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let generator_enabled = ctx.generator_enabled();

    let tick_receiver = use_hook(|| Rc::new(RefCell::new(None::<TickReceiver>)));
    let mut controller = use_signal({
        let tick_receiver = Rc::clone(&tick_receiver);
        move || {
            let (controller, ticks) = ExamController::new(ctx.question_source(), ctx.clock());
            *tick_receiver.borrow_mut() = Some(ticks);
            controller
        }
    });

    let mut scope = use_signal(ExamScope::default);
    let mut count = use_signal(|| DEFAULT_QUESTION_COUNT);
    let mut notice = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut confirm_restart = use_signal(|| false);

    // A pending confirmation lapses once the exam ends or resets under it.
    use_effect(move || {
        let phase = controller.read().session().phase();
        if *confirm_restart.peek() && !phase.is_in_progress() {
            confirm_restart.set(false);
        }
    });

    // Countdown ticks arrive on a channel owned by the controller's ticker.
    use_future(move || {
        let receiver = tick_receiver.borrow_mut().take();
        async move {
            let Some(mut receiver) = receiver else {
                return;
            };
            while let Some(tick) = receiver.recv().await {
                controller.write().on_tick(tick);
            }
        }
    });

    let mut report = move |result: Result<Outcome, ControllerError>| match result {
        Ok(_) => action_error.set(None),
        Err(err) => action_error.set(Some(ViewError::from(&err))),
    };

    let on_start = move |()| {
        notice.set(None);
        let pending = match controller.write().start(scope(), count()) {
            Ok(pending) => pending,
            Err(err) => {
                action_error.set(Some(ViewError::from(&err)));
                return;
            }
        };
        action_error.set(None);
        spawn(async move {
            let generation = pending.run().await;
            let outcome = controller.write().complete(generation);
            if let Ok(Outcome::ReturnedToSetup) = outcome {
                notice.set(controller.write().take_failure().map(|failure| failure.message));
            }
        });
    };

    let on_restart = move |()| match controller.write().restart(false) {
        Ok(Outcome::ConfirmationRequired) => confirm_restart.set(true),
        other => report(other),
    };
    let on_confirm_restart = move |()| {
        confirm_restart.set(false);
        let phase = controller.read().session().phase();
        if phase.is_in_progress() {
            report(controller.write().restart(true));
        }
    };

    let on_export = move |()| {
        let _ = eval(print_results_script());
    };

    let (phase, question, results, request) = {
        let ctrl = controller.read();
        let session = ctrl.session();
        (
            session.phase(),
            map_question(session),
            map_results(session),
            session.request(),
        )
    };

    rsx! {
        div { class: "page exam-page",
            match phase {
                Phase::Configuring => rsx! {
                    SetupPanel {
                        scope: scope(),
                        count: count(),
                        generator_enabled,
                        notice: notice(),
                        error: action_error(),
                        on_scope: move |value: ExamScope| {
                            scope.set(value);
                            if value.is_mock() {
                                count.set(MOCK_QUESTION_COUNT);
                            } else if count() == MOCK_QUESTION_COUNT {
                                count.set(DEFAULT_QUESTION_COUNT);
                            }
                        },
                        on_count: move |value: u32| count.set(value),
                        on_start,
                        on_dismiss_notice: move |()| notice.set(None),
                    }
                },
                Phase::Generating => rsx! {
                    LoadingPanel {
                        scope_name: request.map_or("", |r| r.scope().name()).to_string(),
                        count: request.map_or(0, |r| r.count()),
                        on_restart,
                    }
                },
                Phase::Answering | Phase::ShowingFeedback => match question {
                    Some(vm) => rsx! {
                        if let Some(err) = action_error() {
                            p { class: "field-error", "{err.message()}" }
                        }
                        QuestionPanel {
                            vm,
                            on_arm: move |()| report(controller.write().arm_timer()),
                            on_answer: move |key: OptionKey| report(controller.write().answer(key)),
                            on_skip: move |()| report(controller.write().skip()),
                            on_continue: move |()| report(controller.write().continue_()),
                            on_restart,
                        }
                    },
                    None => rsx! {
                        p { "{ViewError::Unknown.message()}" }
                    },
                },
                Phase::Finished => match results {
                    Some(vm) => rsx! {
                        ResultsPanel {
                            vm,
                            on_restart,
                            on_export,
                        }
                    },
                    None => rsx! {
                        p { "{ViewError::Unknown.message()}" }
                    },
                },
            }

            if restart_modal_visible(confirm_restart(), phase) {
                RestartModal {
                    on_cancel: move |()| confirm_restart.set(false),
                    on_confirm: on_confirm_restart,
                }
            }
        }
    }
}

fn restart_modal_visible(requested: bool, phase: Phase) -> bool {
    requested && phase.is_in_progress()
}
