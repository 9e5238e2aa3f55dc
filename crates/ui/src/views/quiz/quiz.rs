use dioxus::document::eval;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{OptionButtonVm, QuestionCardVm, QuizIntent, QuizVm};
use triage_core::model::QuestionId;

use super::scripts::scroll_to_bottom_script;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const QUIZ_CONTAINER_ID: &str = "quiz-root";

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz_service();
    let title = quiz.title().to_string();

    let vm = use_signal(move || QuizVm::new(quiz.start_session()));
    let error = use_signal(|| None::<ViewError>);

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut error = error;
        let result = vm.write().apply(intent);
        error.set(result.err());
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    // Presentation only: keep the newest question or the recommendation in view.
    use_effect(move || {
        let _scroll_key = vm.read().scroll_key();
        let _ = eval(&scroll_to_bottom_script(QUIZ_CONTAINER_ID));
    });

    let vm_guard = vm.read();
    let cards = vm_guard.question_cards();
    let recommendation = vm_guard.recommendation().map(str::to_string);
    let progress = vm_guard.progress();
    drop(vm_guard);

    rsx! {
        div { class: "page quiz-page",
            div {
                class: "quiz-card",
                id: QUIZ_CONTAINER_ID,
                "data-answered": "{progress.answered}",
                h1 { class: "quiz-title", "{title}" }
                if let Some(err) = *error.read() {
                    p { class: "quiz-error", "{err.message()}" }
                }
                div { class: "quiz-questions",
                    for card in cards {
                        QuestionBlock { key: "{card.id}", card, on_intent: dispatch_intent }
                    }
                    if let Some(text) = recommendation {
                        div { class: "quiz-recommendation", id: "quiz-recommendation",
                            p { class: "quiz-recommendation__title", "Recommendations:" }
                            p { class: "quiz-recommendation__text", "{text}" }
                        }
                    }
                }
                div { class: "quiz-actions",
                    button {
                        class: "btn btn-secondary",
                        id: "quiz-back",
                        r#type: "button",
                        disabled: !progress.can_go_back,
                        onclick: move |_| dispatch_intent.call(QuizIntent::Back),
                        "Back"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "quiz-restart",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::Restart),
                        "Start over"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionBlock(card: QuestionCardVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-question", id: "quiz-question-{card.id}",
            p { class: "quiz-question__text", "{card.text}" }
            div { class: "quiz-options",
                for option in card.options.iter().cloned() {
                    OptionButton {
                        key: "{option.id}",
                        question_id: card.id.clone(),
                        option,
                        on_intent,
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(
    question_id: QuestionId,
    option: OptionButtonVm,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let class = if option.is_selected {
        "quiz-option quiz-option--selected"
    } else {
        "quiz-option"
    };
    let intent = QuizIntent::Choose {
        question_id,
        option_id: option.id.clone(),
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: option.is_disabled,
            onclick: move |_| on_intent.call(intent.clone()),
            "{option.label}"
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<QuizVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
