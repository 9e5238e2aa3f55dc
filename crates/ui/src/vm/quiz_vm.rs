use services::{QuizProgress, QuizService};
use triage_core::QuizSession;
use triage_core::model::{OptionId, Question, QuestionId};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Choose {
        question_id: QuestionId,
        option_id: OptionId,
    },
    Back,
    Restart,
}

impl QuizIntent {
    #[must_use]
    pub fn choose(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self::Choose {
            question_id: QuestionId::new(question_id),
            option_id: OptionId::new(option_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionButtonVm {
    pub id: OptionId,
    pub label: String,
    pub is_selected: bool,
    pub is_disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<OptionButtonVm>,
}

/// Options of an answered question are locked; the chosen one is highlighted.
#[must_use]
pub fn map_question_card(question: &Question, selected: Option<&OptionId>) -> QuestionCardVm {
    let options = question
        .options()
        .iter()
        .map(|option| OptionButtonVm {
            id: option.id().clone(),
            label: option.label().to_string(),
            is_selected: selected == Some(option.id()),
            is_disabled: selected.is_some(),
        })
        .collect();

    QuestionCardVm {
        id: question.id().clone(),
        text: question.text().to_string(),
        options,
    }
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when a choice does not match the loaded
    /// question graph.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<(), ViewError> {
        match intent {
            QuizIntent::Choose {
                question_id,
                option_id,
            } => self
                .session
                .choose(&question_id, &option_id)
                .map_err(|err| {
                    tracing::warn!(%err, "rejected quiz choice");
                    ViewError::Unknown
                }),
            QuizIntent::Back => {
                self.session.go_back();
                Ok(())
            }
            QuizIntent::Restart => {
                self.session.restart();
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn question_cards(&self) -> Vec<QuestionCardVm> {
        self.session
            .visible_questions()
            .into_iter()
            .map(|question| map_question_card(question, self.session.selected_option(question.id())))
            .collect()
    }

    #[must_use]
    pub fn recommendation(&self) -> Option<&str> {
        self.session.recommendation()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizService::progress(&self.session)
    }

    /// Changes whenever the rendered list grows or shrinks.
    #[must_use]
    pub fn scroll_key(&self) -> (usize, bool) {
        (
            self.session.visible_questions().len(),
            self.progress().is_complete,
        )
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::Catalog;

    fn vm() -> QuizVm {
        let service = QuizService::new(&Catalog::bundled().unwrap());
        QuizVm::new(service.start_session())
    }

    #[test]
    fn fresh_vm_shows_enabled_root_options() {
        let vm = vm();
        let cards = vm.question_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, QuestionId::new("q1"));
        assert!(cards[0].options.iter().all(|opt| !opt.is_disabled && !opt.is_selected));
        assert!(!vm.progress().can_go_back);
    }

    #[test]
    fn answered_question_locks_its_options() {
        let mut vm = vm();
        vm.apply(QuizIntent::choose("q1", "fever")).unwrap();

        let cards = vm.question_cards();
        assert_eq!(cards.len(), 2);
        assert!(cards[0].options.iter().all(|opt| opt.is_disabled));
        let selected: Vec<_> = cards[0]
            .options
            .iter()
            .filter(|opt| opt.is_selected)
            .map(|opt| opt.id.to_string())
            .collect();
        assert_eq!(selected, vec!["fever"]);
        assert!(cards[1].options.iter().all(|opt| !opt.is_disabled));
    }

    #[test]
    fn back_and_restart_intents() {
        let mut vm = vm();
        vm.apply(QuizIntent::choose("q1", "breath")).unwrap();
        vm.apply(QuizIntent::choose("q6", "yes")).unwrap();
        assert!(vm.recommendation().is_some());
        assert_eq!(vm.scroll_key(), (2, true));
        assert_eq!(
            vm.progress(),
            QuizProgress {
                answered: 2,
                is_complete: true,
                can_go_back: true,
            }
        );

        vm.apply(QuizIntent::Back).unwrap();
        assert!(vm.recommendation().is_none());
        assert_eq!(vm.scroll_key(), (2, false));
        assert_eq!(vm.progress().answered, 1);

        vm.apply(QuizIntent::Restart).unwrap();
        assert!(vm.session().is_fresh());
    }

    #[test]
    fn back_on_fresh_vm_is_harmless() {
        let mut vm = vm();
        vm.apply(QuizIntent::Back).unwrap();
        assert!(vm.session().is_fresh());
    }

    #[test]
    fn unknown_choice_is_a_view_error() {
        let mut vm = vm();
        let err = vm.apply(QuizIntent::choose("q1", "nope")).unwrap_err();
        assert_eq!(err, ViewError::Unknown);
        assert!(vm.session().is_fresh());
    }
}
