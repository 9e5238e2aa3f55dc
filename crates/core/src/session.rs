use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::graph::QuestionGraph;
use crate::model::{Answer, OptionId, Question, QuestionId, RecommendationTable};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),

    #[error("question {question_id} has no option {option_id}")]
    UnknownOption {
        question_id: QuestionId,
        option_id: OptionId,
    },
}

/// Answer history and position of one walk through the question graph.
///
/// The graph and recommendation table are shared, read-only inputs. Everything
/// shown to the user (visible questions, selected options) is derived from
/// `answers` and `current_question_id` on demand.
#[derive(Debug, Clone)]
pub struct QuizSession {
    graph: Arc<QuestionGraph>,
    recommendations: Arc<RecommendationTable>,
    answers: Vec<Answer>,
    current_question_id: QuestionId,
    recommendation: Option<String>,
}

impl QuizSession {
    /// Creates a fresh session positioned at the graph root.
    #[must_use]
    pub fn new(graph: Arc<QuestionGraph>, recommendations: Arc<RecommendationTable>) -> Self {
        let current_question_id = graph.root_id().clone();
        Self {
            graph,
            recommendations,
            answers: Vec::new(),
            current_question_id,
            recommendation: None,
        }
    }

    /// Record `option_id` for `question_id`, replacing any earlier answer for it.
    ///
    /// With `next_question_id` the walk moves on; without it the option is
    /// terminal and the recommendation is resolved from the table, falling
    /// back to the default referral text.
    pub fn answer(
        &mut self,
        question_id: QuestionId,
        option_id: OptionId,
        next_question_id: Option<QuestionId>,
    ) {
        self.answers.retain(|answer| answer.question_id != question_id);

        match next_question_id {
            Some(next) => {
                debug!(%question_id, %option_id, %next, "answer advances");
                self.current_question_id = next;
            }
            None => {
                let text = self
                    .recommendations
                    .resolve(&question_id, &option_id)
                    .to_string();
                debug!(%question_id, %option_id, "answer resolves recommendation");
                self.recommendation = Some(text);
            }
        }

        self.answers.push(Answer::new(question_id, option_id));
    }

    /// Answer using the option's own `next` reference from the graph.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` or `SessionError::UnknownOption`
    /// if the pair is not part of the graph. State is untouched in that case.
    pub fn choose(
        &mut self,
        question_id: &QuestionId,
        option_id: &OptionId,
    ) -> Result<(), SessionError> {
        let question = self
            .graph
            .get(question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.clone()))?;
        let option = question
            .option(option_id)
            .ok_or_else(|| SessionError::UnknownOption {
                question_id: question_id.clone(),
                option_id: option_id.clone(),
            })?;
        let next = option.next().cloned();

        self.answer(question_id.clone(), option_id.clone(), next);
        Ok(())
    }

    /// Undo the last answer and show its question again.
    ///
    /// Returns `false` without touching state when there is nothing to undo.
    pub fn go_back(&mut self) -> bool {
        let Some(last) = self.answers.pop() else {
            return false;
        };
        debug!(question_id = %last.question_id, "go back");
        self.recommendation = None;
        self.current_question_id = last.question_id;
        true
    }

    /// Reset to a fresh session at the root.
    pub fn restart(&mut self) {
        debug!(answered = self.answers.len(), "restart");
        self.answers.clear();
        self.current_question_id = self.graph.root_id().clone();
        self.recommendation = None;
    }

    /// Questions along the walked path, followed by the current question if
    /// it has not been answered yet.
    #[must_use]
    pub fn visible_questions(&self) -> Vec<&Question> {
        let mut visible: Vec<&Question> = self
            .answers
            .iter()
            .filter_map(|answer| self.graph.get(&answer.question_id))
            .collect();
        if let Some(current) = self.current_question() {
            visible.push(current);
        }
        visible
    }

    /// The current question, unless it already has an answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_answered(&self.current_question_id) {
            return None;
        }
        self.graph.get(&self.current_question_id)
    }

    #[must_use]
    pub fn selected_option(&self, question_id: &QuestionId) -> Option<&OptionId> {
        self.answers
            .iter()
            .find(|answer| &answer.question_id == question_id)
            .map(|answer| &answer.option_id)
    }

    #[must_use]
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.selected_option(question_id).is_some()
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn current_question_id(&self) -> &QuestionId {
        &self.current_question_id
    }

    #[must_use]
    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.answers.is_empty()
    }

    /// True when a terminal option has been chosen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.recommendation.is_some()
    }

    /// True for a session nobody has interacted with yet (or just restarted).
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.answers.is_empty()
            && self.recommendation.is_none()
            && &self.current_question_id == self.graph.root_id()
    }
}
