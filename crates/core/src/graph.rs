use std::collections::HashMap;

use thiserror::Error;

use crate::model::{AnswerOption, OptionId, Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("question graph has no questions")]
    Empty,

    #[error("question {question_id} is declared more than once")]
    DuplicateQuestion { question_id: QuestionId },

    #[error("root question {root} is not part of the graph")]
    MissingRoot { root: QuestionId },

    #[error("option {option_id} of question {question_id} points to unknown question {next}")]
    DanglingNext {
        question_id: QuestionId,
        option_id: OptionId,
        next: QuestionId,
    },
}

/// Static directed graph of questions linked by their options.
///
/// Construction checks every reference once so that the session controller
/// can treat lookups as infallible data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGraph {
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
    root: QuestionId,
}

impl QuestionGraph {
    /// Build a graph rooted at [`QuestionId::root`].
    ///
    /// # Errors
    ///
    /// See [`QuestionGraph::with_root`].
    pub fn new(questions: Vec<Question>) -> Result<Self, GraphError> {
        Self::with_root(questions, QuestionId::root())
    }

    /// Build a graph rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::Empty` for an empty question list,
    /// `GraphError::DuplicateQuestion` when ids collide,
    /// `GraphError::MissingRoot` when `root` is not declared and
    /// `GraphError::DanglingNext` when an option points nowhere.
    pub fn with_root(questions: Vec<Question>, root: QuestionId) -> Result<Self, GraphError> {
        if questions.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (pos, question) in questions.iter().enumerate() {
            if index.insert(question.id().clone(), pos).is_some() {
                return Err(GraphError::DuplicateQuestion {
                    question_id: question.id().clone(),
                });
            }
        }

        if !index.contains_key(&root) {
            return Err(GraphError::MissingRoot { root });
        }

        for question in &questions {
            for option in question.options() {
                if let Some(next) = option.next()
                    && !index.contains_key(next)
                {
                    return Err(GraphError::DanglingNext {
                        question_id: question.id().clone(),
                        option_id: option.id().clone(),
                        next: next.clone(),
                    });
                }
            }
        }

        Ok(Self {
            questions,
            index,
            root,
        })
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.index.get(id).map(|&pos| &self.questions[pos])
    }

    #[must_use]
    pub fn root_id(&self) -> &QuestionId {
        &self.root
    }

    #[must_use]
    pub fn root(&self) -> &Question {
        // Presence of the root is checked in `with_root`.
        &self.questions[self.index[&self.root]]
    }

    /// Every `(question, option)` pair that ends a walk.
    pub fn terminal_options(&self) -> impl Iterator<Item = (&Question, &AnswerOption)> {
        self.questions.iter().flat_map(|question| {
            question
                .options()
                .iter()
                .filter(|option| option.is_terminal())
                .map(move |option| (question, option))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
