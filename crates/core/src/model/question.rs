use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};
use crate::model::text::{OptionLabel, QuestionText, TextError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {question_id} has empty text")]
    EmptyText { question_id: QuestionId },

    #[error("question {question_id} has no options")]
    NoOptions { question_id: QuestionId },

    #[error("question {question_id} declares option {option_id} more than once")]
    DuplicateOption {
        question_id: QuestionId,
        option_id: OptionId,
    },
}

//
// ─── OPTION ────────────────────────────────────────────────────────────────────
//

/// One selectable choice of a question.
///
/// An option without `next` is terminal: choosing it ends the walk and
/// resolves a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    id: OptionId,
    label: OptionLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next: Option<QuestionId>,
}

impl AnswerOption {
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the label is blank.
    pub fn new(
        id: OptionId,
        label: impl Into<String>,
        next: Option<QuestionId>,
    ) -> Result<Self, TextError> {
        Ok(Self {
            id,
            label: OptionLabel::parse(label)?,
            next,
        })
    }

    /// Option that continues to another question.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the label is blank.
    pub fn branch(
        id: impl Into<String>,
        label: impl Into<String>,
        next: impl Into<String>,
    ) -> Result<Self, TextError> {
        Self::new(
            OptionId::new(id),
            label,
            Some(QuestionId::new(next)),
        )
    }

    /// Option that ends the walk.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the label is blank.
    pub fn terminal(id: impl Into<String>, label: impl Into<String>) -> Result<Self, TextError> {
        Self::new(OptionId::new(id), label, None)
    }

    #[must_use]
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    #[must_use]
    pub fn next(&self) -> Option<&QuestionId> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct QuestionRecord {
    id: QuestionId,
    text: String,
    options: Vec<AnswerOption>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(record.id, record.text, record.options)
    }
}

/// A question node of the graph with its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    text: QuestionText,
    options: Vec<AnswerOption>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the text is blank,
    /// `QuestionError::NoOptions` if `options` is empty and
    /// `QuestionError::DuplicateOption` if two options share an id.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Result<Self, QuestionError> {
        let text = QuestionText::parse(text).map_err(|_| QuestionError::EmptyText {
            question_id: id.clone(),
        })?;

        if options.is_empty() {
            return Err(QuestionError::NoOptions { question_id: id });
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.id()) {
                return Err(QuestionError::DuplicateOption {
                    question_id: id,
                    option_id: option.id().clone(),
                });
            }
        }

        Ok(Self { id, text, options })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, option_id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id() == option_id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_fails_if_text_empty() {
        let options = vec![AnswerOption::terminal("a", "Yes").unwrap()];
        let err = Question::new(QuestionId::new("q1"), "  ", options).unwrap_err();
        assert!(matches!(err, QuestionError::EmptyText { .. }));
    }

    #[test]
    fn question_requires_options() {
        let err = Question::new(QuestionId::new("q1"), "Fever?", Vec::new()).unwrap_err();
        assert!(matches!(err, QuestionError::NoOptions { .. }));
    }

    #[test]
    fn question_rejects_duplicate_option_ids() {
        let options = vec![
            AnswerOption::terminal("a", "Yes").unwrap(),
            AnswerOption::terminal("a", "No").unwrap(),
        ];
        let err = Question::new(QuestionId::new("q1"), "Fever?", options).unwrap_err();
        assert_eq!(
            err,
            QuestionError::DuplicateOption {
                question_id: QuestionId::new("q1"),
                option_id: OptionId::new("a"),
            }
        );
    }

    #[test]
    fn option_lookup_by_id() {
        let question = Question::new(
            QuestionId::new("q1"),
            "Fever?",
            vec![
                AnswerOption::branch("a", "Yes", "q2").unwrap(),
                AnswerOption::terminal("b", "No").unwrap(),
            ],
        )
        .unwrap();

        let yes = question.option(&OptionId::new("a")).unwrap();
        assert_eq!(yes.next(), Some(&QuestionId::new("q2")));
        assert!(question.option(&OptionId::new("b")).unwrap().is_terminal());
        assert!(question.option(&OptionId::new("zzz")).is_none());
    }

    #[test]
    fn deserialize_runs_validation() {
        let json = r#"{"id":"q1","text":"Fever?","options":[]}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());

        let json = r#"{"id":"q1","text":"Fever?","options":[{"id":"a","label":"Yes","next":"q2"},{"id":"b","label":"No"}]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.options().len(), 2);
        assert!(question.options()[1].is_terminal());
    }

    #[test]
    fn serialize_then_deserialize_preserves_question() {
        let question = Question::new(
            QuestionId::new("q2"),
            "Has it lasted more than three days?",
            vec![
                AnswerOption::branch("a", "Yes", "q3").unwrap(),
                AnswerOption::terminal("b", "No").unwrap(),
            ],
        )
        .unwrap();

        let json = serde_json::to_string(&question).unwrap();
        assert!(!json.contains("\"next\":null"));
        let parsed: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, question);
    }

    #[test]
    fn deserialize_rejects_malformed_option_ids() {
        let json = r#"{"id":"q1","text":"Fever?","options":[{"id":"","label":"Yes"}]}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
        let json = r#"{"id":"q1","text":"Fever?","options":[{"id":"a:b","label":"Yes"}]}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
