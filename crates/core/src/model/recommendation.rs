use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, ParseIdError, QuestionId, RecommendationKey};

/// Shown when a terminal option has no entry in the table.
pub const DEFAULT_RECOMMENDATION: &str = "Please consult a doctor.";

/// Recommendation text keyed by the terminal `(question, option)` pair.
///
/// Serialized as a flat object of `"{questionId}:{optionId}"` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct RecommendationTable {
    entries: HashMap<RecommendationKey, String>,
}

impl RecommendationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw `"{questionId}:{optionId}"` keys.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if a key is not a valid composite key.
    pub fn from_raw(raw: HashMap<String, String>) -> Result<Self, ParseIdError> {
        let mut table = Self::new();
        for (key, text) in raw {
            let key: RecommendationKey = key.parse()?;
            table.insert(key, text);
        }
        Ok(table)
    }

    /// Builder-style insert used when assembling tables in code.
    #[must_use]
    pub fn with(
        mut self,
        question_id: impl Into<String>,
        option_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(
            RecommendationKey::new(QuestionId::new(question_id), OptionId::new(option_id)),
            text,
        );
        self
    }

    pub fn insert(&mut self, key: RecommendationKey, text: impl Into<String>) {
        self.entries.insert(key, text.into());
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId, option_id: &OptionId) -> Option<&str> {
        self.get_key(&RecommendationKey::new(question_id.clone(), option_id.clone()))
    }

    #[must_use]
    pub fn get_key(&self, key: &RecommendationKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Looks up the recommendation, falling back to [`DEFAULT_RECOMMENDATION`].
    #[must_use]
    pub fn resolve(&self, question_id: &QuestionId, option_id: &OptionId) -> &str {
        self.get(question_id, option_id)
            .unwrap_or(DEFAULT_RECOMMENDATION)
    }

    /// Iterates the composite keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &RecommendationKey> {
        self.entries.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<HashMap<String, String>> for RecommendationTable {
    type Error = ParseIdError;

    fn try_from(raw: HashMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<RecommendationTable> for HashMap<String, String> {
    fn from(table: RecommendationTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(key, text)| (key.to_string(), text))
            .collect()
    }
}
