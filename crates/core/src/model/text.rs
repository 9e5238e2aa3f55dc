use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("Text must not be empty.")]
    Empty,
}

/// Non-blank display text, tagged by where it is shown.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Text<T>(String, std::marker::PhantomData<T>);

// Derived `Clone` would require `T: Clone`; the marker is never stored.
impl<T> Clone for Text<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), std::marker::PhantomData)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt;
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label;

pub type QuestionText = Text<Prompt>;
pub type OptionLabel = Text<Label>;

impl<T> Text<T> {
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the text is blank.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(s, std::marker::PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> TryFrom<String> for Text<T> {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<T> From<Text<T>> for String {
    fn from(value: Text<T>) -> Self {
        value.0
    }
}

impl<T> std::fmt::Display for Text<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
