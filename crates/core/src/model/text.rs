use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// Non-blank card text, trimmed on parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Text<T>(String, std::marker::PhantomData<T>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Front;
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Back;

pub type FrontText = Text<Front>;
pub type BackText = Text<Back>;

impl<T> Text<T> {
    /// Trim the input and reject whitespace-only strings.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned(), std::marker::PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank() {
        assert!(matches!(FrontText::parse("   "), Err(TextError::Empty)));
        assert!(matches!(BackText::parse(""), Err(TextError::Empty)));
    }

    #[test]
    fn parse_trims() {
        let text = FrontText::parse("  What is Rust?  ").unwrap();
        assert_eq!(text.as_str(), "What is Rust?");
    }
}
