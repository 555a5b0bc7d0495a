use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    ids::CardId,
    text::{BackText, FrontText, TextError},
};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Raw user input for a new card or a content edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
}

impl CardDraft {
    #[must_use]
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Validate the draft into content fit to send to the card service.
    ///
    /// # Errors
    ///
    /// Returns `CardValidationError` if either side trims to empty.
    pub fn validate(&self) -> Result<CardContent, CardValidationError> {
        let front = FrontText::parse(self.front.as_str()).map_err(CardValidationError::Front)?;
        let back = BackText::parse(self.back.as_str()).map_err(CardValidationError::Back)?;
        Ok(CardContent { front, back })
    }

    /// True when `validate` would succeed. Used to gate submit controls.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }
}

/// Validated, trimmed card content, the only shape the remote client accepts
/// for create and update. A blank submission cannot reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    front: FrontText,
    back: BackText,
}

impl CardContent {
    #[must_use]
    pub fn front(&self) -> &str {
        self.front.as_str()
    }

    #[must_use]
    pub fn back(&self) -> &str {
        self.back.as_str()
    }

    /// Decompose into the typed texts, e.g. to build a `Card` around them.
    #[must_use]
    pub fn into_parts(self) -> (FrontText, BackText) {
        (self.front, self.back)
    }
}

/// A flashcard as owned by the remote card service.
///
/// `next_review_at` is the scheduling cursor; only the service moves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    front: FrontText,
    back: BackText,
    next_review_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Card {
    #[must_use]
    pub fn new(
        id: CardId,
        front: FrontText,
        back: BackText,
        next_review_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            front,
            back,
            next_review_at,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn front(&self) -> &str {
        self.front.as_str()
    }

    #[must_use]
    pub fn back(&self) -> &str {
        self.back.as_str()
    }

    #[must_use]
    pub fn next_review_at(&self) -> DateTime<Utc> {
        self.next_review_at
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this card with a moved scheduling cursor. Only service-side
    /// stand-ins have a reason to call this; the client never schedules.
    #[must_use]
    pub fn with_next_review_at(mut self, at: DateTime<Utc>) -> Self {
        self.next_review_at = at;
        self
    }
}

//
// ─── CARD VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    #[error("invalid front text: {0}")]
    Front(#[source] TextError),

    #[error("invalid back text: {0}")]
    Back(#[source] TextError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn draft_fails_if_front_blank() {
        let draft = CardDraft::new("   ", "an answer");
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, CardValidationError::Front(_)));
        assert!(!draft.is_valid());
    }

    #[test]
    fn draft_fails_if_back_blank() {
        let draft = CardDraft::new("a question", " ");
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, CardValidationError::Back(_)));
        assert!(!draft.is_valid());
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let content = CardDraft::new("  Q  ", "  A  ").validate().unwrap();
        assert_eq!(content.front(), "Q");
        assert_eq!(content.back(), "A");
    }

    #[test]
    fn card_exposes_fields() {
        let now = fixed_now();
        let card = Card::new(
            CardId::new("1"),
            FrontText::parse("Q").unwrap(),
            BackText::parse("A").unwrap(),
            now,
            now,
        );
        assert_eq!(card.id(), &CardId::new("1"));
        assert_eq!(card.front(), "Q");
        assert_eq!(card.back(), "A");
        assert_eq!(card.next_review_at(), now);
        assert_eq!(card.created_at(), now);
    }
}
