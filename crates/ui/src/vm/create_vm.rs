use recall_core::{Card, CardContent, CardDraft};
use services::CardApiError;

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Success,
    Error(ViewError),
}

/// State machine for the new-card form.
pub struct CreateVm {
    front: String,
    back: String,
    state: SaveState,
}

impl CreateVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            front: String::new(),
            back: String::new(),
            state: SaveState::Idle,
        }
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn set_front(&mut self, value: String) {
        if self.state != SaveState::Saving {
            self.front = value;
            self.clear_outcome();
        }
    }

    pub fn set_back(&mut self, value: String) {
        if self.state != SaveState::Saving {
            self.back = value;
            self.clear_outcome();
        }
    }

    fn clear_outcome(&mut self) {
        if matches!(self.state, SaveState::Success | SaveState::Error(_)) {
            self.state = SaveState::Idle;
        }
    }

    /// True when the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state != SaveState::Saving
            && CardDraft::new(self.front.as_str(), self.back.as_str()).is_valid()
    }

    /// Accept the draft for submission. Returns `None`, and sends nothing,
    /// when either field trims to empty or a create is already in flight.
    pub fn start_submit(&mut self) -> Option<CardContent> {
        if !self.can_submit() {
            return None;
        }
        let content = CardDraft::new(self.front.as_str(), self.back.as_str())
            .validate()
            .ok()?;
        self.state = SaveState::Saving;
        Some(content)
    }

    /// Apply the create outcome. On success the fields are cleared and the
    /// caller emits data-changed; on failure the draft is kept for retry.
    pub fn finish_submit(&mut self, result: Result<Card, CardApiError>) -> bool {
        match result {
            Ok(_) => {
                self.front.clear();
                self.back.clear();
                self.state = SaveState::Success;
                true
            }
            Err(_) => {
                self.state = SaveState::Error(ViewError::Api);
                false
            }
        }
    }
}

impl Default for CreateVm {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::{BackText, CardId, FrontText, time::fixed_now};
    use reqwest::StatusCode;

    fn created_card() -> Card {
        Card::new(
            CardId::new("1"),
            FrontText::parse("Q").unwrap(),
            BackText::parse("A").unwrap(),
            fixed_now(),
            fixed_now(),
        )
    }

    #[test]
    fn blank_fields_block_submission_locally() {
        let mut vm = CreateVm::new();
        vm.set_front("Q".to_owned());
        vm.set_back("   ".to_owned());
        assert!(!vm.can_submit());
        assert!(vm.start_submit().is_none());
        assert_eq!(vm.state(), SaveState::Idle);
    }

    #[test]
    fn submitted_content_is_trimmed() {
        let mut vm = CreateVm::new();
        vm.set_front("  Q  ".to_owned());
        vm.set_back("  A  ".to_owned());
        let content = vm.start_submit().unwrap();
        assert_eq!(content.front(), "Q");
        assert_eq!(content.back(), "A");
        assert_eq!(vm.state(), SaveState::Saving);
    }

    #[test]
    fn submit_in_flight_blocks_a_second_submit() {
        let mut vm = CreateVm::new();
        vm.set_front("Q".to_owned());
        vm.set_back("A".to_owned());
        assert!(vm.start_submit().is_some());
        assert!(vm.start_submit().is_none());
    }

    #[test]
    fn success_clears_the_form_and_emits() {
        let mut vm = CreateVm::new();
        vm.set_front("Q".to_owned());
        vm.set_back("A".to_owned());
        vm.start_submit().unwrap();

        assert!(vm.finish_submit(Ok(created_card())));
        assert_eq!(vm.state(), SaveState::Success);
        assert!(vm.front().is_empty());
        assert!(vm.back().is_empty());
    }

    #[test]
    fn failure_keeps_the_draft_for_retry() {
        let mut vm = CreateVm::new();
        vm.set_front("Q".to_owned());
        vm.set_back("A".to_owned());
        vm.start_submit().unwrap();

        let emitted = vm.finish_submit(Err(CardApiError::HttpStatus(
            StatusCode::SERVICE_UNAVAILABLE,
        )));
        assert!(!emitted);
        assert_eq!(vm.state(), SaveState::Error(ViewError::Api));
        assert_eq!(vm.front(), "Q");
        assert!(vm.start_submit().is_some());
    }
}
