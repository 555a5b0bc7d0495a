use recall_core::{Card, CardContent, CardDraft, CardId};
use services::CardApiError;

use crate::views::ViewError;

//
// ─── EDIT STATE ────────────────────────────────────────────────────────────────
//

/// Draft content for the single row currently being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    card_id: CardId,
    front: String,
    back: String,
    saving: bool,
    error: Option<ViewError>,
}

impl EditDraft {
    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.card_id
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
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        self.error
    }
}

/// A commit accepted for submission.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSave {
    pub card_id: CardId,
    pub content: CardContent,
}

//
// ─── VIEW MODEL ────────────────────────────────────────────────────────────────
//

/// Per-row edit and delete state for the card table.
///
/// At most one row is editable at a time; starting an edit elsewhere discards
/// the previous uncommitted buffer without saving. In-flight work is tracked
/// per card id (one commit per editing row, one delete per row), so a
/// pending request on one row never blocks the others.
pub struct EditVm {
    active: Option<EditDraft>,
    deleting: Vec<CardId>,
    last_error: Option<ViewError>,
}

impl EditVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: None,
            deleting: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&EditDraft> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self, id: &CardId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|draft| draft.card_id == *id)
    }

    #[must_use]
    pub fn is_deleting(&self, id: &CardId) -> bool {
        self.deleting.contains(id)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<ViewError> {
        self.last_error
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Start editing a row, seeding the buffer with the row's server content.
    /// Any prior uncommitted buffer is discarded.
    pub fn begin_edit(&mut self, card: &Card) {
        self.active = Some(EditDraft {
            card_id: card.id().clone(),
            front: card.front().to_owned(),
            back: card.back().to_owned(),
            saving: false,
            error: None,
        });
    }

    pub fn cancel_edit(&mut self) {
        self.active = None;
    }

    pub fn set_front(&mut self, value: String) {
        if let Some(draft) = self.active.as_mut().filter(|draft| !draft.saving) {
            draft.front = value;
        }
    }

    pub fn set_back(&mut self, value: String) {
        if let Some(draft) = self.active.as_mut().filter(|draft| !draft.saving) {
            draft.back = value;
        }
    }

    /// True when the commit control should be enabled: a draft exists, no
    /// commit is in flight for it, and both fields survive trimming.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.active.as_ref().is_some_and(|draft| {
            !draft.saving && CardDraft::new(draft.front.as_str(), draft.back.as_str()).is_valid()
        })
    }

    /// Accept the draft for submission. Returns `None`, and sends nothing,
    /// when the draft is blank or a commit is already in flight.
    pub fn start_save(&mut self) -> Option<PendingSave> {
        if !self.can_save() {
            return None;
        }
        let draft = self.active.as_mut()?;
        let content = CardDraft::new(draft.front.as_str(), draft.back.as_str())
            .validate()
            .ok()?;
        draft.saving = true;
        draft.error = None;
        Some(PendingSave {
            card_id: draft.card_id.clone(),
            content,
        })
    }

    /// Apply a commit outcome. Returns true when the server accepted the
    /// commit; the caller then emits the data-changed signal so the
    /// collection reloads authoritative content. The cached row is never
    /// patched locally.
    pub fn finish_save(&mut self, card_id: &CardId, result: Result<Card, CardApiError>) -> bool {
        let matches_active = self.is_editing(card_id);
        match result {
            Ok(_) => {
                if matches_active {
                    self.active = None;
                }
                true
            }
            Err(_) => {
                if matches_active
                    && let Some(draft) = self.active.as_mut()
                {
                    draft.saving = false;
                    draft.error = Some(ViewError::Api);
                }
                false
            }
        }
    }

    /// Track a delete for a row. Returns false if one is already in flight
    /// for that id.
    pub fn start_delete(&mut self, id: &CardId) -> bool {
        if self.deleting.contains(id) {
            return false;
        }
        self.deleting.push(id.clone());
        true
    }

    /// Apply a delete outcome. On success the row's edit buffer (if any) is
    /// dropped and the caller emits data-changed; on failure the row stays
    /// untouched and the error is surfaced.
    pub fn finish_delete(&mut self, id: &CardId, result: Result<(), CardApiError>) -> bool {
        self.deleting.retain(|pending| pending != id);
        match result {
            Ok(()) => {
                if self.is_editing(id) {
                    self.active = None;
                }
                true
            }
            Err(_) => {
                self.last_error = Some(ViewError::Api);
                false
            }
        }
    }
}

impl Default for EditVm {
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
    use recall_core::{BackText, FrontText, time::fixed_now};
    use reqwest::StatusCode;

    fn card(id: &str, front: &str, back: &str) -> Card {
        Card::new(
            CardId::new(id),
            FrontText::parse(front).unwrap(),
            BackText::parse(back).unwrap(),
            fixed_now(),
            fixed_now(),
        )
    }

    #[test]
    fn only_one_row_edits_at_a_time() {
        let mut vm = EditVm::new();
        let first = card("1", "Q1", "A1");
        let second = card("2", "Q2", "A2");

        vm.begin_edit(&first);
        vm.set_front("changed".to_owned());
        vm.begin_edit(&second);

        assert!(!vm.is_editing(first.id()));
        assert!(vm.is_editing(second.id()));
        // The second buffer is seeded from its own row, not the discarded one.
        assert_eq!(vm.draft().unwrap().front(), "Q2");
    }

    #[test]
    fn blank_draft_blocks_the_commit_entirely() {
        let mut vm = EditVm::new();
        vm.begin_edit(&card("5", "Q", "A"));
        vm.set_front("   ".to_owned());

        assert!(!vm.can_save());
        assert!(vm.start_save().is_none());
    }

    #[test]
    fn commit_in_flight_blocks_a_second_commit() {
        let mut vm = EditVm::new();
        vm.begin_edit(&card("1", "Q", "A"));

        let pending = vm.start_save().unwrap();
        assert_eq!(pending.content.front(), "Q");
        assert!(vm.draft().unwrap().is_saving());
        assert!(vm.start_save().is_none());
    }

    #[test]
    fn failed_commit_keeps_the_draft_for_retry() {
        let mut vm = EditVm::new();
        vm.begin_edit(&card("1", "Q", "A"));
        vm.set_front("Edited".to_owned());

        let pending = vm.start_save().unwrap();
        let emitted = vm.finish_save(
            &pending.card_id,
            Err(CardApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR)),
        );
        assert!(!emitted);

        let draft = vm.draft().unwrap();
        assert_eq!(draft.front(), "Edited");
        assert!(!draft.is_saving());
        assert_eq!(draft.error(), Some(ViewError::Api));
        assert!(vm.start_save().is_some());
    }

    #[test]
    fn successful_commit_exits_edit_mode_and_emits() {
        let mut vm = EditVm::new();
        let row = card("1", "Q", "A");
        vm.begin_edit(&row);
        let pending = vm.start_save().unwrap();

        let emitted = vm.finish_save(&pending.card_id, Ok(row));
        assert!(emitted);
        assert!(vm.draft().is_none());
    }

    #[test]
    fn commit_landing_after_the_buffer_moved_on_still_emits() {
        let mut vm = EditVm::new();
        let first = card("1", "Q1", "A1");
        let second = card("2", "Q2", "A2");

        vm.begin_edit(&first);
        let pending = vm.start_save().unwrap();
        vm.begin_edit(&second);

        // The old row's commit succeeded server-side; data did change.
        let emitted = vm.finish_save(&pending.card_id, Ok(first));
        assert!(emitted);
        // The new buffer is untouched.
        assert!(vm.is_editing(second.id()));
    }

    #[test]
    fn one_delete_per_row_at_a_time() {
        let mut vm = EditVm::new();
        let id = CardId::new("1");
        assert!(vm.start_delete(&id));
        assert!(!vm.start_delete(&id));
        // A different row is unaffected.
        assert!(vm.start_delete(&CardId::new("2")));
    }

    #[test]
    fn failed_delete_surfaces_the_error_and_releases_the_slot() {
        let mut vm = EditVm::new();
        let id = CardId::new("5");
        vm.start_delete(&id);

        let emitted = vm.finish_delete(
            &id,
            Err(CardApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR)),
        );
        assert!(!emitted);
        assert_eq!(vm.last_error(), Some(ViewError::Api));
        assert!(!vm.is_deleting(&id));
        assert!(vm.start_delete(&id)); // retry allowed
    }
}
