use recall_core::{Card, CardId, Quality};
use services::CardApiError;

use crate::views::ViewError;

//
// ─── REVIEW STATES ─────────────────────────────────────────────────────────────
//

/// Which face of the current card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewPhase {
    Prompt,
    Answer,
}

/// The due queue with the flip/rate state of its head card.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveReview {
    queue: Vec<Card>,
    phase: ReviewPhase,
    submitting: Option<Quality>,
    error: Option<ViewError>,
}

impl ActiveReview {
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.queue[0]
    }

    #[must_use]
    pub fn phase(&self) -> ReviewPhase {
        self.phase
    }

    /// True while a rating request is in flight; rating input is disabled.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    #[must_use]
    pub fn due_count(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReviewState {
    Loading,
    Failed(ViewError),
    /// Nothing due; all caught up.
    Empty,
    Active(ActiveReview),
}

/// A stamped due-list refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDueLoad {
    pub generation: u64,
}

/// A rating accepted for submission. Carries the generation so an outcome
/// landing after an intervening refresh is discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRating {
    pub generation: u64,
    pub card_id: CardId,
    pub quality: Quality,
}

//
// ─── VIEW MODEL ────────────────────────────────────────────────────────────────
//

/// State machine for the review session.
///
/// The due queue is never advanced locally: every successful rating triggers
/// a full due-list refresh, and the next card is whatever head the service
/// returns. A card rated Again may legitimately come straight back.
pub struct ReviewVm {
    state: ReviewState,
    generation: u64,
}

impl ReviewVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ReviewState::Loading,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        match &self.state {
            ReviewState::Active(active) => Some(active.card()),
            _ => None,
        }
    }

    #[must_use]
    pub fn due_count(&self) -> usize {
        match &self.state {
            ReviewState::Active(active) => active.due_count(),
            _ => 0,
        }
    }

    /// Enter `Loading` and stamp a fresh due-list request. Supersedes any
    /// refresh or rating still in flight.
    pub fn start_refresh(&mut self) -> PendingDueLoad {
        self.generation += 1;
        self.state = ReviewState::Loading;
        PendingDueLoad {
            generation: self.generation,
        }
    }

    /// Apply a due-list result. Returns false for a superseded request.
    pub fn finish_refresh(
        &mut self,
        generation: u64,
        result: Result<Vec<Card>, CardApiError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match result {
            Ok(cards) if cards.is_empty() => ReviewState::Empty,
            Ok(cards) => ReviewState::Active(ActiveReview {
                queue: cards,
                phase: ReviewPhase::Prompt,
                submitting: None,
                error: None,
            }),
            Err(_) => ReviewState::Failed(ViewError::Api),
        };
        true
    }

    /// Show the answer face. A pure local toggle; no network involved.
    pub fn reveal(&mut self) -> bool {
        match &mut self.state {
            ReviewState::Active(active)
                if active.phase == ReviewPhase::Prompt && active.submitting.is_none() =>
            {
                active.phase = ReviewPhase::Answer;
                true
            }
            _ => false,
        }
    }

    /// Accept a rating for the current card.
    ///
    /// Returns `None`, and must send nothing, unless the answer is showing
    /// and no rating for this card is already in flight.
    pub fn start_rating(&mut self, quality: Quality) -> Option<PendingRating> {
        match &mut self.state {
            ReviewState::Active(active)
                if active.phase == ReviewPhase::Answer && active.submitting.is_none() =>
            {
                active.submitting = Some(quality);
                Some(PendingRating {
                    generation: self.generation,
                    card_id: active.card().id().clone(),
                    quality,
                })
            }
            _ => None,
        }
    }

    /// Record a failed rating: the card stays revealed with the draft rating
    /// cleared, so the user can retry. A stale outcome is dropped.
    pub fn finish_rating_failure(&mut self, pending: &PendingRating) {
        if pending.generation != self.generation {
            return;
        }
        if let ReviewState::Active(active) = &mut self.state {
            active.submitting = None;
            active.error = Some(ViewError::Api);
        }
    }
}

impl Default for ReviewVm {
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

    fn card(id: &str) -> Card {
        Card::new(
            CardId::new(id),
            FrontText::parse("Q").unwrap(),
            BackText::parse("A").unwrap(),
            fixed_now(),
            fixed_now(),
        )
    }

    fn refreshed(vm: &mut ReviewVm, cards: Vec<Card>) {
        let pending = vm.start_refresh();
        assert!(vm.finish_refresh(pending.generation, Ok(cards)));
    }

    #[test]
    fn empty_due_list_is_the_caught_up_state() {
        let mut vm = ReviewVm::new();
        refreshed(&mut vm, vec![]);
        assert_eq!(*vm.state(), ReviewState::Empty);
        assert!(vm.current_card().is_none());
    }

    #[test]
    fn rating_requires_a_revealed_answer() {
        let mut vm = ReviewVm::new();
        refreshed(&mut vm, vec![card("1")]);

        assert!(vm.start_rating(Quality::Good).is_none());
        assert!(vm.reveal());
        assert!(!vm.reveal()); // already revealed
        assert!(vm.start_rating(Quality::Good).is_some());
    }

    #[test]
    fn double_submit_for_the_same_card_is_rejected() {
        let mut vm = ReviewVm::new();
        refreshed(&mut vm, vec![card("1")]);
        vm.reveal();

        let first = vm.start_rating(Quality::Good);
        assert!(first.is_some());
        assert!(vm.start_rating(Quality::Easy).is_none());
        assert!(vm.start_rating(Quality::Good).is_none());
    }

    #[test]
    fn failed_rating_keeps_the_card_revealed_and_allows_retry() {
        let mut vm = ReviewVm::new();
        refreshed(&mut vm, vec![card("1")]);
        vm.reveal();

        let pending = vm.start_rating(Quality::Again).unwrap();
        vm.finish_rating_failure(&pending);

        let ReviewState::Active(active) = vm.state() else {
            panic!("still active");
        };
        assert_eq!(active.phase(), ReviewPhase::Answer);
        assert!(!active.is_submitting());
        assert_eq!(active.error(), Some(ViewError::Api));

        // Retry goes through.
        assert!(vm.start_rating(Quality::Again).is_some());
    }

    #[test]
    fn refresh_supersedes_an_in_flight_rating_outcome() {
        let mut vm = ReviewVm::new();
        refreshed(&mut vm, vec![card("1")]);
        vm.reveal();
        let pending = vm.start_rating(Quality::Good).unwrap();

        // External data change lands before the rating outcome.
        refreshed(&mut vm, vec![card("2")]);
        vm.finish_rating_failure(&pending);

        let ReviewState::Active(active) = vm.state() else {
            panic!("still active");
        };
        // The stale failure did not touch the fresh queue head.
        assert_eq!(active.card().id().as_str(), "2");
        assert_eq!(active.phase(), ReviewPhase::Prompt);
        assert!(active.error().is_none());
    }

    #[test]
    fn stale_due_list_never_overwrites_a_later_one() {
        let mut vm = ReviewVm::new();
        let first = vm.start_refresh();
        let second = vm.start_refresh();

        assert!(vm.finish_refresh(second.generation, Ok(vec![card("2")])));
        assert!(!vm.finish_refresh(first.generation, Ok(vec![card("1")])));
        assert_eq!(vm.current_card().unwrap().id().as_str(), "2");
    }

    #[test]
    fn the_head_of_a_fresh_refresh_is_next_up_even_if_it_repeats() {
        let mut vm = ReviewVm::new();
        refreshed(&mut vm, vec![card("1"), card("2")]);
        vm.reveal();
        let _pending = vm.start_rating(Quality::Again).unwrap();

        // The service kept the Again-rated card due; it comes straight back.
        refreshed(&mut vm, vec![card("1"), card("2")]);
        assert_eq!(vm.current_card().unwrap().id().as_str(), "1");
        assert_eq!(vm.due_count(), 2);
    }
}
