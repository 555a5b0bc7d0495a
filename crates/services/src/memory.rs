use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;

use recall_core::{Card, CardContent, CardId, Page, Quality, SortDirection, SortKey};

use crate::cards_api::{CardApi, CardListParams};
use crate::error::CardApiError;

// Server-side listing defaults, mirrored so tests see the same envelope the
// real backend would produce when page/size are omitted.
const DEFAULT_PAGE: u32 = 0;
const DEFAULT_SIZE: u32 = 10;

/// In-memory stand-in for the remote card service, for tests and prototyping.
///
/// It mirrors the backend's observable contract: ids are assigned on create,
/// a fresh card is due immediately, content updates never move `nextReview`,
/// search matches front/back case-insensitively, and `due` returns every card
/// with `nextReview` at or before the fake's current time.
///
/// The review policy is a fixed stand-in, not a scheduler: `Again` keeps the
/// card due, the other ratings push it 1/3/7 days out. Clients must not rely
/// on any particular policy.
#[derive(Clone, Default)]
pub struct InMemoryCardApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    cards: Vec<Card>,
    next_id: u64,
    now: Option<DateTime<Utc>>,
    fail_status: Option<StatusCode>,
    calls: Vec<&'static str>,
}

impl Inner {
    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

impl InMemoryCardApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the fake's clock, so due-ness is deterministic.
    #[must_use]
    pub fn with_now(now: DateTime<Utc>) -> Self {
        let api = Self::default();
        api.set_now(now);
        api
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.now = Some(now);
        }
    }

    /// Seed a card directly, bypassing the create endpoint.
    pub fn insert(&self, card: Card) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.cards.push(card);
        }
    }

    /// Make every subsequent request fail with the given status.
    pub fn fail_with(&self, status: StatusCode) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.fail_status = Some(status);
        }
    }

    /// Clear an injected failure.
    pub fn succeed(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.fail_status = None;
        }
    }

    /// Operations observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner
            .lock()
            .map(|guard| guard.calls.clone())
            .unwrap_or_default()
    }

    /// Drain the recorded operations.
    pub fn take_calls(&self) -> Vec<&'static str> {
        self.inner
            .lock()
            .map(|mut guard| std::mem::take(&mut guard.calls))
            .unwrap_or_default()
    }

    /// Snapshot of the stored cards, unordered.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.inner
            .lock()
            .map(|guard| guard.cards.clone())
            .unwrap_or_default()
    }

    fn begin(&self, op: &'static str) -> Result<MutexGuard<'_, Inner>, CardApiError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| CardApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR))?;
        guard.calls.push(op);
        if let Some(status) = guard.fail_status {
            return Err(CardApiError::HttpStatus(status));
        }
        Ok(guard)
    }
}

fn sort_cards(cards: &mut [Card], sort: recall_core::SortConfig) {
    cards.sort_by(|a, b| {
        let ordering = match sort.key {
            SortKey::Front => a.front().to_lowercase().cmp(&b.front().to_lowercase()),
            SortKey::Back => a.back().to_lowercase().cmp(&b.back().to_lowercase()),
            SortKey::NextReview => a.next_review_at().cmp(&b.next_review_at()),
            SortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
        };
        let ordering = ordering.then_with(|| a.id().cmp(b.id()));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn matches_search(card: &Card, term: &str) -> bool {
    let term = term.to_lowercase();
    card.front().to_lowercase().contains(&term) || card.back().to_lowercase().contains(&term)
}

#[async_trait]
impl CardApi for InMemoryCardApi {
    async fn list_cards(&self, params: &CardListParams) -> Result<Page<Card>, CardApiError> {
        let guard = self.begin("list_cards")?;

        let mut cards: Vec<Card> = match params.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => guard
                .cards
                .iter()
                .filter(|card| matches_search(card, term))
                .cloned()
                .collect(),
            _ => guard.cards.clone(),
        };
        sort_cards(&mut cards, params.sort);

        let page = params.page.unwrap_or(DEFAULT_PAGE);
        let size = params.size.unwrap_or(DEFAULT_SIZE).max(1);
        let total_elements = cards.len() as u64;
        let total_pages = u32::try_from(total_elements.div_ceil(u64::from(size)))
            .unwrap_or(u32::MAX);
        let start = (page as usize).saturating_mul(size as usize);
        let content: Vec<Card> = cards.into_iter().skip(start).take(size as usize).collect();
        let last = u64::from(page + 1) * u64::from(size) >= total_elements;

        Ok(Page {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last,
        })
    }

    async fn list_due_cards(&self) -> Result<Vec<Card>, CardApiError> {
        let guard = self.begin("list_due_cards")?;
        let now = guard.now();
        let mut due: Vec<Card> = guard
            .cards
            .iter()
            .filter(|card| card.next_review_at() <= now)
            .cloned()
            .collect();
        due.sort_by(|a, b| {
            a.next_review_at()
                .cmp(&b.next_review_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(due)
    }

    async fn create_card(&self, content: &CardContent) -> Result<Card, CardApiError> {
        let mut guard = self.begin("create_card")?;
        let now = guard.now();
        guard.next_id += 1;
        let id = CardId::new(guard.next_id.to_string());
        let (front, back) = content.clone().into_parts();
        let card = Card::new(id, front, back, now, now);
        guard.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card(
        &self,
        id: &CardId,
        content: &CardContent,
    ) -> Result<Card, CardApiError> {
        let mut guard = self.begin("update_card")?;
        let Some(existing) = guard.cards.iter_mut().find(|card| card.id() == id) else {
            return Err(CardApiError::HttpStatus(StatusCode::NOT_FOUND));
        };
        let (front, back) = content.clone().into_parts();
        // Content-only update: scheduling state is untouched.
        *existing = Card::new(
            existing.id().clone(),
            front,
            back,
            existing.next_review_at(),
            existing.created_at(),
        );
        Ok(existing.clone())
    }

    async fn delete_card(&self, id: &CardId) -> Result<(), CardApiError> {
        let mut guard = self.begin("delete_card")?;
        let before = guard.cards.len();
        guard.cards.retain(|card| card.id() != id);
        if guard.cards.len() == before {
            return Err(CardApiError::HttpStatus(StatusCode::NOT_FOUND));
        }
        Ok(())
    }

    async fn review_card(&self, id: &CardId, quality: Quality) -> Result<Card, CardApiError> {
        let mut guard = self.begin("review_card")?;
        let now = guard.now();
        let Some(existing) = guard.cards.iter_mut().find(|card| card.id() == id) else {
            return Err(CardApiError::HttpStatus(StatusCode::NOT_FOUND));
        };
        let next_review_at = match quality {
            Quality::Again => now,
            Quality::Hard => now + Duration::days(1),
            Quality::Good => now + Duration::days(3),
            Quality::Easy => now + Duration::days(7),
        };
        *existing = existing.clone().with_next_review_at(next_review_at);
        Ok(existing.clone())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
