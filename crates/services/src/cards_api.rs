use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use recall_core::{
    BackText, Card, CardContent, CardId, CardValidationError, FrontText, Page, Quality,
    SortConfig,
};

use crate::error::CardApiError;

/// Base URL used when `RECALL_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

//
// ─── REQUEST PARAMETERS ────────────────────────────────────────────────────────
//

/// Parameters for the paginated collection listing.
///
/// `sort` is always sent; `page`, `size` and `search` only when set. A blank
/// search is treated as unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardListParams {
    pub sort: SortConfig,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
}

fn query_pairs(params: &CardListParams) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("sortBy", params.sort.key.as_param().to_owned()),
        ("sortDir", params.sort.direction.as_param().to_owned()),
    ];
    if let Some(page) = params.page {
        pairs.push(("page", page.to_string()));
    }
    if let Some(size) = params.size {
        pairs.push(("size", size.to_string()));
    }
    if let Some(search) = params.search.as_deref() {
        let search = search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_owned()));
        }
    }
    pairs
}

//
// ─── API CONTRACT ──────────────────────────────────────────────────────────────
//

/// Typed contract to the remote card service.
///
/// All calls are fire-and-await; none are retried. Implementations hold no
/// card state; the service is the sole owner of authoritative data.
#[async_trait]
pub trait CardApi: Send + Sync {
    /// Fetch one page of the collection under the given sort/search.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failure or a non-2xx status.
    async fn list_cards(&self, params: &CardListParams) -> Result<Page<Card>, CardApiError>;

    /// Fetch the cards currently due, in service-defined order.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failure or a non-2xx status.
    async fn list_due_cards(&self) -> Result<Vec<Card>, CardApiError>;

    /// Create a card; the service assigns its id and initial review time.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failure or a non-2xx status.
    async fn create_card(&self, content: &CardContent) -> Result<Card, CardApiError>;

    /// Update a card's content. The service must not move `nextReview` as a
    /// side effect of a content edit.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failure or a non-2xx status.
    async fn update_card(&self, id: &CardId, content: &CardContent)
        -> Result<Card, CardApiError>;

    /// Delete a card.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failure or a non-2xx status.
    async fn delete_card(&self, id: &CardId) -> Result<(), CardApiError>;

    /// Submit a review rating; the service recomputes `nextReview`.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failure or a non-2xx status.
    async fn review_card(&self, id: &CardId, quality: Quality) -> Result<Card, CardApiError>;
}

//
// ─── HTTP CLIENT ───────────────────────────────────────────────────────────────
//

/// `reqwest`-backed card service client.
#[derive(Clone)]
pub struct HttpCardApi {
    client: Client,
    base_url: String,
}

impl HttpCardApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Build a client from `RECALL_API_URL`, falling back to the default
    /// local backend address.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("RECALL_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl CardApi for HttpCardApi {
    async fn list_cards(&self, params: &CardListParams) -> Result<Page<Card>, CardApiError> {
        let response = self
            .client
            .get(self.url("/cards"))
            .query(&query_pairs(params))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }
        let body: PageDto = response.json().await?;
        Ok(body.into_page()?)
    }

    async fn list_due_cards(&self) -> Result<Vec<Card>, CardApiError> {
        let response = self.client.get(self.url("/cards/due")).send().await?;
        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }
        let body: Vec<CardDto> = response.json().await?;
        let cards = body
            .into_iter()
            .map(CardDto::into_card)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    async fn create_card(&self, content: &CardContent) -> Result<Card, CardApiError> {
        let response = self
            .client
            .post(self.url("/cards"))
            .json(&CardContentRequest {
                front: content.front(),
                back: content.back(),
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }
        let body: CardDto = response.json().await?;
        Ok(body.into_card()?)
    }

    async fn update_card(
        &self,
        id: &CardId,
        content: &CardContent,
    ) -> Result<Card, CardApiError> {
        let response = self
            .client
            .put(self.url(&format!("/cards/{id}")))
            .json(&CardContentRequest {
                front: content.front(),
                back: content.back(),
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }
        let body: CardDto = response.json().await?;
        Ok(body.into_card()?)
    }

    async fn delete_card(&self, id: &CardId) -> Result<(), CardApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/cards/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }
        Ok(())
    }

    async fn review_card(&self, id: &CardId, quality: Quality) -> Result<Card, CardApiError> {
        let response = self
            .client
            .post(self.url(&format!("/cards/{id}/review")))
            .query(&[("quality", quality.as_u8())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }
        let body: CardDto = response.json().await?;
        Ok(body.into_card()?)
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct CardContentRequest<'a> {
    front: &'a str,
    back: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardDto {
    id: CardId,
    front: String,
    back: String,
    next_review: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl CardDto {
    /// Convert the wire shape back into a domain `Card`.
    ///
    /// # Errors
    ///
    /// Returns `CardValidationError` if the payload carries blank text.
    fn into_card(self) -> Result<Card, CardValidationError> {
        let front = FrontText::parse(self.front).map_err(CardValidationError::Front)?;
        let back = BackText::parse(self.back).map_err(CardValidationError::Back)?;
        Ok(Card::new(
            self.id,
            front,
            back,
            self.next_review,
            self.created_at,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageDto {
    content: Vec<CardDto>,
    page: u32,
    size: u32,
    total_elements: u64,
    total_pages: u32,
    last: bool,
}

impl PageDto {
    fn into_page(self) -> Result<Page<Card>, CardValidationError> {
        let content = self
            .content
            .into_iter()
            .map(CardDto::into_card)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            content,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
