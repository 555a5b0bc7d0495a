use std::sync::Arc;

use dioxus::prelude::*;

use services::CardApi;

/// Services the views need, provided by the composition root at launch.
#[derive(Clone)]
pub struct AppContext {
    cards: Arc<dyn CardApi>,
}

impl AppContext {
    #[must_use]
    pub fn new(cards: Arc<dyn CardApi>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> Arc<dyn CardApi> {
        Arc::clone(&self.cards)
    }
}

/// Monotonic "data changed" key, provided at the app root and handed down by
/// context at composition time.
///
/// Every load effect subscribes by reading the key; every mutating flow bumps
/// it on success, which makes all subscribed controllers re-fetch with their
/// current parameters.
#[derive(Clone, Copy)]
pub struct RefreshKey(pub Signal<u64>);

impl RefreshKey {
    /// Subscribe the caller's reactive scope to data changes.
    #[must_use]
    pub fn subscribe(&self) -> u64 {
        *self.0.read()
    }

    /// Signal that remote data changed and every cached view must reload.
    pub fn bump(mut self) {
        let next = *self.0.peek() + 1;
        self.0.set(next);
    }
}
