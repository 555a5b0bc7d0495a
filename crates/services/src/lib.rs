#![forbid(unsafe_code)]

pub mod cards_api;
pub mod error;
pub mod memory;

pub use cards_api::{CardApi, CardListParams, HttpCardApi, DEFAULT_BASE_URL};
pub use error::CardApiError;
pub use memory::InMemoryCardApi;
