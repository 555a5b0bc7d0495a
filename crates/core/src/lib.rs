#![forbid(unsafe_code)]

pub mod model;
pub mod time;

pub use model::{
    BackText, Card, CardContent, CardDraft, CardId, CardValidationError, FrontText, Page, Quality,
    QualityError, SortConfig, SortDirection, SortKey, TextError,
};
