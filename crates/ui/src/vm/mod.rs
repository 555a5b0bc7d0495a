mod collection_vm;
mod create_vm;
mod edit_vm;
mod review_vm;
mod time_fmt;

pub use collection_vm::{CollectionVm, PendingLoad, PAGE_SIZE};
pub use create_vm::{CreateVm, SaveState};
pub use edit_vm::{EditDraft, EditVm, PendingSave};
pub use review_vm::{
    ActiveReview, PendingDueLoad, PendingRating, ReviewPhase, ReviewState, ReviewVm,
};
pub use time_fmt::format_timestamp;
