mod clear;
mod state;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use clear::ClearRequest;
pub use state::LearningSession;
pub use view::{BookmarkListing, PageListing, PathStep, SearchHit};
