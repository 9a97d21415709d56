#![forbid(unsafe_code)]

pub mod error;
pub mod projection;
pub mod session;

pub use academy_core::Clock;

pub use error::{ProjectionError, SessionError};
pub use projection::{ComparisonReport, ProjectionReport, ProjectionRequest, ProjectionService, YearRow};
pub use session::{BookmarkListing, ClearRequest, LearningSession, PageListing, PathStep, SearchHit};
