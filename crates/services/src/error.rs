//! Shared error types for the services crate.

use thiserror::Error;

use academy_core::bookmarks::BookmarkError;
use academy_core::calculator::CalculatorError;
use academy_core::progress::ProgressError;
use academy_core::quiz::QuizError;

/// Errors emitted by `LearningSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("failed to export bookmarks: {0}")]
    Export(#[from] serde_json::Error),
}

/// Errors emitted by `ProjectionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectionError {
    #[error(transparent)]
    Calculator(#[from] CalculatorError),
}
