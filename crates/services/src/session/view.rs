use chrono::{DateTime, Utc};
use serde::Serialize;

use academy_core::model::{BookmarkId, LearningModule, LessonEntry, ModuleId};
use academy_core::search::MatchType;

/// One row of the learning path with its completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub module: LearningModule,
    pub completed: bool,
}

/// A search result ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub entry: LessonEntry,
    pub match_type: MatchType,
    pub relevance: u8,
    pub preview: String,
    /// Module the entry's page belongs to, for "go to page" navigation.
    pub destination: Option<ModuleId>,
}

/// A bookmark as listed on the bookmarks page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkListing {
    pub index: usize,
    pub id: BookmarkId,
    pub title: String,
    pub preview: String,
    /// Whether `preview` was shortened from the full content.
    pub truncated: bool,
    pub saved_at: DateTime<Utc>,
    /// `saved_at` as shown in the "Saved:" caption.
    pub saved_label: String,
    pub destination: Option<ModuleId>,
}

/// Bookmarks of a single page, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageListing {
    pub page: String,
    pub items: Vec<BookmarkListing>,
}
