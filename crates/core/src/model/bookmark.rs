use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ids::BookmarkId;

/// A piece of lesson content the learner saved during the session.
///
/// Identity for duplicate suppression is the `(title, content, page)` triple;
/// `id` and `saved_at` are bookkeeping and never compared.
#[derive(Debug, Clone, Serialize)]
pub struct Bookmark {
    id: BookmarkId,
    title: String,
    content: String,
    page: String,
    saved_at: DateTime<Utc>,
}

impl Bookmark {
    #[must_use]
    pub fn new(
        id: BookmarkId,
        title: impl Into<String>,
        content: impl Into<String>,
        page: impl Into<String>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            page: page.into(),
            saved_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> BookmarkId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    #[must_use]
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    /// True when this bookmark holds exactly the given triple.
    #[must_use]
    pub fn matches(&self, title: &str, content: &str, page: &str) -> bool {
        self.title == title && self.content == content && self.page == page
    }
}

impl PartialEq for Bookmark {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.title, &other.content, &other.page)
    }
}

impl Eq for Bookmark {}
