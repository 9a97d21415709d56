use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{Bookmark, BookmarkId};

const EXPORT_HEADING: &str = "# My Stock Market Learning Bookmarks";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BookmarkError {
    #[error("bookmark index {index} is out of range (have {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("no bookmark with id {0}")]
    NotFound(BookmarkId),
}

//
// ─── OUTCOMES & VIEWS ──────────────────────────────────────────────────────────
//

/// Result of [`BookmarkStore::add`], so callers can show the right feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(BookmarkId),
    AlreadyPresent(BookmarkId),
}

impl AddOutcome {
    #[must_use]
    pub fn is_added(self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    #[must_use]
    pub fn id(self) -> BookmarkId {
        match self {
            AddOutcome::Added(id) | AddOutcome::AlreadyPresent(id) => id,
        }
    }
}

/// A bookmark together with its position in the flat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupedBookmark<'a> {
    pub index: usize,
    pub bookmark: &'a Bookmark,
}

/// All bookmarks that share a page label, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageGroup<'a> {
    pub page: &'a str,
    pub entries: Vec<GroupedBookmark<'a>>,
}

/// Aggregate figures for the bookmarks overview.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkStats {
    pub total: usize,
    pub pages_covered: usize,
    /// Page with the most bookmarks; the earliest such page wins ties.
    pub favorite_page: Option<String>,
    /// Share of lesson pages with at least one bookmark, capped at 100.
    pub topic_coverage: f64,
}

//
// ─── STORE ─────────────────────────────────────────────────────────────────────
//

/// Ordered, session-scoped collection of bookmarks (oldest first).
///
/// Positional removal shifts every later index down by one; hold a
/// [`BookmarkId`] instead of an index across removals.
#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    items: Vec<Bookmark>,
    next_id: u64,
}

impl BookmarkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bookmark unless an identical `(title, content, page)` one exists.
    pub fn add(
        &mut self,
        title: &str,
        content: &str,
        page: &str,
        saved_at: DateTime<Utc>,
    ) -> AddOutcome {
        if let Some(existing) = self.items.iter().find(|b| b.matches(title, content, page)) {
            return AddOutcome::AlreadyPresent(existing.id());
        }

        self.next_id += 1;
        let id = BookmarkId::new(self.next_id);
        self.items
            .push(Bookmark::new(id, title, content, page, saved_at));
        AddOutcome::Added(id)
    }

    /// Removes and returns the bookmark at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::OutOfRange` if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<Bookmark, BookmarkError> {
        if index >= self.items.len() {
            return Err(BookmarkError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Removes and returns the bookmark with the given id.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::NotFound` if no bookmark carries `id`.
    pub fn remove(&mut self, id: BookmarkId) -> Result<Bookmark, BookmarkError> {
        let index = self.position(id).ok_or(BookmarkError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Drops every bookmark and returns how many there were.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.items.get(index)
    }

    #[must_use]
    pub fn position(&self, id: BookmarkId) -> Option<usize> {
        self.items.iter().position(|b| b.id() == id)
    }

    /// Groups bookmarks by page, pages in first-seen order.
    #[must_use]
    pub fn group_by_page(&self) -> Vec<PageGroup<'_>> {
        let mut groups: Vec<PageGroup<'_>> = Vec::new();
        let mut slot: HashMap<&str, usize> = HashMap::new();

        for (index, bookmark) in self.items.iter().enumerate() {
            let at = *slot.entry(bookmark.page()).or_insert_with(|| {
                groups.push(PageGroup {
                    page: bookmark.page(),
                    entries: Vec::new(),
                });
                groups.len() - 1
            });
            groups[at].entries.push(GroupedBookmark { index, bookmark });
        }

        groups
    }

    /// Renders all bookmarks as a markdown-style document, grouped by page.
    #[must_use]
    pub fn export_as_text(&self) -> String {
        let mut out = format!("{EXPORT_HEADING}\n\n");
        for group in self.group_by_page() {
            let _ = write!(out, "## {}\n\n", group.page);
            for entry in group.entries {
                let _ = write!(
                    out,
                    "### {}\n{}\n\n",
                    entry.bookmark.title(),
                    entry.bookmark.content()
                );
            }
        }
        out
    }

    /// Summary figures, measuring coverage against `total_pages` lesson pages.
    #[must_use]
    pub fn stats(&self, total_pages: u32) -> BookmarkStats {
        let groups = self.group_by_page();

        let mut favorite: Option<&PageGroup<'_>> = None;
        for group in &groups {
            if favorite.is_none_or(|best| group.entries.len() > best.entries.len()) {
                favorite = Some(group);
            }
        }

        let topic_coverage = if total_pages == 0 {
            0.0
        } else {
            (groups.len() as f64 / f64::from(total_pages) * 100.0).min(100.0)
        };

        BookmarkStats {
            total: self.items.len(),
            pages_covered: groups.len(),
            favorite_page: favorite.map(|g| g.page.to_string()),
            topic_coverage,
        }
    }
}
