use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info};

use academy_core::bookmarks::{AddOutcome, BookmarkStats, BookmarkStore, PageGroup};
use academy_core::catalog::{Catalog, POPULAR_SEARCHES, SEARCH_RESULTS_PAGE};
use academy_core::model::{Bookmark, BookmarkId, LearningModule, ModuleId, SessionId};
use academy_core::progress::ProgressTracker;
use academy_core::quiz::{Answer, QuizError, QuizOutcome, grade};
use academy_core::search::{RecentSearches, search};
use academy_core::settings::AcademySettings;
use academy_core::text::preview;
use academy_core::time::format_saved_at;

use crate::Clock;
use crate::error::SessionError;

use super::clear::{ClearGuard, ClearRequest};
use super::view::{BookmarkListing, PageListing, PathStep, SearchHit};

/// Everything one learner accumulates during a single interactive session.
///
/// Each session owns its state outright; only the read-only `Catalog` is shared.
/// Mutations go through `&mut self`, so a session is driven one event at a time.
pub struct LearningSession {
    id: SessionId,
    clock: Clock,
    catalog: Arc<Catalog>,
    settings: AcademySettings,
    progress: ProgressTracker,
    bookmarks: BookmarkStore,
    recent: RecentSearches,
    clear: ClearGuard,
}

impl LearningSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, settings: AcademySettings, clock: Clock) -> Self {
        let id = SessionId::random();
        let progress =
            ProgressTracker::new(catalog.module_ids().cloned(), settings.total_modules());
        let recent = RecentSearches::new(settings.recent_search_limit());
        info!(session = %id, modules = catalog.modules().len(), "learning session started");

        Self {
            id,
            clock,
            catalog,
            settings,
            progress,
            bookmarks: BookmarkStore::new(),
            recent,
            clear: ClearGuard::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &AcademySettings {
        &self.settings
    }

    // ─── Progress ──────────────────────────────────────────────────────────────

    /// Marks `module` as completed. Returns `true` if it was not completed before.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progress` if the module is not on the learning path.
    pub fn mark_completed(&mut self, module: &ModuleId) -> Result<bool, SessionError> {
        let newly = self.progress.mark_completed(module)?;
        if newly {
            info!(
                session = %self.id,
                module = %module,
                progress = self.progress.overall_progress(),
                "module completed"
            );
        } else {
            debug!(session = %self.id, module = %module, "module already completed");
        }
        Ok(newly)
    }

    #[must_use]
    pub fn is_completed(&self, module: &ModuleId) -> bool {
        self.progress.is_completed(module)
    }

    #[must_use]
    pub fn overall_progress(&self) -> f64 {
        self.progress.overall_progress()
    }

    /// The modules in path order, each with its completion flag.
    #[must_use]
    pub fn learning_path(&self) -> Vec<PathStep> {
        self.catalog
            .modules()
            .iter()
            .map(|module| PathStep {
                module: module.clone(),
                completed: self.progress.is_completed(&module.id),
            })
            .collect()
    }

    /// Grades a quiz attempt; a passing attempt completes the quiz's module.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if the module has no quiz or the answers do not fit it.
    pub fn submit_quiz(
        &mut self,
        module: &ModuleId,
        answers: &[Answer],
    ) -> Result<QuizOutcome, SessionError> {
        let quiz = self
            .catalog
            .quiz_for(module)
            .ok_or_else(|| QuizError::UnknownQuiz(module.clone()))?;
        let outcome = grade(quiz, answers)?;
        info!(
            session = %self.id,
            module = %module,
            score = outcome.score,
            max = outcome.max_score,
            verdict = ?outcome.verdict,
            "quiz submitted"
        );

        if outcome.passed() {
            self.mark_completed(module)?;
        }
        Ok(outcome)
    }

    // ─── Bookmarks ─────────────────────────────────────────────────────────────

    /// Saves a bookmark, or reports that an identical one already exists.
    pub fn add_bookmark(&mut self, title: &str, content: &str, page: &str) -> AddOutcome {
        self.clear.disarm();
        let outcome = self.bookmarks.add(title, content, page, self.clock.now());
        match outcome {
            AddOutcome::Added(id) => {
                info!(session = %self.id, bookmark = %id, page, title, "bookmark added");
            }
            AddOutcome::AlreadyPresent(id) => {
                debug!(session = %self.id, bookmark = %id, "bookmark already present");
            }
        }
        outcome
    }

    /// Saves a search hit under the search-results page label.
    pub fn bookmark_search_hit(&mut self, hit: &SearchHit) -> AddOutcome {
        self.add_bookmark(&hit.entry.title, &hit.entry.content, SEARCH_RESULTS_PAGE)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Bookmark` if no bookmark carries `id`.
    pub fn remove_bookmark(&mut self, id: BookmarkId) -> Result<Bookmark, SessionError> {
        self.clear.disarm();
        let removed = self.bookmarks.remove(id)?;
        info!(session = %self.id, bookmark = %id, title = removed.title(), "bookmark removed");
        Ok(removed)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Bookmark` if `index` is out of range.
    pub fn remove_bookmark_at(&mut self, index: usize) -> Result<Bookmark, SessionError> {
        self.clear.disarm();
        let removed = self.bookmarks.remove_at(index)?;
        info!(
            session = %self.id,
            bookmark = %removed.id(),
            index,
            title = removed.title(),
            "bookmark removed"
        );
        Ok(removed)
    }

    /// First call arms the confirmation, the next one clears everything.
    pub fn request_clear_all(&mut self) -> ClearRequest {
        if self.bookmarks.is_empty() {
            self.clear.disarm();
            return ClearRequest::NothingToClear;
        }

        if self.clear.press() {
            let removed = self.bookmarks.clear_all();
            info!(session = %self.id, removed, "bookmarks cleared");
            ClearRequest::Cleared(removed)
        } else {
            debug!(session = %self.id, "clear-all armed, awaiting confirmation");
            ClearRequest::ConfirmationRequired
        }
    }

    pub fn cancel_clear(&mut self) {
        self.clear.disarm();
    }

    #[must_use]
    pub fn is_clear_pending(&self) -> bool {
        self.clear.is_armed()
    }

    #[must_use]
    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    #[must_use]
    pub fn grouped_bookmarks(&self) -> Vec<PageGroup<'_>> {
        self.bookmarks.group_by_page()
    }

    /// Grouped bookmarks with previews and navigation targets filled in.
    #[must_use]
    pub fn bookmark_listing(&self) -> Vec<PageListing> {
        let limit = self.settings.bookmark_preview_chars();
        self.bookmarks
            .group_by_page()
            .into_iter()
            .map(|group| PageListing {
                page: group.page.to_string(),
                items: group
                    .entries
                    .iter()
                    .map(|entry| {
                        let b = entry.bookmark;
                        let shown = preview(b.content(), limit);
                        BookmarkListing {
                            index: entry.index,
                            id: b.id(),
                            title: b.title().to_string(),
                            truncated: matches!(shown, Cow::Owned(_)),
                            preview: shown.into_owned(),
                            saved_at: b.saved_at(),
                            saved_label: format_saved_at(b.saved_at()),
                            destination: self.destination_for(b.page()).map(|m| m.id.clone()),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    #[must_use]
    pub fn export_bookmarks_text(&self) -> String {
        self.bookmarks.export_as_text()
    }

    /// # Errors
    ///
    /// Returns `SessionError::Export` if serialisation fails.
    pub fn export_bookmarks_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(&self.bookmarks.group_by_page())?)
    }

    #[must_use]
    pub fn bookmark_stats(&self) -> BookmarkStats {
        self.bookmarks.stats(self.settings.total_modules().get())
    }

    /// Module a page label navigates to, if any.
    #[must_use]
    pub fn destination_for(&self, page: &str) -> Option<&LearningModule> {
        self.catalog.module_for_page(page)
    }

    // ─── Search ────────────────────────────────────────────────────────────────

    /// Searches the lesson corpus and remembers the query.
    pub fn search(&mut self, query: &str) -> Vec<SearchHit> {
        let limit = self.settings.search_preview_chars();
        let hits: Vec<SearchHit> = search(query, self.catalog.lessons())
            .into_iter()
            .map(|result| SearchHit {
                entry: result.entry.clone(),
                match_type: result.match_type,
                relevance: result.relevance(),
                preview: preview(&result.entry.content, limit).into_owned(),
                destination: self
                    .catalog
                    .module_for_page(&result.entry.page)
                    .map(|m| m.id.clone()),
            })
            .collect();

        self.recent.record(query);
        debug!(session = %self.id, query, results = hits.len(), "search executed");
        hits
    }

    pub fn recent_searches(&self) -> impl Iterator<Item = &str> {
        self.recent.iter()
    }

    #[must_use]
    pub fn popular_searches(&self) -> &'static [&'static str] {
        &POPULAR_SEARCHES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::time::fixed_clock;

    fn session() -> LearningSession {
        LearningSession::new(
            Arc::new(Catalog::builtin()),
            AcademySettings::default(),
            fixed_clock(),
        )
    }

    fn module(id: &str) -> ModuleId {
        ModuleId::new(id).unwrap()
    }

    #[test]
    fn new_session_is_blank() {
        let s = session();
        assert_eq!(s.overall_progress(), 0.0);
        assert!(s.bookmarks().is_empty());
        assert_eq!(s.recent_searches().count(), 0);
        assert!(s.learning_path().iter().all(|step| !step.completed));
    }

    #[test]
    fn clear_needs_two_requests() {
        let mut s = session();
        s.add_bookmark("Stock Definition", "ownership", "What is a Stock");

        assert_eq!(s.request_clear_all(), ClearRequest::ConfirmationRequired);
        assert!(s.is_clear_pending());
        assert_eq!(s.bookmarks().len(), 1);
        assert_eq!(s.request_clear_all(), ClearRequest::Cleared(1));
        assert!(s.bookmarks().is_empty());
        assert_eq!(s.request_clear_all(), ClearRequest::NothingToClear);
    }

    #[test]
    fn adding_a_bookmark_disarms_clear() {
        let mut s = session();
        s.add_bookmark("a", "1", "P");
        s.request_clear_all();
        s.add_bookmark("b", "2", "P");

        assert!(!s.is_clear_pending());
        assert_eq!(s.request_clear_all(), ClearRequest::ConfirmationRequired);
    }

    #[test]
    fn cancel_clear_keeps_bookmarks() {
        let mut s = session();
        s.add_bookmark("a", "1", "P");
        s.request_clear_all();
        s.cancel_clear();
        assert_eq!(s.request_clear_all(), ClearRequest::ConfirmationRequired);
        assert_eq!(s.bookmarks().len(), 1);
    }

    #[test]
    fn listing_truncates_long_content() {
        let mut s = session();
        let long = "x".repeat(400);
        s.add_bookmark("Long", &long, "Stock Pricing");
        s.add_bookmark("Short", "brief", SEARCH_RESULTS_PAGE);

        let listing = s.bookmark_listing();
        assert_eq!(listing.len(), 2);
        let long_item = &listing[0].items[0];
        assert!(long_item.truncated);
        assert_eq!(long_item.preview.chars().count(), 303);
        assert_eq!(long_item.destination, Some(module("stock-pricing")));

        let short_item = &listing[1].items[0];
        assert!(!short_item.truncated);
        assert_eq!(short_item.destination, None);
    }

    #[test]
    fn unknown_quiz_is_an_error() {
        let mut s = session();
        let err = s.submit_quiz(&module("crypto"), &[]).unwrap_err();
        assert!(matches!(err, SessionError::Quiz(QuizError::UnknownQuiz(_))));
    }
}
