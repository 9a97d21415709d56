//! Keyword search over the lesson corpus.
//!
//! Each entry is checked title first, then body, then keyword tags; the first
//! tier that matches decides its relevance and the entry yields one result at most.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::model::LessonEntry;

/// Which part of an entry the query matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Title,
    Content,
    Keyword,
}

impl MatchType {
    /// Rank of this tier; higher sorts first.
    #[must_use]
    pub fn relevance(self) -> u8 {
        match self {
            MatchType::Title => 3,
            MatchType::Content => 2,
            MatchType::Keyword => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MatchType::Title => "title",
            MatchType::Content => "content",
            MatchType::Keyword => "keyword",
        }
    }
}

/// A corpus entry that matched, tagged with how it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult<'a> {
    pub entry: &'a LessonEntry,
    pub match_type: MatchType,
}

impl SearchResult<'_> {
    #[must_use]
    pub fn relevance(&self) -> u8 {
        self.match_type.relevance()
    }
}

/// Case-insensitive substring search, most relevant first.
///
/// A blank query returns nothing; otherwise surrounding whitespace is ignored.
/// Entries of equal relevance keep their corpus order.
#[must_use]
pub fn search<'a>(query: &str, corpus: &'a [LessonEntry]) -> Vec<SearchResult<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult<'a>> = corpus
        .iter()
        .filter_map(|entry| {
            classify(&needle, entry).map(|match_type| SearchResult { entry, match_type })
        })
        .collect();

    // sort_by_key is stable, which keeps corpus order among ties.
    results.sort_by_key(|r| std::cmp::Reverse(r.relevance()));
    results
}

fn classify(needle: &str, entry: &LessonEntry) -> Option<MatchType> {
    if entry.title.to_lowercase().contains(needle) {
        return Some(MatchType::Title);
    }
    if entry.content.to_lowercase().contains(needle) {
        return Some(MatchType::Content);
    }
    if entry
        .keywords
        .iter()
        .any(|k| k.to_lowercase().contains(needle))
    {
        return Some(MatchType::Keyword);
    }
    None
}

/// Most-recent-first list of past queries with a fixed capacity.
///
/// A query already in the list is left where it is.
#[derive(Debug, Clone)]
pub struct RecentSearches {
    entries: VecDeque<String>,
    capacity: NonZeroUsize,
}

impl RecentSearches {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Remembers `query`. Returns `true` if it was newly recorded.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.entries.iter().any(|q| q == query) {
            return false;
        }
        self.entries.push_front(query.to_string());
        self.entries.truncate(self.capacity.get());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<LessonEntry> {
        vec![
            LessonEntry::new("Handbag Analogy", "Joining friends to buy a designer bag", "What is a Stock")
                .with_keywords(["stock", "ownership"]),
            LessonEntry::new("Mall Analogy", "Exchanges are malls where stock shops sit", "Stock Exchanges"),
            LessonEntry::new("Stock Definition", "Partial ownership in a company", "What is a Stock"),
            LessonEntry::new("Index ETFs", "Buy a whole index at once", "Market Indices")
                .with_keywords(["ETF", "passive"]),
        ]
    }

    #[test]
    fn tiers_are_ranked_title_content_keyword() {
        let corpus = corpus();
        let results = search("stock", &corpus);

        let titles: Vec<_> = results.iter().map(|r| r.entry.title.as_str()).collect();
        assert_eq!(titles, ["Stock Definition", "Mall Analogy", "Handbag Analogy"]);
        let kinds: Vec<_> = results.iter().map(|r| r.match_type).collect();
        assert_eq!(kinds, [MatchType::Title, MatchType::Content, MatchType::Keyword]);
    }

    #[test]
    fn entry_matching_several_tiers_yields_one_title_result() {
        let corpus = vec![
            LessonEntry::new("Stock Volatility", "Why stock prices swing", "Stock Pricing")
                .with_keywords(["stock"]),
        ];
        let results = search("stock", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::Title);
        assert_eq!(results[0].relevance(), 3);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let corpus = corpus();
        let results = search("etf", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.title, "Index ETFs");
        assert_eq!(results[0].match_type, MatchType::Title);
    }

    #[test]
    fn ties_keep_corpus_order() {
        let corpus = vec![
            LessonEntry::new("Primary Market", "first sale", "Where to Buy Stocks"),
            LessonEntry::new("Secondary Market", "resale", "Where to Buy Stocks"),
        ];
        let results = search("market", &corpus);
        let titles: Vec<_> = results.iter().map(|r| r.entry.title.as_str()).collect();
        assert_eq!(titles, ["Primary Market", "Secondary Market"]);
    }

    #[test]
    fn blank_query_returns_nothing() {
        let corpus = corpus();
        assert!(search("", &corpus).is_empty());
        assert!(search("   \t", &corpus).is_empty());
    }

    #[test]
    fn query_is_trimmed() {
        let corpus = corpus();
        assert_eq!(search("  mall  ", &corpus).len(), 1);
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(search("crypto", &corpus()).is_empty());
    }

    #[test]
    fn recent_searches_are_newest_first_and_bounded() {
        let mut recent = RecentSearches::new(NonZeroUsize::new(3).unwrap());
        for q in ["ipo", "etf", "nyse", "nifty 50"] {
            assert!(recent.record(q));
        }
        let seen: Vec<_> = recent.iter().collect();
        assert_eq!(seen, ["nifty 50", "nyse", "etf"]);
    }

    #[test]
    fn recent_searches_skip_duplicates_and_blanks() {
        let mut recent = RecentSearches::new(NonZeroUsize::new(5).unwrap());
        recent.record("ipo");
        recent.record("etf");
        assert!(!recent.record("ipo"));
        assert!(!recent.record("  "));
        let seen: Vec<_> = recent.iter().collect();
        assert_eq!(seen, ["etf", "ipo"]);
    }
}
