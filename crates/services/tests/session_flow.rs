use std::sync::Arc;

use academy_core::bookmarks::AddOutcome;
use academy_core::catalog::{Catalog, SEARCH_RESULTS_PAGE};
use academy_core::model::ModuleId;
use academy_core::quiz::{Answer, Verdict};
use academy_core::search::MatchType;
use academy_core::settings::AcademySettings;
use academy_core::time::fixed_now;
use services::{Clock, ClearRequest, LearningSession, SessionError};

fn session() -> LearningSession {
    LearningSession::new(
        Arc::new(Catalog::builtin()),
        AcademySettings::default(),
        Clock::fixed(fixed_now()),
    )
}

fn module(id: &str) -> ModuleId {
    ModuleId::new(id).unwrap()
}

#[test]
fn passing_a_quiz_completes_its_module() {
    let mut s = session();
    let stock = module("what-is-a-stock");

    let outcome = s
        .submit_quiz(&stock, &[Answer::Single(1), Answer::Single(1)])
        .unwrap();
    assert_eq!(outcome.verdict, Verdict::Passed);
    assert!(s.is_completed(&stock));
    assert!((s.overall_progress() - 100.0 / 7.0).abs() < 1e-9);

    let path = s.learning_path();
    assert!(path[0].completed);
    assert!(path[1..].iter().all(|step| !step.completed));
}

#[test]
fn failing_a_quiz_leaves_progress_alone() {
    let mut s = session();
    let stock = module("what-is-a-stock");

    let outcome = s
        .submit_quiz(&stock, &[Answer::Single(0), Answer::Single(1)])
        .unwrap();
    assert_eq!(outcome.verdict, Verdict::KeepLearning);
    assert!(!s.is_completed(&stock));
    assert_eq!(s.overall_progress(), 0.0);
}

#[test]
fn completing_every_module_reaches_full_progress() {
    let mut s = session();
    let ids: Vec<ModuleId> = s.catalog().module_ids().cloned().collect();
    for id in &ids {
        assert!(s.mark_completed(id).unwrap());
    }
    assert!(!s.mark_completed(&ids[0]).unwrap());
    assert_eq!(s.overall_progress(), 100.0);
}

#[test]
fn unknown_module_is_rejected() {
    let mut s = session();
    let err = s.mark_completed(&module("options-trading")).unwrap_err();
    assert!(matches!(err, SessionError::Progress(_)));
    assert_eq!(s.overall_progress(), 0.0);
}

#[test]
fn search_ranks_and_remembers_queries() {
    let mut s = session();

    let hits = s.search("  IPO ");
    let titles: Vec<&str> = hits.iter().map(|h| h.entry.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Going Public", "Primary Market", "Pizza Shop Analogy"]
    );
    assert_eq!(hits[0].match_type, MatchType::Content);
    assert_eq!(hits[2].match_type, MatchType::Keyword);
    assert_eq!(hits[0].destination, Some(module("why-companies-go-public")));

    assert!(s.search("   ").is_empty());
    s.search("etf");
    s.search("IPO");

    let recent: Vec<&str> = s.recent_searches().collect();
    assert_eq!(recent, ["etf", "IPO"]);
}

#[test]
fn bookmarking_a_search_hit_files_it_under_search_results() {
    let mut s = session();
    let hit = s.search("volatility").into_iter().next().unwrap();

    let first = s.bookmark_search_hit(&hit);
    assert!(first.is_added());
    assert_eq!(
        s.bookmark_search_hit(&hit),
        AddOutcome::AlreadyPresent(first.id())
    );

    let listing = s.bookmark_listing();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].page, SEARCH_RESULTS_PAGE);
    assert_eq!(listing[0].items[0].saved_at, fixed_now());
    assert_eq!(listing[0].items[0].saved_label, "2023-11-14 22:13");
}

#[test]
fn bookmarks_export_and_stats() {
    let mut s = session();
    s.add_bookmark("Stock Definition", "Partial ownership.", "What is a Stock");
    s.add_bookmark("Mall Analogy", "Exchanges are malls.", "Stock Exchanges");
    s.add_bookmark("Handbag Analogy", "Chip in together.", "What is a Stock");

    let text = s.export_bookmarks_text();
    assert!(text.starts_with("# My Stock Market Learning Bookmarks\n\n## What is a Stock\n\n"));
    let stock_at = text.find("## What is a Stock").unwrap();
    let exchanges_at = text.find("## Stock Exchanges").unwrap();
    assert!(stock_at < exchanges_at);

    let json: serde_json::Value =
        serde_json::from_str(&s.export_bookmarks_json().unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["page"], "What is a Stock");
    assert_eq!(json[0]["entries"][1]["index"], 2);

    let stats = s.bookmark_stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pages_covered, 2);
    assert_eq!(stats.favorite_page.as_deref(), Some("What is a Stock"));
    assert!((stats.topic_coverage - 200.0 / 7.0).abs() < 1e-9);
}

#[test]
fn remove_by_id_survives_index_shifts() {
    let mut s = session();
    let a = s.add_bookmark("A", "1", "P").id();
    let b = s.add_bookmark("B", "2", "P").id();

    s.remove_bookmark_at(0).unwrap();
    let removed = s.remove_bookmark(b).unwrap();
    assert_eq!(removed.title(), "B");
    assert!(s.bookmarks().is_empty());
    assert!(matches!(
        s.remove_bookmark(a),
        Err(SessionError::Bookmark(_))
    ));
}

#[test]
fn removing_a_bookmark_cancels_pending_clear() {
    let mut s = session();
    s.add_bookmark("A", "1", "P");
    s.add_bookmark("B", "2", "P");

    assert_eq!(s.request_clear_all(), ClearRequest::ConfirmationRequired);
    s.remove_bookmark_at(1).unwrap();
    assert!(!s.is_clear_pending());
    assert_eq!(s.request_clear_all(), ClearRequest::ConfirmationRequired);
    assert_eq!(s.request_clear_all(), ClearRequest::Cleared(1));
}
