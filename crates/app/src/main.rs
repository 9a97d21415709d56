mod args;

use std::sync::Arc;

use academy_core::calculator::ContributionTiming;
use academy_core::catalog::Catalog;
use academy_core::settings::AcademySettings;
use services::{
    Clock, ComparisonReport, LearningSession, ProjectionReport, ProjectionService, SearchHit,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{ArgsError, Command, print_usage, settings_draft};

fn load_settings() -> Result<AcademySettings, Box<dyn std::error::Error>> {
    let draft = settings_draft(|var| std::env::var(var).ok())?;
    Ok(draft.validate()?)
}

fn print_projection(report: &ProjectionReport) {
    let timing = match report.timing {
        ContributionTiming::StartOfMonth => "start",
        ContributionTiming::EndOfMonth => "end",
    };
    println!(
        "Growth at {:.1}% a year, contributions added at the {timing} of each month",
        report.annual_rate * 100.0
    );
    println!(
        "{:>6}  {:>14}  {:>14}  {:>14}",
        "year", "contributed", "value", "returns"
    );
    for row in &report.rows {
        println!(
            "{:>6}  {:>14.2}  {:>14.2}  {:>14.2}",
            row.calendar_year, row.point.contributions, row.point.total_value, row.point.returns
        );
    }
    println!();
    println!("If invested:     {:.2}", report.total_if_invested);
    println!("If not invested: {:.2}", report.total_if_not_invested);
    println!("Difference:      {:.2}", report.total_returns());
}

fn print_comparison(report: &ComparisonReport) {
    print!("{:>6}", "year");
    for series in &report.series {
        print!(
            "  {:>20}",
            format!("{} ({:.0}%)", series.name, series.annual_rate * 100.0)
        );
    }
    println!();

    for (i, year) in report.calendar_years.iter().enumerate() {
        print!("{year:>6}");
        for series in &report.series {
            let value = series.points.get(i).map_or(0.0, |p| p.total_value);
            print!("  {value:>20.2}");
        }
        println!();
    }
}

fn print_hits(query: &str, hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No results for {query:?}.");
        return;
    }

    println!("Found {} result(s) for {query:?}:", hits.len());
    for hit in hits {
        println!();
        println!("{} [{} match] ({})", hit.entry.title, hit.match_type.label(), hit.entry.page);
        println!("  {}", hit.preview);
        if let Some(module) = &hit.destination {
            println!("  -> {module}");
        }
    }
}

fn print_path(session: &LearningSession) {
    for (n, step) in session.learning_path().iter().enumerate() {
        let mark = if step.completed { "x" } else { " " };
        println!(
            "[{mark}] {}. {:<26} {:<13} {}",
            n + 1,
            step.module.title,
            step.module.level.label(),
            step.module.id
        );
    }
    println!();
    println!("Overall progress: {:.0}%", session.overall_progress());
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let command = Command::parse(std::env::args().skip(1)).map_err(|e: ArgsError| {
        print_usage();
        e
    })?;
    let settings = load_settings()?;
    debug!(?command, "running");

    match command {
        Command::Help => print_usage(),
        Command::Project(request) => {
            let report = ProjectionService::new(settings).project(&request)?;
            print_projection(&report);
        }
        Command::Compare(request) => {
            let report = ProjectionService::new(settings).compare(&request)?;
            print_comparison(&report);
        }
        Command::Search(query) => {
            let mut session =
                LearningSession::new(Arc::new(Catalog::builtin()), settings, Clock::system());
            let hits = session.search(&query);
            print_hits(&query, &hits);
        }
        Command::Path => {
            let session =
                LearningSession::new(Arc::new(Catalog::builtin()), settings, Clock::system());
            print_path(&session);
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
