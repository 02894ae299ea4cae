use std::time::Duration;

use crate::scraper::{
    run_paginated, ExtractionSchema, Listing, ScraperError, Termination,
};
use crate::tests::utils::{empty_page, full_page};

fn drive(
    pages: Vec<Result<String, ScraperError>>,
    max_pages: u32,
) -> (crate::scraper::ScrapeOutcome, Vec<Listing>) {
    let mut pages = pages.into_iter();
    let mut accumulated = Vec::new();

    let outcome = run_paginated(
        |_page| pages.next().expect("driver fetched past the scripted pages"),
        &ExtractionSchema::default(),
        "dogs",
        max_pages,
        Duration::ZERO,
        |batch| {
            accumulated.extend(batch.listings.iter().cloned());
            Ok(())
        },
    )
    .expect("driver should not error");

    (outcome, accumulated)
}

#[test]
fn empty_page_halts_with_exhausted_and_keeps_prior_rows() {
    // max_pages=3, pages 1-2 yield 20 cards each, page 3 yields none.
    let (outcome, rows) = drive(
        vec![
            Ok(full_page(20, "page1")),
            Ok(full_page(20, "page2")),
            Ok(empty_page()),
        ],
        3,
    );

    assert_eq!(rows.len(), 40);
    assert_eq!(outcome.rows, 40);
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.termination, Termination::Exhausted);
}

#[test]
fn fetch_error_halts_and_preserves_partial_results() {
    let (outcome, rows) = drive(
        vec![
            Ok(full_page(5, "page1")),
            Err(ScraperError::Status(503)),
        ],
        5,
    );

    assert_eq!(rows.len(), 5);
    assert_eq!(outcome.pages_fetched, 1);
    match &outcome.termination {
        Termination::FetchFailed(msg) => assert!(msg.contains("503")),
        other => panic!("expected FetchFailed, got {other:?}"),
    }
}

#[test]
fn page_limit_reached_terminates_cleanly() {
    let (outcome, rows) = drive(
        vec![
            Ok(full_page(3, "page1")),
            Ok(full_page(3, "page2")),
            Ok(full_page(3, "page3")),
        ],
        3,
    );

    assert_eq!(rows.len(), 9);
    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(outcome.termination, Termination::PageLimit);
}

#[test]
fn batches_arrive_in_fetch_order() {
    let (_, rows) = drive(
        vec![Ok(full_page(2, "a")), Ok(full_page(2, "b"))],
        2,
    );

    let names: Vec<&str> = rows.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["a 0", "a 1", "b 0", "b 1"]);
}

#[test]
fn page_with_only_skipped_containers_is_not_exhaustion() {
    // A page whose containers all fail field lookup is not "no more
    // pages": the driver records the skips and keeps going.
    let bad_card = String::from(
        r#"<div class="col s6 m4 l3"><p class="ad__card-description">No price here</p></div>"#,
    );
    let page_of_skips = crate::tests::utils::page_html(&[bad_card]);

    let (outcome, rows) = drive(
        vec![Ok(page_of_skips), Ok(full_page(4, "next"))],
        2,
    );

    assert_eq!(rows.len(), 4);
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.termination, Termination::PageLimit);
}

#[test]
fn callback_error_propagates() {
    let result = run_paginated(
        |_page| Ok(full_page(1, "x")),
        &ExtractionSchema::default(),
        "dogs",
        1,
        Duration::ZERO,
        |_batch| Err(ScraperError::Store("disk full".into())),
    );

    assert!(matches!(result, Err(ScraperError::Store(_))));
}
