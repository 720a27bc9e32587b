use optcg_export::ExportError;

use super::*;
use crate::report::WalkSummary;
use crate::test_support::{BASE, CARDS_HTML, FakeImages, FakeSite, test_config};

#[test]
fn packs_in_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let out = walker.packs("text").unwrap();
    assert_eq!(
        out,
        "  OP-01, 556101, ROMANCE DAWN, BOOSTER PACK\n  ST-01, 556104, Straw Hat Crew, STARTER DECK\n  OP-02, 556102, PARAMOUNT WAR, BOOSTER PACK\n  None, 556901, Promotion card, None"
    );
    assert_eq!(*site.calls.borrow(), vec![(format!("{BASE}/cardlist"), None)]);
}

#[test]
fn invalid_format_fails_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let err = walker.packs("xml").unwrap_err();
    assert!(matches!(err, ScrapeError::Export(ExportError::InvalidFormat { .. })));
    assert!(err.is_request_fatal());

    assert!(walker.packs("img").is_err());
    assert!(walker.cards("556101", "pdf").is_err());
    assert!(walker.fetch_all("yaml").is_err());
    assert_eq!(site.call_count(), 0);
}

#[test]
fn cards_without_series_is_a_precondition_failure() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let err = walker.cards("  ", "json").unwrap_err();
    assert!(matches!(err, ScrapeError::MissingSeries));
    assert!(err.is_request_fatal());
    assert_eq!(site.call_count(), 0);

    // Format problems are reported first.
    let err = walker.cards("", "xml").unwrap_err();
    assert!(matches!(err, ScrapeError::Export(_)));
}

#[test]
fn cards_for_one_pack_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let out = walker.cards("556101", "csv").unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("\"id\",\"code\",\"rarity\""));
    assert!(lines[1].starts_with("\"OP01-001\",\"OP01-001\",\"L\",\"LEADER\""));
    assert_eq!(
        *site.calls.borrow(),
        vec![(format!("{BASE}/cardlist/"), Some("556101".to_string()))]
    );
}

#[test]
fn cards_fetch_failure_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let err = walker.cards("556102", "text").unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch(_)));
    assert!(!err.is_request_fatal());
}

#[test]
fn cards_as_images_downloads_into_image_dir() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let config = test_config(dir.path());
    let image_dir = config.image_dir.clone();
    let walker = CatalogWalker::new(&site, &images, config);

    let out = walker.cards("556101", "img").unwrap();
    assert_eq!(
        out,
        format!("DONE downloading images to {}", image_dir.display())
    );
    assert_eq!(images.stored.borrow().len(), 4);
    assert!(image_dir.join("OP01-001_p1.jpg").exists());
}

#[test]
fn fetch_all_writes_one_file_per_usable_pack() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let config = test_config(dir.path());
    let output_dir = config.output_dir.clone();
    let walker = CatalogWalker::new(&site, &images, config);

    let report = walker.fetch_all_report("json").unwrap();
    assert_eq!(
        report.message(),
        format!("DONE writing json files to {}", output_dir.display())
    );

    let written = std::fs::read_to_string(output_dir.join("OP-01.json")).unwrap();
    let cards: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 4);
    assert!(!output_dir.join("ST-01.json").exists());
    assert!(!output_dir.join("OP-02.json").exists());
    assert!(!output_dir.join("None.json").exists());

    assert_eq!(
        report.summary(),
        WalkSummary {
            exported: 1,
            skipped: 2,
            failed: 1,
            cards: 4,
            ..Default::default()
        }
    );
    let codes: Vec<&str> = report.entries().iter().map(|e| e.code()).collect();
    assert_eq!(codes, ["OP-01", "ST-01", "OP-02", "None"]);
}

#[test]
fn fetch_all_never_requests_unusable_packs() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    walker.fetch_all("text").unwrap();
    assert_eq!(site.requested_series(), ["556101", "556104", "556102"]);
    assert_eq!(site.call_count(), 4);
}

#[test]
fn fetch_all_fails_when_pack_list_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::default();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let err = walker.fetch_all("csv").unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch(_)));
}

#[test]
fn fetch_all_images_skip_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let config = test_config(dir.path());
    let (image_dir, output_dir) = (config.image_dir.clone(), config.output_dir.clone());
    let walker = CatalogWalker::new(&site, &images, config);

    let message = walker.fetch_all("img").unwrap();
    assert_eq!(
        message,
        format!("DONE downloading images to {}", image_dir.display())
    );
    assert!(image_dir.join("OP01-029.jpg").exists());
    assert!(!output_dir.exists());

    // Second run finds every file already present.
    let report = walker.fetch_all_report("img").unwrap();
    match &report.entries()[0] {
        PackEntry::Images { images: summary, .. } => {
            assert_eq!(summary.stored, 0);
            assert_eq!(summary.skipped, 4);
        }
        other => panic!("unexpected entry: {other:?}"),
    }
}

#[test]
fn write_failure_does_not_abort_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    // A regular file where the output directory should be.
    std::fs::write(&config.output_dir, b"not a directory").unwrap();

    let site = FakeSite::catalog().with_cards("556104", CARDS_HTML);
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, config);

    let report = walker.fetch_all_report("text").unwrap();
    let summary = report.summary();
    assert_eq!(summary.exported, 0);
    assert_eq!(summary.failed, 3);
    assert_eq!(site.requested_series(), ["556101", "556104", "556102"]);
}

#[test]
fn progress_events_bracket_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let (tx, rx) = mpsc::channel();
    let walker =
        CatalogWalker::new(&site, &images, test_config(dir.path())).with_events(tx);

    walker.fetch_all("csv").unwrap();
    drop(walker);
    let events: Vec<WalkEvent> = rx.iter().collect();

    assert!(matches!(events.first(), Some(WalkEvent::FetchingPacks)));
    assert!(matches!(events.get(1), Some(WalkEvent::PacksFound { total: 4 })));
    assert!(matches!(events.last(), Some(WalkEvent::Done)));
    let completed = events
        .iter()
        .filter(|e| matches!(e, WalkEvent::PackCompleted { cards: 4, .. }))
        .count();
    let skipped = events
        .iter()
        .filter(|e| matches!(e, WalkEvent::PackSkipped { .. }))
        .count();
    let failed = events
        .iter()
        .filter(|e| matches!(e, WalkEvent::PackFailed { .. }))
        .count();
    assert_eq!((completed, skipped, failed), (1, 2, 1));
}

#[test]
fn debug_mode_dumps_fetched_pages() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let config = test_config(dir.path()).with_debug(true);
    let debug_dir = config.debug_dir.clone();
    let walker = CatalogWalker::new(&site, &images, config);

    walker.cards("556101", "text").unwrap();
    walker.packs("json").unwrap();
    assert!(debug_dir.join("cards_556101.html").exists());
    let dumped = std::fs::read_to_string(debug_dir.join("packs_data.html")).unwrap();
    assert!(dumped.contains("ROMANCE DAWN"));
}

#[test]
fn report_file_lists_every_pack() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::catalog();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));

    let report = walker.fetch_all_report("text").unwrap();
    let path = dir.path().join("report.txt");
    report.write_to_file(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[OK] OP-01 (556101) -> 4 cards"));
    assert!(contents.contains("[SKIPPED] ST-01 (556104): no cards found"));
    assert!(contents.contains("[ERROR] OP-02 (556102)"));
    assert!(contents.contains("[SKIPPED] None (556901)"));
}

#[test]
fn pack_file_names_are_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::default();
    let images = FakeImages::default();
    let walker = CatalogWalker::new(&site, &images, test_config(dir.path()));
    let pack = Pack::from_title("Extra - Odd/Code - [EB/01]", "1").unwrap();
    assert_eq!(
        walker.pack_file_path(&pack, OutputFormat::Csv),
        dir.path().join("packs").join("EB_01.csv")
    );
}
