use musicle_catalog::NO_OPUS_NUMBER;
use musicle_scraper::*;

const MINIMAL: &str = include_str!("fixtures/minimal_table.html");
const BEETHOVEN: &str = include_str!("fixtures/beethoven.html");

#[test]
fn minimal_table_skips_empty_opus_row() {
    let mut log = ScrapeLog::new();
    let works = extract_works("Ludwig van Beethoven", MINIMAL, &ComposerOverrides::default(), &mut log)
        .unwrap();

    assert_eq!(works.len(), 1);
    assert_eq!(works[0].work_title, "Symphony No. 5");
    assert_eq!(works[0].opus, "67");
    assert_eq!(works[0].opus_number, NO_OPUS_NUMBER);
    assert_eq!(works[0].composition_year, 1804);

    let skips: Vec<_> = log.skips_for("Ludwig van Beethoven").collect();
    assert_eq!(skips, vec![&RowSkip::EmptyOpus]);
}

#[test]
fn page_without_catalog_table_fails() {
    let mut log = ScrapeLog::new();
    let result = extract_works(
        "Ludwig van Beethoven",
        "<html><body><table class=\"wikitable\"><tr><th>Title</th></tr></table></body></html>",
        &ComposerOverrides::default(),
        &mut log,
    );
    assert!(matches!(result, Err(ScrapeError::TableNotFound)));
}

#[test]
fn beethoven_page() {
    let registry = ComposerRegistry::builtin();
    let mut log = ScrapeLog::new();
    let works = extract_works(
        "Ludwig van Beethoven",
        BEETHOVEN,
        registry.get("Ludwig van Beethoven"),
        &mut log,
    )
    .unwrap();

    let titles: Vec<&str> = works.iter().map(|w| w.work_title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Piano Trio No. 1 in E♭ major",
            "Piano Sonata No. 1 in F minor",
            "Septet",
            "Fidelio",
            "Piano Sonata No. 14 in C♯ minor",
            "Piano Sonata No. 14 in C♯ minor",
        ]
    );

    assert_eq!((works[0].opus.as_str(), works[0].opus_number), ("1", 1));
    assert_eq!(works[0].composition_year, 1794);
    assert_eq!(works[2].composition_year, 1799);
    assert_eq!(works[3].composition_year, 1805);
    assert_eq!(works[3].composer.first_name, "Ludwig");
    assert_eq!(works[3].composer.last_name, "Beethoven");

    let skips: Vec<_> = log.skips_for("Ludwig van Beethoven").cloned().collect();
    assert_eq!(
        skips,
        vec![
            RowSkip::GroupingPlaceholder,
            RowSkip::NoOpusPlaceholder,
            RowSkip::InvalidOpus("15/x".to_string()),
            RowSkip::NoYear,
        ]
    );
}

#[test]
fn hidden_annotation_does_not_leak_into_opus() {
    let mut log = ScrapeLog::new();
    let works = extract_works(
        "Ludwig van Beethoven",
        BEETHOVEN,
        &ComposerOverrides::default(),
        &mut log,
    )
    .unwrap();
    let sonata = works
        .iter()
        .find(|w| w.work_title.starts_with("Piano Sonata No. 1 "))
        .unwrap();
    assert_eq!(sonata.opus, "2");
    assert_eq!(sonata.opus_number, 1);
}

#[test]
fn post_process_runs_on_extracted_works() {
    let overrides = ComposerOverrides::new().post_process(overrides::Dedupe);
    let mut log = ScrapeLog::new();
    let works = extract_works("Ludwig van Beethoven", BEETHOVEN, &overrides, &mut log).unwrap();
    assert_eq!(works.len(), 5);
    assert_eq!(works[4].composition_year, 1801);
}

#[test]
fn works_filter_record_is_used_verbatim() {
    let html = r#"<table class="wikitable sortable">
        <tr><th>Opus</th><th>Title</th><th>Date</th></tr>
        <tr><td>22</td><td>Andante spianato et Grande polonaise brillante</td><td>1830–35</td></tr>
        <tr><td>22</td><td>E♭ major</td><td>1830</td></tr>
        <tr><td>23</td><td>Ballade No. 1</td><td>1835</td></tr>
    </table>"#;
    let registry = ComposerRegistry::builtin();
    let mut log = ScrapeLog::new();
    let works = extract_works("Frédéric Chopin", html, registry.get("Frédéric Chopin"), &mut log)
        .unwrap();

    assert_eq!(works.len(), 2);
    assert_eq!(works[0].composition_year, 1834);
    // No Key column: the numbered title is left as is.
    assert_eq!(works[1].work_title, "Ballade No. 1");
    assert_eq!(
        log.skips_for("Frédéric Chopin").collect::<Vec<_>>(),
        vec![&RowSkip::InvalidWork]
    );
}

#[test]
fn column_overrides_select_catalog_columns() {
    let html = r#"<table class="wikitable sortable">
        <tr><th>Lesure# (old)</th><th>Lesure# (new)</th><th>Title</th><th>Year</th></tr>
        <tr><td>86</td><td>CD 97</td><td>Prélude à l'après-midi d'un faune</td><td>1892–94</td></tr>
    </table>"#;
    let registry = ComposerRegistry::builtin();
    let mut log = ScrapeLog::new();
    let works = extract_works("Claude Debussy", html, registry.get("Claude Debussy"), &mut log)
        .unwrap();

    assert_eq!(works.len(), 1);
    assert_eq!(works[0].opus, "97");
    assert_eq!(works[0].composition_year, 1892);
}

#[test]
fn unmatched_opus_header_reads_first_column() {
    // Known quirk: with no opus header, column 0 is taken as the opus,
    // whatever it holds.
    let html = r#"<table class="wikitable sortable">
        <tr><th>Genre</th><th>Title</th><th>Date</th></tr>
        <tr><td>Piano</td><td>Für Elise</td><td>1810</td></tr>
    </table>"#;
    let mut log = ScrapeLog::new();
    let works = extract_works("Ludwig van Beethoven", html, &ComposerOverrides::default(), &mut log)
        .unwrap();
    assert_eq!(works[0].opus, "Piano");
}

#[test]
fn name_override_applies_to_all_records() {
    let html = r#"<table class="wikitable sortable">
        <tr><th>Opus</th><th>Title</th><th>Date</th></tr>
        <tr><td>23</td><td>Piano Concerto No. 1</td><td>1874–75</td></tr>
        <tr><td>37//2</td><td>The Seasons</td><td>1875–76</td></tr>
    </table>"#;
    let registry = ComposerRegistry::builtin();
    let mut log = ScrapeLog::new();
    let works = extract_works("Pyotr Tchaikovsky", html, registry.get("Pyotr Tchaikovsky"), &mut log)
        .unwrap();

    assert_eq!(works.len(), 2);
    assert!(works.iter().all(|w| w.composer.full_name == "Pyotr Ilyich Tchaikovsky"));
    assert_eq!((works[1].opus.as_str(), works[1].opus_number), ("37", 2));
}
