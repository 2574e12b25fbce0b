use super::*;
use crate::overrides::HeaderIs;

fn beethoven() -> ComposerName {
    ComposerName::from_display("Ludwig van Beethoven")
}

fn layout(headers: &[&str]) -> ColumnLayout {
    ColumnLayout::from_headers(headers, &ComposerOverrides::default())
}

// -- Column layout --

#[test]
fn layout_finds_default_headers() {
    let l = layout(&["Opus", "Title", "Key", "Date"]);
    assert_eq!(
        l,
        ColumnLayout {
            title: Some(1),
            date: Some(3),
            key: Some(2),
            opus: 0,
        }
    );
}

#[test]
fn layout_opus_defaults_to_first_column() {
    // Pages without an opus header read the opus from column 0, even when
    // that column is something else entirely.
    let l = layout(&["Genre", "Title", "Date", "Catalog"]);
    assert_eq!(l.opus, 0);
    assert_eq!(l.title, Some(1));
}

#[test]
fn layout_first_match_wins() {
    let l = layout(&["Title", "Opus", "Date", "Title", "Date"]);
    assert_eq!(l.title, Some(0));
    assert_eq!(l.date, Some(2));
    assert_eq!(l.opus, 1);
}

#[test]
fn layout_uses_column_overrides() {
    let overrides = ComposerOverrides::new()
        .opus_column(HeaderIs("Lesure# (new)"))
        .date_column(HeaderIs("Year"));
    let l = ColumnLayout::from_headers(&["Title", "Lesure# (new)", "Date", "Year"], &overrides);
    assert_eq!(l.opus, 1);
    assert_eq!(l.date, Some(3));
}

#[test]
fn layout_headers_are_trimmed() {
    let l = layout(&[" Opus ", "Title\n", "Date"]);
    assert_eq!(l.title, Some(1));
    assert_eq!(l.opus, 0);
}

// -- Rows --

fn standard() -> ColumnLayout {
    layout(&["Opus", "Title", "Key", "Date"])
}

fn normalize(cells: &[&str]) -> Result<WorkRecord, RowSkip> {
    let row = RawTableRow::new(cells.iter().copied());
    normalize_row(&row, &standard(), &beethoven(), &ComposerOverrides::default())
}

#[test]
fn row_becomes_work() {
    let work = normalize(&["27/2", "Piano Sonata No. 14", "C♯ minor", "1801"]).unwrap();
    assert_eq!(work.work_title, "Piano Sonata No. 14 in C♯ minor");
    assert_eq!(work.opus, "27");
    assert_eq!(work.opus_number, 2);
    assert_eq!(work.composition_year, 1801);
    assert_eq!(work.composer.last_name, "Beethoven");
}

#[test]
fn row_skip_reasons() {
    assert_eq!(normalize(&["", "Fidelio", "", "1805"]), Err(RowSkip::EmptyOpus));
    assert_eq!(
        normalize(&["—", "Fidelio", "", "1805"]),
        Err(RowSkip::NoOpusPlaceholder)
    );
    assert_eq!(normalize(&["72"]), Err(RowSkip::ShortRow));
    assert_eq!(normalize(&["72", "", "", "1805"]), Err(RowSkip::EmptyTitle));
    assert_eq!(
        normalize(&["1", "Piano Trios (3)", "", "1795"]),
        Err(RowSkip::GroupingPlaceholder)
    );
    assert_eq!(
        normalize(&["15/abc", "Concerto", "", "1795"]),
        Err(RowSkip::InvalidOpus("15/abc".to_string()))
    );
    assert_eq!(normalize(&["72", "Fidelio", "", "—"]), Err(RowSkip::NoYear));
}

#[test]
fn missing_date_cell_is_no_year() {
    assert_eq!(normalize(&["72", "Fidelio", ""]), Err(RowSkip::NoYear));
}

#[test]
fn empty_row_is_short() {
    assert_eq!(normalize(&[]), Err(RowSkip::ShortRow));
}
