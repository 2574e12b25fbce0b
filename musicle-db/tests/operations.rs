use musicle_catalog::{ComposerName, WorkRecord};
use musicle_db::*;

fn grieg() -> ComposerName {
    ComposerName::from_display("Edvard Grieg")
}

fn work(title: &str, year: i32, opus: &str, number: i32) -> WorkRecord {
    WorkRecord::new(grieg(), title, year, opus, number)
}

#[test]
fn composer_is_created_once() {
    let conn = open_memory().unwrap();
    let (id, created) = upsert_composer(&conn, &grieg()).unwrap();
    assert!(created);

    let (again, created) = upsert_composer(&conn, &grieg()).unwrap();
    assert_eq!(id, again);
    assert!(!created);
}

#[test]
fn composers_differing_in_any_name_part_are_distinct() {
    let conn = open_memory().unwrap();
    let (a, _) = upsert_composer(&conn, &ComposerName::from_display("Pyotr Tchaikovsky")).unwrap();
    let (b, _) = upsert_composer(
        &conn,
        &ComposerName::from_display("Pyotr Ilyich Tchaikovsky"),
    )
    .unwrap();
    assert_ne!(a, b);
}

#[test]
fn work_is_created_then_rescanned() {
    let conn = open_memory().unwrap();
    let (composer_id, _) = upsert_composer(&conn, &grieg()).unwrap();
    let concerto = work("Piano Concerto", 1868, "16", -1);

    assert!(upsert_work(&conn, composer_id, &concerto).unwrap());
    assert!(!upsert_work(&conn, composer_id, &concerto).unwrap());

    let works = works_for_composer(&conn, composer_id).unwrap();
    assert_eq!(works.len(), 1);
    assert_eq!(works[0].opus, "16");
    assert_eq!(works[0].opus_number, -1);
    assert!(works[0].last_scanned.is_some());
}

#[test]
fn same_work_with_other_year_is_duplicate() {
    let conn = open_memory().unwrap();
    let (composer_id, _) = upsert_composer(&conn, &grieg()).unwrap();

    upsert_work(&conn, composer_id, &work("Holberg Suite", 1884, "40", -1)).unwrap();
    let err = upsert_work(&conn, composer_id, &work("Holberg Suite", 1885, "40", -1)).unwrap_err();

    assert!(matches!(err, OperationError::Duplicate(ref msg) if msg == "Holberg Suite (40)"));
    assert_eq!(works_for_composer(&conn, composer_id).unwrap().len(), 1);
}

#[test]
fn long_titles_are_truncated() {
    let conn = open_memory().unwrap();
    let (composer_id, _) = upsert_composer(&conn, &grieg()).unwrap();
    let long = "Å".repeat(250);

    upsert_work(&conn, composer_id, &work(&long, 1870, "1", -1)).unwrap();
    // The same long title maps onto the stored truncated row.
    assert!(!upsert_work(&conn, composer_id, &work(&long, 1870, "1", -1)).unwrap());

    let stored = &works_for_composer(&conn, composer_id).unwrap()[0].work_title;
    assert_eq!(stored.chars().count(), MAX_TITLE_LEN);
    assert!(stored.ends_with("..."));
}

#[test]
fn truncate_title_boundaries() {
    let exact = "a".repeat(200);
    assert_eq!(truncate_title(&exact), exact);

    let over = "a".repeat(201);
    let cut = truncate_title(&over);
    assert_eq!(cut.len(), 200);
    assert_eq!(&cut[..197], &over[..197]);
}
