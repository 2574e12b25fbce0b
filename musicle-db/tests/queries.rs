use musicle_catalog::{ComposerName, WorkRecord};
use musicle_db::*;

fn seed(conn: &rusqlite::Connection) {
    let ravel = ComposerName::from_display("Maurice Ravel");
    let faure = ComposerName::from_display("Gabriel Fauré");
    let (ravel_id, _) = upsert_composer(conn, &ravel).unwrap();
    let (faure_id, _) = upsert_composer(conn, &faure).unwrap();
    upsert_work(conn, ravel_id, &WorkRecord::new(ravel.clone(), "Boléro", 1928, "81", -1)).unwrap();
    upsert_work(conn, ravel_id, &WorkRecord::new(ravel, "Pavane", 1899, "19", -1)).unwrap();
    upsert_work(conn, faure_id, &WorkRecord::new(faure, "Requiem", 1887, "48", -1)).unwrap();
}

#[test]
fn composers_listed_by_last_name_with_counts() {
    let conn = open_memory().unwrap();
    seed(&conn);

    let composers = list_composers(&conn).unwrap();
    let summary: Vec<(&str, i64)> = composers
        .iter()
        .map(|c| (c.last_name.as_str(), c.works))
        .collect();
    assert_eq!(summary, vec![("Fauré", 1), ("Ravel", 2)]);
}

#[test]
fn find_composer_by_full_name() {
    let conn = open_memory().unwrap();
    seed(&conn);

    let ravel = find_composer(&conn, "Maurice Ravel").unwrap().unwrap();
    assert_eq!(ravel.works, 2);
    assert_eq!(ravel.first_name, "Maurice");
    assert!(find_composer(&conn, "Erik Satie").unwrap().is_none());

    let titles: Vec<String> = works_for_composer(&conn, ravel.id)
        .unwrap()
        .into_iter()
        .map(|w| w.work_title)
        .collect();
    assert_eq!(titles, vec!["Boléro", "Pavane"]);
}

#[test]
fn stats() {
    let conn = open_memory().unwrap();
    let empty = catalog_stats(&conn).unwrap();
    assert_eq!(empty.composers, 0);
    assert_eq!(empty.earliest_year, None);

    seed(&conn);
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.composers, 2);
    assert_eq!(stats.works, 3);
    assert_eq!(stats.earliest_year, Some(1887));
    assert_eq!(stats.latest_year, Some(1928));
    assert!(stats.last_scanned.is_some());
}
