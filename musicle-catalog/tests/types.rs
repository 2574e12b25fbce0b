use std::collections::HashSet;

use musicle_catalog::*;

fn beethoven() -> ComposerName {
    ComposerName::from_display("Ludwig van Beethoven")
}

#[test]
fn records_differing_only_in_year_are_equal() {
    let a = WorkRecord::new(beethoven(), "Piano Sonata No. 14", 1801, "27", 2);
    let b = WorkRecord::new(beethoven(), "Piano Sonata No. 14", 1802, "27", 2);
    assert_eq!(a, b);

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn records_differing_in_opus_number_are_distinct() {
    let a = WorkRecord::new(beethoven(), "Piano Sonata", 1801, "27", 1);
    let b = WorkRecord::new(beethoven(), "Piano Sonata", 1801, "27", 2);
    assert_ne!(a, b);
}

#[test]
fn records_differing_in_composer_are_distinct() {
    let a = WorkRecord::new(beethoven(), "Impromptu", 1827, "90", 1);
    let b = WorkRecord::new(
        ComposerName::from_display("Franz Schubert"),
        "Impromptu",
        1827,
        "90",
        1,
    );
    assert_ne!(a, b);
}

#[test]
fn naive_name_split_drops_particles() {
    let name = beethoven();
    assert_eq!(name.first_name, "Ludwig");
    assert_eq!(name.last_name, "Beethoven");
    assert_eq!(name.full_name, "Ludwig van Beethoven");
}

#[test]
fn single_token_name_uses_token_for_both_parts() {
    let name = ComposerName::from_display("Perotin");
    assert_eq!(name.first_name, "Perotin");
    assert_eq!(name.last_name, "Perotin");
}

#[test]
fn opus_label_includes_number_only_when_present() {
    let with = WorkRecord::new(beethoven(), "Sonata", 1801, "27", 2);
    let without = WorkRecord::new(beethoven(), "Sonata", 1801, "27", NO_OPUS_NUMBER);
    assert_eq!(with.opus_label(), "27/2");
    assert_eq!(without.opus_label(), "27");
    assert!(!without.has_opus_number());
}
