use super::*;
use crate::overrides::PostProcessor;

#[test]
fn unconfigured_composer_gets_default_bundle() {
    let registry = ComposerRegistry::builtin();
    let overrides = registry.get("Johann Sebastian Bach");
    assert!(overrides.capabilities().is_empty());
    assert!(!registry.is_configured("Johann Sebastian Bach"));
    assert!(overrides.is_opus_column("Opus"));
    assert!(overrides.is_date_column("Date"));
}

#[test]
fn builtin_capabilities() {
    let registry = ComposerRegistry::builtin();
    assert_eq!(
        registry.get("Pyotr Tchaikovsky").capabilities(),
        vec!["opus", "name", "dedupe"]
    );
    assert_eq!(
        registry.get("Claude Debussy").capabilities(),
        vec!["opus", "opus-col", "date-col"]
    );
    assert_eq!(registry.get("George Frideric Handel").capabilities(), vec!["page"]);
}

/// Keeps only the first work.
struct FirstOnly;

impl PostProcessor for FirstOnly {
    fn post_process(&self, mut works: Vec<WorkRecord>) -> Vec<WorkRecord> {
        works.truncate(1);
        works
    }
}

#[test]
fn post_process_capability_uses_step_label() {
    let overrides = ComposerOverrides::new().post_process(FirstOnly);
    assert_eq!(overrides.capabilities(), vec!["post"]);

    let overrides = ComposerOverrides::new().post_process(Dedupe);
    assert_eq!(overrides.capabilities(), vec!["dedupe"]);
}

#[test]
fn column_overrides_replace_defaults() {
    let registry = ComposerRegistry::builtin();
    let debussy = registry.get("Claude Debussy");
    assert!(debussy.is_opus_column("Lesure# (new)"));
    assert!(!debussy.is_opus_column("Opus"));
    assert!(debussy.is_date_column("Year"));
    assert!(!debussy.is_date_column("Date"));
}

#[test]
fn mozart_drops_alternate_number() {
    assert_eq!(
        MozartOpus.parse_opus("K. 331/300i").unwrap(),
        OpusParts::unnumbered("K. 331")
    );
    assert_eq!(MozartOpus.parse_opus("K. 525").unwrap(), OpusParts::unnumbered("K. 525"));
}

#[test]
fn tchaikovsky_double_slash() {
    assert_eq!(TchaikovskyOpus.parse_opus("37//2").unwrap(), OpusParts::new("37", 2));
    assert!(TchaikovskyOpus.parse_opus("37/b").is_err());
}

#[test]
fn stripped_prefixes() {
    let schubert = ComposerRegistry::builtin();
    let schubert = schubert.get("Franz Schubert");
    assert_eq!(schubert.parse_opus("D. 759*").unwrap(), OpusParts::unnumbered("759"));
    assert_eq!(
        StrippedOpus(&["Op."]).parse_opus("Op. 118/2").unwrap(),
        OpusParts::new("118", 2)
    );
}

#[test]
fn tchaikovsky_display_name() {
    let registry = ComposerRegistry::builtin();
    let name = registry.get("Pyotr Tchaikovsky").composer_name("Pyotr Tchaikovsky");
    assert_eq!(name.full_name, "Pyotr Ilyich Tchaikovsky");
    assert_eq!(name.first_name, "Pyotr");
    assert_eq!(name.last_name, "Tchaikovsky");
}

#[test]
fn chopin_filter() {
    assert_eq!(ChopinWorks.filter_work("E♭ major", "22"), Err(InvalidWork));
    assert_eq!(ChopinWorks.filter_work("G major", ""), Err(InvalidWork));
    assert_eq!(ChopinWorks.filter_work("Ballade No. 1", "23"), Ok(None));

    let work = ChopinWorks.filter_work(ANDANTE_SPIANATO, "22").unwrap().unwrap();
    assert_eq!(work.composition_year, 1834);
    assert_eq!(work.opus, "22");
    assert!(!work.has_opus_number());
    assert_eq!(work.composer.full_name, "Frédéric Chopin");
}

#[test]
fn schubert_filter() {
    assert_eq!(SchubertWorks.filter_work("Fragment", "D. Anh. I/8"), Err(InvalidWork));
    assert_eq!(SchubertWorks.filter_work("Lied", "deest"), Err(InvalidWork));
    assert_eq!(SchubertWorks.filter_work("Erlkönig", "D. 328"), Ok(None));
}
