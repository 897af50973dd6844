//! Locale bootstrap and translation table tests against the shipped bundles.

use responder_admin::i18n::{
    LocaleConfig, Language, MISSING_MARKER, TranslationTable, Translator, flatten_object, lookup_path,
};

fn shipped() -> Translator {
    Translator::init(LocaleConfig::embedded().expect("bundles parse")).expect("translator init")
}

#[test]
fn test_every_language_ships_a_bundle() {
    let config = LocaleConfig::embedded().unwrap();
    for lang in Language::ALL {
        assert!(
            config.bundles.iter().any(|(l, v)| *l == lang && v.is_object()),
            "no bundle for {lang}"
        );
    }
}

#[test]
fn test_defaults_are_german() {
    let t = shipped();
    assert_eq!(t.active(), Language::De);
    assert_eq!(t.fallback(), Language::De);
    assert_eq!(t.t("feedback.title"), "Feedback-Einblicke");
}

#[test]
fn test_partial_bundle_falls_back_then_returns_key() {
    let t = shipped();
    // ja does not translate the locale-table strings
    assert_eq!(t.t_in(Language::Ja, "locales.download"), t.t_in(Language::De, "locales.download"));
    assert_eq!(t.t_in(Language::Ja, "no.such.key"), "no.such.key");
}

#[test]
fn test_placeholders_are_substituted_verbatim() {
    let t = shipped();
    let msg = t.t_with(Language::En, "feedback.errorLoading", &[("message", "<b>502</b>".into())]);
    assert_eq!(msg, "Error loading feedback data: <b>502</b>");
}

#[test]
fn test_flattened_keys_resolve_in_source_bundle() {
    let config = LocaleConfig::embedded().unwrap();
    for (lang, bundle) in &config.bundles {
        let flat = flatten_object(bundle);
        assert!(!flat.is_empty(), "{lang} bundle is empty");
        for (key, value) in flat.iter() {
            assert_eq!(lookup_path(bundle, key), Some(value), "{lang}: {key}");
        }
    }
}

#[test]
fn test_table_uses_english_reference_column_and_key_order() {
    let t = shipped();
    let table = t.translation_table().unwrap();
    assert_eq!(
        table.languages,
        vec!["English", "Tiếng Việt", "Español", "简体中文", "繁體中文", "日本語", "Português BR", "Deutsch"]
    );

    let en = t.dictionary(Language::En).unwrap();
    let first_keys: Vec<&str> = table.rows.iter().take(en.len()).map(|r| r.key.as_str()).collect();
    let en_keys: Vec<&str> = en.keys().collect();
    assert_eq!(first_keys, en_keys);

    for row in &table.rows {
        assert!(!row.is_missing(0), "English bundle lacks {}", row.key);
    }
}

#[test]
fn test_missing_cells_use_marker_and_lower_coverage() {
    let t = shipped();
    let table: TranslationTable = t.translation_table().unwrap();
    let ja = table.languages.iter().position(|l| l == "日本語").unwrap();

    let missing = table.missing_keys(ja);
    assert!(missing.contains(&"locales.download"));
    let row = table.rows.iter().find(|r| r.key == "locales.download").unwrap();
    assert_eq!(row.cell(ja), MISSING_MARKER);

    let coverage = table.coverage();
    assert_eq!(coverage[0].name, "English");
    assert_eq!(coverage[0].percent(), 100);
    assert!(coverage[ja].percent() < 100);
}
