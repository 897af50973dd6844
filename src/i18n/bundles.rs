use super::Language;

/// Raw JSON for every bundled language, compiled into the binary.
pub fn embedded() -> Vec<(Language, &'static str)> {
    Language::ALL
        .into_iter()
        .map(|lang| (lang, source(lang)))
        .collect()
}

fn source(lang: Language) -> &'static str {
    match lang {
        Language::En => include_str!("../../locales/en.json"),
        Language::Zh => include_str!("../../locales/zh.json"),
        Language::ZhTraditional => include_str!("../../locales/zh-traditional.json"),
        Language::Id => include_str!("../../locales/id.json"),
        Language::Ja => include_str!("../../locales/ja.json"),
        Language::Es => include_str!("../../locales/es.json"),
        Language::Vi => include_str!("../../locales/vi.json"),
        Language::PtBr => include_str!("../../locales/pt-br.json"),
        Language::De => include_str!("../../locales/de.json"),
    }
}
