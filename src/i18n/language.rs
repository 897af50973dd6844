use std::fmt;

/// Languages the console ships bundles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Zh,
    ZhTraditional,
    Id,
    Ja,
    Es,
    Vi,
    PtBr,
    De,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::En,
        Language::Zh,
        Language::ZhTraditional,
        Language::Id,
        Language::Ja,
        Language::Es,
        Language::Vi,
        Language::PtBr,
        Language::De,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::ZhTraditional => "zh-TRADITIONAL",
            Language::Id => "id",
            Language::Ja => "ja",
            Language::Es => "es",
            Language::Vi => "vi",
            Language::PtBr => "pt-BR",
            Language::De => "de",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "简体中文",
            Language::ZhTraditional => "繁體中文",
            Language::Id => "Indonesia",
            Language::Ja => "日本語",
            Language::Es => "Español",
            Language::Vi => "Tiếng Việt",
            Language::PtBr => "Português BR",
            Language::De => "Deutsch",
        }
    }

    /// Parse a language code, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
