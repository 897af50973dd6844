use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::flatten::{FlatDict, flatten_object};
use super::table::TranslationTable;
use super::{I18nError, Language, bundles};

/// Column order of the translation table; rows follow the first bundle.
const TABLE_COLUMNS: [Language; 8] = [
    Language::En,
    Language::Vi,
    Language::Es,
    Language::Zh,
    Language::ZhTraditional,
    Language::Ja,
    Language::PtBr,
    Language::De,
];

/// Startup configuration for the translator.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub active: Language,
    pub fallback: Language,
    pub supported: Vec<Language>,
    pub bundles: Vec<(Language, Value)>,
}

impl LocaleConfig {
    /// German active and fallback language, every embedded bundle loaded.
    pub fn embedded() -> Result<Self, I18nError> {
        let bundles = bundles::embedded()
            .into_iter()
            .map(|(lang, raw)| {
                serde_json::from_str(raw)
                    .map(|v| (lang, v))
                    .map_err(|e| I18nError::Bundle { lang, reason: e.to_string() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            active: Language::De,
            fallback: Language::De,
            supported: Language::ALL.to_vec(),
            bundles,
        })
    }

    pub fn with_languages(mut self, active: Language, fallback: Language) -> Self {
        self.active = active;
        self.fallback = fallback;
        self
    }
}

/// Resolves translation keys for any supported language.
///
/// Built once at startup and shared through `web::Data`; tests build their
/// own instance.
#[derive(Debug)]
pub struct Translator {
    active: Language,
    fallback: Language,
    supported: Vec<Language>,
    resources: HashMap<Language, FlatDict>,
}

impl Translator {
    pub fn init(config: LocaleConfig) -> Result<Self, I18nError> {
        for lang in [config.active, config.fallback] {
            if !config.supported.contains(&lang) {
                return Err(I18nError::Unsupported(lang));
            }
        }

        let mut resources = HashMap::new();
        for (lang, bundle) in &config.bundles {
            if !config.supported.contains(lang) {
                log::warn!("Ignoring bundle for unsupported language {lang}");
                continue;
            }
            if !bundle.is_object() {
                return Err(I18nError::Bundle {
                    lang: *lang,
                    reason: "top level must be an object".to_string(),
                });
            }
            resources.insert(*lang, flatten_object(bundle));
        }

        for lang in &config.supported {
            if !resources.contains_key(lang) {
                log::warn!("No translation bundle registered for {lang}");
                resources.insert(*lang, FlatDict::default());
            }
        }

        log::info!(
            "Translations ready: active={}, fallback={}, {} languages",
            config.active,
            config.fallback,
            config.supported.len()
        );

        Ok(Self {
            active: config.active,
            fallback: config.fallback,
            supported: config.supported,
            resources,
        })
    }

    pub fn active(&self) -> Language {
        self.active
    }

    pub fn fallback(&self) -> Language {
        self.fallback
    }

    pub fn supported(&self) -> &[Language] {
        &self.supported
    }

    pub fn is_supported(&self, lang: Language) -> bool {
        self.supported.contains(&lang)
    }

    /// Translate with the process-wide active language.
    pub fn t(&self, key: &str) -> String {
        self.t_in(self.active, key)
    }

    /// Translate: requested language, then fallback, then the raw key.
    pub fn t_in(&self, lang: Language, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(self.fallback, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Translate and substitute `{{name}}` placeholders verbatim.
    pub fn t_with(&self, lang: Language, key: &str, args: &[(&str, String)]) -> String {
        let mut text = self.t_in(lang, key);
        for (name, value) in args {
            text = text.replace(&format!("{{{{{name}}}}}"), value);
        }
        text
    }

    fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.resources.get(&lang)?.get(key)
    }

    pub fn dictionary(&self, lang: Language) -> Option<&FlatDict> {
        self.resources.get(&lang)
    }

    /// Coverage table with English as the reference column. Indonesian is
    /// not part of the QA table.
    pub fn translation_table(&self) -> Result<TranslationTable, I18nError> {
        let order: Vec<Language> = TABLE_COLUMNS
            .iter()
            .copied()
            .filter(|l| self.resources.contains_key(l))
            .collect();

        let dicts: Vec<&FlatDict> = order.iter().filter_map(|l| self.resources.get(l)).collect();
        let names: Vec<&str> = order.iter().map(|l| l.display_name()).collect();
        TranslationTable::build(&dicts, &names)
    }
}

/// A translator bound to one request's language; what templates call `t` on.
#[derive(Debug, Clone)]
pub struct Localizer {
    translator: Arc<Translator>,
    lang: Language,
}

impl Localizer {
    pub fn new(translator: Arc<Translator>, lang: Language) -> Self {
        Self { translator, lang }
    }

    pub fn lang(&self) -> Language {
        self.lang
    }

    pub fn languages(&self) -> &[Language] {
        self.translator.supported()
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.t_in(self.lang, key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, String)]) -> String {
        self.translator.t_with(self.lang, key, args)
    }
}
