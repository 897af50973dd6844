//! Translation bundles, lookup with fallback, and the coverage table.

pub mod bundles;
pub mod flatten;
pub mod language;
pub mod table;
pub mod translator;

use std::fmt;

pub use flatten::{FlatDict, flatten_object, lookup_path};
pub use language::Language;
pub use table::{LanguageCoverage, MISSING_MARKER, TranslationRow, TranslationTable};
pub use translator::{LocaleConfig, Localizer, Translator};

#[derive(Debug)]
pub enum I18nError {
    Unsupported(Language),
    Bundle { lang: Language, reason: String },
    TableShape { dictionaries: usize, names: usize },
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I18nError::Unsupported(lang) => write!(f, "Language {lang} is not in the supported set"),
            I18nError::Bundle { lang, reason } => write!(f, "Bad translation bundle for {lang}: {reason}"),
            I18nError::TableShape { dictionaries, names } => {
                write!(f, "{dictionaries} dictionaries but {names} column names")
            }
        }
    }
}

impl std::error::Error for I18nError {}
