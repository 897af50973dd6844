use askama::Template;

use super::PageContext;
use crate::i18n::{LanguageCoverage, TranslationTable};

#[derive(Template)]
#[template(path = "locales/table.html")]
pub struct TranslationTableTemplate {
    pub ctx: PageContext,
    pub table: TranslationTable,
    pub coverage: Vec<LanguageCoverage>,
}
