use std::collections::HashSet;

use super::I18nError;
use super::flatten::FlatDict;

/// Marker rendered for a key a language does not translate.
pub const MISSING_MARKER: &str = "not-found";

#[derive(Debug, Clone)]
pub struct TranslationRow {
    pub key: String,
    /// One cell per language, in column order; `None` when missing.
    pub values: Vec<Option<String>>,
}

impl TranslationRow {
    pub fn cell(&self, i: usize) -> &str {
        self.values
            .get(i)
            .and_then(|v| v.as_deref())
            .unwrap_or(MISSING_MARKER)
    }

    pub fn is_missing(&self, i: usize) -> bool {
        !matches!(self.values.get(i), Some(Some(_)))
    }
}

#[derive(Debug, Clone)]
pub struct LanguageCoverage {
    pub name: String,
    pub present: usize,
    pub total: usize,
}

impl LanguageCoverage {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.present as f64 / self.total as f64) * 100.0).floor() as u32
    }
}

/// Cross-language lookup table used for translation QA.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    pub languages: Vec<String>,
    pub rows: Vec<TranslationRow>,
}

impl TranslationTable {
    /// Build one row per key across all dictionaries.
    ///
    /// Keys follow the first dictionary's order; keys only present in later
    /// dictionaries are appended in the order they are first met.
    pub fn build(dicts: &[&FlatDict], names: &[&str]) -> Result<Self, I18nError> {
        if dicts.len() != names.len() {
            return Err(I18nError::TableShape {
                dictionaries: dicts.len(),
                names: names.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for dict in dicts {
            for key in dict.keys() {
                if seen.insert(key) {
                    keys.push(key);
                }
            }
        }

        let rows = keys
            .into_iter()
            .map(|key| TranslationRow {
                key: key.to_string(),
                values: dicts.iter().map(|d| d.get(key).map(str::to_string)).collect(),
            })
            .collect();

        Ok(Self {
            languages: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    pub fn coverage(&self) -> Vec<LanguageCoverage> {
        let total = self.rows.len();
        self.languages
            .iter()
            .enumerate()
            .map(|(i, name)| LanguageCoverage {
                name: name.clone(),
                present: self.rows.iter().filter(|r| !r.is_missing(i)).count(),
                total,
            })
            .collect()
    }

    /// Keys the given column does not translate.
    pub fn missing_keys(&self, column: usize) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.is_missing(column))
            .map(|r| r.key.as_str())
            .collect()
    }

    pub fn to_csv(&self) -> String {
        fn escape_csv(s: &str) -> String {
            if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.to_string()
            }
        }

        let mut csv = String::from("key");
        for name in &self.languages {
            csv.push(',');
            csv.push_str(&escape_csv(name));
        }
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(&escape_csv(&row.key));
            for i in 0..self.languages.len() {
                csv.push(',');
                csv.push_str(&escape_csv(row.cell(i)));
            }
            csv.push('\n');
        }
        csv
    }
}
