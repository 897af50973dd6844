use std::collections::HashMap;

use serde_json::Value;

/// A translation dictionary flattened to dotted keys, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FlatDict {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FlatDict {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

/// Flatten a nested dictionary into dotted-path keys.
///
/// Objects and arrays are walked recursively (array elements use their
/// index as the path segment). Only string leaves are kept; numbers,
/// booleans and nulls are skipped.
pub fn flatten_object(value: &Value) -> FlatDict {
    let mut out = FlatDict::default();
    walk(value, "", &mut out);
    out
}

fn walk(value: &Value, prefix: &str, out: &mut FlatDict) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, &join(prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                walk(child, &join(prefix, &i.to_string()), out);
            }
        }
        Value::String(s) => out.insert(prefix.to_string(), s.clone()),
        other => log::debug!("Skipping non-string translation leaf '{prefix}': {other}"),
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Resolve a dotted path against the nested (unflattened) dictionary.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    let mut node = value;
    for segment in path.split('.') {
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    node.as_str()
}
