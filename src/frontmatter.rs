//! Front-matter separation — splits an optional `---` delimited metadata
//! prologue off the document body.
//!
//! The separator never fails: a missing or malformed prologue yields empty
//! metadata and the whole input as body.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Document metadata as flat key → value strings, preserving the order the
/// keys were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// First value declared for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
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

    fn push(&mut self, key: String, value: String) {
        self.entries.push((key, value));
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// CRLF-tolerant: `---` delimiter lines may carry trailing spaces and any
// line-ending style.
static FRONT_MATTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*(?:\r?\n)+(.*?)(?:\r?\n)+---[ \t]*(?:\r?\n)+(.*)\z").unwrap()
});

/// Split raw document text into (metadata, body).
///
/// Metadata lines are `key: value` pairs split at the first colon, with one
/// layer of surrounding single or double quotes stripped from the value.
/// Lines that don't yield both a non-empty key and value are skipped. The
/// body comes back with leading/trailing blank lines trimmed.
pub fn split_front_matter(raw: &str) -> (Metadata, String) {
    let Some(caps) = FRONT_MATTER.captures(raw) else {
        return (Metadata::default(), raw.trim().to_string());
    };

    let mut metadata = Metadata::default();
    for line in caps[1].lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());
        if !key.is_empty() && !value.is_empty() {
            metadata.push(key.to_string(), value.to_string());
        }
    }

    (metadata, caps[2].trim().to_string())
}

/// Strip one leading and one trailing quote character, independently.
fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_metadata_and_body() {
        let raw = "---\ntitle: Asa Branca\nartist: Luiz Gonzaga\n---\n\n# Intro\nbody";
        let (meta, body) = split_front_matter(raw);
        assert_eq!(meta.get("title"), Some("Asa Branca"));
        assert_eq!(meta.get("artist"), Some("Luiz Gonzaga"));
        assert_eq!(body, "# Intro\nbody");
    }

    #[test]
    fn preserves_declaration_order() {
        let raw = "---\nz: 1\na: 2\nm: 3\n---\nbody";
        let (meta, _) = split_front_matter(raw);
        let keys: Vec<&str> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn tolerates_crlf_delimiters() {
        let raw = "--- \r\ntitle: Song\r\n---\r\nbody line";
        let (meta, body) = split_front_matter(raw);
        assert_eq!(meta.get("title"), Some("Song"));
        assert_eq!(body, "body line");
    }

    #[test]
    fn strips_one_layer_of_quotes() {
        let raw = "---\ntitle: \"Quoted\"\nkey: 'Em'\n---\nbody";
        let (meta, _) = split_front_matter(raw);
        assert_eq!(meta.get("title"), Some("Quoted"));
        assert_eq!(meta.get("key"), Some("Em"));
    }

    #[test]
    fn splits_value_at_first_colon_only() {
        let raw = "---\nurl: https://example.com/song\n---\nbody";
        let (meta, _) = split_front_matter(raw);
        assert_eq!(meta.get("url"), Some("https://example.com/song"));
    }

    #[test]
    fn skips_lines_without_key_and_value() {
        let raw = "---\ntitle: Song\nno colon here\n: empty key\nempty value:\n---\nbody";
        let (meta, _) = split_front_matter(raw);
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn absent_front_matter_returns_whole_input() {
        let raw = "# Just a song\n[C] la la\n";
        let (meta, body) = split_front_matter(raw);
        assert!(meta.is_empty());
        assert_eq!(body, raw.trim());
    }

    #[test]
    fn unclosed_front_matter_is_treated_as_body() {
        let raw = "---\ntitle: Song\nbody without closing delimiter";
        let (meta, body) = split_front_matter(raw);
        assert!(meta.is_empty());
        assert_eq!(body, raw.trim());
    }
}
