//! Chord name resolution and extraction.
//!
//! A chord token like `A7sus4` or `Gb` is split into a canonical
//! (key, suffix) pair matching the database vocabulary, then looked up to
//! decide whether it names a real chord. Resolution never fails: unknown
//! spellings still produce a well-formed pair, they just won't match
//! anything in the database.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::{ChordDatabase, ChordDefinition};

/// A chord token split into the database's (key, suffix) vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordName {
    /// Canonical key spelling as used by the database ("C", "Csharp", "Eb").
    pub key: String,
    /// Normalized quality suffix ("major", "minor", "7sus4", ...).
    pub suffix: String,
}

static CHORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Ga-g][#bB]?)(.*)$").unwrap());

/// Parse a free-form chord token into a canonical (key, suffix) pair.
///
/// If the token does not start with a pitch letter A–G, the whole token is
/// kept as the key with a "major" suffix — deliberately permissive; the
/// database lookup simply won't find it.
pub fn parse_chord_name(token: &str) -> ChordName {
    let Some(caps) = CHORD_TOKEN.captures(token) else {
        return ChordName {
            key: token.to_string(),
            suffix: "major".to_string(),
        };
    };
    ChordName {
        key: normalize_key(&caps[1]),
        suffix: normalize_suffix(&caps[2]),
    }
}

/// Map a pitch spelling onto the database's canonical key names.
///
/// The database spells three pitch classes as sharps (`Csharp`, `Fsharp`)
/// and three as flats (`Eb`, `Ab`, `Bb`); both enharmonic inputs resolve to
/// the same entry. Natural notes pass through uppercased.
fn normalize_key(key: &str) -> String {
    let upper = key.to_uppercase();
    match upper.as_str() {
        "C#" | "DB" => "Csharp".to_string(),
        "D#" | "EB" => "Eb".to_string(),
        "F#" | "GB" => "Fsharp".to_string(),
        "G#" | "AB" => "Ab".to_string(),
        "A#" | "BB" => "Bb".to_string(),
        _ => upper,
    }
}

/// Normalize a quality suffix to the database's vocabulary.
///
/// Unknown suffixes pass through lowercased; an empty suffix means major.
fn normalize_suffix(suffix: &str) -> String {
    let lower = suffix.to_lowercase();
    let mapped = match lower.as_str() {
        "" => "major",
        "m" | "min" => "minor",
        "maj" => "major",
        "maj7" => "maj7",
        "m7" => "m7",
        "7" => "7",
        "7sus4" => "7sus4",
        "sus2" => "sus2",
        "sus4" => "sus4",
        "dim" => "dim",
        "aug" => "aug",
        "6" => "6",
        "9" => "9",
        "11" => "11",
        "13" => "13",
        "add9" => "add9",
        "dim7" => "dim7",
        "m7b5" => "m7b5",
        "maj9" => "maj9",
        "m9" => "m9",
        "9sus4" => "9sus4",
        "6/9" => "6/9",
        "mmaj7" => "mmaj7",
        other => other,
    };
    mapped.to_string()
}

/// Look up a chord token in the database.
///
/// Returns the matching definition, or `None` when either the key or the
/// suffix is unknown. Never propagates an error.
pub fn find_chord<'a>(db: &'a ChordDatabase, token: &str) -> Option<&'a ChordDefinition> {
    let name = parse_chord_name(token);
    db.definitions(&name.key)?
        .iter()
        .find(|def| def.suffix == name.suffix)
}

/// Whether a token names a chord that exists in the database.
pub fn is_valid_chord(db: &ChordDatabase, token: &str) -> bool {
    find_chord(db, token).is_some()
}

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// Extract every valid chord referenced by a document body.
///
/// Candidates are bracketed tokens; anything that doesn't resolve in the
/// database (section labels, stray brackets) is ignored. The result is
/// deduplicated by exact token text and sorted.
pub fn extract_chords(db: &ChordDatabase, body: &str) -> Vec<String> {
    let mut found = BTreeSet::new();
    for caps in BRACKETED.captures_iter(body) {
        let token = &caps[1];
        if is_valid_chord(db, token) {
            found.insert(token.to_string());
        }
    }
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(key: &str, suffix: &str) -> ChordName {
        ChordName {
            key: key.to_string(),
            suffix: suffix.to_string(),
        }
    }

    fn fixture_db() -> ChordDatabase {
        ChordDatabase::from_json(
            r#"{"chords": {
                "C": [{"suffix": "major", "positions": [{"frets": "x32010"}]}],
                "E": [{"suffix": "m7", "positions": [{"frets": "022030"}]}],
                "A": [{"suffix": "7sus4", "positions": [{"frets": "x02030"}]}]
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn bare_letter_is_major() {
        assert_eq!(parse_chord_name("C"), name("C", "major"));
        assert_eq!(parse_chord_name("g"), name("G", "major"));
    }

    #[test]
    fn enharmonic_spellings_share_a_canonical_key() {
        assert_eq!(parse_chord_name("C#").key, "Csharp");
        assert_eq!(parse_chord_name("Db").key, "Csharp");
        assert_eq!(parse_chord_name("d#").key, "Eb");
        assert_eq!(parse_chord_name("eb").key, "Eb");
        assert_eq!(parse_chord_name("F#").key, "Fsharp");
        assert_eq!(parse_chord_name("Gb").key, "Fsharp");
        assert_eq!(parse_chord_name("G#").key, "Ab");
        assert_eq!(parse_chord_name("Ab").key, "Ab");
        assert_eq!(parse_chord_name("A#").key, "Bb");
        assert_eq!(parse_chord_name("Bb").key, "Bb");
    }

    #[test]
    fn suffix_aliases_normalize() {
        assert_eq!(parse_chord_name("Am"), name("A", "minor"));
        assert_eq!(parse_chord_name("Amin"), name("A", "minor"));
        assert_eq!(parse_chord_name("Cmaj"), name("C", "major"));
        assert_eq!(parse_chord_name("Cmaj9"), name("C", "maj9"));
        assert_eq!(parse_chord_name("A7sus4"), name("A", "7sus4"));
        assert_eq!(parse_chord_name("Bm7b5"), name("B", "m7b5"));
        assert_eq!(parse_chord_name("G6/9"), name("G", "6/9"));
        assert_eq!(parse_chord_name("Dmmaj7"), name("D", "mmaj7"));
    }

    #[test]
    fn unknown_suffix_passes_through_lowercased() {
        assert_eq!(parse_chord_name("Cweird"), name("C", "weird"));
    }

    #[test]
    fn non_pitch_token_falls_back_to_whole_key() {
        assert_eq!(parse_chord_name("H7"), name("H7", "major"));
        assert_eq!(parse_chord_name("Verse 1").key, "Verse 1");
    }

    #[test]
    fn oracle_matches_only_known_entries() {
        let db = fixture_db();
        assert!(is_valid_chord(&db, "C"));
        assert!(is_valid_chord(&db, "Em7"));
        assert!(is_valid_chord(&db, "A7sus4"));
        assert!(!is_valid_chord(&db, "Cm"));
        assert!(!is_valid_chord(&db, "H7"));
        assert!(!is_valid_chord(&db, "Verse 1"));
    }

    #[test]
    fn extractor_dedupes_and_sorts() {
        let db = fixture_db();
        let body = "[Em7] la [C] la [Xx9]\n[C] again [Verse 1]";
        assert_eq!(extract_chords(&db, body), vec!["C", "Em7"]);
    }

    #[test]
    fn extractor_is_case_sensitive_on_token_text() {
        let db = fixture_db();
        // "c" resolves to the same chord but is a distinct token.
        let body = "[C] [c]";
        assert_eq!(extract_chords(&db, body), vec!["C", "c"]);
    }
}
