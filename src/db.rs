//! Chord position database — read-only lookup from canonical key to
//! chord definitions.
//!
//! The database is loaded once from JSON (the `chords-db` guitar dump or a
//! fixture with the same shape) and injected wherever chord lookups happen.
//! Records are validated at load time; malformed entries are dropped with a
//! diagnostic instead of surfacing as per-lookup failures.

use std::collections::HashMap;

use serde::Deserialize;

/// One fingering pattern for a chord.
///
/// `frets` holds one symbol per string, low to high: `x` (muted), `0`
/// (open), or a base-16 digit for frets 1–15.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub frets: String,
}

/// All known fingerings for one (key, suffix) pair.
#[derive(Debug, Clone, Deserialize)]
pub struct ChordDefinition {
    /// Chord quality in the database's vocabulary ("major", "m7", "7sus4", ...)
    pub suffix: String,
    /// Ordered fingering positions; the first is the preferred voicing.
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl ChordDefinition {
    /// The preferred voicing, if the definition has any position data.
    pub fn first_position(&self) -> Option<&Position> {
        self.positions.first()
    }
}

/// Immutable mapping from canonical key spelling ("C", "Csharp", "Eb", ...)
/// to that key's chord definitions.
#[derive(Debug, Clone, Default)]
pub struct ChordDatabase {
    chords: HashMap<String, Vec<ChordDefinition>>,
}

/// Top-level shape of the chords-db JSON dump. Everything except the
/// `chords` map (tunings, suffix lists, metadata) is ignored.
#[derive(Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    chords: HashMap<String, Vec<ChordDefinition>>,
}

impl ChordDatabase {
    /// Load a database from JSON.
    ///
    /// Accepts either the full chords-db dump (`{"chords": {...}}`) or a
    /// bare key → definitions map. Invalid JSON is the only hard error;
    /// individually malformed definitions are dropped with a warning.
    pub fn from_json(json: &str) -> Result<ChordDatabase, String> {
        let mut chords = serde_json::from_str::<DatabaseFile>(json)
            .map(|f| f.chords)
            .map_err(|e| format!("Chord database parse error: {e}"))?;

        if chords.is_empty() {
            // Bare map without the "chords" wrapper.
            if let Ok(bare) =
                serde_json::from_str::<HashMap<String, Vec<ChordDefinition>>>(json)
            {
                chords = bare;
            }
        }

        for (key, defs) in chords.iter_mut() {
            let mut seen = Vec::new();
            defs.retain(|def| {
                if def.suffix.is_empty() {
                    log::warn!("Dropping definition with empty suffix under key '{key}'");
                    return false;
                }
                if seen.contains(&def.suffix) {
                    log::warn!("Dropping duplicate suffix '{}' under key '{key}'", def.suffix);
                    return false;
                }
                if def.positions.iter().any(|p| p.frets.is_empty()) {
                    log::warn!(
                        "Dropping definition '{key} {}' with empty frets value",
                        def.suffix
                    );
                    return false;
                }
                seen.push(def.suffix.clone());
                true
            });
        }
        chords.retain(|_, defs| !defs.is_empty());

        Ok(ChordDatabase { chords })
    }

    /// All definitions under one canonical key, in database order.
    pub fn definitions(&self, key: &str) -> Option<&[ChordDefinition]> {
        self.chords.get(key).map(|v| v.as_slice())
    }

    /// Number of keys in the database.
    pub fn key_count(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}
