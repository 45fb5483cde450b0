//! chordkit — tab markup transformer and chord diagram renderer.
//!
//! Turns a plain-text song document (optional `---` front matter plus a
//! body in an informal tab-markup dialect) into structured markup, and
//! synthesizes an SVG fretboard diagram for every chord the body
//! references. Chord knowledge comes from an injected, immutable
//! [`ChordDatabase`]; every render-path operation is a pure function that
//! degrades gracefully instead of failing.
//!
//! # Example
//! ```
//! use chordkit::{render_song, ChordDatabase};
//!
//! let db = ChordDatabase::from_json(
//!     r#"{"chords": {"C": [{"suffix": "major", "positions": [{"frets": "x32010"}]}]}}"#,
//! ).unwrap();
//!
//! let song = render_song(&db, "---\ntitle: Demo\n---\n[Verse 1]\n[C]La la la");
//! assert_eq!(song.metadata.get("title"), Some("Demo"));
//! assert!(song.html.contains(r#"<span class="chord">C</span>"#));
//! assert_eq!(song.diagrams.len(), 1);
//! ```

pub mod chord;
pub mod db;
pub mod diagram;
pub mod frontmatter;
pub mod transform;

use serde::Serialize;

pub use chord::{extract_chords, find_chord, is_valid_chord, parse_chord_name, ChordName};
pub use db::{ChordDatabase, ChordDefinition, Position};
pub use diagram::{chord_diagram, render_fallback_svg, render_position_svg, ChordDiagram};
pub use frontmatter::{split_front_matter, Metadata};
pub use transform::render_body;

/// The complete result of rendering one song document: front-matter
/// metadata, the transformed body markup, and one diagram per referenced
/// chord in the extractor's sorted order.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSong {
    pub metadata: Metadata,
    pub html: String,
    pub diagrams: Vec<ChordDiagram>,
}

/// Render a raw song document against a chord database.
///
/// This is the whole (raw text, database) → (metadata, markup, diagrams)
/// boundary in one call. It never fails: unknown chords stay literal in
/// the markup and are absent from the diagram set, and chords without
/// fingering data get the fallback card.
pub fn render_song(db: &ChordDatabase, raw: &str) -> RenderedSong {
    let (metadata, body) = split_front_matter(raw);
    let html = render_body(db, &body);
    let diagrams = extract_chords(db, &body)
        .iter()
        .map(|name| chord_diagram(db, name))
        .collect();

    RenderedSong {
        metadata,
        html,
        diagrams,
    }
}

/// Serialize a rendered song to a JSON string.
/// Useful for handing the result to an embedding display layer.
pub fn song_to_json(song: &RenderedSong) -> Result<String, String> {
    serde_json::to_string_pretty(song).map_err(|e| format!("JSON serialization error: {e}"))
}
