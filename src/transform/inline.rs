//! Inline rules — images, links, strikethrough, emphasis, and the
//! database-validated chord spans.
//!
//! Runs after the block pass so block markup is already in place, and
//! before paragraph assembly. Images rewrite before links (a link pattern
//! is a suffix of an image pattern), emphasis after links so underscores
//! inside URLs stay literal, and chords last so link text has already
//! consumed its brackets.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::chord::is_valid_chord;
use crate::db::ChordDatabase;

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());

static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~([^~\n]+)~~").unwrap());

static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());

// Underscore emphasis needs word boundaries on both sides so identifiers
// and URLs like some_file_name stay literal; the regex crate has no
// lookaround, so the boundary characters are captured and re-emitted.
static BOLD_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|[^\w_])__([^_\n]+)__([^\w_]|$)").unwrap());

static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());

static ITALIC_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|[^\w_])_([^_\n]+)_([^\w_]|$)").unwrap());

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

pub(super) fn process(db: &ChordDatabase, text: &str) -> String {
    let text = IMAGE.replace_all(text, r#"<img src="$2" alt="$1"/>"#);
    let text = LINK.replace_all(&text, r#"<a href="$2">$1</a>"#);
    let text = STRIKETHROUGH.replace_all(&text, "<del>$1</del>");
    let text = BOLD_STARS.replace_all(&text, "<strong>$1</strong>");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1<strong>$2</strong>$3");
    let text = ITALIC_STAR.replace_all(&text, "<em>$1</em>");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1<em>$2</em>$3");

    // Chord spans last: any bracket still standing is either a chord or
    // literal text that stays exactly as written.
    BRACKETED
        .replace_all(&text, |caps: &Captures| {
            let token = &caps[1];
            if is_valid_chord(db, token) {
                format!(r#"<span class="chord">{token}</span>"#)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
