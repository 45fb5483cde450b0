//! Literal-region protection — pulls fenced code blocks and inline code
//! spans out of the text before any styling rule runs, and restores their
//! rendered markup at the very end of the pipeline.
//!
//! Placeholders are side-table indices wrapped in U+E000, a private-use
//! character that is stripped from the raw input first so document text can
//! never collide with a placeholder token.

use once_cell::sync::Lazy;
use regex::Regex;

const DELIM: char = '\u{E000}';

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^```([^\n]*)\n(.*?)\n?^```[ \t]*$").unwrap());

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Rendered literal markup held aside during the rewrite passes.
pub(super) struct LiteralStore {
    blocks: Vec<String>,
    spans: Vec<String>,
}

/// Replace fenced blocks and inline code spans with placeholder tokens.
///
/// Blocks are extracted first so backticks inside a fence never register as
/// inline spans. All literal content is HTML-escaped here.
pub(super) fn extract(body: &str) -> (String, LiteralStore) {
    let body: String = body.chars().filter(|&c| c != DELIM).collect();

    let mut blocks = Vec::new();
    let text = FENCED_BLOCK.replace_all(&body, |caps: &regex::Captures| {
        let language = caps[1].trim();
        let code = escape_html(&caps[2]);
        blocks.push(if language.is_empty() {
            format!("<pre><code>{code}</code></pre>")
        } else {
            format!(r#"<pre><code class="language-{language}">{code}</code></pre>"#)
        });
        block_placeholder(blocks.len() - 1)
    });

    let mut spans = Vec::new();
    let text = INLINE_CODE.replace_all(&text, |caps: &regex::Captures| {
        spans.push(format!("<code>{}</code>", escape_html(&caps[1])));
        span_placeholder(spans.len() - 1)
    });

    (text.into_owned(), LiteralStore { blocks, spans })
}

/// Swap placeholders back for their rendered markup, strictly after every
/// other rule has run. Inline spans restore before block spans.
pub(super) fn restore(text: String, store: LiteralStore) -> String {
    let mut text = text;
    for (i, span) in store.spans.iter().enumerate() {
        text = text.replace(&span_placeholder(i), span);
    }
    for (i, block) in store.blocks.iter().enumerate() {
        text = text.replace(&block_placeholder(i), block);
    }
    text
}

/// Whether a line consists solely of a block-literal placeholder, so
/// paragraph assembly can treat it as block-structured.
pub(super) fn is_block_placeholder(line: &str) -> bool {
    let inner = match line.strip_prefix(DELIM).and_then(|s| s.strip_suffix(DELIM)) {
        Some(inner) => inner,
        None => return false,
    };
    inner
        .strip_prefix('B')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn block_placeholder(index: usize) -> String {
    format!("{DELIM}B{index}{DELIM}")
}

fn span_placeholder(index: usize) -> String {
    format!("{DELIM}S{index}{DELIM}")
}

pub(super) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_fenced_block() {
        let (text, store) = extract("before\n```\nlet x = [C];\n```\nafter");
        assert!(!text.contains("let x"));
        assert!(is_block_placeholder(text.lines().nth(1).unwrap()));
        let restored = restore(text, store);
        assert_eq!(restored, "before\n<pre><code>let x = [C];</code></pre>\nafter");
    }

    #[test]
    fn fence_language_becomes_a_class() {
        let (text, store) = extract("```rust\nfn main() {}\n```");
        let restored = restore(text, store);
        assert_eq!(
            restored,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn inline_code_is_escaped() {
        let (text, store) = extract("use `<b> & [G]` here");
        assert!(!text.contains("[G]"));
        let restored = restore(text, store);
        assert_eq!(restored, "use <code>&lt;b&gt; &amp; [G]</code> here");
    }

    #[test]
    fn backticks_inside_a_fence_are_not_inline_spans() {
        let (_, store) = extract("```\na `tick` inside\n```");
        assert_eq!(store.blocks.len(), 1);
        assert!(store.spans.is_empty());
    }

    #[test]
    fn hostile_placeholder_characters_are_stripped() {
        let (text, store) = extract("sneaky \u{E000}B0\u{E000} text");
        let restored = restore(text, store);
        assert_eq!(restored, "sneaky B0 text");
    }

    #[test]
    fn non_placeholder_lines_are_not_block_placeholders() {
        assert!(!is_block_placeholder("plain text"));
        assert!(!is_block_placeholder("\u{E000}S0\u{E000}"));
    }
}
