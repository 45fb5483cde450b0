//! Document transformer — rewrites a tab-markup body into structured,
//! stylable markup.
//!
//! The pipeline order matters: literal regions come out first so no
//! styling rule can touch code, block rules run before inline rules so
//! inline styling applies inside block content, chord rules run after
//! links have consumed their brackets, and literals are restored strictly
//! last. No stage ever fails; unmatched text passes through unmodified.

mod block;
mod inline;
mod literal;

use crate::db::ChordDatabase;

/// Transform a document body (front matter already stripped) into markup.
pub fn render_body(db: &ChordDatabase, body: &str) -> String {
    let (text, store) = literal::extract(body);
    let text = block::process(db, &text);
    let text = inline::process(db, &text);
    let text = assemble_paragraphs(&text);
    literal::restore(text, store)
}

const BLOCK_PREFIXES: [&str; 13] = [
    "<h1", "<h2", "<h3", "<h4", "<h5", "<hr", "<ul", "<ol", "<blockquote", "<table", "<div",
    "<p", "<pre",
];

fn is_block_line(line: &str) -> bool {
    literal::is_block_placeholder(line) || BLOCK_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Group the remaining text lines into paragraphs: blank lines are
/// paragraph boundaries, single line breaks become `<br/>`, and block
/// elements stand on their own.
fn assemble_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    fn flush(paragraph: &mut Vec<&str>, out: &mut Vec<String>) {
        if !paragraph.is_empty() {
            out.push(format!("<p>{}</p>", paragraph.join("<br/>")));
            paragraph.clear();
        }
    }

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut paragraph, &mut out);
        } else if is_block_line(line) {
            flush(&mut paragraph, &mut out);
            out.push(line.to_string());
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut paragraph, &mut out);

    out.join("\n")
}
