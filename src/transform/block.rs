//! Block-level rules — line-anchored rewriting of headings, horizontal
//! rules, blockquotes, lists, pipe tables, section labels and chord
//! reference lines.
//!
//! The walker groups consecutive lines (quote runs, list runs, table rows)
//! into single block elements; everything it doesn't recognize passes
//! through untouched for the inline pass.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chord::is_valid_chord;
use crate::db::ChordDatabase;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,5}) (.*)$").unwrap());

static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)(?:([-*+])|(?:\d+\.))[ \t]+(.*)$").unwrap());

// A reference line like "- Em7: [Em7|022030]"; only rewritten when the
// name portion validates against the database.
static REFERENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- ([A-Ga-g][#bB]?[^:]*): \[[^\]|]*\|([0-9xX]+)\]").unwrap());

// A line whose entire content is one bracketed token is a section label
// ([Verse 1], [Chorus]), regardless of chord validity.
static SECTION_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]+)\][ \t]*$").unwrap());

static TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)+\|?[ \t]*$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

pub(super) fn process(db: &ChordDatabase, text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len();
            out.push(format!("<h{level}>{}</h{level}>", &caps[2]));
            i += 1;
            continue;
        }

        if HORIZONTAL_RULE.is_match(line) {
            out.push("<hr/>".to_string());
            i += 1;
            continue;
        }

        if line.starts_with('>') {
            let mut quoted = Vec::new();
            while i < lines.len() && lines[i].starts_with('>') {
                let content = lines[i]
                    .strip_prefix("> ")
                    .or_else(|| lines[i].strip_prefix('>'))
                    .unwrap_or(lines[i]);
                quoted.push(content);
                i += 1;
            }
            out.push(format!("<blockquote>{}</blockquote>", quoted.join("<br/>")));
            continue;
        }

        if let Some(markup) = reference_line(db, line) {
            out.push(markup);
            i += 1;
            continue;
        }

        if let Some(caps) = SECTION_LABEL.captures(line) {
            out.push(format!(r#"<div class="section-label">{}</div>"#, &caps[1]));
            i += 1;
            continue;
        }

        if line.contains('|')
            && i + 1 < lines.len()
            && TABLE_SEPARATOR.is_match(lines[i + 1])
        {
            let header = split_cells(line);
            let mut rows = Vec::new();
            i += 2;
            while i < lines.len() && lines[i].contains('|') && !lines[i].trim().is_empty() {
                rows.push(split_cells(lines[i]));
                i += 1;
            }
            out.push(render_table(&header, &rows));
            continue;
        }

        if LIST_ITEM.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                // A chord reference line also starts with "- "; hand it
                // back to the outer walker.
                if reference_line(db, lines[i]).is_some() {
                    break;
                }
                let Some(caps) = LIST_ITEM.captures(lines[i]) else {
                    break;
                };
                let level = indent_width(&caps[1]) / 2;
                let kind = if caps.get(2).is_some() {
                    ListKind::Unordered
                } else {
                    ListKind::Ordered
                };
                items.push((level, kind, caps[3].to_string()));
                i += 1;
            }
            out.push(render_list(&items));
            continue;
        }

        out.push(line.to_string());
        i += 1;
    }

    out.join("\n")
}

fn reference_line(db: &ChordDatabase, line: &str) -> Option<String> {
    let caps = REFERENCE_LINE.captures(line)?;
    let name = caps[1].trim();
    if !is_valid_chord(db, name) {
        return None;
    }
    Some(format!(
        r#"<div class="chord-ref"><span class="chord-ref-name">{name}</span>: <span class="chord-ref-frets">{}</span></div>"#,
        &caps[2]
    ))
}

fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 2 } else { 1 }).sum()
}

fn render_list(items: &[(usize, ListKind, String)]) -> String {
    let mut out = String::new();
    let mut stack: Vec<ListKind> = Vec::new();

    for (level, kind, text) in items {
        let depth = level + 1;
        while stack.len() > depth {
            if let Some(open) = stack.pop() {
                out.push_str(open.close());
            }
        }
        if stack.len() == depth && stack.last() != Some(kind) {
            if let Some(open) = stack.pop() {
                out.push_str(open.close());
            }
        }
        while stack.len() < depth {
            stack.push(*kind);
            out.push_str(kind.open());
        }
        out.push_str("<li>");
        out.push_str(text);
        out.push_str("</li>");
    }
    while let Some(kind) = stack.pop() {
        out.push_str(kind.close());
    }
    out
}

/// Split a pipe-delimited row into trimmed cells, dropping the empty edges
/// produced by outer pipes but keeping interior empty cells.
fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|c| c.trim().to_string()).collect()
}

fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table><thead><tr>");
    for cell in header {
        out.push_str("<th>");
        out.push_str(cell);
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn db() -> ChordDatabase {
        ChordDatabase::from_json(
            r#"{"chords": {
                "E": [{"suffix": "m7", "positions": [{"frets": "022030"}]}]
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn headings_up_to_five_levels() {
        let out = process(&db(), "# One\n##### Five\n###### Six");
        assert_eq!(out, "<h1>One</h1>\n<h5>Five</h5>\n###### Six");
    }

    #[test]
    fn horizontal_rules() {
        let out = process(&db(), "---\n***\n___");
        assert_eq!(out, "<hr/>\n<hr/>\n<hr/>");
    }

    #[test]
    fn soft_wrapped_blockquote_merges_into_one_block() {
        let out = process(&db(), "> first\n> second\nplain");
        assert_eq!(out, "<blockquote>first<br/>second</blockquote>\nplain");
    }

    #[test]
    fn reference_line_validates_against_database() {
        let out = process(&db(), "- Em7: [Em7|022030]");
        assert_eq!(
            out,
            r#"<div class="chord-ref"><span class="chord-ref-name">Em7</span>: <span class="chord-ref-frets">022030</span></div>"#
        );
        // Unknown chord name: falls through to the generic list rule.
        let out = process(&db(), "- H7: [H7|022030]");
        assert_eq!(out, "<ul><li>H7: [H7|022030]</li></ul>");
    }

    #[test]
    fn reference_line_inside_a_list_run_stays_a_reference() {
        let out = process(&db(), "- tune down\n- Em7: [Em7|022030]\n- strum");
        assert_eq!(
            out,
            "<ul><li>tune down</li></ul>\n\
             <div class=\"chord-ref\"><span class=\"chord-ref-name\">Em7</span>: \
             <span class=\"chord-ref-frets\">022030</span></div>\n\
             <ul><li>strum</li></ul>"
        );
    }

    #[test]
    fn section_label_requires_the_whole_line() {
        let out = process(&db(), "[Verse 1]");
        assert_eq!(out, r#"<div class="section-label">Verse 1</div>"#);
        // A bracket with trailing content is not a label.
        let out = process(&db(), "[Em7] hello darkness");
        assert_eq!(out, "[Em7] hello darkness");
    }

    #[test]
    fn consecutive_items_merge_into_one_list() {
        let out = process(&db(), "- a\n- b\n1. one\n2. two");
        assert_eq!(
            out,
            "<ul><li>a</li><li>b</li></ul><ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn indentation_nests_lists() {
        let out = process(&db(), "- a\n  - inner\n- b");
        assert_eq!(
            out,
            "<ul><li>a</li><ul><li>inner</li></ul><li>b</li></ul>"
        );
    }

    #[test]
    fn pipe_table_with_header_separator_and_body() {
        let out = process(&db(), "| Chord | Frets |\n|---|---|\n| C | x32010 |");
        assert_eq!(
            out,
            "<table><thead><tr><th>Chord</th><th>Frets</th></tr></thead>\
             <tbody><tr><td>C</td><td>x32010</td></tr></tbody></table>"
        );
    }

    #[test]
    fn unrecognized_lines_pass_through() {
        let out = process(&db(), "just lyrics here");
        assert_eq!(out, "just lyrics here");
    }
}
