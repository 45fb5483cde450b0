//! Chord diagram synthesis — converts a fingering position into a
//! fixed-size SVG fretboard diagram.
//!
//! The grid shows 6 strings across a 4-fret window with the nut drawn
//! bolder. Muted and open strings get markers above the nut; fretted
//! strings get a labeled dot. Chords without usable position data degrade
//! to a fallback card carrying the chord name and a "not found" notice.
//!
//! Synthesis is a pure function of (chord name, position): identical inputs
//! produce identical SVG, so diagrams for a document's chord set may be
//! generated in any order or in parallel.

mod constants;
mod svg;

use serde::Serialize;

use crate::chord::find_chord;
use crate::db::{ChordDatabase, Position};
use constants::*;
use svg::SvgBuilder;

/// A synthesized diagram for one chord, ready for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChordDiagram {
    pub name: String,
    pub svg: String,
}

/// Synthesize the diagram for a chord token.
///
/// Resolves the token against the database and renders its preferred
/// voicing; unresolvable tokens and entries without position data render
/// the fallback card instead.
pub fn chord_diagram(db: &ChordDatabase, token: &str) -> ChordDiagram {
    let svg = match find_chord(db, token).and_then(|def| def.first_position()) {
        Some(position) => render_position_svg(token, position),
        None => render_fallback_svg(token),
    };
    ChordDiagram {
        name: token.to_string(),
        svg,
    }
}

/// Render the fretboard grid for one fingering position.
pub fn render_position_svg(name: &str, position: &Position) -> String {
    let mut b = SvgBuilder::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    b.rounded_rect(
        0.0,
        0.0,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        CORNER_RADIUS,
        BACKGROUND_COLOR,
        FRAME_COLOR,
        FRAME_LINE_WIDTH,
    );
    b.text(
        CANVAS_WIDTH / 2.0,
        TITLE_BASELINE,
        name,
        TITLE_SIZE,
        "600",
        TITLE_COLOR,
        "middle",
    );

    let grid_bottom = GRID_TOP + FRET_ROWS as f64 * FRET_SPACING;
    let grid_right = GRID_LEFT + (STRING_COUNT - 1) as f64 * STRING_SPACING;

    // Strings (vertical lines)
    for i in 0..STRING_COUNT {
        let x = GRID_LEFT + i as f64 * STRING_SPACING;
        b.line(x, GRID_TOP, x, grid_bottom, GRID_COLOR, STRING_LINE_WIDTH);
    }

    // Fret lines; fret 0 is the nut, drawn bolder
    for i in 0..=FRET_ROWS {
        let y = GRID_TOP + i as f64 * FRET_SPACING;
        let (color, width) = if i == 0 {
            (NUT_COLOR, NUT_LINE_WIDTH)
        } else {
            (GRID_COLOR, FRET_LINE_WIDTH)
        };
        b.line(GRID_LEFT, y, grid_right, y, color, width);
    }

    // Per-string markers, in string order
    for (i, symbol) in position.frets.chars().take(STRING_COUNT).enumerate() {
        let x = GRID_LEFT + i as f64 * STRING_SPACING;
        match symbol {
            'x' | 'X' => {
                b.line(
                    x - 4.0,
                    GRID_TOP - 12.0,
                    x + 4.0,
                    GRID_TOP - 4.0,
                    MUTED_COLOR,
                    MARKER_LINE_WIDTH,
                );
                b.line(
                    x + 4.0,
                    GRID_TOP - 12.0,
                    x - 4.0,
                    GRID_TOP - 4.0,
                    MUTED_COLOR,
                    MARKER_LINE_WIDTH,
                );
            }
            '0' => {
                b.ring(
                    x,
                    GRID_TOP - 8.0,
                    OPEN_RING_RADIUS,
                    OPEN_COLOR,
                    MARKER_LINE_WIDTH,
                );
            }
            _ => {
                // Base-16 fret number; frets past the visible window
                // collapse to the bottom row but keep their true label.
                // Anything unrecognized leaves this string unmarked.
                let Some(fret) = symbol.to_digit(16).filter(|f| (1..=15).contains(f)) else {
                    continue;
                };
                let row = fret.min(FRET_ROWS);
                let y = GRID_TOP + (row as f64 - 0.5) * FRET_SPACING;
                b.circle(x, y, DOT_RADIUS, DOT_COLOR);
                b.text(
                    x,
                    y + 2.0,
                    &fret.to_string(),
                    DOT_LABEL_SIZE,
                    "600",
                    DOT_LABEL_COLOR,
                    "middle",
                );
            }
        }
    }

    b.build()
}

/// Render the degraded card for a chord with no usable fingering data:
/// same canvas, name label and a two-line notice, no grid.
pub fn render_fallback_svg(name: &str) -> String {
    let mut b = SvgBuilder::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    b.rounded_rect(
        0.0,
        0.0,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        CORNER_RADIUS,
        BACKGROUND_COLOR,
        FRAME_COLOR,
        FRAME_LINE_WIDTH,
    );
    b.text(
        CANVAS_WIDTH / 2.0,
        FALLBACK_TITLE_BASELINE,
        name,
        FALLBACK_TITLE_SIZE,
        "600",
        TITLE_COLOR,
        "middle",
    );
    b.text(
        CANVAS_WIDTH / 2.0,
        80.0,
        "Chord not found",
        NOTICE_SIZE,
        "normal",
        NOTICE_COLOR,
        "middle",
    );
    b.text(
        CANVAS_WIDTH / 2.0,
        95.0,
        "in database",
        NOTICE_SIZE,
        "normal",
        NOTICE_COLOR,
        "middle",
    );

    b.build()
}
