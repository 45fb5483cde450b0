//! Shared constants for the chord diagram renderer (all in SVG user units).
//!
//! These are fixed so every diagram in a rendered set has identical
//! dimensions.

// ── Canvas ──────────────────────────────────────────────────────────
pub(super) const CANVAS_WIDTH: f64 = 120.0;
pub(super) const CANVAS_HEIGHT: f64 = 160.0;
pub(super) const CORNER_RADIUS: f64 = 8.0;

// ── Grid geometry ───────────────────────────────────────────────────
pub(super) const STRING_COUNT: usize = 6;
pub(super) const FRET_ROWS: u32 = 4; // visible fret window
pub(super) const STRING_SPACING: f64 = 16.0;
pub(super) const FRET_SPACING: f64 = 20.0;
pub(super) const GRID_LEFT: f64 = 25.0;
pub(super) const GRID_TOP: f64 = 40.0;

// ── Line weights & marker sizes ─────────────────────────────────────
pub(super) const STRING_LINE_WIDTH: f64 = 1.5;
pub(super) const FRET_LINE_WIDTH: f64 = 1.0;
pub(super) const NUT_LINE_WIDTH: f64 = 3.0; // fret 0 drawn bolder
pub(super) const FRAME_LINE_WIDTH: f64 = 1.0;
pub(super) const MARKER_LINE_WIDTH: f64 = 2.0;
pub(super) const DOT_RADIUS: f64 = 7.0;
pub(super) const OPEN_RING_RADIUS: f64 = 5.0;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const TITLE_BASELINE: f64 = 20.0;
pub(super) const TITLE_SIZE: f64 = 14.0;
pub(super) const FALLBACK_TITLE_BASELINE: f64 = 40.0;
pub(super) const FALLBACK_TITLE_SIZE: f64 = 16.0;
pub(super) const NOTICE_SIZE: f64 = 10.0;
pub(super) const DOT_LABEL_SIZE: f64 = 10.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const BACKGROUND_COLOR: &str = "#1f2937";
pub(super) const FRAME_COLOR: &str = "#374151";
pub(super) const TITLE_COLOR: &str = "#f9fafb";
pub(super) const GRID_COLOR: &str = "#6b7280";
pub(super) const NUT_COLOR: &str = "#e5e7eb";
pub(super) const MUTED_COLOR: &str = "#ef4444";
pub(super) const OPEN_COLOR: &str = "#10b981";
pub(super) const DOT_COLOR: &str = "#3b82f6";
pub(super) const DOT_LABEL_COLOR: &str = "white";
pub(super) const NOTICE_COLOR: &str = "#6b7280";
