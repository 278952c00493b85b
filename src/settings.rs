// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, sizes) belongs in `theme.rs`. Values
//! that users may override at runtime live in `config.rs`.

// ============================================================================
// FIELD GEOMETRY SETTINGS
// ============================================================================
/// Smallest width/height a field can be resized to (document units)
const MIN_FIELD_SIZE: f64 = 20.0;

/// Default size of a freshly added field (document units)
const DEFAULT_FIELD_WIDTH: f64 = 150.0;
const DEFAULT_FIELD_HEIGHT: f64 = 40.0;

/// Default position of a freshly added field (document units)
const DEFAULT_FIELD_X: f64 = 40.0;
const DEFAULT_FIELD_Y: f64 = 40.0;

/// Offset applied to a duplicated field so it does not sit exactly on top
const DUPLICATE_OFFSET: f64 = 10.0;

// ============================================================================
// FIELD STYLE DEFAULTS
// ============================================================================
const DEFAULT_FONT_SIZE: f64 = 16.0;
const DEFAULT_BORDER_WIDTH: f64 = 1.0;
const DEFAULT_BORDER_RADIUS: f64 = 6.0;

// ============================================================================
// INTERACTION SETTINGS
// ============================================================================
/// Pointer travel (document units, either axis) before a press becomes a drag
const DRAG_THRESHOLD: f64 = 6.0;

/// Half-size of the square grab area around a resize handle (screen px)
const HANDLE_TOLERANCE: f64 = 6.0;

/// Double click detection window
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 10.0;

/// Arrow key nudge amounts (document units)
const NUDGE_BASE: f64 = 1.0;
const NUDGE_SHIFT: f64 = 10.0;

// ============================================================================
// UNDO SETTINGS
// ============================================================================
/// Maximum number of snapshots kept on the undo stack
const UNDO_LIMIT: usize = 50;

// ============================================================================
// TEXT LAYOUT SETTINGS
// ============================================================================
/// Horizontal inset of left/right aligned text from the field edge
const TEXT_INSET: f64 = 8.0;

/// Fallback ascent/descent ratios when the surface has no text metrics
const FALLBACK_ASCENT: f64 = 0.8;
const FALLBACK_DESCENT: f64 = 0.2;

/// Multi-line layout: line height is the larger of these two
const LINE_BOX_FACTOR: f64 = 1.1;
const LINE_FONT_FACTOR: f64 = 1.15;

/// Vertical padding of the inline editor when metrics are unavailable
const OVERLAY_FALLBACK_PADDING: f64 = 4.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Field geometry limits and defaults
pub mod field {
    pub const MIN_SIZE: f64 = super::MIN_FIELD_SIZE;
    pub const DEFAULT_WIDTH: f64 = super::DEFAULT_FIELD_WIDTH;
    pub const DEFAULT_HEIGHT: f64 = super::DEFAULT_FIELD_HEIGHT;
    pub const DEFAULT_X: f64 = super::DEFAULT_FIELD_X;
    pub const DEFAULT_Y: f64 = super::DEFAULT_FIELD_Y;
    pub const DUPLICATE_OFFSET: f64 = super::DUPLICATE_OFFSET;
}

/// Default field styling applied when `add_field` omits it
pub mod style {
    pub const FONT_SIZE: f64 = super::DEFAULT_FONT_SIZE;
    pub const BORDER_WIDTH: f64 = super::DEFAULT_BORDER_WIDTH;
    pub const BORDER_RADIUS: f64 = super::DEFAULT_BORDER_RADIUS;
}

/// Pointer interaction tuning
pub mod interaction {
    pub const DRAG_THRESHOLD: f64 = super::DRAG_THRESHOLD;
    pub const HANDLE_TOLERANCE: f64 = super::HANDLE_TOLERANCE;
    pub const DOUBLE_CLICK_TIME_MS: u128 = super::DOUBLE_CLICK_TIME_MS;
    pub const DOUBLE_CLICK_DISTANCE: f64 = super::DOUBLE_CLICK_DISTANCE;
}

/// Arrow key nudges
pub mod nudge {
    pub const BASE: f64 = super::NUDGE_BASE;
    pub const SHIFT: f64 = super::NUDGE_SHIFT;
}

/// Undo history
pub mod undo {
    pub const LIMIT: usize = super::UNDO_LIMIT;
}

/// Canvas text layout
pub mod text {
    pub const INSET: f64 = super::TEXT_INSET;
    pub const FALLBACK_ASCENT: f64 = super::FALLBACK_ASCENT;
    pub const FALLBACK_DESCENT: f64 = super::FALLBACK_DESCENT;
    pub const LINE_BOX_FACTOR: f64 = super::LINE_BOX_FACTOR;
    pub const LINE_FONT_FACTOR: f64 = super::LINE_FONT_FACTOR;
    pub const OVERLAY_FALLBACK_PADDING: f64 = super::OVERLAY_FALLBACK_PADDING;
}
