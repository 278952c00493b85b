// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use masonry::vello::peniko::Color;

// ============================================================================
// BASE COLORS -- Generic colors for UI, a dark to light gradient by default
// ============================================================================
const BASE_B: Color = Color::from_rgb8(0x20, 0x20, 0x20);
const BASE_C: Color = Color::from_rgb8(0x30, 0x30, 0x30);
const BASE_D: Color = Color::from_rgb8(0x40, 0x40, 0x40);
const BASE_F: Color = Color::from_rgb8(0x60, 0x60, 0x60);
const BASE_J: Color = Color::from_rgb8(0xa0, 0xa0, 0xa0);
const BASE_M: Color = Color::from_rgb8(0xd0, 0xd0, 0xd0);

// ============================================================================
// GLOBAL BACKGROUNDS
// ============================================================================
/// Area around the page inside the canvas widget
const APP_BACKGROUND: Color = BASE_B;

/// The page itself is always painted white
const PAGE_BACKGROUND: Color = Color::WHITE;

// ============================================================================
// TOOLBAR
// ============================================================================
const TOOLBAR_BACKGROUND: Color = BASE_C;
const TOOLBAR_BUTTON: Color = BASE_D;
const TOOLBAR_BUTTON_ACTIVE: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
const TOOLBAR_BORDER: Color = BASE_F;
const TEXT_PRIMARY: Color = BASE_M;
const TEXT_SECONDARY: Color = BASE_J;

// ============================================================================
// FIELD FALLBACKS -- used when a field carries an unparseable color string
// ============================================================================
const FIELD_TEXT_FALLBACK: Color = Color::from_rgb8(0x11, 0x18, 0x27);
const FIELD_BORDER_FALLBACK: Color = Color::from_rgb8(0xd1, 0xd5, 0xdb);

// ============================================================================
// SELECTION AND HANDLES
// ============================================================================
const SELECTION_OUTLINE: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
const HANDLE_FILL: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
const HANDLE_STROKE: Color = Color::WHITE;

// ============================================================================
// INLINE EDITOR OVERLAY
// ============================================================================
const OVERLAY_BACKGROUND: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0xf0);
const OVERLAY_OUTLINE: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
const OVERLAY_CARET: Color = BASE_C;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Canvas backgrounds
pub mod canvas {
    use super::Color;
    pub const BACKGROUND: Color = super::APP_BACKGROUND;
    pub const PAGE: Color = super::PAGE_BACKGROUND;
}

/// Application chrome around the canvas
pub mod app {
    use super::Color;
    pub const BACKGROUND: Color = super::APP_BACKGROUND;
}

/// Toolbar above the canvas
pub mod toolbar {
    use super::Color;
    pub const BACKGROUND: Color = super::TOOLBAR_BACKGROUND;
    pub const BUTTON: Color = super::TOOLBAR_BUTTON;
    pub const BUTTON_ACTIVE: Color = super::TOOLBAR_BUTTON_ACTIVE;
    pub const BORDER: Color = super::TOOLBAR_BORDER;
    pub const BORDER_WIDTH: f64 = 1.0;
    pub const RADIUS: f64 = 4.0;
    pub const GAP: f64 = 6.0;
}

/// Toolbar and status text
pub mod text {
    use super::Color;
    pub const PRIMARY: Color = super::TEXT_PRIMARY;
    pub const SECONDARY: Color = super::TEXT_SECONDARY;
}

/// Fallbacks for field colors that fail to parse
pub mod field {
    use super::Color;
    pub const TEXT: Color = super::FIELD_TEXT_FALLBACK;
    pub const BORDER: Color = super::FIELD_BORDER_FALLBACK;
    /// Default sub-element caption color
    pub const CAPTION: Color = super::BASE_J;
}

/// Selection outline and resize handles
pub mod selection {
    use super::Color;
    pub const OUTLINE: Color = super::SELECTION_OUTLINE;
    /// Outline stroke width in screen pixels
    pub const OUTLINE_WIDTH: f64 = 2.0;
    /// Dash pattern of the outline in screen pixels
    pub const OUTLINE_DASH: [f64; 2] = [6.0, 4.0];
    /// Outline is drawn this far outside the field box (screen pixels)
    pub const OUTLINE_INSET: f64 = 2.0;
}

/// Resize handle squares
pub mod handle {
    use super::Color;
    pub const FILL: Color = super::HANDLE_FILL;
    pub const STROKE: Color = super::HANDLE_STROKE;
    /// Edge length of a handle square in screen pixels
    pub const SIZE: f64 = 8.0;
    pub const STROKE_WIDTH: f64 = 1.0;
}

/// Inline text editor overlay
pub mod overlay {
    use super::Color;
    pub const BACKGROUND: Color = super::OVERLAY_BACKGROUND;
    pub const OUTLINE: Color = super::OVERLAY_OUTLINE;
    pub const CARET: Color = super::OVERLAY_CARET;
    pub const CARET_WIDTH: f64 = 1.0;
}
