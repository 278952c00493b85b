// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! The drawing surface the renderer paints onto.
//!
//! A small immediate-mode API in the spirit of a 2D canvas context. The
//! renderer sets one global transform per frame and issues everything else
//! in document units. `VelloSurface` paints into a Vello scene for the
//! editor widget; tests use a recording surface.

use crate::model::TextAlign;
use crate::render::bitmap::Bitmap;
use kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke};
use masonry::vello::peniko::Color;

/// Font selection for a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Size in document units
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(size: f64, bold: bool, italic: bool) -> Self {
        let size = if size.is_finite() && size > 0.0 { size } else { 1.0 };
        Self { size, bold, italic }
    }

    /// CSS-style font shorthand, e.g. `italic bold 16px sans-serif`
    pub fn css(&self) -> String {
        let mut font = String::new();
        if self.italic {
            font.push_str("italic ");
        }
        if self.bold {
            font.push_str("bold ");
        }
        font.push_str(&format!("{}px sans-serif", self.size));
        font
    }

    /// Same face at a different size
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.size * factor, self.bold, self.italic)
    }
}

/// Vertical reference point for `fill_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Top,
    Middle,
}

/// Measured extent of a single line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    /// Distance from baseline to the top of the line box (positive)
    pub ascent: f64,
    /// Distance from baseline to the bottom of the line box (positive)
    pub descent: f64,
}

impl TextMetrics {
    /// Height of the line box
    pub fn line_box(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Anything that can measure text
pub trait TextMeasure {
    /// `None` when the backend has no font metrics available
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> Option<TextMetrics>;
}

/// Measurement backend with no fonts; callers fall back to heuristics
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetrics;

impl TextMeasure for NoMetrics {
    fn measure_text(&mut self, _text: &str, _font: &FontSpec) -> Option<TextMetrics> {
        None
    }
}

/// A 2D drawing target
pub trait Surface: TextMeasure {
    /// Start a new frame: size the backing buffer, clear it, and set the
    /// transform applied to every following call.
    fn begin_frame(&mut self, backing: Size, transform: Affine);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke, color: Color);

    /// Draw `bitmap` stretched into `dest`
    fn draw_image(&mut self, bitmap: &Bitmap, dest: Rect);

    /// Draw one line of text anchored at `origin`. `align` picks which end
    /// of the line sits at `origin.x`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    );
}

/// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or `transparent`
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Some(Color::TRANSPARENT);
    }
    let hex = value.strip_prefix('#')?;
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgb8(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        6 => Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// True when drawing with this color would be invisible
pub fn is_transparent(color: Color) -> bool {
    color.components[3] <= 0.0
}
