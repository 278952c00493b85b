// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! A surface that records draw calls, for tests

use super::bitmap::Bitmap;
use super::surface::{FontSpec, Surface, TextBaseline, TextMeasure, TextMetrics};
use crate::model::TextAlign;
use kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke};
use masonry::vello::peniko::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Begin {
        backing: Size,
        transform: Affine,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        width: f64,
        dashed: bool,
        color: Color,
    },
    Image {
        dest: Rect,
    },
    Text {
        text: String,
        origin: Point,
        font: FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    },
}

/// Records every call; optionally reports fixed font metrics
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    metrics: Option<(f64, f64)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure every string with the given ascent and descent and a width
    /// of half the font size per character
    pub fn with_metrics(ascent: f64, descent: f64) -> Self {
        Self {
            commands: Vec::new(),
            metrics: Some((ascent, descent)),
        }
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> Option<TextMetrics> {
        let (ascent, descent) = self.metrics?;
        Some(TextMetrics {
            width: text.chars().count() as f64 * font.size / 2.0,
            ascent,
            descent,
        })
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, backing: Size, transform: Affine) {
        self.commands.clear();
        self.commands.push(DrawCommand::Begin { backing, transform });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect: rect.rect(),
            color,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect: rect.rect(),
            width: stroke.width,
            dashed: !stroke.dash_pattern.is_empty(),
            color,
        });
    }

    fn draw_image(&mut self, _bitmap: &Bitmap, dest: Rect) {
        self.commands.push(DrawCommand::Image { dest });
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font: *font,
            align,
            baseline,
            color,
        });
    }
}
