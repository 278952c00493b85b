// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! [`Surface`] implementation that paints into a Vello scene

use super::bitmap::Bitmap;
use super::surface::{FontSpec, Surface, TextBaseline, TextMeasure, TextMetrics};
use crate::model::TextAlign;
use kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke};
use masonry::core::{BrushIndex, StyleProperty, render_text};
use masonry::vello::Scene;
use masonry::vello::peniko::{Brush, Color, Fill, ImageBrush};
use parley::{FontContext, FontStack, Layout, LayoutContext};

thread_local! {
    static FONT_CX: std::cell::RefCell<FontContext> =
        std::cell::RefCell::new(FontContext::default());
    static LAYOUT_CX: std::cell::RefCell<
        LayoutContext<BrushIndex>,
    > = std::cell::RefCell::new(LayoutContext::new());
}

/// Lay out one line of text in document units
fn layout_line(text: &str, font: &FontSpec) -> Layout<BrushIndex> {
    FONT_CX.with(|font_cell| {
        LAYOUT_CX.with(|layout_cell| {
            let mut font_cx = font_cell.borrow_mut();
            let mut layout_cx = layout_cell.borrow_mut();

            let mut builder = layout_cx.ranged_builder(&mut font_cx, text, 1.0, false);
            builder.push_default(StyleProperty::FontSize(font.size as f32));
            builder.push_default(StyleProperty::FontStack(FontStack::Single(
                parley::FontFamily::Generic(parley::GenericFamily::SansSerif),
            )));
            if font.bold {
                builder.push_default(StyleProperty::FontWeight(parley::FontWeight::BOLD));
            }
            if font.italic {
                builder.push_default(StyleProperty::FontStyle(parley::FontStyle::Italic));
            }
            builder.push_default(StyleProperty::Brush(BrushIndex(0)));
            let mut layout = builder.build(text);
            layout.break_all_lines(None);
            layout
        })
    })
}

/// First-line metrics of a built layout
fn line_metrics(layout: &Layout<BrushIndex>) -> Option<(f64, f64, f64)> {
    let line = layout.lines().next()?;
    let metrics = line.metrics();
    Some((
        metrics.ascent as f64,
        metrics.descent as f64,
        metrics.baseline as f64,
    ))
}

/// Paints into a masonry scene.
///
/// Masonry scenes are in logical widget pixels and apply the device scale
/// themselves, so the per-frame device transform is composed with `base`,
/// which places the page inside the widget and undoes the device ratio.
pub struct VelloSurface<'a> {
    scene: &'a mut Scene,
    base: Affine,
    transform: Affine,
}

impl<'a> VelloSurface<'a> {
    pub fn new(scene: &'a mut Scene, page_origin: Point, device_pixel_ratio: f64) -> Self {
        let ratio = if device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let base = Affine::translate(page_origin.to_vec2()) * Affine::scale(1.0 / ratio);
        Self {
            scene,
            base,
            transform: base,
        }
    }
}

impl TextMeasure for VelloSurface<'_> {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> Option<TextMetrics> {
        let layout = layout_line(text, font);
        let (ascent, descent, _) = line_metrics(&layout)?;
        Some(TextMetrics {
            width: layout.width() as f64,
            ascent,
            descent,
        })
    }
}

impl Surface for VelloSurface<'_> {
    fn begin_frame(&mut self, _backing: Size, transform: Affine) {
        // The widget's scene is reset by masonry before each paint
        self.transform = self.base * transform;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.transform, &Brush::Solid(color), None, &rect);
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.transform, &Brush::Solid(color), None, &rect);
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke, color: Color) {
        self.scene
            .stroke(stroke, self.transform, &Brush::Solid(color), None, &rect);
    }

    fn draw_image(&mut self, bitmap: &Bitmap, dest: Rect) {
        if bitmap.width == 0 || bitmap.height == 0 {
            return;
        }
        let placement = Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(
                dest.width() / bitmap.width as f64,
                dest.height() / bitmap.height as f64,
            );
        let brush = ImageBrush::new(bitmap.image_data.clone());
        self.scene.draw_image(&brush, self.transform * placement);
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
        if text.is_empty() {
            return;
        }
        let layout = layout_line(text, font);
        let width = layout.width() as f64;
        let Some((ascent, descent, layout_baseline)) = line_metrics(&layout) else {
            return;
        };

        let x = match align {
            TextAlign::Left => origin.x,
            TextAlign::Center => origin.x - width / 2.0,
            TextAlign::Right => origin.x - width,
        };
        // Layout origin is the top of the line box
        let y = match baseline {
            TextBaseline::Alphabetic => origin.y - layout_baseline,
            TextBaseline::Top => origin.y - (layout_baseline - ascent),
            TextBaseline::Middle => origin.y - (layout_baseline - ascent) - (ascent + descent) / 2.0,
        };

        let brushes = vec![Brush::Solid(color)];
        render_text(
            self.scene,
            self.transform * Affine::translate((x, y)),
            &layout,
            &brushes,
            false,
        );
    }
}
