// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Full-frame template renderer.
//!
//! Every call to [`Renderer::render`] redraws the whole page: background,
//! field boxes, bitmaps, text, sub-element captions, and finally the
//! selection outline with its resize handles. The template is read-only
//! here; the only state the renderer owns is the bitmap cache.

use super::bitmap::BitmapCache;
use super::surface::{FontSpec, Surface, TextBaseline, TextMeasure, is_transparent, parse_color};
use crate::editing::hit_test::{ResizeHandle, aspect_fit, effective_rect};
use crate::editing::viewport::Viewport;
use crate::model::{Field, Side, Template, TextAlign};
use crate::settings;
use crate::theme;
use kurbo::{Point, Rect, Size, Stroke};
use masonry::vello::peniko::Color;

/// Per-frame UI state that affects drawing
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameState<'a> {
    /// Field that gets the selection outline and handles
    pub selected: Option<&'a str>,
    /// Field whose text is currently shown by the inline editor
    pub editing: Option<&'a str>,
}

/// Draws templates and owns the bitmap side table
#[derive(Debug, Default)]
pub struct Renderer {
    bitmaps: BitmapCache,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bitmaps(&self) -> &BitmapCache {
        &self.bitmaps
    }

    pub fn bitmaps_mut(&mut self) -> &mut BitmapCache {
        &mut self.bitmaps
    }

    /// Decode bitmaps requested during the last frame. Returns true when
    /// something new became drawable and the frame should be redrawn.
    pub fn load_pending_bitmaps(&mut self) -> bool {
        self.bitmaps.load_pending() > 0
    }

    /// Redraw the whole frame
    pub fn render(
        &mut self,
        surface: &mut impl Surface,
        template: &Template,
        viewport: &Viewport,
        frame: FrameState<'_>,
    ) {
        let page = template.size();
        surface.begin_frame(viewport.backing_size(), viewport.device_transform());
        surface.fill_rect(Rect::from_origin_size(Point::ZERO, page), theme::canvas::PAGE);

        self.bitmaps.retain_template(template);

        for field in &template.fields {
            let inline_edited = frame.editing == Some(field.id.as_str());
            if inline_edited && field.kind.is_text_like() {
                continue;
            }
            self.draw_field(surface, field, page, viewport);
        }

        if let Some(field) = frame.selected.and_then(|id| template.field(id)) {
            self.draw_selection(surface, field, page, viewport);
        }
    }

    // ============================================================================
    // FIELD CONTENT
    // ============================================================================

    fn draw_field(
        &mut self,
        surface: &mut impl Surface,
        field: &Field,
        page: Size,
        viewport: &Viewport,
    ) {
        let rect = field.normalized_rect(page);

        let bitmap = if field.has_bitmap() {
            self.bitmaps.request(&field.id, &field.value)
        } else {
            None
        };

        match bitmap {
            Some(bitmap) => {
                let dest = aspect_fit(rect, bitmap.size());
                surface.draw_image(bitmap, dest);
            }
            None => draw_box(surface, field, rect, viewport.device_scale()),
        }

        if field.kind.is_text_like() {
            draw_text(surface, field, rect);
        }

        for sub in field.sub_elements() {
            let font = FontSpec::new(sub.font_size, sub.bold, false);
            let color = parse_color(&sub.color).unwrap_or(theme::field::CAPTION);
            let (anchor, align, baseline) = sub_element_anchor(rect, sub.side);
            let origin = Point::new(anchor.x + sub.offset_x, anchor.y + sub.offset_y);
            surface.fill_text(&sub.text, origin, &font, align, baseline, color);
        }
    }

    // ============================================================================
    // SELECTION
    // ============================================================================

    fn draw_selection(
        &self,
        surface: &mut impl Surface,
        field: &Field,
        page: Size,
        viewport: &Viewport,
    ) {
        // Outline and handles have fixed on-screen sizes
        let px = 1.0 / viewport.scale;
        let rect = effective_rect(field, page, &self.bitmaps);

        let dash = theme::selection::OUTLINE_DASH.map(|d| d * px);
        let outline = Stroke::new(theme::selection::OUTLINE_WIDTH * px).with_dashes(0.0, dash);
        surface.stroke_rounded_rect(
            rect.inflate(theme::selection::OUTLINE_INSET * px, theme::selection::OUTLINE_INSET * px)
                .to_rounded_rect(0.0),
            &outline,
            theme::selection::OUTLINE,
        );

        let size = theme::handle::SIZE * px;
        let handle_stroke = Stroke::new(theme::handle::STROKE_WIDTH * px);
        for handle in ResizeHandle::ALL {
            let square = Rect::from_center_size(handle.position(rect), Size::new(size, size))
                .to_rounded_rect(0.0);
            surface.fill_rounded_rect(square, theme::handle::FILL);
            surface.stroke_rounded_rect(square, &handle_stroke, theme::handle::STROKE);
        }
    }
}

// ============================================================================
// BOXES
// ============================================================================

fn draw_box(surface: &mut impl Surface, field: &Field, rect: Rect, device_scale: f64) {
    let radius = field
        .border_radius
        .max(0.0)
        .min(rect.width().min(rect.height()) / 2.0);

    if let Some(fill) = parse_color(&field.background_color).filter(|c| !is_transparent(*c)) {
        surface.fill_rounded_rect(rect.to_rounded_rect(radius), fill);
    }

    if !(field.border_width > 0.0) {
        return;
    }
    let color = parse_color(&field.border_color).unwrap_or(theme::field::BORDER);
    if is_transparent(color) {
        return;
    }
    let device_width = (field.border_width * device_scale).round().max(1.0);
    let snapped = snap_stroke_rect(rect, device_width, device_scale);
    let stroke = Stroke::new(device_width / device_scale);
    surface.stroke_rounded_rect(snapped.to_rounded_rect(radius), &stroke, color);
}

/// Place a stroke of `device_width` device pixels inside `rect` so both
/// of its edges land on whole device pixels.
///
/// Box edges are rounded to the device grid, then pulled in by half the
/// stroke width: odd widths centre on pixel middles, even widths on pixel
/// boundaries, and neither blurs across two pixels.
pub fn snap_stroke_rect(rect: Rect, device_width: f64, device_scale: f64) -> Rect {
    if !(device_scale > 0.0) {
        return rect;
    }
    let half = device_width / 2.0;
    let x0 = (rect.x0 * device_scale).round() + half;
    let y0 = (rect.y0 * device_scale).round() + half;
    let x1 = (rect.x1 * device_scale).round() - half;
    let y1 = (rect.y1 * device_scale).round() - half;
    if x1 < x0 || y1 < y0 {
        return rect;
    }
    Rect::new(x0, y0, x1, y1).scale_from_origin(1.0 / device_scale)
}

// ============================================================================
// TEXT
// ============================================================================

/// Value to show, or the placeholder when the value is empty
fn display_text(field: &Field) -> Option<(&str, bool)> {
    if !field.value.is_empty() {
        return Some((&field.value, false));
    }
    field
        .placeholder
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| (p, true))
}

/// Horizontal anchor of text inside a field box
pub fn text_anchor_x(rect: Rect, align: TextAlign) -> f64 {
    match align {
        TextAlign::Left => rect.x0 + settings::text::INSET,
        TextAlign::Center => rect.x0 + rect.width() / 2.0,
        TextAlign::Right => rect.x1 - settings::text::INSET,
    }
}

/// Ascent and descent for `text`, from the surface or the size heuristic
pub fn ascent_descent(measure: &mut impl TextMeasure, text: &str, font: &FontSpec) -> (f64, f64) {
    match measure.measure_text(text, font) {
        Some(m) if m.ascent > 0.0 || m.descent > 0.0 => (m.ascent, m.descent),
        _ => (
            settings::text::FALLBACK_ASCENT * font.size,
            settings::text::FALLBACK_DESCENT * font.size,
        ),
    }
}

/// Baseline that vertically centres one line in `rect`
pub fn centered_baseline(rect: Rect, ascent: f64, descent: f64) -> f64 {
    rect.y0 + rect.height() / 2.0 + (ascent - descent) / 2.0
}

/// Line height used for multi-line blocks
pub fn line_height(ascent: f64, descent: f64, font_size: f64) -> f64 {
    (settings::text::LINE_BOX_FACTOR * (ascent + descent))
        .max(settings::text::LINE_FONT_FACTOR * font_size)
}

fn draw_text(surface: &mut impl Surface, field: &Field, rect: Rect) {
    let Some((text, is_placeholder)) = display_text(field) else {
        return;
    };
    let font = FontSpec::new(field.font_size, field.bold, field.italic);
    let color = if is_placeholder {
        theme::field::CAPTION
    } else {
        parse_color(&field.color).unwrap_or(theme::field::TEXT)
    };
    let x = text_anchor_x(rect, field.align);

    if field.kind.is_multiline() || text.contains('\n') {
        draw_text_block(surface, text, x, rect, &font, field.align, color);
        return;
    }

    let (ascent, descent) = ascent_descent(surface, text, &font);
    let baseline = centered_baseline(rect, ascent, descent);
    surface.fill_text(
        text,
        Point::new(x, baseline),
        &font,
        field.align,
        TextBaseline::Alphabetic,
        color,
    );
}

fn draw_text_block(
    surface: &mut impl Surface,
    text: &str,
    x: f64,
    rect: Rect,
    font: &FontSpec,
    align: TextAlign,
    color: Color,
) {
    let lines: Vec<&str> = text.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let (ascent, descent) = ascent_descent(surface, "Mg", font);
    let line_height = line_height(ascent, descent, font.size);
    let block_height = line_height * lines.len() as f64;

    // Centred as a block; overflow spills downwards and gets clipped
    let top = (rect.y0 + (rect.height() - block_height) / 2.0).max(rect.y0);
    let half_leading = (line_height - (ascent + descent)) / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let line_top = top + i as f64 * line_height;
        if line_top >= rect.y1 {
            break;
        }
        if line.is_empty() {
            continue;
        }
        let baseline = line_top + half_leading + ascent;
        surface.fill_text(
            line,
            Point::new(x, baseline),
            font,
            align,
            TextBaseline::Alphabetic,
            color,
        );
    }
}

/// Anchor point, alignment and baseline for a caption on `side`
pub fn sub_element_anchor(rect: Rect, side: Side) -> (Point, TextAlign, TextBaseline) {
    let center = rect.center();
    match side {
        Side::Top => (Point::new(center.x, rect.y0), TextAlign::Center, TextBaseline::Top),
        Side::Bottom => (Point::new(center.x, rect.y1), TextAlign::Center, TextBaseline::Top),
        Side::Left => (Point::new(rect.x0, center.y), TextAlign::Right, TextBaseline::Middle),
        Side::Right => (Point::new(rect.x1, center.y), TextAlign::Left, TextBaseline::Middle),
    }
}
