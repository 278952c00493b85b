// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint helper methods for TemplateCanvasWidget

use super::TemplateCanvasWidget;
use crate::editing::{InlineEditor, OverlayLayout, overlay_layout};
use crate::model::TextAlign;
use crate::render::{FrameState, Surface, TextBaseline, TextMeasure, VelloSurface};
use crate::render::surface::parse_color;
use crate::theme;
use kurbo::{Affine, Point, Rect, Size, Stroke};
use masonry::util::fill_color;
use masonry::vello::Scene;

impl TemplateCanvasWidget {
    // ============================================================================
    // PAINT HELPER METHODS
    // ============================================================================

    pub(super) fn paint_frame(&mut self, scene: &mut Scene, canvas_size: Size) {
        self.paint_background(scene, canvas_size);

        let viewport = self.viewport();
        let frame = FrameState {
            selected: self.controller.selected(),
            editing: self.controller.editing(),
        };
        let mut surface = VelloSurface::new(
            scene,
            viewport.offset.to_point(),
            viewport.device_pixel_ratio,
        );
        self.renderer
            .render(&mut surface, self.document.current(), &viewport, frame);

        if let Some(editor) = self.controller.inline_editor() {
            self.paint_inline_editor(scene, editor);
        }
    }

    fn paint_background(&self, scene: &mut Scene, canvas_size: Size) {
        let bg_rect = canvas_size.to_rect();
        fill_color(scene, &bg_rect, theme::canvas::BACKGROUND);
    }

    /// Draw the overlay in widget coordinates over the edited field
    fn paint_inline_editor(&self, scene: &mut Scene, editor: &InlineEditor) {
        let template = self.document.current();
        let Some(field) = template.field(editor.field_id()) else {
            return;
        };
        let viewport = self.viewport();
        let screen_rect = viewport.document_to_screen(field.normalized_rect(template.size()));

        let mut surface = VelloSurface::new(scene, Point::ZERO, 1.0);
        surface.begin_frame(self.size, Affine::IDENTITY);
        let layout = overlay_layout(field, screen_rect, editor.line_count(), &mut surface);

        surface.fill_rect(screen_rect, theme::overlay::BACKGROUND);
        surface.stroke_rounded_rect(
            screen_rect.to_rounded_rect(0.0),
            &Stroke::new(1.0),
            theme::overlay::OUTLINE,
        );

        let color = parse_color(&field.color).unwrap_or(theme::field::TEXT);
        for (i, line) in editor.text().split('\n').enumerate() {
            let baseline = layout.baseline(i);
            if baseline - layout.ascent >= screen_rect.y1 {
                break;
            }
            surface.fill_text(
                line,
                Point::new(layout.anchor_x(), baseline),
                &layout.font,
                layout.align,
                TextBaseline::Alphabetic,
                color,
            );
        }

        let caret = caret_rect(&layout, editor, &mut surface);
        surface.fill_rect(caret, theme::overlay::CARET);
    }
}

/// Caret bar for the editor's caret position
fn caret_rect(layout: &OverlayLayout, editor: &InlineEditor, measure: &mut impl TextMeasure) -> Rect {
    let mut width_of = |text: &str| {
        if text.is_empty() {
            return 0.0;
        }
        measure
            .measure_text(text, &layout.font)
            .map_or(0.0, |m| m.width)
    };
    let (line, prefix) = editor.caret_line();
    let prefix_width = width_of(prefix);
    let line_width = width_of(editor.current_line());

    let line_start = match layout.align {
        TextAlign::Left => layout.anchor_x(),
        TextAlign::Center => layout.anchor_x() - line_width / 2.0,
        TextAlign::Right => layout.anchor_x() - line_width,
    };
    let x = line_start + prefix_width;
    let baseline = layout.baseline(line);
    let top = baseline - layout.ascent;
    Rect::new(
        x,
        top,
        x + theme::overlay::CARET_WIDTH,
        top + layout.font.size,
    )
}
