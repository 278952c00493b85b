// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! In-place text editing of a field's value.
//!
//! While a field is being edited the canvas stops drawing its text and the
//! widget paints an overlay on top of the field instead. The overlay sits
//! in screen space, so its font size and padding are the document values
//! scaled by the on-screen size of the field box.

use crate::editing::document::Document;
use crate::model::{Field, FieldId, FieldPatch, TextAlign};
use crate::render::renderer::line_height;
use crate::render::surface::{FontSpec, TextMeasure};
use crate::settings;
use kurbo::Rect;

// ============================================================================
// OVERLAY GEOMETRY
// ============================================================================

/// Where and how the overlay is drawn, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    /// On-screen box of the edited field
    pub rect: Rect,
    pub font: FontSpec,
    pub align: TextAlign,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    /// Distance between consecutive baselines
    pub line_height: f64,
    /// Distance from the top of a line to its baseline
    pub ascent: f64,
}

impl OverlayLayout {
    /// Horizontal anchor of each line, matching `align`
    pub fn anchor_x(&self) -> f64 {
        match self.align {
            TextAlign::Left => self.rect.x0 + self.padding_left,
            TextAlign::Center => self.rect.x0 + self.rect.width() / 2.0,
            TextAlign::Right => self.rect.x1 - self.padding_right,
        }
    }

    /// Baseline of line `index`
    pub fn baseline(&self, index: usize) -> f64 {
        self.rect.y0 + self.padding_top + self.ascent + index as f64 * self.line_height
    }
}

/// Overlay geometry for `field` shown at `screen_rect`.
///
/// `lines` is the number of lines currently in the editor. Vertical
/// padding reproduces the canvas centring from measured metrics; without
/// metrics a fixed padding is used and lines follow the size heuristic.
pub fn overlay_layout(
    field: &Field,
    screen_rect: Rect,
    lines: usize,
    measure: &mut impl TextMeasure,
) -> OverlayLayout {
    let scale = if field.width > 0.0 && screen_rect.width() > 0.0 {
        screen_rect.width() / field.width
    } else {
        1.0
    };
    let font = FontSpec::new(field.font_size, field.bold, field.italic).scaled(scale);
    let inset = settings::text::INSET * scale;
    let (padding_left, padding_right) = match field.align {
        TextAlign::Left => (inset, 0.0),
        TextAlign::Center => (0.0, 0.0),
        TextAlign::Right => (0.0, inset),
    };

    let multiline = field.kind.is_multiline() || lines > 1;
    let (padding_top, line_height, ascent) = match measure.measure_text("Mg", &font) {
        Some(m) if m.line_box() > 0.0 => {
            let line_box = m.line_box();
            if multiline {
                let lh = line_height(m.ascent, m.descent, font.size);
                let block = lh * lines.max(1) as f64;
                let top = ((screen_rect.height() - block) / 2.0).max(0.0);
                (top + (lh - line_box) / 2.0, lh, m.ascent)
            } else {
                let top = ((screen_rect.height() - line_box) / 2.0).max(0.0);
                (top, line_box, m.ascent)
            }
        }
        _ => {
            let ascent = settings::text::FALLBACK_ASCENT * font.size;
            let descent = settings::text::FALLBACK_DESCENT * font.size;
            (
                settings::text::OVERLAY_FALLBACK_PADDING * scale,
                line_height(ascent, descent, font.size),
                ascent,
            )
        }
    };

    OverlayLayout {
        rect: screen_rect,
        font,
        align: field.align,
        padding_left,
        padding_right,
        padding_top,
        line_height,
        ascent,
    }
}

// ============================================================================
// EDITING STATE
// ============================================================================

/// Keys the overlay reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKey {
    Enter { shift: bool },
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Text(String),
}

/// Result of feeding a key to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Still editing; repaint the overlay
    Continue,
    /// Close and write the value back
    Commit,
    /// Close and drop the changes
    Cancel,
}

/// Live text of a field being edited, with a caret
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEditor {
    field_id: FieldId,
    original: String,
    text: String,
    /// Byte offset into `text`, always on a char boundary
    caret: usize,
    multiline: bool,
}

impl InlineEditor {
    /// Start editing `field` with the caret at the end of its value
    pub fn new(field: &Field) -> Self {
        Self {
            field_id: field.id.clone(),
            original: field.value.clone(),
            text: field.value.clone(),
            caret: field.value.len(),
            multiline: field.kind.is_multiline(),
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    /// Number of lines in the current text
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Line index of the caret and the text before it on that line
    pub fn caret_line(&self) -> (usize, &str) {
        let before = &self.text[..self.caret];
        let index = before.matches('\n').count();
        let start = before.rfind('\n').map_or(0, |i| i + 1);
        (index, &before[start..])
    }

    /// The full line the caret is on
    pub fn current_line(&self) -> &str {
        let start = self.text[..self.caret].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[self.caret..]
            .find('\n')
            .map_or(self.text.len(), |i| self.caret + i);
        &self.text[start..end]
    }

    pub fn insert(&mut self, s: &str) {
        let s = if self.multiline {
            s.to_string()
        } else {
            s.replace(['\n', '\r'], " ")
        };
        self.text.insert_str(self.caret, &s);
        self.caret += s.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.caret].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.caret..]
            .chars()
            .next()
            .map(|c| self.caret + c.len_utf8())
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.caret, "");
            self.caret = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.caret..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.caret = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.caret = next;
        }
    }

    pub fn move_home(&mut self) {
        self.caret = self.text[..self.caret].rfind('\n').map_or(0, |i| i + 1);
    }

    pub fn move_end(&mut self) {
        self.caret = self.text[self.caret..]
            .find('\n')
            .map_or(self.text.len(), |i| self.caret + i);
    }

    pub fn handle_key(&mut self, key: EditKey) -> EditOutcome {
        match key {
            EditKey::Enter { shift } => {
                if self.multiline {
                    self.insert("\n");
                    return EditOutcome::Continue;
                }
                if shift {
                    return EditOutcome::Continue;
                }
                return EditOutcome::Commit;
            }
            EditKey::Escape => return EditOutcome::Cancel,
            EditKey::Backspace => self.backspace(),
            EditKey::Delete => self.delete_forward(),
            EditKey::Left => self.move_left(),
            EditKey::Right => self.move_right(),
            EditKey::Home => self.move_home(),
            EditKey::End => self.move_end(),
            EditKey::Text(s) => self.insert(&s),
        }
        EditOutcome::Continue
    }

    /// Write the text back as one undoable change. Nothing is recorded
    /// when the text is unchanged or the field has gone away.
    pub fn commit(self, document: &mut Document) -> bool {
        if !self.is_modified() {
            return false;
        }
        let committed =
            document.update_field(&self.field_id, &FieldPatch::value(self.text), true);
        if committed {
            tracing::debug!("Committed inline edit of field {}", self.field_id);
        }
        committed
    }
}
