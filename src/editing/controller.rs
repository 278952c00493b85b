// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer gesture state machine for the canvas.
//!
//! A gesture starts on pointer down and ends on pointer up. Dragging waits
//! for the pointer to travel past a threshold before anything moves, and
//! both dragging and resizing save exactly one undo snapshot per gesture.
//! Inline text editing is tracked alongside the gesture and suspends it.
//!
//! Pointer positions arrive in widget coordinates together with the live
//! on-screen rectangle of the page, and are mapped into document space on
//! every event.

use super::document::Document;
use super::hit_test::{BitmapSizes, ResizeHandle, contains_closed, handle_at_position, hit_test_at};
use super::inline_editor::{EditKey, EditOutcome, InlineEditor};
use super::resize::{aspect_ratio, drag_origin, resize_rect};
use super::viewport::screen_to_document;
use crate::model::{FieldId, FieldPatch};
use crate::settings;
use kurbo::{Point, Rect, Vec2};
use std::time::Instant;

/// Where a pointer event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// A pointer event, already reduced to a single position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pointer position in widget coordinates
    pub position: Point,
    /// Current on-screen rectangle of the page, in widget coordinates
    pub surface: Rect,
    pub time: Instant,
    pub source: PointerSource,
}

impl PointerInput {
    pub fn mouse(position: Point, surface: Rect, time: Instant) -> Self {
        Self {
            position,
            surface,
            time,
            source: PointerSource::Mouse,
        }
    }

    /// Touch input follows the first touch point only
    pub fn touch(touches: &[Point], surface: Rect, time: Instant) -> Option<Self> {
        let position = *touches.first()?;
        Some(Self {
            position,
            surface,
            time,
            source: PointerSource::Touch,
        })
    }

    /// Screen pixels per document unit, from the live surface
    fn scale(&self, document: &Document) -> f64 {
        let page = document.current().size();
        if page.width > 0.0 && self.surface.width() > 0.0 {
            self.surface.width() / page.width
        } else {
            1.0
        }
    }
}

/// Current pointer gesture
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Pressed on a field; nothing moves until the threshold is crossed
    PendingDrag {
        field_id: FieldId,
        start: Point,
        grab_offset: Vec2,
    },
    Dragging {
        field_id: FieldId,
        grab_offset: Vec2,
    },
    Resizing {
        field_id: FieldId,
        handle: ResizeHandle,
        original: Rect,
        start: Point,
        aspect: Option<f64>,
        snapshot_taken: bool,
    },
}

impl Gesture {
    fn field_id(&self) -> Option<&str> {
        match self {
            Gesture::Idle => None,
            Gesture::PendingDrag { field_id, .. }
            | Gesture::Dragging { field_id, .. }
            | Gesture::Resizing { field_id, .. } => Some(field_id),
        }
    }
}

/// What the widget should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The document changed
    pub changed: bool,
    /// Something visible changed (selection, overlay, document)
    pub repaint: bool,
    /// Default platform gestures (scrolling, zooming) must be suppressed
    pub prevent_default: bool,
}

impl Response {
    fn repaint() -> Self {
        Self {
            repaint: true,
            ..Self::default()
        }
    }

    fn changed() -> Self {
        Self {
            changed: true,
            repaint: true,
            prevent_default: false,
        }
    }

    fn with_source(mut self, source: PointerSource) -> Self {
        self.prevent_default = source == PointerSource::Touch;
        self
    }
}

/// Selection, gesture and inline editing state of one canvas
#[derive(Debug, Clone)]
pub struct Controller {
    gesture: Gesture,
    selected: Option<FieldId>,
    inline: Option<InlineEditor>,
    last_click: Option<(Instant, Point)>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            selected: None,
            inline: None,
            last_click: None,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a field without starting a gesture
    pub fn select(&mut self, id: Option<FieldId>) {
        self.selected = id;
    }

    pub fn inline_editor(&self) -> Option<&InlineEditor> {
        self.inline.as_ref()
    }

    /// Id of the field whose text the overlay is showing
    pub fn editing(&self) -> Option<&str> {
        self.inline.as_ref().map(InlineEditor::field_id)
    }

    /// Drop any gesture in progress
    pub fn reset_gesture(&mut self) {
        if self.gesture != Gesture::Idle {
            tracing::debug!("Gesture reset");
        }
        self.gesture = Gesture::Idle;
    }

    /// Forget ids that no longer exist in the current template
    pub fn sync_with(&mut self, document: &Document) {
        let template = document.current();
        if self
            .selected
            .as_deref()
            .is_some_and(|id| template.field(id).is_none())
        {
            self.selected = None;
        }
        if self
            .gesture
            .field_id()
            .is_some_and(|id| template.field(id).is_none())
        {
            self.gesture = Gesture::Idle;
        }
        if self
            .editing()
            .is_some_and(|id| template.field(id).is_none())
        {
            self.inline = None;
        }
    }

    // ============================================================================
    // POINTER
    // ============================================================================

    fn is_double_click(&mut self, input: &PointerInput) -> bool {
        let is_double = self.last_click.is_some_and(|(time, position)| {
            input.time.saturating_duration_since(time).as_millis()
                < settings::interaction::DOUBLE_CLICK_TIME_MS
                && position.distance(input.position) < settings::interaction::DOUBLE_CLICK_DISTANCE
        });
        // A detected double click starts fresh so triple clicks do not cascade
        self.last_click = if is_double {
            None
        } else {
            Some((input.time, input.position))
        };
        is_double
    }

    pub fn pointer_down(
        &mut self,
        document: &mut Document,
        bitmaps: &impl BitmapSizes,
        input: PointerInput,
    ) -> Response {
        let mut response = Response::default();

        // Clicks inside the edited field belong to the overlay; anywhere
        // else acts as blur
        if let Some(editor) = &self.inline {
            let template = document.current();
            let page = template.size();
            let point = screen_to_document(input.position, input.surface, page);
            let inside = template
                .field(editor.field_id())
                .is_some_and(|field| contains_closed(field.normalized_rect(page), point));
            if inside {
                self.gesture = Gesture::Idle;
                return response.with_source(input.source);
            }
            response.changed |= self.commit_inline(document);
            response.repaint = true;
        }

        let template = document.current();
        let page = template.size();
        let point = screen_to_document(input.position, input.surface, page);
        let scale = input.scale(document);
        let double = self.is_double_click(&input);

        self.gesture = Gesture::Idle;

        // Handles of the selected field take priority over fields stacked above it
        let selected_handle = self
            .selected
            .as_deref()
            .and_then(|id| template.field(id))
            .and_then(|field| {
                handle_at_position(point, field, page, bitmaps, scale).map(|h| (field, h))
            });
        let target = match selected_handle {
            Some((field, handle)) => Some((field, Some(handle))),
            None => hit_test_at(point, template, bitmaps).map(|field| {
                let handle = handle_at_position(point, field, page, bitmaps, scale);
                (field, handle)
            }),
        };

        let Some((field, handle)) = target else {
            if self.selected.take().is_some() {
                tracing::debug!("Selection cleared");
            }
            response.repaint = true;
            return response.with_source(input.source);
        };

        let field_id = field.id.clone();
        self.selected = Some(field_id.clone());
        response.repaint = true;

        if double && field.kind.is_text_like() {
            self.inline = Some(InlineEditor::new(field));
            tracing::debug!("Inline editing field {field_id}");
            return response.with_source(input.source);
        }

        self.gesture = match handle {
            Some(handle) => {
                let original = field.normalized_rect(page);
                let aspect = if field.is_aspect_locked() {
                    bitmaps
                        .bitmap_size(&field.id)
                        .and_then(aspect_ratio)
                        .or_else(|| aspect_ratio(original.size()))
                } else {
                    None
                };
                tracing::debug!("Resizing field {field_id} from {handle:?}");
                Gesture::Resizing {
                    field_id,
                    handle,
                    original,
                    start: point,
                    aspect,
                    snapshot_taken: false,
                }
            }
            None => Gesture::PendingDrag {
                grab_offset: point - field.normalized_rect(page).origin(),
                field_id,
                start: point,
            },
        };
        response.with_source(input.source)
    }

    pub fn pointer_move(&mut self, document: &mut Document, input: PointerInput) -> Response {
        if self.gesture == Gesture::Idle {
            return Response::default().with_source(input.source);
        }

        let page = document.current().size();
        let point = screen_to_document(input.position, input.surface, page);

        // The field may have been removed by something outside this gesture
        let Some(field) = self
            .gesture
            .field_id()
            .and_then(|id| document.current().field(id))
        else {
            tracing::debug!("Gesture target vanished, aborting");
            self.gesture = Gesture::Idle;
            self.selected = None;
            return Response::repaint().with_source(input.source);
        };
        let size = field.normalized_rect(page).size();

        let response = match &mut self.gesture {
            Gesture::Idle => Response::default(),
            Gesture::PendingDrag {
                field_id,
                start,
                grab_offset,
            } => {
                let threshold = settings::interaction::DRAG_THRESHOLD;
                let moved = point - *start;
                if moved.x.abs() < threshold && moved.y.abs() < threshold {
                    return Response::default().with_source(input.source);
                }
                let field_id = std::mem::take(field_id);
                let grab_offset = *grab_offset;
                tracing::debug!("Drag started on field {field_id}");
                document.save_state_for_undo();
                let origin = drag_origin(point, grab_offset, size, page);
                document.update_field(&field_id, &FieldPatch::position(origin.x, origin.y), false);
                self.gesture = Gesture::Dragging {
                    field_id,
                    grab_offset,
                };
                Response::changed()
            }
            Gesture::Dragging {
                field_id,
                grab_offset,
            } => {
                let origin = drag_origin(point, *grab_offset, size, page);
                document.update_field(field_id, &FieldPatch::position(origin.x, origin.y), false);
                Response::changed()
            }
            Gesture::Resizing {
                field_id,
                handle,
                original,
                start,
                aspect,
                snapshot_taken,
            } => {
                let rect = resize_rect(*original, *handle, point - *start, page, *aspect);
                if !*snapshot_taken && rect == *original {
                    return Response::default().with_source(input.source);
                }
                if !*snapshot_taken {
                    document.save_state_for_undo();
                    *snapshot_taken = true;
                }
                document.update_field(field_id, &FieldPatch::geometry(rect), false);
                Response::changed()
            }
        };
        response.with_source(input.source)
    }

    /// End the gesture. Geometry was applied while moving.
    pub fn pointer_up(&mut self, source: PointerSource) -> Response {
        let repaint = matches!(
            self.gesture,
            Gesture::Dragging { .. } | Gesture::Resizing { .. }
        );
        self.reset_gesture();
        Response {
            repaint,
            ..Response::default()
        }
        .with_source(source)
    }

    // ============================================================================
    // INLINE EDITING
    // ============================================================================

    /// Open the inline editor on a text-like field
    pub fn begin_inline_edit(&mut self, document: &Document, id: &str) -> bool {
        let Some(field) = document.current().field(id) else {
            return false;
        };
        if !field.kind.is_text_like() {
            return false;
        }
        self.reset_gesture();
        self.selected = Some(field.id.clone());
        self.inline = Some(InlineEditor::new(field));
        true
    }

    /// Route a key to the inline editor. Returns `None` when no editor is
    /// open.
    pub fn inline_key(&mut self, document: &mut Document, key: EditKey) -> Option<Response> {
        let editor = self.inline.as_mut()?;
        let response = match editor.handle_key(key) {
            EditOutcome::Continue => Response::repaint(),
            EditOutcome::Commit => {
                let changed = self.commit_inline(document);
                Response {
                    changed,
                    repaint: true,
                    prevent_default: false,
                }
            }
            EditOutcome::Cancel => {
                self.cancel_inline();
                Response::repaint()
            }
        };
        Some(response)
    }

    /// Close the editor and write its text back
    pub fn commit_inline(&mut self, document: &mut Document) -> bool {
        self.inline
            .take()
            .is_some_and(|editor| editor.commit(document))
    }

    /// Close the editor and drop its text
    pub fn cancel_inline(&mut self) {
        if let Some(editor) = self.inline.take() {
            tracing::debug!("Inline edit of field {} cancelled", editor.field_id());
        }
    }

    // ============================================================================
    // COMMANDS
    // ============================================================================

    pub fn delete_selected(&mut self, document: &mut Document) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };
        if document.current().field(&id).is_none() {
            self.selected = None;
            return false;
        }
        document.save_state_for_undo();
        document.delete_field(&id);
        self.selected = None;
        self.sync_with(document);
        true
    }

    pub fn duplicate_selected(&mut self, document: &mut Document) -> bool {
        let Some(id) = self.selected.as_deref() else {
            return false;
        };
        if document.current().field(id).is_none() {
            return false;
        }
        document.save_state_for_undo();
        self.selected = document.duplicate_field(id);
        self.selected.is_some()
    }

    /// Raise (`front`) or lower the selected field in the z-order
    pub fn restack_selected(&mut self, document: &mut Document, front: bool) -> bool {
        let Some(id) = self.selected.as_deref() else {
            return false;
        };
        let fields = &document.current().fields;
        let Some(index) = document.current().field_index(id) else {
            return false;
        };
        let already = if front { index + 1 == fields.len() } else { index == 0 };
        if already {
            return false;
        }
        document.save_state_for_undo();
        if front {
            document.bring_to_front(id)
        } else {
            document.send_to_back(id)
        }
    }

    /// Move the selected field by `delta`, one undo step per call
    pub fn nudge_selected(&mut self, document: &mut Document, delta: Vec2) -> bool {
        let Some(id) = self.selected.as_deref() else {
            return false;
        };
        let page = document.current().size();
        let Some(field) = document.current().field(id) else {
            return false;
        };
        let rect = field.normalized_rect(page);
        let origin = drag_origin(rect.origin() + delta, Vec2::ZERO, rect.size(), page);
        if origin == rect.origin() {
            return false;
        }
        document.update_field(id, &FieldPatch::position(origin.x, origin.y), true)
    }

    pub fn undo(&mut self, document: &mut Document) -> bool {
        self.reset_gesture();
        self.inline = None;
        let undone = document.undo();
        self.sync_with(document);
        undone
    }

    pub fn redo(&mut self, document: &mut Document) -> bool {
        self.reset_gesture();
        self.inline = None;
        let redone = document.redo();
        self.sync_with(document);
        redone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::hit_test::NoBitmaps;
    use crate::model::{Field, FieldDraft, FieldKind, Template};
    use kurbo::Size;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Duration;

    const PAGE: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn field(kind: FieldKind, id: &str, rect: Rect) -> Field {
        FieldDraft::new(kind)
            .with_id(id)
            .with_attrs(FieldPatch::geometry(rect))
            .build()
    }

    fn document_with(fields: Vec<Field>) -> Document {
        let mut template = Template::blank("Test", 800.0, 600.0);
        template.fields = fields;
        Document::new(template)
    }

    /// Inputs with the page drawn at 1:1 and clicks spaced apart in time
    struct Pointer {
        now: Instant,
        surface: Rect,
    }

    impl Pointer {
        fn new() -> Self {
            Self {
                now: Instant::now(),
                surface: PAGE,
            }
        }

        fn at(&mut self, x: f64, y: f64) -> PointerInput {
            self.now += Duration::from_millis(1000);
            PointerInput::mouse(Point::new(x, y), self.surface, self.now)
        }

        fn soon(&mut self, x: f64, y: f64) -> PointerInput {
            self.now += Duration::from_millis(100);
            PointerInput::mouse(Point::new(x, y), self.surface, self.now)
        }
    }

    fn rect_of(document: &Document, id: &str) -> Rect {
        document.current().field(id).unwrap().rect()
    }

    #[test]
    fn drag_moves_by_pointer_minus_offset() {
        let mut doc = document_with(vec![field(
            FieldKind::Text,
            "a",
            Rect::new(100.0, 100.0, 250.0, 140.0),
        )]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        assert_eq!(ctl.selected(), Some("a"));
        ctl.pointer_move(&mut doc, p.at(200.0, 150.0));
        ctl.pointer_up(PointerSource::Mouse);

        assert_eq!(rect_of(&doc, "a"), Rect::new(190.0, 140.0, 340.0, 180.0));
        assert_eq!(doc.undo_len(), 1);
        assert_eq!(ctl.gesture(), &Gesture::Idle);

        assert!(ctl.undo(&mut doc));
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(100.0, 100.0));
    }

    #[test]
    fn drag_takes_one_snapshot_for_many_moves() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        for step in 1..=10 {
            ctl.pointer_move(&mut doc, p.at(110.0 + step as f64 * 10.0, 110.0));
        }
        ctl.pointer_up(PointerSource::Mouse);
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(200.0, 100.0));
        assert_eq!(doc.undo_len(), 1);
    }

    #[test]
    fn small_movement_is_not_a_drag() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        let response = ctl.pointer_move(&mut doc, p.at(115.0, 114.0));
        ctl.pointer_up(PointerSource::Mouse);

        assert!(!response.changed);
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(100.0, 100.0));
        assert_eq!(doc.undo_len(), 0);
        assert_eq!(ctl.selected(), Some("a"));
    }

    #[test]
    fn drag_is_clamped_to_page() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        ctl.pointer_move(&mut doc, p.at(799.0, 599.0));
        assert_eq!(rect_of(&doc, "a"), Rect::new(650.0, 560.0, 800.0, 600.0));
    }

    #[test]
    fn pointer_is_mapped_through_live_surface() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();
        // Page shown at half size, offset inside the widget
        p.surface = Rect::new(20.0, 10.0, 420.0, 310.0);

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(80.0, 70.0));
        assert_eq!(ctl.selected(), Some("a"));
        assert!(matches!(ctl.gesture(), Gesture::PendingDrag { .. }));
        ctl.pointer_move(&mut doc, p.at(125.0, 95.0));
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(190.0, 150.0));
    }

    #[test]
    fn locked_image_keeps_ratio_on_east_handle() {
        let mut image = field(FieldKind::Image, "img", Rect::new(50.0, 50.0, 250.0, 150.0));
        image.lock_aspect = Some(true);
        image.value = "data:image/png;base64,AAAA".to_string();
        let mut doc = document_with(vec![image]);
        let bitmaps: HashMap<String, Size> = HashMap::from([("img".to_string(), Size::new(400.0, 200.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &bitmaps, p.at(250.0, 100.0));
        assert!(matches!(
            ctl.gesture(),
            Gesture::Resizing {
                handle: ResizeHandle::E,
                ..
            }
        ));
        ctl.pointer_move(&mut doc, p.at(350.0, 100.0));
        ctl.pointer_up(PointerSource::Mouse);

        assert_eq!(rect_of(&doc, "img"), Rect::new(50.0, 50.0, 350.0, 200.0));
        assert_eq!(doc.undo_len(), 1);
    }

    #[test]
    fn north_west_collapse_keeps_opposite_corner() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(0.0, 0.0, 30.0, 30.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(0.0, 0.0));
        ctl.pointer_move(&mut doc, p.at(300.0, 300.0));
        ctl.pointer_up(PointerSource::Mouse);

        assert_eq!(rect_of(&doc, "a"), Rect::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn resize_snapshot_waits_for_real_change() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        // East handle, moved only vertically: width unchanged
        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(250.0, 120.0));
        ctl.pointer_move(&mut doc, p.at(250.0, 130.0));
        assert_eq!(doc.undo_len(), 0);

        ctl.pointer_move(&mut doc, p.at(270.0, 130.0));
        ctl.pointer_move(&mut doc, p.at(290.0, 130.0));
        ctl.pointer_up(PointerSource::Mouse);
        assert_eq!(rect_of(&doc, "a").width(), 190.0);
        assert_eq!(doc.undo_len(), 1);
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        ctl.pointer_up(PointerSource::Mouse);
        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(500.0, 500.0));
        assert_eq!(ctl.selected(), None);
        assert_eq!(ctl.gesture(), &Gesture::Idle);
    }

    #[test]
    fn double_click_opens_inline_editor_on_text_only() {
        let mut doc = document_with(vec![
            field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0)),
            field(FieldKind::Signature, "sig", Rect::new(300.0, 300.0, 500.0, 380.0)),
        ]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        ctl.pointer_up(PointerSource::Mouse);
        ctl.pointer_down(&mut doc, &NoBitmaps, p.soon(111.0, 111.0));
        assert_eq!(ctl.editing(), Some("a"));
        assert_eq!(ctl.gesture(), &Gesture::Idle);

        ctl.cancel_inline();
        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(310.0, 310.0));
        ctl.pointer_up(PointerSource::Mouse);
        ctl.pointer_down(&mut doc, &NoBitmaps, p.soon(310.0, 310.0));
        assert_eq!(ctl.editing(), None);
    }

    #[test]
    fn inline_commit_and_cancel() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();

        assert!(ctl.begin_inline_edit(&doc, "a"));
        ctl.inline_key(&mut doc, EditKey::Text("hi".to_string()));
        ctl.inline_key(&mut doc, EditKey::Escape);
        assert_eq!(doc.current().field("a").unwrap().value, "");
        assert_eq!(ctl.editing(), None);

        ctl.begin_inline_edit(&doc, "a");
        ctl.inline_key(&mut doc, EditKey::Text("hi".to_string()));
        let response = ctl.inline_key(&mut doc, EditKey::Enter { shift: false }).unwrap();
        assert!(response.changed);
        assert_eq!(doc.current().field("a").unwrap().value, "hi");
        assert_eq!(doc.undo_len(), 1);
    }

    #[test]
    fn clicking_elsewhere_commits_inline_edit() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.begin_inline_edit(&doc, "a");
        ctl.inline_key(&mut doc, EditKey::Text("x".to_string()));
        let response = ctl.pointer_down(&mut doc, &NoBitmaps, p.at(600.0, 500.0));
        assert!(response.changed);
        assert_eq!(doc.current().field("a").unwrap().value, "x");
        assert_eq!(ctl.editing(), None);
    }

    #[test]
    fn deleted_field_aborts_gesture() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        doc.delete_field("a");
        let response = ctl.pointer_move(&mut doc, p.at(200.0, 200.0));
        assert!(!response.changed);
        assert_eq!(ctl.gesture(), &Gesture::Idle);
        assert_eq!(ctl.selected(), None);
        assert_eq!(doc.undo_len(), 0);
    }

    #[test]
    fn touch_uses_first_point_and_prevents_default() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let touches = [Point::new(110.0, 110.0), Point::new(700.0, 500.0)];
        let input = PointerInput::touch(&touches, PAGE, Instant::now()).unwrap();

        let response = ctl.pointer_down(&mut doc, &NoBitmaps, input);
        assert!(response.prevent_default);
        assert_eq!(ctl.selected(), Some("a"));
        assert!(PointerInput::touch(&[], PAGE, Instant::now()).is_none());
    }

    #[test]
    fn commands_on_selection() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        ctl.select(Some("a".to_string()));

        assert!(ctl.nudge_selected(&mut doc, Vec2::new(10.0, -1.0)));
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(110.0, 99.0));
        assert_eq!(doc.undo_len(), 1);

        assert!(ctl.duplicate_selected(&mut doc));
        let copy = ctl.selected().unwrap().to_string();
        assert_ne!(copy, "a");
        assert_eq!(rect_of(&doc, &copy).origin(), Point::new(120.0, 109.0));

        assert!(ctl.delete_selected(&mut doc));
        assert_eq!(doc.current().fields.len(), 1);
        assert_eq!(ctl.selected(), None);

        // Undoing the duplicate forgets nothing that still exists
        ctl.select(Some("a".to_string()));
        assert!(ctl.undo(&mut doc));
        assert!(ctl.undo(&mut doc));
        assert_eq!(doc.current().fields.len(), 1);
        assert_eq!(ctl.selected(), Some("a"));
    }

    #[test]
    fn undo_redo_round_trip_over_gestures() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        for target in [(300.0, 200.0), (400.0, 300.0), (200.0, 400.0)] {
            let origin = rect_of(&doc, "a").origin();
            ctl.pointer_down(&mut doc, &NoBitmaps, p.at(origin.x + 20.0, origin.y + 20.0));
            ctl.pointer_move(&mut doc, p.at(target.0, target.1));
            ctl.pointer_up(PointerSource::Mouse);
        }
        let after = doc.current().clone();

        for _ in 0..3 {
            assert!(ctl.undo(&mut doc));
        }
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(100.0, 100.0));
        for _ in 0..3 {
            assert!(ctl.redo(&mut doc));
        }
        assert_eq!(doc.current(), &after);
        assert!(!ctl.redo(&mut doc));
    }

    #[test]
    fn restack_selected_is_one_undo_step() {
        let mut doc = document_with(vec![
            field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0)),
            field(FieldKind::Text, "b", Rect::new(300.0, 100.0, 450.0, 140.0)),
        ]);
        let mut ctl = Controller::new();
        ctl.select(Some("a".to_string()));

        assert!(ctl.restack_selected(&mut doc, true));
        assert_eq!(doc.current().fields[1].id, "a");
        assert!(!ctl.restack_selected(&mut doc, true));

        assert!(ctl.undo(&mut doc));
        assert_eq!(doc.current().fields[0].id, "a");
        assert!(!ctl.restack_selected(&mut doc, false));
    }

    #[test]
    fn drag_threshold_boundary() {
        let start = Rect::new(100.0, 100.0, 250.0, 140.0);
        let mut doc = document_with(vec![field(FieldKind::Text, "a", start)]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        let response = ctl.pointer_move(&mut doc, p.at(115.9, 115.9));
        assert!(!response.changed);
        assert!(matches!(ctl.gesture(), Gesture::PendingDrag { .. }));
        ctl.pointer_up(PointerSource::Mouse);
        assert_eq!(rect_of(&doc, "a"), start);

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(110.0, 110.0));
        let response = ctl.pointer_move(&mut doc, p.at(116.0, 110.0));
        assert!(response.changed);
        assert!(matches!(ctl.gesture(), Gesture::Dragging { .. }));
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(106.0, 100.0));
    }

    #[test]
    fn drag_offset_follows_the_drawn_box() {
        // Stored past the right edge; drawn and hit-tested at x = 650
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(900.0, 100.0, 1050.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.pointer_down(&mut doc, &NoBitmaps, p.at(700.0, 110.0));
        assert_eq!(ctl.selected(), Some("a"));
        ctl.pointer_move(&mut doc, p.at(600.0, 110.0));
        ctl.pointer_up(PointerSource::Mouse);

        assert_eq!(rect_of(&doc, "a").origin(), Point::new(550.0, 100.0));
    }

    #[test]
    fn click_inside_edited_field_keeps_editor_open() {
        let mut doc = document_with(vec![field(FieldKind::Text, "a", Rect::new(100.0, 100.0, 250.0, 140.0))]);
        let mut ctl = Controller::new();
        let mut p = Pointer::new();

        ctl.begin_inline_edit(&doc, "a");
        ctl.inline_key(&mut doc, EditKey::Text("x".to_string()));
        let response = ctl.pointer_down(&mut doc, &NoBitmaps, p.at(150.0, 120.0));

        assert!(!response.changed);
        assert_eq!(ctl.editing(), Some("a"));
        assert_eq!(ctl.gesture(), &Gesture::Idle);
        assert_eq!(ctl.inline_editor().unwrap().text(), "x");
        assert_eq!(doc.current().field("a").unwrap().value, "");

        // Moving afterwards does not drag the field
        ctl.pointer_move(&mut doc, p.at(220.0, 180.0));
        assert_eq!(rect_of(&doc, "a").origin(), Point::new(100.0, 100.0));
    }
}
