// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Template canvas widget - the page, its fields, and direct manipulation

mod keyboard;
mod paint;
mod pointer;
mod view;

pub use view::template_canvas_view;

use crate::editing::{Controller, Document, Viewport};
use crate::render::Renderer;
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerButton,
    PointerButtonEvent, PointerEvent, PointerId, PointerUpdate, PropertiesMut, PropertiesRef,
    RegisterCtx, TextEvent, Update, UpdateCtx, Widget,
};
use masonry::kurbo::Size;
use masonry::vello::Scene;
use std::sync::Arc;

/// The canvas widget editing the current template of a document
pub struct TemplateCanvasWidget {
    /// Working copy of the document
    pub document: Document,

    /// Selection, gesture and inline editing state
    pub(super) controller: Controller,

    /// Owns decoded bitmaps between frames
    pub(super) renderer: Renderer,

    /// Canvas size
    pub(super) size: Size,

    /// Device pixels per logical pixel used for border snapping
    pub(super) device_pixel_ratio: f64,

    /// Ratio fixed by configuration; otherwise the window's scale factor
    /// reported with pointer events is used
    pub(super) ratio_override: Option<f64>,

    /// Touch pointer driving the current gesture; other touches are ignored
    pub(super) active_touch: Option<PointerId>,
}

impl TemplateCanvasWidget {
    pub fn new(document: Arc<Document>, ratio_override: Option<f64>) -> Self {
        Self {
            document: (*document).clone(),
            controller: Controller::new(),
            renderer: Renderer::new(),
            size: Size::new(800.0, 600.0),
            device_pixel_ratio: ratio_override.unwrap_or(1.0),
            ratio_override,
            active_touch: None,
        }
    }

    /// Page placement for the current widget size
    pub(super) fn viewport(&self) -> Viewport {
        Viewport::fit(
            self.document.current().size(),
            self.size,
            self.device_pixel_ratio,
        )
    }

    /// Replace the working document after an outside change
    pub(super) fn replace_document(&mut self, document: Document) {
        let switched = document.current_id() != self.document.current_id();
        self.document = document;
        if switched {
            self.controller = Controller::new();
        } else {
            self.controller.sync_with(&self.document);
        }
    }

    /// Pin the device pixel ratio, or release it to follow the window
    pub(super) fn set_ratio_override(&mut self, ratio_override: Option<f64>) {
        self.ratio_override = ratio_override;
        if let Some(ratio) = ratio_override {
            self.device_pixel_ratio = ratio;
        }
    }

    /// Track the window scale factor. Returns true when the ratio changed.
    pub(super) fn observe_scale_factor(&mut self, scale_factor: f64) -> bool {
        if self.ratio_override.is_some()
            || !(scale_factor.is_finite() && scale_factor > 0.0)
            || scale_factor == self.device_pixel_ratio
        {
            return false;
        }
        tracing::debug!("Device pixel ratio now {scale_factor}");
        self.device_pixel_ratio = scale_factor;
        true
    }

    /// Commit an open inline edit on focus loss. Returns the update to
    /// emit when the document changed.
    pub(super) fn blur(&mut self) -> Option<DocumentUpdate> {
        if !self.controller.commit_inline(&mut self.document) {
            return None;
        }
        Some(DocumentUpdate {
            document: self.document.clone(),
            save_requested: false,
        })
    }

    /// Emit a document update action
    pub(super) fn emit_document_update(&mut self, ctx: &mut EventCtx<'_>, save_requested: bool) {
        ctx.submit_action::<DocumentUpdate>(DocumentUpdate {
            document: self.document.clone(),
            save_requested,
        });
    }
}

/// Action emitted by the canvas when the document changed
#[derive(Debug, Clone)]
pub struct DocumentUpdate {
    pub document: Document,
    /// If true, save the current template to the store
    pub save_requested: bool,
}

impl Widget for TemplateCanvasWidget {
    type Action = DocumentUpdate;

    fn accepts_focus(&self) -> bool {
        // Allow this widget to receive keyboard events
        true
    }

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(
        &mut self,
        ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &Update,
    ) {
        // Losing focus acts as blur for the inline editor
        if let Update::FocusChanged(false) = event {
            if let Some(update) = self.blur() {
                ctx.submit_action::<DocumentUpdate>(update);
            }
            ctx.request_render();
        }
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        // Use all available space (expand to fill the window)
        let size = bc.max();
        self.size = size;
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let canvas_size = ctx.size();
        self.size = canvas_size;
        self.paint_frame(scene, canvas_size);

        // Bitmaps requested by this frame are decoded now and drawn by a
        // second pass over a cleared scene
        if self.renderer.load_pending_bitmaps() {
            scene.reset();
            self.paint_frame(scene, canvas_size);
        }
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        // Always request focus on any pointer event so keyboard shortcuts work
        ctx.request_focus();

        match event {
            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                pointer,
                state,
            }) => {
                self.handle_pointer_down(ctx, pointer, state);
            }

            PointerEvent::Move(PointerUpdate {
                pointer, current, ..
            }) => {
                self.handle_pointer_move(ctx, pointer, current);
            }

            PointerEvent::Up(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                pointer,
                ..
            }) => {
                self.handle_pointer_up(ctx, pointer);
            }

            PointerEvent::Cancel(_) => {
                self.handle_pointer_cancel(ctx);
            }

            _ => {
                // Ignore other pointer events
            }
        }
    }

    fn on_text_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &TextEvent,
    ) {
        use masonry::core::keyboard::KeyState;

        if let TextEvent::Keyboard(key_event) = event {
            if key_event.state != KeyState::Down {
                return;
            }

            let cmd = key_event.modifiers.meta() || key_event.modifiers.ctrl();
            let shift = key_event.modifiers.shift();

            // The inline editor gets every key while it is open, except
            // undo/redo which close it first
            if self.controller.inline_editor().is_some()
                && self.handle_inline_key(ctx, &key_event.key, cmd, shift)
            {
                return;
            }

            if self.handle_keyboard_shortcuts(ctx, &key_event.key, cmd, shift) {
                return;
            }

            self.handle_arrow_keys(ctx, &key_event.key, shift);
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::Canvas
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        let template = self.document.current();
        let selected = self
            .controller
            .selected()
            .and_then(|id| template.field(id))
            .map_or("no field selected".to_string(), |f| format!("{} selected", f.label));
        node.set_label(format!("Editing template {}: {}", template.name, selected));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::EditKey;
    use crate::model::{FieldDraft, FieldKind, FieldPatch, Template};
    use kurbo::Rect;

    fn widget() -> TemplateCanvasWidget {
        let mut template = Template::blank("Test", 800.0, 600.0);
        template.fields = vec![
            FieldDraft::new(FieldKind::Text)
                .with_id("a")
                .with_attrs(FieldPatch::geometry(Rect::new(100.0, 100.0, 250.0, 140.0)))
                .build(),
        ];
        TemplateCanvasWidget::new(Arc::new(Document::new(template)), None)
    }

    #[test]
    fn blur_emits_committed_inline_edit() {
        let mut canvas = widget();
        assert!(canvas.controller.begin_inline_edit(&canvas.document, "a"));
        canvas
            .controller
            .inline_key(&mut canvas.document, EditKey::Text("x".to_string()));

        let update = canvas.blur().unwrap();
        assert!(!update.save_requested);
        assert_eq!(update.document.current().field("a").unwrap().value, "x");
        assert_eq!(canvas.controller.editing(), None);

        // Nothing left to commit
        assert!(canvas.blur().is_none());
    }

    #[test]
    fn blur_without_changes_emits_nothing() {
        let mut canvas = widget();
        assert!(canvas.controller.begin_inline_edit(&canvas.document, "a"));
        assert!(canvas.blur().is_none());
        assert_eq!(canvas.controller.editing(), None);
    }

    #[test]
    fn ratio_follows_window_unless_configured() {
        let mut canvas = widget();
        assert_eq!(canvas.device_pixel_ratio, 1.0);
        assert!(canvas.observe_scale_factor(2.0));
        assert_eq!(canvas.device_pixel_ratio, 2.0);
        assert!(!canvas.observe_scale_factor(2.0));
        assert!(!canvas.observe_scale_factor(f64::NAN));

        canvas.set_ratio_override(Some(1.5));
        assert!(!canvas.observe_scale_factor(3.0));
        assert_eq!(canvas.device_pixel_ratio, 1.5);
    }
}
