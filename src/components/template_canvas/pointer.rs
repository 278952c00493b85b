// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event handlers for TemplateCanvasWidget

use super::TemplateCanvasWidget;
use crate::editing::{PointerInput, PointerSource, Response};
use masonry::core::{EventCtx, PointerInfo, PointerState, PointerType};
use std::time::Instant;

impl TemplateCanvasWidget {
    // ============================================================================
    // POINTER EVENT HANDLERS
    // ============================================================================

    /// Build controller input, or `None` for touches other than the one
    /// driving the gesture
    fn pointer_input(
        &self,
        ctx: &EventCtx<'_>,
        pointer: &PointerInfo,
        state: &PointerState,
    ) -> Option<PointerInput> {
        let position = ctx.local_position(state.position);
        // The page rectangle is recomputed from the live widget size
        let surface = self.viewport().page_rect();
        let now = Instant::now();

        if pointer.pointer_type != PointerType::Touch {
            return Some(PointerInput::mouse(position, surface, now));
        }
        if self
            .active_touch
            .is_some_and(|id| Some(id) != pointer.pointer_id)
        {
            return None;
        }
        PointerInput::touch(&[position], surface, now)
    }

    fn apply_response(&mut self, ctx: &mut EventCtx<'_>, response: Response) {
        if response.changed {
            self.emit_document_update(ctx, false);
        }
        if response.repaint {
            ctx.request_render();
        }
        if response.prevent_default {
            ctx.set_handled();
        }
    }

    /// Handle pointer down event
    pub(super) fn handle_pointer_down(
        &mut self,
        ctx: &mut EventCtx<'_>,
        pointer: &PointerInfo,
        state: &PointerState,
    ) {
        if self.observe_scale_factor(state.scale_factor) {
            ctx.request_render();
        }
        let Some(input) = self.pointer_input(ctx, pointer, state) else {
            return;
        };
        if input.source == PointerSource::Touch {
            self.active_touch = pointer.pointer_id;
        }
        tracing::debug!(
            "[TemplateCanvasWidget] Down at {:?} ({:?})",
            input.position,
            input.source
        );

        ctx.capture_pointer();
        let response =
            self.controller
                .pointer_down(&mut self.document, self.renderer.bitmaps(), input);
        self.apply_response(ctx, response);
    }

    /// Handle pointer move event
    pub(super) fn handle_pointer_move(
        &mut self,
        ctx: &mut EventCtx<'_>,
        pointer: &PointerInfo,
        current: &PointerState,
    ) {
        if self.observe_scale_factor(current.scale_factor) {
            ctx.request_render();
        }
        let Some(input) = self.pointer_input(ctx, pointer, current) else {
            return;
        };
        let response = self.controller.pointer_move(&mut self.document, input);
        self.apply_response(ctx, response);
    }

    /// Handle pointer up event
    pub(super) fn handle_pointer_up(&mut self, ctx: &mut EventCtx<'_>, pointer: &PointerInfo) {
        let source = if pointer.pointer_type == PointerType::Touch {
            if self
                .active_touch
                .is_some_and(|id| Some(id) != pointer.pointer_id)
            {
                return;
            }
            self.active_touch = None;
            PointerSource::Touch
        } else {
            PointerSource::Mouse
        };

        let response = self.controller.pointer_up(source);
        ctx.release_pointer();
        self.apply_response(ctx, response);
    }

    /// Handle pointer cancel: geometry already applied stays, the gesture ends
    pub(super) fn handle_pointer_cancel(&mut self, ctx: &mut EventCtx<'_>) {
        self.active_touch = None;
        self.controller.reset_gesture();
        ctx.request_render();
    }
}
