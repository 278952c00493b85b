// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Xilem View wrapper for TemplateCanvasWidget

use super::{DocumentUpdate, TemplateCanvasWidget};
use crate::editing::Document;
use std::marker::PhantomData;
use std::sync::Arc;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Create a canvas view over a document with a callback for document
/// updates
///
/// The callback receives the updated document and a boolean indicating
/// whether save was requested (Cmd+S). Without a `device_pixel_ratio`
/// the canvas follows the window's scale factor.
pub fn template_canvas_view<State, F>(
    document: Arc<Document>,
    device_pixel_ratio: Option<f64>,
    on_document_update: F,
) -> TemplateCanvasView<State, F>
where
    F: Fn(&mut State, Document, bool),
{
    TemplateCanvasView {
        document,
        device_pixel_ratio,
        on_document_update,
        phantom: PhantomData,
    }
}

/// The Xilem View for TemplateCanvasWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct TemplateCanvasView<State, F> {
    document: Arc<Document>,
    device_pixel_ratio: Option<f64>,
    on_document_update: F,
    phantom: PhantomData<fn() -> State>,
}

impl<State, F> ViewMarker for TemplateCanvasView<State, F> {}

impl<State: 'static, F: Fn(&mut State, Document, bool) + 'static> View<State, (), ViewCtx>
    for TemplateCanvasView<State, F>
{
    type Element = Pod<TemplateCanvasWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = TemplateCanvasWidget::new(self.document.clone(), self.device_pixel_ratio);
        let pod = ctx.create_pod(widget);
        ctx.record_action(pod.new_widget.id());
        (pod, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        // The app replaces the Arc whenever the document changes outside
        // the widget, e.g. after a template switch
        if !Arc::ptr_eq(&self.document, &prev.document) {
            tracing::debug!("[TemplateCanvasView::rebuild] Document changed, updating widget");
            let mut widget = element.downcast::<TemplateCanvasWidget>();
            widget.widget.replace_document((*self.document).clone());
            widget.ctx.request_render();
        }
        if self.device_pixel_ratio != prev.device_pixel_ratio {
            let mut widget = element.downcast::<TemplateCanvasWidget>();
            widget.widget.set_ratio_override(self.device_pixel_ratio);
            widget.ctx.request_render();
        }
    }

    fn teardown(
        &self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        _element: Mut<'_, Self::Element>,
    ) {
        // No cleanup needed
    }

    fn message(
        &self,
        _view_state: &mut Self::ViewState,
        message: &mut MessageContext,
        _element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<()> {
        match message.take_message::<DocumentUpdate>() {
            Some(update) => {
                (self.on_document_update)(app_state, update.document, update.save_requested);
                // Propagate to the root so the rest of the UI rebuilds
                MessageResult::Action(())
            }
            None => MessageResult::Stale,
        }
    }
}
