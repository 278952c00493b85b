// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard event handlers for TemplateCanvasWidget

use super::TemplateCanvasWidget;
use crate::editing::EditKey;
use crate::model::FieldPatch;
use crate::settings;
use masonry::core::EventCtx;
use masonry::core::keyboard::{Key, NamedKey};

impl TemplateCanvasWidget {
    /// Route a key to the open inline editor. Returns false for keys the
    /// editor leaves to the canvas shortcuts.
    pub(super) fn handle_inline_key(
        &mut self,
        ctx: &mut EventCtx<'_>,
        key: &Key,
        cmd: bool,
        shift: bool,
    ) -> bool {
        if cmd {
            // Undo/redo act on the document; commit what was typed first
            if is_undo_key(key) {
                self.controller.commit_inline(&mut self.document);
                return false;
            }
            return true;
        }

        let edit_key = match key {
            Key::Named(NamedKey::Enter) => EditKey::Enter { shift },
            Key::Named(NamedKey::Escape) => EditKey::Escape,
            Key::Named(NamedKey::Backspace) => EditKey::Backspace,
            Key::Named(NamedKey::Delete) => EditKey::Delete,
            Key::Named(NamedKey::ArrowLeft) => EditKey::Left,
            Key::Named(NamedKey::ArrowRight) => EditKey::Right,
            Key::Named(NamedKey::Home) => EditKey::Home,
            Key::Named(NamedKey::End) => EditKey::End,
            Key::Character(c) => EditKey::Text(c.to_string()),
            _ => return true,
        };

        if let Some(response) = self.controller.inline_key(&mut self.document, edit_key) {
            if response.changed {
                self.emit_document_update(ctx, false);
            }
            ctx.request_render();
        }
        ctx.set_handled();
        true
    }

    pub(super) fn handle_keyboard_shortcuts(
        &mut self,
        ctx: &mut EventCtx<'_>,
        key: &Key,
        cmd: bool,
        shift: bool,
    ) -> bool {
        if self.handle_undo_redo(ctx, cmd, shift, key) {
            return true;
        }

        if self.handle_save(ctx, cmd, key) {
            return true;
        }

        if self.handle_import_image(ctx, cmd, shift, key) {
            return true;
        }

        if self.handle_duplicate(ctx, cmd, key) {
            return true;
        }

        if self.handle_restack(ctx, cmd, key) {
            return true;
        }

        if self.handle_delete_field(ctx, key) {
            return true;
        }

        if self.handle_start_inline_edit(ctx, key) {
            return true;
        }

        false
    }

    fn handle_undo_redo(&mut self, ctx: &mut EventCtx<'_>, cmd: bool, shift: bool, key: &Key) -> bool {
        if !cmd || !is_undo_key(key) {
            return false;
        }

        let changed = if shift {
            self.controller.redo(&mut self.document)
        } else {
            self.controller.undo(&mut self.document)
        };

        if changed {
            self.emit_document_update(ctx, false);
            ctx.request_render();
        }
        ctx.set_handled();
        true
    }

    fn handle_save(&mut self, ctx: &mut EventCtx<'_>, cmd: bool, key: &Key) -> bool {
        if !cmd || !matches!(key, Key::Character(c) if c == "s") {
            return false;
        }

        self.emit_document_update(ctx, true);
        ctx.set_handled();
        true
    }

    /// Cmd+D: duplicate the selected field
    fn handle_duplicate(&mut self, ctx: &mut EventCtx<'_>, cmd: bool, key: &Key) -> bool {
        if !cmd || !matches!(key, Key::Character(c) if c == "d") {
            return false;
        }

        if self.controller.duplicate_selected(&mut self.document) {
            self.emit_document_update(ctx, false);
            ctx.request_render();
        }
        ctx.set_handled();
        true
    }

    /// Cmd+] brings the selected field to the front, Cmd+[ sends it back
    fn handle_restack(&mut self, ctx: &mut EventCtx<'_>, cmd: bool, key: &Key) -> bool {
        let front = match key {
            Key::Character(c) if cmd && c == "]" => true,
            Key::Character(c) if cmd && c == "[" => false,
            _ => return false,
        };

        if self.controller.restack_selected(&mut self.document, front) {
            self.emit_document_update(ctx, false);
            ctx.request_render();
        }
        ctx.set_handled();
        true
    }

    fn handle_delete_field(&mut self, ctx: &mut EventCtx<'_>, key: &Key) -> bool {
        if !matches!(
            key,
            Key::Named(NamedKey::Backspace) | Key::Named(NamedKey::Delete)
        ) {
            return false;
        }

        if !self.controller.delete_selected(&mut self.document) {
            return false;
        }

        self.emit_document_update(ctx, false);
        ctx.request_render();
        ctx.set_handled();
        true
    }

    /// Enter opens the inline editor on the selected text field
    fn handle_start_inline_edit(&mut self, ctx: &mut EventCtx<'_>, key: &Key) -> bool {
        if !matches!(key, Key::Named(NamedKey::Enter)) {
            return false;
        }
        let Some(id) = self.controller.selected().map(str::to_string) else {
            return false;
        };
        if !self.controller.begin_inline_edit(&self.document, &id) {
            return false;
        }

        ctx.request_render();
        ctx.set_handled();
        true
    }

    /// Cmd+Shift+I: load an image file into the selected image or
    /// signature field
    fn handle_import_image(&mut self, ctx: &mut EventCtx<'_>, cmd: bool, shift: bool, key: &Key) -> bool {
        if !cmd || !shift {
            return false;
        }

        if !matches!(key, Key::Character(c) if c.eq_ignore_ascii_case("i")) {
            return false;
        }

        let Some(id) = self.controller.selected().map(str::to_string) else {
            return false;
        };
        if !self
            .document
            .current()
            .field(&id)
            .is_some_and(|f| f.kind.is_bitmap())
        {
            return false;
        }

        let path = rfd::FileDialog::new()
            .set_title("Import Image")
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file();

        let path = match path {
            Some(p) => p,
            None => return true, // Dialog cancelled
        };

        match crate::upload::image_file_to_data_url(&path) {
            Ok(url) => {
                self.document.update_field(&id, &FieldPatch::value(url), true);
                self.emit_document_update(ctx, false);
                ctx.request_render();
            }
            Err(e) => {
                tracing::error!("Failed to import image: {e}");
            }
        }

        ctx.set_handled();
        true
    }

    /// Arrow keys nudge the selected field; one undo step per press
    pub(super) fn handle_arrow_keys(&mut self, ctx: &mut EventCtx<'_>, key: &Key, shift: bool) {
        let (dx, dy) = match key {
            Key::Named(NamedKey::ArrowLeft) => (-1.0, 0.0),
            Key::Named(NamedKey::ArrowRight) => (1.0, 0.0),
            // Document space: Y increases downward
            Key::Named(NamedKey::ArrowUp) => (0.0, -1.0),
            Key::Named(NamedKey::ArrowDown) => (0.0, 1.0),
            _ => return,
        };

        let amount = if shift {
            settings::nudge::SHIFT
        } else {
            settings::nudge::BASE
        };
        let delta = kurbo::Vec2::new(dx * amount, dy * amount);
        if self.controller.nudge_selected(&mut self.document, delta) {
            self.emit_document_update(ctx, false);
            ctx.request_render();
        }
        ctx.set_handled();
    }
}

/// Z with or without Shift; Shift+Z arrives upper case
fn is_undo_key(key: &Key) -> bool {
    matches!(key, Key::Character(c) if c.eq_ignore_ascii_case("z"))
}
