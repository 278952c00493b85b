// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! The document aggregate: template collection, current template, history.
//!
//! `Document` is the only thing that mutates templates. The current
//! template is stored *inside* the collection and addressed by index, so
//! the canvas, the template list and the undo history always see the same
//! field list. Undo timing belongs to the caller: gestures take one
//! snapshot per gesture through [`Document::save_state_for_undo`] and then
//! apply many patches without recording.

use super::undo::UndoState;
use crate::model::{FieldDraft, FieldId, FieldPatch, Starter, Template, TemplateId, new_id};
use crate::settings;

/// Template collection plus the editing history of the current template
#[derive(Debug, Clone)]
pub struct Document {
    templates: Vec<Template>,
    current: usize,
    undo: UndoState<Template>,
}

impl Document {
    /// A document holding a single template
    pub fn new(template: Template) -> Self {
        Self {
            templates: vec![template],
            current: 0,
            undo: UndoState::new(),
        }
    }

    /// A document over a loaded collection.
    ///
    /// Selects `current_id` when present, otherwise the first template. An
    /// empty collection gets the default starter so there is always a
    /// current template.
    pub fn from_templates(mut templates: Vec<Template>, current_id: Option<&str>) -> Self {
        if templates.is_empty() {
            templates.push(Starter::default().build());
        }
        let current = current_id
            .and_then(|id| templates.iter().position(|t| t.id == id))
            .unwrap_or(0);
        Self {
            templates,
            current,
            undo: UndoState::new(),
        }
    }

    /// Replace the history bound (drops existing history)
    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.undo = UndoState::with_limit(limit);
        self
    }

    // ============================================================================
    // READ ACCESS
    // ============================================================================

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn current(&self) -> &Template {
        &self.templates[self.current]
    }

    pub fn current_id(&self) -> &str {
        &self.current().id
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.undo.redo_len()
    }

    fn current_mut(&mut self) -> &mut Template {
        &mut self.templates[self.current]
    }

    // ============================================================================
    // TEMPLATE COLLECTION
    // ============================================================================

    /// Add a template built by `starter` and make it current
    pub fn create_template(&mut self, starter: Starter) -> TemplateId {
        let template = starter.build();
        let id = template.id.clone();
        tracing::info!("Created template '{}' ({:?})", template.name, starter);
        self.templates.push(template);
        self.switch_to(self.templates.len() - 1);
        id
    }

    /// Make another template current. History is per template, so it is
    /// cleared on a switch.
    pub fn select_template(&mut self, id: &str) -> bool {
        match self.templates.iter().position(|t| t.id == id) {
            Some(index) => {
                if index != self.current {
                    self.switch_to(index);
                }
                true
            }
            None => false,
        }
    }

    fn switch_to(&mut self, index: usize) {
        self.current = index;
        self.undo.clear();
    }

    /// Rename the current template
    pub fn set_template_info(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let template = self.current_mut();
        template.name = name.into();
        template.description = description.into();
    }

    // ============================================================================
    // HISTORY
    // ============================================================================

    /// Snapshot the current template ahead of a mutation.
    ///
    /// Trims history to the undo limit and invalidates redo.
    pub fn save_state_for_undo(&mut self) {
        let snapshot = self.current().clone();
        self.undo.add_undo_group(snapshot);
        tracing::debug!("Saved undo snapshot ({} held)", self.undo.undo_len());
    }

    /// Restore the most recent snapshot. Silent no-op with empty history.
    pub fn undo(&mut self) -> bool {
        let current = self.current().clone();
        match self.undo.undo(current) {
            Some(previous) => {
                *self.current_mut() = previous;
                tracing::info!("Undo: restored previous state");
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone state. Silent no-op when empty.
    pub fn redo(&mut self) -> bool {
        let current = self.current().clone();
        match self.undo.redo(current) {
            Some(next) => {
                *self.current_mut() = next;
                tracing::info!("Redo: restored next state");
                true
            }
            None => false,
        }
    }

    // ============================================================================
    // FIELD MUTATION
    // ============================================================================

    /// Merge `patch` into the field with `id`.
    ///
    /// With `record_undo` a snapshot is saved first; gestures pass `false`
    /// after saving their own single snapshot. Geometry is clamped into the
    /// page after the merge. Returns false when no such field exists.
    pub fn update_field(&mut self, id: &str, patch: &FieldPatch, record_undo: bool) -> bool {
        if self.current().field(id).is_none() {
            tracing::debug!("update_field: no field {id}");
            return false;
        }
        if record_undo {
            self.save_state_for_undo();
        }

        let page = self.current().size();
        let Some(field) = self.current_mut().field_mut(id) else {
            return false;
        };
        patch.apply(field);
        if patch.touches_geometry() {
            let rect = field.normalized_rect(page);
            field.set_rect(rect);
        }
        true
    }

    /// Append a field, filling omitted attributes with defaults.
    ///
    /// A missing or already-used id is replaced by a fresh one.
    pub fn add_field(&mut self, draft: FieldDraft) -> FieldId {
        let mut field = draft.build();
        if field.id.is_empty() || self.current().field(&field.id).is_some() {
            field.id = new_id();
        }
        let rect = field.normalized_rect(self.current().size());
        field.set_rect(rect);

        let id = field.id.clone();
        tracing::debug!("Added {:?} field {id}", field.kind);
        self.current_mut().fields.push(field);
        id
    }

    /// Remove a field. Returns the removed field, if it existed.
    pub fn delete_field(&mut self, id: &str) -> Option<crate::model::Field> {
        let index = self.current().field_index(id)?;
        tracing::debug!("Deleted field {id}");
        Some(self.current_mut().fields.remove(index))
    }

    /// Copy a field, offset and clamped, on top of everything else
    pub fn duplicate_field(&mut self, id: &str) -> Option<FieldId> {
        let mut copy = self.current().field(id)?.clone();
        copy.id = new_id();
        copy.x += settings::field::DUPLICATE_OFFSET;
        copy.y += settings::field::DUPLICATE_OFFSET;
        let rect = copy.normalized_rect(self.current().size());
        copy.set_rect(rect);

        let new_id = copy.id.clone();
        self.current_mut().fields.push(copy);
        Some(new_id)
    }

    /// Move a field to the top of the z-order
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        let Some(index) = self.current().field_index(id) else {
            return false;
        };
        let fields = &mut self.current_mut().fields;
        let field = fields.remove(index);
        fields.push(field);
        true
    }

    /// Move a field to the bottom of the z-order
    pub fn send_to_back(&mut self, id: &str) -> bool {
        let Some(index) = self.current().field_index(id) else {
            return false;
        };
        let fields = &mut self.current_mut().fields;
        let field = fields.remove(index);
        fields.insert(0, field);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldKind, Template};
    use kurbo::Rect;
    use pretty_assertions::assert_eq;

    fn doc_with_field() -> (Document, FieldId) {
        let mut doc = Document::new(Template::blank("Test", 800.0, 600.0));
        let id = doc.add_field(FieldDraft::new(FieldKind::Text).with_id("a"));
        (doc, id)
    }

    #[test]
    fn add_field_applies_defaults() {
        let (doc, id) = doc_with_field();
        let field = doc.current().field(&id).unwrap();
        assert_eq!(field.rect().size(), kurbo::Size::new(150.0, 40.0));
        assert_eq!(field.font_size, 16.0);
        assert_eq!(field.border_radius, 6.0);
    }

    #[test]
    fn add_field_replaces_duplicate_id() {
        let (mut doc, id) = doc_with_field();
        let second = doc.add_field(FieldDraft::new(FieldKind::Text).with_id(id.clone()));
        assert_ne!(second, id);
        assert_eq!(doc.current().fields.len(), 2);
    }

    #[test]
    fn update_field_records_undo_when_asked() {
        let (mut doc, id) = doc_with_field();
        assert!(doc.update_field(&id, &FieldPatch::value("hello"), true));
        assert_eq!(doc.undo_len(), 1);
        assert!(doc.update_field(&id, &FieldPatch::value("again"), false));
        assert_eq!(doc.undo_len(), 1);

        assert!(doc.undo());
        assert_eq!(doc.current().field(&id).unwrap().value, "");
    }

    #[test]
    fn update_missing_field_is_noop() {
        let (mut doc, _) = doc_with_field();
        assert!(!doc.update_field("missing", &FieldPatch::value("x"), true));
        assert_eq!(doc.undo_len(), 0);
    }

    #[test]
    fn update_field_clamps_geometry() {
        let (mut doc, id) = doc_with_field();
        doc.update_field(&id, &FieldPatch::geometry(Rect::new(780.0, -10.0, 790.0, 0.0)), false);
        let rect = doc.current().field(&id).unwrap().rect();
        assert_eq!(rect, Rect::new(780.0, 0.0, 800.0, 20.0));
    }

    #[test]
    fn undo_redo_round_trip() {
        let (mut doc, id) = doc_with_field();
        let mut states = vec![doc.current().clone()];
        for i in 0..4 {
            doc.save_state_for_undo();
            doc.update_field(&id, &FieldPatch::position(10.0 * i as f64, 5.0), false);
            states.push(doc.current().clone());
        }
        let final_state = doc.current().clone();

        for expected in states.iter().rev().skip(1) {
            assert!(doc.undo());
            assert_eq!(doc.current(), expected);
        }
        assert!(!doc.undo());
        for _ in 0..4 {
            assert!(doc.redo());
        }
        assert_eq!(doc.current(), &final_state);
        assert!(!doc.redo());
    }

    #[test]
    fn new_mutation_after_undo_clears_redo() {
        let (mut doc, id) = doc_with_field();
        doc.update_field(&id, &FieldPatch::value("one"), true);
        doc.undo();
        assert!(doc.can_redo());

        doc.update_field(&id, &FieldPatch::value("two"), true);
        assert!(!doc.can_redo());
        assert!(!doc.redo());
        assert_eq!(doc.current().field(&id).unwrap().value, "two");
    }

    #[test]
    fn delete_field_and_undo() {
        let (mut doc, id) = doc_with_field();
        doc.save_state_for_undo();
        assert!(doc.delete_field(&id).is_some());
        assert!(doc.current().fields.is_empty());
        assert!(doc.delete_field(&id).is_none());
        doc.undo();
        assert!(doc.current().field(&id).is_some());
    }

    #[test]
    fn collection_and_current_stay_in_sync() {
        let (mut doc, id) = doc_with_field();
        doc.update_field(&id, &FieldPatch::value("synced"), true);
        let current_id = doc.current_id().to_string();
        let in_list = doc.templates().iter().find(|t| t.id == current_id).unwrap();
        assert_eq!(in_list.field(&id).unwrap().value, "synced");
    }

    #[test]
    fn switching_templates_clears_history() {
        let (mut doc, id) = doc_with_field();
        let first = doc.current_id().to_string();
        doc.update_field(&id, &FieldPatch::value("x"), true);
        let second = doc.create_template(Starter::Empty);
        assert_eq!(doc.current_id(), second);
        assert!(!doc.can_undo());
        assert!(doc.select_template(&first));
        assert_eq!(doc.current().field(&id).unwrap().value, "x");
        assert!(!doc.select_template("nope"));
    }

    #[test]
    fn duplicate_and_z_order() {
        let (mut doc, id) = doc_with_field();
        let copy = doc.duplicate_field(&id).unwrap();
        let original = doc.current().field(&id).unwrap().rect();
        let copied = doc.current().field(&copy).unwrap().rect();
        assert_eq!(copied.origin(), original.origin() + kurbo::Vec2::new(10.0, 10.0));
        assert_eq!(doc.current().fields.last().unwrap().id, copy);

        assert!(doc.send_to_back(&copy));
        assert_eq!(doc.current().fields[0].id, copy);
        assert!(doc.bring_to_front(&copy));
        assert_eq!(doc.current().fields[1].id, copy);
    }

    #[test]
    fn empty_collection_gets_starter() {
        let doc = Document::from_templates(Vec::new(), None);
        assert_eq!(doc.templates().len(), 1);
    }
}
