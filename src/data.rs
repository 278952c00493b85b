// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Application state and data structures

use crate::config::EditorConfig;
use crate::editing::Document;
use crate::model::{FieldDraft, FieldKind, Starter};
use crate::store::{JsonFileStore, TemplateStore};
use std::sync::Arc;
use xilem::WindowId;

/// Main application state
pub struct AppState {
    /// Template collection being edited. Replaced wholesale whenever it
    /// changes so the canvas view notices.
    pub document: Arc<Document>,

    /// Where templates are persisted
    pub store: Box<dyn TemplateStore>,

    pub config: EditorConfig,

    /// Last load or save outcome, shown in the toolbar
    pub status: Option<String>,

    /// Whether the app should keep running
    pub running: bool,

    /// Main window ID (stable across rebuilds to prevent window
    /// recreation)
    pub main_window_id: WindowId,
}

impl AppState {
    /// Load the template collection from the configured store
    pub fn new(config: EditorConfig) -> Self {
        let store = JsonFileStore::new(config.store_path.clone());
        Self::with_store(config, Box::new(store))
    }

    pub fn with_store(config: EditorConfig, store: Box<dyn TemplateStore>) -> Self {
        let (templates, status) = match store.load_templates() {
            Ok(templates) => (templates, None),
            Err(e) => {
                tracing::warn!("Failed to load templates: {e}");
                (Vec::new(), Some(format!("Could not load templates: {e}")))
            }
        };

        let document = if templates.is_empty() {
            Document::new(config.starter.build())
        } else {
            Document::from_templates(templates, None)
        }
        .with_undo_limit(config.undo_limit);

        Self {
            document: Arc::new(document),
            store,
            config,
            status,
            running: true,
            main_window_id: WindowId::next(),
        }
    }

    /// Configured device pixel ratio, if any, handed to the canvas
    pub fn device_pixel_ratio(&self) -> Option<f64> {
        self.config.device_pixel_ratio
    }

    /// Accept the document emitted by the canvas
    pub fn update_document(&mut self, document: Document) {
        self.document = Arc::new(document);
    }

    /// Write the current template to the store
    pub fn save_current(&mut self) {
        let template = self.document.current();
        self.status = Some(match self.store.upsert_template(template) {
            Ok(()) => format!("Saved {}", template.name),
            Err(e) => {
                tracing::warn!("Failed to save template: {e}");
                format!("Save failed: {e}")
            }
        });
    }

    pub fn create_template(&mut self, starter: Starter) {
        let id = Arc::make_mut(&mut self.document).create_template(starter);
        tracing::info!("Created template {id}");
    }

    pub fn select_template(&mut self, id: &str) {
        if Arc::make_mut(&mut self.document).select_template(id) {
            tracing::info!("Switched to template {id}");
        }
    }

    /// Append a default field of `kind` as one undoable step
    pub fn add_field(&mut self, kind: FieldKind) {
        let document = Arc::make_mut(&mut self.document);
        document.save_state_for_undo();
        document.add_field(FieldDraft::new(kind));
    }
}

impl xilem::AppState for AppState {
    fn keep_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(dir: &std::path::Path) -> EditorConfig {
        EditorConfig {
            store_path: dir.join("templates.json"),
            ..EditorConfig::default()
        }
    }

    #[test]
    fn empty_store_starts_from_configured_starter() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            starter: Starter::Empty,
            ..config_in(dir.path())
        };
        let state = AppState::new(config);
        assert_eq!(state.document.templates().len(), 1);
        assert!(state.document.current().fields.is_empty());
        assert_eq!(state.status, None);
    }

    #[test]
    fn saved_templates_are_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config_in(dir.path()));
        state.add_field(FieldKind::Amount);
        state.save_current();
        let saved = state.document.current().clone();

        let reloaded = AppState::new(config_in(dir.path()));
        assert_eq!(reloaded.document.current(), &saved);
    }

    #[test]
    fn add_field_is_undoable() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config_in(dir.path()));
        let before = state.document.current().fields.len();
        state.add_field(FieldKind::Text);
        assert_eq!(state.document.current().fields.len(), before + 1);

        let mut document = (*state.document).clone();
        assert!(document.undo());
        assert_eq!(document.current().fields.len(), before);
    }

    #[test]
    fn unreadable_store_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("templates.json");
        std::fs::write(&path, "not json").unwrap();
        let state = AppState::new(config_in(dir.path()));
        assert!(state.status.is_some());
        assert_eq!(state.document.templates().len(), 1);
    }

    #[test]
    fn create_and_select_templates() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config_in(dir.path()));
        let first = state.document.current_id().to_string();
        state.create_template(Starter::Empty);
        assert_eq!(state.document.templates().len(), 2);
        assert_ne!(state.document.current_id(), first);
        state.select_template(&first);
        assert_eq!(state.document.current_id(), first);
    }

    #[test]
    fn closing_the_window_stops_the_app() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config_in(dir.path()));
        assert!(xilem::AppState::keep_running(&state));
        state.running = false;
        assert!(!xilem::AppState::keep_running(&state));
    }
}
