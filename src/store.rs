// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Template persistence.
//!
//! The editor only needs to load the whole collection and to upsert one
//! template by id. `JsonFileStore` keeps the collection as a JSON array in
//! a single file.

use crate::error::{Error, Result};
use crate::model::Template;
use std::path::{Path, PathBuf};

/// Where templates are loaded from and saved to
pub trait TemplateStore {
    /// Every stored template, in stored order
    fn load_templates(&self) -> Result<Vec<Template>>;

    /// Replace the template with the same id, or append it
    fn upsert_template(&mut self, template: &Template) -> Result<()>;
}

/// All templates in one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, templates: &[Template]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(templates)?;
        // Write beside the target and rename so a failed write never truncates the store
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| Error::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(())
    }
}

impl TemplateStore for JsonFileStore {
    fn load_templates(&self) -> Result<Vec<Template>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let templates: Vec<Template> = serde_json::from_str(&text)?;
        tracing::info!(
            "Loaded {} templates from {}",
            templates.len(),
            self.path.display()
        );
        Ok(templates)
    }

    fn upsert_template(&mut self, template: &Template) -> Result<()> {
        let mut templates = self.load_templates()?;
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        self.write_all(&templates)?;
        tracing::info!("Saved template '{}' to {}", template.name, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(store.load_templates().unwrap().is_empty());
    }

    #[test]
    fn upsert_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("templates.json"));

        let mut first = Template::professional();
        let second = Template::blank("Second", 400.0, 300.0);
        store.upsert_template(&first).unwrap();
        store.upsert_template(&second).unwrap();

        first.name = "Renamed".to_string();
        first.fields.truncate(2);
        store.upsert_template(&first).unwrap();

        let loaded = store.load_templates().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], first);
        assert_eq!(loaded[1], second);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.load_templates(), Err(Error::Json(_))));
    }
}
