// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration loaded from `billcanvas.toml`.
//!
//! Every key is optional. A missing file means all defaults.

use crate::error::{Error, Result};
use crate::model::Starter;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "billcanvas.toml";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// JSON file holding the template collection
    pub store_path: PathBuf,
    /// Maximum number of undo snapshots kept
    pub undo_limit: usize,
    /// Overrides the window's device pixel ratio when set
    pub device_pixel_ratio: Option<f64>,
    /// Layout used for the first template and for new templates
    pub starter: Starter,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("templates.json"),
            undo_limit: settings::undo::LIMIT,
            device_pixel_ratio: None,
            starter: Starter::default(),
        }
    }
}

impl EditorConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        if config.undo_limit == 0 {
            config.undo_limit = settings::undo::LIMIT;
        }
        config.device_pixel_ratio = config
            .device_pixel_ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0);
        Ok(config)
    }

    /// Load configuration from `path`, or defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }
}
