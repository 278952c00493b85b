// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Library error type.
//!
//! Geometry problems never surface here: bad field geometry is normalised
//! rather than reported. Errors come from the edges of the editor, namely
//! the template store, configuration files and bitmap decoding.

use std::path::PathBuf;

/// Errors produced by billcanvas
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("base64 payload error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("not a base64 data URL")]
    InvalidDataUrl,

    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),
}

impl Error {
    /// Wrap an I/O error with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
