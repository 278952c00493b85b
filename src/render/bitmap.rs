// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Decoded bitmaps for image and signature fields.
//!
//! Field values carry bitmaps as base64 data URLs. Decoding is deferred:
//! the renderer *requests* a bitmap while painting and gets nothing back
//! until `load_pending` has run, after which the widget paints again. The
//! cache is keyed by field id and owned by the renderer; it is never part
//! of the document, so undo snapshots and serialization only see the data
//! URL string.

use crate::editing::hit_test::BitmapSizes;
use crate::error::{Error, Result};
use crate::model::{FieldId, Template};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use kurbo::Size;
use peniko::{Blob, ImageData, ImageFormat};
use std::collections::HashMap;

// ============================================================================
// DATA URLS
// ============================================================================

/// Split a `data:<mime>;base64,<payload>` URL into mime type and bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url.trim().strip_prefix("data:").ok_or(Error::InvalidDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(Error::InvalidDataUrl)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(Error::InvalidDataUrl)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Encode bytes as a base64 data URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

// ============================================================================
// BITMAP
// ============================================================================

/// A decoded RGBA8 image ready for drawing
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub image_data: ImageData,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    /// Decode PNG or JPEG bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let width = rgba.width();
        let height = rgba.height();
        let pixels: Vec<u8> = rgba.into_raw();

        let image_data = ImageData {
            data: Blob::from(pixels),
            format: ImageFormat::Rgba8,
            alpha_type: peniko::ImageAlphaType::Alpha,
            width,
            height,
        };
        Ok(Self {
            image_data,
            width,
            height,
        })
    }

    /// Decode a base64 data URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let (_mime, bytes) = decode_data_url(url)?;
        Self::decode(&bytes)
    }

    /// Natural size in pixels
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

// ============================================================================
// CACHE
// ============================================================================

#[derive(Debug, Clone)]
enum Entry {
    Pending,
    Loaded(Bitmap),
    Failed,
}

#[derive(Debug, Clone)]
struct CacheSlot {
    source: String,
    entry: Entry,
}

/// Lazily decoded bitmaps keyed by field id
#[derive(Debug, Clone, Default)]
pub struct BitmapCache {
    slots: HashMap<FieldId, CacheSlot>,
}

impl BitmapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bitmap for `field_id` if `source` has already been decoded.
    ///
    /// An unknown or changed source is queued for decoding and yields
    /// `None` for now.
    pub fn request(&mut self, field_id: &str, source: &str) -> Option<&Bitmap> {
        let stale = self
            .slots
            .get(field_id)
            .is_none_or(|slot| slot.source != source);
        if stale {
            self.slots.insert(
                field_id.to_string(),
                CacheSlot {
                    source: source.to_string(),
                    entry: Entry::Pending,
                },
            );
            return None;
        }
        match &self.slots.get(field_id)?.entry {
            Entry::Loaded(bitmap) => Some(bitmap),
            Entry::Pending | Entry::Failed => None,
        }
    }

    /// Decoded bitmap for a field, regardless of its current value
    pub fn get(&self, field_id: &str) -> Option<&Bitmap> {
        match &self.slots.get(field_id)?.entry {
            Entry::Loaded(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    /// Whether anything is waiting to be decoded
    pub fn has_pending(&self) -> bool {
        self.slots
            .values()
            .any(|slot| matches!(slot.entry, Entry::Pending))
    }

    /// Decode every queued source. Returns how many bitmaps became
    /// available, so the caller knows whether to repaint. Failures are
    /// logged and remembered so the same source is not retried.
    pub fn load_pending(&mut self) -> usize {
        let mut loaded = 0;
        for (field_id, slot) in &mut self.slots {
            if !matches!(slot.entry, Entry::Pending) {
                continue;
            }
            slot.entry = match Bitmap::from_data_url(&slot.source) {
                Ok(bitmap) => {
                    tracing::debug!(
                        "Decoded bitmap for field {field_id}: {}x{}",
                        bitmap.width,
                        bitmap.height
                    );
                    loaded += 1;
                    Entry::Loaded(bitmap)
                }
                Err(e) => {
                    tracing::warn!("Failed to decode bitmap for field {field_id}: {e}");
                    Entry::Failed
                }
            };
        }
        loaded
    }

    /// Drop entries for fields that no longer exist or no longer hold a
    /// bitmap
    pub fn retain_template(&mut self, template: &Template) {
        self.slots
            .retain(|id, _| template.field(id).is_some_and(|f| f.has_bitmap()));
    }

    /// Insert an already decoded bitmap
    pub fn insert(&mut self, field_id: &str, source: &str, bitmap: Bitmap) {
        self.slots.insert(
            field_id.to_string(),
            CacheSlot {
                source: source.to_string(),
                entry: Entry::Loaded(bitmap),
            },
        );
    }
}

impl BitmapSizes for BitmapCache {
    fn bitmap_size(&self, field_id: &str) -> Option<Size> {
        self.get(field_id).map(Bitmap::size)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat as CodecFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// A PNG data URL of the given pixel size
    pub(crate) fn png_data_url(width: u32, height: u32) -> String {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), CodecFormat::Png)
            .unwrap();
        encode_data_url("image/png", &bytes)
    }

    #[test]
    fn data_url_round_trip() {
        let url = encode_data_url("image/png", b"abc");
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn rejects_non_base64_urls() {
        assert!(matches!(
            decode_data_url("https://example.com/a.png"),
            Err(Error::InvalidDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:image/png,rawbytes"),
            Err(Error::InvalidDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(Error::Base64(_))
        ));
    }

    #[test]
    fn request_is_deferred_until_loaded() {
        let url = png_data_url(4, 2);
        let mut cache = BitmapCache::new();
        assert!(cache.request("logo", &url).is_none());
        assert!(cache.has_pending());
        assert_eq!(cache.bitmap_size("logo"), None);

        assert_eq!(cache.load_pending(), 1);
        assert!(!cache.has_pending());
        let bitmap = cache.request("logo", &url).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (4, 2));
        assert_eq!(cache.bitmap_size("logo"), Some(Size::new(4.0, 2.0)));
    }

    #[test]
    fn changed_source_is_reloaded() {
        let mut cache = BitmapCache::new();
        cache.request("logo", &png_data_url(4, 2));
        cache.load_pending();
        assert!(cache.request("logo", &png_data_url(8, 8)).is_none());
        cache.load_pending();
        assert_eq!(cache.bitmap_size("logo"), Some(Size::new(8.0, 8.0)));
    }

    #[test]
    fn failed_decode_is_not_retried() {
        let mut cache = BitmapCache::new();
        cache.request("sig", "data:image/png;base64,AAAA");
        assert_eq!(cache.load_pending(), 0);
        assert!(!cache.has_pending());
        assert!(cache.request("sig", "data:image/png;base64,AAAA").is_none());
        assert!(!cache.has_pending());
        assert_eq!(cache.bitmap_size("sig"), None);
    }
}
