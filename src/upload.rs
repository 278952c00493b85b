// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Turning image files into field values

use crate::error::{Error, Result};
use crate::render::bitmap::{Bitmap, encode_data_url};
use std::path::Path;

/// Mime type for a supported image file extension
fn mime_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        _ => Err(Error::UnsupportedImage(path.display().to_string())),
    }
}

/// Read a PNG or JPEG file and encode it as a base64 data URL.
///
/// The bytes are decoded once up front so a broken file is reported here
/// instead of silently rendering nothing.
pub fn image_file_to_data_url(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mime = mime_for(path)?;
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let bitmap = Bitmap::decode(&bytes)?;
    tracing::info!(
        "Imported {} ({}x{})",
        path.display(),
        bitmap.width,
        bitmap.height
    );
    Ok(encode_data_url(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::bitmap::decode_data_url;
    use image::{Rgba, RgbaImage};

    #[test]
    fn png_file_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.PNG");
        RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let url = image_file_to_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let (_, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(Bitmap::decode(&bytes).unwrap().size(), kurbo::Size::new(3.0, 2.0));
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert!(matches!(
            image_file_to_data_url("scan.pdf"),
            Err(Error::UnsupportedImage(_))
        ));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();
        assert!(matches!(image_file_to_data_url(&path), Err(Error::Image(_))));
    }
}
