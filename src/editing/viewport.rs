// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Display scale and screen/document coordinate mapping.
//!
//! The page is fitted into the available area with one uniform scale and
//! centred. Drawing happens in document units under a single transform;
//! the device pixel ratio only affects the size of the backing buffer and
//! that transform, never document coordinates.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// How a page of `page` size is placed on a drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Document size
    pub page: Size,
    /// Screen pixels per document unit
    pub scale: f64,
    /// Device pixels per screen pixel
    pub device_pixel_ratio: f64,
    /// Top-left of the page inside the drawing area (screen pixels)
    pub offset: Vec2,
}

impl Viewport {
    /// Fit `page` into `target` preserving aspect ratio, centred
    pub fn fit(page: Size, target: Size, device_pixel_ratio: f64) -> Self {
        let scale = display_scale(page, target);
        let display = Size::new(page.width * scale, page.height * scale);
        let offset = Vec2::new(
            ((target.width - display.width) / 2.0).max(0.0),
            ((target.height - display.height) / 2.0).max(0.0),
        );
        let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            page,
            scale,
            device_pixel_ratio,
            offset,
        }
    }

    /// Page drawn at 1:1 at the origin
    pub fn identity(page: Size) -> Self {
        Self {
            page,
            scale: 1.0,
            device_pixel_ratio: 1.0,
            offset: Vec2::ZERO,
        }
    }

    /// On-screen size of the page
    pub fn display_size(&self) -> Size {
        Size::new(self.page.width * self.scale, self.page.height * self.scale)
    }

    /// On-screen rectangle of the page, relative to the drawing area
    pub fn page_rect(&self) -> Rect {
        Rect::from_origin_size(self.offset.to_point(), self.display_size())
    }

    /// Size of the backing buffer in device pixels
    pub fn backing_size(&self) -> Size {
        let display = self.display_size();
        Size::new(
            (display.width * self.device_pixel_ratio).round(),
            (display.height * self.device_pixel_ratio).round(),
        )
    }

    /// Device pixels per document unit
    pub fn device_scale(&self) -> f64 {
        self.scale * self.device_pixel_ratio
    }

    /// Document space → device pixels of the backing buffer
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.device_scale())
    }

    /// Document space → screen pixels of the drawing area
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Map a document-space rectangle to the drawing area
    pub fn document_to_screen(&self, rect: Rect) -> Rect {
        self.affine().transform_rect_bbox(rect)
    }

    /// Map a point in the drawing area to document space, clamped to the page
    pub fn screen_to_document(&self, point: Point) -> Point {
        screen_to_document(point, self.page_rect(), self.page)
    }
}

/// Uniform scale that fits `page` inside `target`
pub fn display_scale(page: Size, target: Size) -> f64 {
    if !(page.width > 0.0 && page.height > 0.0) {
        return 1.0;
    }
    let scale = (target.width / page.width).min(target.height / page.height);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Map a screen point into document space using the surface's live bounds.
///
/// Each axis is mapped independently as `(screen - origin) * page / rendered`
/// and clamped into `[0, page]`.
pub fn screen_to_document(point: Point, surface: Rect, page: Size) -> Point {
    fn axis(value: f64, origin: f64, rendered: f64, page: f64) -> f64 {
        let mapped = if rendered > 0.0 {
            (value - origin) * (page / rendered)
        } else {
            0.0
        };
        if mapped.is_finite() {
            mapped.clamp(0.0, page.max(0.0))
        } else {
            0.0
        }
    }
    Point::new(
        axis(point.x, surface.x0, surface.width(), page.width),
        axis(point.y, surface.y0, surface.height(), page.height),
    )
}
