// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing templates onto a surface

pub mod bitmap;
#[cfg(test)]
pub(crate) mod recording;
pub mod renderer;
pub mod surface;
pub mod vello_surface;

pub use bitmap::{Bitmap, BitmapCache};
pub use renderer::{FrameState, Renderer};
pub use surface::{FontSpec, NoMetrics, Surface, TextBaseline, TextMeasure, TextMetrics};
pub use vello_surface::VelloSurface;
