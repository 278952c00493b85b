// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod controller;
pub mod document;
pub mod inline_editor;
pub mod resize;
pub mod undo;
pub mod viewport;

pub use controller::{Controller, Gesture, PointerInput, PointerSource, Response};
pub use document::Document;
pub use hit_test::{BitmapSizes, NoBitmaps, ResizeHandle};
pub use inline_editor::{EditKey, EditOutcome, InlineEditor, OverlayLayout, overlay_layout};
pub use undo::UndoState;
pub use viewport::Viewport;
