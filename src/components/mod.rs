// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components for the Billcanvas template designer

pub mod template_canvas;

pub use template_canvas::{DocumentUpdate, TemplateCanvasWidget, template_canvas_view};
