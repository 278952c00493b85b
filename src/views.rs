// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Top-level views composed from components

mod editor;

pub use editor::editor_tab;
