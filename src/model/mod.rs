// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Template document model

pub mod patch;
pub mod starter;
pub mod template;

pub use patch::{FieldDraft, FieldPatch};
pub use starter::Starter;
pub use template::{
    Field, FieldId, FieldKind, Side, SubElement, Template, TemplateId, TextAlign, clamp_rect,
    new_id,
};
