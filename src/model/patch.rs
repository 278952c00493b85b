// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Partial field updates.
//!
//! A `FieldPatch` names only the attributes it changes. Patches are the
//! only way the editor mutates a field, and each one applies to a single
//! field at a time.

use super::template::{Field, FieldId, FieldKind, SubElement, TextAlign};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A set of attribute changes for one field
///
/// `None` leaves the attribute untouched. For attributes that are
/// themselves optional, `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FieldKind>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,

    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub align: Option<TextAlign>,
    pub color: Option<String>,

    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub border_radius: Option<f64>,

    pub placeholder: Option<Option<String>>,
    pub options: Option<Option<Vec<String>>>,
    pub required: Option<bool>,
    pub lock_aspect: Option<Option<bool>>,
    pub sub_elements: Option<Option<Vec<SubElement>>>,
}

impl FieldPatch {
    /// Move without resizing
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Replace the whole box
    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Self::default()
        }
    }

    /// Replace the content value
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// True when applying the patch cannot change anything
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the patch touches position or size
    pub fn touches_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    /// Merge the patch into a field
    pub fn apply(&self, field: &mut Field) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        set(&mut field.label, &self.label);
        set(&mut field.value, &self.value);
        set(&mut field.kind, &self.kind);
        set(&mut field.x, &self.x);
        set(&mut field.y, &self.y);
        set(&mut field.width, &self.width);
        set(&mut field.height, &self.height);
        set(&mut field.font_size, &self.font_size);
        set(&mut field.bold, &self.bold);
        set(&mut field.italic, &self.italic);
        set(&mut field.align, &self.align);
        set(&mut field.color, &self.color);
        set(&mut field.background_color, &self.background_color);
        set(&mut field.border_color, &self.border_color);
        set(&mut field.border_width, &self.border_width);
        set(&mut field.border_radius, &self.border_radius);
        set(&mut field.placeholder, &self.placeholder);
        set(&mut field.options, &self.options);
        set(&mut field.required, &self.required);
        set(&mut field.lock_aspect, &self.lock_aspect);
        set(&mut field.sub_elements, &self.sub_elements);
    }
}

/// Data for a new field: an optional caller-chosen id plus initial attributes
///
/// Anything the patch leaves out gets the default styling from
/// [`Field::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDraft {
    pub id: Option<FieldId>,
    pub attrs: FieldPatch,
}

impl FieldDraft {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            id: None,
            attrs: FieldPatch {
                kind: Some(kind),
                ..FieldPatch::default()
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<FieldId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attrs(mut self, attrs: FieldPatch) -> Self {
        let kind = self.attrs.kind.take();
        self.attrs = attrs;
        if self.attrs.kind.is_none() {
            self.attrs.kind = kind;
        }
        self
    }

    /// Build the field, filling every omitted attribute with defaults
    pub fn build(self) -> Field {
        let mut field = Field::new(self.attrs.kind.unwrap_or_default());
        if let Some(id) = self.id {
            field.id = id;
        }
        self.attrs.apply(&mut field);
        field
    }
}
