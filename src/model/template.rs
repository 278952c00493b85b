// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Template and field data model.
//!
//! A `Template` is a page-sized document of positioned `Field`s. Field order
//! is z-order: later fields are drawn on top and win hit tests. Everything
//! here is plain data that serializes to the camelCase wire shape consumed
//! by the template store; transient editor state (selection, gestures,
//! decoded bitmaps) lives elsewhere.

use crate::settings;
use chrono::{DateTime, Utc};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Identifier of a field within a template
pub type FieldId = String;

/// Identifier of a template within the collection
pub type TemplateId = String;

/// Generate a fresh identifier for a template or field
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// FIELD KIND
// ============================================================================

/// Content type of a field
///
/// A closed set. Renderer, hit testing and the inline editor all branch on
/// the behaviour table below rather than on the variant directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Date,
    Amount,
    Textarea,
    Select,
    Image,
    Signature,
}

impl FieldKind {
    /// Every variant, in palette order
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Amount,
        FieldKind::Textarea,
        FieldKind::Select,
        FieldKind::Image,
        FieldKind::Signature,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Number => "Number",
            FieldKind::Date => "Date",
            FieldKind::Amount => "Amount",
            FieldKind::Textarea => "Text area",
            FieldKind::Select => "Select",
            FieldKind::Image => "Image",
            FieldKind::Signature => "Signature",
        }
    }

    /// Value is a data-URL bitmap rather than text
    pub fn is_bitmap(self) -> bool {
        matches!(self, FieldKind::Image | FieldKind::Signature)
    }

    /// Value is drawn as text and can be edited inline
    pub fn is_text_like(self) -> bool {
        !self.is_bitmap()
    }

    /// Always laid out as a multi-line block and edited with a text area
    pub fn is_multiline(self) -> bool {
        matches!(self, FieldKind::Textarea)
    }

    /// Whether the `lock_aspect` flag has any effect
    pub fn supports_aspect_lock(self) -> bool {
        self.is_bitmap()
    }
}

// ============================================================================
// STYLE ENUMS
// ============================================================================

/// Horizontal text alignment inside a field box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Field side a sub-element is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// SUB ELEMENT
// ============================================================================

/// A small caption anchored to one side of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubElement {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    pub font_size: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
}

impl SubElement {
    pub fn new(text: impl Into<String>, side: Side) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            side,
            offset_x: 0.0,
            offset_y: 0.0,
            font_size: 10.0,
            color: "#6b7280".to_string(),
            bold: false,
        }
    }

    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A positioned content element on a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub align: TextAlign,
    pub color: String,

    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub border_radius: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_aspect: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_elements: Option<Vec<SubElement>>,
}

impl Field {
    /// A field of the given kind with default geometry and styling
    pub fn new(kind: FieldKind) -> Self {
        Self {
            id: new_id(),
            label: default_label(kind).to_string(),
            value: String::new(),
            kind,
            x: settings::field::DEFAULT_X,
            y: settings::field::DEFAULT_Y,
            width: settings::field::DEFAULT_WIDTH,
            height: settings::field::DEFAULT_HEIGHT,
            font_size: settings::style::FONT_SIZE,
            bold: false,
            italic: false,
            align: TextAlign::Left,
            color: "#111827".to_string(),
            background_color: "#ffffff".to_string(),
            border_color: "#d1d5db".to_string(),
            border_width: settings::style::BORDER_WIDTH,
            border_radius: settings::style::BORDER_RADIUS,
            placeholder: None,
            options: None,
            required: false,
            lock_aspect: None,
            sub_elements: None,
        }
    }

    /// The field box in document space, exactly as stored
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// The field box after defensive normalisation against the page size
    pub fn normalized_rect(&self, page: Size) -> Rect {
        clamp_rect(self.x, self.y, self.width, self.height, page)
    }

    /// Overwrite the stored geometry
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Aspect lock only applies to bitmap fields
    pub fn is_aspect_locked(&self) -> bool {
        self.kind.supports_aspect_lock() && self.lock_aspect == Some(true)
    }

    /// Bitmap fields with a value carry a data URL
    pub fn has_bitmap(&self) -> bool {
        self.kind.is_bitmap() && !self.value.is_empty()
    }

    /// Multi-line layout: textarea fields, or any text containing a break
    pub fn is_multiline(&self) -> bool {
        self.kind.is_multiline() || self.value.contains('\n')
    }

    /// Sub-elements, empty when unset
    pub fn sub_elements(&self) -> &[SubElement] {
        self.sub_elements.as_deref().unwrap_or(&[])
    }
}

fn default_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "Text",
        FieldKind::Number => "Number",
        FieldKind::Date => "Date",
        FieldKind::Amount => "Amount",
        FieldKind::Textarea => "Notes",
        FieldKind::Select => "Choice",
        FieldKind::Image => "Image",
        FieldKind::Signature => "Signature",
    }
}

/// Clamp a field box into the page.
///
/// Non-finite or undersized dimensions become the minimum field size, and
/// the origin is pinned so the whole box stays inside `[0, page]`. A page
/// narrower than the minimum size caps the dimension at the page size.
pub fn clamp_rect(x: f64, y: f64, width: f64, height: f64, page: Size) -> Rect {
    let (x, width) = clamp_axis(x, width, page.width);
    let (y, height) = clamp_axis(y, height, page.height);
    Rect::new(x, y, x + width, y + height)
}

fn clamp_axis(origin: f64, extent: f64, limit: f64) -> (f64, f64) {
    let min = settings::field::MIN_SIZE;
    let limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
    let extent = if extent.is_finite() && extent >= min {
        extent
    } else {
        min
    };
    let extent = extent.min(limit);
    let origin = if origin.is_finite() { origin } else { 0.0 };
    let origin = origin.clamp(0.0, limit - extent);
    (origin, extent)
}

// ============================================================================
// TEMPLATE
// ============================================================================

/// A page-sized document of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Template {
    /// An empty canvas of the given document size
    pub fn blank(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: String::new(),
            width: positive_or(width, super::starter::PAGE_WIDTH),
            height: positive_or(height, super::starter::PAGE_HEIGHT),
            created_at: Utc::now(),
            fields: Vec::new(),
        }
    }

    /// Document size
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_index(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub(crate) fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
