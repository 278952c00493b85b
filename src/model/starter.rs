// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Starter templates.
//!
//! New documents start either as an empty page or as the "professional"
//! invoice layout below. Both use an A4 page at 96 dpi.

use super::patch::{FieldDraft, FieldPatch};
use super::template::{Field, FieldKind, Side, SubElement, Template, TextAlign};
use serde::{Deserialize, Serialize};

/// A4 width at 96 dpi, in document units
pub const PAGE_WIDTH: f64 = 794.0;

/// A4 height at 96 dpi, in document units
pub const PAGE_HEIGHT: f64 = 1123.0;

/// Which factory builds a new template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Starter {
    Empty,
    #[default]
    Professional,
}

impl Starter {
    pub fn build(self) -> Template {
        match self {
            Starter::Empty => Template::blank("Untitled template", PAGE_WIDTH, PAGE_HEIGHT),
            Starter::Professional => Template::professional(),
        }
    }
}

fn field(kind: FieldKind, label: &str, x: f64, y: f64, width: f64, height: f64) -> FieldPatch {
    FieldPatch {
        kind: Some(kind),
        label: Some(label.to_string()),
        x: Some(x),
        y: Some(y),
        width: Some(width),
        height: Some(height),
        ..FieldPatch::default()
    }
}

/// Caption hanging above the field; sub-elements draw from their top edge
fn caption(text: &str) -> Option<Option<Vec<SubElement>>> {
    Some(Some(vec![SubElement::new(text, Side::Top).with_offset(0.0, -14.0)]))
}

fn build(patch: FieldPatch) -> Field {
    FieldDraft::default().with_attrs(patch).build()
}

impl Template {
    /// A pre-populated invoice layout
    pub fn professional() -> Self {
        let mut template = Template::blank("Professional invoice", PAGE_WIDTH, PAGE_HEIGHT);
        template.description = "Header, parties, dates, totals, notes and signature".to_string();

        let no_border = |patch: FieldPatch| FieldPatch {
            border_width: Some(0.0),
            background_color: Some("transparent".to_string()),
            ..patch
        };

        template.fields = vec![
            build(FieldPatch {
                lock_aspect: Some(Some(true)),
                ..field(FieldKind::Image, "Logo", 48.0, 40.0, 160.0, 80.0)
            }),
            build(no_border(FieldPatch {
                value: Some("INVOICE".to_string()),
                font_size: Some(32.0),
                bold: Some(true),
                align: Some(TextAlign::Right),
                ..field(FieldKind::Text, "Title", 474.0, 48.0, 272.0, 56.0)
            })),
            build(FieldPatch {
                placeholder: Some(Some("INV-0001".to_string())),
                align: Some(TextAlign::Right),
                sub_elements: caption("Invoice number"),
                ..field(FieldKind::Text, "Invoice number", 546.0, 140.0, 200.0, 36.0)
            }),
            build(FieldPatch {
                sub_elements: caption("Issue date"),
                ..field(FieldKind::Date, "Issue date", 48.0, 200.0, 200.0, 36.0)
            }),
            build(FieldPatch {
                sub_elements: caption("Due date"),
                required: Some(true),
                ..field(FieldKind::Date, "Due date", 296.0, 200.0, 200.0, 36.0)
            }),
            build(FieldPatch {
                options: Some(Some(vec![
                    "Net 15".to_string(),
                    "Net 30".to_string(),
                    "Due on receipt".to_string(),
                ])),
                sub_elements: caption("Terms"),
                ..field(FieldKind::Select, "Terms", 546.0, 200.0, 200.0, 36.0)
            }),
            build(FieldPatch {
                placeholder: Some(Some("Client name\nStreet\nCity".to_string())),
                sub_elements: caption("Bill to"),
                ..field(FieldKind::Textarea, "Bill to", 48.0, 280.0, 330.0, 110.0)
            }),
            build(FieldPatch {
                placeholder: Some(Some("Your company\nStreet\nCity".to_string())),
                sub_elements: caption("From"),
                ..field(FieldKind::Textarea, "From", 416.0, 280.0, 330.0, 110.0)
            }),
            build(FieldPatch {
                placeholder: Some(Some("Description of services".to_string())),
                sub_elements: caption("Items"),
                ..field(FieldKind::Textarea, "Items", 48.0, 440.0, 698.0, 300.0)
            }),
            build(FieldPatch {
                align: Some(TextAlign::Right),
                bold: Some(true),
                required: Some(true),
                sub_elements: Some(Some(vec![
                    SubElement::new("Total due", Side::Left).with_offset(-8.0, 0.0),
                ])),
                ..field(FieldKind::Amount, "Total", 546.0, 770.0, 200.0, 44.0)
            }),
            build(FieldPatch {
                sub_elements: caption("Notes"),
                ..field(FieldKind::Textarea, "Notes", 48.0, 860.0, 420.0, 120.0)
            }),
            build(FieldPatch {
                lock_aspect: Some(Some(true)),
                sub_elements: Some(Some(vec![
                    SubElement::new("Authorised signature", Side::Bottom).with_offset(0.0, 4.0),
                ])),
                ..field(FieldKind::Signature, "Signature", 546.0, 900.0, 200.0, 80.0)
            }),
        ];
        template
    }
}
