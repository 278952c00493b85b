// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor view - template toolbar over the canvas

use masonry::properties::Padding;
use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::core::one_of::Either;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, FlexExt, button, flex_col, flex_row, label, sized_box};

use crate::components::template_canvas_view;
use crate::data::AppState;
use crate::model::{FieldKind, Starter};
use crate::theme;

/// Outer padding around the toolbar rows and the canvas
const MARGIN: f64 = 8.0;

/// Toolbar rows stacked above the canvas, which fills the rest
pub fn editor_tab(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let document = state.document.clone();

    flex_col((
        template_row(state),
        field_row(state),
        template_canvas_view(
            document,
            state.device_pixel_ratio(),
            |state: &mut AppState, updated, save_requested| {
                state.update_document(updated);
                if save_requested {
                    state.save_current();
                }
            },
        )
        .flex(1.0),
    ))
    .gap(MARGIN.px())
    .cross_axis_alignment(CrossAxisAlignment::Fill)
    .padding(MARGIN)
    .background_color(theme::app::BACKGROUND)
}

// ===== Toolbar Rows =====

/// Template switcher plus the create buttons
fn template_row(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let current = state.document.current_id().to_string();
    let tabs: Vec<_> = state
        .document
        .templates()
        .iter()
        .map(|template| {
            let id = template.id.clone();
            let is_current = id == current;
            toolbar_button(&template.name, is_current, move |state: &mut AppState| {
                state.select_template(&id);
            })
        })
        .collect();

    flex_row((
        flex_row(tabs).gap(theme::toolbar::GAP.px()),
        sized_box(label("")).flex(1.0),
        toolbar_button("New blank", false, |state: &mut AppState| {
            state.create_template(Starter::Empty);
        }),
        toolbar_button("New invoice", false, |state: &mut AppState| {
            state.create_template(Starter::Professional);
        }),
    ))
    .gap(theme::toolbar::GAP.px())
    .padding(theme::toolbar::GAP)
    .background_color(theme::toolbar::BACKGROUND)
}

/// Field palette, save button and status line
fn field_row(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let palette: Vec<_> = FieldKind::ALL
        .into_iter()
        .map(|kind| {
            toolbar_button(kind.display_name(), false, move |state: &mut AppState| {
                state.add_field(kind);
            })
        })
        .collect();

    let status = match &state.status {
        Some(text) => Either::A(
            label(text.clone())
                .text_size(13.0)
                .color(theme::text::SECONDARY),
        ),
        None => Either::B(label("")),
    };

    flex_row((
        label("Add").text_size(13.0).color(theme::text::SECONDARY),
        flex_row(palette).gap(theme::toolbar::GAP.px()),
        sized_box(status).flex(1.0),
        toolbar_button("Save", false, |state: &mut AppState| {
            state.save_current();
        }),
    ))
    .gap(theme::toolbar::GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Center)
    .padding(theme::toolbar::GAP)
    .background_color(theme::toolbar::BACKGROUND)
}

// ===== Helpers =====

fn toolbar_button<F>(
    text: &str,
    is_active: bool,
    on_click: F,
) -> impl WidgetView<AppState> + use<F>
where
    F: Fn(&mut AppState) + Send + Sync + 'static,
{
    let bg_color = if is_active {
        theme::toolbar::BUTTON_ACTIVE
    } else {
        theme::toolbar::BUTTON
    };

    sized_box(
        button(
            label(text.to_string())
                .text_size(13.0)
                .color(theme::text::PRIMARY),
            on_click,
        )
        .background_color(bg_color)
        .border_color(theme::toolbar::BORDER)
        .border_width(theme::toolbar::BORDER_WIDTH)
        .corner_radius(theme::toolbar::RADIUS),
    )
    .padding(Padding::from_vh(1.0, 0.0))
}
