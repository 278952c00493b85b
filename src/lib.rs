// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Billcanvas: a bill and invoice template designer built with Xilem

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use winit::dpi::LogicalSize;
use xilem::{EventLoopBuilder, WindowView, Xilem, window};

pub mod components;
pub mod config;
pub mod data;
pub mod editing;
pub mod error;
pub mod model;
pub mod render;
mod settings;
pub mod store;
mod theme;
pub mod upload;
mod views;

use config::{CONFIG_FILE, EditorConfig};
use data::AppState;
use views::editor_tab;

/// Entry point for the Billcanvas application
pub fn run(event_loop: EventLoopBuilder) -> anyhow::Result<()> {
    init_tracing();

    let mut config = EditorConfig::load(CONFIG_FILE)
        .with_context(|| format!("Failed to read {CONFIG_FILE}"))?;
    handle_command_line_args(&mut config);

    let initial_state = AppState::new(config);
    let app = Xilem::new(initial_state, app_logic);
    app.run_in(event_loop)?;
    Ok(())
}

/// Initialize the tracing subscriber (can be controlled via RUST_LOG env
/// var). Noisy wgpu/naga shader compilation logs are filtered out.
fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in [
        "billcanvas=info",
        "wgpu=warn",
        "naga=warn",
        "wgpu_core=warn",
        "wgpu_hal=warn",
    ] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {directive}: {e}"),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The optional first argument overrides the template store path
fn handle_command_line_args(config: &mut EditorConfig) {
    let Some(path) = std::env::args().nth(1) else {
        return;
    };
    tracing::info!("Using template store: {path}");
    config.store_path = path.into();
}

/// Build the single-window UI
fn app_logic(state: &mut AppState) -> impl Iterator<Item = WindowView<AppState>> + use<> {
    let content = editor_tab(state);

    let window_size = LogicalSize::new(1280.0, 900.0);
    let window_view = window(state.main_window_id, "Billcanvas", content);
    let window_with_options = window_view.with_options(|options| {
        options
            .with_initial_inner_size(window_size)
            .on_close(|state: &mut AppState| state.running = false)
    });

    std::iter::once(window_with_options)
}
