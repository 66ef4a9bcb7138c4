use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;

pub use presentation::DotplotApi;

/// Install panic hook, console logger and clock once per page.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::for_build()));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    get_logger().info(LogComponent::Presentation("Initialize"), "dotplot module ready");
}

/// Mount the control panel and plot into `<body>`. Hosts that drive the plot
/// themselves use `DotplotApi` instead.
#[wasm_bindgen(js_name = mountApp)]
pub fn mount_app() {
    leptos::mount_to_body(app::App);
}
