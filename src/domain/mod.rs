pub mod axis;
pub mod clipping;
pub mod config;
pub mod dotplot;
pub mod errors;
pub mod events;
pub mod logging;
pub mod scene;
pub mod state;
