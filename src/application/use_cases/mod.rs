pub mod load_dataset;
pub mod render_chart;

pub use load_dataset::*;
pub use render_chart::*;
