use kurbo::Affine;
use serde::Serialize;

use crate::domain::axis::Tick;
use crate::domain::clipping::{HitRegion, Regime};
use crate::domain::dotplot::{Direction, Theme, ViewBox};
use crate::domain::errors::DotplotResult;

/// Pixel geometry of one render
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotLayout {
    pub svg_size: f64,
    pub axis_margin: f64,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl PlotLayout {
    /// Fit the view into the square `svg_size - axis_margin`, shrinking the
    /// short side to keep the view's aspect ratio.
    pub fn fit(view: &ViewBox, svg_size: f64, axis_margin: f64) -> Self {
        let plot_size = svg_size - axis_margin;
        let ratio = view.aspect_ratio();
        let (plot_width, plot_height) =
            if ratio > 1.0 { (plot_size, plot_size / ratio) } else { (plot_size * ratio, plot_size) };
        Self { svg_size, axis_margin, plot_width, plot_height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisOrient {
    Vertical,
    Horizontal,
}

/// One axis: its pixel length and graduations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisGuide {
    pub orient: AxisOrient,
    pub length: f64,
    pub margin: f64,
    pub ticks: Vec<Tick>,
}

/// One visible stroke, in data coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub direction: Direction,
    /// Round joins and caps.
    pub rounded: bool,
    pub segment_id: u32,
}

/// Everything a surface needs to draw the plot once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub layout: PlotLayout,
    pub view_box: ViewBox,
    pub theme: Theme,
    pub regime: Regime,
    /// Hit regions open the detail view (map mode).
    pub inspectable: bool,
    pub y_axis: AxisGuide,
    pub x_axis: AxisGuide,
    pub lines: Vec<LinePrimitive>,
    pub hits: Vec<HitRegion>,
}

/// Something the plot can be drawn on
pub trait RenderSurface {
    /// Replace whatever was drawn before with `scene`.
    fn present(&mut self, scene: &Scene) -> DotplotResult<()>;

    /// Show the drag rectangle (data space), or hide it with `None`.
    fn show_selection(&mut self, selection: Option<ViewBox>);

    /// Current data-to-screen transform, `None` while detached.
    fn screen_transform(&self) -> Option<Affine>;
}
