//! Choosing which segments to draw for a view, and where they can be clicked.
//!
//! The unzoomed overview decimates by id; any other view clips each segment
//! against the view rectangle.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::domain::dotplot::{Segment, ViewBox};
use crate::domain::logging::{LogComponent, get_logger};

/// Sampling and hit-area constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Overview keeps id 1 and every id divisible by this. 0 behaves as 1.
    pub factor: u32,
    /// Only ids below this get an overview hit region.
    pub clickable_id_limit: u32,
    pub overview_hit_width: f64,
    pub overview_hit_extension: f64,
    /// Zoomed hit width is `zoomed_hit_scale * zoom_ratio.x + zoomed_hit_padding`.
    pub zoomed_hit_scale: f64,
    pub zoomed_hit_padding: f64,
    pub zoomed_hit_extension: f64,
    /// Segment count from which clipping runs on the rayon pool (`parallel` feature).
    pub parallel_threshold: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            factor: 1,
            clickable_id_limit: 2000,
            overview_hit_width: 100_000.0,
            overview_hit_extension: 1000.0,
            zoomed_hit_scale: 1000.0,
            zoomed_hit_padding: 200.0,
            zoomed_hit_extension: 2.0,
            parallel_threshold: 1000,
        }
    }
}

impl SamplingConfig {
    pub fn with_factor(self, factor: u32) -> Self {
        Self { factor, ..self }
    }

    fn keeps_in_overview(&self, id: u32) -> bool {
        id == 1 || id % self.factor.max(1) == 0
    }
}

/// How a view is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regime {
    /// Current view is exactly the default view.
    Overview,
    Zoomed,
}

impl Regime {
    pub fn for_view(current: &ViewBox, default: &ViewBox) -> Self {
        if current == default { Regime::Overview } else { Regime::Zoomed }
    }
}

/// Invisible wide stroke that makes a segment clickable
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitRegion {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub segment_id: u32,
}

impl HitRegion {
    /// Hit stroke along `segment`, pushed `extension` past each end along its direction of travel.
    pub fn around(segment: &Segment, width: f64, extension: f64) -> Self {
        let sx = unit_sign(segment.dx()) * extension;
        let sy = unit_sign(segment.dy()) * extension;
        Self {
            x1: segment.x1 - sx,
            y1: segment.y1 - sy,
            x2: segment.x2 + sx,
            y2: segment.y2 + sy,
            width,
            segment_id: segment.id,
        }
    }
}

fn unit_sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// What to draw for one view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentPlan {
    pub regime: Regime,
    pub visible: Vec<Segment>,
    pub hits: Vec<HitRegion>,
}

/// Both endpoints strictly beyond the same edge of `view`.
pub fn is_trivially_outside(segment: &Segment, view: &ViewBox) -> bool {
    let (x_min, x_max, y_min, y_max) = (view.x_min(), view.x_max(), view.y_min(), view.y_max());
    (segment.x1 < x_min && segment.x2 < x_min)
        || (segment.x1 > x_max && segment.x2 > x_max)
        || (segment.y1 < y_min && segment.y2 < y_min)
        || (segment.y1 > y_max && segment.y2 > y_max)
}

fn is_inside(segment: &Segment, view: &ViewBox) -> bool {
    let x_ok = |x: f64| x >= view.x_min() && x <= view.x_max();
    let y_ok = |y: f64| y >= view.y_min() && y <= view.y_max();
    x_ok(segment.x1) && x_ok(segment.x2) && y_ok(segment.y1) && y_ok(segment.y2)
}

/// Clip `segment` to `view`.
///
/// Returns the segment untouched when it lies fully inside, `None` when no
/// part of positive length is visible. Zero-length segments are always
/// excluded; horizontal and vertical ones are clamped to the view.
pub fn clip_segment(segment: &Segment, view: &ViewBox) -> Option<Segment> {
    if segment.is_point() || is_trivially_outside(segment, view) {
        return None;
    }
    if is_inside(segment, view) {
        return Some(*segment);
    }
    if segment.dx() == 0.0 || segment.dy() == 0.0 {
        return clamp_axis_aligned(segment, view);
    }
    sweep_clip(segment, view)
}

fn clamp_axis_aligned(segment: &Segment, view: &ViewBox) -> Option<Segment> {
    let cx = |x: f64| x.clamp(view.x_min(), view.x_max());
    let cy = |y: f64| y.clamp(view.y_min(), view.y_max());
    let clamped =
        segment.with_endpoints(cx(segment.x1), cy(segment.y1), cx(segment.x2), cy(segment.y2));
    (!clamped.is_point()).then_some(clamped)
}

/// Walk the segment upward from its low-y end, pulling each endpoint onto the
/// view edge it crosses. Rising lines (forward) enter at `x_min` and leave at
/// `x_max`; falling lines (reverse) enter at `x_max` and leave at `x_min`.
fn sweep_clip(segment: &Segment, view: &ViewBox) -> Option<Segment> {
    let (mut x1, mut y1, mut x2, mut y2) = if segment.y1 <= segment.y2 {
        (segment.x1, segment.y1, segment.x2, segment.y2)
    } else {
        (segment.x2, segment.y2, segment.x1, segment.y1)
    };
    let rising = x2 > x1;
    let slope = (y2 - y1) / (x2 - x1);

    let (x_min, x_max, y_min, y_max) = (view.x_min(), view.x_max(), view.y_min(), view.y_max());
    let (entry, exit) = if rising { (x_min, x_max) } else { (x_max, x_min) };
    let before_entry = |x: f64| if rising { x < entry } else { x > entry };
    let past_exit = |x: f64| if rising { x > exit } else { x < exit };

    if before_entry(x1) {
        y1 += slope * (entry - x1);
        x1 = entry;
    }
    if y1 < y_min {
        x1 += (y_min - y1) / slope;
        y1 = y_min;
    }
    if past_exit(x2) {
        y2 += slope * (exit - x2);
        x2 = exit;
    }
    if y2 > y_max {
        x2 += (y_max - y2) / slope;
        y2 = y_max;
    }

    let snap_x = |v: f64| snap(v, x_min, x_max, view.width);
    let snap_y = |v: f64| snap(v, y_min, y_max, view.height);
    let clipped = segment.with_endpoints(snap_x(x1), snap_y(y1), snap_x(x2), snap_y(y2));

    let ordered = clipped.y1 < clipped.y2
        && if rising { clipped.x1 < clipped.x2 } else { clipped.x2 < clipped.x1 };
    (ordered && is_inside(&clipped, view)).then_some(clipped)
}

/// Pull `v` onto a bound when float error left it a hair outside.
fn snap(v: f64, lo: f64, hi: f64, span: f64) -> f64 {
    let epsilon = 1e-9 * span.max(1.0);
    if (v - lo).abs() <= epsilon {
        lo
    } else if (v - hi).abs() <= epsilon {
        hi
    } else {
        v
    }
}

/// Segments to draw and hit regions to attach for `current`.
pub fn plan_segments(
    segments: &[Segment],
    current: &ViewBox,
    default: &ViewBox,
    config: &SamplingConfig,
) -> SegmentPlan {
    let regime = Regime::for_view(current, default);
    match regime {
        Regime::Overview => plan_overview(segments, current, config),
        Regime::Zoomed => plan_zoomed(segments, current, default, config),
    }
}

fn plan_overview(segments: &[Segment], view: &ViewBox, config: &SamplingConfig) -> SegmentPlan {
    let visible: Vec<Segment> = segments
        .iter()
        .filter(|s| !is_trivially_outside(s, view) && config.keeps_in_overview(s.id))
        .copied()
        .collect();
    let hits = visible
        .iter()
        .filter(|s| s.id < config.clickable_id_limit)
        .map(|s| HitRegion::around(s, config.overview_hit_width, config.overview_hit_extension))
        .collect();

    get_logger().debug(
        LogComponent::Domain("Clipping"),
        &format!("overview: kept {} of {} (factor {})", visible.len(), segments.len(), config.factor),
    );
    SegmentPlan { regime: Regime::Overview, visible, hits }
}

fn plan_zoomed(
    segments: &[Segment],
    view: &ViewBox,
    default: &ViewBox,
    config: &SamplingConfig,
) -> SegmentPlan {
    let visible = clip_all(segments, view, config);
    let ratio = view.zoom_ratio(default);
    let width = config.zoomed_hit_scale * ratio.x + config.zoomed_hit_padding;
    let hits = visible
        .iter()
        .map(|s| HitRegion::around(s, width, config.zoomed_hit_extension))
        .collect();

    get_logger().debug(
        LogComponent::Domain("Clipping"),
        &format!("zoomed: {} of {} visible, hit width {:.1}", visible.len(), segments.len(), width),
    );
    SegmentPlan { regime: Regime::Zoomed, visible, hits }
}

#[cfg(feature = "parallel")]
fn clip_all(segments: &[Segment], view: &ViewBox, config: &SamplingConfig) -> Vec<Segment> {
    if segments.len() >= config.parallel_threshold {
        segments.par_iter().filter_map(|s| clip_segment(s, view)).collect()
    } else {
        segments.iter().filter_map(|s| clip_segment(s, view)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn clip_all(segments: &[Segment], view: &ViewBox, _config: &SamplingConfig) -> Vec<Segment> {
    segments.iter().filter_map(|s| clip_segment(s, view)).collect()
}
