use derive_more::Display;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::errors::{DotplotError, DotplotResult};

/// Value Object - strand of an alignment match
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum Direction {
    /// Drawn from low x / low y to high x / high y.
    #[display(fmt = "forward")]
    #[strum(serialize = "f")]
    #[serde(rename = "f")]
    Forward,
    /// Drawn from high x / low y to low x / high y.
    #[display(fmt = "reverse")]
    #[strum(serialize = "r")]
    #[serde(rename = "r")]
    Reverse,
}

/// Value Object - page theme
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    #[display(fmt = "light")]
    #[strum(serialize = "light")]
    Light,
    #[display(fmt = "dark")]
    #[strum(serialize = "dark")]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Axis ink, for SVG that travels without the page stylesheet.
    pub fn axis_color(self) -> &'static str {
        match self {
            Theme::Light => "#1a1a1a",
            Theme::Dark => "#e0e0e0",
        }
    }
}

/// Value Object - rectangle of data space mapped onto the drawing area.
///
/// Serialized exactly as the `viewBox` URL parameter: `{"x":..,"y":..,"width":..,"height":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanning two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Build from manual `[x_min, x_max] × [y_min, y_max]` bounds. Rejects `max <= min`.
    pub fn from_bounds(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> DotplotResult<Self> {
        if !(x_max > x_min && y_max > y_min) {
            return Err(DotplotError::DegenerateViewBox(format!(
                "bounds x=[{}, {}] y=[{}, {}]",
                x_min, x_max, y_min, y_max
            )));
        }
        Self::new(x_min, y_min, x_max - x_min, y_max - y_min).validated()
    }

    pub fn x_min(&self) -> f64 {
        self.x
    }

    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    pub fn y_min(&self) -> f64 {
        self.y
    }

    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    /// Finite origin and strictly positive, normal size.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_normal()
            && self.height.is_normal()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn validated(self) -> DotplotResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(DotplotError::DegenerateViewBox(self.to_attribute()))
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Size of this view relative to `reference`, per axis.
    pub fn zoom_ratio(&self, reference: &ViewBox) -> ZoomRatio {
        ZoomRatio { x: self.width / reference.width, y: self.height / reference.height }
    }

    /// SVG `viewBox` attribute value.
    pub fn to_attribute(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Derived - current view size over default view size, per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRatio {
    pub x: f64,
    pub y: f64,
}

impl ZoomRatio {
    /// Below 1% on either axis rounded joins produce blobs, so lines stay mitered.
    pub fn wants_round_joins(&self) -> bool {
        self.x > 0.01 && self.y > 0.01
    }
}

/// Transient drag rectangle, in data space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub start: Point,
    pub end: Point,
}

impl Selection {
    pub fn at(start: Point) -> Self {
        Self { start, end: start }
    }

    pub fn rect(&self) -> ViewBox {
        ViewBox::from_corners(self.start, self.end)
    }

    /// A click without drag: nothing to zoom into.
    pub fn is_degenerate(&self) -> bool {
        let rect = self.rect();
        !(rect.width > 0.0 && rect.height > 0.0)
    }
}

fn default_forward_color() -> String {
    "green".to_string()
}

fn default_reverse_color() -> String {
    "red".to_string()
}

/// Value Object - stroke colors per direction.
///
/// Missing keys fall back to the defaults, so a partial `colors` URL value
/// merges over `{f: green, r: red}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    #[serde(default = "default_forward_color")]
    pub f: String,
    #[serde(default = "default_reverse_color")]
    pub r: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self { f: default_forward_color(), r: default_reverse_color() }
    }
}

impl Colors {
    pub fn for_direction(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.f,
            Direction::Reverse => &self.r,
        }
    }

    pub fn set(&mut self, direction: Direction, color: impl Into<String>) {
        match direction {
            Direction::Forward => self.f = color.into(),
            Direction::Reverse => self.r = color.into(),
        }
    }
}
