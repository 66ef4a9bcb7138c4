//! Tick planning for the two plot axes.
//!
//! `compute_ticks` picks a nice step for a data span, `format_tick_label`
//! renders one tick value, and `axis_ticks` combines both for a rendered axis.

use serde::Serialize;

use crate::domain::errors::{DotplotError, DotplotResult};

/// Nice multipliers tried, in order, against the raw step's magnitude.
const NICE_MULTIPLES: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Axes shorter than this many pixels get a sparser target.
pub const SHORT_AXIS_PX: f64 = 300.0;

/// Desired density of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOptions {
    pub target: u32,
    pub min_sections: u32,
    pub max_sections: u32,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self { target: 8, min_sections: 6, max_sections: 11 }
    }
}

impl TickOptions {
    /// Options used by the rendered axes, scaled to the axis pixel length.
    pub fn for_axis(pixel_length: f64) -> Self {
        let target = if pixel_length < SHORT_AXIS_PX { 3 } else { 8 };
        Self { target, min_sections: 3, max_sections: 11 }
    }

    fn validate(&self) -> DotplotResult<()> {
        if self.target == 0 || self.min_sections == 0 || self.min_sections > self.max_sections {
            return Err(DotplotError::InvalidTickOptions(format!(
                "target={} min={} max={}",
                self.target, self.min_sections, self.max_sections
            )));
        }
        Ok(())
    }
}

/// Chosen step and the number of sections it cuts the span into
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickPlan {
    pub step: f64,
    pub section_count: u32,
}

/// Choose a nice step for `range`.
///
/// The first step is the smallest of {1, 2, 5, 10}·10^k covering
/// `range / target`; it is then halved while there are fewer than
/// `min_sections` sections and doubled while there are more than `max_sections`.
pub fn compute_ticks(range: f64, options: &TickOptions) -> DotplotResult<TickPlan> {
    options.validate()?;
    if !range.is_finite() || range <= 0.0 {
        return Err(DotplotError::InvalidRange(range));
    }

    let raw_step = range / options.target as f64;
    if !raw_step.is_normal() {
        return Err(DotplotError::InvalidRange(range));
    }

    let magnitude = magnitude_of(raw_step);
    let mut step = NICE_MULTIPLES
        .iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= raw_step)
        .unwrap_or(10.0 * magnitude);
    if !step.is_finite() {
        return Err(DotplotError::InvalidRange(range));
    }

    let sections = |step: f64| (range / step).ceil();
    let min = options.min_sections as f64;
    let max = options.max_sections as f64;

    while sections(step) < min {
        step /= 2.0;
    }
    while sections(step) > max {
        step *= 2.0;
    }

    Ok(TickPlan { step, section_count: sections(step) as u32 })
}

/// 10^floor(log10(value)), corrected for `log10` rounding at exact powers of ten.
fn magnitude_of(value: f64) -> f64 {
    let tolerance = value * 1e-12;
    let mut magnitude = 10f64.powf(value.log10().floor());
    if magnitude > value + tolerance {
        magnitude /= 10.0;
    } else if magnitude * 10.0 <= value + tolerance {
        magnitude *= 10.0;
    }
    magnitude
}

/// Digit grouping used for labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub group_separator: String,
    pub decimal_separator: String,
}

impl Default for NumberFormat {
    /// French convention: `1 234 567,5` with a narrow no-break space.
    fn default() -> Self {
        Self { group_separator: "\u{202F}".to_string(), decimal_separator: ",".to_string() }
    }
}

impl NumberFormat {
    pub fn plain() -> Self {
        Self { group_separator: ",".to_string(), decimal_separator: ".".to_string() }
    }
}

/// Label for `value` rounded to the order of magnitude of `step`.
pub fn format_tick_label(value: f64, step: f64, format: &NumberFormat) -> String {
    let magnitude = if step.is_finite() && step > 0.0 { magnitude_of(step) } else { 1.0 };
    let rounded = (value / magnitude).round() * magnitude;
    let decimals = if magnitude < 1.0 { (-magnitude.log10()).round() as usize } else { 0 };

    let text = format!("{:.*}", decimals, rounded.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut label = String::new();
    if rounded < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        label.push('-');
    }
    label.push_str(&group_digits(integer, &format.group_separator));
    if let Some(fraction) = fraction {
        label.push_str(&format.decimal_separator);
        label.push_str(fraction);
    }
    label
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// One graduation of an axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    /// Distance in pixels from the axis start.
    pub pixel_offset: f64,
    pub label: String,
}

/// Ticks for an axis showing `[origin, origin + span]` over `pixel_length` pixels.
///
/// Graduations `i = 1 .. section_count - 1`, stopping at the first value that
/// reaches the end of the axis.
pub fn axis_ticks(
    origin: f64,
    span: f64,
    pixel_length: f64,
    format: &NumberFormat,
) -> DotplotResult<Vec<Tick>> {
    let plan = compute_ticks(span, &TickOptions::for_axis(pixel_length))?;
    let axis_max = origin + span;

    let mut ticks = Vec::with_capacity(plan.section_count as usize);
    for i in 1..plan.section_count {
        let value = origin + i as f64 * plan.step;
        if value >= axis_max {
            break;
        }
        ticks.push(Tick {
            value,
            pixel_offset: (value - origin) / span * pixel_length,
            label: format_tick_label(value, plan.step, format),
        });
    }
    Ok(ticks)
}
