use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::value_objects::{Direction, ViewBox};

/// Domain entity - one alignment match between the two sequences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub direction: Direction,
    /// Shared by segments with identical endpoints, assigned from 1 in first-seen order.
    pub id: u32,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, direction: Direction, id: u32) -> Self {
        Self { x1, x2, y1, y2, direction, id }
    }

    /// Copy with new endpoints, same direction and id.
    pub fn with_endpoints(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, x2, y1, y2, ..*self }
    }

    pub fn is_point(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    pub fn dx(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn dy(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Result of parsing a coordinate file
#[derive(Debug, Clone, Default)]
pub struct ParsedCoordinates {
    pub segments: Vec<Segment>,
    /// Non-blank five-line groups that could not be read.
    pub skipped: usize,
}

impl ParsedCoordinates {
    /// `{0, 0, max x, max y}` over every endpoint.
    pub fn extent(&self) -> ViewBox {
        let (max_x, max_y) = self.segments.iter().fold((0.0_f64, 0.0_f64), |(mx, my), s| {
            (mx.max(s.x1).max(s.x2), my.max(s.y1).max(s.y2))
        });
        ViewBox::new(0.0, 0.0, max_x, max_y)
    }
}

/// Parse the `x1, x2, y1, y2, direction` five-lines-per-segment format.
///
/// Identical coordinate quadruples share one id; malformed groups are skipped
/// and counted.
pub fn parse_coordinates(text: &str) -> ParsedCoordinates {
    let lines: Vec<&str> = text.lines().collect();
    let mut ids: HashMap<[u64; 4], u32> = HashMap::new();
    let mut next_id = 1;
    let mut parsed = ParsedCoordinates::default();

    for group in lines.chunks(5) {
        if group.iter().all(|line| line.trim().is_empty()) {
            continue;
        }
        let Some((x1, x2, y1, y2, direction)) = parse_group(group) else {
            parsed.skipped += 1;
            continue;
        };

        // `+ 0.0` folds -0 into 0.
        let key = [x1, y1, x2, y2].map(|v| (v + 0.0).to_bits());
        let id = *ids.entry(key).or_insert_with(|| {
            let id = next_id;
            next_id += 1;
            id
        });
        parsed.segments.push(Segment::new(x1, y1, x2, y2, direction, id));
    }

    parsed
}

fn parse_group(group: &[&str]) -> Option<(f64, f64, f64, f64, Direction)> {
    let &[x1, x2, y1, y2, direction] = group else {
        return None;
    };
    let number = |line: &str| line.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    Some((
        number(x1)?,
        number(x2)?,
        number(y1)?,
        number(y2)?,
        Direction::from_str(direction.trim()).ok()?,
    ))
}
