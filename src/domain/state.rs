use std::sync::Arc;

use crate::domain::dotplot::{ParsedCoordinates, Segment, ViewBox};
use crate::domain::errors::{DotplotError, DotplotResult};

/// Loaded segments and the view that shows all of them. Immutable once built.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub segments: Arc<Vec<Segment>>,
    pub default_view: ViewBox,
    pub skipped: usize,
}

impl Dataset {
    /// Default view is `{0, 0, max x, max y}`; it must have positive area.
    pub fn new(segments: Vec<Segment>) -> DotplotResult<Self> {
        Self::from_parsed(ParsedCoordinates { segments, skipped: 0 })
    }

    pub fn from_parsed(parsed: ParsedCoordinates) -> DotplotResult<Self> {
        let default_view = parsed.extent();
        if !default_view.is_valid() {
            return Err(DotplotError::NoData(format!(
                "{} segments span {}",
                parsed.segments.len(),
                default_view.to_attribute()
            )));
        }
        Ok(Self { segments: Arc::new(parsed.segments), default_view, skipped: parsed.skipped })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
