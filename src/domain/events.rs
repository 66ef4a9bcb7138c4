use std::fmt::Debug;

use crate::domain::dotplot::{Theme, ViewBox};
use crate::domain::logging::LogComponent;
use crate::log_trace;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().current_timestamp()
    }
}

/// Things that happened to the plot
#[derive(Debug, Clone, PartialEq)]
pub enum DotplotEvent {
    DatasetLoaded { segment_count: usize, skipped: usize, default_view: ViewBox },
    ViewBoxChanged { old: ViewBox, new: ViewBox },
    ZoomModeChanged { zoom_allowed: bool },
    ThemeChanged { theme: Theme },
    /// Live drag rectangle, in data space.
    SelectionChanged { selection: ViewBox },
    SelectionCleared,
    SegmentInspected { segment_id: u32, url: String },
    Rendered { lines: usize, hits: usize },
}

impl DomainEvent for DotplotEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DotplotEvent::DatasetLoaded { .. } => "DatasetLoaded",
            DotplotEvent::ViewBoxChanged { .. } => "ViewBoxChanged",
            DotplotEvent::ZoomModeChanged { .. } => "ZoomModeChanged",
            DotplotEvent::ThemeChanged { .. } => "ThemeChanged",
            DotplotEvent::SelectionChanged { .. } => "SelectionChanged",
            DotplotEvent::SelectionCleared => "SelectionCleared",
            DotplotEvent::SegmentInspected { .. } => "SegmentInspected",
            DotplotEvent::Rendered { .. } => "Rendered",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish(&self, event: DotplotEvent);
}

/// Simple in-memory event dispatcher
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    handlers: Vec<Box<dyn Fn(&DotplotEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&DotplotEvent) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish(&self, event: DotplotEvent) {
        log_trace!(LogComponent::Domain("Events"), "publish {}", event.event_type());
        for handler in &self.handlers {
            handler(&event);
        }
    }
}
