use kurbo::Point;

use crate::domain::dotplot::{Selection, ViewBox};

/// Pointer or primary-touch input, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Point),
    Move(Point),
    Up,
    /// Touch cancel: release without committing.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging(Selection),
}

/// What one input did to the drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    /// Nothing changed.
    Ignored,
    /// Drag began; zero-size rectangle at the start point.
    Started(ViewBox),
    Updated(ViewBox),
    /// Released with a non-empty rectangle: the new view.
    Committed(ViewBox),
    /// Released without area, or cancelled.
    Discarded,
}

/// `Idle -> Dragging -> Idle` drag-to-zoom state machine.
#[derive(Debug, Clone, Default)]
pub struct SelectionInteraction {
    state: SelectionState,
}

impl SelectionInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging(_))
    }

    /// Feed one input. `to_data` maps screen points into the current view and
    /// returns `None` when no surface is attached, which makes the input a no-op.
    pub fn handle<F>(&mut self, input: PointerInput, to_data: F) -> SelectionOutcome
    where
        F: Fn(Point) -> Option<Point>,
    {
        match (self.state, input) {
            (SelectionState::Idle, PointerInput::Down(screen)) => match to_data(screen) {
                Some(start) => {
                    let selection = Selection::at(start);
                    self.state = SelectionState::Dragging(selection);
                    SelectionOutcome::Started(selection.rect())
                }
                None => SelectionOutcome::Ignored,
            },
            (SelectionState::Dragging(mut selection), PointerInput::Move(screen)) => {
                match to_data(screen) {
                    Some(end) => {
                        selection.end = end;
                        self.state = SelectionState::Dragging(selection);
                        SelectionOutcome::Updated(selection.rect())
                    }
                    None => SelectionOutcome::Ignored,
                }
            }
            (SelectionState::Dragging(selection), PointerInput::Up) => {
                self.state = SelectionState::Idle;
                if selection.is_degenerate() {
                    SelectionOutcome::Discarded
                } else {
                    SelectionOutcome::Committed(selection.rect())
                }
            }
            (SelectionState::Dragging(_), PointerInput::Cancel) => {
                self.state = SelectionState::Idle;
                SelectionOutcome::Discarded
            }
            // A second press while dragging keeps the original start.
            (SelectionState::Dragging(_), PointerInput::Down(_)) => SelectionOutcome::Ignored,
            (SelectionState::Idle, _) => SelectionOutcome::Ignored,
        }
    }

    /// Drop any drag in progress.
    pub fn reset(&mut self) -> bool {
        std::mem::take(&mut self.state) != SelectionState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(p: Point) -> Option<Point> {
        Some(p)
    }

    #[test]
    fn drag_commits_normalized_rectangle() {
        let mut sel = SelectionInteraction::new();
        assert_eq!(
            sel.handle(PointerInput::Down(Point::new(30.0, 40.0)), identity),
            SelectionOutcome::Started(ViewBox::new(30.0, 40.0, 0.0, 0.0))
        );
        sel.handle(PointerInput::Move(Point::new(10.0, 50.0)), identity);
        assert_eq!(
            sel.handle(PointerInput::Up, identity),
            SelectionOutcome::Committed(ViewBox::new(10.0, 40.0, 20.0, 10.0))
        );
        assert!(!sel.is_dragging());
    }

    #[test]
    fn second_press_keeps_start() {
        let mut sel = SelectionInteraction::new();
        sel.handle(PointerInput::Down(Point::new(1.0, 1.0)), identity);
        assert_eq!(
            sel.handle(PointerInput::Down(Point::new(9.0, 9.0)), identity),
            SelectionOutcome::Ignored
        );
        sel.handle(PointerInput::Move(Point::new(5.0, 5.0)), identity);
        assert_eq!(
            sel.handle(PointerInput::Up, identity),
            SelectionOutcome::Committed(ViewBox::new(1.0, 1.0, 4.0, 4.0))
        );
    }

    #[test]
    fn flat_drag_is_discarded() {
        let mut sel = SelectionInteraction::new();
        sel.handle(PointerInput::Down(Point::new(1.0, 1.0)), identity);
        sel.handle(PointerInput::Move(Point::new(8.0, 1.0)), identity);
        assert_eq!(sel.handle(PointerInput::Up, identity), SelectionOutcome::Discarded);
    }

    #[test]
    fn cancel_discards() {
        let mut sel = SelectionInteraction::new();
        sel.handle(PointerInput::Down(Point::new(1.0, 1.0)), identity);
        sel.handle(PointerInput::Move(Point::new(8.0, 8.0)), identity);
        assert_eq!(sel.handle(PointerInput::Cancel, identity), SelectionOutcome::Discarded);
    }

    #[test]
    fn detached_surface_is_a_no_op() {
        let mut sel = SelectionInteraction::new();
        assert_eq!(
            sel.handle(PointerInput::Down(Point::new(1.0, 1.0)), |_| None),
            SelectionOutcome::Ignored
        );
        assert!(!sel.is_dragging());
    }
}
