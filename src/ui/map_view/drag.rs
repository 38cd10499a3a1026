// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tells a pan gesture apart from a click and turns cursor movement into
//! incremental pan offsets.

use iced::Point;

/// Movement (in pixels) below which a press-release pair still counts as a
/// click.
pub const CLICK_TOLERANCE: f32 = 3.0;

/// Manages press-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether the primary button is held over the map
    pub is_dragging: bool,

    /// Position where the press started
    pub start_position: Option<Point>,

    /// Position at the last pan step
    pub last_position: Option<Point>,

    /// Whether the cursor has left the click tolerance since the press
    pub moved: bool,
}

impl DragState {
    /// Starts a press at `position`
    pub fn start(&mut self, position: Point) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.last_position = Some(position);
        self.moved = false;
    }

    /// Clears the drag state
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.last_position = None;
        self.moved = false;
    }

    /// Pan offset since the previous step, as the distance the map content
    /// should move. `None` while not dragging or still inside the click
    /// tolerance.
    pub fn drag_to(&mut self, position: Point) -> Option<(f32, f32)> {
        if !self.is_dragging {
            return None;
        }
        let start = self.start_position?;
        if !self.moved && start.distance(position) < CLICK_TOLERANCE {
            return None;
        }
        self.moved = true;

        let last = self.last_position?;
        self.last_position = Some(position);
        Some((position.x - last.x, position.y - last.y))
    }

    /// Ends the press. Returns `true` when it was a click rather than a pan.
    pub fn finish(&mut self, position: Point) -> bool {
        let was_click = self.is_dragging
            && !self.moved
            && self
                .start_position
                .is_some_and(|start| start.distance(position) < CLICK_TOLERANCE);
        self.stop();
        was_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let state = DragState::default();
        assert!(!state.is_dragging);
        assert!(state.start_position.is_none());
        assert!(!state.moved);
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));
        assert_eq!(state.drag_to(Point::new(101.0, 51.0)), None);
        assert!(state.finish(Point::new(101.0, 51.0)));
        assert!(!state.is_dragging);
    }

    #[test]
    fn drag_reports_incremental_offsets() {
        let mut state = DragState::default();
        state.start(Point::new(200.0, 150.0));

        assert_eq!(state.drag_to(Point::new(180.0, 130.0)), Some((-20.0, -20.0)));
        assert_eq!(state.drag_to(Point::new(185.0, 130.0)), Some((5.0, 0.0)));
        assert!(!state.finish(Point::new(185.0, 130.0)));
    }

    #[test]
    fn returning_to_start_after_moving_is_not_a_click() {
        let mut state = DragState::default();
        state.start(Point::new(10.0, 10.0));
        state.drag_to(Point::new(40.0, 10.0));
        assert!(!state.finish(Point::new(10.0, 10.0)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = DragState::default();
        assert!(!state.finish(Point::new(0.0, 0.0)));
        assert_eq!(state.drag_to(Point::new(5.0, 5.0)), None);
    }
}
