use ratatui::layout::{Direction, Rect};

use crate::geometry::{ChildPlacement, Edge};
use crate::host::LayoutHost;

/// [`LayoutHost`] for a ratatui terminal.
///
/// Requests are latched as flags and consumed once per frame by the runner.
#[derive(Debug, Default)]
pub struct TerminalHost {
    placement: Option<ChildPlacement>,
    layout_requested: bool,
    redraw_requested: bool,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(&self) -> Option<ChildPlacement> {
        self.placement
    }

    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl LayoutHost for TerminalHost {
    fn place_child(&mut self, placement: ChildPlacement) {
        self.placement = Some(placement);
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

/// Active mouse grab on the child.
///
/// Translates pointer positions into proposed child positions by keeping the
/// offset between the pointer and the child's origin constant on the active
/// axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerGrab {
    edge: Edge,
    offset: i32,
}

impl PointerGrab {
    /// Start a grab if `(column, row)` lands on the child. `container` is the
    /// screen rectangle the placement is relative to.
    pub fn begin(
        edge: Edge,
        container: Rect,
        placement: ChildPlacement,
        column: u16,
        row: u16,
    ) -> Option<Self> {
        let local_x = column as i32 - container.x as i32;
        let local_y = row as i32 - container.y as i32;
        if !container.contains((column, row).into()) || !placement.contains(local_x, local_y) {
            return None;
        }
        let pointer = axis_value(edge, local_x, local_y);
        Some(Self {
            edge,
            offset: pointer - placement.coord(edge),
        })
    }

    /// Proposed child coordinate for a pointer at `(column, row)`.
    pub fn child_coord(&self, container: Rect, column: u16, row: u16) -> i32 {
        let local_x = column as i32 - container.x as i32;
        let local_y = row as i32 - container.y as i32;
        axis_value(self.edge, local_x, local_y) - self.offset
    }
}

fn axis_value(edge: Edge, x: i32, y: i32) -> i32 {
    match edge.direction() {
        Direction::Horizontal => x,
        Direction::Vertical => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: i32, y: i32) -> ChildPlacement {
        ChildPlacement {
            x,
            y,
            width: 10,
            height: 4,
        }
    }

    #[test]
    fn flags_are_consumed_once() {
        let mut host = TerminalHost::new();
        host.request_layout();
        host.request_redraw();
        assert!(host.take_layout_request());
        assert!(!host.take_layout_request());
        assert!(host.take_redraw_request());
        assert!(!host.take_redraw_request());
    }

    #[test]
    fn place_child_keeps_latest() {
        let mut host = TerminalHost::new();
        host.place_child(placement(-6, 0));
        host.place_child(placement(-2, 0));
        assert_eq!(host.placement().map(|p| p.x), Some(-2));
    }

    #[test]
    fn grab_keeps_pointer_offset() {
        let container = Rect::new(2, 1, 40, 10);
        // child visible from column 2 to 5 (x = -6 relative to container)
        let grab = PointerGrab::begin(Edge::Leading, container, placement(-6, 0), 4, 2)
            .expect("pointer on child");
        assert_eq!(grab.child_coord(container, 4, 2), -6);
        assert_eq!(grab.child_coord(container, 9, 5), -1);
    }

    #[test]
    fn grab_misses_outside_child_or_container() {
        let container = Rect::new(0, 0, 40, 10);
        assert!(PointerGrab::begin(Edge::Leading, container, placement(-6, 0), 5, 1).is_none());
        assert!(PointerGrab::begin(Edge::Top, container, placement(0, 0), 3, 20).is_none());
    }

    #[test]
    fn vertical_grab_uses_rows() {
        let container = Rect::new(0, 0, 40, 10);
        let grab = PointerGrab::begin(Edge::Bottom, container, placement(0, 8), 1, 9)
            .expect("pointer on child");
        assert_eq!(grab.child_coord(container, 30, 5), 4);
    }
}
