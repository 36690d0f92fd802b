//! The single-child swipe-in container.
//!
//! `SwipeIn` owns the child slot, the frame from the last layout pass and the
//! panel state. It never draws or animates on its own: operations return what
//! the host has to do next ([`Settle`]) and the host reports back.

use tracing::{debug, warn};

use crate::config::SwipeInOptions;
use crate::error::PanelError;
use crate::geometry::{
    self, ChildPlacement, ContainerFrame, Edge, Insets, PanelConfig, Range, collapsed_coord,
    expanded_coord, rest_coord,
};
use crate::snap::{self, Snap};
use crate::state::{PanelPhase, PanelState, Rest};

/// Size of the child along one axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Fill the container's content box, minus the child's margins.
    #[default]
    MatchParent,
    Fixed(u16),
}

impl Extent {
    fn resolve(self, content: i32, margins: i32) -> i32 {
        match self {
            Extent::MatchParent => (content - margins).max(0),
            Extent::Fixed(size) => size as i32,
        }
    }
}

/// Layout parameters of the child.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChildParams {
    pub width: Extent,
    pub height: Extent,
    pub margin: Insets,
}

impl ChildParams {
    pub fn sized(width: u16, height: u16) -> Self {
        Self {
            width: Extent::Fixed(width),
            height: Extent::Fixed(height),
            margin: Insets::ZERO,
        }
    }

    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }
}

/// Container bounds as reported by the host on every layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub padding: Insets,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            padding: Insets::ZERO,
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

/// What the host must do after a programmatic expand/collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Nothing to move: no child, or no layout pass yet.
    Idle,
    /// The position was committed; run a layout pass to apply it.
    Relayout,
    /// Animate the child between the two coordinates on the active axis.
    Animate { from: i32, to: i32 },
}

#[derive(Debug)]
struct Child<C> {
    content: C,
    params: ChildParams,
}

#[derive(Debug)]
pub struct SwipeIn<C> {
    config: PanelConfig,
    child: Option<Child<C>>,
    frame: Option<ContainerFrame>,
    state: PanelState,
}

impl<C> SwipeIn<C> {
    pub fn new(config: PanelConfig, expanded: bool) -> Self {
        Self {
            config,
            child: None,
            frame: None,
            state: PanelState::new(expanded),
        }
    }

    pub fn from_options(options: &SwipeInOptions) -> Self {
        Self::new(options.config(), options.expanded)
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn edge(&self) -> Edge {
        self.config.edge
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn phase(&self) -> PanelPhase {
        self.state.phase()
    }

    pub fn position(&self) -> i32 {
        self.state.position()
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn frame(&self) -> Option<ContainerFrame> {
        self.frame
    }

    // Children ---------------------------------------------------------------

    pub fn child_count(&self) -> usize {
        usize::from(self.child.is_some())
    }

    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }

    pub fn child(&self) -> Option<&C> {
        self.child.as_ref().map(|c| &c.content)
    }

    pub fn child_mut(&mut self) -> Option<&mut C> {
        self.child.as_mut().map(|c| &mut c.content)
    }

    pub fn child_params(&self) -> Option<ChildParams> {
        self.child.as_ref().map(|c| c.params)
    }

    pub fn add_child(&mut self, child: C) -> Result<(), PanelError> {
        self.attach(child, None, ChildParams::default())
    }

    pub fn add_child_at(&mut self, child: C, index: usize) -> Result<(), PanelError> {
        self.attach(child, Some(index), ChildParams::default())
    }

    pub fn add_child_with_params(&mut self, child: C, params: ChildParams) -> Result<(), PanelError> {
        self.attach(child, None, params)
    }

    pub fn add_child_at_with_params(
        &mut self,
        child: C,
        index: usize,
        params: ChildParams,
    ) -> Result<(), PanelError> {
        self.attach(child, Some(index), params)
    }

    pub fn add_child_sized(&mut self, child: C, width: u16, height: u16) -> Result<(), PanelError> {
        self.attach(child, None, ChildParams::sized(width, height))
    }

    /// Attach during a layout pass. Returns whether the host still needs to
    /// schedule a layout for the new child.
    pub fn add_child_in_layout(
        &mut self,
        child: C,
        index: usize,
        params: ChildParams,
        prevent_request_layout: bool,
    ) -> Result<bool, PanelError> {
        self.attach(child, Some(index), params)?;
        Ok(!prevent_request_layout)
    }

    fn attach(&mut self, child: C, index: Option<usize>, params: ChildParams) -> Result<(), PanelError> {
        if self.child.is_some() {
            warn!(edge = %self.config.edge, "rejected second child");
            return Err(PanelError::MultipleChildren);
        }
        if let Some(index) = index
            && index > 0
        {
            return Err(PanelError::ChildIndexOutOfBounds { index, len: 0 });
        }
        self.child = Some(Child {
            content: child,
            params,
        });
        self.frame = None;
        debug!(edge = %self.config.edge, ?params, "attached child");
        Ok(())
    }

    pub fn remove_child(&mut self) -> Option<C> {
        let removed = self.child.take().map(|c| c.content);
        if removed.is_some() {
            self.frame = None;
            debug!(edge = %self.config.edge, "removed child");
        }
        removed
    }

    // Geometry ---------------------------------------------------------------

    /// Combine the host's viewport with the child's params.
    pub fn measure(&self, viewport: Viewport) -> Option<ContainerFrame> {
        let child = self.child.as_ref()?;
        let width = viewport.width as i32;
        let height = viewport.height as i32;
        let margin = child.params.margin;
        Some(ContainerFrame {
            width,
            height,
            padding: viewport.padding,
            child_width: child
                .params
                .width
                .resolve(width - viewport.padding.horizontal(), margin.horizontal()),
            child_height: child
                .params
                .height
                .resolve(height - viewport.padding.vertical(), margin.vertical()),
            child_margin: margin,
        })
    }

    /// Layout pass. Resting panels snap to their rest coordinate; a panel that
    /// is being dragged or settled keeps its position, clamped to the new range.
    pub fn layout(&mut self, viewport: Viewport) -> Result<Option<ChildPlacement>, PanelError> {
        let Some(frame) = self.measure(viewport) else {
            self.frame = None;
            return Ok(None);
        };
        let range = match geometry::range(&self.config, &frame) {
            Ok(range) => range,
            Err(err) => {
                self.frame = None;
                return Err(err);
            }
        };
        self.frame = Some(frame);
        let position = if self.phase().is_resting() {
            rest_coord(self.config.edge, range, self.is_expanded())
        } else {
            range.clamp(self.position())
        };
        self.state.set_position(position);
        Ok(self.placement())
    }

    /// Travel range of the child. Without a child or a layout pass this is the
    /// neutral `0..=0`.
    pub fn range(&self) -> Result<Range, PanelError> {
        match (&self.child, &self.frame) {
            (Some(_), Some(frame)) => geometry::range(&self.config, frame),
            _ => Ok(Range::default()),
        }
    }

    pub fn collapsed_coord(&self) -> Result<i32, PanelError> {
        Ok(collapsed_coord(self.config.edge, self.range()?))
    }

    pub fn expanded_coord(&self) -> Result<i32, PanelError> {
        Ok(expanded_coord(self.config.edge, self.range()?))
    }

    pub fn placement(&self) -> Option<ChildPlacement> {
        self.child.as_ref()?;
        let frame = self.frame.as_ref()?;
        Some(ChildPlacement::at(self.config.edge, frame, self.position()))
    }

    fn is_laid_out(&self) -> bool {
        self.child.is_some() && self.frame.is_some()
    }

    // Programmatic -----------------------------------------------------------

    pub fn expand(&mut self, animate: bool) -> Result<Settle, PanelError> {
        self.settle_to(Rest::Expanded, animate)
    }

    pub fn collapse(&mut self, animate: bool) -> Result<Settle, PanelError> {
        self.settle_to(Rest::Collapsed, animate)
    }

    /// Without a child or a layout pass there is nothing to animate: the rest
    /// phase is recorded and the next layout places the child there.
    fn settle_to(&mut self, rest: Rest, animate: bool) -> Result<Settle, PanelError> {
        let from = self.phase();
        let laid_out = self.is_laid_out();
        self.state.set_phase(from.settle_to(rest, animate && laid_out));
        debug!(from = from.label(), to = self.phase().label(), animate, "programmatic settle");
        if !laid_out {
            return Ok(Settle::Idle);
        }
        let target = rest_coord(self.config.edge, self.range()?, rest.is_expanded());
        if animate {
            Ok(Settle::Animate {
                from: self.position(),
                to: target,
            })
        } else {
            self.state.set_position(target);
            Ok(Settle::Relayout)
        }
    }

    // Gestures ---------------------------------------------------------------

    /// Capture the child for dragging. Interrupts an in-flight settle at the
    /// current position. Returns false when there is nothing to drag.
    pub fn begin_drag(&mut self) -> bool {
        if !self.is_laid_out() {
            return false;
        }
        let from = self.phase();
        self.state.set_phase(from.begin_drag());
        debug!(from = from.label(), position = self.position(), "drag captured");
        true
    }

    /// Follow a drag sample, clamped to the travel range. Ignored unless
    /// dragging.
    pub fn drag_to(&mut self, raw: i32) -> Result<i32, PanelError> {
        if !self.phase().is_dragging() {
            return Ok(self.position());
        }
        let position = self.range()?.clamp(raw);
        self.state.set_position(position);
        Ok(position)
    }

    /// Release the drag at `raw` with `velocity` and decide where to settle.
    /// Returns `None` when no drag was in progress.
    pub fn release(&mut self, raw: i32, velocity: f32) -> Result<Option<Snap>, PanelError> {
        if !self.phase().is_dragging() {
            return Ok(None);
        }
        let range = self.range()?;
        let position = range.clamp(raw);
        self.state.set_position(position);
        let snap = snap::decide(self.config.edge, position, range, velocity);
        self.state
            .set_phase(self.phase().release(Rest::from_expanded(snap.expanded)));
        debug!(
            position,
            velocity,
            target = snap.target,
            expanded = snap.expanded,
            "drag released"
        );
        Ok(Some(snap))
    }

    /// Record an interpolated settle position. Ignored unless settling.
    pub fn step_settle(&mut self, position: i32) {
        if self.phase().is_settling() {
            self.state.set_position(position);
        }
    }

    /// The settle reached its target: commit the rest phase and coordinate.
    pub fn finish_settle(&mut self) -> Result<(), PanelError> {
        let PanelPhase::Settling(target) = self.phase() else {
            return Ok(());
        };
        if self.is_laid_out() {
            let coord = rest_coord(self.config.edge, self.range()?, target.is_expanded());
            self.state.set_position(coord);
        }
        self.state.set_phase(self.phase().finish_settle());
        debug!(to = self.phase().label(), position = self.position(), "settle finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(edge: Edge, expanded: bool) -> SwipeIn<&'static str> {
        let mut p = SwipeIn::new(PanelConfig::new(edge, 4, 2), expanded);
        p.add_child_sized("drawer", 20, 10).unwrap();
        p
    }

    fn viewport() -> Viewport {
        Viewport::new(80, 24)
    }

    #[test]
    fn every_attach_variant_rejects_a_second_child() {
        type Attach = fn(&mut SwipeIn<&'static str>) -> Result<(), PanelError>;
        let attempts: [Attach; 6] = [
            |p| p.add_child("b"),
            |p| p.add_child_at("b", 0),
            |p| p.add_child_with_params("b", ChildParams::default()),
            |p| p.add_child_at_with_params("b", 0, ChildParams::default()),
            |p| p.add_child_sized("b", 1, 1),
            |p| p.add_child_in_layout("b", 0, ChildParams::default(), true).map(|_| ()),
        ];
        for attempt in attempts {
            let mut p = panel(Edge::Leading, false);
            p.layout(viewport()).unwrap();
            let before = p.state();
            assert_eq!(attempt(&mut p), Err(PanelError::MultipleChildren));
            assert_eq!(p.child(), Some(&"drawer"));
            assert_eq!(p.child_params(), Some(ChildParams::sized(20, 10)));
            assert_eq!(p.state(), before);
            assert_eq!(p.child_count(), 1);
        }
    }

    #[test]
    fn attach_index_must_be_zero() {
        let mut p: SwipeIn<u8> = SwipeIn::new(PanelConfig::default(), false);
        assert_eq!(
            p.add_child_at(1, 3),
            Err(PanelError::ChildIndexOutOfBounds { index: 3, len: 0 })
        );
        assert!(!p.has_child());
        assert_eq!(
            p.add_child_in_layout(1, 0, ChildParams::default(), false),
            Ok(true)
        );
    }

    #[test]
    fn queries_without_child_are_neutral() {
        let mut p: SwipeIn<u8> = SwipeIn::new(PanelConfig::new(Edge::Trailing, 4, 0), false);
        assert_eq!(p.range(), Ok(Range::default()));
        assert_eq!(p.collapsed_coord(), Ok(0));
        assert_eq!(p.layout(viewport()), Ok(None));
        assert_eq!(p.placement(), None);
        assert!(!p.begin_drag());
    }

    #[test]
    fn expand_without_child_records_intent() {
        let mut p: SwipeIn<u8> = SwipeIn::new(PanelConfig::new(Edge::Leading, 4, 0), false);
        assert_eq!(p.expand(true), Ok(Settle::Idle));
        assert_eq!(p.phase(), PanelPhase::Expanded);
        assert_eq!(p.expand(false), Ok(Settle::Idle));
        assert_eq!(p.phase(), PanelPhase::Expanded);
        p.add_child_sized(7, 20, 10).unwrap();
        let placement = p.layout(viewport()).unwrap().unwrap();
        assert_eq!(placement.x, 0);
    }

    #[test]
    fn animated_request_before_layout_lands_on_rest_coord() {
        let mut p = SwipeIn::new(PanelConfig::new(Edge::Leading, 4, 0), true);
        p.add_child_sized("drawer", 20, 10).unwrap();
        assert_eq!(p.collapse(true), Ok(Settle::Idle));
        assert_eq!(p.phase(), PanelPhase::Collapsed);
        p.layout(viewport()).unwrap();
        assert_eq!(p.position(), p.collapsed_coord().unwrap());
        assert_eq!(p.position(), -16);
    }

    #[test]
    fn layout_places_resting_child_per_edge() {
        let mut p = panel(Edge::Leading, false);
        let placed = p.layout(viewport()).unwrap().unwrap();
        assert_eq!((placed.x, placed.y), (4 - 20, 0));

        let mut p = panel(Edge::Trailing, false);
        assert_eq!(p.layout(viewport()).unwrap().unwrap().x, 80 - 4);

        let mut p = panel(Edge::Top, true);
        assert_eq!(p.layout(viewport()).unwrap().unwrap().y, 0);

        let mut p = panel(Edge::Bottom, false);
        let placed = p.layout(viewport()).unwrap().unwrap();
        assert_eq!((placed.x, placed.y), (0, 24 - 2));
    }

    #[test]
    fn match_parent_fills_content_box() {
        let mut p = SwipeIn::new(PanelConfig::new(Edge::Leading, 3, 0), false);
        let params = ChildParams::default().with_margin(Insets {
            left: 1,
            top: 0,
            right: 1,
            bottom: 0,
        });
        p.add_child_with_params((), params).unwrap();
        let vp = Viewport::new(40, 10).with_padding(Insets::uniform(2));
        let frame = p.measure(vp).unwrap();
        assert_eq!(frame.child_width, 40 - 4 - 2);
        assert_eq!(frame.child_height, 10 - 4);
        p.layout(vp).unwrap();
        assert_eq!(p.range(), Ok(Range::new(3 - 34, 2 + 1)));
    }

    #[test]
    fn inverted_range_surfaces_on_layout() {
        let mut p = SwipeIn::new(PanelConfig::new(Edge::Leading, 30, 0), false);
        p.add_child_sized((), 20, 10).unwrap();
        assert!(matches!(
            p.layout(viewport()),
            Err(PanelError::InvertedRange { .. })
        ));
        assert_eq!(p.frame(), None);
    }

    #[test]
    fn inverted_resize_drops_the_stale_frame() {
        let mut p = panel(Edge::Trailing, false);
        p.layout(viewport()).unwrap();
        assert!(p.frame().is_some());
        assert!(matches!(
            p.layout(Viewport::new(3, 24)),
            Err(PanelError::InvertedRange { .. })
        ));
        assert_eq!(p.frame(), None);
        assert_eq!(p.placement(), None);
        assert_eq!(p.range(), Ok(Range::default()));
        p.layout(viewport()).unwrap();
        assert_eq!(p.position(), 76);
    }

    #[test]
    fn immediate_round_trip_is_idempotent() {
        let mut p = panel(Edge::Trailing, false);
        p.layout(viewport()).unwrap();
        assert_eq!(p.expand(false), Ok(Settle::Relayout));
        assert_eq!(p.position(), p.expanded_coord().unwrap());
        assert_eq!(p.collapse(false), Ok(Settle::Relayout));
        let collapsed = p.collapsed_coord().unwrap();
        assert_eq!(p.position(), collapsed);
        assert_eq!(p.collapse(false), Ok(Settle::Relayout));
        assert_eq!(p.position(), collapsed);
        p.layout(viewport()).unwrap();
        assert_eq!(p.position(), collapsed);
        assert_eq!(p.phase(), PanelPhase::Collapsed);
    }

    #[test]
    fn animated_request_at_target_is_zero_distance() {
        let mut p = panel(Edge::Leading, true);
        p.layout(viewport()).unwrap();
        assert_eq!(p.expand(true), Ok(Settle::Animate { from: 0, to: 0 }));
        assert_eq!(p.phase(), PanelPhase::Settling(Rest::Expanded));
        p.finish_settle().unwrap();
        assert_eq!(p.phase(), PanelPhase::Expanded);
    }

    #[test]
    fn drag_clamps_and_release_snaps() {
        let mut p = panel(Edge::Leading, false);
        p.layout(viewport()).unwrap();
        // range is -16..=0, mid -8
        assert!(p.begin_drag());
        assert_eq!(p.drag_to(-40), Ok(-16));
        assert_eq!(p.drag_to(12), Ok(0));
        assert_eq!(p.drag_to(-6), Ok(-6));
        let snap = p.release(-6, 0.0).unwrap().unwrap();
        assert_eq!(snap, Snap { target: 0, expanded: true });
        assert_eq!(p.phase(), PanelPhase::Settling(Rest::Expanded));
        p.step_settle(-3);
        assert_eq!(p.position(), -3);
        p.finish_settle().unwrap();
        assert_eq!(p.phase(), PanelPhase::Expanded);
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn samples_outside_a_drag_are_ignored() {
        let mut p = panel(Edge::Top, false);
        p.layout(viewport()).unwrap();
        let resting = p.position();
        assert_eq!(p.drag_to(0), Ok(resting));
        assert_eq!(p.release(0, 1000.0), Ok(None));
        p.step_settle(5);
        assert_eq!(p.position(), resting);
        assert_eq!(p.phase(), PanelPhase::Collapsed);
    }

    #[test]
    fn layout_during_drag_keeps_position_in_range() {
        let mut p = panel(Edge::Trailing, false);
        p.layout(viewport()).unwrap();
        p.begin_drag();
        p.drag_to(70).unwrap();
        p.layout(Viewport::new(60, 24)).unwrap();
        assert_eq!(p.position(), 56);
        assert!(p.phase().is_dragging());
    }

    #[test]
    fn remove_child_allows_a_new_one() {
        let mut p = panel(Edge::Leading, false);
        assert_eq!(p.remove_child(), Some("drawer"));
        assert_eq!(p.remove_child(), None);
        p.add_child("replacement").unwrap();
        assert_eq!(p.child(), Some(&"replacement"));
    }
}
