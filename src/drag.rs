//! Drag coordinator: the glue between raw gesture input, the panel core and a
//! [`LayoutHost`].
//!
//! Gesture coordinates are proposed child positions on the active axis, not
//! pointer positions; hosts translate pointer motion by the grab offset before
//! calling in. Samples are applied strictly in the order they arrive.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::animation::SettleAnimation;
use crate::container::{Settle, SwipeIn, Viewport};
use crate::error::PanelError;
use crate::geometry::{ChildPlacement, rest_coord};
use crate::host::LayoutHost;
use crate::state::PanelPhase;
use crate::velocity::VelocityTracker;

#[derive(Debug)]
pub struct DragCoordinator<C, H> {
    panel: SwipeIn<C>,
    host: H,
    tracker: VelocityTracker,
    animation: Option<SettleAnimation>,
}

impl<C, H: LayoutHost> DragCoordinator<C, H> {
    pub fn new(panel: SwipeIn<C>, host: H) -> Self {
        Self {
            panel,
            host,
            tracker: VelocityTracker::new(),
            animation: None,
        }
    }

    pub fn panel(&self) -> &SwipeIn<C> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut SwipeIn<C> {
        &mut self.panel
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Layout pass with a fresh viewport. A settle in flight is re-aimed when
    /// the new frame moves its target.
    pub fn layout(&mut self, viewport: Viewport) -> Result<Option<ChildPlacement>, PanelError> {
        let placement = self.panel.layout(viewport)?;
        if let PanelPhase::Settling(target) = self.panel.phase()
            && let Some(aimed) = self.animation.as_ref().map(SettleAnimation::target)
        {
            let range = self.panel.range()?;
            let to = rest_coord(self.panel.edge(), range, target.is_expanded());
            if to != aimed {
                debug!(from = aimed, to, "re-aiming settle after layout");
                self.start_settle(self.panel.position(), to, 0.0)?;
            }
        }
        if let Some(placement) = placement {
            self.host.place_child(placement);
        }
        Ok(placement)
    }

    /// Capture the child. A settle in flight is cancelled where it stands.
    pub fn on_gesture_start(&mut self, at: Instant) -> Result<bool, PanelError> {
        if self.animation.take().is_some() {
            debug!(position = self.panel.position(), "settle interrupted by capture");
        }
        if !self.panel.begin_drag() {
            return Ok(false);
        }
        self.tracker.reset();
        self.tracker.add(self.panel.position(), at);
        Ok(true)
    }

    /// Follow the gesture to `raw`, clamped to the travel range.
    pub fn on_gesture_sample(&mut self, raw: i32, at: Instant) -> Result<i32, PanelError> {
        if !self.panel.phase().is_dragging() {
            return Ok(self.panel.position());
        }
        let position = self.panel.drag_to(raw)?;
        // Track the unclamped coordinate so a fling against the bound still counts.
        self.tracker.add(raw, at);
        self.sync_child();
        Ok(position)
    }

    /// Release at `raw` with an explicit `velocity` and start settling.
    /// Returns the settle target, or `None` when nothing was being dragged.
    pub fn on_release(&mut self, raw: i32, velocity: f32) -> Result<Option<i32>, PanelError> {
        let Some(snap) = self.panel.release(raw, velocity)? else {
            return Ok(None);
        };
        self.tracker.reset();
        self.start_settle(self.panel.position(), snap.target, velocity)?;
        Ok(Some(snap.target))
    }

    /// Release at `raw`, using the velocity tracked over the gesture.
    pub fn on_release_tracked(&mut self, raw: i32, at: Instant) -> Result<Option<i32>, PanelError> {
        if !self.panel.phase().is_dragging() {
            return Ok(None);
        }
        self.tracker.add(raw, at);
        let velocity = self.tracker.velocity();
        self.on_release(raw, velocity)
    }

    /// Programmatic expand (`expand = true`) or collapse.
    pub fn on_programmatic_request(&mut self, expand: bool, animate: bool) -> Result<Settle, PanelError> {
        self.animation = None;
        self.tracker.reset();
        let settle = if expand {
            self.panel.expand(animate)?
        } else {
            self.panel.collapse(animate)?
        };
        match settle {
            Settle::Idle => {}
            Settle::Relayout => self.host.request_layout(),
            Settle::Animate { from, to } => self.start_settle(from, to, 0.0)?,
        }
        Ok(settle)
    }

    pub fn expand(&mut self, animate: bool) -> Result<Settle, PanelError> {
        self.on_programmatic_request(true, animate)
    }

    pub fn collapse(&mut self, animate: bool) -> Result<Settle, PanelError> {
        self.on_programmatic_request(false, animate)
    }

    /// Flip between expanded and collapsed based on where the panel is
    /// resting or heading.
    pub fn toggle(&mut self, animate: bool) -> Result<Settle, PanelError> {
        let expand = !self.panel.is_expanded();
        self.on_programmatic_request(expand, animate)
    }

    /// Advance the settle animation by `dt`. Returns the new position while a
    /// settle is running, `None` otherwise.
    pub fn tick(&mut self, dt: Duration) -> Result<Option<i32>, PanelError> {
        let Some(anim) = self.animation.as_mut() else {
            return Ok(None);
        };
        let position = anim.update(dt);
        let done = anim.is_done();
        self.panel.step_settle(position);
        if done {
            self.animation = None;
            self.panel.finish_settle()?;
        }
        self.sync_child();
        Ok(Some(self.panel.position()))
    }

    fn start_settle(&mut self, from: i32, to: i32, velocity: f32) -> Result<(), PanelError> {
        let range = self.panel.range()?;
        let anim = SettleAnimation::for_move(from, to, range.len(), velocity);
        debug!(from, to, duration_ms = anim.duration().as_millis() as u64, "settle started");
        if anim.is_done() {
            self.animation = None;
            self.panel.finish_settle()?;
        } else {
            self.animation = Some(anim);
        }
        self.sync_child();
        Ok(())
    }

    fn sync_child(&mut self) {
        if let Some(placement) = self.panel.placement() {
            self.host.place_child(placement);
        }
        self.host.request_redraw();
    }
}
