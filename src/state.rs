/// One of the two positions a panel comes to rest at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rest {
    #[default]
    Collapsed,
    Expanded,
}

impl Rest {
    pub fn from_expanded(expanded: bool) -> Self {
        if expanded {
            Rest::Expanded
        } else {
            Rest::Collapsed
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Rest::Expanded
    }
}

impl From<Rest> for PanelPhase {
    fn from(rest: Rest) -> Self {
        match rest {
            Rest::Collapsed => PanelPhase::Collapsed,
            Rest::Expanded => PanelPhase::Expanded,
        }
    }
}

/// Where the panel is in its collapse/drag/settle cycle.
///
/// Only one of dragging or settling can be active; starting a drag while a
/// settle is in flight replaces it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    #[default]
    Collapsed,
    Expanded,
    Dragging { origin: Rest },
    Settling(Rest),
}

impl PanelPhase {
    /// Gesture captured the child.
    pub fn begin_drag(self) -> PanelPhase {
        match self {
            PanelPhase::Collapsed => PanelPhase::Dragging {
                origin: Rest::Collapsed,
            },
            PanelPhase::Expanded => PanelPhase::Dragging {
                origin: Rest::Expanded,
            },
            PanelPhase::Settling(target) => PanelPhase::Dragging { origin: target },
            dragging @ PanelPhase::Dragging { .. } => dragging,
        }
    }

    /// Gesture released; only meaningful while dragging.
    pub fn release(self, target: Rest) -> PanelPhase {
        match self {
            PanelPhase::Dragging { .. } => PanelPhase::Settling(target),
            other => other,
        }
    }

    /// The animated move reached its target.
    pub fn finish_settle(self) -> PanelPhase {
        match self {
            PanelPhase::Settling(target) => target.into(),
            other => other,
        }
    }

    /// Programmatic expand/collapse from any phase.
    pub fn settle_to(self, rest: Rest, animate: bool) -> PanelPhase {
        if animate {
            PanelPhase::Settling(rest)
        } else {
            rest.into()
        }
    }

    pub fn is_dragging(self) -> bool {
        matches!(self, PanelPhase::Dragging { .. })
    }

    pub fn is_settling(self) -> bool {
        matches!(self, PanelPhase::Settling(_))
    }

    pub fn is_resting(self) -> bool {
        matches!(self, PanelPhase::Collapsed | PanelPhase::Expanded)
    }

    /// The rest this phase is at, heading to, or was dragged from.
    pub fn rest(self) -> Rest {
        match self {
            PanelPhase::Collapsed => Rest::Collapsed,
            PanelPhase::Expanded => Rest::Expanded,
            PanelPhase::Dragging { origin } => origin,
            PanelPhase::Settling(target) => target,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelPhase::Collapsed => "collapsed",
            PanelPhase::Expanded => "expanded",
            PanelPhase::Dragging { .. } => "dragging",
            PanelPhase::Settling(Rest::Collapsed) => "settling:collapsed",
            PanelPhase::Settling(Rest::Expanded) => "settling:expanded",
        }
    }
}

/// Phase plus the child's coordinate on the active axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    phase: PanelPhase,
    position: i32,
}

impl PanelState {
    pub fn new(expanded: bool) -> Self {
        Self {
            phase: Rest::from_expanded(expanded).into(),
            position: 0,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn is_expanded(&self) -> bool {
        self.phase.rest().is_expanded()
    }

    pub(crate) fn set_phase(&mut self, phase: PanelPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}
