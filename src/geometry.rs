//! Edge geometry: where the child may travel and where it rests.
//!
//! All four edges share two formulas. The edge only decides which axis is
//! active and whether the collapsed boundary is the near (`min`) or far
//! (`max`) end of the travel range.

use std::fmt;
use std::str::FromStr;

use ratatui::layout::Direction;

use crate::error::PanelError;

/// Side of the container the panel slides toward when collapsed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    #[default]
    Leading,
    Trailing,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Leading, Edge::Trailing, Edge::Top, Edge::Bottom];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Leading | Edge::Trailing)
    }

    /// Axis the child travels along.
    pub fn direction(self) -> Direction {
        if self.is_horizontal() {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }

    /// True when the collapsed boundary is `range.min`.
    pub fn collapses_toward_min(self) -> bool {
        matches!(self, Edge::Leading | Edge::Top)
    }

    /// Edge for the numeric ordinal used by attribute sets. Unknown ordinals
    /// fall back to `Leading`.
    pub fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            1 => Edge::Trailing,
            2 => Edge::Top,
            3 => Edge::Bottom,
            _ => Edge::Leading,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Leading => "leading",
            Edge::Trailing => "trailing",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edge {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leading" | "left" => Ok(Edge::Leading),
            "trailing" | "right" => Ok(Edge::Trailing),
            "top" => Ok(Edge::Top),
            "bottom" => Ok(Edge::Bottom),
            _ => Err(PanelError::InvalidEdge(s.to_string())),
        }
    }
}

/// Immutable panel configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub edge: Edge,
    pub collapsed_width: u16,
    pub collapsed_height: u16,
}

impl PanelConfig {
    pub fn new(edge: Edge, collapsed_width: u16, collapsed_height: u16) -> Self {
        Self {
            edge,
            collapsed_width,
            collapsed_height,
        }
    }

    /// Visible size of the child while collapsed, along the active axis.
    pub fn collapsed_extent(&self) -> i32 {
        if self.edge.is_horizontal() {
            self.collapsed_width as i32
        } else {
            self.collapsed_height as i32
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Container and child geometry for one layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFrame {
    pub width: i32,
    pub height: i32,
    pub padding: Insets,
    pub child_width: i32,
    pub child_height: i32,
    pub child_margin: Insets,
}

impl ContainerFrame {
    /// Project the frame onto the axis `edge` travels along.
    pub fn axis(&self, edge: Edge) -> AxisFrame {
        if edge.is_horizontal() {
            AxisFrame {
                extent: self.width,
                padding_leading: self.padding.left,
                child_extent: self.child_width,
                margin_leading: self.child_margin.left,
            }
        } else {
            AxisFrame {
                extent: self.height,
                padding_leading: self.padding.top,
                child_extent: self.child_height,
                margin_leading: self.child_margin.top,
            }
        }
    }
}

/// One-dimensional slice of a [`ContainerFrame`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AxisFrame {
    pub extent: i32,
    pub padding_leading: i32,
    pub child_extent: i32,
    pub margin_leading: i32,
}

impl AxisFrame {
    /// Where the child sits when laid out normally (fully inside the padding).
    pub fn inset_origin(&self) -> i32 {
        self.padding_leading + self.margin_leading
    }
}

/// Inclusive interval of valid child positions on the active axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min: i32,
    pub max: i32,
}

impl Range {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Integer midpoint, truncated toward zero.
    pub fn mid(&self) -> i32 {
        (self.min + self.max) / 2
    }

    pub fn len(&self) -> i32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }

    pub fn clamp(&self, coord: i32) -> i32 {
        coord.max(self.min).min(self.max)
    }
}

/// Travel range of the child for `edge`.
///
/// An inverted range means the collapsed extent does not fit the frame; it is
/// reported, not corrected.
pub fn range(config: &PanelConfig, frame: &ContainerFrame) -> Result<Range, PanelError> {
    let edge = config.edge;
    let axis = frame.axis(edge);
    let collapsed = config.collapsed_extent();
    let (min, max) = if edge.collapses_toward_min() {
        (collapsed - axis.child_extent, axis.inset_origin())
    } else {
        (axis.inset_origin(), axis.extent - collapsed)
    };
    if min > max {
        return Err(PanelError::InvertedRange { edge, min, max });
    }
    Ok(Range { min, max })
}

pub fn collapsed_coord(edge: Edge, range: Range) -> i32 {
    if edge.collapses_toward_min() {
        range.min
    } else {
        range.max
    }
}

pub fn expanded_coord(edge: Edge, range: Range) -> i32 {
    if edge.collapses_toward_min() {
        range.max
    } else {
        range.min
    }
}

pub fn rest_coord(edge: Edge, range: Range, expanded: bool) -> i32 {
    if expanded {
        expanded_coord(edge, range)
    } else {
        collapsed_coord(edge, range)
    }
}

/// Origin on the axis the child does not travel along.
pub fn cross_axis_origin(edge: Edge, frame: &ContainerFrame) -> i32 {
    if edge.is_horizontal() {
        frame.padding.top + frame.child_margin.top
    } else {
        frame.padding.left + frame.child_margin.left
    }
}

/// Signed rectangle the child is drawn at. The origin goes negative while a
/// leading or top panel is collapsed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChildPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl ChildPlacement {
    /// Place the child at `position` on the active axis of `edge`.
    pub fn at(edge: Edge, frame: &ContainerFrame, position: i32) -> Self {
        let cross = cross_axis_origin(edge, frame);
        let (x, y) = if edge.is_horizontal() {
            (position, cross)
        } else {
            (cross, position)
        };
        Self {
            x,
            y,
            width: frame.child_width.clamp(0, u16::MAX as i32) as u16,
            height: frame.child_height.clamp(0, u16::MAX as i32) as u16,
        }
    }

    /// Coordinate of this placement on the active axis of `edge`.
    pub fn coord(&self, edge: Edge) -> i32 {
        if edge.is_horizontal() { self.x } else { self.y }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        x >= self.x
            && x < self.x + self.width as i32
            && y >= self.y
            && y < self.y + self.height as i32
    }
}
