//! Panel options and attribute parsing.

use crate::error::PanelError;
use crate::geometry::{Edge, PanelConfig};

/// Options a panel is created with. Everything here is fixed for the panel's
/// lifetime except `expanded`, which only seeds the initial state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SwipeInOptions {
    pub edge: Edge,
    pub expanded: bool,
    pub collapsed_width: u16,
    pub collapsed_height: u16,
}

impl SwipeInOptions {
    pub fn config(&self) -> PanelConfig {
        PanelConfig::new(self.edge, self.collapsed_width, self.collapsed_height)
    }

    /// Build options from `name = value` attribute pairs.
    ///
    /// Recognized names: `slideEdge` (edge name or ordinal 0-3; unknown
    /// ordinals mean leading), `expanded`, `collapsedWidth`,
    /// `collapsedHeight`. Unrecognized names are skipped.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, PanelError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (name, value) in attrs {
            match name {
                "slideEdge" => options.edge = parse_edge(value)?,
                "expanded" => options.expanded = parse_bool(name, value)?,
                "collapsedWidth" => options.collapsed_width = parse_dimension(name, value)?,
                "collapsedHeight" => options.collapsed_height = parse_dimension(name, value)?,
                _ => tracing::debug!(attribute = name, "ignoring unknown attribute"),
            }
        }
        Ok(options)
    }
}

fn invalid(name: &str, value: &str) -> PanelError {
    PanelError::InvalidAttribute {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_edge(value: &str) -> Result<Edge, PanelError> {
    match value.trim().parse::<i64>() {
        Ok(ordinal) => Ok(Edge::from_ordinal(ordinal)),
        Err(_) => value.parse(),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, PanelError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn parse_dimension(name: &str, value: &str) -> Result<u16, PanelError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix("cells"))
        .unwrap_or(trimmed);
    digits.trim().parse().map_err(|_| invalid(name, value))
}
