use ratatui::style::{Color, Modifier, Style};

use crate::state::PanelPhase;

// Centralized demo colors.

pub fn backdrop() -> Style {
    Style::default().bg(Color::Black).fg(Color::DarkGray)
}

pub fn container_border() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn child_body() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

/// Border color tracks the phase so drags and settles are visible at a glance.
pub fn child_border(phase: PanelPhase) -> Style {
    let fg = match phase {
        PanelPhase::Collapsed => Color::Gray,
        PanelPhase::Expanded => Color::Green,
        PanelPhase::Dragging { .. } => Color::Yellow,
        PanelPhase::Settling(_) => Color::Cyan,
    };
    child_body().fg(fg).add_modifier(Modifier::BOLD)
}

pub fn status_bar() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn status_accent() -> Style {
    status_bar().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rest;

    #[test]
    fn border_differs_per_phase() {
        let phases = [
            PanelPhase::Collapsed,
            PanelPhase::Expanded,
            PanelPhase::Dragging {
                origin: Rest::Collapsed,
            },
            PanelPhase::Settling(Rest::Expanded),
        ];
        let colors: Vec<_> = phases.iter().map(|p| child_border(*p).fg).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
