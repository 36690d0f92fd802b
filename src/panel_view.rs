//! Rendering for the demo: the container backdrop, the child at its signed
//! placement, and a one-line status bar.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::container::SwipeIn;
use crate::geometry::{ChildPlacement, Range};
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

/// What the demo puts inside the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl PanelContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Draws the panel. Keeps an offscreen buffer sized to the child so the child
/// renders at its full size and is clipped only when composited.
#[derive(Debug)]
pub struct PanelView {
    scratch: Buffer,
}

impl Default for PanelView {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelView {
    pub fn new() -> Self {
        Self {
            scratch: Buffer::empty(Rect::default()),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        container: Rect,
        panel: &SwipeIn<PanelContent>,
        placement: Option<ChildPlacement>,
    ) {
        frame.render_widget(
            Block::default()
                .borders(Borders::NONE)
                .style(theme::backdrop()),
            container,
        );
        let (Some(content), Some(placement)) = (panel.child(), placement) else {
            return;
        };
        if placement.width == 0 || placement.height == 0 {
            return;
        }
        let local = Rect::new(0, 0, placement.width, placement.height);
        if self.scratch.area != local {
            self.scratch.resize(local);
        }
        self.scratch.reset();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::child_border(panel.phase()))
            .style(theme::child_body())
            .title(content.title.as_str());
        let inner = block.inner(local);
        block.render(local, &mut self.scratch);
        let body: Vec<Line> = content.lines.iter().map(|l| Line::from(l.as_str())).collect();
        Paragraph::new(body)
            .style(theme::child_body())
            .wrap(Wrap { trim: false })
            .render(inner, &mut self.scratch);
        frame.blit_from_signed(&self.scratch, (container.x, container.y), placement, container);
    }
}

/// Snapshot shown in the status line.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub phase: &'static str,
    pub edge: &'static str,
    pub position: i32,
    pub range: Range,
    pub message: Option<String>,
}

impl StatusLine {
    pub fn from_panel<C>(panel: &SwipeIn<C>, message: Option<String>) -> Self {
        Self {
            phase: panel.phase().label(),
            edge: panel.edge().as_str(),
            position: panel.position(),
            range: panel.range().unwrap_or_default(),
            message,
        }
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.render_widget(Block::default().style(theme::status_bar()), area);
        let summary = Line::from(vec![
            Span::styled(format!(" {} ", self.phase), theme::status_accent()),
            Span::styled(
                format!(
                    "{} pos {} [{}..{}] ",
                    self.edge, self.position, self.range.min, self.range.max
                ),
                theme::status_bar(),
            ),
        ]);
        let used = summary.width() as u16;
        frame.render_widget(Paragraph::new(summary), area);
        if let Some(message) = self.message.as_deref() {
            let x = area.x.saturating_add(used).saturating_add(1);
            safe_set_string(frame.buffer_mut(), area, x, area.y, message, theme::status_bar());
        }
    }
}
