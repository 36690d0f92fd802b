use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use tracing::debug;

use crate::config::SwipeInOptions;
use crate::container::{ChildParams, Settle, SwipeIn, Viewport};
use crate::drag::DragCoordinator;
use crate::drivers::InputDriver;
use crate::error::PanelError;
use crate::event_loop::{ControlFlow, EventLoop, LoopEvent};
use crate::geometry::Insets;
use crate::log_buffer::LogBufferHandle;
use crate::panel_view::{PanelContent, PanelView, StatusLine};
use crate::terminal_host::{PointerGrab, TerminalHost};
use crate::ui::UiFrame;

const STATUS_HEIGHT: u16 = 1;

/// Everything the demo needs to build its panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoOptions {
    pub panel: SwipeInOptions,
    pub child: ChildParams,
    pub padding: Insets,
}

/// Demo state: one panel filling the screen above a status line.
pub struct DemoApp {
    coordinator: DragCoordinator<PanelContent, TerminalHost>,
    padding: Insets,
    container: Rect,
    grab: Option<PointerGrab>,
    view: PanelView,
    log: Option<LogBufferHandle>,
    dirty: bool,
}

impl DemoApp {
    pub fn new(options: &DemoOptions, content: PanelContent) -> Result<Self, PanelError> {
        let mut panel = SwipeIn::from_options(&options.panel);
        panel.add_child_with_params(content, options.child)?;
        Ok(Self {
            coordinator: DragCoordinator::new(panel, TerminalHost::new()),
            padding: options.padding,
            container: Rect::default(),
            grab: None,
            view: PanelView::new(),
            log: None,
            dirty: true,
        })
    }

    /// Show the latest line of `log` in the status bar.
    pub fn with_log(mut self, log: LogBufferHandle) -> Self {
        self.log = Some(log);
        self
    }

    pub fn coordinator(&self) -> &DragCoordinator<PanelContent, TerminalHost> {
        &self.coordinator
    }

    pub fn panel(&self) -> &SwipeIn<PanelContent> {
        self.coordinator.panel()
    }

    /// Screen area the panel lays out in.
    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab.is_some()
    }

    /// Fit the container to a new terminal area, laying out when it changed.
    pub fn resize(&mut self, area: Rect) -> Result<(), PanelError> {
        let container = Rect {
            height: area.height.saturating_sub(STATUS_HEIGHT),
            ..area
        };
        if container != self.container {
            self.container = container;
            self.relayout()?;
        }
        Ok(())
    }

    fn relayout(&mut self) -> Result<(), PanelError> {
        let viewport =
            Viewport::new(self.container.width, self.container.height).with_padding(self.padding);
        self.coordinator.layout(viewport)?;
        self.dirty = true;
        Ok(())
    }

    fn flush_layout_request(&mut self) -> Result<(), PanelError> {
        if self.coordinator.host_mut().take_layout_request() {
            self.relayout()?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event, at: Instant) -> Result<ControlFlow, PanelError> {
        let flow = match event {
            Event::Key(key) => self.handle_key(key)?,
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, at)?;
                ControlFlow::Continue
            }
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height))?;
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.flush_layout_request()?;
        Ok(flow)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<ControlFlow, PanelError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('c') => ControlFlow::Quit,
                _ => ControlFlow::Continue,
            });
        }
        let settle = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(ControlFlow::Quit),
            KeyCode::Char('e') => self.coordinator.expand(true)?,
            KeyCode::Char('c') => self.coordinator.collapse(true)?,
            KeyCode::Char('E') => self.coordinator.expand(false)?,
            KeyCode::Char('C') => self.coordinator.collapse(false)?,
            KeyCode::Char(' ') => self.coordinator.toggle(true)?,
            _ => return Ok(ControlFlow::Continue),
        };
        // A programmatic request ends any gesture in progress.
        self.grab = None;
        if settle != Settle::Idle {
            self.dirty = true;
        }
        Ok(ControlFlow::Continue)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, at: Instant) -> Result<(), PanelError> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let edge = self.coordinator.panel().edge();
                let Some(placement) = self.coordinator.host().placement() else {
                    return Ok(());
                };
                let Some(grab) =
                    PointerGrab::begin(edge, self.container, placement, mouse.column, mouse.row)
                else {
                    return Ok(());
                };
                if self.coordinator.on_gesture_start(at)? {
                    debug!(column = mouse.column, row = mouse.row, "grabbed panel");
                    self.grab = Some(grab);
                    self.dirty = true;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(grab) = self.grab {
                    let raw = grab.child_coord(self.container, mouse.column, mouse.row);
                    self.coordinator.on_gesture_sample(raw, at)?;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(grab) = self.grab.take() {
                    let raw = grab.child_coord(self.container, mouse.column, mouse.row);
                    self.coordinator.on_release_tracked(raw, at)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Advance any settle in flight.
    pub fn tick(&mut self, dt: Duration) -> Result<(), PanelError> {
        self.coordinator.tick(dt)?;
        self.flush_layout_request()
    }

    /// Whether anything changed since the last draw. Consumes the request.
    pub fn needs_draw(&mut self) -> bool {
        let redraw = self.coordinator.host_mut().take_redraw_request();
        std::mem::take(&mut self.dirty) || redraw
    }

    pub fn draw(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let status_area = Rect {
            y: area.y.saturating_add(area.height.saturating_sub(STATUS_HEIGHT)),
            height: area.height.min(STATUS_HEIGHT),
            ..area
        };
        let placement = self.coordinator.host().placement();
        self.view
            .render(frame, self.container, self.coordinator.panel(), placement);
        let message = self.log.as_ref().and_then(LogBufferHandle::last);
        StatusLine::from_panel(self.coordinator.panel(), message).render(frame, status_area);
    }
}

/// Run the demo until the user quits.
pub fn run_demo<B, D>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    app: &mut DemoApp,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_driver, event| match event {
        LoopEvent::Input(evt, at) => app.handle_event(&evt, at).map_err(io::Error::other),
        LoopEvent::Tick(dt) => {
            app.tick(dt).map_err(io::Error::other)?;
            let size = terminal
                .size()
                .map_err(|e| io::Error::other(e.to_string()))?;
            app.resize(Rect::new(0, 0, size.width, size.height))
                .map_err(io::Error::other)?;
            if app.needs_draw() {
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        app.draw(&mut ui);
                    })
                    .map_err(|e| io::Error::other(e.to_string()))?;
            }
            Ok(ControlFlow::Continue)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edge;
    use crate::state::PanelPhase;
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    fn options(edge: Edge) -> DemoOptions {
        DemoOptions {
            panel: SwipeInOptions {
                edge,
                expanded: false,
                collapsed_width: 4,
                collapsed_height: 2,
            },
            child: ChildParams::sized(20, 10),
            padding: Insets::ZERO,
        }
    }

    fn app(edge: Edge) -> DemoApp {
        let mut app = DemoApp::new(&options(edge), PanelContent::new("menu")).unwrap();
        app.resize(Rect::new(0, 0, 80, 25)).unwrap();
        app
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn settle(app: &mut DemoApp) {
        for _ in 0..100 {
            app.tick(Duration::from_millis(16)).unwrap();
            if !app.coordinator().is_animating() {
                return;
            }
        }
        panic!("settle never finished");
    }

    #[test]
    fn container_leaves_room_for_status_line() {
        let app = app(Edge::Leading);
        assert_eq!(app.container(), Rect::new(0, 0, 80, 24));
        assert_eq!(app.panel().position(), -16);
    }

    #[test]
    fn mouse_flick_opens_panel() {
        let mut app = app(Edge::Leading);
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let left = MouseButton::Left;
        app.handle_event(&mouse(MouseEventKind::Down(left), 2, 3), t0)
            .unwrap();
        assert!(app.is_grabbing());
        app.handle_event(&mouse(MouseEventKind::Drag(left), 8, 3), t0 + ms(20))
            .unwrap();
        assert_eq!(app.panel().position(), -10);
        app.handle_event(&mouse(MouseEventKind::Drag(left), 14, 3), t0 + ms(40))
            .unwrap();
        app.handle_event(&mouse(MouseEventKind::Up(left), 14, 3), t0 + ms(40))
            .unwrap();
        assert!(!app.is_grabbing());
        assert_eq!(app.panel().phase(), PanelPhase::Settling(crate::state::Rest::Expanded));
        settle(&mut app);
        assert_eq!(app.panel().phase(), PanelPhase::Expanded);
        assert_eq!(app.coordinator().host().placement().map(|p| p.x), Some(0));
    }

    #[test]
    fn press_outside_child_does_not_grab() {
        let mut app = app(Edge::Leading);
        app.handle_event(
            &mouse(MouseEventKind::Down(MouseButton::Left), 40, 3),
            Instant::now(),
        )
        .unwrap();
        assert!(!app.is_grabbing());
        assert_eq!(app.panel().phase(), PanelPhase::Collapsed);
    }

    #[test]
    fn keys_drive_programmatic_requests() {
        let mut app = app(Edge::Trailing);
        let now = Instant::now();
        app.handle_event(&key('E'), now).unwrap();
        assert_eq!(app.panel().phase(), PanelPhase::Expanded);
        assert_eq!(app.coordinator().host().placement().map(|p| p.x), Some(0));
        app.handle_event(&key('c'), now).unwrap();
        assert!(app.coordinator().is_animating());
        settle(&mut app);
        assert_eq!(app.panel().position(), 76);
        app.handle_event(&key(' '), now).unwrap();
        assert_eq!(
            app.panel().phase(),
            PanelPhase::Settling(crate::state::Rest::Expanded)
        );
    }

    #[test]
    fn quit_keys() {
        let mut app = app(Edge::Top);
        let now = Instant::now();
        assert!(matches!(
            app.handle_event(&key('q'), now).unwrap(),
            ControlFlow::Quit
        ));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(
            app.handle_event(&ctrl_c, now).unwrap(),
            ControlFlow::Quit
        ));
        // ctrl+c must not be read as collapse
        assert_eq!(app.panel().phase(), PanelPhase::Collapsed);
    }

    #[test]
    fn resize_event_relays_out() {
        let mut app = app(Edge::Trailing);
        app.handle_event(&Event::Resize(40, 11), Instant::now())
            .unwrap();
        assert_eq!(app.container(), Rect::new(0, 0, 40, 10));
        assert_eq!(app.panel().position(), 36);
    }

    struct Scripted {
        events: VecDeque<Event>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn run_demo_draws_then_quits() {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let mut driver = Scripted {
            events: VecDeque::from(vec![key('E'), key('q')]),
        };
        let mut opts = options(Edge::Leading);
        opts.child = ChildParams::sized(12, 5);
        let mut app = DemoApp::new(&opts, PanelContent::new("menu")).unwrap();
        run_demo(&mut terminal, &mut driver, &mut app, Duration::ZERO).unwrap();
        assert_eq!(app.panel().phase(), PanelPhase::Expanded);
        // first frame was drawn collapsed: x = 4 - 12, right border at column 3
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((3, 0)).unwrap().symbol(), "┐");
        assert_eq!(buffer.cell((4, 0)).unwrap().symbol(), " ");
    }
}
