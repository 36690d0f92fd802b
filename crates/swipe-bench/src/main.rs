use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use swipe_in::geometry::rest_coord;
use swipe_in::panel_view::{PanelContent, PanelView, StatusLine};
use swipe_in::terminal_host::TerminalHost;
use swipe_in::ui::UiFrame;
use swipe_in::{ChildParams, DragCoordinator, Edge, Extent, PanelError, SwipeIn, SwipeInOptions, Viewport};

#[derive(Parser, Debug)]
#[command(
    name = "swipe-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flicks a swipe-in panel open and closed and reports frame timings"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 10.0
    )]
    duration_seconds: f64,

    /// Target frames per second. Used to pace rendering so comparisons are repeatable.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    target_fps: f64,

    /// Edge the panel slides in from.
    #[arg(short = 'e', long = "edge", value_name = "EDGE", default_value = "leading")]
    edge: Edge,

    /// Release velocity of each flick, in cells per second.
    #[arg(short = 's', long = "speed", value_name = "CELLS", default_value_t = 400.0)]
    flick_speed: f32,
}

impl BenchCli {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }

    fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }
}

struct BenchConfig {
    duration: Duration,
    target_fps: f64,
    frame_budget: Duration,
    edge: Edge,
    flick_speed: f32,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.5..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.5 and 600 seconds".to_string());
        }
        if !(1.0..=240.0).contains(&cli.target_fps) {
            return Err("fps must be between 1 and 240".to_string());
        }
        if !(cli.flick_speed.is_finite() && cli.flick_speed > 0.0) {
            return Err("speed must be a positive number".to_string());
        }
        Ok(Self {
            duration: cli.duration(),
            target_fps: cli.target_fps,
            frame_budget: cli.frame_budget(),
            edge: cli.edge,
            flick_speed: cli.flick_speed,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let bench_result = run_benchmark(&mut terminal, &config);

    terminal.show_cursor()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;

    let stats = bench_result?;
    println!("{}", stats.final_report(&config));

    Ok(())
}

type BenchTerminal = Terminal<CrosstermBackend<Stdout>>;

fn run_benchmark(terminal: &mut BenchTerminal, config: &BenchConfig) -> io::Result<BenchStats> {
    let mut stats = BenchStats::new();
    let mut flicker = Flicker::new(config.edge, config.flick_speed).map_err(io::Error::other)?;
    let mut exit_reason = ExitReason::Completed;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let size = terminal.size()?;
        flicker
            .resize(Rect::new(0, 0, size.width, size.height))
            .map_err(io::Error::other)?;
        flicker
            .step(frame_start.duration_since(last_frame), frame_start)
            .map_err(io::Error::other)?;
        last_frame = frame_start;
        let overlay_lines = build_overlay_lines(&stats, &flicker, config);
        terminal.draw(|frame| {
            let mut ui = UiFrame::new(frame);
            flicker.draw(&mut ui, &overlay_lines);
        })?;
        let draw_time = frame_start.elapsed();
        stats.record_frame(draw_time);

        if stats.elapsed() >= config.duration {
            break;
        }

        if poll_for_exit(config.frame_budget.saturating_sub(draw_time))? {
            exit_reason = ExitReason::UserAbort;
            break;
        }
    }

    stats.flicks = flicker.flicks;
    stats.settles = flicker.settles;
    stats.exit_reason = exit_reason;
    stats.mark_completed();
    Ok(stats)
}

/// Drives the panel through endless flick cycles: whenever it comes to rest,
/// a short gesture releases it toward the opposite end.
struct Flicker {
    coordinator: DragCoordinator<PanelContent, TerminalHost>,
    view: PanelView,
    container: Rect,
    flick_speed: f32,
    flicks: u64,
    settles: u64,
}

impl Flicker {
    fn new(edge: Edge, flick_speed: f32) -> Result<Self, PanelError> {
        let options = SwipeInOptions {
            edge,
            expanded: false,
            collapsed_width: 2,
            collapsed_height: 1,
        };
        let child = if edge.is_horizontal() {
            ChildParams {
                width: Extent::Fixed(32),
                ..ChildParams::default()
            }
        } else {
            ChildParams {
                height: Extent::Fixed(10),
                ..ChildParams::default()
            }
        };
        let mut panel = SwipeIn::from_options(&options);
        panel.add_child_with_params(
            PanelContent::new(" swipe-bench ").with_lines(["flick", "settle", "repeat"]),
            child,
        )?;
        Ok(Self {
            coordinator: DragCoordinator::new(panel, TerminalHost::new()),
            view: PanelView::new(),
            container: Rect::default(),
            flick_speed,
            flicks: 0,
            settles: 0,
        })
    }

    fn resize(&mut self, area: Rect) -> Result<(), PanelError> {
        let container = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        if container != self.container {
            self.container = container;
            self.coordinator
                .layout(Viewport::new(container.width, container.height))?;
        }
        Ok(())
    }

    fn step(&mut self, dt: Duration, now: Instant) -> Result<(), PanelError> {
        if self.coordinator.is_animating() {
            self.coordinator.tick(dt)?;
            if self.coordinator.panel().phase().is_resting() {
                self.settles += 1;
            }
            return Ok(());
        }
        let panel = self.coordinator.panel();
        let position = panel.position();
        let target = rest_coord(panel.edge(), panel.range()?, !panel.is_expanded());
        let toward = (target - position).signum();
        if !self.coordinator.on_gesture_start(now)? {
            return Ok(());
        }
        self.coordinator.on_gesture_sample(position + toward, now)?;
        self.coordinator
            .on_release(position + toward, toward as f32 * self.flick_speed)?;
        self.flicks += 1;
        Ok(())
    }

    fn draw(&mut self, frame: &mut UiFrame<'_>, overlay_lines: &[String]) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let placement = self.coordinator.host().placement();
        self.view
            .render(frame, self.container, self.coordinator.panel(), placement);
        if let Some(overlay_area) = overlay_area(self.container, overlay_lines) {
            frame.render_widget(
                Paragraph::new(overlay_lines.join("\n"))
                    .block(Block::default().borders(Borders::ALL))
                    .style(Style::default().fg(Color::White).bg(Color::Black)),
                overlay_area,
            );
        }
        let status_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        StatusLine::from_panel(self.coordinator.panel(), None).render(frame, status_area);
    }
}

fn build_overlay_lines(stats: &BenchStats, flicker: &Flicker, config: &BenchConfig) -> Vec<String> {
    let elapsed = stats.elapsed().as_secs_f64();
    let duration_target = config.duration.as_secs_f64();
    let progress = if duration_target > 0.0 {
        (elapsed / duration_target).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let fps_avg = if elapsed > 0.0 {
        stats.frame_count as f64 / elapsed
    } else {
        0.0
    };

    vec![
        "== Swipe Bench ==".to_string(),
        format!(
            "elapsed {:>5.1}/{:>5.1}s ({:>3.0}%)",
            elapsed,
            duration_target,
            progress * 100.0
        ),
        format!(
            "frames {:>8} | avg fps {:>5.1} / target {:>5.1}",
            stats.frame_count, fps_avg, config.target_fps
        ),
        format!(
            "flicks {:>8} | settles {:>8}",
            flicker.flicks, flicker.settles
        ),
        format!(
            "frame ms avg {:>6.2} | best {:>5.2} | worst {:>5.2}",
            stats.average_frame_ms(),
            stats.fastest_frame_ms(),
            stats.slowest_frame_ms()
        ),
        "press q / esc / ctrl+c to stop".to_string(),
    ]
}

/// Top-right box sized to the overlay text, or `None` when it does not fit.
fn overlay_area(window_area: Rect, lines: &[String]) -> Option<Rect> {
    let available_width = window_area.width.saturating_sub(2);
    let available_height = window_area.height.saturating_sub(2);
    if available_width < 8 || available_height < 4 {
        return None;
    }
    let text_width = lines
        .iter()
        .map(|line| line.len() as u16)
        .max()
        .unwrap_or(0);
    let width = text_width.saturating_add(2).clamp(8, available_width);
    let height = (lines.len() as u16).saturating_add(2).clamp(4, available_height);
    Some(Rect {
        x: window_area.x + window_area.width - width - 1,
        y: window_area.y + 1,
        width,
        height,
    })
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    flicks: u64,
    settles: u64,
    total_draw_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
    exit_reason: ExitReason,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            flicks: 0,
            settles: 0,
            total_draw_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
            exit_reason: ExitReason::Completed,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, draw_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_draw_time += draw_time;
        self.fastest_frame = self.fastest_frame.min(draw_time);
        self.slowest_frame = self.slowest_frame.max(draw_time);
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_draw_time.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn fastest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.fastest_frame.as_secs_f64() * 1_000.0
    }

    fn slowest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.slowest_frame.as_secs_f64() * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let fps_avg = if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Swipe bench {status}.
            Edge: {edge} | flick speed {speed:.0} cells/s
            Duration: {elapsed:.2}s (target {target:.2}s)
            Frames: {frames} | Avg FPS: {fps:.1} (target {target_fps:.1})
            Avg frame: {avg:.2} ms | Best: {best:.2} ms | Worst: {worst:.2} ms
            Flicks: {flicks} | Settles completed: {settles}
            "#,
            status = self.exit_reason.describe(),
            edge = config.edge,
            speed = config.flick_speed,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            frames = self.frame_count,
            fps = fps_avg,
            target_fps = config.target_fps,
            avg = self.average_frame_ms(),
            best = self.fastest_frame_ms(),
            worst = self.slowest_frame_ms(),
            flicks = self.flicks,
            settles = self.settles,
        )
    }
}

#[derive(Copy, Clone)]
enum ExitReason {
    Completed,
    UserAbort,
}

impl ExitReason {
    fn describe(self) -> &'static str {
        match self {
            ExitReason::Completed => "completed full duration",
            ExitReason::UserAbort => "stopped by user",
        }
    }
}

fn poll_for_exit(wait: Duration) -> io::Result<bool> {
    if !event::poll(wait)? {
        return Ok(false);
    }
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(
                    key.code,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                ) {
                    return Ok(true);
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(true);
                }
            }
            _ => {}
        }
        if !event::poll(Duration::ZERO)? {
            break;
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipe_in::PanelPhase;

    #[test]
    fn flicks_alternate_between_ends() {
        let mut flicker = Flicker::new(Edge::Trailing, 400.0).unwrap();
        flicker.resize(Rect::new(0, 0, 80, 25)).unwrap();
        let start = Instant::now();
        let frame = Duration::from_millis(16);
        let mut rests = Vec::new();
        for i in 0..200u32 {
            flicker.step(frame, start + frame * i).unwrap();
            let phase = flicker.coordinator.panel().phase();
            if phase.is_resting() && rests.last() != Some(&phase) {
                rests.push(phase);
            }
        }
        assert!(flicker.flicks >= 4);
        assert!(flicker.settles >= 3);
        assert!(rests.starts_with(&[PanelPhase::Expanded, PanelPhase::Collapsed]));
    }

    #[test]
    fn overlay_sits_in_the_top_right() {
        let lines = vec!["0123456789".to_string(); 3];
        let area = overlay_area(Rect::new(0, 0, 80, 24), &lines).unwrap();
        assert_eq!(area, Rect::new(67, 1, 12, 5));
        assert!(overlay_area(Rect::new(0, 0, 6, 3), &lines).is_none());
    }

    #[test]
    fn config_rejects_out_of_range_fps() {
        let cli = BenchCli::parse_from(["swipe-bench", "--fps", "0"]);
        assert!(BenchConfig::try_from(&cli).is_err());
        let cli = BenchCli::parse_from(["swipe-bench", "--edge", "bottom"]);
        let config = BenchConfig::try_from(&cli).unwrap();
        assert_eq!(config.edge, Edge::Bottom);
    }
}
