use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::Level;

use swipe_in::drivers::ConsoleInputDriver;
use swipe_in::log_buffer::{LogBufferHandle, set_global_log_buffer};
use swipe_in::panel_view::PanelContent;
use swipe_in::runner::{DemoApp, DemoOptions, run_demo};
use swipe_in::{ChildParams, Edge, Extent, Insets, SwipeInOptions, tracing_sub};

const HELP: &str = indoc! {"
    drag me, or press:
    e / c   expand / collapse
    E / C   same, no animation
    space   toggle
    q       quit
"};

#[derive(Parser, Debug)]
#[command(
    name = "swipe-in",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drawer panel demo: drag it out from an edge or use the keys"
)]
struct Cli {
    /// Edge the panel slides in from: leading, trailing, top or bottom.
    #[arg(short = 'e', long, value_name = "EDGE", default_value = "leading")]
    edge: Edge,

    /// Start expanded.
    #[arg(long)]
    expanded: bool,

    /// Cells left visible when collapsed on a leading or trailing edge.
    #[arg(long, value_name = "CELLS", default_value_t = 4)]
    collapsed_width: u16,

    /// Rows left visible when collapsed on a top or bottom edge.
    #[arg(long, value_name = "ROWS", default_value_t = 2)]
    collapsed_height: u16,

    /// Child width; fills the container when omitted on a vertical edge.
    #[arg(long, value_name = "CELLS")]
    child_width: Option<u16>,

    /// Child height; fills the container when omitted on a horizontal edge.
    #[arg(long, value_name = "ROWS")]
    child_height: Option<u16>,

    /// Container padding on every side.
    #[arg(long, value_name = "CELLS", default_value_t = 0)]
    padding: u16,

    /// Child margin on every side.
    #[arg(long, value_name = "CELLS", default_value_t = 0)]
    margin: u16,

    /// Frames per second while animating.
    #[arg(short = 'f', long, value_name = "FPS", default_value_t = 60.0)]
    fps: f64,

    /// Log level shown in the status line.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: Level,
}

struct DemoConfig {
    options: DemoOptions,
    frame_interval: Duration,
    log_level: Level,
}

impl TryFrom<&Cli> for DemoConfig {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(1.0..=240.0).contains(&cli.fps) {
            return Err("fps must be between 1 and 240".to_string());
        }
        let horizontal = cli.edge.is_horizontal();
        let width = match cli.child_width {
            Some(cells) => Extent::Fixed(cells),
            None if horizontal => Extent::Fixed(30),
            None => Extent::MatchParent,
        };
        let height = match cli.child_height {
            Some(rows) => Extent::Fixed(rows),
            None if horizontal => Extent::MatchParent,
            None => Extent::Fixed(8),
        };
        Ok(Self {
            options: DemoOptions {
                panel: SwipeInOptions {
                    edge: cli.edge,
                    expanded: cli.expanded,
                    collapsed_width: cli.collapsed_width,
                    collapsed_height: cli.collapsed_height,
                },
                child: ChildParams {
                    width,
                    height,
                    margin: Insets::uniform(cli.margin as i32),
                },
                padding: Insets::uniform(cli.padding as i32),
            },
            frame_interval: Duration::from_secs_f64(1.0 / cli.fps),
            log_level: cli.log_level,
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DemoConfig::try_from(&cli)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let log = LogBufferHandle::default();
    set_global_log_buffer(log.clone());
    tracing_sub::init(config.log_level);

    let content = PanelContent::new(format!(" {} ", config.options.panel.edge)).with_lines(HELP.lines());
    let mut app = DemoApp::new(&config.options, content)
        .map_err(io::Error::other)?
        .with_log(log);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    let mut driver = ConsoleInputDriver::new();

    let result = run_demo(&mut terminal, &mut driver, &mut app, config.frame_interval);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
