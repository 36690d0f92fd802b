//! A single-child panel that slides in from one edge of its container.
//!
//! The core ([`container::SwipeIn`], [`geometry`], [`snap`], [`state`]) is
//! toolkit-agnostic. [`drag::DragCoordinator`] feeds it gesture samples and
//! talks to the embedding UI through [`host::LayoutHost`]. The remaining
//! modules host the panel in a ratatui terminal for the demo binary.

pub mod animation;
pub mod config;
pub mod constants;
pub mod container;
pub mod drag;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod host;
pub mod log_buffer;
pub mod panel_view;
pub mod runner;
pub mod snap;
pub mod state;
pub mod terminal_host;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod velocity;

pub use config::SwipeInOptions;
pub use container::{ChildParams, Extent, Settle, SwipeIn, Viewport};
pub use drag::DragCoordinator;
pub use error::PanelError;
pub use geometry::{ChildPlacement, Edge, Insets, PanelConfig, Range};
pub use host::LayoutHost;
pub use snap::Snap;
pub use state::{PanelPhase, PanelState, Rest};
