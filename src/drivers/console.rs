use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};

use super::InputDriver;

/// Reads crossterm events from the controlling terminal.
///
/// Key releases and repeats are dropped so every physical press toggles the
/// panel once, regardless of whether the terminal reports enhanced key events.
#[derive(Default)]
pub struct ConsoleInputDriver {
    pending: VecDeque<Event>,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_internal(&mut self) -> io::Result<Event> {
        loop {
            let evt = crossterm::event::read()?;
            if let Some(normalized) = normalize(evt) {
                return Ok(normalized);
            }
        }
    }
}

fn normalize(evt: Event) -> Option<Event> {
    match evt {
        Event::Key(key) if key.kind != KeyEventKind::Press => None,
        other => Some(other),
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(evt) = self.pending.pop_front() {
            return Ok(evt);
        }
        self.read_internal()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            crossterm::execute!(io::stdout(), EnableMouseCapture)
        } else {
            crossterm::execute!(io::stdout(), DisableMouseCapture)
        }
    }
}
