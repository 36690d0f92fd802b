use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands to its handler.
#[derive(Debug, Clone)]
pub enum LoopEvent {
    /// An input event, stamped with the time it was read.
    Input(Event, Instant),
    /// Once per iteration before polling, with the time since the previous
    /// tick. Drives settle animations and redraws.
    Tick(Duration),
}

/// Single-threaded loop that owns input polling for the demo.
///
/// Every panel transition happens inside the handler, so gesture samples are
/// applied in the order they were read and never race a settle tick.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs until the handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        let mut last_tick = Instant::now();
        loop {
            let now = Instant::now();
            let dt = now.duration_since(last_tick);
            last_tick = now;
            if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Tick(dt))? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (mouse drags) before the next tick so the drawn
                // frame reflects the latest sample.
                loop {
                    let event = self.driver.read()?;
                    let flow = handler(&mut self.driver, LoopEvent::Input(event, Instant::now()))?;
                    if let ControlFlow::Quit = flow {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
