use std::thread;
use std::time::{Duration, Instant};

use crate::viewport::Viewport;

/// Caps how often the stream loop may render.
pub trait Pace {
    /// Blocks until the next frame may be rendered. Returns the time slept.
    fn pace(&mut self) -> Duration;
}

/// Sleeps so consecutive `pace` calls are at least one frame interval apart.
///
/// The first call never waits, and a frame that overran its budget does not
/// earn the next one a shorter wait.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self::new(viewport.frame_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Pace for FramePacer {
    fn pace(&mut self) -> Duration {
        let wait = self
            .last_tick
            .map(|last| cap_sleep(last.elapsed(), self.interval))
            .unwrap_or(Duration::ZERO);

        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.last_tick = Some(Instant::now());
        wait
    }
}

fn cap_sleep(elapsed: Duration, interval: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}
