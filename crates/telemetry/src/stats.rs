use std::collections::VecDeque;
use std::time::Instant;

const SAMPLE_COUNT: usize = 60;

/// Rolling measurement of how fast frames are actually presented.
#[derive(Debug)]
pub struct RenderStats {
    present_times: VecDeque<Instant>,
    render_rate: f32,
}

impl Default for RenderStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderStats {
    pub fn new() -> Self {
        Self {
            present_times: VecDeque::with_capacity(SAMPLE_COUNT),
            render_rate: 0.0,
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        if self.present_times.len() >= SAMPLE_COUNT {
            self.present_times.pop_front();
        }
        self.present_times.push_back(now);

        if let Some(oldest) = self.present_times.front() {
            let elapsed = now.duration_since(*oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.render_rate = (self.present_times.len() - 1) as f32 / elapsed;
            }
        }
    }

    /// Frames per second over the last window of samples.
    pub fn render_rate(&self) -> f32 {
        self.render_rate
    }
}
