use std::io::{BufRead, Write};
use std::time::Instant;

use crate::error::StreamError;
use crate::pacer::Pace;
use crate::parse::LineParser;
use crate::stats::RenderStats;
use crate::viewport::{PixelFrame, Viewport};

/// The display surface the stream loop draws into.
pub trait Screen {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Polls pending display events. Returns `true` once a close was requested.
    fn shutdown_requested(&mut self) -> bool;

    /// Replaces whatever is on screen with `frame`.
    ///
    /// A surface that could not take the frame reports [`Presented::Dropped`];
    /// only unrecoverable failures are errors.
    fn present(&mut self, frame: &PixelFrame) -> Result<Presented, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presented {
    Shown,
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    ShutdownRequested,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamSummary {
    pub lines_read: u64,
    pub lines_skipped: u64,
    pub frames_rendered: u64,
    pub frames_dropped: u64,
    pub render_rate: f32,
    pub stop_reason: StopReason,
}

/// Reads telemetry lines and renders one frame per recognized line.
pub struct StreamLoop<R, S, P, W> {
    input: R,
    screen: S,
    pacer: P,
    diagnostics: W,
    parser: LineParser,
    viewport: Viewport,
    state: LoopState,
    stats: RenderStats,
    lines_read: u64,
    lines_skipped: u64,
    frames_rendered: u64,
    frames_dropped: u64,
}

impl<R, S, P, W> StreamLoop<R, S, P, W>
where
    R: BufRead,
    S: Screen,
    P: Pace,
    W: Write,
{
    pub fn new(
        input: R,
        screen: S,
        pacer: P,
        diagnostics: W,
        parser: LineParser,
        viewport: Viewport,
    ) -> Self {
        Self {
            input,
            screen,
            pacer,
            diagnostics,
            parser,
            viewport,
            state: LoopState::Running,
            stats: RenderStats::new(),
            lines_read: 0,
            lines_skipped: 0,
            frames_rendered: 0,
            frames_dropped: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn diagnostics(&self) -> &W {
        &self.diagnostics
    }

    /// Runs until the screen asks to close or the input ends.
    ///
    /// Once stopped the loop stays stopped: calling `run` again returns the
    /// same summary without touching the input or the screen.
    pub fn run(&mut self) -> Result<StreamSummary, StreamError<S::Error>> {
        let mut buf = Vec::new();

        let stop_reason = loop {
            if let LoopState::Stopped(reason) = self.state {
                break reason;
            }
            if let Some(reason) = self.step(&mut buf)? {
                log::info!(
                    "Stream stopped ({:?}) after {} lines, {} frames rendered",
                    reason,
                    self.lines_read,
                    self.frames_rendered
                );
                self.state = LoopState::Stopped(reason);
            }
        };

        Ok(StreamSummary {
            lines_read: self.lines_read,
            lines_skipped: self.lines_skipped,
            frames_rendered: self.frames_rendered,
            frames_dropped: self.frames_dropped,
            render_rate: self.stats.render_rate(),
            stop_reason,
        })
    }

    fn step(&mut self, buf: &mut Vec<u8>) -> Result<Option<StopReason>, StreamError<S::Error>> {
        if self.screen.shutdown_requested() {
            return Ok(Some(StopReason::ShutdownRequested));
        }

        buf.clear();
        let read = self
            .input
            .read_until(b'\n', buf)
            .map_err(StreamError::Read)?;
        if read == 0 {
            return Ok(Some(StopReason::EndOfInput));
        }
        self.lines_read += 1;

        let line = String::from_utf8_lossy(buf);
        let Some(frame) = self.parser.parse_line(&line) else {
            log::trace!("Skipping line {}: {:?}", self.lines_read, trim_newline(&line));
            self.lines_skipped += 1;
            return Ok(None);
        };

        let pixels = self.viewport.map(&frame);
        writeln!(self.diagnostics, "{pixels}").map_err(StreamError::Diagnostics)?;
        log::debug!("Frame {}: {:?} -> {}", self.frames_rendered + 1, frame, pixels);

        match self.screen.present(&pixels).map_err(StreamError::Display)? {
            Presented::Shown => {
                self.frames_rendered += 1;
                self.stats.record_frame(Instant::now());
                self.pacer.pace();
            }
            Presented::Dropped => {
                log::debug!("Frame for line {} was not presented", self.lines_read);
                self.frames_dropped += 1;
            }
        }
        Ok(None)
    }
}

fn trim_newline(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
