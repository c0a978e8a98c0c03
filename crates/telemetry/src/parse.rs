use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Signed decimal: optional `-`, ASCII digits, optional `.` and fraction digits.
const NUMBER: &str = r"(-?[0-9]+\.?[0-9]*)";

static BALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("x: {NUMBER}, y: {NUMBER}")).expect("ball pattern is valid")
});

static BALL_AND_PADDLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("x: {NUMBER}, y: {NUMBER},.* paddle: {NUMBER}"))
        .expect("ball and paddle pattern is valid")
});

/// Which fields a telemetry line is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameKind {
    BallOnly,
    #[default]
    BallAndPaddle,
}

/// Normalized simulation state extracted from one telemetry line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedFrame {
    pub x: f64,
    pub y: f64,
    pub paddle: Option<f64>,
}

impl ParsedFrame {
    pub fn ball(x: f64, y: f64) -> Self {
        Self { x, y, paddle: None }
    }

    pub fn with_paddle(x: f64, y: f64, paddle: f64) -> Self {
        Self {
            x,
            y,
            paddle: Some(paddle),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser {
    kind: FrameKind,
}

impl LineParser {
    pub fn new(kind: FrameKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Extracts a frame from the first match in `line`.
    ///
    /// Returns `None` for lines that carry no telemetry. A captured literal
    /// that does not convert to a float is treated the same way.
    pub fn parse_line(&self, line: &str) -> Option<ParsedFrame> {
        let pattern = match self.kind {
            FrameKind::BallOnly => &*BALL_PATTERN,
            FrameKind::BallAndPaddle => &*BALL_AND_PADDLE_PATTERN,
        };
        let caps = pattern.captures(line)?;

        let x = field(&caps, 1)?;
        let y = field(&caps, 2)?;
        let paddle = match self.kind {
            FrameKind::BallOnly => None,
            FrameKind::BallAndPaddle => Some(field(&caps, 3)?),
        };

        Some(ParsedFrame { x, y, paddle })
    }
}

fn field(caps: &Captures<'_>, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}
