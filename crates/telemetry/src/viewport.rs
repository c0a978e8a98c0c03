use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::parse::ParsedFrame;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 400;
pub const DEFAULT_REFRESH_RATE: f64 = 60.0;

/// Ball radius in pixels.
pub const BALL_RADIUS: f32 = 10.0;
/// Paddle thickness in pixels, drawn flush with the right edge.
pub const PADDLE_WIDTH: f32 = 10.0;

/// Paddle length as a fraction of the viewport height.
const PADDLE_LENGTH_FRACTION: f64 = 0.2 / 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    refresh_rate: f64,
    frame_interval: Duration,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            refresh_rate: DEFAULT_REFRESH_RATE,
            frame_interval: Duration::from_secs_f64(1.0 / DEFAULT_REFRESH_RATE),
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, refresh_rate: f64) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if !refresh_rate.is_finite() || refresh_rate <= 0.0 {
            return Err(ConfigError::InvalidRefreshRate(refresh_rate));
        }
        // Rates so low that one frame outlasts `Duration` are rejected too.
        let frame_interval = Duration::try_from_secs_f64(1.0 / refresh_rate)
            .map_err(|_| ConfigError::InvalidRefreshRate(refresh_rate))?;

        Ok(Self {
            width,
            height,
            refresh_rate,
            frame_interval,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn refresh_rate(&self) -> f64 {
        self.refresh_rate
    }

    /// Minimum time between two rendered frames.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn paddle_length(&self) -> f64 {
        PADDLE_LENGTH_FRACTION * self.height as f64
    }

    /// Maps normalized `[-1, 1]` coordinates onto `[0, width] x [0, height]`.
    ///
    /// Results are truncated toward zero and never clamped, so out-of-range
    /// telemetry lands off-screen.
    pub fn map(&self, frame: &ParsedFrame) -> PixelFrame {
        let half_width = self.width as f64 / 2.0;
        let half_height = self.height as f64 / 2.0;
        let height = self.height as f64;

        PixelFrame {
            ball_x: (half_width * frame.x + half_width) as i32,
            ball_y: (half_height * frame.y + half_height) as i32,
            paddle_center_y: frame
                .paddle
                .map(|paddle| (height * ((1.0 + paddle) / 2.0)) as i32),
        }
    }
}

/// A parsed frame in viewport pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFrame {
    pub ball_x: i32,
    pub ball_y: i32,
    pub paddle_center_y: Option<i32>,
}

/// Space separated coordinates: `x y` or `x y paddle`.
impl fmt::Display for PixelFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ball_x, self.ball_y)?;
        if let Some(paddle) = self.paddle_center_y {
            write!(f, " {paddle}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: u32, height: u32) -> Viewport {
        Viewport::new(width, height, DEFAULT_REFRESH_RATE).unwrap()
    }

    #[test]
    fn maps_reference_paddle_frame() {
        let pixels = viewport(400, 400).map(&ParsedFrame::with_paddle(0.5, -0.5, 0.0));
        assert_eq!(
            pixels,
            PixelFrame {
                ball_x: 300,
                ball_y: 100,
                paddle_center_y: Some(200),
            }
        );
        assert_eq!(pixels.to_string(), "300 100 200");
    }

    #[test]
    fn maps_reference_ball_frame() {
        let pixels = viewport(400, 400).map(&ParsedFrame::ball(-1.0, 1.0));
        assert_eq!(pixels.to_string(), "0 400");
        assert_eq!(pixels.paddle_center_y, None);
    }

    #[test]
    fn range_endpoints_map_to_edges() {
        for (width, height) in [(400, 400), (640, 480), (1, 1), (333, 101), (1920, 7)] {
            let vp = viewport(width, height);

            let left = vp.map(&ParsedFrame::ball(-1.0, -1.0));
            assert_eq!((left.ball_x, left.ball_y), (0, 0));

            let right = vp.map(&ParsedFrame::ball(1.0, 1.0));
            assert_eq!((right.ball_x, right.ball_y), (width as i32, height as i32));

            let center = vp.map(&ParsedFrame::ball(0.0, 0.0));
            assert_eq!(
                (center.ball_x, center.ball_y),
                (width as i32 / 2, height as i32 / 2)
            );
        }
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 200 * 0.999 + 200 = 399.8
        let pixels = viewport(400, 400).map(&ParsedFrame::with_paddle(0.999, 0.999, 0.999));
        assert_eq!(pixels.to_string(), "399 399 399");
    }

    #[test]
    fn truncates_toward_zero_off_screen() {
        // 200 * -1.0025 + 200 = -0.5
        let pixels = viewport(400, 400).map(&ParsedFrame::ball(-1.0025, -1.5));
        assert_eq!((pixels.ball_x, pixels.ball_y), (0, -100));
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        let pixels = viewport(400, 200).map(&ParsedFrame::with_paddle(2.0, -3.0, 1.5));
        assert_eq!(
            pixels,
            PixelFrame {
                ball_x: 600,
                ball_y: -200,
                paddle_center_y: Some(250),
            }
        );
    }

    #[test]
    fn mapping_is_pure() {
        let vp = viewport(640, 480);
        let frame = ParsedFrame::with_paddle(0.123, -0.456, 0.789);
        assert_eq!(vp.map(&frame), vp.map(&frame));
    }

    #[test]
    fn paddle_length_is_tenth_of_height() {
        assert_eq!(viewport(400, 400).paddle_length(), 40.0);
        assert_eq!(viewport(400, 250).paddle_length(), 25.0);
    }

    #[test]
    fn frame_interval_follows_refresh_rate() {
        let vp = Viewport::new(400, 400, 50.0).unwrap();
        assert_eq!(vp.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert_eq!(Viewport::new(0, 400, 60.0), Err(ConfigError::ZeroWidth));
        assert_eq!(Viewport::new(400, 0, 60.0), Err(ConfigError::ZeroHeight));
        assert_eq!(
            Viewport::new(400, 400, 0.0),
            Err(ConfigError::InvalidRefreshRate(0.0))
        );
        assert_eq!(
            Viewport::new(400, 400, -5.0),
            Err(ConfigError::InvalidRefreshRate(-5.0))
        );
        assert!(Viewport::new(400, 400, f64::INFINITY).is_err());
        assert!(Viewport::new(400, 400, f64::NAN).is_err());
    }

    #[test]
    fn rejects_refresh_rate_beyond_duration_range() {
        assert_eq!(
            Viewport::new(400, 400, 1e-20),
            Err(ConfigError::InvalidRefreshRate(1e-20))
        );
        // Subnormal: the reciprocal overflows to infinity.
        assert!(Viewport::new(400, 400, f64::MIN_POSITIVE / 4.0).is_err());
    }

    #[test]
    fn slow_but_representable_rate_is_accepted() {
        let vp = Viewport::new(400, 400, 0.5).unwrap();
        assert_eq!(vp.frame_interval(), Duration::from_secs(2));
    }

    #[test]
    fn default_matches_cli_defaults() {
        let vp = Viewport::default();
        assert_eq!((vp.width(), vp.height()), (400, 400));
        assert_eq!(vp.refresh_rate(), 60.0);
    }
}
