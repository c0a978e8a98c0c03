use bytemuck::{Pod, Zeroable};
use pongviz::{BALL_RADIUS, PADDLE_WIDTH, PixelFrame, Viewport};
use winit::dpi::PhysicalSize;

/// Where the ball is parked when there is no frame to show.
const OFF_SCREEN: [f32; 2] = [-1.0e4, -1.0e4];

/// Uniform block mirrored by `Scene` in `scene.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    viewport: [f32; 2],
    surface: [f32; 2],
    ball: [f32; 2],
    paddle_top: f32,
    paddle_length: f32,
    ball_radius: f32,
    paddle_width: f32,
    _padding: [f32; 2],
}

impl SceneUniform {
    /// A blank scene.
    pub fn empty(viewport: &Viewport, surface: PhysicalSize<u32>) -> Self {
        Self {
            viewport: [viewport.width() as f32, viewport.height() as f32],
            surface: [surface.width.max(1) as f32, surface.height.max(1) as f32],
            ball: OFF_SCREEN,
            paddle_top: 0.0,
            paddle_length: 0.0,
            ball_radius: BALL_RADIUS,
            paddle_width: PADDLE_WIDTH,
            _padding: [0.0; 2],
        }
    }

    pub fn from_frame(viewport: &Viewport, surface: PhysicalSize<u32>, frame: &PixelFrame) -> Self {
        let mut scene = Self::empty(viewport, surface);
        scene.ball = [frame.ball_x as f32, frame.ball_y as f32];

        if let Some(center) = frame.paddle_center_y {
            let length = viewport.paddle_length();
            scene.paddle_top = (center as f64 - length / 2.0) as f32;
            scene.paddle_length = length as f32;
        }

        scene
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> PhysicalSize<u32> {
        PhysicalSize::new(width, height)
    }

    #[test]
    fn layout_matches_shader() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 48);
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
    }

    #[test]
    fn paddle_is_centered_on_its_row() {
        let viewport = Viewport::default();
        let frame = PixelFrame {
            ball_x: 300,
            ball_y: 100,
            paddle_center_y: Some(200),
        };

        let scene = SceneUniform::from_frame(&viewport, size(400, 400), &frame);

        assert_eq!(scene.ball, [300.0, 100.0]);
        assert_eq!(scene.paddle_top, 180.0);
        assert_eq!(scene.paddle_length, 40.0);
        assert_eq!(scene.paddle_width, PADDLE_WIDTH);
        assert_eq!(scene.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn ball_only_frame_has_no_paddle() {
        let frame = PixelFrame {
            ball_x: 0,
            ball_y: 400,
            paddle_center_y: None,
        };

        let scene = SceneUniform::from_frame(&Viewport::default(), size(400, 400), &frame);

        assert_eq!(scene.paddle_length, 0.0);
    }

    #[test]
    fn surface_scale_is_carried() {
        let scene = SceneUniform::empty(&Viewport::default(), size(800, 800));
        assert_eq!(scene.viewport, [400.0, 400.0]);
        assert_eq!(scene.surface, [800.0, 800.0]);
    }

    #[test]
    fn zero_sized_surface_does_not_divide_by_zero() {
        let scene = SceneUniform::empty(&Viewport::default(), size(0, 0));
        assert_eq!(scene.surface, [1.0, 1.0]);
    }
}
