use glam::Vec3;

/// Narrow capability interface the controller needs from a camera.
///
/// `position().z` is treated as the viewing distance for zoom, `x`/`y`
/// as planar pan offsets. The field of view is read on every
/// conversion, so hosts that animate fov stay consistent.
///
/// Implement this for your engine's camera type; nothing else couples
/// the controller to the engine.
pub trait CameraHandle {
    /// Current camera position.
    fn position(&self) -> Vec3;
    /// Replace the camera position.
    fn set_position(&mut self, position: Vec3);
    /// Vertical field of view in degrees.
    fn field_of_view(&self) -> f32;
}

/// Size of the owning surface in pixels.
///
/// Passed fresh into every controller call rather than cached, so
/// resizes are respected without any resize plumbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport from width/height in pixels.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center point of the surface.
    #[must_use]
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Minimal perspective camera satisfying [`CameraHandle`].
///
/// Used by the demo viewer and the test suite; real hosts will usually
/// adapt their engine's camera instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Camera position; `z` is the viewing distance.
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl PerspectiveCamera {
    /// Camera at the given distance, centered on the origin.
    #[must_use]
    pub const fn new(distance: f32, fovy: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            fovy,
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(4.0, 40.0)
    }
}

impl CameraHandle for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn field_of_view(&self) -> f32 {
        self.fovy
    }
}
