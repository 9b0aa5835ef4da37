//! Screen-pixel to camera-space conversion.
//!
//! The one piece of camera-aware math in the crate. Everything here is
//! a pure function of `(fov, distance, viewport)` so it can be tested
//! without a controller instance.

use glam::{Vec2, Vec3};

use super::handle::Viewport;

/// Wheel/pinch deltas are clamped to this magnitude before deriving a
/// scale multiplier, so a single wild event can't teleport the camera.
pub const MAX_ZOOM_DELTA: f32 = 10.0;

/// Pixels covered by one world unit at the given distance.
///
/// The visible world height at distance `d` for a vertical fov `θ` is
/// `2·tan(θ/2)·d`; dividing the viewport height by it yields the
/// current screen scale.
#[must_use]
pub fn pixels_per_world_unit(
    fov_degrees: f32,
    distance: f32,
    viewport: Viewport,
) -> f32 {
    let v_fov = fov_degrees.to_radians();
    let world_height = 2.0 * (v_fov / 2.0).tan() * distance;
    viewport.height / world_height
}

/// Convert a screen-pixel pan delta into a camera-position delta.
///
/// The X sign is flipped: dragging the pointer right moves the camera
/// left, so the content follows the pointer.
#[must_use]
pub fn pan_to_world(
    delta_px: Vec2,
    fov_degrees: f32,
    distance: f32,
    viewport: Viewport,
) -> Vec2 {
    let scale = pixels_per_world_unit(fov_degrees, distance, viewport);
    Vec2::new(-delta_px.x / scale, delta_px.y / scale)
}

/// Camera position after zooming toward an anchor pixel.
///
/// Anchor offsets are measured from the viewport center and scaled by
/// `multiplier - 1`, which keeps the world point under the anchor
/// stationary on screen while the distance changes. Distance clamping
/// is the caller's concern; this function only computes the candidate
/// position.
#[must_use]
pub fn zoom_toward(
    position: Vec3,
    fov_degrees: f32,
    viewport: Viewport,
    anchor: Vec2,
    multiplier: f32,
) -> Vec3 {
    let scale = pixels_per_world_unit(fov_degrees, position.z, viewport);
    let center = viewport.center();

    let dx = (anchor.x - center.x) / scale;
    let dy = (anchor.y - center.y) / scale;

    Vec3::new(
        position.x - (multiplier - 1.0) * dx,
        position.y + (multiplier - 1.0) * dy,
        position.z * multiplier,
    )
}

/// Map an input delta to a distance multiplier.
///
/// Linear in the clamped delta: `1 + speed·clamp(delta, ±10)`. A zero
/// delta yields exactly 1, which callers treat as a no-op.
#[must_use]
pub fn scale_multiplier(delta: f32, speed: f32) -> f32 {
    1.0 + speed * delta.clamp(-MAX_ZOOM_DELTA, MAX_ZOOM_DELTA)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_scale_at_reference_distance() {
        // fov 40°, distance 4: world height = 2·tan(20°)·4 ≈ 2.9118
        let scale = pixels_per_world_unit(40.0, 4.0, VIEWPORT);
        let expected = 600.0 / (2.0 * 20.0f32.to_radians().tan() * 4.0);
        assert!((scale - expected).abs() < 1e-4);
    }

    #[test]
    fn test_pan_sign_convention() {
        // Dragging right (+dx) must move the camera in -x; dragging
        // down (+dy) must move the camera in +y.
        let world = pan_to_world(Vec2::new(10.0, 10.0), 40.0, 4.0, VIEWPORT);
        assert!(world.x < 0.0);
        assert!(world.y > 0.0);
        assert!((world.x.abs() - world.y.abs()).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_at_center_leaves_pan_untouched() {
        // Concrete scenario: distance 4, fov 40°, 800×600, wheel delta 1
        // at the viewport center with speed 0.03.
        let multiplier = scale_multiplier(1.0, 0.03);
        assert!((multiplier - 1.03).abs() < 1e-6);

        let position = Vec3::new(0.0, 0.0, 4.0);
        let next = zoom_toward(
            position,
            40.0,
            VIEWPORT,
            Vec2::new(400.0, 300.0),
            multiplier,
        );
        assert!((next.z - 4.12).abs() < 1e-5);
        assert_eq!(next.x, 0.0);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn test_zoom_anchor_invariance() {
        // The world point under the anchor pixel must project to the
        // same pixel after the zoom.
        let position = Vec3::new(1.5, -2.0, 4.0);
        let anchor = Vec2::new(620.0, 130.0);
        let multiplier = 1.25;

        let world_at = |pos: Vec3, px: Vec2| {
            let scale = pixels_per_world_unit(40.0, pos.z, VIEWPORT);
            let center = VIEWPORT.center();
            // Inverse of the pan convention: content follows the
            // pointer, so screen x grows with world x and screen y
            // grows against world y.
            Vec2::new(
                pos.x + (px.x - center.x) / scale,
                pos.y - (px.y - center.y) / scale,
            )
        };

        let before = world_at(position, anchor);
        let next = zoom_toward(position, 40.0, VIEWPORT, anchor, multiplier);
        let after = world_at(next, anchor);

        assert!((before.x - after.x).abs() < 1e-4);
        assert!((before.y - after.y).abs() < 1e-4);
    }

    #[test]
    fn test_multiplier_clamps_wild_deltas() {
        assert_eq!(scale_multiplier(1000.0, 0.03), 1.0 + 0.03 * 10.0);
        assert_eq!(scale_multiplier(-1000.0, 0.03), 1.0 - 0.03 * 10.0);
        assert_eq!(scale_multiplier(0.0, 0.03), 1.0);
    }
}
