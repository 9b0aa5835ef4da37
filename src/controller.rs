//! The pan/zoom input controller.
//!
//! Owns the gesture state machine, the kinetic integrator and any
//! in-flight glide animation, and applies their output to a
//! [`CameraHandle`]. The host drives it with two calls:
//! [`handle_event`](PanZoomController::handle_event) for each input
//! event and [`tick`](PanZoomController::tick) once per animation
//! frame. Both take the viewport and the current instant, so the
//! controller caches neither surface size nor wall-clock time.

use glam::{Vec2, Vec3};
use web_time::{Duration, Instant};

use crate::animation::{Glide, GlideStep, GlideTarget};
use crate::camera::{projection, CameraHandle, Viewport};
use crate::events::{ControllerEvent, EventListeners, ListenerId};
use crate::input::{GestureIntent, GestureTracker, InputEvent, KeyAction};
use crate::kinetic::KineticIntegrator;
use crate::options::{ControlOptions, KeybindingOptions, Options};

/// Converts input events into camera pan/zoom with kinetic follow-through.
///
/// Generic over the camera so hosts adapt their engine's camera type
/// once and keep full ownership of the render loop. Disposal is
/// idempotent; a disposed controller ignores all further input and
/// emits nothing.
pub struct PanZoomController<C: CameraHandle> {
    camera: C,
    control: ControlOptions,
    keybindings: KeybindingOptions,
    gestures: GestureTracker,
    kinetic: KineticIntegrator,
    glide: Option<Glide>,
    listeners: EventListeners,
    /// Whether `PanStart` has fired for the current drag.
    pan_started: bool,
    /// Whether a zoom interaction has applied a step but not yet
    /// emitted `ZoomEnd`.
    zoom_started: bool,
    disposed: bool,
}

impl<C: CameraHandle> PanZoomController<C> {
    /// Controller with default options.
    #[must_use]
    pub fn new(camera: C) -> Self {
        Self::with_options(camera, Options::default())
    }

    /// Controller with explicit options.
    #[must_use]
    pub fn with_options(camera: C, options: Options) -> Self {
        let double_tap_window =
            Duration::from_millis(options.control.double_tap_window_ms);
        Self {
            camera,
            control: options.control,
            keybindings: options.keybindings,
            gestures: GestureTracker::with_double_tap_window(
                double_tap_window,
            ),
            kinetic: KineticIntegrator::new(),
            glide: None,
            listeners: EventListeners::new(),
            pan_started: false,
            zoom_started: false,
            disposed: false,
        }
    }

    // ── Accessors and tuning knobs ──────────────────────────────────────

    /// Shared access to the camera.
    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the camera. Moving it directly fires no events.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Current control options.
    #[must_use]
    pub fn options(&self) -> &ControlOptions {
        &self.control
    }

    /// Zoom sensitivity.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.control.speed
    }

    /// Set the zoom sensitivity.
    pub fn set_speed(&mut self, speed: f32) {
        self.control.speed = speed;
    }

    /// Smallest allowed camera distance.
    #[must_use]
    pub fn min_scale(&self) -> f32 {
        self.control.min_scale
    }

    /// Set the smallest allowed camera distance.
    pub fn set_min_scale(&mut self, min_scale: f32) {
        self.control.min_scale = min_scale;
    }

    /// Largest allowed camera distance.
    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.control.max_scale
    }

    /// Set the largest allowed camera distance.
    pub fn set_max_scale(&mut self, max_scale: f32) {
        self.control.max_scale = max_scale;
    }

    /// Whether a single-pointer drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Whether a two-touch pinch is active.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.gestures.is_pinching()
    }

    /// Whether kinetic coasting is in flight.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.kinetic.is_decaying()
    }

    /// Whether a keyboard/double-tap glide is in flight.
    #[must_use]
    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ── Subscription ────────────────────────────────────────────────────

    /// Subscribe to controller events.
    pub fn on(
        &mut self,
        listener: impl FnMut(&ControllerEvent) + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ── Input ───────────────────────────────────────────────────────────

    /// Feed one input event.
    ///
    /// `viewport` is read fresh on every call; never cache it across
    /// resizes. Guarded no-op after disposal.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        viewport: Viewport,
        now: Instant,
    ) {
        if self.disposed {
            return;
        }

        if let InputEvent::Wheel { delta, position } = event {
            self.wheel(*delta, *position, viewport);
            return;
        }

        // Any fresh contact wins over in-flight animation: cancel
        // decay and glides before the gesture machine sees the event.
        if matches!(
            event,
            InputEvent::PointerDown { .. } | InputEvent::TouchStart { .. }
        ) {
            self.interrupt();
        }

        if let Some(intent) = self.gestures.handle(event, now) {
            self.apply_intent(intent, viewport, now);
        }
    }

    /// Feed one key press by its `winit::keyboard::KeyCode` debug
    /// string (`"ArrowLeft"`, `"Equal"`, ...).
    ///
    /// Bound keys start an eased glide; unbound keys and presses during
    /// an active drag or pinch are ignored. Returns whether the key was
    /// consumed.
    pub fn handle_key(
        &mut self,
        key: &str,
        viewport: Viewport,
        now: Instant,
    ) -> bool {
        if self.disposed {
            return false;
        }
        let Some(action) = self.keybindings.lookup(key) else {
            return false;
        };
        if self.is_dragging() || self.is_pinching() {
            return false;
        }

        self.interrupt();

        let step = self.control.key_pan_step;
        let target = match action {
            KeyAction::PanLeft => GlideTarget::Pan {
                delta: Vec2::new(step, 0.0),
            },
            KeyAction::PanRight => GlideTarget::Pan {
                delta: Vec2::new(-step, 0.0),
            },
            KeyAction::PanUp => GlideTarget::Pan {
                delta: Vec2::new(0.0, step),
            },
            KeyAction::PanDown => GlideTarget::Pan {
                delta: Vec2::new(0.0, -step),
            },
            KeyAction::ZoomIn => GlideTarget::Zoom {
                anchor: viewport.center(),
                multiplier: projection::scale_multiplier(
                    -self.control.key_zoom_delta,
                    self.control.speed,
                ),
            },
            KeyAction::ZoomOut => GlideTarget::Zoom {
                anchor: viewport.center(),
                multiplier: projection::scale_multiplier(
                    self.control.key_zoom_delta,
                    self.control.speed,
                ),
            },
        };

        log::debug!("key {key}: {action:?}");
        self.glide = Some(Glide::with_duration(
            target,
            now,
            self.glide_duration(),
        ));
        true
    }

    /// Advance animations; call once per frame.
    ///
    /// Drives exactly one of: kinetic velocity sampling (while a drag
    /// is active), an in-flight glide, or kinetic decay. Guarded no-op
    /// after disposal or when nothing is running.
    pub fn tick(&mut self, viewport: Viewport, now: Instant) {
        if self.disposed {
            return;
        }

        if self.pan_started {
            let position = self.camera.position();
            self.kinetic.track(position.truncate(), now);
            return;
        }

        if let Some(mut glide) = self.glide.take() {
            if let Some(step) = glide.step(now) {
                match step {
                    GlideStep::Pan { delta } => {
                        self.apply_pan(delta, viewport, false);
                    }
                    GlideStep::Zoom { anchor, multiplier } => {
                        let _ = self.apply_zoom(anchor, multiplier, viewport);
                    }
                }
            }
            if glide.is_finished() {
                self.end_zoom();
            } else {
                self.glide = Some(glide);
            }
            return;
        }

        if let Some(position) = self.kinetic.step(now) {
            let current = self.camera.position();
            self.camera.set_position(Vec3::new(
                position.x, position.y, current.z,
            ));
            self.listeners.emit(&ControllerEvent::Change);
        }
    }

    /// Release everything: cancels animations, drops gesture state and
    /// listeners. Idempotent; all later calls on the controller are
    /// no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.kinetic.cancel();
        self.glide = None;
        self.gestures.reset();
        if self.pan_started {
            self.pan_started = false;
            self.listeners.emit(&ControllerEvent::PanEnd);
        }
        self.end_zoom();
        self.listeners.clear();
        self.disposed = true;
        log::debug!("controller disposed");
    }

    /// Consume the controller, returning the camera.
    #[must_use]
    pub fn into_camera(self) -> C {
        self.camera
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn glide_duration(&self) -> Duration {
        Duration::from_millis(self.control.glide_duration_ms)
    }

    /// Cancel in-flight decay and glides; last writer wins.
    fn interrupt(&mut self) {
        self.kinetic.cancel();
        if self.glide.take().is_some() {
            self.end_zoom();
        }
    }

    fn apply_intent(
        &mut self,
        intent: GestureIntent,
        viewport: Viewport,
        now: Instant,
    ) {
        match intent {
            GestureIntent::PanBy { delta } => {
                if !self.pan_started {
                    // panstart is lazy: fired on the first movement,
                    // not on the press.
                    self.pan_started = true;
                    self.listeners.emit(&ControllerEvent::PanStart);
                    let position = self.camera.position();
                    self.kinetic.start(position.truncate(), now);
                }
                self.apply_pan(delta, viewport, true);
            }
            GestureIntent::PinchStep { anchor, direction } => {
                let multiplier = projection::scale_multiplier(
                    direction,
                    self.control.speed,
                );
                let _ = self.apply_zoom(anchor, multiplier, viewport);
            }
            GestureIntent::DragEnd => self.finish_gesture(now),
            GestureIntent::DoubleTap { anchor } => {
                self.interrupt();
                let multiplier = 1.0 / self.control.double_tap_zoom;
                self.glide = Some(Glide::with_duration(
                    GlideTarget::Zoom { anchor, multiplier },
                    now,
                    self.glide_duration(),
                ));
            }
        }
    }

    /// Drag or pinch released: hand off to the integrator and close
    /// out pan/zoom event brackets.
    fn finish_gesture(&mut self, now: Instant) {
        if self.pan_started {
            let position = self.camera.position();
            let coasting =
                self.kinetic.release(position.truncate(), now);
            self.listeners.emit(&ControllerEvent::PanEnd);
            self.pan_started = false;
            if !coasting {
                log::debug!("drag released below coast velocity");
            }
        } else {
            self.kinetic.cancel();
        }
        self.end_zoom();
    }

    fn end_zoom(&mut self) {
        if self.zoom_started {
            self.zoom_started = false;
            self.listeners.emit(&ControllerEvent::ZoomEnd);
        }
    }

    fn wheel(&mut self, delta: f32, position: Vec2, viewport: Viewport) {
        self.interrupt();
        let multiplier =
            projection::scale_multiplier(delta, self.control.speed);
        if self.apply_zoom(position, multiplier, viewport) {
            self.end_zoom();
        }
    }

    fn apply_pan(&mut self, delta_px: Vec2, viewport: Viewport, fire_pan: bool) {
        let position = self.camera.position();
        let world = projection::pan_to_world(
            delta_px,
            self.camera.field_of_view(),
            position.z,
            viewport,
        );
        self.camera.set_position(position + world.extend(0.0));
        if fire_pan {
            self.listeners.emit(&ControllerEvent::Pan { delta: world });
        }
        self.listeners.emit(&ControllerEvent::Change);
    }

    /// Apply one zoom step toward an anchor, atomically.
    ///
    /// Rejects the whole step — position and distance alike, with no
    /// events — when the resulting distance leaves
    /// `[min_scale, max_scale]`. Returns whether the step was applied.
    fn apply_zoom(
        &mut self,
        anchor: Vec2,
        multiplier: f32,
        viewport: Viewport,
    ) -> bool {
        if multiplier == 1.0 {
            return false;
        }
        let position = self.camera.position();
        let next = projection::zoom_toward(
            position,
            self.camera.field_of_view(),
            viewport,
            anchor,
            multiplier,
        );
        if next.z < self.control.min_scale || next.z > self.control.max_scale {
            log::debug!("zoom rejected: distance {} out of bounds", next.z);
            return false;
        }
        self.zoom_started = true;
        self.listeners
            .emit(&ControllerEvent::ZoomStart { delta: next - position });
        self.camera.set_position(next);
        self.listeners.emit(&ControllerEvent::Change);
        true
    }
}

impl<C: CameraHandle + std::fmt::Debug> std::fmt::Debug
    for PanZoomController<C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanZoomController")
            .field("camera", &self.camera)
            .field("state", &self.gestures.state())
            .field("coasting", &self.kinetic.is_decaying())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
