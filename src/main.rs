//! Demo viewer: a bare window wired to a [`PanZoomController`].
//!
//! No rendering — the demo logs camera movement instead. Drag with the
//! left button (or one finger) to pan, scroll (or pinch) to zoom,
//! arrows and `+`/`-` for keyboard steps. Run with
//! `RUST_LOG=debug cargo run --features binary`.

use std::sync::Arc;

use drift::camera::{PerspectiveCamera, Viewport};
use drift::controller::PanZoomController;
use drift::error::DriftError;
use drift::input::{InputEvent, TouchPoint};
use glam::Vec2;
use web_time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{
    ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

struct DemoApp {
    window: Option<Arc<Window>>,
    controller: PanZoomController<PerspectiveCamera>,
    cursor: Vec2,
    /// Active touches in contact order; the controller pairs the first
    /// two for pinches.
    touches: Vec<(u64, TouchPoint)>,
}

impl DemoApp {
    fn new() -> Self {
        let mut controller =
            PanZoomController::new(PerspectiveCamera::default());
        let _ = controller.on(|event| log::debug!("event: {event:?}"));
        Self {
            window: None,
            controller,
            cursor: Vec2::ZERO,
            touches: Vec::new(),
        }
    }

    fn viewport(&self) -> Viewport {
        self.window.as_ref().map_or(
            Viewport::new(800.0, 600.0),
            |window| {
                let size = window.inner_size();
                Viewport::new(size.width as f32, size.height as f32)
            },
        )
    }

    fn touch_points(&self) -> Vec<TouchPoint> {
        self.touches.iter().map(|(_, point)| *point).collect()
    }

    fn handle_touch(&mut self, touch: &winit::event::Touch) {
        let point = TouchPoint::new(
            touch.location.x as f32,
            touch.location.y as f32,
        );
        let viewport = self.viewport();
        let now = Instant::now();

        match touch.phase {
            TouchPhase::Started => {
                self.touches.push((touch.id, point));
                self.controller.handle_event(
                    &InputEvent::TouchStart {
                        touches: self.touch_points(),
                    },
                    viewport,
                    now,
                );
            }
            TouchPhase::Moved => {
                if let Some(entry) =
                    self.touches.iter_mut().find(|(id, _)| *id == touch.id)
                {
                    entry.1 = point;
                }
                self.controller.handle_event(
                    &InputEvent::TouchMove {
                        touches: self.touch_points(),
                    },
                    viewport,
                    now,
                );
            }
            TouchPhase::Ended => {
                self.touches.retain(|(id, _)| *id != touch.id);
                self.controller.handle_event(
                    &InputEvent::TouchEnd {
                        remaining: self.touch_points(),
                    },
                    viewport,
                    now,
                );
            }
            TouchPhase::Cancelled => {
                self.touches.clear();
                self.controller.handle_event(
                    &InputEvent::TouchCancel,
                    viewport,
                    now,
                );
            }
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes().with_title("Drift");
            match event_loop.create_window(attrs) {
                Ok(window) => self.window = Some(Arc::new(window)),
                Err(e) => {
                    log::error!("failed to create window: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let viewport = self.viewport();
        let now = Instant::now();

        match event {
            WindowEvent::CloseRequested => {
                self.controller.dispose();
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor =
                    Vec2::new(position.x as f32, position.y as f32);
                self.controller.handle_event(
                    &InputEvent::PointerMove {
                        position: self.cursor,
                    },
                    viewport,
                    now,
                );
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let event = if state == ElementState::Pressed {
                    InputEvent::PointerDown {
                        position: self.cursor,
                    }
                } else {
                    InputEvent::PointerUp
                };
                self.controller.handle_event(&event, viewport, now);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Scroll down zooms out, matching wheel conventions.
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        -pos.y as f32 * 0.01
                    }
                };
                self.controller.handle_event(
                    &InputEvent::Wheel {
                        delta: amount,
                        position: self.cursor,
                    },
                    viewport,
                    now,
                );
            }
            WindowEvent::Touch(touch) => self.handle_touch(&touch),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        let key = format!("{code:?}");
                        if self.controller.handle_key(&key, viewport, now) {
                            log::info!(
                                "camera: {}",
                                self.controller.camera().position
                            );
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.controller.tick(viewport, now);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), DriftError> {
    env_logger::init();

    let event_loop = EventLoop::new()
        .map_err(|e| DriftError::Viewer(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new();
    event_loop
        .run_app(&mut app)
        .map_err(|e| DriftError::Viewer(e.to_string()))
}
