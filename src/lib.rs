// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Kinetic pan/zoom input controller for perspective cameras.
//!
//! Drift converts pointer, touch, wheel and keyboard input into smooth
//! changes of a 3D camera's position (pan) and distance (zoom), with
//! inertial continuation after a drag ends. It owns no window, no render
//! loop and no camera type of its own: the host feeds it
//! [`input::InputEvent`] values and a per-frame [`tick`], and the
//! controller mutates any camera implementing [`camera::CameraHandle`].
//!
//! # Key entry points
//!
//! - [`controller::PanZoomController`] - the input controller itself
//! - [`camera::CameraHandle`] - the narrow camera capability trait
//! - [`options::Options`] - tuning knobs with TOML preset support
//! - [`events::ControllerEvent`] - the typed notification stream
//!
//! # Architecture
//!
//! Raw input flows through the [`input::gesture::GestureTracker`] state
//! machine, which classifies it into pan/zoom intents in screen pixels.
//! The controller converts those to camera-space deltas using the
//! camera's field of view (see [`camera::projection`]), applies distance
//! clamping atomically, and notifies subscribers. On drag release the
//! [`kinetic::KineticIntegrator`] takes over, decaying the last observed
//! velocity until motion settles. Discrete keyboard and double-tap
//! actions run through an eased [`animation::Glide`] instead.
//!
//! All timing is injected: every operation takes a `web_time::Instant`,
//! so the whole pipeline is deterministic under test.
//!
//! [`tick`]: controller::PanZoomController::tick

pub mod animation;
pub mod camera;
pub mod controller;
pub mod error;
pub mod events;
pub mod input;
pub mod kinetic;
pub mod options;
