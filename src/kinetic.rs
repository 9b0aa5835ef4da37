//! Kinetic motion integrator.
//!
//! Produces the illusion of momentum after a drag. While a drag is
//! active the integrator samples the tracked point (the camera
//! position) on a fixed period and maintains an exponential moving
//! average of its velocity. On release, any axis whose velocity exceeds
//! the threshold gets an exponentially decaying offset toward an
//! extrapolated target; [`step`](KineticIntegrator::step) evaluates the
//! decay until it settles.
//!
//! Tracking and decay never overlap: `start` cancels a run, `release`
//! stops tracking. All timing is injected via `Instant` arguments, so
//! the whole integrator is deterministic under test.

use glam::Vec2;
use web_time::{Duration, Instant};

/// Axis velocity below this magnitude coasts nowhere on release.
pub const MIN_VELOCITY: f32 = 10.0;
/// Fraction of release velocity converted into coast distance.
pub const AMPLITUDE: f32 = 0.42;
/// Exponential decay time constant.
pub const TIME_CONSTANT: Duration = Duration::from_millis(342);
/// Velocity sampling period while tracking.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(100);
/// Decay offsets below this magnitude count as settled.
const SETTLE_THRESHOLD: f32 = 0.5;

/// One decay simulation, armed at drag release.
#[derive(Debug, Clone, Copy)]
struct KineticRun {
    /// Extrapolated resting position.
    target: Vec2,
    /// Per-axis initial offset (`AMPLITUDE * velocity`); zeroed as each
    /// axis settles.
    offset: Vec2,
    /// When the decay started.
    started: Instant,
}

/// Samples velocity during a drag and decays it after release.
#[derive(Debug)]
pub struct KineticIntegrator {
    last_point: Vec2,
    velocity: Vec2,
    last_sample: Option<Instant>,
    run: Option<KineticRun>,
}

impl KineticIntegrator {
    /// Integrator with no tracking or decay active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_point: Vec2::ZERO,
            velocity: Vec2::ZERO,
            last_sample: None,
            run: None,
        }
    }

    /// Whether velocity tracking is active.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.last_sample.is_some()
    }

    /// Whether a decay run is in flight.
    #[must_use]
    pub fn is_decaying(&self) -> bool {
        self.run.is_some()
    }

    /// Begin tracking from the given point, cancelling any decay.
    pub fn start(&mut self, point: Vec2, now: Instant) {
        self.run = None;
        self.velocity = Vec2::ZERO;
        self.last_point = point;
        self.last_sample = Some(now);
    }

    /// Feed the tracked point's current position.
    ///
    /// Safe to call every frame: samples are only taken once per
    /// [`SAMPLE_PERIOD`], so callers need no timer of their own. Does
    /// nothing unless tracking is active.
    pub fn track(&mut self, point: Vec2, now: Instant) {
        let Some(last_sample) = self.last_sample else {
            return;
        };
        let elapsed = now.duration_since(last_sample);
        if elapsed < SAMPLE_PERIOD {
            return;
        }

        let delta = point - self.last_point;
        self.last_point = point;
        self.last_sample = Some(now);

        // Normalize by elapsed time, damped so irregular sampling
        // intervals don't spike the estimate.
        let dt = 1000.0 / (1.0 + elapsed.as_secs_f32() * 1000.0);
        self.velocity = 0.8 * delta * dt + 0.2 * self.velocity;
    }

    /// Stop tracking and arm a decay run from the release point.
    ///
    /// Returns whether any axis had enough velocity to coast.
    pub fn release(&mut self, point: Vec2, now: Instant) -> bool {
        self.last_sample = None;

        let mut offset = Vec2::ZERO;
        let mut target = point;

        if self.velocity.x.abs() > MIN_VELOCITY {
            offset.x = AMPLITUDE * self.velocity.x;
            target.x += offset.x;
        }
        if self.velocity.y.abs() > MIN_VELOCITY {
            offset.y = AMPLITUDE * self.velocity.y;
            target.y += offset.y;
        }

        if offset == Vec2::ZERO {
            self.run = None;
            return false;
        }

        log::debug!(
            "coast armed: velocity {} target {target}",
            self.velocity
        );
        self.run = Some(KineticRun {
            target,
            offset,
            started: now,
        });
        true
    }

    /// Evaluate the decay at the given instant.
    ///
    /// Returns the current coasted position while motion remains, or
    /// `None` once the run settles (or when no run is active). An axis
    /// whose offset drops below the settle threshold pins to its
    /// target for the rest of the run.
    pub fn step(&mut self, now: Instant) -> Option<Vec2> {
        let run = self.run.as_mut()?;

        let elapsed = now.duration_since(run.started).as_secs_f32();
        let decay = (-elapsed / TIME_CONSTANT.as_secs_f32()).exp();

        let mut moving = false;
        let mut delta = Vec2::ZERO;

        if run.offset.x != 0.0 {
            delta.x = -run.offset.x * decay;
            if delta.x.abs() > SETTLE_THRESHOLD {
                moving = true;
            } else {
                delta.x = 0.0;
                run.offset.x = 0.0;
            }
        }
        if run.offset.y != 0.0 {
            delta.y = -run.offset.y * decay;
            if delta.y.abs() > SETTLE_THRESHOLD {
                moving = true;
            } else {
                delta.y = 0.0;
                run.offset.y = 0.0;
            }
        }

        if moving {
            Some(run.target + delta)
        } else {
            self.run = None;
            None
        }
    }

    /// Halt tracking and any decay run. Safe when nothing is running.
    pub fn cancel(&mut self) {
        self.last_sample = None;
        self.run = None;
    }
}

impl Default for KineticIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive tracking at a steady cadence so the EMA converges toward
    /// the true velocity.
    fn track_steady(
        integrator: &mut KineticIntegrator,
        start: Instant,
        step_px: f32,
        samples: u32,
    ) -> (Vec2, Instant) {
        let mut point = Vec2::ZERO;
        integrator.start(point, start);
        let mut now = start;
        for _ in 0..samples {
            now += SAMPLE_PERIOD;
            point.x += step_px;
            integrator.track(point, now);
        }
        (point, now)
    }

    #[test]
    fn test_track_ignores_subperiod_calls() {
        let mut integrator = KineticIntegrator::new();
        let start = Instant::now();
        integrator.start(Vec2::ZERO, start);

        // Per-frame calls inside the sampling period must not update
        // the average.
        integrator
            .track(Vec2::new(50.0, 0.0), start + Duration::from_millis(16));
        assert_eq!(integrator.velocity, Vec2::ZERO);

        integrator
            .track(Vec2::new(50.0, 0.0), start + Duration::from_millis(100));
        assert!(integrator.velocity.x > 0.0);
    }

    #[test]
    fn test_release_below_threshold_does_not_coast() {
        let mut integrator = KineticIntegrator::new();
        let start = Instant::now();
        // ~1 px per 100 ms sample: velocity stays far below threshold.
        let (point, now) = track_steady(&mut integrator, start, 1.0, 5);

        assert!(!integrator.release(point, now));
        assert!(!integrator.is_decaying());
        assert_eq!(integrator.step(now + SAMPLE_PERIOD), None);
    }

    #[test]
    fn test_release_fast_drag_coasts_and_settles() {
        let mut integrator = KineticIntegrator::new();
        let start = Instant::now();
        // 30 px per 100 ms sample converges the EMA near 297 units/s,
        // well above the minimum velocity.
        let (point, now) = track_steady(&mut integrator, start, 30.0, 8);

        assert!(integrator.release(point, now));
        assert!(integrator.is_decaying());

        // Immediately after release the position includes the full
        // negative offset, i.e. starts at the release point.
        let first = integrator.step(now).unwrap();
        assert!((first.x - point.x).abs() < 1e-3);

        // The decay must terminate within the analytic bound
        // t = τ·ln(|offset| / 0.5) plus one frame.
        let offset = AMPLITUDE * integrator.velocity.x;
        let bound_secs =
            TIME_CONSTANT.as_secs_f32() * (offset.abs() / 0.5).ln();
        let bound =
            now + Duration::from_secs_f32(bound_secs) + Duration::from_millis(17);

        let mut t = now;
        let mut last = first;
        while let Some(pos) = integrator.step(t) {
            last = pos;
            t += Duration::from_millis(16);
            assert!(t < bound, "decay did not settle within the bound");
        }

        // The sub-threshold frame emits nothing, so the resting
        // position is the last emitted one — just above the 0.5
        // threshold, within one 16 ms tick of decay of it.
        let target = point.x + offset;
        let tick_decay =
            (0.016f32 / TIME_CONSTANT.as_secs_f32()).exp();
        assert!((last.x - target).abs() <= 0.5 * tick_decay);
        assert!(!integrator.is_decaying());
    }

    #[test]
    fn test_settled_axis_pins_to_target() {
        let mut integrator = KineticIntegrator::new();
        let start = Instant::now();
        integrator.start(Vec2::ZERO, start);

        // Push a strong x velocity and a barely-above-threshold y one;
        // y settles first and must pin exactly to its target.
        let mut now = start;
        let mut point = Vec2::ZERO;
        for _ in 0..6 {
            now += SAMPLE_PERIOD;
            point += Vec2::new(40.0, 2.0);
            integrator.track(point, now);
        }
        // Force the y velocity just over the threshold.
        integrator.velocity.y = MIN_VELOCITY + 2.0;

        assert!(integrator.release(point, now));
        let target_y = point.y + AMPLITUDE * integrator.velocity.y;

        // One second in, the small y offset (~5 px) has settled while
        // the large x offset (~160 px) is still coasting.
        let late = now + Duration::from_secs(1);
        let pos = integrator.step(late).unwrap();
        assert_eq!(pos.y, target_y);
        assert!(integrator.is_decaying());
    }

    #[test]
    fn test_start_cancels_decay() {
        let mut integrator = KineticIntegrator::new();
        let start = Instant::now();
        let (point, now) = track_steady(&mut integrator, start, 30.0, 8);
        assert!(integrator.release(point, now));

        integrator.start(Vec2::ZERO, now + Duration::from_millis(10));
        assert!(!integrator.is_decaying());
        assert!(integrator.is_tracking());
        assert_eq!(integrator.step(now + Duration::from_millis(20)), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut integrator = KineticIntegrator::new();
        integrator.cancel();
        integrator.cancel();
        assert!(!integrator.is_tracking());
        assert!(!integrator.is_decaying());
    }
}
