//! Eased stepping for discrete pan/zoom actions.

use glam::Vec2;
use web_time::{Duration, Instant};

use super::easing::EasingFunction;

/// Default duration of a keyboard/double-tap glide.
pub const GLIDE_DURATION: Duration = Duration::from_millis(200);

/// What a glide animates toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlideTarget {
    /// Pan the view by a total screen-pixel delta.
    Pan {
        /// Total pixel delta over the whole glide.
        delta: Vec2,
    },
    /// Zoom toward a fixed anchor by a total distance multiplier.
    Zoom {
        /// Anchor pixel, fixed for the whole glide.
        anchor: Vec2,
        /// Total distance multiplier once the glide completes.
        multiplier: f32,
    },
}

/// One incremental step of a glide, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlideStep {
    /// Pan by this pixel delta now.
    Pan {
        /// Incremental pixel delta since the previous step.
        delta: Vec2,
    },
    /// Zoom by this multiplier toward the anchor now.
    Zoom {
        /// The glide's fixed anchor.
        anchor: Vec2,
        /// Incremental multiplier since the previous step.
        multiplier: f32,
    },
}

/// An eased animation from "nothing applied" to a pan/zoom target.
///
/// The glide is a pure stepping function over an injected clock: each
/// [`step`](Self::step) call re-derives the eased cumulative progress
/// and yields only the increment since the previous step, so applying
/// every yielded step in order lands exactly on the target. For zooms
/// the cumulative multiplier at eased progress `e` is `1 + (m − 1)·e`,
/// re-derived each step the way the interactive zoom path re-applies
/// `zoom_toward`.
#[derive(Debug)]
pub struct Glide {
    started: Instant,
    duration: Duration,
    easing: EasingFunction,
    target: GlideTarget,
    /// Eased progress already handed out.
    applied: f32,
    finished: bool,
}

impl Glide {
    /// Start a glide at `now` with the default duration and easing.
    #[must_use]
    pub fn new(target: GlideTarget, now: Instant) -> Self {
        Self::with_duration(target, now, GLIDE_DURATION)
    }

    /// Start a glide with an explicit duration.
    #[must_use]
    pub fn with_duration(
        target: GlideTarget,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Self {
            started: now,
            duration,
            easing: EasingFunction::DEFAULT,
            target,
            applied: 0.0,
            finished: false,
        }
    }

    /// The glide's target.
    #[must_use]
    pub fn target(&self) -> GlideTarget {
        self.target
    }

    /// Whether the glide has handed out its final step.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Normalized progress (0.0 to 1.0) at the given instant.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Yield the increment to apply at `now`.
    ///
    /// Returns `None` once the glide has completed (the step that
    /// reaches full progress is the last one yielded). Steps with no
    /// effect (zero delta, multiplier 1) are skipped.
    pub fn step(&mut self, now: Instant) -> Option<GlideStep> {
        if self.finished {
            return None;
        }

        let raw = self.progress(now);
        let eased = if raw >= 1.0 {
            self.finished = true;
            1.0
        } else {
            self.easing.evaluate(raw)
        };

        let step = match self.target {
            GlideTarget::Pan { delta } => {
                let increment = (eased - self.applied) * delta;
                if increment == Vec2::ZERO {
                    None
                } else {
                    Some(GlideStep::Pan { delta: increment })
                }
            }
            GlideTarget::Zoom { anchor, multiplier } => {
                // Cumulative multiplier is linear in eased progress;
                // dividing consecutive cumulatives gives the step.
                let cumulative = 1.0 + (multiplier - 1.0) * eased;
                let previous = 1.0 + (multiplier - 1.0) * self.applied;
                let increment = cumulative / previous;
                if increment == 1.0 {
                    None
                } else {
                    Some(GlideStep::Zoom {
                        anchor,
                        multiplier: increment,
                    })
                }
            }
        };

        self.applied = eased;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_steps_sum_to_target() {
        let start = Instant::now();
        let total = Vec2::new(40.0, -40.0);
        let mut glide =
            Glide::new(GlideTarget::Pan { delta: total }, start);

        let mut accumulated = Vec2::ZERO;
        let mut now = start;
        while !glide.is_finished() {
            now += Duration::from_millis(16);
            if let Some(GlideStep::Pan { delta }) = glide.step(now) {
                accumulated += delta;
            }
        }

        assert!((accumulated - total).length() < 1e-4);
        assert_eq!(glide.step(now + Duration::from_millis(16)), None);
    }

    #[test]
    fn test_zoom_steps_multiply_to_target() {
        let start = Instant::now();
        let anchor = Vec2::new(100.0, 100.0);
        let mut glide = Glide::new(
            GlideTarget::Zoom {
                anchor,
                multiplier: 0.57,
            },
            start,
        );

        let mut product = 1.0f32;
        let mut now = start;
        while !glide.is_finished() {
            now += Duration::from_millis(16);
            if let Some(GlideStep::Zoom {
                anchor: a,
                multiplier,
            }) = glide.step(now)
            {
                assert_eq!(a, anchor);
                product *= multiplier;
            }
        }

        assert!((product - 0.57).abs() < 1e-4);
    }

    #[test]
    fn test_final_step_lands_exactly_on_target() {
        let start = Instant::now();
        let mut glide = Glide::with_duration(
            GlideTarget::Pan {
                delta: Vec2::new(10.0, 0.0),
            },
            start,
            Duration::from_millis(100),
        );

        // One mid step, then a step far past the end: the two must
        // still sum to the exact target.
        let mid = glide.step(start + Duration::from_millis(50));
        let last = glide.step(start + Duration::from_secs(5));
        let mut sum = Vec2::ZERO;
        for step in [mid, last].into_iter().flatten() {
            if let GlideStep::Pan { delta } = step {
                sum += delta;
            }
        }
        assert!((sum.x - 10.0).abs() < 1e-5);
        assert!(glide.is_finished());
    }

    #[test]
    fn test_zero_duration_completes_in_one_step() {
        let start = Instant::now();
        let mut glide = Glide::with_duration(
            GlideTarget::Pan {
                delta: Vec2::new(10.0, 0.0),
            },
            start,
            Duration::ZERO,
        );
        assert_eq!(
            glide.step(start),
            Some(GlideStep::Pan {
                delta: Vec2::new(10.0, 0.0)
            }),
        );
        assert!(glide.is_finished());
        assert_eq!(glide.step(start), None);
    }
}
