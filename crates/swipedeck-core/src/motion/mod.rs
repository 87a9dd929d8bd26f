#![forbid(unsafe_code)]

//! Motion: a single animated scalar behind one driver interface.
//!
//! [`Motion`] owns one mutable scalar (px) — a page's translation, a
//! sheet's drag offset — and animates it with one of two interchangeable
//! backends selected per call:
//!
//! - [`MotionConfig::Spring`]: physically-based settle, used for push/pop
//!   commit motion.
//! - [`MotionConfig::Tween`]: fixed-duration easing from the current live
//!   value, used for rebound and gesture-cancel ease-back.
//!
//! Completion is reported by [`Motion::tick`] returning
//! [`MotionStatus::Settled`] exactly once per animation; callers poll the
//! tick and translate settle into their own finalization. There are no
//! stored completion callbacks.
//!
//! # Invariants
//!
//! 1. The scalar is written only through `set_immediate`, `animate_to`,
//!    `stop`, and `tick` — exclusive ownership by the caller.
//! 2. `Settled` is returned at most once per `animate_to`; afterwards the
//!    value equals the target exactly.
//! 3. `stop` freezes the value mid-flight; it never snaps to the target.
//! 4. `set_immediate` cancels any in-flight animation.

pub mod easing;
pub mod presets;
pub mod spring;
pub mod tween;

use web_time::Duration;

pub use easing::EasingFn;
pub use spring::{SpringParams, SpringSim};
pub use tween::{TweenParams, TweenSim};

// ---------------------------------------------------------------------------
// Configuration & status
// ---------------------------------------------------------------------------

/// Backend selection for one `animate_to` call.
#[derive(Debug, Clone, Copy)]
pub enum MotionConfig {
    /// Damped spring toward the target.
    Spring(SpringParams),
    /// Fixed-duration easing toward the target.
    Tween(TweenParams),
}

/// Result of one [`Motion::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStatus {
    /// No animation in flight.
    Idle,
    /// An animation advanced but has not finished.
    Animating,
    /// The in-flight animation finished on this tick.
    Settled,
}

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Backend {
    Spring(SpringSim),
    Tween(TweenSim),
}

/// A single animated scalar (px).
#[derive(Debug, Clone, Default)]
pub struct Motion {
    value: f64,
    backend: Option<Backend>,
}

impl Motion {
    /// A motion resting at 0.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value (px).
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.backend.is_some()
    }

    /// Jump to `value` instantly, cancelling any in-flight animation.
    pub fn set_immediate(&mut self, value: f64) {
        self.backend = None;
        self.value = value;
    }

    /// Animate from the current live value toward `target`.
    ///
    /// Replaces any in-flight animation; the replaced animation never
    /// reports `Settled`. A spring inherits the replaced spring's velocity
    /// so retargeting mid-flight stays continuous.
    pub fn animate_to(&mut self, target: f64, config: MotionConfig) {
        let velocity = match &self.backend {
            Some(Backend::Spring(sim)) => sim.velocity(),
            _ => 0.0,
        };
        self.backend = Some(match config {
            MotionConfig::Spring(params) => {
                Backend::Spring(SpringSim::new(params, self.value, velocity, target))
            }
            MotionConfig::Tween(params) => {
                Backend::Tween(TweenSim::new(params, self.value, target))
            }
        });
    }

    /// Stop mid-flight, freezing the value where it is.
    pub fn stop(&mut self) {
        self.backend = None;
    }

    /// Advance the in-flight animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> MotionStatus {
        let Some(backend) = &mut self.backend else {
            return MotionStatus::Idle;
        };
        let settled = match backend {
            Backend::Spring(sim) => {
                let settled = sim.advance(dt);
                self.value = sim.position();
                settled
            }
            Backend::Tween(sim) => {
                let settled = sim.advance(dt);
                self.value = sim.position();
                settled
            }
        };
        if settled {
            self.backend = None;
            MotionStatus::Settled
        } else {
            MotionStatus::Animating
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
