#![forbid(unsafe_code)]

//! Fixed-duration easing backend for [`Motion`](super::Motion).
//!
//! Unlike the spring, a tween starts from an *arbitrary live value* — the
//! exact offset a finger left behind — and finishes in bounded wall-clock
//! time regardless of that start offset. This is what the sheet rebound and
//! the gesture-cancel ease-back need: a spring launched from a large offset
//! settles at spring pace, a tween always lands within its duration.
//!
//! # Invariants
//!
//! 1. With a monotone easing, position moves monotonically from start to
//!    target.
//! 2. Position is exactly the target once `elapsed >= duration`.
//! 3. A zero duration is clamped to 1ns and completes on the first tick.

use web_time::Duration;

use super::easing::EasingFn;

/// Tween configuration: duration plus easing.
#[derive(Debug, Clone, Copy)]
pub struct TweenParams {
    /// Total wall-clock duration.
    pub duration: Duration,
    /// The easing curve applied to normalized time.
    pub easing: EasingFn,
}

impl TweenParams {
    /// Create tween parameters. A zero duration is clamped to 1ns.
    #[must_use]
    pub fn new(duration: Duration, easing: EasingFn) -> Self {
        Self {
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing,
        }
    }
}

/// A live tween from a captured start value toward a target.
#[derive(Debug, Clone)]
pub struct TweenSim {
    params: TweenParams,
    start: f64,
    target: f64,
    elapsed: Duration,
    settled: bool,
}

impl TweenSim {
    /// Start a tween at `start` heading toward `target`.
    #[must_use]
    pub fn new(params: TweenParams, start: f64, target: f64) -> Self {
        Self {
            params,
            start,
            target,
            elapsed: Duration::ZERO,
            settled: false,
        }
    }

    /// Current position (px).
    #[must_use]
    pub fn position(&self) -> f64 {
        if self.settled {
            return self.target;
        }
        let t = (self.elapsed.as_secs_f64() / self.params.duration.as_secs_f64()).min(1.0);
        let eased = f64::from((self.params.easing)(t as f32));
        self.start + (self.target - self.start) * eased
    }

    /// The target position (px).
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the tween has reached its target.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance by `dt`. Returns `true` on the tick that completes the tween.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.settled {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.params.duration {
            self.settled = true;
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
