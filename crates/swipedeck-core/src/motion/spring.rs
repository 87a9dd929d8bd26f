#![forbid(unsafe_code)]

//! Damped harmonic oscillator backend for [`Motion`](super::Motion).
//!
//! Drives the push/pop commit motion. Based on the classical damped spring
//! equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength. Higher = faster response.
//! - **damping** (c): velocity drag. `c ≈ 2√k` is critical damping; below it
//!   the spring overshoots, above it converges slowly without overshoot.
//! - **rest thresholds**: position delta and velocity magnitude (px, px/s)
//!   below which the spring is considered settled.
//!
//! # Integration
//!
//! Semi-implicit Euler. Large `dt` values are subdivided into steps of at
//! most 4 ms so high stiffness stays numerically stable.
//!
//! # Invariants
//!
//! 1. A settled simulation never moves again; retargeting requires a new
//!    [`SpringSim`].
//! 2. On settle, position snaps exactly to the target and velocity to 0.
//! 3. Stiffness is clamped to a positive minimum at construction.
//!
//! # Failure Modes
//!
//! - Zero damping oscillates forever; the safety timer above this layer is
//!   the recovery path, not the simulation.

use web_time::Duration;

/// Maximum dt per integration step (4ms). Larger deltas are subdivided.
const MAX_STEP_SECS: f64 = 0.004;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Spring configuration in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
    /// Position delta (px) below which the spring may settle.
    pub rest_threshold: f64,
    /// Velocity magnitude (px/s) below which the spring may settle.
    pub velocity_threshold: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: 0.1,
            velocity_threshold: 1.0,
        }
    }
}

impl SpringParams {
    /// Set stiffness (builder pattern). Clamped to a positive minimum.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// The critical damping coefficient for the current stiffness.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }
}

/// A live spring integration from a captured start state toward a target.
#[derive(Debug, Clone)]
pub struct SpringSim {
    params: SpringParams,
    position: f64,
    velocity: f64,
    target: f64,
    settled: bool,
}

impl SpringSim {
    /// Start a simulation at `position` (with the given initial velocity)
    /// heading toward `target`.
    #[must_use]
    pub fn new(params: SpringParams, position: f64, velocity: f64, target: f64) -> Self {
        let params = SpringParams {
            stiffness: params.stiffness.max(MIN_STIFFNESS),
            damping: params.damping.max(0.0),
            ..params
        };
        Self {
            params,
            position,
            velocity,
            target,
            settled: false,
        }
    }

    /// Current position (px).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity (px/s).
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The target position (px).
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the simulation has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// One integration step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let spring_force = -self.params.stiffness * displacement;
        let damping_force = -self.params.damping * self.velocity;
        let acceleration = spring_force + damping_force;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability. Returns `true` on the
    /// tick that settles the spring.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.settled {
            return false;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return false;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.params.rest_threshold
            && self.velocity.abs() < self.params.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.settled = true;
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
