#![forbid(unsafe_code)]

//! Ready-to-use motion configurations.
//!
//! Named setups for the engine's stock animations. All values are plain
//! data; nothing here holds state.

use web_time::Duration;

use super::easing::ease_out_cubic;
use super::{MotionConfig, SpringParams, TweenParams};

/// Spring used to slide an entering page into place. Near-critically
/// damped so the page lands without visible bounce.
#[must_use]
pub fn push_spring() -> MotionConfig {
    MotionConfig::Spring(SpringParams::default().with_stiffness(210.0).with_damping(28.0))
}

/// Fixed-duration slide used to drive a programmatic pop off-screen.
#[must_use]
pub fn pop_exit() -> MotionConfig {
    MotionConfig::Tween(TweenParams::new(Duration::from_millis(280), ease_out_cubic))
}

/// Ease-back used when a swipe gesture is released below threshold.
#[must_use]
pub fn gesture_cancel() -> MotionConfig {
    MotionConfig::Tween(TweenParams::new(Duration::from_millis(220), ease_out_cubic))
}

/// Sheet presentation spring (0.0 → 1.0 presence).
#[must_use]
pub fn sheet_presentation() -> MotionConfig {
    MotionConfig::Spring(
        SpringParams {
            rest_threshold: 0.001,
            velocity_threshold: 0.01,
            ..SpringParams::default()
        }
        .with_stiffness(260.0)
        .with_damping(30.0),
    )
}

/// Sheet rebound after an uncommitted drag release.
#[must_use]
pub fn sheet_rebound() -> MotionConfig {
    MotionConfig::Tween(TweenParams::new(Duration::from_millis(240), ease_out_cubic))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
