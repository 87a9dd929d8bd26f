#![forbid(unsafe_code)]

//! Easing functions for duration-based motion.
//!
//! All functions map a normalized time `t` in [0.0, 1.0] to a normalized
//! progress in [0.0, 1.0], are monotone non-decreasing on that interval,
//! and satisfy `f(0) == 0` and `f(1) == 1`. Inputs outside the interval
//! are clamped by the caller ([`super::tween::TweenSim`] does this).

/// An easing function: normalized time → normalized progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-in: slow start.
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Quadratic ease-out: slow finish.
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

/// Cubic ease-out: pronounced deceleration. The rebound easing.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFn; 5] = [linear, ease_in, ease_out, ease_in_out, ease_out_cubic];

    #[test]
    fn endpoints_are_exact() {
        for f in ALL {
            assert_eq!(f(0.0), 0.0);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn monotone_on_unit_interval() {
        for f in ALL {
            let mut prev = 0.0f32;
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let v = f(t);
                assert!(v >= prev - 1e-4, "easing not monotone at t={t}");
                prev = v;
            }
        }
    }

    #[test]
    fn ease_out_cubic_front_loads_progress() {
        // Half the time should yield well over half the progress.
        assert!(ease_out_cubic(0.5) > 0.8);
    }
}
