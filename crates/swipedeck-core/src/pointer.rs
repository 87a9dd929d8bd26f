#![forbid(unsafe_code)]

//! Canonical pointer-drag sample types.
//!
//! This module defines the normalized shape of pointer input the engine
//! consumes. A host adapter (touch, mouse, trackpad) is responsible for
//! producing [`PointerSample`]s; everything downstream — the drag
//! recognizer, the transition controller, the sheet controller — only ever
//! sees this type.
//!
//! # Design Notes
//!
//! - `movement` is the *cumulative* translation since pointer-down, not a
//!   per-frame delta. Recognizers derive their axis offset from it directly.
//! - `velocity` is instantaneous, in px/ms, signed per axis.
//! - `direction` is the sign of the most recent movement per axis
//!   (`-1`, `0`, or `1`).
//! - `origin_is_control` reports whether the pointer-down target was (or was
//!   contained by) an interactive control. The adapter resolves containment;
//!   the engine only latches the flag.

/// The axis a drag recognizer tracks. Perpendicular movement is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right. Used by the navigation swipe-back gesture.
    Horizontal,
    /// Up/down. Used by the sheet drag-to-close gesture.
    Vertical,
}

impl Axis {
    /// Select this axis' component from an `(x, y)` pair.
    #[inline]
    #[must_use]
    pub const fn pick(self, pair: (f32, f32)) -> f32 {
        match self {
            Self::Horizontal => pair.0,
            Self::Vertical => pair.1,
        }
    }

    /// Select this axis' component from a signed direction pair.
    #[inline]
    #[must_use]
    pub const fn pick_sign(self, pair: (i8, i8)) -> i8 {
        match self {
            Self::Horizontal => pair.0,
            Self::Vertical => pair.1,
        }
    }
}

/// One normalized pointer-drag sample.
///
/// Samples arrive in pointer-event order: zero or more with `down == true`,
/// then exactly one with `is_final_release == true` (which may carry the
/// last movement/velocity observed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Whether the pointer is currently down.
    pub down: bool,

    /// Cumulative translation since pointer-down, in px.
    pub movement: (f32, f32),

    /// Instantaneous velocity, in px/ms, signed per axis.
    pub velocity: (f32, f32),

    /// Sign of the most recent movement per axis.
    pub direction: (i8, i8),

    /// Whether this sample is the final release of the interaction.
    pub is_final_release: bool,

    /// Whether the pointer-down target was an interactive control.
    pub origin_is_control: bool,
}

impl PointerSample {
    /// A pointer-down (or in-progress move) sample with the given movement.
    #[must_use]
    pub const fn moving(movement: (f32, f32)) -> Self {
        Self {
            down: true,
            movement,
            velocity: (0.0, 0.0),
            direction: (0, 0),
            is_final_release: false,
            origin_is_control: false,
        }
    }

    /// A final-release sample with the given movement.
    #[must_use]
    pub const fn release(movement: (f32, f32)) -> Self {
        Self {
            down: false,
            movement,
            velocity: (0.0, 0.0),
            direction: (0, 0),
            is_final_release: true,
            origin_is_control: false,
        }
    }

    /// Set the instantaneous velocity (builder pattern).
    #[must_use]
    pub const fn with_velocity(mut self, velocity: (f32, f32)) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the movement direction signs (builder pattern).
    #[must_use]
    pub const fn with_direction(mut self, direction: (i8, i8)) -> Self {
        self.direction = direction;
        self
    }

    /// Mark the sample as originating on an interactive control.
    #[must_use]
    pub const fn from_control(mut self) -> Self {
        self.origin_is_control = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_pick_selects_component() {
        assert_eq!(Axis::Horizontal.pick((3.0, 7.0)), 3.0);
        assert_eq!(Axis::Vertical.pick((3.0, 7.0)), 7.0);
    }

    #[test]
    fn axis_pick_sign_selects_component() {
        assert_eq!(Axis::Horizontal.pick_sign((1, -1)), 1);
        assert_eq!(Axis::Vertical.pick_sign((1, -1)), -1);
    }

    #[test]
    fn moving_sample_defaults() {
        let s = PointerSample::moving((10.0, 0.0));
        assert!(s.down);
        assert!(!s.is_final_release);
        assert!(!s.origin_is_control);
        assert_eq!(s.movement, (10.0, 0.0));
    }

    #[test]
    fn release_sample_defaults() {
        let s = PointerSample::release((10.0, 0.0));
        assert!(!s.down);
        assert!(s.is_final_release);
    }

    #[test]
    fn builders_compose() {
        let s = PointerSample::moving((10.0, 2.0))
            .with_velocity((0.8, 0.0))
            .with_direction((1, 0))
            .from_control();
        assert_eq!(s.velocity, (0.8, 0.0));
        assert_eq!(s.direction, (1, 0));
        assert!(s.origin_is_control);
    }
}
