#![forbid(unsafe_code)]

//! Drag recognition: transforms raw pointer samples into drag events.
//!
//! [`DragRecognizer`] is a stateful processor that converts a stream of
//! [`PointerSample`]s into a structured drag session along one axis,
//! emitting [`DragEvent`]s the navigation and sheet controllers consume.
//!
//! # State Machine
//!
//! A session is created on the first qualifying move (axis travel past a
//! minimal threshold), and destroyed on release or programmatic cancel.
//! At most one session exists at a time.
//!
//! - **Axis lock**: only the configured axis is tracked; perpendicular
//!   movement is ignored.
//! - **Clamp**: wrong-direction travel clamps to zero; forward travel is
//!   capped at a fraction of the usable viewport extent.
//! - **Origin exclusion**: if the first qualifying move originated on an
//!   interactive control, the session is flagged for its entire lifetime.
//!   A flagged session still consumes samples (so it is distinguishable
//!   from "no gesture at all") but never emits `Moved` and always releases
//!   as `Canceled` — zero visual or stack effect.
//! - **Tap passthrough**: a release never preceded by a qualifying move
//!   emits nothing, preserving ordinary click behavior underneath.
//!
//! # Commit rule
//!
//! At release: `commit = peak > distance_threshold OR (|velocity| >
//! velocity_threshold AND direction == forward AND peak >
//! min_velocity_travel)`. Shared by the navigation swipe-back and the
//! sheet drag-to-close, parameterized independently per use.
//!
//! # Invariants
//!
//! 1. The reported offset is always within `[0, max_travel_fraction × extent]`.
//! 2. `Started` is emitted exactly once per session.
//! 3. A flagged session never emits `Moved`.
//! 4. After `reset()` or `cancel()` the recognizer holds no session.
//!
//! # Failure Modes
//!
//! - After a mid-drag `cancel()` the pointer is typically still down;
//!   further samples of that physical drag are suppressed until the final
//!   release so a dismissed interaction cannot respawn a session.

use crate::pointer::{Axis, PointerSample};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for drag recognition and the commit rule.
#[derive(Debug, Clone, Copy)]
pub struct DragConfig {
    /// The tracked axis.
    pub axis: Axis,
    /// Minimum axis travel (px) before a session starts (default: 4.0).
    pub start_threshold: f32,
    /// Peak travel (px) past which a release commits (default: 120.0).
    pub distance_threshold: f32,
    /// Release speed (px/ms) past which a forward release commits
    /// (default: 0.5).
    pub velocity_threshold: f32,
    /// Minimum peak travel (px) for the velocity rule to apply
    /// (default: 0.0).
    pub min_velocity_travel: f32,
    /// Travel cap as a fraction of the viewport extent (default: 0.9).
    pub max_travel_fraction: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            start_threshold: 4.0,
            distance_threshold: 120.0,
            velocity_threshold: 0.5,
            min_velocity_travel: 0.0,
            max_travel_fraction: 0.9,
        }
    }
}

impl DragConfig {
    /// Config for the vertical sheet drag-to-close gesture.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            ..Self::default()
        }
    }

    /// Set the tracked axis (builder pattern).
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the commit thresholds (builder pattern).
    #[must_use]
    pub fn with_thresholds(mut self, distance: f32, velocity: f32) -> Self {
        self.distance_threshold = distance;
        self.velocity_threshold = velocity;
        self
    }

    /// Set the peak-travel floor for the velocity rule (builder pattern).
    #[must_use]
    pub fn with_min_velocity_travel(mut self, floor: f32) -> Self {
        self.min_velocity_travel = floor;
        self
    }

    /// The shared commit decision for a released session.
    #[must_use]
    pub fn should_commit(&self, peak: f32, velocity: f32, direction: i8) -> bool {
        if peak > self.distance_threshold {
            return true;
        }
        direction > 0
            && peak > self.min_velocity_travel
            && velocity.abs() > self.velocity_threshold
    }
}

// ---------------------------------------------------------------------------
// Events & session
// ---------------------------------------------------------------------------

/// Outcome of a released drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseVerdict {
    /// Proceed: apply the associated mutation (pop, dismiss).
    Commit,
    /// Rebound: ease back to the resting state.
    Cancel,
}

/// Semantic drag events produced by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// A session started. Flagged sessions must produce no effect.
    Started {
        /// Whether the first qualifying move originated on a control.
        origin_is_control: bool,
    },
    /// The session's clamped axis offset changed.
    Moved {
        /// Clamped offset in px.
        offset: f32,
    },
    /// The session was released with a commit decision.
    Released {
        /// The commit decision.
        verdict: ReleaseVerdict,
    },
    /// The session ended with no effect (flagged origin, or external cancel).
    Canceled,
}

/// Live state of one drag session.
#[derive(Debug, Clone, Copy)]
struct Session {
    origin_is_control: bool,
    offset: f32,
    peak: f32,
    last_velocity: f32,
    last_direction: i8,
}

// ---------------------------------------------------------------------------
// DragRecognizer
// ---------------------------------------------------------------------------

/// Stateful axis-locked drag recognizer.
///
/// Feed every pointer sample to [`process`](DragRecognizer::process) along
/// with the current viewport extent for the tracked axis.
#[derive(Debug)]
pub struct DragRecognizer {
    config: DragConfig,
    session: Option<Session>,
    /// Set by a mid-drag cancel; ignore samples until the final release.
    suppressed: bool,
}

impl DragRecognizer {
    /// Create a recognizer with the given configuration.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
            suppressed: false,
        }
    }

    /// Whether a session is currently active.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the active session is flagged as control-originated.
    #[inline]
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.session.is_some_and(|s| s.origin_is_control)
    }

    /// The active session's clamped offset, or 0.0.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.session.map_or(0.0, |s| s.offset)
    }

    /// The active session's peak travel, or 0.0.
    #[inline]
    #[must_use]
    pub fn peak(&self) -> f32 {
        self.session.map_or(0.0, |s| s.peak)
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Process one pointer sample. `extent` is the usable viewport
    /// dimension along the tracked axis, in px.
    pub fn process(&mut self, sample: &PointerSample, extent: f32) -> Option<DragEvent> {
        if sample.is_final_release || !sample.down {
            return self.on_release(sample);
        }
        if self.suppressed {
            return None;
        }

        let travel = self.config.axis.pick(sample.movement);
        let clamped = self.clamp(travel, extent);

        match &mut self.session {
            None => {
                if travel.abs() <= self.config.start_threshold {
                    return None;
                }
                // First qualifying move: latch the origin flag for the
                // session's entire lifetime.
                self.session = Some(Session {
                    origin_is_control: sample.origin_is_control,
                    offset: clamped,
                    peak: clamped,
                    last_velocity: self.config.axis.pick(sample.velocity),
                    last_direction: self.config.axis.pick_sign(sample.direction),
                });
                Some(DragEvent::Started {
                    origin_is_control: sample.origin_is_control,
                })
            }
            Some(session) => {
                session.offset = clamped;
                session.peak = session.peak.max(clamped);
                session.last_velocity = self.config.axis.pick(sample.velocity);
                session.last_direction = self.config.axis.pick_sign(sample.direction);
                if session.origin_is_control {
                    return None;
                }
                Some(DragEvent::Moved { offset: clamped })
            }
        }
    }

    /// Cancel the active session programmatically. Samples of the same
    /// physical drag are suppressed until the final release.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            self.suppressed = true;
        }
    }

    /// Reset all state to idle.
    pub fn reset(&mut self) {
        self.session = None;
        self.suppressed = false;
    }

    fn clamp(&self, travel: f32, extent: f32) -> f32 {
        let cap = (self.config.max_travel_fraction * extent).max(0.0);
        travel.clamp(0.0, cap)
    }

    fn on_release(&mut self, sample: &PointerSample) -> Option<DragEvent> {
        self.suppressed = false;
        let session = self.session.take()?;

        if session.origin_is_control {
            return Some(DragEvent::Canceled);
        }

        // Prefer the release sample's velocity/direction when present.
        let velocity = match self.config.axis.pick(sample.velocity) {
            v if v != 0.0 => v,
            _ => session.last_velocity,
        };
        let direction = match self.config.axis.pick_sign(sample.direction) {
            0 => session.last_direction,
            d => d,
        };

        let verdict = if self.config.should_commit(session.peak, velocity, direction) {
            ReleaseVerdict::Commit
        } else {
            ReleaseVerdict::Cancel
        };
        Some(DragEvent::Released { verdict })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
