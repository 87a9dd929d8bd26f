#![forbid(unsafe_code)]

//! Drag-to-close controller for sheet-style modals.
//!
//! [`SheetController`] is independent of the navigation stack. It governs
//! two scalars — a presentation presence (0..1) and a vertical drag offset
//! (px, bound at 0) — under an explicit phase machine:
//!
//! ```text
//! Closed → Opening → Open → Closing → Closed
//! ```
//!
//! The phase machine is authoritative. Whether the sheet "is visible" is
//! never inferred by comparing live animated values against thresholds;
//! only the named transitions (`open`, `close`, settle-on-tick) change
//! phase.
//!
//! # Dismissal
//!
//! Crossing the dismiss threshold *mid-drag* (distance, or the
//! velocity+direction rule past a lower travel floor) immediately cancels
//! the drag recognizer and defers the dismissal to the next tick — never
//! synchronously, so the recognizer's own bookkeeping is not re-entered.
//! A release below threshold runs a tween **rebound** from the exact live
//! offset back to 0 in bounded time.
//!
//! # Interaction disabling
//!
//! Once the drag offset exceeds a small threshold, descendant interactive
//! elements are reported disabled until the session fully resolves (the
//! rebound settles, or the sheet closes).
//!
//! # Invariants
//!
//! 1. The drag offset is never negative.
//! 2. `DismissRequested` is emitted at most once per open cycle, and only
//!    from `tick`.
//! 3. `reset()` restores a fully fresh controller, including a new drag
//!    recognizer binding (observable via `binding_generation`).
//!
//! # Failure Modes
//!
//! - Input arriving in any phase but `Open` is ignored; the recognizer is
//!   reset when the sheet finishes closing, so a drag spanning the close
//!   cannot leak session state into the next open cycle.

use swipedeck_core::gesture::{DragConfig, DragEvent, DragRecognizer, ReleaseVerdict};
use swipedeck_core::motion::easing::ease_out_cubic;
use swipedeck_core::motion::{Motion, MotionConfig, MotionStatus, SpringParams, TweenParams};
use swipedeck_core::pointer::PointerSample;
use swipedeck_core::viewport::Viewport;
use tracing::debug;
use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for the sheet controller.
#[derive(Debug, Clone, Copy)]
pub struct SheetConfig {
    /// Drag recognition and dismiss thresholds (vertical).
    pub drag: DragConfig,
    /// Offset past which descendant interaction is suppressed
    /// (default: 8 px).
    pub disable_threshold: f32,
    /// Rebound tween back to rest (default: 240 ms, ease-out-cubic).
    pub rebound: TweenParams,
    /// Presentation spring for open/close presence.
    pub presentation: SpringParams,
    /// Ignore all input unless the viewport is compact (default: true).
    pub mobile_only: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            drag: DragConfig::vertical().with_min_velocity_travel(32.0),
            disable_threshold: 8.0,
            rebound: TweenParams::new(Duration::from_millis(240), ease_out_cubic),
            presentation: SpringParams {
                rest_threshold: 0.001,
                velocity_threshold: 0.01,
                ..SpringParams::default()
            }
            .with_stiffness(260.0)
            .with_damping(30.0),
            mobile_only: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase machine & events
// ---------------------------------------------------------------------------

/// Sheet presentation phase. Changed only by named transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPhase {
    /// Not presented.
    Closed,
    /// Presenting (presence animating toward 1).
    Opening,
    /// Fully presented and interactive.
    Open,
    /// Dismissing (presence animating toward 0).
    Closing,
}

/// Notifications produced by [`SheetController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    /// The open animation settled; phase is now `Open`.
    Opened,
    /// The close animation settled; phase is now `Closed`.
    Closed,
    /// A drag crossed the dismiss threshold on the previous input; the
    /// close has begun.
    DismissRequested,
}

// ---------------------------------------------------------------------------
// SheetController
// ---------------------------------------------------------------------------

/// Governs one modal sheet's presence, drag offset, and dismissal.
pub struct SheetController {
    viewport: Viewport,
    config: SheetConfig,
    phase: SheetPhase,
    /// Presentation presence, 0.0 (gone) to 1.0 (fully presented).
    presence: Motion,
    /// Vertical drag offset in px, ≥ 0.
    offset: Motion,
    recognizer: DragRecognizer,
    dragging: bool,
    controls_disabled: bool,
    pending_dismiss: bool,
    binding_generation: u64,
    last_tick: Option<Instant>,
}

impl SheetController {
    /// Create a closed sheet.
    #[must_use]
    pub fn new(viewport: Viewport, config: SheetConfig) -> Self {
        Self {
            viewport,
            config,
            phase: SheetPhase::Closed,
            presence: Motion::new(),
            offset: Motion::new(),
            recognizer: DragRecognizer::new(config.drag),
            dragging: false,
            controls_disabled: false,
            pending_dismiss: false,
            binding_generation: 0,
            last_tick: None,
        }
    }

    // --- Accessors ---

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Presentation presence in `[0, 1]`.
    #[must_use]
    pub fn presence(&self) -> f64 {
        self.presence.value()
    }

    /// The live drag offset in px.
    #[must_use]
    pub fn drag_offset(&self) -> f64 {
        self.offset.value()
    }

    /// Whether a drag session is live.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether descendant interaction is currently suppressed.
    #[inline]
    #[must_use]
    pub fn interaction_disabled(&self) -> bool {
        self.controls_disabled
    }

    /// Increments every time the gesture binding is re-created.
    #[inline]
    #[must_use]
    pub fn binding_generation(&self) -> u64 {
        self.binding_generation
    }

    /// Update viewport metrics (host resize).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // --- Named phase transitions ---

    /// Begin presenting. No-op unless `Closed` or `Closing`.
    pub fn open(&mut self, _now: Instant) {
        match self.phase {
            SheetPhase::Closed | SheetPhase::Closing => {
                self.phase = SheetPhase::Opening;
                self.presence
                    .animate_to(1.0, MotionConfig::Spring(self.config.presentation));
                debug!("sheet opening");
            }
            SheetPhase::Opening | SheetPhase::Open => {}
        }
    }

    /// Begin dismissing. No-op unless `Opening` or `Open`.
    pub fn close(&mut self, _now: Instant) {
        match self.phase {
            SheetPhase::Opening | SheetPhase::Open => {
                self.phase = SheetPhase::Closing;
                self.presence
                    .animate_to(0.0, MotionConfig::Spring(self.config.presentation));
                debug!("sheet closing");
            }
            SheetPhase::Closed | SheetPhase::Closing => {}
        }
    }

    // --- Gesture input ---

    /// Feed one pointer sample. Ignored when the mobile gate is off or the
    /// sheet is not fully open.
    pub fn on_pointer(&mut self, sample: &PointerSample, _now: Instant) {
        if self.config.mobile_only && !self.viewport.is_compact() {
            return;
        }
        if self.phase != SheetPhase::Open || self.pending_dismiss {
            return;
        }

        let extent = self.viewport.extent(self.config.drag.axis);
        let Some(event) = self.recognizer.process(sample, extent) else {
            return;
        };
        match event {
            DragEvent::Started { origin_is_control } => {
                if !origin_is_control {
                    self.dragging = true;
                }
            }
            DragEvent::Moved { offset } => {
                self.offset.set_immediate(f64::from(offset));
                if offset > self.config.disable_threshold {
                    self.controls_disabled = true;
                }
                // Mid-drag threshold crossing: cancel the recognizer now,
                // deliver the dismissal on the next tick.
                let velocity = self.config.drag.axis.pick(sample.velocity);
                let direction = self.config.drag.axis.pick_sign(sample.direction);
                if self
                    .config
                    .drag
                    .should_commit(self.recognizer.peak(), velocity, direction)
                {
                    self.recognizer.cancel();
                    self.dragging = false;
                    self.pending_dismiss = true;
                    debug!("sheet dismiss threshold crossed mid-drag");
                }
            }
            DragEvent::Released { verdict } => {
                self.dragging = false;
                match verdict {
                    ReleaseVerdict::Commit => {
                        self.pending_dismiss = true;
                        debug!("sheet dismiss committed at release");
                    }
                    ReleaseVerdict::Cancel => {
                        self.offset
                            .animate_to(0.0, MotionConfig::Tween(self.config.rebound));
                        debug!("sheet rebounding");
                    }
                }
            }
            DragEvent::Canceled => {
                // Flagged session released: offset never moved.
                self.dragging = false;
            }
        }
    }

    // --- Frame driving ---

    /// Advance animations; returns at most one notification per tick.
    pub fn tick(&mut self, now: Instant) -> Option<SheetEvent> {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        // Deferred dismissal from the previous input.
        if self.pending_dismiss {
            self.pending_dismiss = false;
            self.phase = SheetPhase::Closing;
            self.presence
                .animate_to(0.0, MotionConfig::Spring(self.config.presentation));
            return Some(SheetEvent::DismissRequested);
        }

        if self.presence.tick(dt) == MotionStatus::Settled {
            match self.phase {
                SheetPhase::Opening => {
                    self.phase = SheetPhase::Open;
                    return Some(SheetEvent::Opened);
                }
                SheetPhase::Closing => {
                    self.phase = SheetPhase::Closed;
                    self.offset.set_immediate(0.0);
                    self.controls_disabled = false;
                    self.recognizer.reset();
                    return Some(SheetEvent::Closed);
                }
                SheetPhase::Closed | SheetPhase::Open => {}
            }
        }

        if self.offset.tick(dt) == MotionStatus::Settled {
            // Rebound finished: the session is fully resolved.
            self.controls_disabled = false;
        }
        None
    }

    // --- Reset ---

    /// Restore a fully fresh controller for the next open cycle: clears
    /// offset, dragging, disabled and pending-dismiss flags, and re-creates
    /// the gesture binding so no recognizer state leaks across cycles.
    pub fn reset(&mut self) {
        self.phase = SheetPhase::Closed;
        self.presence.set_immediate(0.0);
        self.offset.set_immediate(0.0);
        self.dragging = false;
        self.controls_disabled = false;
        self.pending_dismiss = false;
        self.recognizer = DragRecognizer::new(self.config.drag);
        self.binding_generation += 1;
        self.last_tick = None;
        debug!(generation = self.binding_generation, "sheet reset");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
