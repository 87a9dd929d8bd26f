#![forbid(unsafe_code)]

//! The transition controller: animated push/pop over the navigation stack.
//!
//! [`TransitionController`] coordinates three independent signal sources —
//! spring settle, fixed-duration completion, and gesture release — around a
//! single [`NavigationStack`] mutation per transition, and guarantees the
//! UI can never remain stuck mid-transition.
//!
//! # State Machine
//!
//! A controller-level mode (`Idle | Push | Pop`, derived from the presence
//! and kind of the [`TransitionRecord`]) gates mutual exclusion: no second
//! transition may start while one is in flight. The foreground layer moves
//! through `Entering` (push), `Exiting` (programmatic pop or committed
//! gesture), `GestureDragging` → `GestureCanceling | Exiting` (interactive
//! pop), and `Destroyed` (inside finalization).
//!
//! # Finalizer
//!
//! All completion paths converge on one idempotent finalizer, guarded by a
//! one-shot flag: it stops the motion, applies exactly one stack mutation
//! according to the recorded intent (a cancelled gesture applies none),
//! resets the motion value to 0, clears the record and drag session, and
//! releases the mode gate. Completion signals are inherently racy — a
//! spring settle, a duration timer, and a gesture release can all fire for
//! the same logical transition — so every call after the first is a no-op.
//!
//! # Safety timer
//!
//! Each transition arms a deadline; `tick` treats an expired deadline as a
//! missing completion signal and force-runs the same finalizer. During a
//! live drag the deadline is refreshed on every pointer move, so a held
//! finger never trips it but a dead input stream still recovers.
//!
//! # Failure Modes
//!
//! - Pointer samples arriving while a non-interactive transition is in
//!   flight are swallowed until the next release, so a finger resting on
//!   the screen cannot spawn a surprise gesture when the transition ends.
//! - Invalid requests (pop at root, start while in flight) degrade to
//!   typed rejections or silent no-ops; nothing panics in steady state.

use swipedeck_core::gesture::{DragConfig, DragEvent, DragRecognizer, ReleaseVerdict};
use swipedeck_core::motion::easing::ease_out_cubic;
use swipedeck_core::motion::{Motion, MotionConfig, MotionStatus, SpringParams, TweenParams};
use swipedeck_core::pointer::PointerSample;
use swipedeck_core::viewport::Viewport;
use thiserror::Error;
use tracing::{debug, warn};
use web_time::{Duration, Instant};

use crate::bus::{EventBus, NavEvent};
use crate::stack::{NavigationStack, PageEntry, PageId, ViewSpec};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for the transition controller.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    /// Deadline after which a transition with no completion signal is
    /// force-finalized (default: 800 ms).
    pub safety_timeout: Duration,
    /// Spring used for the push enter motion.
    pub push_spring: SpringParams,
    /// Duration of a programmatic pop's exit slide (default: 280 ms).
    pub pop_duration: Duration,
    /// Duration of the gesture-cancel ease-back (default: 220 ms).
    pub cancel_duration: Duration,
    /// Drag recognition and commit thresholds (horizontal).
    pub drag: DragConfig,
    /// Background parallax: max shift as a fraction of the viewport width
    /// (default: 0.3).
    pub max_shift_fraction: f32,
    /// Background opacity floor while fully covered (default: 0.6).
    pub dim_floor: f32,
    /// Window during which repeated back activations are ignored
    /// (default: 200 ms).
    pub back_debounce: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            safety_timeout: Duration::from_millis(800),
            push_spring: SpringParams::default()
                .with_stiffness(210.0)
                .with_damping(28.0),
            pop_duration: Duration::from_millis(280),
            cancel_duration: Duration::from_millis(220),
            drag: DragConfig::default(),
            max_shift_fraction: 0.3,
            dim_floor: 0.6,
            back_debounce: Duration::from_millis(200),
        }
    }
}

impl TransitionConfig {
    fn push_motion(&self) -> MotionConfig {
        MotionConfig::Spring(self.push_spring)
    }

    fn exit_motion(&self) -> MotionConfig {
        MotionConfig::Tween(TweenParams::new(self.pop_duration, ease_out_cubic))
    }

    fn cancel_motion(&self) -> MotionConfig {
        MotionConfig::Tween(TweenParams::new(self.cancel_duration, ease_out_cubic))
    }
}

// ---------------------------------------------------------------------------
// States, record, rejection
// ---------------------------------------------------------------------------

/// Which animated operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    /// No transition in flight.
    Idle,
    /// A page is entering.
    Push,
    /// The top page is leaving.
    Pop,
}

/// Lifecycle of the foreground layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Sliding in (push).
    Entering,
    /// At rest; no transition in flight.
    Active,
    /// Tracking a live swipe-back.
    GestureDragging,
    /// Easing back after an uncommitted release.
    GestureCanceling,
    /// Sliding out (programmatic pop or committed gesture).
    Exiting,
    /// Being torn down inside finalization.
    Destroyed,
}

/// Bookkeeping for one in-flight transition.
#[derive(Debug, Clone)]
pub struct TransitionRecord {
    mode: TransitionMode,
    foreground: PageEntry,
    background: Option<PageEntry>,
    leaving_id: Option<PageId>,
    layer: LayerState,
    commit: bool,
    finalized: bool,
    deadline: Instant,
}

impl TransitionRecord {
    /// The entering page (push) or the leaving page (pop).
    #[must_use]
    pub fn foreground(&self) -> &PageEntry {
        &self.foreground
    }

    /// The page being covered (push) or revealed (pop).
    #[must_use]
    pub fn background(&self) -> Option<&PageEntry> {
        self.background.as_ref()
    }

    /// The id that will leave the stack if the transition commits.
    #[must_use]
    pub fn leaving_id(&self) -> Option<PageId> {
        self.leaving_id
    }

    /// Current foreground layer state.
    #[must_use]
    pub fn layer(&self) -> LayerState {
        self.layer
    }
}

/// Why an animated operation was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionRejected {
    /// A transition is already in flight.
    #[error("a transition is already in flight")]
    InFlight,
    /// The stack has no entry to go back to.
    #[error("the navigation stack is at its root")]
    AtRoot,
}

/// Pure function of transition progress applied to the background layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropStyle {
    /// Horizontal parallax shift in px (≤ 0).
    pub shift: f32,
    /// Opacity in `[dim_floor, 1.0]`.
    pub opacity: f32,
}

// ---------------------------------------------------------------------------
// TransitionController
// ---------------------------------------------------------------------------

/// Orchestrates animated push/pop and interactive swipe-back.
///
/// Feed pointer samples to [`on_pointer`](Self::on_pointer) and drive the
/// controller with [`tick`](Self::tick) once per frame. All time is
/// caller-supplied for determinism.
pub struct TransitionController {
    stack: NavigationStack,
    viewport: Viewport,
    config: TransitionConfig,
    motion: Motion,
    recognizer: DragRecognizer,
    record: Option<TransitionRecord>,
    events: EventBus<NavEvent>,
    last_back: Option<Instant>,
    last_tick: Option<Instant>,
    pointer_blocked: bool,
}

impl TransitionController {
    /// Create a controller over a fresh stack rooted at `root`.
    #[must_use]
    pub fn new(root: ViewSpec, viewport: Viewport, config: TransitionConfig) -> Self {
        Self {
            stack: NavigationStack::new(root),
            viewport,
            config,
            motion: Motion::new(),
            recognizer: DragRecognizer::new(config.drag),
            record: None,
            events: EventBus::new(),
            last_back: None,
            last_tick: None,
            pointer_blocked: false,
        }
    }

    /// Share an externally owned event bus (builder pattern).
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus<NavEvent>) -> Self {
        self.events = events;
        self
    }

    // --- Accessors ---

    /// The navigation stack (read-only; mutate through controller ops).
    #[must_use]
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// The bus on which commits are published.
    #[must_use]
    pub fn events(&self) -> &EventBus<NavEvent> {
        &self.events
    }

    /// Current mode; `Idle` when nothing is in flight.
    #[must_use]
    pub fn mode(&self) -> TransitionMode {
        self.record.as_ref().map_or(TransitionMode::Idle, |r| r.mode)
    }

    /// Whether no transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.record.is_none()
    }

    /// Foreground layer state; `Active` when idle.
    #[must_use]
    pub fn layer_state(&self) -> LayerState {
        self.record.as_ref().map_or(LayerState::Active, |r| r.layer)
    }

    /// The in-flight transition's bookkeeping, if any.
    #[must_use]
    pub fn record(&self) -> Option<&TransitionRecord> {
        self.record.as_ref()
    }

    /// The foreground layer's live offset in px.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.motion.value()
    }

    /// Transition progress in `[0, 1]`: 0 with the foreground covering the
    /// viewport origin, 1 fully off-screen.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let extent = f64::from(self.viewport.extent(self.config.drag.axis));
        if extent <= 0.0 {
            return 0.0;
        }
        (self.motion.value() / extent).clamp(0.0, 1.0) as f32
    }

    /// The background layer's parallax shift and dim, derived purely from
    /// progress. Meaningful only while a transition is in flight.
    #[must_use]
    pub fn backdrop(&self) -> BackdropStyle {
        let p = self.progress();
        let extent = self.viewport.extent(self.config.drag.axis);
        BackdropStyle {
            shift: -self.config.max_shift_fraction * extent * (1.0 - p),
            opacity: self.config.dim_floor + (1.0 - self.config.dim_floor) * p,
        }
    }

    /// Update viewport metrics (host resize).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // --- Immediate (non-animated) operations ---

    /// Push without animation. No-op while a transition is in flight.
    pub fn push(&mut self, view: ViewSpec) -> Option<PageId> {
        if !self.is_idle() {
            debug!("push ignored: transition in flight");
            return None;
        }
        let id = self.stack.push(view);
        self.events.emit(&NavEvent::DidPush(id));
        Some(id)
    }

    /// Pop without animation. No-op at root or while in flight.
    pub fn pop(&mut self) -> Option<PageEntry> {
        if !self.is_idle() {
            debug!("pop ignored: transition in flight");
            return None;
        }
        let popped = self.stack.pop()?;
        self.events.emit(&NavEvent::DidPop(popped.id));
        Some(popped)
    }

    /// Replace the top entry. No-op while in flight.
    pub fn replace(&mut self, view: ViewSpec) -> Option<PageId> {
        if !self.is_idle() {
            debug!("replace ignored: transition in flight");
            return None;
        }
        let id = self.stack.replace(view);
        self.events.emit(&NavEvent::DidReplace(id));
        Some(id)
    }

    /// Truncate to the root entry. No-op while in flight.
    pub fn pop_to_root(&mut self) {
        if !self.is_idle() {
            debug!("pop_to_root ignored: transition in flight");
            return;
        }
        if self.stack.can_go_back() {
            self.stack.pop_to_root();
            self.events.emit(&NavEvent::DidPopToRoot);
        }
    }

    /// Whether a pop (animated or not) would change the stack.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack.can_go_back()
    }

    // --- Animated operations ---

    /// Start an animated push. Rejected while a transition is in flight.
    pub fn push_animated(
        &mut self,
        view: ViewSpec,
        now: Instant,
    ) -> Result<PageId, TransitionRejected> {
        if !self.is_idle() {
            debug!("push_animated rejected: transition in flight");
            return Err(TransitionRejected::InFlight);
        }
        let foreground = self.stack.mint(view);
        let id = foreground.id;
        let background = Some(self.stack.top().clone());
        self.record = Some(TransitionRecord {
            mode: TransitionMode::Push,
            foreground,
            background,
            leaving_id: None,
            layer: LayerState::Entering,
            commit: true,
            finalized: false,
            deadline: now + self.config.safety_timeout,
        });

        let extent = f64::from(self.viewport.extent(self.config.drag.axis));
        self.motion.set_immediate(extent);
        self.motion.animate_to(0.0, self.config.push_motion());
        debug!(id = id.raw(), "push transition started");
        Ok(id)
    }

    /// Start an animated pop. Rejected at root or while in flight.
    pub fn pop_animated(&mut self, now: Instant) -> Result<(), TransitionRejected> {
        if !self.is_idle() {
            debug!("pop_animated rejected: transition in flight");
            return Err(TransitionRejected::InFlight);
        }
        if !self.stack.can_go_back() {
            debug!("pop_animated rejected: at root");
            return Err(TransitionRejected::AtRoot);
        }
        let foreground = self.stack.top().clone();
        let background = self.stack.previous().cloned();
        self.record = Some(TransitionRecord {
            mode: TransitionMode::Pop,
            leaving_id: Some(foreground.id),
            foreground,
            background,
            layer: LayerState::Exiting,
            commit: true,
            finalized: false,
            deadline: now + self.config.safety_timeout,
        });

        let extent = f64::from(self.viewport.extent(self.config.drag.axis));
        self.motion.set_immediate(0.0);
        self.motion.animate_to(extent, self.config.exit_motion());
        debug!("pop transition started");
        Ok(())
    }

    /// Back affordance: prefers the animated pop and debounces rapid
    /// repeated activation. Returns whether a pop was started.
    pub fn back_requested(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_back
            && now.duration_since(last) < self.config.back_debounce
        {
            debug!("back request debounced");
            return false;
        }
        self.last_back = Some(now);
        self.pop_animated(now).is_ok()
    }

    // --- Gesture input ---

    /// Feed one pointer sample.
    pub fn on_pointer(&mut self, sample: &PointerSample, now: Instant) {
        if self.pointer_blocked {
            if sample.is_final_release {
                self.pointer_blocked = false;
            }
            return;
        }
        // While a non-interactive transition runs, swallow the rest of the
        // current interaction rather than building a session against it.
        if self
            .record
            .as_ref()
            .is_some_and(|r| r.layer != LayerState::GestureDragging)
        {
            if sample.down && !sample.is_final_release {
                self.pointer_blocked = true;
            }
            return;
        }

        let extent = self.viewport.extent(self.config.drag.axis);
        let Some(event) = self.recognizer.process(sample, extent) else {
            return;
        };
        match event {
            DragEvent::Started { origin_is_control } => {
                if origin_is_control {
                    // Flagged sessions keep consuming samples but must have
                    // zero visual or stack effect.
                    debug!("swipe-back origin is a control; session inert");
                    return;
                }
                if !self.stack.can_go_back() {
                    self.recognizer.cancel();
                    return;
                }
                let foreground = self.stack.top().clone();
                let background = self.stack.previous().cloned();
                self.record = Some(TransitionRecord {
                    mode: TransitionMode::Pop,
                    leaving_id: Some(foreground.id),
                    foreground,
                    background,
                    layer: LayerState::GestureDragging,
                    commit: false,
                    finalized: false,
                    deadline: now + self.config.safety_timeout,
                });
                self.motion.set_immediate(0.0);
                debug!("interactive pop started");
            }
            DragEvent::Moved { offset } => {
                if let Some(record) = &mut self.record
                    && record.layer == LayerState::GestureDragging
                {
                    self.motion.set_immediate(f64::from(offset));
                    record.deadline = now + self.config.safety_timeout;
                }
            }
            DragEvent::Released { verdict } => {
                self.on_gesture_release(verdict, now);
            }
            DragEvent::Canceled => {
                // Flagged session released; there is nothing to undo.
            }
        }
    }

    fn on_gesture_release(&mut self, verdict: ReleaseVerdict, now: Instant) {
        let extent = f64::from(self.viewport.extent(self.config.drag.axis));
        let Some(record) = &mut self.record else {
            return;
        };
        if record.layer != LayerState::GestureDragging {
            return;
        }
        record.deadline = now + self.config.safety_timeout;
        match verdict {
            ReleaseVerdict::Commit => {
                record.commit = true;
                record.layer = LayerState::Exiting;
                self.motion.animate_to(extent, self.config.exit_motion());
                debug!("swipe-back committed at release");
            }
            ReleaseVerdict::Cancel => {
                record.commit = false;
                record.layer = LayerState::GestureCanceling;
                self.motion.animate_to(0.0, self.config.cancel_motion());
                debug!("swipe-back cancelled at release");
            }
        }
    }

    // --- Frame driving ---

    /// Advance the in-flight animation and enforce the safety deadline.
    pub fn tick(&mut self, now: Instant) {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        if self.motion.tick(dt) == MotionStatus::Settled {
            self.finalize("motion settled");
        }

        if let Some(record) = &self.record
            && now >= record.deadline
        {
            warn!("safety timeout: force-finalizing stuck transition");
            self.finalize("safety timeout");
        }
    }

    // --- Finalizer ---

    /// Idempotently conclude the in-flight transition.
    ///
    /// Strict order: stop motion, apply the single recorded stack
    /// mutation, reset the motion value, clear record and drag session,
    /// release the mode gate. Every call after the first is a no-op.
    fn finalize(&mut self, reason: &'static str) {
        let Some(record) = &mut self.record else {
            return;
        };
        if record.finalized {
            return;
        }
        record.finalized = true;
        record.layer = LayerState::Destroyed;

        self.motion.stop();

        let record = self
            .record
            .take()
            .expect("record checked present directly above");
        match (record.mode, record.commit) {
            (TransitionMode::Push, true) => {
                let id = self.stack.commit(record.foreground);
                debug!(reason, id = id.raw(), "push committed");
                self.events.emit(&NavEvent::DidPush(id));
            }
            (TransitionMode::Pop, true) => {
                if let Some(popped) = self.stack.pop() {
                    debug!(reason, id = popped.id.raw(), "pop committed");
                    self.events.emit(&NavEvent::DidPop(popped.id));
                }
            }
            (_, false) => {
                debug!(reason, "transition cancelled; stack untouched");
                self.events.emit(&NavEvent::TransitionCanceled);
            }
            (TransitionMode::Idle, true) => {}
        }

        self.motion.set_immediate(0.0);
        self.recognizer.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
