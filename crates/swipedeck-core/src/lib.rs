#![forbid(unsafe_code)]

//! Core: pointer input, viewport metrics, and motion primitives.
//!
//! # Role in swipedeck
//! `swipedeck-core` is the input and motion layer. It owns the normalized
//! pointer-sample types, the axis-locked drag recognizer, and the animated
//! scalar (`Motion`) with its spring and tween backends.
//!
//! # Primary responsibilities
//! - **PointerSample / Axis**: canonical pointer-drag input.
//! - **Viewport**: usable dimensions and the compact-viewport predicate.
//! - **Motion**: one animated scalar behind one driver interface, with
//!   spring (physical settle) and tween (bounded-duration easing) backends.
//! - **DragRecognizer**: drag sessions, clamping, origin exclusion, and
//!   the shared commit rule.
//!
//! # How it fits in the system
//! The navigation layer (`swipedeck-nav`) feeds pointer samples through a
//! `DragRecognizer` and drives `Motion` values from the resulting events;
//! this crate knows nothing about stacks, pages, or sheets.

pub mod gesture;
pub mod motion;
pub mod pointer;
pub mod viewport;

pub use gesture::{DragConfig, DragEvent, DragRecognizer, ReleaseVerdict};
pub use motion::{Motion, MotionConfig, MotionStatus};
pub use pointer::{Axis, PointerSample};
pub use viewport::Viewport;
