#![forbid(unsafe_code)]

//! Navigation: stack, animated transitions, and sheet dismissal.
//!
//! # Role in swipedeck
//! `swipedeck-nav` is the orchestration layer. It consumes pointer samples
//! and motion primitives from `swipedeck-core` and owns every piece of
//! navigation state: the page stack, the in-flight transition record, and
//! the sheet phase machine.
//!
//! # Primary responsibilities
//! - **NavigationStack**: ordered page entries; push/pop/replace/pop-to-root.
//! - **TransitionController**: animated push/pop with interactive
//!   swipe-back, mutual exclusion, a safety timer, and an idempotent
//!   finalizer applying exactly one stack mutation per transition.
//! - **SheetController**: drag-to-close for modal sheets under an explicit
//!   `Closed → Opening → Open → Closing` phase machine.
//! - **EventBus / DetailViewLink**: lifecycle-scoped notifications with
//!   disposer-returning subscription, and the typed child→parent detail
//!   title contract.
//!
//! # Concurrency model
//! Single-threaded and cooperative: pointer callbacks plus a per-frame
//! `tick` with a caller-supplied clock. The transition mode gate is the
//! only synchronization primitive; there is no real parallelism, only
//! interleaved callbacks.

pub mod bus;
pub mod sheet;
pub mod stack;
pub mod transition;

pub use bus::{DetailViewLink, EventBus, NavEvent, Subscription};
pub use sheet::{SheetConfig, SheetController, SheetEvent, SheetPhase};
pub use stack::{NavigationStack, PageEntry, PageId, ViewSpec};
pub use transition::{
    BackdropStyle, LayerState, TransitionConfig, TransitionController, TransitionMode,
    TransitionRecord, TransitionRejected,
};
