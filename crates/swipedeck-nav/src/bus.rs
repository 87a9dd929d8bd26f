#![forbid(unsafe_code)]

//! Lifecycle-scoped event bus.
//!
//! [`EventBus`] replaces module-level listener registries with an
//! explicitly injected, owner-scoped bus. `subscribe` returns a
//! [`Subscription`] disposer: dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the handler, so a component that
//! goes away takes its listeners with it.
//!
//! The bus is single-threaded by construction (`Rc<RefCell>` interior),
//! matching the engine's cooperative concurrency model; handles clone
//! cheaply and share one registry.
//!
//! # Invariants
//!
//! 1. A handler is never invoked after its `Subscription` is dropped,
//!    except when the drop happens *during* the emit that already
//!    snapshotted it (see Failure Modes).
//! 2. Subscribing or unsubscribing from inside a handler is safe and takes
//!    effect for the next emit.
//!
//! # Failure Modes
//!
//! - `emit` snapshots the handler list before invoking, so a handler
//!   unsubscribed by an earlier handler of the same emit still runs once.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::stack::PageId;

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Registry<E: 'static> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

/// A cloneable handle to a shared event bus.
pub struct EventBus<E: 'static> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventBus<E> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register a handler. The returned [`Subscription`] unsubscribes on
    /// drop.
    #[must_use = "dropping the subscription immediately unsubscribes the handler"]
    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription<E> {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Rc::new(RefCell::new(handler))));
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every current subscriber.
    pub fn emit(&self, event: &E) {
        // Snapshot so handlers may (un)subscribe without holding the
        // registry borrow across user code.
        let snapshot: Vec<Handler<E>> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            (handler.borrow_mut())(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// Disposer guard for one bus subscription.
pub struct Subscription<E: 'static> {
    id: u64,
    registry: Weak<RefCell<Registry<E>>>,
}

impl<E: 'static> Subscription<E> {
    /// Explicitly unsubscribe (equivalent to dropping).
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<E: 'static> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation events
// ---------------------------------------------------------------------------

/// Notifications published by the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// A push committed; the entry is now on the stack.
    DidPush(PageId),
    /// A pop committed; the entry left the stack.
    DidPop(PageId),
    /// The top entry was replaced.
    DidReplace(PageId),
    /// The stack was truncated to its root.
    DidPopToRoot,
    /// An in-flight transition resolved without a stack mutation.
    TransitionCanceled,
}

// ---------------------------------------------------------------------------
// DetailViewLink
// ---------------------------------------------------------------------------

/// Typed child→parent contract for detail sub-view titles.
///
/// A child page showing a detail sub-view reports its title here; the
/// parent observes changes through a subscription. This replaces any
/// inspection of rendered output.
pub struct DetailViewLink {
    bus: EventBus<Option<String>>,
    current: Rc<RefCell<Option<String>>>,
}

impl Default for DetailViewLink {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailViewLink {
    /// Create a link with no detail view showing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            current: Rc::new(RefCell::new(None)),
        }
    }

    /// Child side: report the current detail title, or `None` when the
    /// detail view closes.
    pub fn set_title(&self, title: Option<String>) {
        *self.current.borrow_mut() = title.clone();
        self.bus.emit(&title);
    }

    /// The currently reported title.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Parent side: observe title changes.
    #[must_use = "dropping the subscription stops observation"]
    pub fn observe(&self, handler: impl FnMut(&Option<String>) + 'static) -> Subscription<Option<String>> {
        self.bus.subscribe(handler)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_reaches_subscriber() {
        let bus: EventBus<u32> = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = bus.subscribe(move |e| sink.borrow_mut().push(*e));

        bus.emit(&1);
        bus.emit(&2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn drop_unsubscribes() {
        let bus: EventBus<u32> = EventBus::new();
        let seen = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&seen);
        let sub = bus.subscribe(move |e| *sink.borrow_mut() += *e);

        bus.emit(&1);
        drop(sub);
        bus.emit(&10);
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn explicit_unsubscribe() {
        let bus: EventBus<u32> = EventBus::new();
        let sub = bus.subscribe(|_| {});
        assert_eq!(bus.subscriber_count(), 1);
        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn cloned_handles_share_registry() {
        let bus: EventBus<u32> = EventBus::new();
        let other = bus.clone();
        let seen = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&seen);
        let _sub = bus.subscribe(move |e| *sink.borrow_mut() += *e);

        other.emit(&5);
        assert_eq!(*seen.borrow(), 5);
    }

    #[test]
    fn subscribe_during_emit_takes_effect_next_emit() {
        let bus: EventBus<u32> = EventBus::new();
        let late_seen = Rc::new(RefCell::new(0u32));
        let holder: Rc<RefCell<Vec<Subscription<u32>>>> = Rc::new(RefCell::new(Vec::new()));

        let bus2 = bus.clone();
        let late = Rc::clone(&late_seen);
        let holder2 = Rc::clone(&holder);
        let _sub = bus.subscribe(move |_| {
            let late = Rc::clone(&late);
            let sub = bus2.subscribe(move |e| *late.borrow_mut() += *e);
            holder2.borrow_mut().push(sub);
        });

        bus.emit(&1);
        assert_eq!(*late_seen.borrow(), 0, "not yet subscribed at snapshot time");
        bus.emit(&2);
        assert_eq!(*late_seen.borrow(), 2);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus: EventBus<u32> = EventBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub); // Weak upgrade fails; no panic.
    }

    #[test]
    fn detail_link_reports_and_observes() {
        let link = DetailViewLink::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = link.observe(move |t| sink.borrow_mut().push(t.clone()));

        link.set_title(Some("Thread".to_string()));
        assert_eq!(link.title().as_deref(), Some("Thread"));
        link.set_title(None);
        assert_eq!(link.title(), None);

        assert_eq!(*seen.borrow(), vec![Some("Thread".to_string()), None]);
    }
}
