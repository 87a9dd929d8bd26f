#![forbid(unsafe_code)]

//! The navigation stack: an ordered list of page entries.
//!
//! [`NavigationStack`] is a plain data structure with no animation
//! knowledge. All operations are synchronous vector mutations; everything
//! animated lives in [`crate::transition`].
//!
//! # Invariants
//!
//! 1. The stack never becomes empty: `pop()` on a single-entry stack is a
//!    silent no-op, and `pop_to_root()` keeps the root.
//! 2. [`PageId`]s are allocated monotonically and never reused, including
//!    ids minted for entries that are never committed (a cancelled push).
//! 3. Entries are immutable once created; `replace` swaps in a new entry
//!    with a new id rather than mutating in place.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Page types
// ---------------------------------------------------------------------------

/// Opaque, monotonically increasing page identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(u64);

impl PageId {
    /// The raw id value, for logging and host-side bookkeeping.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a stack entry renders: a render-target name plus a props bag.
///
/// The engine imposes nothing on either field beyond equality; the host's
/// view registry interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Name of the component to render.
    pub target: String,
    /// Arbitrary props for the component.
    pub props: serde_json::Value,
}

impl ViewSpec {
    /// A view with no props.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            props: serde_json::Value::Null,
        }
    }

    /// Set the props bag (builder pattern).
    #[must_use]
    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }
}

/// One entry on the navigation stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Stable identity for the lifetime of the entry.
    pub id: PageId,
    /// What this entry renders.
    pub view: ViewSpec,
}

// ---------------------------------------------------------------------------
// NavigationStack
// ---------------------------------------------------------------------------

/// Ordered sequence of pages; the last entry is the visible screen.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    entries: Vec<PageEntry>,
    next_id: u64,
}

impl NavigationStack {
    /// Create a stack holding only the given root view.
    #[must_use]
    pub fn new(root: ViewSpec) -> Self {
        let mut stack = Self {
            entries: Vec::new(),
            next_id: 0,
        };
        let root = stack.mint(root);
        stack.entries.push(root);
        stack
    }

    /// Number of entries. Always ≥ 1.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API completeness.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The visible entry.
    #[must_use]
    pub fn top(&self) -> &PageEntry {
        self.entries
            .last()
            .expect("navigation stack invariant: never empty")
    }

    /// The entry revealed by a pop, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&PageEntry> {
        let n = self.entries.len();
        if n >= 2 { self.entries.get(n - 2) } else { None }
    }

    /// All entries, root first.
    #[must_use]
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// Whether a pop would change the stack.
    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Allocate an entry with a fresh id without inserting it.
    ///
    /// Used by the transition controller to render an entering page before
    /// its push commits. The id is consumed even if the entry never lands.
    #[must_use]
    pub fn mint(&mut self, view: ViewSpec) -> PageEntry {
        let id = PageId(self.next_id);
        self.next_id += 1;
        PageEntry { id, view }
    }

    /// Append a previously minted entry.
    pub fn commit(&mut self, entry: PageEntry) -> PageId {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Append a new entry for `view`. Always succeeds.
    pub fn push(&mut self, view: ViewSpec) -> PageId {
        let entry = self.mint(view);
        self.commit(entry)
    }

    /// Remove and return the top entry, unless it is the root.
    pub fn pop(&mut self) -> Option<PageEntry> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Swap the top entry for a new one (the id changes).
    pub fn replace(&mut self, view: ViewSpec) -> PageId {
        let entry = self.mint(view);
        let id = entry.id;
        *self
            .entries
            .last_mut()
            .expect("navigation stack invariant: never empty") = entry;
        id
    }

    /// Truncate to the root entry.
    pub fn pop_to_root(&mut self) {
        self.entries.truncate(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
