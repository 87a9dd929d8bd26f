//! Property-based invariant tests for the navigation stack.
//!
//! ## Invariants
//!
//! 1. For all operation sequences, `stack.len() ≥ 1`.
//! 2. The root entry is never removed or reordered away.
//! 3. push(X) immediately followed by pop() restores the prior content
//!    (ids may differ, views are equal) — the round-trip law.
//! 4. PageIds are strictly increasing across all allocations.
//! 5. `can_go_back()` agrees with `len() > 1`.

use proptest::prelude::*;
use swipedeck_nav::stack::{NavigationStack, ViewSpec};

#[derive(Debug, Clone)]
enum Op {
    Push(String),
    Pop,
    Replace(String),
    PopToRoot,
}

fn arb_target() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_target().prop_map(Op::Push),
        Just(Op::Pop),
        arb_target().prop_map(Op::Replace),
        Just(Op::PopToRoot),
    ]
}

fn arb_ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arb_op(), 0..max_len)
}

fn apply(stack: &mut NavigationStack, op: &Op) {
    match op {
        Op::Push(t) => {
            stack.push(ViewSpec::new(t.clone()));
        }
        Op::Pop => {
            stack.pop();
        }
        Op::Replace(t) => {
            stack.replace(ViewSpec::new(t.clone()));
        }
        Op::PopToRoot => stack.pop_to_root(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn never_empty(ops in arb_ops(64)) {
        let mut stack = NavigationStack::new(ViewSpec::new("root"));
        for op in &ops {
            apply(&mut stack, op);
            prop_assert!(stack.len() >= 1);
        }
    }

    #[test]
    fn root_survives_everything_but_replace_at_root(ops in arb_ops(64)) {
        let mut stack = NavigationStack::new(ViewSpec::new("root"));
        for op in &ops {
            // Skip replaces that would legitimately retarget the root.
            if matches!(op, Op::Replace(_)) && stack.len() == 1 {
                continue;
            }
            apply(&mut stack, op);
            prop_assert_eq!(stack.entries()[0].view.target.as_str(), "root");
        }
    }

    #[test]
    fn push_pop_round_trip(ops in arb_ops(32), pushed in arb_target()) {
        let mut stack = NavigationStack::new(ViewSpec::new("root"));
        for op in &ops {
            apply(&mut stack, op);
        }
        let before: Vec<ViewSpec> = stack.entries().iter().map(|e| e.view.clone()).collect();

        stack.push(ViewSpec::new(pushed));
        stack.pop();

        let after: Vec<ViewSpec> = stack.entries().iter().map(|e| e.view.clone()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn ids_strictly_increase(ops in arb_ops(64)) {
        let mut stack = NavigationStack::new(ViewSpec::new("root"));
        let mut seen_max = stack.top().id;
        for op in &ops {
            apply(&mut stack, op);
            let top = stack.top().id;
            if top > seen_max {
                seen_max = top;
            }
            // Every id on the stack was allocated no later than the max.
            for entry in stack.entries() {
                prop_assert!(entry.id <= seen_max);
            }
        }
    }

    #[test]
    fn can_go_back_tracks_len(ops in arb_ops(64)) {
        let mut stack = NavigationStack::new(ViewSpec::new("root"));
        for op in &ops {
            apply(&mut stack, op);
            prop_assert_eq!(stack.can_go_back(), stack.len() > 1);
        }
    }
}
