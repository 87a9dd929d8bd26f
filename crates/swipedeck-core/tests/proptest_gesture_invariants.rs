//! Property-based invariant tests for drag recognition.
//!
//! ## Invariants
//!
//! 1. Reported offsets are always within `[0, max_travel_fraction × extent]`.
//! 2. A control-origin session never emits `Moved` and always ends `Canceled`.
//! 3. `Started` is emitted at most once per session.
//! 4. The commit rule: peak above the distance threshold always commits;
//!    below the threshold, a slow release never commits.
//! 5. A release with no prior qualifying move emits nothing.

use proptest::prelude::*;
use swipedeck_core::gesture::{DragConfig, DragEvent, DragRecognizer, ReleaseVerdict};
use swipedeck_core::pointer::PointerSample;

const EXTENT: f32 = 390.0;

fn arb_travel() -> impl Strategy<Value = f32> {
    -500.0f32..2000.0
}

fn arb_drag(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(arb_travel(), 1..max_len)
}

fn sample(dx: f32, velocity: f32) -> PointerSample {
    let dir = if velocity > 0.0 { 1 } else if velocity < 0.0 { -1 } else { 0 };
    PointerSample::moving((dx, 0.0))
        .with_velocity((velocity, 0.0))
        .with_direction((dir, 0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn offsets_stay_clamped(travels in arb_drag(40)) {
        let config = DragConfig::default();
        let cap = config.max_travel_fraction * EXTENT;
        let mut gr = DragRecognizer::new(config);
        for dx in travels {
            if let Some(DragEvent::Moved { offset }) = gr.process(&sample(dx, 0.2), EXTENT) {
                prop_assert!((0.0..=cap).contains(&offset), "offset {offset} out of range");
            }
        }
    }

    #[test]
    fn control_origin_has_zero_effect(travels in arb_drag(40)) {
        let mut gr = DragRecognizer::new(DragConfig::default());
        let mut started = false;
        for (i, dx) in travels.iter().enumerate() {
            let s = if i == 0 {
                sample(dx.abs() + 10.0, 0.5).from_control()
            } else {
                sample(*dx, 0.5)
            };
            match gr.process(&s, EXTENT) {
                Some(DragEvent::Started { origin_is_control }) => {
                    prop_assert!(origin_is_control);
                    started = true;
                }
                Some(DragEvent::Moved { .. }) => {
                    prop_assert!(false, "flagged session emitted Moved");
                }
                _ => {}
            }
        }
        prop_assert!(started);
        let release = PointerSample::release((0.0, 0.0));
        prop_assert_eq!(gr.process(&release, EXTENT), Some(DragEvent::Canceled));
    }

    #[test]
    fn started_at_most_once_per_session(travels in arb_drag(40)) {
        let mut gr = DragRecognizer::new(DragConfig::default());
        let mut starts = 0;
        for dx in travels {
            if let Some(DragEvent::Started { .. }) = gr.process(&sample(dx, 0.2), EXTENT) {
                starts += 1;
            }
        }
        prop_assert!(starts <= 1);
    }

    #[test]
    fn deep_drag_always_commits(peak in 130.0f32..350.0) {
        let mut gr = DragRecognizer::new(DragConfig::default());
        gr.process(&sample(10.0, 0.2), EXTENT);
        gr.process(&sample(peak, 0.2), EXTENT);
        let ev = gr.process(&PointerSample::release((peak, 0.0)), EXTENT);
        prop_assert_eq!(ev, Some(DragEvent::Released { verdict: ReleaseVerdict::Commit }));
    }

    #[test]
    fn shallow_slow_drag_never_commits(peak in 5.0f32..119.0, v in 0.0f32..0.49) {
        let mut gr = DragRecognizer::new(DragConfig::default());
        gr.process(&sample(peak.max(5.0), v), EXTENT);
        let ev = gr.process(
            &PointerSample::release((peak, 0.0))
                .with_velocity((v, 0.0))
                .with_direction((1, 0)),
            EXTENT,
        );
        match ev {
            None => {} // never qualified: passthrough, equally effect-free
            Some(DragEvent::Released { verdict }) => {
                prop_assert_eq!(verdict, ReleaseVerdict::Cancel);
            }
            other => prop_assert!(false, "unexpected event {other:?}"),
        }
    }

    #[test]
    fn bare_release_is_silent(v in -2.0f32..2.0) {
        let mut gr = DragRecognizer::new(DragConfig::default());
        let ev = gr.process(
            &PointerSample::release((0.0, 0.0)).with_velocity((v, 0.0)),
            EXTENT,
        );
        prop_assert_eq!(ev, None);
    }
}
