//! End-to-end navigation flows: programmatic and gestural transitions
//! interleaved the way a settings shell drives them.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use swipedeck_core::pointer::PointerSample;
use swipedeck_core::viewport::Viewport;
use swipedeck_nav::{
    EventBus, LayerState, NavEvent, Subscription, TransitionConfig, TransitionController,
    TransitionRejected, ViewSpec,
};

const MS_16: Duration = Duration::from_millis(16);
const PHONE: Viewport = Viewport {
    width: 390.0,
    height: 844.0,
};

fn controller_with_log() -> (
    TransitionController,
    Rc<RefCell<Vec<NavEvent>>>,
    Subscription<NavEvent>,
) {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let sub = bus.subscribe(move |e: &NavEvent| sink.borrow_mut().push(*e));

    let ctl = TransitionController::new(ViewSpec::new("chat-root"), PHONE, TransitionConfig::default())
        .with_event_bus(bus);
    (ctl, log, sub)
}

fn run_to_idle(ctl: &mut TransitionController, base: Instant) -> Instant {
    let mut now = base;
    for _ in 0..600 {
        now += MS_16;
        ctl.tick(now);
        if ctl.is_idle() {
            return now;
        }
    }
    panic!("controller did not reach idle");
}

fn swipe(dx: f32, v: f32) -> PointerSample {
    PointerSample::moving((dx, 0.0))
        .with_velocity((v, 0.0))
        .with_direction((1, 0))
}

fn release(dx: f32, v: f32) -> PointerSample {
    PointerSample::release((dx, 0.0))
        .with_velocity((v, 0.0))
        .with_direction((1, 0))
}

#[test]
fn settings_drill_down_and_swipe_back() {
    let (mut ctl, log, _sub) = controller_with_log();
    let t0 = Instant::now();

    // Drill into settings, then a knowledge-base editor.
    let settings = ctl
        .push_animated(ViewSpec::new("settings"), t0)
        .unwrap();
    let t1 = run_to_idle(&mut ctl, t0);
    let editor = ctl
        .push_animated(
            ViewSpec::new("kb-editor").with_props(serde_json::json!({"entry": 7})),
            t1,
        )
        .unwrap();
    let t2 = run_to_idle(&mut ctl, t1);

    assert_eq!(ctl.stack().len(), 3);
    assert_eq!(ctl.stack().top().id, editor);
    assert_eq!(ctl.stack().previous().unwrap().id, settings);

    // First swipe-back attempt: released shallow and slow — rebounds.
    ctl.on_pointer(&swipe(10.0, 0.2), t2);
    ctl.on_pointer(&swipe(60.0, 0.1), t2 + MS_16);
    ctl.on_pointer(&release(60.0, 0.1), t2 + 2 * MS_16);
    assert_eq!(ctl.layer_state(), LayerState::GestureCanceling);
    let t3 = run_to_idle(&mut ctl, t2 + 2 * MS_16);
    assert_eq!(ctl.stack().len(), 3, "cancelled swipe must not pop");

    // Second attempt: a committed swipe pops back to settings.
    ctl.on_pointer(&swipe(10.0, 0.2), t3);
    ctl.on_pointer(&swipe(200.0, 0.4), t3 + MS_16);
    ctl.on_pointer(&release(200.0, 0.4), t3 + 2 * MS_16);
    run_to_idle(&mut ctl, t3 + 2 * MS_16);

    assert_eq!(ctl.stack().len(), 2);
    assert_eq!(ctl.stack().top().id, settings);
    assert_eq!(ctl.offset(), 0.0);

    let log = log.borrow();
    assert_eq!(
        *log,
        vec![
            NavEvent::DidPush(settings),
            NavEvent::DidPush(editor),
            NavEvent::TransitionCanceled,
            NavEvent::DidPop(editor),
        ]
    );
}

#[test]
fn overlapping_pushes_produce_no_duplicates() {
    let (mut ctl, log, _sub) = controller_with_log();
    let t0 = Instant::now();

    ctl.push_animated(ViewSpec::new("a"), t0).unwrap();
    // A double-tap on the same row fires a second push immediately.
    assert_eq!(
        ctl.push_animated(ViewSpec::new("a"), t0 + MS_16),
        Err(TransitionRejected::InFlight)
    );
    run_to_idle(&mut ctl, t0);

    assert_eq!(ctl.stack().len(), 2);
    let pushes = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, NavEvent::DidPush(_)))
        .count();
    assert_eq!(pushes, 1);
}

#[test]
fn stuck_transition_recovers_and_navigation_continues() {
    let (mut ctl, _log, _sub) = controller_with_log();
    let t0 = Instant::now();

    ctl.push_animated(ViewSpec::new("a"), t0).unwrap();
    // The frame loop stalls completely; the first tick arrives after the
    // safety deadline with a zero dt.
    ctl.tick(t0 + Duration::from_millis(900));
    assert!(ctl.is_idle(), "safety timer must release the gate");
    assert_eq!(ctl.stack().len(), 2);

    // The controller is fully usable afterwards.
    let t1 = t0 + Duration::from_millis(1200);
    ctl.pop_animated(t1).unwrap();
    run_to_idle(&mut ctl, t1);
    assert_eq!(ctl.stack().len(), 1);
}

#[test]
fn replace_and_pop_to_root_flow() {
    let (mut ctl, log, _sub) = controller_with_log();

    ctl.push(ViewSpec::new("settings"));
    ctl.push(ViewSpec::new("voice"));
    let replaced = ctl.replace(ViewSpec::new("voice-advanced")).unwrap();
    assert_eq!(ctl.stack().top().id, replaced);
    assert_eq!(ctl.stack().len(), 3);

    ctl.pop_to_root();
    assert_eq!(ctl.stack().len(), 1);
    assert_eq!(ctl.stack().top().view.target, "chat-root");

    let log = log.borrow();
    assert!(matches!(log[log.len() - 2], NavEvent::DidReplace(_)));
    assert!(matches!(log[log.len() - 1], NavEvent::DidPopToRoot));
}

#[test]
fn swipe_on_root_leaves_taps_intact() {
    let (mut ctl, log, _sub) = controller_with_log();
    let t0 = Instant::now();

    // A drag on the root screen: recognized, but there is nowhere to go.
    ctl.on_pointer(&swipe(10.0, 0.2), t0);
    ctl.on_pointer(&swipe(200.0, 0.8), t0 + MS_16);
    ctl.on_pointer(&release(200.0, 0.8), t0 + 2 * MS_16);

    // A plain tap: down then release without qualifying movement.
    ctl.on_pointer(&PointerSample::moving((1.0, 0.0)), t0 + Duration::from_millis(100));
    ctl.on_pointer(
        &PointerSample::release((1.0, 0.0)),
        t0 + Duration::from_millis(120),
    );

    assert!(ctl.is_idle());
    assert_eq!(ctl.stack().len(), 1);
    assert!(log.borrow().is_empty());
}
