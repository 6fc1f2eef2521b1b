// Host-side tests for the typed notification channels.

use neural_hangar::core::{Signal, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn delivers_in_subscription_order() {
    let signal: Signal<u32> = Signal::new();
    let seen = recorder();
    let a = {
        let seen = seen.clone();
        signal.subscribe(move |v| seen.borrow_mut().push(format!("a{v}")))
    };
    let b = {
        let seen = seen.clone();
        signal.subscribe(move |v| seen.borrow_mut().push(format!("b{v}")))
    };
    signal.emit(&1);
    signal.emit(&2);
    assert_eq!(*seen.borrow(), vec!["a1", "b1", "a2", "b2"]);
    assert!(a.is_active() && b.is_active());
}

#[test]
fn dropping_subscription_unsubscribes() {
    let signal: Signal<()> = Signal::new();
    let count = Rc::new(RefCell::new(0));
    {
        let count = count.clone();
        let _sub = signal.subscribe(move |_| *count.borrow_mut() += 1);
        signal.emit(&());
    }
    signal.emit(&());
    assert_eq!(*count.borrow(), 1);
    assert_eq!(signal.subscriber_count(), 0);
}

#[test]
fn release_and_forget() {
    let signal: Signal<()> = Signal::new();
    let count = Rc::new(RefCell::new(0));

    let released = {
        let count = count.clone();
        signal.subscribe(move |_| *count.borrow_mut() += 10)
    };
    released.release();

    {
        let count = count.clone();
        signal.subscribe(move |_| *count.borrow_mut() += 1).forget();
    }
    signal.emit(&());
    signal.emit(&());
    assert_eq!(*count.borrow(), 2);
    assert_eq!(signal.subscriber_count(), 1);

    signal.clear();
    signal.emit(&());
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn listener_removed_mid_delivery_is_not_called() {
    let signal: Signal<()> = Signal::new();
    let seen = recorder();
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let _first = {
        let victim = victim.clone();
        let seen = seen.clone();
        signal.subscribe(move |_| {
            seen.borrow_mut().push("first".into());
            // Dropping the handle unsubscribes the second listener.
            victim.borrow_mut().take();
        })
    };
    let second = {
        let seen = seen.clone();
        signal.subscribe(move |_| seen.borrow_mut().push("second".into()))
    };
    *victim.borrow_mut() = Some(second);

    signal.emit(&());
    assert_eq!(*seen.borrow(), vec!["first"]);
    assert_eq!(signal.subscriber_count(), 1);
}

#[test]
fn subscribing_during_delivery_waits_for_next_emit() {
    let signal: Rc<Signal<u8>> = Rc::new(Signal::new());
    let seen = recorder();
    let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

    let _outer = {
        let signal_inner = Rc::downgrade(&signal);
        let seen = seen.clone();
        let late = late.clone();
        signal.subscribe(move |v| {
            seen.borrow_mut().push(format!("outer{v}"));
            if *v == 1 {
                if let Some(signal) = signal_inner.upgrade() {
                    let seen = seen.clone();
                    late.borrow_mut()
                        .push(signal.subscribe(move |v| seen.borrow_mut().push(format!("late{v}"))));
                }
            }
        })
    };

    signal.emit(&1);
    signal.emit(&2);
    assert_eq!(*seen.borrow(), vec!["outer1", "outer2", "late2"]);
}

#[test]
fn subscription_outliving_signal_is_harmless() {
    let signal: Signal<()> = Signal::new();
    let sub = signal.subscribe(|_| {});
    drop(signal);
    sub.release();
}
