//! Typed synchronous notification channels.
//!
//! A [`Signal`] delivers a value to every current subscriber in subscription
//! order. Subscribing returns a [`Subscription`] that unsubscribes when it is
//! released or dropped. Listeners may unsubscribe themselves or others while a
//! notification is in flight; a listener removed mid-delivery is not called.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Slot<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Listeners<T: ?Sized> {
    next_id: u64,
    slots: SmallVec<[(u64, Slot<T>); 4]>,
}

impl<T: ?Sized> Listeners<T> {
    fn contains(&self, id: u64) -> bool {
        self.slots.iter().any(|(sid, _)| *sid == id)
    }
}

pub struct Signal<T: 'static> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                slots: SmallVec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut l = self.listeners.borrow_mut();
            let id = l.next_id;
            l.next_id += 1;
            let slot: Slot<T> = Rc::new(RefCell::new(listener));
            l.slots.push((id, slot));
            id
        };
        let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.borrow_mut().slots.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn emit(&self, value: &T) {
        // Deliver against a snapshot so listeners can (un)subscribe freely.
        let snapshot: SmallVec<[(u64, Slot<T>); 4]> = self.listeners.borrow().slots.clone();
        for (id, slot) in snapshot {
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            // A listener re-entering its own signal is skipped for the nested call.
            if let Ok(mut f) = slot.try_borrow_mut() {
                (&mut *f)(value);
            } else {
                log::debug!("[signal] skipped re-entrant delivery to listener {}", id);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().slots.len()
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().slots.clear();
    }
}

/// Handle for one listener registration.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn release(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the listener registered for the lifetime of the signal.
    pub fn forget(mut self) {
        self.cancel = None;
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
