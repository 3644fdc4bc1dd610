//! Listener and subscription-handle primitives shared by push-style host contracts.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

/// Shared callback invoked by a host service whenever it has a new value to deliver.
pub type Listener<T> = Rc<dyn Fn(T)>;

/// Handle for a live host subscription.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) stops future callbacks. It does
/// not abort requests that are already in flight.
#[must_use = "dropping a subscription immediately unsubscribes it"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps a teardown closure that runs exactly once when the subscription ends.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Subscription with nothing to tear down, used by no-op services.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    /// Ends the subscription now.
    pub fn unsubscribe(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

struct RegistryInner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Fan-out list of listeners; each registration is removed when its [`Subscription`] ends.
pub struct ListenerRegistry<T> {
    inner: Rc<RefCell<RegistryInner<T>>>,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }
}

impl<T> Clone for ListenerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<T: Clone + 'static> ListenerRegistry<T> {
    /// Registers a listener until the returned subscription ends.
    pub fn subscribe(&self, listener: Listener<T>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<RegistryInner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Delivers `value` to every registered listener.
    ///
    /// Listeners are snapshotted first so a callback may subscribe or unsubscribe re-entrantly.
    pub fn emit(&self, value: T) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(value.clone());
        }
    }
}

impl<T> ListenerRegistry<T> {
    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Returns whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn teardown_runs_once_on_unsubscribe() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));

        subscription.unsubscribe();

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropping_subscription_tears_down() {
        let calls = Rc::new(Cell::new(0));
        {
            let counter = calls.clone();
            let _subscription = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn registry_stops_delivering_after_unsubscribe() {
        let registry = ListenerRegistry::<u32>::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = registry.subscribe(Rc::new(move |value| sink.borrow_mut().push(value)));

        registry.emit(1);
        subscription.unsubscribe();
        registry.emit(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(registry.is_empty());
    }
}
