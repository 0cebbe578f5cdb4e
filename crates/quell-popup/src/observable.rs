//! Single-threaded observable values
//!
//! An [`Observable`] notifies subscribers after its value changes. A
//! subscriber may bring its own equality predicate; when the predicate
//! reports the old and new values as equal the subscriber is skipped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;
type Equals<T> = Box<dyn Fn(&T, &T) -> bool>;

struct Subscriber<T> {
    id: u64,
    equals: Option<Equals<T>>,
    callback: Callback<T>,
}

struct Inner<T> {
    value: T,
    version: u64,
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
}

/// Shared value with change notification
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Incremented on every actual change
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Store `value`. Returns false, notifying nobody, if it equals the
    /// current value.
    pub fn set(&self, value: T) -> bool {
        let callbacks: Vec<Callback<T>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            let prev = std::mem::replace(&mut inner.value, value.clone());
            inner.version += 1;
            inner
                .subscribers
                .iter()
                .filter(|s| s.equals.as_ref().map_or(true, |eq| !eq(&prev, &value)))
                .map(|s| Rc::clone(&s.callback))
                .collect()
        };

        // Borrow released: callbacks may read this observable
        for callback in callbacks {
            callback(&value);
        }
        true
    }

    /// Call `callback` after every change
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.attach(None, Rc::new(callback))
    }

    /// Call `callback` after changes for which `equals(prev, next)` is false
    pub fn subscribe_with(
        &self,
        equals: impl Fn(&T, &T) -> bool + 'static,
        callback: impl Fn(&T) + 'static,
    ) -> Subscription {
        self.attach(Some(Box::new(equals)), Rc::new(callback))
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn attach(&self, equals: Option<Equals<T>>, callback: Callback<T>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push(Subscriber {
                id,
                equals,
                callback,
            });
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|s| s.id != id);
                }
            })),
        }
    }
}

/// Detaches its subscriber when dropped
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_set_notifies_on_change_only() {
        let value = Observable::new(1u64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = value.subscribe(move |v| sink.borrow_mut().push(*v));

        assert!(value.set(2));
        assert!(!value.set(2));
        assert!(value.set(3));

        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(value.version(), 2);
    }

    #[test]
    fn test_custom_equality_suppresses() {
        let value = Observable::new(0u64);
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        // Only even-to-even transitions count as equal
        let _sub = value.subscribe_with(
            |prev, next| prev % 2 == 0 && next % 2 == 0,
            move |_| counter.set(counter.get() + 1),
        );

        value.set(2);
        assert_eq!(fired.get(), 0);
        value.set(3);
        assert_eq!(fired.get(), 1);
        value.set(4);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_drop_subscription_detaches() {
        let value = Observable::new("a".to_string());
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let sub = value.subscribe(move |_| flag.set(true));
        assert_eq!(value.subscriber_count(), 1);

        drop(sub);
        assert_eq!(value.subscriber_count(), 0);
        value.set("b".to_string());
        assert!(!fired.get());
    }

    #[test]
    fn test_callback_can_read_value() {
        let value = Observable::new(0u64);
        let reader = value.clone();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _sub = value.subscribe(move |_| sink.set(reader.get()));

        value.set(9);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn test_subscription_outlives_observable() {
        let value = Observable::new(0u64);
        let sub = value.subscribe(|_| {});
        drop(value);
        drop(sub);
    }
}
