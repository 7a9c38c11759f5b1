//! Single-threaded observable events with removable observer tokens.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback registered on an [`Observable`].
type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Token returned by [`Observable::add`], required to remove the observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observer(u64);

/// An event source that notifies registered callbacks in registration order.
///
/// Observers may be added or removed from inside a callback. A notification
/// walks a snapshot taken when it started, so observers added mid-notification
/// are first called on the next one, and observers removed mid-notification
/// are not called again.
pub struct Observable<T> {
    observers: RefCell<Vec<(Observer, Callback<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Observable<T> {
    /// Create an observable with no observers.
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register a callback and return its token.
    pub fn add<F>(&self, callback: F) -> Observer
    where
        F: FnMut(&T) + 'static,
    {
        let observer = Observer(self.next_id.get());
        self.next_id.set(observer.0 + 1);
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.observers.borrow_mut().push((observer, callback));
        observer
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn remove(&self, observer: Observer) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(id, _)| *id != observer);
        observers.len() != before
    }

    /// Check whether an observer is still registered.
    pub fn contains(&self, observer: Observer) -> bool {
        self.observers.borrow().iter().any(|(id, _)| *id == observer)
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Check if nothing is listening.
    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }

    /// Remove every observer.
    pub fn clear(&self) {
        self.observers.borrow_mut().clear();
    }

    /// Call every registered observer with `value`.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<(Observer, Callback<T>)> = self.observers.borrow().clone();
        for (observer, callback) in snapshot {
            // Skip observers removed by an earlier callback in this pass
            if !self.contains(observer) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => callback(value),
                Err(_) => {
                    log::warn!("Skipping re-entrant notification of observer {:?}", observer)
                }
            }
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.len())
            .finish()
    }
}
