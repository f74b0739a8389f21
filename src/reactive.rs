//! Observable state cells shared by every helper.
//!
//! DESIGN
//! ======
//! Each helper publishes its state slices through an `Observable`. UI code
//! either polls `get()` or holds a `watch::Receiver` from `subscribe()` and
//! awaits `changed()`. Writes never fail, even when nobody is subscribed.

#[cfg(test)]
#[path = "reactive_test.rs"]
mod reactive_test;

use std::fmt;

use tokio::sync::watch;

/// A value plus the channel that announces every change to it.
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Replace the value and notify subscribers. Returns the previous value.
    pub fn set(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate in place; subscribers are notified only when `f` returns `true`.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Read the current value without cloning it.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.tx.borrow())
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Apply `reset` when the returned guard drops, on every exit path.
    #[must_use = "the reset runs when the guard is dropped"]
    pub fn reset_on_drop(&self, reset: fn(&mut T)) -> ResetGuard<'_, T> {
        ResetGuard { cell: self, reset }
    }
}

impl<T: Clone> Observable<T> {
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Scope guard returned by [`Observable::reset_on_drop`].
pub struct ResetGuard<'a, T> {
    cell: &'a Observable<T>,
    reset: fn(&mut T),
}

impl<T> Drop for ResetGuard<'_, T> {
    fn drop(&mut self) {
        self.cell.update(self.reset);
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&*self.tx.borrow()).finish()
    }
}
