use core::cell::RefCell;
use critical_section::with;

/// Interior mutability for statics shared with interrupt handlers
pub struct Mutex<T> {
    inner: RefCell<T>,
}

impl<T> Mutex<T> {
    pub const fn new(inner: T) -> Self {
        Self {
            inner: RefCell::new(inner),
        }
    }

    /// Runs `f` on the inner value inside a critical section
    pub fn map<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        with(|_cs| f(&self.inner.borrow()))
    }

    pub fn replace(&self, value: T) {
        with(|_cs| {
            self.inner.replace(value);
        });
    }
}

unsafe impl<T> Sync for Mutex<T> {}
