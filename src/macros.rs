//! Lock helpers.
//!
//! Poisoned locks are reported as [`crate::Error::LockError`] through `?`, so these can only
//! be used inside functions returning [`crate::Result`].

/// Acquire a `Mutex`, propagating poisoning as `Error::LockError`
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().map_err(|_| crate::Error::LockError)?
    };
}

/// Acquire a `RwLock` for reading, propagating poisoning as `Error::LockError`
macro_rules! read_lock {
    ($rwlock:expr) => {
        $rwlock.read().map_err(|_| crate::Error::LockError)?
    };
}

/// Acquire a `RwLock` for writing, propagating poisoning as `Error::LockError`
macro_rules! write_lock {
    ($rwlock:expr) => {
        $rwlock.write().map_err(|_| crate::Error::LockError)?
    };
}
