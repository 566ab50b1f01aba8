use std::sync::{Arc, RwLock};

use super::invalidation::request_frame;
use super::runtime::{notify_write, try_with_runtime, with_runtime, SignalId};

struct SignalInner<T> {
    id: SignalId,
    value: RwLock<T>,
}

/// A reactive value that can be read and written from any thread.
///
/// Reads inside an effect subscribe that effect; writes that change the value
/// re-run subscribers (on the thread that owns the runtime) and request a
/// frame. Writes from other threads update the value and request a frame but
/// skip effect notification.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Arc::new(SignalInner {
                id,
                value: RwLock::new(value),
            }),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        try_with_runtime(|rt| rt.track_read(self.inner.id));
        self.with_untracked(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.inner.value.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn notify(&self) {
        notify_write(self.inner.id);
        request_frame();
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the value, notifying only if it actually changed.
    pub fn set(&self, value: T) {
        let Ok(mut guard) = self.inner.value.write() else {
            return; // Lock poisoned, skip update silently
        };
        if *guard != value {
            *guard = value;
            drop(guard);
            self.notify();
        }
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the value in place, notifying only if it actually changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let Ok(mut guard) = self.inner.value.write() else {
            return;
        };
        let old_value = guard.clone();
        f(&mut guard);
        if *guard != old_value {
            drop(guard);
            self.notify();
        }
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_signal_and_get() {
        let text = create_signal(String::from("abc"));
        assert_eq!(text.get(), "abc");
    }

    #[test]
    fn test_set_updates_value() {
        let text = create_signal(String::new());
        text.set("typed".to_string());
        assert_eq!(text.get(), "typed");
    }

    #[test]
    fn test_update_with_closure() {
        let text = create_signal(String::from("ab"));
        text.update(|s| s.push('c'));
        assert_eq!(text.get(), "abc");
    }

    #[test]
    fn test_with_borrows() {
        let text = create_signal(String::from("hello"));
        assert_eq!(text.with(|s| s.len()), 5);
        assert!(!text.with_untracked(|s| s.is_empty()));
    }

    #[test]
    fn test_clone_shares_value() {
        let a = create_signal(0.5f32);
        let b = a.clone();
        a.set(1.0);
        assert_eq!(b.get(), 1.0);
    }

    #[test]
    fn test_written_from_other_thread() {
        let text = create_signal(String::new());
        let remote = text.clone();
        std::thread::spawn(move || remote.set("remote".to_string()))
            .join()
            .unwrap();
        assert_eq!(text.get_untracked(), "remote");
    }
}
