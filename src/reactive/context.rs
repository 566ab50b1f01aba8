//! App-global context, one value per type.
//!
//! Holds the few values every widget may want without threading them through
//! constructors, most importantly [`AnimationSettings`]:
//!
//! ```ignore
//! provide_context(AnimationSettings::disabled());
//! ```
//!
//! Storage is a short `Vec<(TypeId, Box<dyn Any>)>` scanned linearly.
//!
//! [`AnimationSettings`]: crate::animation::AnimationSettings

use std::any::{Any, TypeId};
use std::cell::RefCell;

thread_local! {
    static CONTEXTS: RefCell<Vec<(TypeId, Box<dyn Any>)>> = const { RefCell::new(Vec::new()) };
}

/// Store a value in the global context, replacing any value of the same type.
pub fn provide_context<T: 'static>(value: T) {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        if let Some(entry) = ctx.iter_mut().find(|entry| entry.0 == type_id) {
            entry.1 = Box::new(value);
        } else {
            ctx.push((type_id, Box::new(value)));
        }
    });
}

/// Retrieve a clone of the context value of type `T`, if provided.
pub fn use_context<T: Clone + 'static>() -> Option<T> {
    with_context::<T, _>(T::clone)
}

/// Borrow the context value of type `T` without cloning.
pub fn with_context<T: 'static, R>(f: impl FnOnce(&T) -> R) -> Option<R> {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| {
        let ctx = ctx.borrow();
        ctx.iter()
            .find(|entry| entry.0 == type_id)
            .and_then(|entry| entry.1.downcast_ref::<T>())
            .map(f)
    })
}

pub fn has_context<T: 'static>() -> bool {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| ctx.borrow().iter().any(|entry| entry.0 == type_id))
}

/// Remove the context value of type `T`, returning whether one was stored.
pub fn remove_context<T: 'static>() -> bool {
    let type_id = TypeId::of::<T>();
    CONTEXTS.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let before = ctx.len();
        ctx.retain(|entry| entry.0 != type_id);
        ctx.len() != before
    })
}

/// Wipe all context values on this thread.
pub fn reset_contexts() {
    CONTEXTS.with(|ctx| ctx.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_contexts();
    }

    #[test]
    fn test_provide_and_use_context() {
        setup();
        provide_context(42u32);
        assert_eq!(use_context::<u32>(), Some(42));
    }

    #[test]
    fn test_use_context_returns_none_when_missing() {
        setup();
        assert_eq!(use_context::<String>(), None);
    }

    #[test]
    fn test_with_context_borrows_without_clone() {
        setup();
        provide_context(vec![1, 2, 3]);
        let sum = with_context::<Vec<i32>, _>(|v| v.iter().sum::<i32>());
        assert_eq!(sum, Some(6));
    }

    #[test]
    fn test_provide_replaces_existing() {
        setup();
        provide_context(10u32);
        provide_context(20u32);
        assert_eq!(use_context::<u32>(), Some(20));
    }

    #[test]
    fn test_remove_context() {
        setup();
        provide_context(1u8);
        assert!(has_context::<u8>());
        assert!(remove_context::<u8>());
        assert!(!has_context::<u8>());
        assert!(!remove_context::<u8>());
    }
}
