use std::rc::Rc;

use super::signal::Signal;

/// A value that can be either static or dynamic (reactive).
/// This allows widget properties to accept both plain values and signals.
pub enum MaybeDyn<T: 'static> {
    Static(T),
    Dynamic(Rc<dyn Fn() -> T>),
}

impl<T: Clone + 'static> MaybeDyn<T> {
    /// Get the current value. If dynamic, this calls the getter.
    pub fn get(&self) -> T {
        match self {
            MaybeDyn::Static(v) => v.clone(),
            MaybeDyn::Dynamic(getter) => getter(),
        }
    }

    pub fn fixed(value: T) -> Self {
        MaybeDyn::Static(value)
    }

    pub fn dynamic<F: Fn() -> T + 'static>(f: F) -> Self {
        MaybeDyn::Dynamic(Rc::new(f))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, MaybeDyn::Dynamic(_))
    }
}

impl<T: Clone + 'static> Clone for MaybeDyn<T> {
    fn clone(&self) -> Self {
        match self {
            MaybeDyn::Static(v) => MaybeDyn::Static(v.clone()),
            MaybeDyn::Dynamic(getter) => MaybeDyn::Dynamic(getter.clone()),
        }
    }
}

/// Trait for types that can be converted into `MaybeDyn<T>`
pub trait IntoMaybeDyn<T: Clone + 'static> {
    fn into_maybe_dyn(self) -> MaybeDyn<T>;
}

// Static values. No blanket impl: it would overlap the closure impl below.

impl IntoMaybeDyn<String> for String {
    fn into_maybe_dyn(self) -> MaybeDyn<String> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<String> for &str {
    fn into_maybe_dyn(self) -> MaybeDyn<String> {
        MaybeDyn::Static(self.to_string())
    }
}

impl IntoMaybeDyn<f32> for f32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<bool> for bool {
    fn into_maybe_dyn(self) -> MaybeDyn<bool> {
        MaybeDyn::Static(self)
    }
}

impl<T, F> IntoMaybeDyn<T> for F
where
    T: Clone + 'static,
    F: Fn() -> T + 'static,
{
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        MaybeDyn::Dynamic(Rc::new(self))
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for Signal<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        MaybeDyn::Dynamic(Rc::new(move || self.get()))
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for MaybeDyn<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::signal::create_signal;

    #[test]
    fn test_fixed_returns_static_value() {
        let value = MaybeDyn::fixed(17.0f32);
        assert_eq!(value.get(), 17.0);
        assert!(!value.is_dynamic());
    }

    #[test]
    fn test_into_maybe_dyn_for_strings() {
        let value: MaybeDyn<String> = "Email".into_maybe_dyn();
        assert_eq!(value.get(), "Email");
    }

    #[test]
    fn test_closure_is_dynamic() {
        let signal = create_signal(String::from("a"));
        let value: MaybeDyn<String> = {
            let signal = signal.clone();
            (move || signal.get().to_uppercase()).into_maybe_dyn()
        };
        assert!(value.is_dynamic());
        signal.set("b".to_string());
        assert_eq!(value.get(), "B");
    }

    #[test]
    fn test_signal_into_maybe_dyn() {
        let signal = create_signal(String::new());
        let value: MaybeDyn<String> = signal.clone().into_maybe_dyn();
        signal.set("abc".to_string());
        assert_eq!(value.get(), "abc");
    }
}
