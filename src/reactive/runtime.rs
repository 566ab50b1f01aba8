use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

pub type SignalId = usize;
pub type EffectId = usize;

type EffectCallback = Rc<RefCell<Box<dyn FnMut()>>>;

/// Dependency graph between signals and the effects that read them.
///
/// The runtime is never borrowed while an effect callback runs, so reads and
/// writes made by the callback are tracked like any other.
#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    pending_effects: Vec<EffectId>,
    effect_callbacks: Vec<Option<EffectCallback>>,
    effect_dependencies: Vec<HashSet<SignalId>>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    batch_depth: usize,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        self.signal_subscribers.push(HashSet::new());
        self.signal_subscribers.len() - 1
    }

    pub fn allocate_effect(&mut self, callback: Box<dyn FnMut()>) -> EffectId {
        self.effect_callbacks
            .push(Some(Rc::new(RefCell::new(callback))));
        self.effect_dependencies.push(HashSet::new());
        self.effect_callbacks.len() - 1
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        // Signals created on another thread are unknown to this runtime
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effect_dependencies[effect_id].insert(signal_id);
        }
    }

    /// Queue the subscribers of `signal_id`. Returns true if they should be
    /// flushed now (no batch in progress).
    pub fn queue_subscribers(&mut self, signal_id: SignalId) -> bool {
        if signal_id >= self.signal_subscribers.len() {
            return false;
        }
        for effect_id in self.signal_subscribers[signal_id].iter().copied() {
            if !self.pending_effects.contains(&effect_id) {
                self.pending_effects.push(effect_id);
            }
        }
        self.batch_depth == 0
    }

    fn take_pending(&mut self) -> Option<EffectId> {
        if self.pending_effects.is_empty() {
            None
        } else {
            Some(self.pending_effects.remove(0))
        }
    }

    /// Drop old dependencies and make `effect_id` the tracking target.
    fn begin_effect(&mut self, effect_id: EffectId) -> (Option<EffectCallback>, Option<EffectId>) {
        let old_deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in old_deps {
            self.signal_subscribers[signal_id].remove(&effect_id);
        }
        let prev = self.current_effect.replace(effect_id);
        (self.effect_callbacks[effect_id].clone(), prev)
    }

    pub fn dispose_effect(&mut self, effect_id: EffectId) {
        let deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in deps {
            if signal_id < self.signal_subscribers.len() {
                self.signal_subscribers[signal_id].remove(&effect_id);
            }
        }
        self.effect_callbacks[effect_id] = None;
        self.pending_effects.retain(|id| *id != effect_id);
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Access the runtime if it is not already borrowed.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| rt.try_borrow_mut().ok().map(|mut runtime| f(&mut runtime)))
}

/// Run one effect, tracking the signals it reads.
pub fn run_effect(effect_id: EffectId) {
    let (callback, prev) = with_runtime(|rt| rt.begin_effect(effect_id));
    if let Some(callback) = callback {
        // An effect that writes a signal it also reads does not re-enter itself
        if let Ok(mut callback) = callback.try_borrow_mut() {
            (callback)();
        }
    }
    with_runtime(|rt| rt.current_effect = prev);
}

pub fn flush_effects() {
    while let Some(effect_id) = with_runtime(|rt| rt.take_pending()) {
        run_effect(effect_id);
    }
}

/// Queue the subscribers of a written signal and run them unless batching.
pub fn notify_write(signal_id: SignalId) {
    if try_with_runtime(|rt| rt.queue_subscribers(signal_id)).unwrap_or(false) {
        flush_effects();
    }
}

/// Run `f` with effect notification deferred until it returns.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let flush = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0
    });
    if flush {
        flush_effects();
    }
    result
}
