//! The reactive graph: cells, derivations, effects, scopes, and the
//! fine-grained slot/array types built on top of them.
//!
//! Every other module in this crate reaches the outside world through one
//! of these primitives rather than touching plain fields, so UI state stays
//! push-reactive: writing a [`Signal`] re-runs exactly the [`effect`]s and
//! [`Derived`] computations that read it, nothing else.
//!
//! # Model
//!
//! Dependency tracking is a thread-local stack of "currently running"
//! nodes. When a [`Signal::get`] is called, it looks at the top of that
//! stack and, if present, subscribes that node. [`effect`] and [`Derived`]
//! push themselves onto the stack before calling their body and pop
//! afterward, so nested reads attribute correctly. [`untracked`] pushes a
//! no-op marker so reads inside it subscribe nobody.
//!
//! Writes are eager: setting a [`Signal`] immediately re-runs every
//! subscribed effect, unless a [`batch`] is in progress, in which case
//! affected effects are deduplicated and run once when the outermost batch
//! ends. [`Derived`] is built from an effect that recomputes its closure
//! and writes the result into an internal signal only when the value
//! actually changed (`PartialEq`), which is what keeps the graph
//! glitch-free: a derivation that recomputes to an equal value does not
//! advance its revision and does not wake its own dependents.

mod effect;
mod signal;
mod slot;
mod tracked_array;

pub use effect::{
    batch, effect, effect_scope, flush_sync, on_scope_dispose, untracked, EffectHandle,
    EffectScope,
};
pub use signal::{cell, derived, signal, Derived, Signal};
pub use slot::{slot, Slot};
pub use tracked_array::{ReactiveSet, TrackedSlotArray};

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn effect_reruns_on_signal_write() {
        let count = signal(0);
        let runs = Rc::new(RefCell::new(Vec::new()));
        let runs_clone = runs.clone();
        let count_clone = count.clone();
        let _h = effect(move || {
            runs_clone.borrow_mut().push(count_clone.get());
        });
        assert_eq!(*runs.borrow(), vec![0]);
        count.set(1);
        assert_eq!(*runs.borrow(), vec![0, 1]);
        count.set(2);
        assert_eq!(*runs.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn derived_is_glitch_free_on_equal_recompute() {
        let source = signal(10);
        let source_clone = source.clone();
        let is_even = derived(move || source_clone.get() % 2 == 0);
        let runs = Rc::new(RefCell::new(0));
        let runs_clone = runs.clone();
        let _h = effect(move || {
            let _ = is_even.get();
            *runs_clone.borrow_mut() += 1;
        });
        assert_eq!(*runs.borrow(), 1);
        source.set(12); // still even -> derived value unchanged -> effect should not rerun
        assert_eq!(*runs.borrow(), 1);
        source.set(13); // now odd -> derived value changes -> effect reruns
        assert_eq!(*runs.borrow(), 2);
    }

    #[test]
    fn batch_coalesces_multiple_writes_into_one_run() {
        let a = signal(1);
        let b = signal(2);
        let runs = Rc::new(RefCell::new(0));
        let runs_clone = runs.clone();
        let (a2, b2) = (a.clone(), b.clone());
        let _h = effect(move || {
            let _ = (a2.get(), b2.get());
            *runs_clone.borrow_mut() += 1;
        });
        assert_eq!(*runs.borrow(), 1);
        batch(|| {
            a.set(10);
            b.set(20);
        });
        assert_eq!(*runs.borrow(), 2);
    }

    #[test]
    fn untracked_read_does_not_subscribe() {
        let a = signal(1);
        let runs = Rc::new(RefCell::new(0));
        let runs_clone = runs.clone();
        let a_clone = a.clone();
        let _h = effect(move || {
            let _ = untracked(|| a_clone.get());
            *runs_clone.borrow_mut() += 1;
        });
        assert_eq!(*runs.borrow(), 1);
        a.set(2);
        assert_eq!(*runs.borrow(), 1, "untracked read must not create a dependency");
    }

    #[test]
    fn scope_stop_disposes_child_effects() {
        let a = signal(0);
        let runs = Rc::new(RefCell::new(0));
        let scope = effect_scope();
        let runs_clone = runs.clone();
        let a_clone = a.clone();
        scope.run(|| {
            let _h = effect(move || {
                let _ = a_clone.get();
                *runs_clone.borrow_mut() += 1;
            });
        });
        assert_eq!(*runs.borrow(), 1);
        a.set(1);
        assert_eq!(*runs.borrow(), 2);
        scope.stop();
        a.set(2);
        assert_eq!(*runs.borrow(), 2, "effect must stop reacting once its scope is stopped");
    }

    #[test]
    fn on_scope_dispose_runs_lifo_on_stop() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let scope = effect_scope();
        let o1 = order.clone();
        let o2 = order.clone();
        scope.run(|| {
            on_scope_dispose(move || o1.borrow_mut().push(1));
            on_scope_dispose(move || o2.borrow_mut().push(2));
        });
        scope.stop();
        assert_eq!(*order.borrow(), vec![2, 1]);
    }
}
