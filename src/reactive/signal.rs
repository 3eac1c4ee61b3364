//! [`Signal`] (the mutable reactive cell) and [`Derived`] (a cached, lazily
//! glitch-free computation built from one).

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use super::effect::{effect, schedule, track, EffectHandle, EffectNode, Observed};

struct SignalInner<T> {
    value: T,
    subscribers: Vec<Weak<EffectNode>>,
}

/// A mutable reactive value. Reading it inside an [`effect`] or
/// [`Derived`] subscribes that computation; writing it re-runs every
/// current subscriber (immediately, unless inside a [`batch`]).
///
/// [`effect`]: super::effect
/// [`batch`]: super::batch
pub struct Signal<T: Clone + PartialEq + 'static> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T: Clone + PartialEq + 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Signal { inner: self.inner.clone() }
    }
}

impl<T: Clone + PartialEq + 'static> Observed for Signal<T> {
    fn remove_subscriber(&self, id: usize) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|w| w.upgrade().map(|n| n.id) != Some(id));
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Signal { inner: Rc::new(RefCell::new(SignalInner { value, subscribers: Vec::new() })) }
    }

    /// Read the current value, subscribing the currently-running effect or
    /// derivation (if any) to future changes.
    pub fn get(&self) -> T {
        let erased: Rc<dyn Observed> = Rc::new(self.clone());
        let inner = self.inner.clone();
        track(&erased, move |node| {
            inner.borrow_mut().subscribers.push(Rc::downgrade(&node));
        });
        self.inner.borrow().value.clone()
    }

    /// Read the current value without subscribing anything.
    pub fn peek(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Write a new value and wake every subscriber, unconditionally (a cell
    /// is not equality-gated the way a [`Derived`] recompute is).
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Write a new value only if it differs from the current one, used
    /// internally by [`Derived`] to stay glitch-free; useful on its own for
    /// slot-like sources that should not wake readers on a no-op write.
    pub fn set_if_changed(&self, value: T) {
        let changed = self.inner.borrow().value != value;
        if changed {
            self.set(value);
        }
    }

    fn notify(&self) {
        let subs: Vec<Rc<EffectNode>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(|w| w.upgrade()).collect()
        };
        for node in subs {
            schedule(node);
        }
    }
}

/// Create a [`Signal`]. `cell` and `signal` name the same constructor;
/// both spellings show up across this crate's call sites.
pub fn signal<T: Clone + PartialEq + 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

/// Alias for [`signal`].
pub fn cell<T: Clone + PartialEq + 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

/// A cached computation that recomputes whenever a signal it reads
/// changes, and only wakes its own subscribers when the recomputed value
/// actually differs from the last one (glitch-free).
///
/// The type carries its building closure's type, `F`, purely so it can
/// appear as a concrete return type (`-> Derived<T, impl Fn() -> T>`) the
/// way this crate's pipeline functions do; it plays no role at runtime.
pub struct Derived<T: Clone + PartialEq + 'static, F: Fn() -> T + 'static> {
    signal: Signal<T>,
    _effect: EffectHandle,
    _marker: PhantomData<F>,
}

impl<T: Clone + PartialEq + 'static, F: Fn() -> T + 'static> Clone for Derived<T, F> {
    fn clone(&self) -> Self {
        Derived { signal: self.signal.clone(), _effect: self._effect.clone(), _marker: PhantomData }
    }
}

impl<T: Clone + PartialEq + 'static, F: Fn() -> T + 'static> Derived<T, F> {
    pub fn get(&self) -> T {
        self.signal.get()
    }

    pub fn peek(&self) -> T {
        self.signal.peek()
    }
}

/// Build a [`Derived`] from `f`. `f` runs once immediately to seed the
/// cache and again every time a signal it reads changes; a recompute that
/// produces an equal value does not advance the derivation's revision, so
/// anything depending on the derivation does not re-run either.
pub fn derived<T, F>(f: F) -> Derived<T, F>
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> T + 'static,
{
    let sig = Signal::new(f());
    let sig_for_effect = sig.clone();
    let handle = effect(move || {
        let value = f();
        sig_for_effect.set_if_changed(value);
    });
    Derived { signal: sig, _effect: handle, _marker: PhantomData }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_if_changed_skips_equal_writes() {
        let s = Signal::new(1);
        s.set_if_changed(1);
        assert_eq!(s.peek(), 1);
        s.set_if_changed(2);
        assert_eq!(s.peek(), 2);
    }

    #[test]
    fn peek_does_not_panic_without_a_tracking_frame() {
        let s = Signal::new("x".to_string());
        assert_eq!(s.peek(), "x");
    }
}
