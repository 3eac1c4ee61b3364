//! [`Slot`]: a single reactive property that can be bound to a plain value,
//! a [`Signal`], or an arbitrary getter, and rebound later without the
//! reader having to know which kind it currently is.

use std::cell::RefCell;
use std::rc::Rc;

use super::effect::{effect, EffectHandle};
use super::signal::Signal;

enum SlotSource<T: Clone + PartialEq + 'static> {
    Static(T),
    Signal(Signal<T>),
    Getter(Rc<dyn Fn() -> T>),
}

/// A rebindable reactive property cell. `FlexNode`'s layout fields and
/// every parallel-array column are built from these: reading one inside an
/// effect or derivation tracks through to whatever is currently bound,
/// Signal or Getter included.
pub struct Slot<T: Clone + PartialEq + 'static> {
    source: RefCell<SlotSource<T>>,
    /// Keeps the forwarding effect alive when bound to a Signal or Getter
    /// (see `bind_forwarding`); `None` when bound to a plain `Static` value.
    forward: RefCell<Option<EffectHandle>>,
    /// The forwarded value, exposed as a `Signal` so `get()` tracks at the
    /// same per-slot granularity regardless of the current source kind.
    cache: Signal<T>,
}

/// Create a [`Slot`] with an initial value.
pub fn slot<T: Clone + PartialEq + 'static>(initial: Option<T>) -> Slot<T> {
    let value = initial.expect("slot() requires an initial value");
    Slot {
        cache: Signal::new(value.clone()),
        source: RefCell::new(SlotSource::Static(value)),
        forward: RefCell::new(None),
    }
}

impl<T: Clone + PartialEq + 'static> Slot<T> {
    pub fn get(&self) -> T {
        self.cache.get()
    }

    pub fn peek(&self) -> T {
        self.cache.peek()
    }

    pub fn set_value(&self, value: T) {
        *self.forward.borrow_mut() = None;
        *self.source.borrow_mut() = SlotSource::Static(value.clone());
        self.cache.set_if_changed(value);
    }

    pub fn set_signal(&self, sig: Signal<T>) {
        let sig_for_forward = sig.clone();
        *self.source.borrow_mut() = SlotSource::Signal(sig);
        self.bind_forwarding(move || sig_for_forward.get());
    }

    /// Bind a read-only getter: its return value is re-derived whenever a
    /// signal it reads changes, just like [`Slot::set_signal`], but the
    /// source is an arbitrary closure rather than a `Signal` handle.
    pub fn set_signal_readonly<F>(&self, getter: F)
    where
        F: Fn() -> T + 'static,
    {
        let getter = Rc::new(getter);
        *self.source.borrow_mut() = SlotSource::Getter(getter.clone());
        self.bind_forwarding(move || getter());
    }

    /// Alias for [`Slot::set_signal_readonly`] under the name used by the
    /// array-column bindings.
    pub fn set_getter<F>(&self, getter: F)
    where
        F: Fn() -> T + 'static,
    {
        self.set_signal_readonly(getter);
    }

    fn bind_forwarding(&self, read: impl Fn() -> T + 'static) {
        let cache = self.cache.clone();
        let handle = effect(move || {
            let value = read();
            cache.set_if_changed(value);
        });
        *self.forward.borrow_mut() = Some(handle);
    }
}
