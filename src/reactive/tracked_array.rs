//! Index-addressed reactive collections built on the graph: one column of
//! attribute values per node index ([`TrackedSlotArray`]), and a reactive
//! membership set for "which indices currently exist"
//! ([`ReactiveSet`]).

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;

use super::signal::Signal;
use super::slot::{slot, Slot};

/// One [`Slot`] per node index, growing on demand. Each index is tracked
/// independently: a derivation that reads index 3 does not re-run when
/// index 7 changes.
pub struct TrackedSlotArray<T: Clone + PartialEq + 'static> {
    default: T,
    cells: RefCell<Vec<Option<Slot<T>>>>,
}

impl<T: Clone + PartialEq + 'static> TrackedSlotArray<T> {
    pub fn new(default: Option<T>) -> Self {
        let default = default.expect("TrackedSlotArray::new requires a default value");
        TrackedSlotArray { default, cells: RefCell::new(Vec::new()) }
    }

    fn ensure(&self, index: usize) {
        let mut cells = self.cells.borrow_mut();
        if cells.len() <= index {
            cells.resize_with(index + 1, || None);
        }
        if cells[index].is_none() {
            cells[index] = Some(slot(Some(self.default.clone())));
        }
    }

    /// Ensure storage exists for `index` without reading it (so no
    /// dependency is created).
    pub fn peek(&self, index: usize) -> T {
        self.ensure(index);
        let cells = self.cells.borrow();
        cells[index].as_ref().unwrap().peek()
    }

    pub fn get(&self, index: usize) -> T {
        self.ensure(index);
        let cells = self.cells.borrow();
        cells[index].as_ref().unwrap().get()
    }

    pub fn set_value(&self, index: usize, value: T) {
        self.ensure(index);
        let cells = self.cells.borrow();
        cells[index].as_ref().unwrap().set_value(value);
    }

    pub fn set_signal(&self, index: usize, sig: Signal<T>) {
        self.ensure(index);
        let cells = self.cells.borrow();
        cells[index].as_ref().unwrap().set_signal(sig);
    }

    pub fn set_getter<F>(&self, index: usize, getter: F)
    where
        F: Fn() -> T + 'static,
    {
        self.ensure(index);
        let cells = self.cells.borrow();
        cells[index].as_ref().unwrap().set_getter(getter);
    }

    /// Reset the cell at `index` back to its default, dropping whatever
    /// signal/getter it was bound to, so the slot is clean if this index
    /// is reused by a future allocation.
    pub fn clear(&self, index: usize) {
        let mut cells = self.cells.borrow_mut();
        if let Some(Some(_)) = cells.get(index) {
            cells[index] = Some(slot(Some(self.default.clone())));
        }
    }

    pub fn clear_all(&self) {
        self.cells.borrow_mut().clear();
    }
}

/// A reactive `HashSet`. Membership changes (`insert`/`remove`/`clear`)
/// wake readers of `iter`/`contains`/`len`/`is_empty`, at the granularity
/// of the whole set rather than per-element — correct for the registry's
/// "allocated indices" set, whose consumers care about membership as a
/// whole, not about any one particular index.
pub struct ReactiveSet<T: Eq + Hash + Clone + 'static> {
    set: RefCell<HashSet<T>>,
    revision: Signal<u64>,
}

impl<T: Eq + Hash + Clone + 'static> ReactiveSet<T> {
    pub fn new() -> Self {
        ReactiveSet { set: RefCell::new(HashSet::new()), revision: Signal::new(0) }
    }

    pub fn insert(&self, value: T) -> bool {
        let inserted = self.set.borrow_mut().insert(value);
        if inserted {
            self.bump();
        }
        inserted
    }

    pub fn remove(&self, value: &T) -> bool {
        let removed = self.set.borrow_mut().remove(value);
        if removed {
            self.bump();
        }
        removed
    }

    pub fn contains(&self, value: &T) -> bool {
        self.track();
        self.set.borrow().contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.track();
        self.set.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.track();
        self.set.borrow().len()
    }

    pub fn iter(&self) -> Vec<T> {
        self.track();
        self.set.borrow().iter().cloned().collect()
    }

    pub fn clear(&self) {
        let had_any = !self.set.borrow().is_empty();
        self.set.borrow_mut().clear();
        if had_any {
            self.bump();
        }
    }

    fn bump(&self) {
        let next = self.revision.peek() + 1;
        self.revision.set(next);
    }

    fn track(&self) {
        let _ = self.revision.get();
    }
}

impl<T: Eq + Hash + Clone + 'static> Default for ReactiveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::effect;
    use std::cell::RefCell as StdRefCell;
    use std::rc::Rc;

    #[test]
    fn tracked_slot_array_defaults_and_isolation() {
        let arr: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(0));
        assert_eq!(arr.get(0), 0);
        arr.set_value(3, 42);
        assert_eq!(arr.get(3), 42);
        assert_eq!(arr.get(0), 0, "unrelated index must not be affected");
    }

    #[test]
    fn tracked_slot_array_clear_resets_to_default() {
        let arr: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(7));
        arr.set_value(0, 100);
        arr.clear(0);
        assert_eq!(arr.get(0), 7);
    }

    #[test]
    fn reactive_set_wakes_effect_on_membership_change() {
        let set: Rc<ReactiveSet<usize>> = Rc::new(ReactiveSet::new());
        let runs = Rc::new(StdRefCell::new(0));
        let set_clone = set.clone();
        let runs_clone = runs.clone();
        let _h = effect(move || {
            let _ = set_clone.len();
            *runs_clone.borrow_mut() += 1;
        });
        assert_eq!(*runs.borrow(), 1);
        set.insert(1);
        assert_eq!(*runs.borrow(), 2);
        set.insert(1); // already present -> no bump
        assert_eq!(*runs.borrow(), 2);
        set.remove(&1);
        assert_eq!(*runs.borrow(), 3);
    }
}
