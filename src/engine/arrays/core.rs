//! TUI Framework - Core Arrays
//!
//! Structural properties every node carries regardless of kind:
//! - componentType: what kind of node this is (box, text, ...)
//! - parentIndex: the index of the containing node, if any
//! - visible: whether the node participates in layout/paint at all
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained tracking.

use crate::reactive::{Signal, TrackedSlotArray};
use crate::types::ComponentType;

thread_local! {
    static COMPONENT_TYPE: TrackedSlotArray<ComponentType> = TrackedSlotArray::new(Some(ComponentType::None));
    static PARENT_INDEX: TrackedSlotArray<Option<usize>> = TrackedSlotArray::new(Some(None));
    static VISIBLE: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(true));
}

pub fn ensure_capacity(index: usize) {
    COMPONENT_TYPE.with(|arr| { let _ = arr.peek(index); });
    PARENT_INDEX.with(|arr| { let _ = arr.peek(index); });
    VISIBLE.with(|arr| { let _ = arr.peek(index); });
}

pub fn clear_at_index(index: usize) {
    COMPONENT_TYPE.with(|arr| arr.clear(index));
    PARENT_INDEX.with(|arr| arr.clear(index));
    VISIBLE.with(|arr| arr.clear(index));
}

pub fn reset() {
    COMPONENT_TYPE.with(|arr| arr.clear_all());
    PARENT_INDEX.with(|arr| arr.clear_all());
    VISIBLE.with(|arr| arr.clear_all());
}

// Component type

pub fn get_component_type(index: usize) -> ComponentType {
    COMPONENT_TYPE.with(|arr| arr.get(index))
}

pub fn set_component_type(index: usize, value: ComponentType) {
    COMPONENT_TYPE.with(|arr| arr.set_value(index, value));
}

// Parent index

pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.get(index))
}

pub fn set_parent_index(index: usize, parent: Option<usize>) {
    PARENT_INDEX.with(|arr| arr.set_value(index, parent));
}

// Visibility

pub fn get_visible(index: usize) -> bool {
    VISIBLE.with(|arr| arr.get(index))
}

pub fn set_visible(index: usize, value: bool) {
    VISIBLE.with(|arr| arr.set_value(index, value));
}

pub fn set_visible_signal(index: usize, sig: Signal<bool>) {
    VISIBLE.with(|arr| arr.set_signal(index, sig));
}

pub fn set_visible_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    VISIBLE.with(|arr| arr.set_getter(index, getter));
}
