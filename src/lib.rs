//! # reactive terminal UI engine
//!
//! A reactive rendering engine for terminal UIs, built around an in-crate
//! fine-grained reactive graph (signals, derivations, effects) rather than a
//! virtual-DOM diff.
//!
//! ## Architecture
//!
//! Components are indices into columnar parallel arrays rather than objects.
//! Each array cell is a reactive `Slot` that can be bound to signals,
//! getters, or static values.
//!
//! The rendering pipeline is purely derived-based:
//! ```text
//! Component Tree → FlexNode Slots → layoutDerived → frameBufferDerived → render effect
//! ```
//!
//! ## Modules
//!
//! - [`reactive`] - Signals, derivations, effects, scopes
//! - [`types`] - Core types (Dimension, RGBA, ComponentType, etc.)
//! - [`engine`] - Component registry, FlexNode, parallel arrays
//! - [`layout`] - Taffy layout engine for flexbox computation
//! - [`renderer`] - Terminal renderer (ANSI output, diff rendering)
//! - [`errors`] - Error taxonomy and observability hooks

pub mod engine;
pub mod errors;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod reactive;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    allocate_index, create_flex_node, destroy_flex_node, get_allocated_indices,
    get_current_parent_index, get_flex_node, get_id, get_index, is_allocated, on_destroy,
    pop_parent_context, push_parent_context, release_index, reset_registry, FlexNode,
};

pub use layout::{
    compute_layout, string_width, measure_text_height,
    truncate_text, wrap_text, ComputedLayout,
};

pub use renderer::{
    AppendRenderer, ClipRect, DiffRenderer, FrameBuffer, InlineRenderer, OutputBuffer,
};

pub use pipeline::{
    create_frame_buffer_derived, create_layout_derived, mount, unmount,
    render_mode, set_render_mode, set_terminal_size, terminal_height, terminal_width,
    FrameBufferResult, HitRegion, MountHandle, RenderMode,
};

pub use primitives::{
    box_primitive, each, show, text, when, BoxProps, TextProps, PropValue, Cleanup,
};

pub use reactive::{
    batch, cell, derived, effect, effect_scope, flush_sync, on_scope_dispose, signal, slot,
    untracked, Derived, EffectHandle, EffectScope, ReactiveSet, Signal, Slot, TrackedSlotArray,
};

pub use errors::{EngineError, Observability, ObservabilityEvent, StderrObservability};

pub use state::{
    // Focus
    focus, focus_first, focus_last, focus_next, focus_previous, blur,
    get_focused_index, has_focus, is_focused, get_focusable_indices,
    register_callbacks, FocusCallbacks,
    push_focus_trap, pop_focus_trap, is_focus_trapped, get_focus_trap_container,
    save_focus_to_history, restore_focus_from_history,
    reset_focus_state,
    // Keyboard
    KeyboardEvent, KeyState, Modifiers, KeyHandler,
    dispatch as dispatch_keyboard, dispatch_focused,
    on as on_keyboard, on_key, on_keys, on_focused,
    last_event, last_key, cleanup_index, reset_keyboard_state,
};

pub use theme::{
    // Color representation
    ThemeColor,
    // Variants
    clear_theme_resolver, get_variant_style, resolve_registered_variant, set_theme_resolver,
    variant_style, ThemeResolver, Variant, VariantStyle,
};
