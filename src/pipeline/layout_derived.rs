//! Layout Derived - Reactive layout computation.
//!
//! Creates a Derived that computes layout whenever:
//! - Terminal size changes
//! - Render mode changes
//! - Any FlexNode slot changes
//! - Components are added/removed

use crate::reactive::{derived, Derived};

use crate::layout::{compute_layout, ComputedLayout};
use super::terminal::{terminal_width_signal, terminal_height_signal, render_mode_signal, RenderMode};

/// Create the layout derived.
///
/// Returns a Derived that computes layout and automatically re-runs when
/// any dependency changes (terminal size, render mode, FlexNode slots, etc.)
pub fn create_layout_derived() -> Derived<ComputedLayout, impl Fn() -> ComputedLayout> {
    let tw_signal = terminal_width_signal();
    let th_signal = terminal_height_signal();
    let mode_signal = render_mode_signal();

    derived(move || {
        // Read terminal dimensions (creates reactive dependency)
        let tw = tw_signal.get();
        let th = th_signal.get();

        // Read render mode (creates reactive dependency)
        let mode = mode_signal.get();

        // Constrain height only in fullscreen mode
        let constrain_height = mode == RenderMode::Fullscreen;

        // Compute layout using Taffy
        // Note: compute_layout internally reads from FlexNode slots,
        // which creates dependencies on those slots via the reactive system.
        compute_layout(tw, th, constrain_height)
    })
}

// =============================================================================
// Tests
// =============================================================================
