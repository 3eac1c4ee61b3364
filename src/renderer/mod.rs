//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It doesn't understand components,
//! layout, or reactivity. It simply takes a filled FrameBuffer and outputs
//! optimized ANSI escape sequences to the terminal.
//!
//! # Rendering Modes
//!
//! - **Fullscreen** ([`DiffRenderer`]): Uses alternate screen buffer,
//!   differential rendering (only outputs changed cells)
//!
//! - **Inline** ([`InlineRenderer`]): Renders to normal buffer,
//!   clears and redraws each frame
//!
//! - **Append** ([`AppendRenderer`]): Two regions - frozen history
//!   above, active updating region below
//!
//! # Key Optimizations
//!
//! 1. **Differential rendering**: Only output cells that changed
//! 2. **Stateful rendering**: Track colors/attrs to skip redundant codes
//! 3. **Output batching**: Single syscall per frame
//! 4. **Synchronized output**: Flicker-free with terminal sync protocol

pub mod ansi;
pub mod append;
pub mod buffer;
pub mod diff;
pub mod inline;
pub mod output;

pub use append::AppendRenderer;
pub use buffer::{BorderColors, BorderSides, FrameBuffer};
pub use crate::layout::{char_width, string_width};
pub use crate::types::ClipRect;
pub use diff::DiffRenderer;
pub use inline::InlineRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
