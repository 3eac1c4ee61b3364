//! Clipboard Module - Text copy/paste support
//!
//! Provides clipboard operations for input components with an internal buffer fallback.
//!
//! # Features
//!
//! - Copy text to clipboard
//! - Paste text from clipboard
//! - Cut (copy + return for deletion)
//! - Internal buffer fallback (no external dependencies)
//!
//! # Example
//!
//! ```ignore
//! use ratui_engine::state::clipboard;
//!
//! // Copy text
//! clipboard::copy("Hello, World!");
//!
//! // Paste text
//! if let Some(text) = clipboard::paste() {
//!     println!("Pasted: {}", text);
//! }
//!
//! // Cut (returns text for deletion by caller)
//! if let Some(text) = clipboard::cut("Selected text") {
//!     // Text is now on clipboard
//!     // Caller should delete the original
//! }
//! ```

use std::cell::RefCell;

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    /// Internal clipboard buffer.
    /// Used as fallback when system clipboard is unavailable.
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = RefCell::new(None);
}

// =============================================================================
// Public API
// =============================================================================

/// Copy text to clipboard.
///
/// Stores text in internal buffer for later paste operations.
/// Empty strings are ignored (clipboard not modified).
pub fn copy(text: &str) {
    if text.is_empty() {
        return;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
}

/// Paste text from clipboard.
///
/// Returns the most recently copied text, or None if clipboard is empty.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| {
        buf.borrow().clone()
    })
}

/// Cut text: copy to clipboard and return for deletion.
///
/// Convenience function that copies text to clipboard and returns it.
/// The caller is responsible for deleting the original text.
/// Returns None if text is empty.
pub fn cut(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    copy(text);
    Some(text.to_string())
}

/// Clear the clipboard.
pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

/// Check if clipboard has content.
pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| {
        buf.borrow().is_some()
    })
}

/// Get clipboard content length.
pub fn content_length() -> usize {
    CLIPBOARD_BUFFER.with(|buf| {
        buf.borrow().as_ref().map(|s| s.len()).unwrap_or(0)
    })
}

// =============================================================================
// Tests
// =============================================================================
