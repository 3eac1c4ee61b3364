//! Text measurement: widths, wrapping, truncation, and ANSI handling.

mod ansi;
mod truncate;
mod width;
mod wrap;

pub use ansi::strip_ansi;
pub use truncate::truncate_text;
pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{measure_text_height, wrap_text};
