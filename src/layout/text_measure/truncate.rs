//! Grapheme-safe text truncation.

use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;

const ELLIPSIS: char = '…';

/// Truncate text to fit within `max_width` cells, appending `…` when cut.
///
/// Truncation breaks at grapheme boundaries, never splitting a multi-codepoint
/// cluster. If `max_width` is too small to fit even the ellipsis, returns an
/// empty string.
pub fn truncate_text(text: &str, max_width: u16) -> String {
    let total = grapheme_width_sum(text);
    if total <= max_width {
        return text.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let ellipsis_width = grapheme_width(&ELLIPSIS.to_string());
    if max_width <= ellipsis_width {
        return String::new();
    }

    let budget = max_width - ellipsis_width;
    let mut result = String::new();
    let mut width = 0u16;

    for grapheme in text.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if width + gw > budget {
            break;
        }
        result.push_str(grapheme);
        width += gw;
    }

    result.push(ELLIPSIS);
    result
}

fn grapheme_width_sum(text: &str) -> u16 {
    text.graphemes(true)
        .fold(0u16, |acc, g| acc.saturating_add(grapheme_width(g)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_unchanged() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello", 5), "hello");
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_text("hello world", 8), "hello w…");
    }

    #[test]
    fn width_zero() {
        assert_eq!(truncate_text("hello", 0), "");
    }

    #[test]
    fn width_too_small_for_ellipsis() {
        assert_eq!(truncate_text("hello", 1), "…");
    }

    #[test]
    fn cjk_truncation() {
        // "你好世界" is 8 cells wide; budget 5 → ellipsis(1) leaves 4 cells = 2 chars.
        assert_eq!(truncate_text("你好世界", 5), "你好…");
    }

    #[test]
    fn empty_input() {
        assert_eq!(truncate_text("", 5), "");
    }

    #[test]
    fn does_not_split_grapheme_cluster() {
        let family = "👨\u{200D}👩\u{200D}👧\u{200D}👦tail";
        let truncated = truncate_text(family, 3);
        assert!(truncated.ends_with('…'));
        assert!(!truncated.contains("tail"));
    }
}
