//! Color and Style Inheritance
//!
//! Components can inherit colors from their parents. This module provides
//! utilities for walking up the component tree to find inherited values.
//!
//! Resolution order for fg/bg matches the compositor contract: an explicit
//! `fg`/`bg` on the node wins; otherwise the node's `variant`, if any, is
//! resolved through the registered [`crate::theme::ThemeResolver`]; only
//! then does fg fall back to the nearest ancestor with an explicit value
//! (bg never inherits — it defaults to transparent).

use crate::engine::arrays::{core, visual};
use crate::theme::resolve_registered_variant;
use crate::types::{Attr, Rgba};

/// Get the effective foreground color for a component, walking up the parent chain.
///
/// Returns the first non-terminal-default fg color found, falling back to
/// the node's resolved variant style, or TERMINAL_DEFAULT if neither applies.
pub fn get_inherited_fg(index: usize) -> Rgba {
    if let Some(variant) = visual::get_variant(index) {
        if visual::get_fg_color(index).is_terminal_default() {
            if let Some(style) = resolve_registered_variant(variant) {
                return style.fg;
            }
        }
    }

    let mut current = Some(index);

    while let Some(idx) = current {
        let fg = visual::get_fg_color(idx);
        if !fg.is_terminal_default() {
            return fg;
        }
        current = core::get_parent_index(idx);
    }

    Rgba::TERMINAL_DEFAULT
}

/// Get the effective background color for a component. Background does not
/// inherit from ancestors: an explicit `bg` wins, otherwise the node's
/// `variant` is resolved, otherwise the background is transparent.
pub fn get_inherited_bg(index: usize) -> Rgba {
    let bg = visual::get_bg_color(index);
    if !bg.is_terminal_default() {
        return bg;
    }

    if let Some(variant) = visual::get_variant(index) {
        if let Some(style) = resolve_registered_variant(variant) {
            return style.bg;
        }
    }

    Rgba::TERMINAL_DEFAULT
}

/// Get the effective border color for a component. Like background, border
/// color does not inherit: an explicit `border_color` wins, otherwise the
/// node's `variant` is resolved, otherwise terminal default.
pub fn get_effective_border_color(index: usize) -> Rgba {
    let color = visual::get_border_color(index);
    if !color.is_terminal_default() {
        return color;
    }

    if let Some(variant) = visual::get_variant(index) {
        if let Some(style) = resolve_registered_variant(variant) {
            return style.border;
        }
    }

    Rgba::TERMINAL_DEFAULT
}

/// Get the effective text attributes for a component: explicit attrs win,
/// otherwise fall back to the resolved variant's attrs, otherwise none.
pub fn get_effective_attrs(index: usize, own_attrs: Attr) -> Attr {
    if !own_attrs.is_empty() {
        return own_attrs;
    }

    if let Some(variant) = visual::get_variant(index) {
        if let Some(style) = resolve_registered_variant(variant) {
            return style.attrs;
        }
    }

    Attr::NONE
}

/// Get the effective opacity for a component, multiplying up the parent chain.
///
/// Returns the product of all opacities from the component to the root.
/// Opacity is stored as u8 (0-255) but returned as f32 (0.0-1.0).
pub fn get_effective_opacity(index: usize) -> f32 {
    let mut opacity = 1.0f32;
    let mut current = Some(index);

    while let Some(idx) = current {
        let op = visual::get_opacity(idx);
        // Convert u8 (0-255) to f32 (0.0-1.0)
        opacity *= (op as f32) / 255.0;
        current = core::get_parent_index(idx);
    }

    opacity.clamp(0.0, 1.0)
}

/// Apply opacity to a color's alpha channel.
pub fn apply_opacity(color: Rgba, opacity: f32) -> Rgba {
    if opacity >= 1.0 {
        return color;
    }
    if color.is_terminal_default() {
        return color;
    }

    Rgba::new(
        color.r as u8,
        color.g as u8,
        color.b as u8,
        (color.a as f32 * opacity).round() as u8,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};
    use crate::engine::arrays::core as core_arrays;
    use crate::theme::{clear_theme_resolver, set_theme_resolver, ThemeResolver, Variant, VariantStyle};
    use crate::types::ComponentType;
    use std::rc::Rc;

    fn setup() {
        reset_registry();
        clear_theme_resolver();
    }

    struct FixedTheme;

    impl ThemeResolver for FixedTheme {
        fn resolve_variant(&self, variant: Variant) -> VariantStyle {
            match variant {
                Variant::Error => VariantStyle {
                    fg: Rgba::WHITE,
                    bg: Rgba::rgb(200, 30, 30),
                    border: Rgba::rgb(200, 30, 30),
                    attrs: Attr::BOLD,
                },
                _ => VariantStyle {
                    fg: Rgba::GRAY,
                    bg: Rgba::TERMINAL_DEFAULT,
                    border: Rgba::GRAY,
                    attrs: Attr::NONE,
                },
            }
        }
    }

    #[test]
    fn test_inherited_fg_from_self() {
        setup();

        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        visual::set_fg_color(idx, Rgba::RED);

        assert_eq!(get_inherited_fg(idx), Rgba::RED);
    }

    #[test]
    fn test_inherited_fg_from_parent() {
        setup();

        let parent = allocate_index(None);
        core_arrays::set_component_type(parent, ComponentType::Box);
        visual::set_fg_color(parent, Rgba::GREEN);

        let child = allocate_index(None);
        core_arrays::set_component_type(child, ComponentType::Text);
        core_arrays::set_parent_index(child, Some(parent));
        // Child has no fg set (terminal default)

        assert_eq!(get_inherited_fg(child), Rgba::GREEN);
    }

    #[test]
    fn test_inherited_fg_default() {
        setup();

        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        // No fg color set

        assert_eq!(get_inherited_fg(idx), Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_variant_resolves_fg_bg_border_when_unset() {
        setup();
        set_theme_resolver(Rc::new(FixedTheme));

        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        visual::set_variant(idx, Some(Variant::Error));

        assert_eq!(get_inherited_fg(idx), Rgba::WHITE);
        assert_eq!(get_inherited_bg(idx), Rgba::rgb(200, 30, 30));
        assert_eq!(get_effective_border_color(idx), Rgba::rgb(200, 30, 30));

        clear_theme_resolver();
    }

    #[test]
    fn test_explicit_attribute_wins_over_variant() {
        setup();
        set_theme_resolver(Rc::new(FixedTheme));

        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        visual::set_variant(idx, Some(Variant::Error));
        visual::set_fg_color(idx, Rgba::BLUE);

        // Explicit fg wins over the variant's resolved fg.
        assert_eq!(get_inherited_fg(idx), Rgba::BLUE);

        clear_theme_resolver();
    }

    #[test]
    fn test_variant_bg_does_not_inherit_to_children() {
        setup();
        set_theme_resolver(Rc::new(FixedTheme));

        let parent = allocate_index(None);
        core_arrays::set_component_type(parent, ComponentType::Box);
        visual::set_variant(parent, Some(Variant::Error));

        let child = allocate_index(None);
        core_arrays::set_component_type(child, ComponentType::Box);
        core_arrays::set_parent_index(child, Some(parent));
        // Child has no bg and no variant of its own.

        assert_eq!(get_inherited_bg(child), Rgba::TERMINAL_DEFAULT);

        clear_theme_resolver();
    }

    #[test]
    fn test_effective_opacity() {
        setup();

        let parent = allocate_index(None);
        core_arrays::set_component_type(parent, ComponentType::Box);
        visual::set_opacity(parent, 128);  // 50% as u8

        let child = allocate_index(None);
        core_arrays::set_component_type(child, ComponentType::Box);
        core_arrays::set_parent_index(child, Some(parent));
        visual::set_opacity(child, 128);  // 50% as u8

        // (128/255) * (128/255) ~= 0.25
        assert!((get_effective_opacity(child) - 0.25).abs() < 0.02);
    }

    #[test]
    fn test_apply_opacity() {
        let color = Rgba::new(255, 0, 0, 255);
        let result = apply_opacity(color, 0.5);
        assert_eq!(result.a, 128);

        // Terminal default shouldn't change
        let default = Rgba::TERMINAL_DEFAULT;
        let result2 = apply_opacity(default, 0.5);
        assert_eq!(result2, Rgba::TERMINAL_DEFAULT);
    }
}
