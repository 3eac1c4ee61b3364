//! Variant resolution: the contract between the engine and a host
//! application's theme.
//!
//! The engine ships no color palettes or theme catalogs of its own — those
//! are an application concern. What it does define is the *shape* of the
//! collaboration: a fixed set of semantic [`Variant`]s a component can ask
//! to be styled as, and a [`ThemeResolver`] the host implements to turn one
//! into concrete colors and attributes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive::{derived, Derived};
use crate::types::{Attr, Rgba};

/// Semantic variants a component can request styling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    Primary,
    Secondary,
    Tertiary,
    Accent,
    Success,
    Warning,
    Error,
    Info,
    Muted,
    Surface,
    Elevated,
    Ghost,
    Outline,
}

impl Variant {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "tertiary" => Some(Self::Tertiary),
            "accent" => Some(Self::Accent),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            "muted" => Some(Self::Muted),
            "surface" => Some(Self::Surface),
            "elevated" => Some(Self::Elevated),
            "ghost" => Some(Self::Ghost),
            "outline" => Some(Self::Outline),
            _ => None,
        }
    }

    pub const fn all() -> &'static [Variant] {
        &[
            Self::Default,
            Self::Primary,
            Self::Secondary,
            Self::Tertiary,
            Self::Accent,
            Self::Success,
            Self::Warning,
            Self::Error,
            Self::Info,
            Self::Muted,
            Self::Surface,
            Self::Elevated,
            Self::Ghost,
            Self::Outline,
        ]
    }
}

/// A variant resolved to concrete paint values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantStyle {
    pub fg: Rgba,
    pub bg: Rgba,
    pub border: Rgba,
    pub attrs: Attr,
}

/// Implemented by a host application's theme to answer "what does this
/// variant look like". The engine never constructs one itself — it only
/// calls through whatever `ThemeResolver` the host passes in, which keeps
/// concrete palettes entirely out of the engine's scope.
pub trait ThemeResolver {
    fn resolve_variant(&self, variant: Variant) -> VariantStyle;
}

/// Resolve `variant` through `theme` once (non-reactive read).
pub fn get_variant_style(variant: Variant, theme: &dyn ThemeResolver) -> VariantStyle {
    theme.resolve_variant(variant)
}

/// Build a [`Derived`] that re-resolves `variant` whenever a signal the
/// resolver reads internally changes. `resolve` is typically a closure
/// that clones a `Rc<dyn ThemeResolver>` and calls `resolve_variant`; the
/// reactivity comes entirely from what that closure reads, not from this
/// function.
pub fn variant_style<F>(resolve: F) -> Derived<VariantStyle, impl Fn() -> VariantStyle>
where
    F: Fn() -> VariantStyle + 'static,
{
    derived(resolve)
}

thread_local! {
    // The host's resolver, registered once at mount time. Process-wide,
    // like the terminal size and render mode in `pipeline::terminal` —
    // there is exactly one theme active at a time.
    static THEME_RESOLVER: RefCell<Option<Rc<dyn ThemeResolver>>> = RefCell::new(None);
}

/// Register the host's theme resolver. The compositor calls through this
/// to resolve a node's `variant` attribute when no explicit style
/// attribute overrides it.
pub fn set_theme_resolver(resolver: Rc<dyn ThemeResolver>) {
    THEME_RESOLVER.with(|r| *r.borrow_mut() = Some(resolver));
}

/// Clear the registered resolver.
pub fn clear_theme_resolver() {
    THEME_RESOLVER.with(|r| *r.borrow_mut() = None);
}

/// Resolve `variant` through the registered resolver, if any.
pub fn resolve_registered_variant(variant: Variant) -> Option<VariantStyle> {
    THEME_RESOLVER.with(|r| r.borrow().as_ref().map(|resolver| resolver.resolve_variant(variant)))
}

#[cfg(test)]
mod tests {
    use super::*;

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
                    fg: Rgba::WHITE,
                    bg: Rgba::BLACK,
                    border: Rgba::BLACK,
                    attrs: Attr::NONE,
                },
            }
        }
    }

    #[test]
    fn variant_from_str_roundtrips_all_variants() {
        for v in Variant::all() {
            let name = format!("{:?}", v).to_lowercase();
            assert_eq!(Variant::from_str(&name), Some(*v));
        }
        assert_eq!(Variant::from_str("not-a-variant"), None);
    }

    #[test]
    fn get_variant_style_delegates_to_resolver() {
        let theme = FixedTheme;
        let style = get_variant_style(Variant::Error, &theme);
        assert_eq!(style.bg, Rgba::rgb(200, 30, 30));
        assert!(style.attrs.contains(Attr::BOLD));
    }

    #[test]
    fn variant_style_is_reactive_over_the_resolve_closure() {
        use crate::reactive::signal;
        let current = signal(Variant::Default);
        let current_clone = current.clone();
        let theme = FixedTheme;
        let style = variant_style(move || theme.resolve_variant(current_clone.get()));
        assert_eq!(style.get().bg, Rgba::BLACK);
        current.set(Variant::Error);
        assert_eq!(style.get().bg, Rgba::rgb(200, 30, 30));
    }

    #[test]
    fn registered_resolver_round_trips() {
        clear_theme_resolver();
        assert_eq!(resolve_registered_variant(Variant::Error), None);

        set_theme_resolver(Rc::new(FixedTheme));
        let style = resolve_registered_variant(Variant::Error).unwrap();
        assert_eq!(style.bg, Rgba::rgb(200, 30, 30));

        clear_theme_resolver();
        assert_eq!(resolve_registered_variant(Variant::Error), None);
    }
}
