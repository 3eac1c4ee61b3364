//! TUI Framework - Visual Arrays
//!
//! Paint-affecting properties:
//! - borderStyle / borderColor
//! - fgColor / bgColor
//! - opacity (0-255, composed with ancestors at paint time)
//! - zIndex (sibling paint/stacking order)
//! - variant (opaque tag resolved by an external theme resolver)
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained tracking.

use crate::reactive::TrackedSlotArray;
use crate::theme::Variant;
use crate::types::{BorderStyle, Rgba};

thread_local! {
    static BORDER_STYLE: TrackedSlotArray<BorderStyle> = TrackedSlotArray::new(Some(BorderStyle::None));
    static BORDER_COLOR: TrackedSlotArray<Rgba> = TrackedSlotArray::new(Some(Rgba::TERMINAL_DEFAULT));
    static FG_COLOR: TrackedSlotArray<Rgba> = TrackedSlotArray::new(Some(Rgba::TERMINAL_DEFAULT));
    static BG_COLOR: TrackedSlotArray<Rgba> = TrackedSlotArray::new(Some(Rgba::TERMINAL_DEFAULT));
    static OPACITY: TrackedSlotArray<u8> = TrackedSlotArray::new(Some(255));
    static Z_INDEX: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(0));
    static VARIANT: TrackedSlotArray<Option<Variant>> = TrackedSlotArray::new(Some(None));
}

pub fn ensure_capacity(index: usize) {
    BORDER_STYLE.with(|arr| { let _ = arr.peek(index); });
    BORDER_COLOR.with(|arr| { let _ = arr.peek(index); });
    FG_COLOR.with(|arr| { let _ = arr.peek(index); });
    BG_COLOR.with(|arr| { let _ = arr.peek(index); });
    OPACITY.with(|arr| { let _ = arr.peek(index); });
    Z_INDEX.with(|arr| { let _ = arr.peek(index); });
    VARIANT.with(|arr| { let _ = arr.peek(index); });
}

pub fn clear_at_index(index: usize) {
    BORDER_STYLE.with(|arr| arr.clear(index));
    BORDER_COLOR.with(|arr| arr.clear(index));
    FG_COLOR.with(|arr| arr.clear(index));
    BG_COLOR.with(|arr| arr.clear(index));
    OPACITY.with(|arr| arr.clear(index));
    Z_INDEX.with(|arr| arr.clear(index));
    VARIANT.with(|arr| arr.clear(index));
}

pub fn reset() {
    BORDER_STYLE.with(|arr| arr.clear_all());
    BORDER_COLOR.with(|arr| arr.clear_all());
    FG_COLOR.with(|arr| arr.clear_all());
    BG_COLOR.with(|arr| arr.clear_all());
    OPACITY.with(|arr| arr.clear_all());
    Z_INDEX.with(|arr| arr.clear_all());
    VARIANT.with(|arr| arr.clear_all());
}

// Border style

pub fn get_border_style(index: usize) -> BorderStyle {
    BORDER_STYLE.with(|arr| arr.get(index))
}

pub fn set_border_style(index: usize, value: BorderStyle) {
    BORDER_STYLE.with(|arr| arr.set_value(index, value));
}

pub fn set_border_style_getter<F>(index: usize, getter: F)
where
    F: Fn() -> BorderStyle + 'static,
{
    BORDER_STYLE.with(|arr| arr.set_getter(index, getter));
}

// Border color

pub fn get_border_color(index: usize) -> Rgba {
    BORDER_COLOR.with(|arr| arr.get(index))
}

pub fn set_border_color(index: usize, value: Rgba) {
    BORDER_COLOR.with(|arr| arr.set_value(index, value));
}

pub fn set_border_color_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Rgba + 'static,
{
    BORDER_COLOR.with(|arr| arr.set_getter(index, getter));
}

// Foreground color

pub fn get_fg_color(index: usize) -> Rgba {
    FG_COLOR.with(|arr| arr.get(index))
}

pub fn set_fg_color(index: usize, value: Rgba) {
    FG_COLOR.with(|arr| arr.set_value(index, value));
}

pub fn set_fg_color_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Rgba + 'static,
{
    FG_COLOR.with(|arr| arr.set_getter(index, getter));
}

// Background color

pub fn get_bg_color(index: usize) -> Rgba {
    BG_COLOR.with(|arr| arr.get(index))
}

pub fn set_bg_color(index: usize, value: Rgba) {
    BG_COLOR.with(|arr| arr.set_value(index, value));
}

pub fn set_bg_color_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Rgba + 'static,
{
    BG_COLOR.with(|arr| arr.set_getter(index, getter));
}

// Opacity (0-255)

pub fn get_opacity(index: usize) -> u8 {
    OPACITY.with(|arr| arr.get(index))
}

pub fn set_opacity(index: usize, value: u8) {
    OPACITY.with(|arr| arr.set_value(index, value));
}

pub fn set_opacity_getter<F>(index: usize, getter: F)
where
    F: Fn() -> u8 + 'static,
{
    OPACITY.with(|arr| arr.set_getter(index, getter));
}

// Z-index

pub fn get_z_index(index: usize) -> i32 {
    Z_INDEX.with(|arr| arr.get(index))
}

pub fn set_z_index(index: usize, value: i32) {
    Z_INDEX.with(|arr| arr.set_value(index, value));
}

pub fn set_z_index_getter<F>(index: usize, getter: F)
where
    F: Fn() -> i32 + 'static,
{
    Z_INDEX.with(|arr| arr.set_getter(index, getter));
}

// Variant (opaque theme tag)

pub fn get_variant(index: usize) -> Option<Variant> {
    VARIANT.with(|arr| arr.get(index))
}

pub fn set_variant(index: usize, value: Option<Variant>) {
    VARIANT.with(|arr| arr.set_value(index, value));
}

pub fn set_variant_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Option<Variant> + 'static,
{
    VARIANT.with(|arr| arr.set_getter(index, getter));
}
