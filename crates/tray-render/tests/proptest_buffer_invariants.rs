//! Property-based invariant tests for buffer text writes and flag styling.
//!
//! 1. `set_string` never writes outside `[x, x + max_width)` or the buffer
//! 2. The reported width matches the cells actually touched
//! 3. `apply_flags` never styles cells outside the given rect

use proptest::prelude::*;
use tray_core::geometry::Rect;
use tray_render::buffer::Buffer;
use tray_render::cell::CellFlags;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            1 => Just('寿'),
            1 => Just('\u{0301}'),
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn set_string_stays_in_bounds(
        width in 1u16..30,
        x in 0u16..35,
        max_width in 0u16..30,
        text in text_strategy(),
    ) {
        let mut buf = Buffer::new(width, 1);
        let written = buf.set_string(x, 0, &text, CellFlags::BOLD, max_width);
        prop_assert!(written <= max_width);
        let limit = x.saturating_add(max_width).min(width);
        for col in 0..width {
            let touched = buf.get(col, 0).is_some_and(|c| !c.is_empty());
            if touched {
                prop_assert!(col >= x && col < limit, "col {col} outside [{x}, {limit})");
            }
        }
        let touched = (0..width).filter(|&c| buf.get(c, 0).is_some_and(|c| !c.is_empty())).count();
        prop_assert_eq!(touched, written as usize);
    }

    #[test]
    fn apply_flags_is_contained(
        rx in 0u16..20, ry in 0u16..20, rw in 0u16..20, rh in 0u16..20,
        px in 0u16..20, py in 0u16..20,
    ) {
        let mut buf = Buffer::new(20, 20);
        let rect = Rect::new(rx, ry, rw, rh);
        buf.apply_flags(rect, CellFlags::REVERSE);
        let styled = buf
            .get(px, py)
            .is_some_and(|c| c.flags.contains(CellFlags::REVERSE));
        prop_assert_eq!(styled, rect.contains(px, py));
    }
}
