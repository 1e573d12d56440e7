//! Deriving the dragged item's client and page positions.

use dragline_core::math::Position;

use crate::types::{CurrentDrag, InitialDrag, ItemPositions, Viewport};

/// Positions after the pointer moved to `selection` (client coordinates).
///
/// Page positions also account for how far the window scrolled since lift.
pub fn positions_for_client(
    initial: &InitialDrag,
    selection: Position,
    viewport: &Viewport,
    should_animate: bool,
) -> CurrentDrag {
    let client_offset = selection - initial.client.selection;
    let client = ItemPositions {
        selection,
        border_box_center: initial.client.border_box_center + client_offset,
        offset: client_offset,
    };

    let page_offset = client_offset + viewport.scroll.diff.value;
    let page = ItemPositions {
        selection: initial.page.selection + page_offset,
        border_box_center: initial.page.border_box_center + page_offset,
        offset: page_offset,
    };

    CurrentDrag {
        client,
        page,
        should_animate,
    }
}

/// Positions that put the item's border-box center at `page_center`.
pub fn positions_for_page_center(
    initial: &InitialDrag,
    page_center: Position,
    viewport: &Viewport,
    should_animate: bool,
) -> CurrentDrag {
    let page_offset = page_center - initial.page.border_box_center;
    let client_offset = page_offset - viewport.scroll.diff.value;
    positions_for_client(
        initial,
        initial.client.selection + client_offset,
        viewport,
        should_animate,
    )
}
