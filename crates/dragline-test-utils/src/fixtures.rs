//! Measured lists ready to register with a context.

use dragline_core::geometry::{Axis, BoxModel, Rect, Spacing};
use dragline_core::math::{Position, Vec2};
use dragline_dnd::{
    AutoScrollMode, DndResult, DragDropContext, DraggableDescriptor, DraggableDimension,
    DroppableDescriptor, DroppableDimension, ItemPositions, LiftRequest, ScrollDetails,
    ScrollFrame, TypeId, Viewport,
};

pub const ITEM_HEIGHT: f32 = 40.0;
pub const ITEM_WIDTH: f32 = 200.0;

/// An 800x600 window at the top of a document that can scroll 1000px down.
pub fn viewport() -> Viewport {
    Viewport::new(Vec2::new(800.0, 600.0), Vec2::ZERO, Vec2::new(0.0, 1000.0))
}

/// A vertical list of equally sized items.
#[derive(Debug, Clone)]
pub struct ListFixture {
    pub droppable: DroppableDimension,
    pub items: Vec<DraggableDimension>,
    pub viewport: Viewport,
}

impl ListFixture {
    /// `count` items named `{id}-{index}` stacked from the top left corner.
    pub fn vertical(id: &str, count: usize) -> Self {
        Self::vertical_at(id, count, 0.0)
    }

    /// Same as [`vertical`](Self::vertical) with the list's left edge at `x`.
    pub fn vertical_at(id: &str, count: usize, x: f32) -> Self {
        let droppable = DroppableDimension::new(
            DroppableDescriptor {
                id: id.into(),
                type_id: TypeId::default(),
            },
            Axis::Vertical,
            BoxModel::new(
                Rect::new(x, 0.0, ITEM_WIDTH, count.max(1) as f32 * ITEM_HEIGHT),
                Spacing::ZERO,
            ),
            Vec2::ZERO,
        );
        let items = (0..count).map(|index| item(id, index, x)).collect();
        Self {
            droppable,
            items,
            viewport: viewport(),
        }
    }

    /// Clip the list to a scroll container `height` tall that can scroll
    /// `max_scroll` further down.
    pub fn scrollable(mut self, height: f32, max_scroll: f32) -> Self {
        let border = self.droppable.page.border_box;
        self.droppable = self.droppable.with_scroll_frame(ScrollFrame {
            frame: Rect::new(border.x, border.y, border.width, height),
            scroll: ScrollDetails::new(Vec2::ZERO, Vec2::new(0.0, max_scroll)),
        });
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// An item that would sit at `index` but is not part of [`items`](Self::items).
    pub fn extra_item(&self, index: usize) -> DraggableDimension {
        item(self.droppable.id().as_str(), index, self.droppable.client.border_box.x)
    }

    pub fn register(&self, context: &mut DragDropContext) -> DndResult<()> {
        context.register_droppable(self.droppable.clone())?;
        for item in &self.items {
            context.register_draggable(item.clone())?;
        }
        Ok(())
    }

    /// Lift the item at `index` with the pointer resting on its center.
    pub fn lift(&self, index: usize, mode: AutoScrollMode) -> LiftRequest {
        let item = &self.items[index];
        let center = item.client.center();
        LiftRequest {
            id: item.id().clone(),
            client: ItemPositions::at_rest(center, center),
            viewport: self.viewport,
            auto_scroll_mode: mode,
        }
    }

    pub fn lift_keyboard(&self, index: usize) -> LiftRequest {
        self.lift(index, AutoScrollMode::Jump)
    }

    pub fn lift_pointer(&self, index: usize) -> LiftRequest {
        self.lift(index, AutoScrollMode::Fluid)
    }

    /// Client center of the item at `index`.
    pub fn center(&self, index: usize) -> Position {
        self.items[index].client.center()
    }
}

fn item(list: &str, index: usize, x: f32) -> DraggableDimension {
    DraggableDimension::new(
        DraggableDescriptor {
            id: format!("{list}-{index}").as_str().into(),
            index,
            droppable_id: list.into(),
            type_id: TypeId::default(),
        },
        BoxModel::new(
            Rect::new(x, index as f32 * ITEM_HEIGHT, ITEM_WIDTH, ITEM_HEIGHT),
            Spacing::ZERO,
        ),
        Vec2::ZERO,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_stack_inside_list() {
        let list = ListFixture::vertical_at("todo", 3, 250.0);
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[2].id().as_str(), "todo-2");
        assert_eq!(list.center(1), Vec2::new(350.0, 60.0));
        assert_eq!(list.droppable.client.border_box.height, 120.0);
    }

    #[test]
    fn test_scrollable_clips_frame() {
        let list = ListFixture::vertical("list", 10).scrollable(200.0, 200.0);
        let frame = list.droppable.closest_scrollable.expect("scroll frame");
        assert_eq!(frame.frame.height, 200.0);
        assert_eq!(frame.scroll.max, Vec2::new(0.0, 200.0));
    }
}
