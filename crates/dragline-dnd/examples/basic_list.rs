//! Headless keyboard reorder of a five item list.
//!
//! Run with `RUST_LOG=debug` to see the pipeline at work.

use std::cell::RefCell;
use std::rc::Rc;

use dragline_core::geometry::{Axis, BoxModel, Rect, Spacing};
use dragline_core::logging;
use dragline_core::math::Vec2;
use dragline_core::profiling::{ProfilingBackend, init_profiling, new_frame};
use dragline_dnd::{
    Action, Announce, AutoScrollMode, DragDropContext, DragHooks, DragStart, DraggableDescriptor,
    DraggableDimension, DropReason, DropResult, DroppableDescriptor, DroppableDimension,
    ItemPositions, LiftRequest, TypeId, Viewport,
};

const ITEM_HEIGHT: f32 = 48.0;

/// Applies finished drops to the host's own list.
struct Reorder {
    items: Rc<RefCell<Vec<String>>>,
}

impl DragHooks for Reorder {
    fn on_drag_start(&mut self, start: &DragStart, _announce: &Announce) {
        tracing::info!("Picked up {}", start.draggable_id);
    }

    fn on_drag_end(&mut self, result: &DropResult, announce: &Announce) {
        let Some(destination) = &result.destination else {
            return;
        };
        let mut items = self.items.borrow_mut();
        let item = items.remove(result.source.index);
        items.insert(destination.index, item);
        announce.announce(format!("{} is now item {}", result.draggable_id, destination.index + 1));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);

    let items = Rc::new(RefCell::new(
        ["Milk", "Eggs", "Bread", "Coffee", "Apples"]
            .map(String::from)
            .to_vec(),
    ));

    let mut context = DragDropContext::builder()
        .hooks(Box::new(Reorder {
            items: items.clone(),
        }))
        .build();

    let count = items.borrow().len();
    context.register_droppable(DroppableDimension::new(
        DroppableDescriptor {
            id: "groceries".into(),
            type_id: TypeId::default(),
        },
        Axis::Vertical,
        BoxModel::new(
            Rect::new(0.0, 0.0, 320.0, count as f32 * ITEM_HEIGHT),
            Spacing::ZERO,
        ),
        Vec2::ZERO,
    ))?;
    for (index, name) in items.borrow().iter().enumerate() {
        context.register_draggable(DraggableDimension::new(
            DraggableDescriptor {
                id: name.as_str().into(),
                index,
                droppable_id: "groceries".into(),
                type_id: TypeId::default(),
            },
            BoxModel::new(
                Rect::new(0.0, index as f32 * ITEM_HEIGHT, 320.0, ITEM_HEIGHT),
                Spacing::ZERO,
            ),
            Vec2::ZERO,
        ))?;
    }

    // Space bar on "Eggs", two presses of the down arrow, space bar again
    let anchor = Vec2::new(160.0, 1.5 * ITEM_HEIGHT);
    context.lift(LiftRequest {
        id: "Eggs".into(),
        client: ItemPositions::at_rest(anchor, anchor),
        viewport: Viewport::new(Vec2::new(1024.0, 768.0), Vec2::ZERO, Vec2::ZERO),
        auto_scroll_mode: AutoScrollMode::Jump,
    })?;
    for _ in 0..2 {
        context.dispatch(Action::MoveForward)?;
        new_frame();
    }
    context.drop(DropReason::Drop)?;
    if !context.state().is_idle() {
        context.drop_animation_finished()?;
    }

    println!("{}", items.borrow().join(", "));
    Ok(())
}
