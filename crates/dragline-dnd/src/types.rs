//! Data carried through a drag: identities, measured dimensions, window
//! scroll, live positions and the computed impact.

use std::fmt;
use std::sync::Arc;

use dragline_core::geometry::{Axis, BoxModel, Rect};
use dragline_core::math::{Position, Vec2, negate};
use indexmap::IndexMap;

use crate::error::{DndError, DndResult};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identity of an item that can be picked up.
    DraggableId
);
string_id!(
    /// Identity of a container that receives draggables.
    DroppableId
);
string_id!(
    /// Droppable type. Items only move between droppables of the same type.
    TypeId
);

impl Default for TypeId {
    fn default() -> Self {
        TypeId::from("DEFAULT")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraggableDescriptor {
    pub id: DraggableId,
    pub index: usize,
    pub droppable_id: DroppableId,
    pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DroppableDescriptor {
    pub id: DroppableId,
    pub type_id: TypeId,
}

/// Measured geometry of a draggable.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableDimension {
    pub descriptor: DraggableDescriptor,
    /// Box relative to the window.
    pub client: BoxModel,
    /// Box relative to the document (client + window scroll at measurement).
    pub page: BoxModel,
}

impl DraggableDimension {
    pub fn new(descriptor: DraggableDescriptor, client: BoxModel, window_scroll: Position) -> Self {
        Self {
            descriptor,
            client,
            page: client.shift(window_scroll),
        }
    }

    pub fn id(&self) -> &DraggableId {
        &self.descriptor.id
    }
}

/// Scroll tracking shared by the window and scroll containers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDetails {
    pub initial: Position,
    pub current: Position,
    /// Largest reachable scroll offset.
    pub max: Position,
    pub diff: ScrollDiff,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDiff {
    /// `current - initial`.
    pub value: Position,
    /// How far content has visually moved: `-value`.
    pub displacement: Position,
}

impl ScrollDetails {
    pub fn new(initial: Position, max: Position) -> Self {
        Self {
            initial,
            current: initial,
            max,
            diff: ScrollDiff::default(),
        }
    }

    /// Same scroll origin, new current offset.
    pub fn with_current(&self, current: Position) -> Self {
        let value = current - self.initial;
        Self {
            current,
            diff: ScrollDiff {
                value,
                displacement: negate(value),
            },
            ..*self
        }
    }
}

/// The closest scroll container of a droppable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    /// Visible area of the container in page coordinates.
    pub frame: Rect,
    pub scroll: ScrollDetails,
}

/// Measured geometry and scroll state of a droppable.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppableDimension {
    pub descriptor: DroppableDescriptor,
    pub axis: Axis,
    pub is_enabled: bool,
    pub client: BoxModel,
    pub page: BoxModel,
    pub closest_scrollable: Option<ScrollFrame>,
}

impl DroppableDimension {
    pub fn new(
        descriptor: DroppableDescriptor,
        axis: Axis,
        client: BoxModel,
        window_scroll: Position,
    ) -> Self {
        Self {
            descriptor,
            axis,
            is_enabled: true,
            client,
            page: client.shift(window_scroll),
            closest_scrollable: None,
        }
    }

    pub fn with_scroll_frame(mut self, frame: ScrollFrame) -> Self {
        self.closest_scrollable = Some(frame);
        self
    }

    pub fn id(&self) -> &DroppableId {
        &self.descriptor.id
    }

    /// Copy of this droppable with its container scrolled to `offset`.
    pub fn with_scroll(&self, offset: Position) -> Self {
        let mut next = self.clone();
        if let Some(scrollable) = next.closest_scrollable.as_mut() {
            scrollable.scroll = scrollable.scroll.with_current(offset);
        }
        next
    }

    /// How much the droppable's own scroll has moved its content.
    pub fn scroll_displacement(&self) -> Position {
        self.closest_scrollable
            .map_or(Vec2::ZERO, |s| s.scroll.diff.displacement)
    }

    pub fn scroll_diff(&self) -> Position {
        self.closest_scrollable.map_or(Vec2::ZERO, |s| s.scroll.diff.value)
    }

    /// Page area a pointer can hit: the margin box clipped to the scroll frame.
    pub fn visible_page_box(&self) -> Option<Rect> {
        let subject = self.page.margin_box();
        match &self.closest_scrollable {
            Some(scrollable) => subject.intersection(&scrollable.frame),
            None => Some(subject),
        }
    }
}

/// Snapshot of every dimension known to a drag.
///
/// Snapshots are shared behind an [`Arc`] in the drag state and replaced as
/// a whole; a change produces a new map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionMap {
    pub draggables: IndexMap<DraggableId, DraggableDimension>,
    pub droppables: IndexMap<DroppableId, DroppableDimension>,
}

impl DimensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        draggables: impl IntoIterator<Item = DraggableDimension>,
        droppables: impl IntoIterator<Item = DroppableDimension>,
    ) -> Self {
        Self {
            draggables: draggables
                .into_iter()
                .map(|d| (d.descriptor.id.clone(), d))
                .collect(),
            droppables: droppables
                .into_iter()
                .map(|d| (d.descriptor.id.clone(), d))
                .collect(),
        }
    }

    pub fn draggable(&self, id: &DraggableId) -> DndResult<&DraggableDimension> {
        self.draggables
            .get(id)
            .ok_or_else(|| DndError::MissingDraggable(id.clone()))
    }

    pub fn droppable(&self, id: &DroppableId) -> DndResult<&DroppableDimension> {
        self.droppables
            .get(id)
            .ok_or_else(|| DndError::MissingDroppable(id.clone()))
    }

    /// Draggables owned by `droppable`, ordered by index.
    pub fn draggables_inside(&self, droppable: &DroppableId) -> Vec<&DraggableDimension> {
        let mut inside: Vec<_> = self
            .draggables
            .values()
            .filter(|d| &d.descriptor.droppable_id == droppable)
            .collect();
        inside.sort_by_key(|d| d.descriptor.index);
        inside
    }

    /// New snapshot with one droppable swapped out.
    pub fn with_droppable(&self, droppable: DroppableDimension) -> Arc<DimensionMap> {
        let mut next = self.clone();
        next.droppables.insert(droppable.descriptor.id.clone(), droppable);
        Arc::new(next)
    }
}

/// Window scroll tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Visible part of the document, in page coordinates.
    pub frame: Rect,
    pub scroll: ScrollDetails,
}

impl Viewport {
    /// A viewport of `size` scrolled to `scroll`, able to reach `max_scroll`.
    pub fn new(size: Vec2, scroll: Position, max_scroll: Position) -> Self {
        Self {
            frame: Rect::new(scroll.x, scroll.y, size.x, size.y),
            scroll: ScrollDetails::new(scroll, max_scroll),
        }
    }

    /// Same viewport after the window scrolled to `current`.
    pub fn with_scroll(&self, current: Position) -> Self {
        Self {
            frame: Rect::new(current.x, current.y, self.frame.width, self.frame.height),
            scroll: self.scroll.with_current(current),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AutoScrollMode {
    /// Pointer driven, proportional to edge proximity.
    #[default]
    Fluid,
    /// Keyboard driven, one discrete request per key press.
    Jump,
}

/// Where the dragged item is, in one coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemPositions {
    /// Pointer (or keyboard anchor) position.
    pub selection: Position,
    pub border_box_center: Position,
    /// Distance travelled since lift.
    pub offset: Position,
}

impl ItemPositions {
    pub fn at_rest(selection: Position, border_box_center: Position) -> Self {
        Self {
            selection,
            border_box_center,
            offset: Vec2::ZERO,
        }
    }

    pub fn shift(&self, offset: Position) -> Self {
        Self {
            selection: self.selection + offset,
            border_box_center: self.border_box_center + offset,
            offset: self.offset + offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialDrag {
    pub client: ItemPositions,
    pub page: ItemPositions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentDrag {
    pub client: ItemPositions,
    pub page: ItemPositions,
    pub should_animate: bool,
}

/// Origin of a drag: the lifted item and its home droppable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Critical {
    pub draggable: DraggableDescriptor,
    pub droppable: DroppableDescriptor,
}

impl Critical {
    pub fn source(&self) -> DraggableLocation {
        DraggableLocation {
            droppable_id: self.droppable.id.clone(),
            index: self.draggable.index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraggableLocation {
    pub droppable_id: DroppableId,
    pub index: usize,
}

impl DraggableLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: DroppableId::new(droppable_id),
            index,
        }
    }
}

/// A sibling pushed out of the way by the dragged item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Displacement {
    pub draggable_id: DraggableId,
    pub is_visible: bool,
    pub should_animate: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragMovement {
    /// Ordered closest to the dragged item first.
    pub displaced: Vec<Displacement>,
    /// How far each displaced sibling moves.
    pub amount: Position,
    pub is_beyond_start_position: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragImpact {
    pub movement: DragMovement,
    pub direction: Option<Axis>,
    /// `None` means dropping returns the item home.
    pub destination: Option<DraggableLocation>,
}

impl DragImpact {
    /// Not over any droppable.
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    Drop,
    Cancel,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Drop => f.write_str("DROP"),
            DropReason::Cancel => f.write_str("CANCEL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    pub draggable_id: DraggableId,
    pub type_id: TypeId,
    pub source: DraggableLocation,
}

impl From<&Critical> for DragStart {
    fn from(critical: &Critical) -> Self {
        Self {
            draggable_id: critical.draggable.id.clone(),
            type_id: critical.droppable.type_id.clone(),
            source: critical.source(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragUpdate {
    pub draggable_id: DraggableId,
    pub type_id: TypeId,
    pub source: DraggableLocation,
    pub destination: Option<DraggableLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub draggable_id: DraggableId,
    pub type_id: TypeId,
    pub source: DraggableLocation,
    pub destination: Option<DraggableLocation>,
    pub reason: DropReason,
}

/// Final resting geometry, consumed once when the drop animation finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDrop {
    pub new_home_offset: Position,
    pub result: DropResult,
    pub impact: DragImpact,
}

/// Ids already known to a drag, skipped by bulk collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionExclusion {
    pub draggable_id: DraggableId,
    pub droppable_id: DroppableId,
}

/// Dimensions waiting for a bulk collection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub critical: Critical,
    pub draggables: Vec<DraggableId>,
    pub droppables: Vec<DroppableId>,
}

impl Collection {
    pub fn exclusion(&self) -> CollectionExclusion {
        CollectionExclusion {
            draggable_id: self.critical.draggable.id.clone(),
            droppable_id: self.critical.droppable.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragline_core::geometry::Spacing;

    #[test]
    fn test_scroll_details_diff() {
        let scroll = ScrollDetails::new(Vec2::ZERO, Vec2::new(0.0, 500.0)).with_current(Vec2::new(0.0, 120.0));
        assert_eq!(scroll.diff.value, Vec2::new(0.0, 120.0));
        assert_eq!(scroll.diff.displacement, Vec2::new(0.0, -120.0));
        assert_eq!(scroll.initial, Vec2::ZERO);
    }

    #[test]
    fn test_viewport_scroll_moves_frame() {
        let viewport = Viewport::new(Vec2::new(800.0, 600.0), Vec2::ZERO, Vec2::new(0.0, 1000.0));
        let scrolled = viewport.with_scroll(Vec2::new(0.0, 50.0));
        assert_eq!(scrolled.frame.top(), 50.0);
        assert_eq!(scrolled.scroll.diff.value.y, 50.0);
    }

    #[test]
    fn test_droppable_visible_box_is_clipped() {
        let client = BoxModel::new(Rect::new(0.0, 0.0, 200.0, 1000.0), Spacing::ZERO);
        let droppable = DroppableDimension::new(
            DroppableDescriptor {
                id: "list".into(),
                type_id: TypeId::default(),
            },
            Axis::Vertical,
            client,
            Vec2::ZERO,
        )
        .with_scroll_frame(ScrollFrame {
            frame: Rect::new(0.0, 0.0, 200.0, 300.0),
            scroll: ScrollDetails::new(Vec2::ZERO, Vec2::new(0.0, 700.0)),
        });

        assert_eq!(droppable.visible_page_box(), Some(Rect::new(0.0, 0.0, 200.0, 300.0)));
        assert_eq!(
            droppable.with_scroll(Vec2::new(0.0, 40.0)).scroll_displacement(),
            Vec2::new(0.0, -40.0)
        );
    }

    #[test]
    fn test_draggables_inside_sorted_by_index() {
        let make = |id: &str, index: usize| {
            DraggableDimension::new(
                DraggableDescriptor {
                    id: id.into(),
                    index,
                    droppable_id: "list".into(),
                    type_id: TypeId::default(),
                },
                BoxModel::default(),
                Vec2::ZERO,
            )
        };
        let map = DimensionMap::from_parts([make("b", 1), make("a", 0)], []);
        let ids: Vec<_> = map
            .draggables_inside(&"list".into())
            .iter()
            .map(|d| d.id().as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(map.draggable(&"c".into()).is_err());
    }
}
