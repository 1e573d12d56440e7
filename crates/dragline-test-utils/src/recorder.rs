//! Recording fakes for the host-facing traits.

use std::sync::Arc;

use dragline_core::math::Position;
use dragline_dnd::{
    Announce, Announcer, DragHooks, DragStart, DragUpdate, DropReason, DropResult, DroppableId,
    ScrollDriver, StyleMarshal,
};
use parking_lot::Mutex;

/// One observable effect of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DragStart(DragStart),
    DragUpdate(DragUpdate),
    DragEnd(DropResult),
    Announced(String),
    ScrollWindow(Position),
    ScrollDroppable(DroppableId, Position),
    StyleDragging,
    StyleDropping(DropReason),
    StyleResting,
}

/// Shared, ordered log of [`Event`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.events.lock().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }

    pub fn drag_starts(&self) -> usize {
        self.count(|e| matches!(e, Event::DragStart(_)))
    }

    pub fn drag_ends(&self) -> usize {
        self.count(|e| matches!(e, Event::DragEnd(_)))
    }

    pub fn updates(&self) -> Vec<DragUpdate> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::DragUpdate(update) => Some(update.clone()),
                _ => None,
            })
            .collect()
    }

    /// The last drop result published, if any.
    pub fn last_result(&self) -> Option<DropResult> {
        self.events.lock().iter().rev().find_map(|e| match e {
            Event::DragEnd(result) => Some(result.clone()),
            _ => None,
        })
    }

    pub fn announcements(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::Announced(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every scroll requested, as `(droppable, change)`; `None` is the window.
    pub fn scrolls(&self) -> Vec<(Option<DroppableId>, Position)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::ScrollWindow(change) => Some((None, *change)),
                Event::ScrollDroppable(id, change) => Some((Some(id.clone()), *change)),
                _ => None,
            })
            .collect()
    }
}

/// Hooks that log every call and can announce custom messages.
#[derive(Debug, Clone)]
pub struct RecordingHooks {
    log: EventLog,
    on_start: Option<String>,
    on_update: Option<String>,
    on_end: Option<String>,
}

impl RecordingHooks {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            on_start: None,
            on_update: None,
            on_end: None,
        }
    }

    pub fn announcing_on_start(mut self, message: impl Into<String>) -> Self {
        self.on_start = Some(message.into());
        self
    }

    pub fn announcing_on_update(mut self, message: impl Into<String>) -> Self {
        self.on_update = Some(message.into());
        self
    }

    pub fn announcing_on_end(mut self, message: impl Into<String>) -> Self {
        self.on_end = Some(message.into());
        self
    }
}

impl DragHooks for RecordingHooks {
    fn on_drag_start(&mut self, start: &DragStart, announce: &Announce) {
        self.log.push(Event::DragStart(start.clone()));
        if let Some(message) = &self.on_start {
            announce.announce(message.clone());
        }
    }

    fn on_drag_update(&mut self, update: &DragUpdate, announce: &Announce) {
        self.log.push(Event::DragUpdate(update.clone()));
        if let Some(message) = &self.on_update {
            announce.announce(message.clone());
        }
    }

    fn on_drag_end(&mut self, result: &DropResult, announce: &Announce) {
        self.log.push(Event::DragEnd(result.clone()));
        if let Some(message) = &self.on_end {
            announce.announce(message.clone());
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordingAnnouncer {
    log: EventLog,
}

impl RecordingAnnouncer {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, message: &str) {
        self.log.push(Event::Announced(message.to_owned()));
    }
}

#[derive(Debug, Clone)]
pub struct RecordingScrollDriver {
    log: EventLog,
}

impl RecordingScrollDriver {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl ScrollDriver for RecordingScrollDriver {
    fn scroll_droppable(&mut self, id: &DroppableId, change: Position) {
        self.log.push(Event::ScrollDroppable(id.clone(), change));
    }

    fn scroll_window(&mut self, change: Position) {
        self.log.push(Event::ScrollWindow(change));
    }
}

#[derive(Debug, Clone)]
pub struct RecordingStyleMarshal {
    log: EventLog,
}

impl RecordingStyleMarshal {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl StyleMarshal for RecordingStyleMarshal {
    fn dragging(&mut self) {
        self.log.push(Event::StyleDragging);
    }

    fn dropping(&mut self, reason: DropReason) {
        self.log.push(Event::StyleDropping(reason));
    }

    fn resting(&mut self) {
        self.log.push(Event::StyleResting);
    }
}
