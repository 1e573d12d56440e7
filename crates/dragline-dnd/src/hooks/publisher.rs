use dragline_core::profiling::profile_scope;

use super::{Announce, Announcer, DragHooks, messages};
use crate::error::{DndError, DndResult};
use crate::types::{Critical, DragStart, DragUpdate, DraggableLocation, DropReason, DropResult};

#[derive(Debug, Clone)]
struct Published {
    critical: Critical,
    last_location: Option<DraggableLocation>,
}

/// Fires [`DragHooks`] at most once per transition.
///
/// A start must be matched by exactly one end (a drop or an abort) before
/// the next start.
pub struct HooksPublisher {
    hooks: Box<dyn DragHooks>,
    announcer: Box<dyn Announcer>,
    published: Option<Published>,
}

impl HooksPublisher {
    pub fn new(hooks: Box<dyn DragHooks>, announcer: Box<dyn Announcer>) -> Self {
        Self {
            hooks,
            announcer,
            published: None,
        }
    }

    pub fn is_drag_start_published(&self) -> bool {
        self.published.is_some()
    }

    pub fn start(&mut self, critical: &Critical) -> DndResult<()> {
        if self.published.is_some() {
            return Err(DndError::HooksAlreadyStarted);
        }

        let start = DragStart::from(critical);
        self.published = Some(Published {
            critical: critical.clone(),
            last_location: Some(start.source.clone()),
        });

        profile_scope!("on_drag_start");
        self.execute(messages::on_drag_start(&start), |hooks, announce| {
            hooks.on_drag_start(&start, announce)
        });
        Ok(())
    }

    /// Publish an update if `location` differs from the last one published.
    pub fn move_to(&mut self, critical: &Critical, location: Option<&DraggableLocation>) -> DndResult<()> {
        let published = self.published.as_mut().ok_or(DndError::HooksNotStarted)?;
        if published.last_location.as_ref() == location {
            return Ok(());
        }
        published.last_location = location.cloned();
        published.critical = critical.clone();

        let start = DragStart::from(critical);
        let update = DragUpdate {
            draggable_id: start.draggable_id,
            type_id: start.type_id,
            source: start.source,
            destination: location.cloned(),
        };

        profile_scope!("on_drag_update");
        self.execute(messages::on_drag_update(&update), |hooks, announce| {
            hooks.on_drag_update(&update, announce)
        });
        Ok(())
    }

    pub fn drop(&mut self, result: &DropResult) -> DndResult<()> {
        if self.published.take().is_none() {
            return Err(DndError::HooksNotStarted);
        }

        profile_scope!("on_drag_end");
        self.execute(messages::on_drag_end(result), |hooks, announce| {
            hooks.on_drag_end(result, announce)
        });
        Ok(())
    }

    /// End a drag that was reset without a drop, reporting it as cancelled.
    pub fn abort(&mut self) -> DndResult<()> {
        let published = self.published.as_ref().ok_or(DndError::HooksNotStarted)?;
        let start = DragStart::from(&published.critical);
        let result = DropResult {
            draggable_id: start.draggable_id,
            type_id: start.type_id,
            source: start.source,
            destination: None,
            reason: DropReason::Cancel,
        };
        tracing::debug!("Aborting drag of {}", result.draggable_id);
        self.drop(&result)
    }

    fn execute(&mut self, default_message: String, call: impl FnOnce(&mut dyn DragHooks, &Announce)) {
        let announce = Announce::new();
        call(self.hooks.as_mut(), &announce);
        let message = announce.expire().unwrap_or(default_message);
        self.announcer.announce(&message);
    }
}

impl std::fmt::Debug for HooksPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HooksPublisher")
            .field("published", &self.published)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DraggableDescriptor, DroppableDescriptor, TypeId};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        log: Log,
        announce_on_start: Option<&'static str>,
    }

    impl DragHooks for Recorder {
        fn on_drag_start(&mut self, start: &DragStart, announce: &Announce) {
            self.log.borrow_mut().push(format!("start {}", start.draggable_id));
            if let Some(message) = self.announce_on_start {
                announce.announce(message);
            }
        }

        fn on_drag_update(&mut self, update: &DragUpdate, _announce: &Announce) {
            let index = update.destination.as_ref().map(|d| d.index);
            self.log.borrow_mut().push(format!("update {index:?}"));
        }

        fn on_drag_end(&mut self, result: &DropResult, _announce: &Announce) {
            self.log.borrow_mut().push(format!("end {}", result.reason));
        }
    }

    struct Spoken(Log);

    impl Announcer for Spoken {
        fn announce(&mut self, message: &str) {
            self.0.borrow_mut().push(message.to_owned());
        }
    }

    fn critical() -> Critical {
        Critical {
            draggable: DraggableDescriptor {
                id: "item-0".into(),
                index: 0,
                droppable_id: "list".into(),
                type_id: TypeId::default(),
            },
            droppable: DroppableDescriptor {
                id: "list".into(),
                type_id: TypeId::default(),
            },
        }
    }

    fn publisher(announce_on_start: Option<&'static str>) -> (HooksPublisher, Log, Log) {
        let log = Log::default();
        let spoken = Log::default();
        let publisher = HooksPublisher::new(
            Box::new(Recorder {
                log: log.clone(),
                announce_on_start,
            }),
            Box::new(Spoken(spoken.clone())),
        );
        (publisher, log, spoken)
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let (mut publisher, log, _) = publisher(None);
        publisher.start(&critical()).unwrap();
        assert_eq!(publisher.start(&critical()), Err(DndError::HooksAlreadyStarted));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_move_only_publishes_changes() {
        let (mut publisher, log, _) = publisher(None);
        let critical = critical();
        publisher.start(&critical).unwrap();

        let home = DraggableLocation::new("list", 0);
        let next = DraggableLocation::new("list", 1);
        publisher.move_to(&critical, Some(&home)).unwrap();
        publisher.move_to(&critical, Some(&next)).unwrap();
        publisher.move_to(&critical, Some(&next)).unwrap();
        publisher.move_to(&critical, None).unwrap();

        assert_eq!(*log.borrow(), ["start item-0", "update Some(1)", "update None"]);
    }

    #[test]
    fn test_abort_reports_cancel_and_allows_restart() {
        let (mut publisher, log, spoken) = publisher(None);
        publisher.start(&critical()).unwrap();
        publisher.abort().unwrap();
        assert!(!publisher.is_drag_start_published());
        assert_eq!(log.borrow().last().map(String::as_str), Some("end CANCEL"));
        assert!(spoken.borrow()[1].starts_with("Movement cancelled"));

        publisher.start(&critical()).unwrap();
        assert_eq!(publisher.abort(), Ok(()));
        assert_eq!(publisher.abort(), Err(DndError::HooksNotStarted));
    }

    #[test]
    fn test_custom_announcement_replaces_default() {
        let (mut publisher, _, spoken) = publisher(Some("Picked up"));
        publisher.start(&critical()).unwrap();
        assert_eq!(*spoken.borrow(), ["Picked up"]);
    }

    #[test]
    fn test_default_announcement() {
        let (mut publisher, _, spoken) = publisher(None);
        publisher.start(&critical()).unwrap();
        assert!(spoken.borrow()[0].starts_with("You have lifted an item in position 1"));
    }

    #[test]
    fn test_move_before_start_fails() {
        let (mut publisher, _, _) = publisher(None);
        assert_eq!(
            publisher.move_to(&critical(), None),
            Err(DndError::HooksNotStarted)
        );
    }
}
