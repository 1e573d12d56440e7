//! Two-frame bulk collection.
//!
//! A run measures on one frame and publishes on the next so a layout read
//! never shares a frame with the write that invalidates it. Requests that
//! arrive mid-run are folded into a single follow-up run.

use dragline_core::profiling::profile_scope;

use super::registry::DimensionRegistry;
use crate::error::{DndError, DndResult};
use crate::schedule::{FrameId, FrameScheduler};
use crate::types::{Collection, CollectionExclusion, DraggableDimension, DroppableDimension, TypeId};

/// Dimensions measured by one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collected {
    pub draggables: Vec<DraggableDimension>,
    pub droppables: Vec<DroppableDimension>,
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Measure,
    Publish(Collected),
}

#[derive(Debug, Clone, PartialEq)]
struct Run {
    frame: FrameId,
    step: Step,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum CollectorPhase {
    #[default]
    Stopped,
    /// Active with nothing scheduled.
    Idle,
    Running(Run),
    /// Running, and another run starts once this one publishes.
    RunningWithQueuedFollowup(Run),
}

/// What a collector is allowed to measure during one activation.
#[derive(Debug, Clone, PartialEq)]
struct Scope {
    exclusion: CollectionExclusion,
    type_id: TypeId,
}

#[derive(Debug, Default)]
pub struct Collector {
    phase: CollectorPhase,
    scope: Option<Scope>,
    runs_published: u64,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.phase != CollectorPhase::Stopped
    }

    /// A run is scheduled or in progress.
    pub fn is_running(&self) -> bool {
        matches!(
            self.phase,
            CollectorPhase::Running(_) | CollectorPhase::RunningWithQueuedFollowup(_)
        )
    }

    /// Completed runs since the collector was created.
    pub fn runs_published(&self) -> u64 {
        self.runs_published
    }

    /// Activate and begin the first run.
    pub fn start(&mut self, collection: &Collection, scheduler: &mut dyn FrameScheduler) -> DndResult<()> {
        if self.is_active() {
            return Err(DndError::CollectorAlreadyStarted);
        }
        self.scope = Some(Scope {
            exclusion: collection.exclusion(),
            type_id: collection.critical.droppable.type_id.clone(),
        });
        self.phase = CollectorPhase::Running(Self::schedule(scheduler));
        tracing::debug!("Collector started");
        Ok(())
    }

    /// Request another run, coalescing with one already in flight.
    pub fn collect(&mut self, scheduler: &mut dyn FrameScheduler) -> DndResult<()> {
        self.phase = match std::mem::take(&mut self.phase) {
            CollectorPhase::Stopped => return Err(DndError::CollectorInactive),
            CollectorPhase::Idle => CollectorPhase::Running(Self::schedule(scheduler)),
            CollectorPhase::Running(run) | CollectorPhase::RunningWithQueuedFollowup(run) => {
                CollectorPhase::RunningWithQueuedFollowup(run)
            }
        };
        Ok(())
    }

    /// Deactivate, cancelling any scheduled frame.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let CollectorPhase::Running(run) | CollectorPhase::RunningWithQueuedFollowup(run) =
            &self.phase
        {
            scheduler.cancel_frame(run.frame);
        }
        if self.is_active() {
            tracing::debug!("Collector stopped");
        }
        self.phase = CollectorPhase::Stopped;
        self.scope = None;
    }

    /// Advance the run owning `frame`.
    ///
    /// Returns the measured dimensions when a run reaches its publish step.
    /// Frames that do not belong to the current run are ignored.
    pub fn on_frame(
        &mut self,
        frame: FrameId,
        registry: &DimensionRegistry,
        scheduler: &mut dyn FrameScheduler,
    ) -> Option<Collected> {
        let (run, queued) = match std::mem::take(&mut self.phase) {
            CollectorPhase::Running(run) if run.frame == frame => (run, false),
            CollectorPhase::RunningWithQueuedFollowup(run) if run.frame == frame => (run, true),
            other => {
                tracing::trace!("Collector ignoring {}", frame);
                self.phase = other;
                return None;
            }
        };

        match run.step {
            Step::Measure => {
                let collected = self.measure(registry);
                let run = Run {
                    frame: scheduler.request_frame(),
                    step: Step::Publish(collected),
                };
                self.phase = if queued {
                    CollectorPhase::RunningWithQueuedFollowup(run)
                } else {
                    CollectorPhase::Running(run)
                };
                None
            }
            Step::Publish(collected) => {
                profile_scope!("bulk_publish");
                self.runs_published += 1;
                self.phase = if queued {
                    CollectorPhase::Running(Self::schedule(scheduler))
                } else {
                    CollectorPhase::Idle
                };
                tracing::debug!(
                    "Publishing {} draggables and {} droppables",
                    collected.draggables.len(),
                    collected.droppables.len()
                );
                Some(collected)
            }
        }
    }

    fn schedule(scheduler: &mut dyn FrameScheduler) -> Run {
        Run {
            frame: scheduler.request_frame(),
            step: Step::Measure,
        }
    }

    fn measure(&self, registry: &DimensionRegistry) -> Collected {
        profile_scope!("dimension_collection");
        let Some(scope) = &self.scope else {
            return Collected::default();
        };

        Collected {
            draggables: registry
                .draggables_of(&scope.type_id)
                .into_iter()
                .filter(|d| d.id() != &scope.exclusion.draggable_id)
                .cloned()
                .collect(),
            droppables: registry
                .droppables_of(&scope.type_id)
                .into_iter()
                .filter(|d| d.id() != &scope.exclusion.droppable_id)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{item, list};
    use crate::schedule::CountingScheduler;
    use crate::types::{Critical, DraggableDescriptor, DroppableDescriptor};

    fn collection() -> Collection {
        Collection {
            critical: Critical {
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
            },
            draggables: vec!["item-1".into()],
            droppables: vec![],
        }
    }

    fn registry() -> DimensionRegistry {
        let mut registry = DimensionRegistry::new();
        registry.register_draggable(item("item-0", "list", 0, 0.0));
        registry.register_draggable(item("item-1", "list", 1, 0.0));
        registry.register_droppable(list("list", 0.0, 2));
        registry.register_droppable(list("other", 300.0, 0));
        registry
    }

    /// Fire every pending frame until nothing is scheduled.
    fn drain(collector: &mut Collector, registry: &DimensionRegistry, scheduler: &mut CountingScheduler) -> Vec<Collected> {
        let mut published = Vec::new();
        loop {
            let due = scheduler.take_pending();
            if due.is_empty() {
                return published;
            }
            for frame in due {
                published.extend(collector.on_frame(frame, registry, scheduler));
            }
        }
    }

    #[test]
    fn test_measure_then_publish_on_next_frame() {
        let registry = registry();
        let mut scheduler = CountingScheduler::new();
        let mut collector = Collector::new();
        collector.start(&collection(), &mut scheduler).unwrap();

        let first = scheduler.take_pending();
        assert_eq!(first.len(), 1);
        assert_eq!(collector.on_frame(first[0], &registry, &mut scheduler), None);

        let second = scheduler.take_pending();
        let collected = collector.on_frame(second[0], &registry, &mut scheduler).unwrap();
        let ids: Vec<_> = collected.draggables.iter().map(|d| d.id().as_str()).collect();
        assert_eq!(ids, ["item-1"]);
        let droppables: Vec<_> = collected.droppables.iter().map(|d| d.id().as_str()).collect();
        assert_eq!(droppables, ["other"]);
        assert!(!collector.is_running());
    }

    #[test]
    fn test_collect_calls_coalesce_into_one_followup() {
        let registry = registry();
        let mut scheduler = CountingScheduler::new();
        let mut collector = Collector::new();

        collector.start(&collection(), &mut scheduler).unwrap();
        collector.collect(&mut scheduler).unwrap();
        collector.collect(&mut scheduler).unwrap();
        collector.collect(&mut scheduler).unwrap();

        let published = drain(&mut collector, &registry, &mut scheduler);
        assert_eq!(published.len(), 2);
        assert_eq!(collector.runs_published(), 2);
    }

    #[test]
    fn test_preconditions() {
        let mut scheduler = CountingScheduler::new();
        let mut collector = Collector::new();
        assert_eq!(collector.collect(&mut scheduler), Err(DndError::CollectorInactive));

        collector.start(&collection(), &mut scheduler).unwrap();
        assert_eq!(
            collector.start(&collection(), &mut scheduler),
            Err(DndError::CollectorAlreadyStarted)
        );
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let registry = registry();
        let mut scheduler = CountingScheduler::new();
        let mut collector = Collector::new();
        collector.start(&collection(), &mut scheduler).unwrap();
        let stale = scheduler.pending()[0];

        collector.stop(&mut scheduler);
        assert!(scheduler.pending().is_empty());
        assert!(!collector.is_active());
        assert_eq!(collector.on_frame(stale, &registry, &mut scheduler), None);
    }
}
