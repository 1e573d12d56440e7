//! Benchmarks for the per-move hot path: the state transition and the
//! pointer impact it recomputes.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dragline_core::math::Vec2;
use dragline_dnd::impact::pointer_impact;
use dragline_dnd::state::PreparingState;
use dragline_dnd::{
    Action, AutoScrollMode, Critical, DimensionMap, DragState, InitialPublish, ItemPositions,
    transition,
};
use dragline_test_utils::fixtures::ListFixture;

fn dragging(list: &ListFixture) -> DragState {
    let item = &list.items[0];
    let center = item.client.center();
    let publish = InitialPublish {
        critical: Critical {
            draggable: item.descriptor.clone(),
            droppable: list.droppable.descriptor.clone(),
        },
        dimensions: Arc::new(DimensionMap::from_parts(
            list.items.iter().cloned(),
            [list.droppable.clone()],
        )),
        client: ItemPositions::at_rest(center, center),
        viewport: list.viewport,
        auto_scroll_mode: AutoScrollMode::Fluid,
    };
    transition(
        &DragState::Preparing(PreparingState::default()),
        &Action::InitialPublish(publish),
    )
    .expect("initial publish")
}

fn bench_move_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_transition");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(1));
        let list = ListFixture::vertical("list", size);
        let state = dragging(&list);
        let target = list.center(size / 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                transition(
                    black_box(&state),
                    &Action::Move {
                        client: black_box(target),
                        should_animate: false,
                    },
                )
            });
        });
    }

    group.finish();
}

fn bench_pointer_impact(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_impact");

    for size in [10, 100, 1000] {
        let list = ListFixture::vertical("list", size);
        let dimensions =
            DimensionMap::from_parts(list.items.iter().cloned(), [list.droppable.clone()]);
        let draggable = &list.items[0];
        let viewport = list.viewport;

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let center = list.center(size - 1) + Vec2::new(0.0, 1.0);
            b.iter(|| pointer_impact(black_box(center), draggable, &dimensions, &viewport));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_move_transition, bench_pointer_impact);
criterion_main!(benches);
