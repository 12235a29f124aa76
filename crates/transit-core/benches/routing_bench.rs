//! # Routing Benchmarks
//!
//! Graph construction and journey search over synthetic grid networks.
//!
//! Run with: `cargo bench -p transit-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use transit_core::{Catalogue, Coordinates, RoutingGraph, RoutingSettings, TransitRouter};

/// A `side x side` grid of stops with one bus per row and one per column.
fn create_grid_network(side: usize) -> Catalogue {
    let mut catalogue = Catalogue::new();
    let name = |r: usize, c: usize| format!("S{r}-{c}");

    for r in 0..side {
        for c in 0..side {
            catalogue
                .add_stop(
                    &name(r, c),
                    Coordinates::new(r as f64 * 0.01, c as f64 * 0.01),
                )
                .expect("stop");
        }
    }
    for r in 0..side {
        for c in 0..side {
            if c + 1 < side {
                catalogue
                    .set_distance(&name(r, c), &name(r, c + 1), 800)
                    .expect("distance");
            }
            if r + 1 < side {
                catalogue
                    .set_distance(&name(r, c), &name(r + 1, c), 900)
                    .expect("distance");
            }
        }
    }
    for i in 0..side {
        let row: Vec<String> = (0..side).map(|c| name(i, c)).collect();
        let column: Vec<String> = (0..side).map(|r| name(r, i)).collect();
        catalogue
            .add_bus(&format!("row-{i}"), &row, false)
            .expect("row bus");
        catalogue
            .add_bus(&format!("col-{i}"), &column, false)
            .expect("column bus");
    }

    catalogue
}

fn settings() -> RoutingSettings {
    RoutingSettings::new(6, 40.0).expect("settings")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for side in [5, 10, 20].iter() {
        let catalogue = create_grid_network(*side);
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, _| {
            b.iter(|| black_box(RoutingGraph::build(&catalogue, settings())))
        });
    }

    group.finish();
}

fn bench_find_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_route");

    for side in [5, 10, 20].iter() {
        let catalogue = create_grid_network(*side);
        let graph = RoutingGraph::build(&catalogue, settings()).expect("graph");
        let router = TransitRouter::new(&catalogue, &graph);
        let to = format!("S{}-{}", side - 1, side - 1);

        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, _| {
            b.iter(|| black_box(router.find_route("S0-0", &to)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_graph_build, bench_find_route);
criterion_main!(benches);
