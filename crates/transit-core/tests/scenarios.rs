//! # Scenario Tests
//!
//! End-to-end behaviour of the transit model, grouped by layer.
//!
//! ## Groups
//! - catalogue: stop/bus relation and distance fallback
//! - statistics: stop counts, road length, curvature
//! - routing: graph determinism and journey search
//! - sharing: concurrent read-only queries

use transit_core::{
    Catalogue, Coordinates, JourneyStep, RoutingGraph, RoutingSettings, TransitError,
    TransitRouter, bus_stat_by_name, geo::compute_distance,
};

/// Three stops roughly one kilometre apart with bus "1": A - B - C.
fn abc_network() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue
        .add_stop("A", Coordinates::new(55.611087, 37.20829))
        .expect("A");
    catalogue
        .add_stop("B", Coordinates::new(55.595884, 37.209755))
        .expect("B");
    catalogue
        .add_stop("C", Coordinates::new(55.632761, 37.333324))
        .expect("C");
    catalogue.set_distance("A", "B", 3).expect("A-B");
    catalogue.set_distance("B", "C", 4).expect("B-C");
    catalogue.add_bus("1", &["A", "B", "C"], false).expect("bus");
    catalogue
}

// =============================================================================
// CATALOGUE
// =============================================================================

mod catalogue {
    use super::*;

    #[test]
    fn unreferenced_stop_has_no_buses() {
        let mut catalogue = abc_network();
        let lonely = catalogue
            .add_stop("Lonely", Coordinates::new(10.0, 10.0))
            .expect("add");

        assert_eq!(catalogue.buses_at(lonely).count(), 0);
        assert!(catalogue.bus_names_at(lonely).is_empty());
    }

    #[test]
    fn one_directional_distance_is_symmetric() {
        let catalogue = abc_network();
        let a = catalogue.find_stop("A").map(|s| s.id).expect("A");
        let b = catalogue.find_stop("B").map(|s| s.id).expect("B");

        assert_eq!(catalogue.distance(a, b), catalogue.distance(b, a));
    }

    #[test]
    fn not_found_is_an_option_not_a_failure() {
        let catalogue = abc_network();
        assert!(catalogue.find_stop("Z").is_none());
        assert!(catalogue.find_bus("Z").is_none());
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

mod statistics {
    use super::*;

    #[test]
    fn there_and_back_route() {
        let catalogue = abc_network();
        let stat = bus_stat_by_name(&catalogue, "1").expect("stat");

        assert_eq!(stat.stops_count, 5);
        assert_eq!(stat.unique_stops_count, 3);
        assert_eq!(stat.route_length, 14);

        let coords: Vec<Coordinates> = ["A", "B", "C", "B", "A"]
            .iter()
            .filter_map(|n| catalogue.find_stop(n))
            .map(|s| s.coordinates)
            .collect();
        let geo: f64 = coords
            .windows(2)
            .map(|w| compute_distance(w[0], w[1]))
            .sum();
        assert!((stat.curvature - 14.0 / geo).abs() < 1e-12);
    }

    #[test]
    fn loop_without_repeats_has_all_stops_unique_but_one() {
        let mut catalogue = abc_network();
        catalogue.set_distance("C", "A", 5).expect("C-A");
        catalogue
            .add_bus("L", &["A", "B", "C", "A"], true)
            .expect("loop");

        let stat = bus_stat_by_name(&catalogue, "L").expect("stat");
        assert_eq!(stat.stops_count, 4);
        assert_eq!(stat.unique_stops_count, 3);
        assert_eq!(stat.route_length, 3 + 4 + 5);
        assert!(stat.curvature > 0.0);
    }

    #[test]
    fn asymmetric_distances_are_used_per_direction() {
        let mut catalogue = abc_network();
        catalogue.set_distance("B", "A", 10).expect("B-A");

        let stat = bus_stat_by_name(&catalogue, "1").expect("stat");
        assert_eq!(stat.route_length, 3 + 4 + 4 + 10);
    }

    #[test]
    fn zero_length_route_is_degenerate() {
        let mut catalogue = Catalogue::new();
        catalogue
            .add_stop("X", Coordinates::new(1.0, 1.0))
            .expect("X");
        catalogue
            .add_stop("Y", Coordinates::new(1.0, 1.0))
            .expect("Y");
        catalogue.set_distance("X", "Y", 100).expect("X-Y");
        catalogue.add_bus("same-spot", &["X", "Y"], false).expect("bus");

        assert_eq!(
            bus_stat_by_name(&catalogue, "same-spot"),
            Err(TransitError::DegenerateRoute("same-spot".into()))
        );
    }
}

// =============================================================================
// ROUTING
// =============================================================================

mod routing {
    use super::*;

    #[test]
    fn two_stop_network_literal() {
        let mut catalogue = Catalogue::new();
        catalogue
            .add_stop("A", Coordinates::new(0.0, 0.0))
            .expect("A");
        catalogue
            .add_stop("B", Coordinates::new(0.0, 1.0))
            .expect("B");
        catalogue.set_distance("A", "B", 1000).expect("A-B");
        catalogue.add_bus("bus", &["A", "B"], false).expect("bus");

        let settings = RoutingSettings::new(6, 1.0).expect("settings");
        let graph = RoutingGraph::build(&catalogue, settings).expect("graph");
        let journey = TransitRouter::new(&catalogue, &graph)
            .find_route("A", "B")
            .expect("query")
            .expect("journey");

        assert_eq!(journey.steps.len(), 2);
        match (&journey.steps[0], &journey.steps[1]) {
            (
                JourneyStep::Wait { stop_name, time: wait },
                JourneyStep::Ride {
                    bus,
                    span_count,
                    time: ride,
                },
            ) => {
                assert_eq!(stop_name, "A");
                assert!((wait - 6.0).abs() < 1e-9);
                assert_eq!(bus, "bus");
                assert_eq!(*span_count, 1);
                assert!((ride - 60.0).abs() < 1e-9);
            }
            other => unreachable!("unexpected steps {other:?}"),
        }
        assert!((journey.total_time - 66.0).abs() < 1e-9);
    }

    #[test]
    fn building_twice_gives_identical_weights() {
        let catalogue = abc_network();
        let settings = RoutingSettings::new(3, 40.0).expect("settings");

        let first = RoutingGraph::build(&catalogue, settings).expect("graph");
        let second = RoutingGraph::build(&catalogue, settings).expect("graph");

        let a: Vec<_> = first.edges().copied().collect();
        let b: Vec<_> = second.edges().copied().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn disconnected_networks_have_no_route() {
        let mut catalogue = abc_network();
        catalogue
            .add_stop("X", Coordinates::new(50.0, 30.0))
            .expect("X");
        catalogue
            .add_stop("Y", Coordinates::new(50.01, 30.0))
            .expect("Y");
        catalogue.set_distance("X", "Y", 900).expect("X-Y");
        catalogue.add_bus("island", &["X", "Y"], false).expect("bus");

        let graph = RoutingGraph::build(&catalogue, RoutingSettings::new(3, 40.0).expect("s"))
            .expect("graph");
        let router = TransitRouter::new(&catalogue, &graph);

        assert_eq!(router.find_route("A", "Y"), Ok(None));
        assert!(router.find_route("X", "Y").expect("query").is_some());
    }

    #[test]
    fn route_to_self_has_no_steps() {
        let catalogue = abc_network();
        let graph = RoutingGraph::build(&catalogue, RoutingSettings::new(3, 40.0).expect("s"))
            .expect("graph");

        let journey = TransitRouter::new(&catalogue, &graph)
            .find_route("C", "C")
            .expect("query")
            .expect("journey");
        assert_eq!(journey.ride_count(), 0);
        assert!(journey.steps.is_empty());
    }

    #[test]
    fn staying_on_the_bus_beats_changing() {
        // Changing to "short" at B costs a second wait.
        let mut catalogue = Catalogue::new();
        for (name, lng) in [("A", 0.0), ("B", 0.01), ("C", 0.02)] {
            catalogue
                .add_stop(name, Coordinates::new(0.0, lng))
                .expect("stop");
        }
        catalogue.set_distance("A", "B", 1000).expect("A-B");
        catalogue.set_distance("B", "C", 1000).expect("B-C");
        catalogue.add_bus("through", &["A", "B", "C"], false).expect("bus");
        catalogue.add_bus("short", &["B", "C"], false).expect("bus");

        let graph = RoutingGraph::build(&catalogue, RoutingSettings::new(5, 60.0).expect("s"))
            .expect("graph");
        let journey = TransitRouter::new(&catalogue, &graph)
            .find_route("A", "C")
            .expect("query")
            .expect("journey");

        assert_eq!(journey.ride_count(), 1);
        assert!((journey.total_time - 7.0).abs() < 1e-9);
    }
}

// =============================================================================
// SHARING
// =============================================================================

mod sharing {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn model_is_shareable() {
        assert_send_sync::<Catalogue>();
        assert_send_sync::<RoutingGraph>();
        assert_send_sync::<TransitRouter<'static>>();
    }

    #[test]
    fn concurrent_queries_agree() {
        let catalogue = abc_network();
        let graph = RoutingGraph::build(&catalogue, RoutingSettings::new(3, 40.0).expect("s"))
            .expect("graph");
        let router = TransitRouter::new(&catalogue, &graph);
        let expected = router.find_route("A", "C").expect("query");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    scope.spawn(move || {
                        let (from, to) = if i % 2 == 0 { ("A", "C") } else { ("C", "A") };
                        (i, router.find_route(from, to))
                    })
                })
                .collect();

            for handle in handles {
                let (i, result) = handle.join().expect("thread");
                if i % 2 == 0 {
                    assert_eq!(result, Ok(expected.clone()));
                } else {
                    assert!(result.expect("query").is_some());
                }
            }
        });
    }
}
