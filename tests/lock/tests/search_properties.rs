//! Property tests over random road networks.
//!
//! Every generated road is at least as long as the straight line between its
//! endpoints, so the distance heuristic is consistent and found routes must
//! be optimal when no cap interferes.

use std::collections::HashSet;

use lock_tests::dijkstra;
use proptest::prelude::*;
use waypoint_harness::worlds::road_network::RoadNetwork;
use waypoint_harness::worlds::Point2;
use waypoint_search::{GraphProviderV1, SearchPolicyV1, SearchSession, SessionStateV1};

#[derive(Debug, Clone)]
struct Request {
    net: RoadNetwork,
    start: Point2,
    goal: Point2,
}

fn build(
    coords: &[(u8, u8)],
    roads: &[(usize, usize, u8, bool)],
    start: usize,
    goal: usize,
) -> Request {
    let mut net = RoadNetwork::new(0.0).unwrap();
    for (i, &(x, y)) in coords.iter().enumerate() {
        net.add_intersection(&format!("n{i}"), Point2::new(f64::from(x), f64::from(y)))
            .unwrap();
    }
    let n = coords.len();
    for &(a, b, extra, one_way) in roads {
        let (a, b) = (a % n, b % n);
        let from = net.intersection(u32::try_from(a).unwrap()).unwrap().at;
        let to = net.intersection(u32::try_from(b).unwrap()).unwrap().at;
        let length = from.distance(&to) + f64::from(extra);
        net.add_road(&format!("n{a}"), &format!("n{b}"), Some(length), one_way)
            .unwrap();
    }
    let at = |i: usize| net.intersection(u32::try_from(i % n).unwrap()).unwrap().at;
    let (start, goal) = (at(start), at(goal));
    Request { net, start, goal }
}

fn request() -> impl Strategy<Value = Request> {
    (2usize..10).prop_flat_map(|n| {
        (
            prop::collection::vec((0u8..10, 0u8..10), n),
            prop::collection::vec((0usize..n, 0usize..n, 0u8..4, any::<bool>()), 0..(3 * n)),
            0usize..n,
            0usize..n,
        )
            .prop_map(|(coords, roads, start, goal)| build(&coords, &roads, start, goal))
    })
}

fn policy() -> impl Strategy<Value = SearchPolicyV1> {
    (
        0u64..30,
        0u32..6,
        prop::option::of(0u8..20),
        any::<bool>(),
    )
        .prop_map(|(max_steps, max_depth, max_distance, record_expansions)| SearchPolicyV1 {
            max_steps,
            max_depth,
            max_distance: max_distance.map(f64::from),
            record_expansions,
            ..SearchPolicyV1::default()
        })
}

proptest! {
    #[test]
    fn run_respects_step_budget(req in request(), policy in policy()) {
        let mut session = SearchSession::new(&req.net, req.start, req.goal, &policy).unwrap();
        session.run().unwrap();
        prop_assert!(session.stats().steps <= policy.max_steps + 1);
        if policy.record_expansions {
            prop_assert!(session.expansions().len() as u64 <= session.stats().steps);
        }
    }

    #[test]
    fn path_is_a_simple_chain_of_edges(req in request(), policy in policy()) {
        let mut session = SearchSession::new(&req.net, req.start, req.goal, &policy).unwrap();
        let path = session.run().unwrap();

        // A seeded run always pops at least one vertex.
        prop_assert!(!path.is_empty());
        prop_assert!(req.net.nodes_near(&req.start).contains(&path[0]));

        let unique: HashSet<u32> = path.iter().copied().collect();
        prop_assert_eq!(unique.len(), path.len());

        let mut cost = 0.0;
        for pair in path.windows(2) {
            let step = req.net.edge_cost(&pair[0], &pair[1]);
            prop_assert!(step.is_finite(), "no edge {} -> {}", pair[0], pair[1]);
            cost += step;
        }
        let reported = session.path_cost().unwrap();
        prop_assert!((reported - cost).abs() < 1e-9);
        prop_assert_eq!(session.path_ids(), path.clone());

        if session.state() == SessionStateV1::FoundGoal {
            let last = path[path.len() - 1];
            prop_assert!(req.net.nodes_near(&req.goal).contains(&last));
            prop_assert_eq!(session.termination_label(), "found");
        }
    }

    #[test]
    fn open_set_respects_caps(req in request(), policy in policy()) {
        let mut session = SearchSession::new(&req.net, req.start, req.goal, &policy).unwrap();
        session.run().unwrap();
        let mut seen = HashSet::new();
        for v in session.open_vertices() {
            prop_assert!(seen.insert(v.id));
            if policy.max_depth > 0 {
                prop_assert!(v.depth <= policy.max_depth);
            }
            if let Some(d) = policy.max_distance.filter(|d| *d > 0.0) {
                prop_assert!(v.from_start <= d);
            }
        }
    }

    #[test]
    fn exhausted_runs_report_graph_exhaustion(req in request(), policy in policy()) {
        let mut session = SearchSession::new(&req.net, req.start, req.goal, &policy).unwrap();
        let path = session.run().unwrap();
        if session.state() == SessionStateV1::Exhausted {
            prop_assert_eq!(session.termination_label(), "graph exhausted");
            prop_assert!(!path.is_empty());
        }
    }

    #[test]
    fn uncapped_routes_are_shortest(req in request()) {
        let policy = SearchPolicyV1 {
            max_depth: 0,
            max_steps: 10_000,
            ..SearchPolicyV1::default()
        };
        let mut session = SearchSession::new(&req.net, req.start, req.goal, &policy).unwrap();
        session.run().unwrap();

        let dist = dijkstra(&req.net, &req.net.nodes_near(&req.start));
        let best = req
            .net
            .nodes_near(&req.goal)
            .iter()
            .map(|&t| dist[t as usize])
            .fold(f64::INFINITY, f64::min);

        if best.is_finite() {
            prop_assert_eq!(session.state(), SessionStateV1::FoundGoal);
            let cost = session.path_cost().unwrap();
            prop_assert!((cost - best).abs() < 1e-9, "cost {} vs shortest {}", cost, best);
        } else {
            prop_assert_eq!(session.state(), SessionStateV1::Exhausted);
            prop_assert_eq!(session.termination_label(), "graph exhausted");
        }
    }
}
