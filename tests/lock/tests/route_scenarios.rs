//! Route scenarios: direct edge, no seeds, budget cutoff, depth cap.
//!
//! Each scenario drives a `SearchSession` directly so the assertions see the
//! session's own termination reason and path, not a report rendering.

use waypoint_harness::worlds::grid::GridWorld;
use waypoint_harness::worlds::road_network::RoadNetwork;
use waypoint_harness::worlds::Point2;
use waypoint_search::{SearchPolicyV1, SearchSession, SessionStateV1};

/// Intersections on the x axis, one unit apart, joined in order.
fn chain(len: u32) -> RoadNetwork {
    let mut net = RoadNetwork::new(0.1).unwrap();
    for i in 0..len {
        net.add_intersection(&format!("n{i}"), Point2::new(f64::from(i), 0.0))
            .unwrap();
    }
    for i in 1..len {
        net.add_road(&format!("n{}", i - 1), &format!("n{i}"), None, false)
            .unwrap();
    }
    net
}

#[test]
fn direct_edge_returns_both_nodes() {
    let net = chain(2);
    let mut session = SearchSession::new(
        &net,
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    let path = session.run().unwrap();
    assert_eq!(path, vec![0, 1]);
    assert_eq!(session.termination_label(), "found");
    assert_eq!(session.state(), SessionStateV1::FoundGoal);
    assert_eq!(session.path_cost(), Some(1.0));
}

#[test]
fn no_seeds_yields_empty_path() {
    let grid = GridWorld::new(3, 3, false).unwrap();
    let mut session = SearchSession::new(
        &grid,
        Point2::new(-10.0, -10.0),
        Point2::new(2.0, 2.0),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert!(session.run().unwrap().is_empty());
    assert_eq!(session.termination_label(), "no start nodes");
    assert_eq!(session.state(), SessionStateV1::Exhausted);
    assert_eq!(session.stats().steps, 1);
}

#[test]
fn empty_network_has_no_start_nodes() {
    let net = RoadNetwork::new(1.0).unwrap();
    let mut session = SearchSession::new(
        &net,
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert!(session.run().unwrap().is_empty());
    assert_eq!(session.termination_label(), "no start nodes");
}

#[test]
fn zero_step_budget_returns_draft() {
    let net = chain(5);
    let policy = SearchPolicyV1 {
        max_steps: 0,
        ..SearchPolicyV1::default()
    };
    let mut session =
        SearchSession::new(&net, Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), &policy).unwrap();
    let path = session.run().unwrap();
    assert!(!path.is_empty() && path.len() <= 2, "draft path: {path:?}");
    assert_eq!(path[0], 0);
    assert_eq!(session.termination_label(), "max_steps:0");
    assert_eq!(session.state(), SessionStateV1::BudgetExhausted);
    assert_eq!(session.stats().steps, 1);
}

#[test]
fn depth_cap_blocks_distant_goal() {
    let net = chain(4);
    let policy = SearchPolicyV1 {
        max_depth: 1,
        ..SearchPolicyV1::default()
    };
    let mut session =
        SearchSession::new(&net, Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), &policy).unwrap();
    let path = session.run().unwrap();
    assert!(path.len() <= 2, "path too long: {path:?}");
    assert_eq!(path, vec![0, 1]);
    assert!(session.found().is_none());
    let label = session.termination_label();
    assert!(
        label == "max_depth:1" || label == "graph exhausted",
        "unexpected termination: {label}"
    );
    assert!(session.stats().rejected_by_depth >= 1);
}

#[test]
fn depth_cap_reason_survives_budget_cutoff() {
    let net = chain(4);
    let policy = SearchPolicyV1 {
        max_depth: 1,
        max_steps: 1,
        ..SearchPolicyV1::default()
    };
    let mut session =
        SearchSession::new(&net, Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), &policy).unwrap();
    session.run().unwrap();
    assert_eq!(session.state(), SessionStateV1::BudgetExhausted);
    assert_eq!(session.termination_label(), "max_depth:1");
}

#[test]
fn distance_cap_blocks_expensive_goal() {
    let net = chain(6);
    let policy = SearchPolicyV1 {
        max_distance: Some(2.5),
        max_depth: 0,
        ..SearchPolicyV1::default()
    };
    let mut session =
        SearchSession::new(&net, Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), &policy).unwrap();
    let path = session.run().unwrap();
    assert_eq!(path, vec![0, 1, 2]);
    assert_eq!(session.state(), SessionStateV1::Exhausted);
    assert!(session.stats().rejected_by_distance >= 1);
    assert!(session.open_vertices().all(|v| v.from_start <= 2.5));
}

#[test]
fn grid_route_detours_around_wall() {
    let grid = GridWorld::from_rows(&["..#..", "..#..", "....."], false).unwrap();
    let mut session = SearchSession::new(
        &grid,
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    let path = session.run().unwrap();
    assert_eq!(session.termination_label(), "found");
    assert_eq!(path.len(), 9);
    assert_eq!(session.path_cost(), Some(8.0));
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert_eq!((a.x - b.x).abs() + (a.y - b.y).abs(), 1);
    }
}

#[test]
fn step_after_completion_changes_nothing() {
    let net = chain(3);
    let mut session = SearchSession::new(
        &net,
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.0),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    let path = session.run().unwrap();
    let steps = session.stats().steps;
    assert!(session.step().unwrap());
    assert_eq!(session.path(), path);
    assert_eq!(session.stats().steps, steps);
}
