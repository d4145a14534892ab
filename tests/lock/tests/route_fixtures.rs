//! Route fixtures: expected routes, report persistence, and digest binding.

use lock_tests::{fixture_path, load_fixture, FixtureWorld};
use waypoint_harness::hash::{canonical_hash, DOMAIN_ROUTE_REPORT};
use waypoint_harness::report_dir::{
    read_report_dir, write_report_dir, ReportDirError, DIGEST_FILENAME, REPORT_FILENAME,
};
use waypoint_search::SearchPolicyV1;

#[test]
fn grid_maze_route_goes_around_both_walls() {
    let fixture = load_fixture(&fixture_path("grid_maze.json"));
    let report = fixture.run();
    assert!(report.found(), "termination: {}", report.termination);
    assert_eq!(report.world_id, "grid");
    assert_eq!(report.path.first().map(String::as_str), Some("0,0"));
    assert_eq!(report.path.last().map(String::as_str), Some("5,3"));
    // The only gap in the first wall is (2,3); the second is (4,0).
    assert!(report.path.iter().any(|c| c == "2,3"));
    assert!(report.path.iter().any(|c| c == "4,0"));
    assert_eq!(report.expansions.len() as u64, report.stats.steps);
}

#[test]
fn road_network_route_takes_the_short_way() {
    let fixture = load_fixture(&fixture_path("road_network.json"));
    assert!(matches!(fixture.world, FixtureWorld::Road(_)));
    assert_eq!(fixture.policy.max_distance, Some(40.0));
    let report = fixture.run();
    assert!(report.found());
    assert_eq!(report.path, ["depot", "mill", "bridge", "market", "tower"]);
    // 4 + 3 + 4 + sqrt(17)
    assert_eq!(report.path_cost.as_deref(), Some("15.123106"));
    assert!(report.expansions.is_empty());
}

#[test]
fn tight_distance_cap_turns_fixture_into_exhaustion() {
    let mut fixture = load_fixture(&fixture_path("road_network.json"));
    fixture.policy = SearchPolicyV1 {
        max_distance: Some(5.0),
        ..fixture.policy
    };
    let report = fixture.run();
    assert_eq!(report.state, "exhausted");
    assert_eq!(report.termination, "graph exhausted");
    assert!(report.stats.rejected_by_distance > 0);
    assert!(!report.path.is_empty());
    assert_eq!(report.path[0], "depot");
}

#[test]
fn report_dir_roundtrip_preserves_digest() {
    let report = load_fixture(&fixture_path("grid_maze.json")).run();
    let dir = tempfile::tempdir().unwrap();
    let digest = write_report_dir(&report, dir.path()).unwrap();

    let stored = read_report_dir(dir.path()).unwrap();
    assert_eq!(stored.digest, digest);
    assert_eq!(
        stored.digest,
        canonical_hash(DOMAIN_ROUTE_REPORT, &report.canonical_bytes().unwrap())
    );
    assert_eq!(stored.report, report.to_json());
}

#[test]
fn report_dir_rejects_tampered_digest() {
    let report = load_fixture(&fixture_path("road_network.json")).run();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();
    std::fs::write(
        dir.path().join(DIGEST_FILENAME),
        format!("sha256:{}", "0".repeat(64)),
    )
    .unwrap();
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::DigestMismatch { .. })
    ));
}

#[test]
fn report_dir_rejects_missing_report() {
    let report = load_fixture(&fixture_path("road_network.json")).run();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();
    std::fs::remove_file(dir.path().join(REPORT_FILENAME)).unwrap();
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::Missing { .. })
    ));
}

#[test]
fn hash_domains_are_locked() {
    use waypoint_harness::hash::{DOMAIN_SEARCH_POLICY, DOMAIN_WORLD};
    assert_eq!(DOMAIN_ROUTE_REPORT, b"WAYPOINT::ROUTE_REPORT::V1\0");
    assert_eq!(DOMAIN_SEARCH_POLICY, b"WAYPOINT::SEARCH_POLICY::V1\0");
    assert_eq!(DOMAIN_WORLD, b"WAYPOINT::WORLD::V1\0");
}
