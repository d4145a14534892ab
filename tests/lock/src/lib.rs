//! Shared helpers for the lock tests and the `route_fixture` binary.
//!
//! A route fixture is a JSON file under `tests/fixtures/`:
//!
//! ```text
//! {"world_kind": "grid" | "road_network",
//!  "world": { ...world document... },
//!  "start": {"x": .., "y": ..}, "goal": {"x": .., "y": ..},
//!  "policy": { ...policy document... }}
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use waypoint_harness::config::config_from_json;
use waypoint_harness::runner::{run_route, RouteReportV1};
use waypoint_harness::worlds::grid::GridWorld;
use waypoint_harness::worlds::road_network::RoadNetwork;
use waypoint_harness::worlds::Point2;
use waypoint_search::SearchPolicyV1;

/// A world loaded from a fixture.
#[derive(Debug, Clone)]
pub enum FixtureWorld {
    Grid(GridWorld),
    Road(RoadNetwork),
}

/// A complete route request loaded from a fixture.
#[derive(Debug, Clone)]
pub struct RouteFixture {
    pub world: FixtureWorld,
    pub start: Point2,
    pub goal: Point2,
    pub policy: SearchPolicyV1,
}

impl RouteFixture {
    /// Run the request.
    ///
    /// # Panics
    ///
    /// Panics if the run returns an error. Fixtures are test-only inputs.
    #[must_use]
    pub fn run(&self) -> RouteReportV1 {
        let result = match &self.world {
            FixtureWorld::Grid(w) => run_route(w, self.start, self.goal, &self.policy),
            FixtureWorld::Road(w) => run_route(w, self.start, self.goal, &self.policy),
        };
        result.unwrap_or_else(|e| panic!("fixture run failed: {e}"))
    }
}

/// Workspace root (two levels above this crate).
///
/// # Panics
///
/// Panics if the manifest directory has no grandparent.
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root exists")
        .to_path_buf()
}

/// Absolute path of a fixture file by name.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    workspace_root().join("tests/fixtures").join(name)
}

/// Load a route fixture from disk.
///
/// # Panics
///
/// Panics on unreadable or malformed fixtures.
#[must_use]
pub fn load_fixture(path: &Path) -> RouteFixture {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    let doc: serde_json::Value = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("invalid JSON in {}: {e}", path.display()));

    let world_doc = &doc["world"];
    let world = match doc["world_kind"].as_str() {
        Some("grid") => FixtureWorld::Grid(GridWorld::from_json(world_doc).expect("grid world")),
        Some("road_network") => {
            FixtureWorld::Road(RoadNetwork::from_json(world_doc).expect("road world"))
        }
        other => panic!("unknown world_kind: {other:?}"),
    };
    let point = |key: &str| {
        Point2::new(
            doc[key]["x"].as_f64().expect("point x"),
            doc[key]["y"].as_f64().expect("point y"),
        )
    };
    let policy = match doc.get("policy") {
        Some(p) => config_from_json(p).expect("policy document").resolve(),
        None => SearchPolicyV1::default(),
    };
    RouteFixture {
        world,
        start: point("start"),
        goal: point("goal"),
        policy,
    }
}

/// Deterministic key=value summary of a report.
///
/// # Panics
///
/// Panics if the report does not canonicalize.
#[must_use]
pub fn report_lines(report: &RouteReportV1) -> String {
    let mut out = String::new();
    let digest = report.digest().expect("report digest");
    let _ = writeln!(out, "report_digest={digest}");
    let _ = writeln!(out, "world_digest={}", report.world_digest);
    let _ = writeln!(out, "policy_digest={}", report.policy_digest);
    let _ = writeln!(out, "state={}", report.state);
    let _ = writeln!(out, "termination={}", report.termination);
    let _ = writeln!(out, "path={}", report.path.join(">"));
    let _ = writeln!(
        out,
        "path_cost={}",
        report.path_cost.as_deref().unwrap_or("none")
    );
    let _ = writeln!(out, "steps={}", report.stats.steps);
    let _ = writeln!(out, "expansions={}", report.expansions.len());
    out
}

/// Shortest distances from `sources` over a road network, by Dijkstra.
/// Unreached intersections are `f64::INFINITY`.
#[must_use]
pub fn dijkstra(net: &RoadNetwork, sources: &[u32]) -> Vec<f64> {
    use waypoint_search::GraphProviderV1;

    let mut dist = vec![f64::INFINITY; net.len()];
    let mut done = vec![false; net.len()];
    for &s in sources {
        dist[s as usize] = 0.0;
    }
    loop {
        let next = (0..net.len())
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else { break };
        done[u] = true;
        let u32_id = u32::try_from(u).expect("index fits u32");
        for v in net.successors(&u32_id) {
            let cand = dist[u] + net.edge_cost(&u32_id, &v);
            if cand < dist[v as usize] {
                dist[v as usize] = cand;
            }
        }
    }
    dist
}
