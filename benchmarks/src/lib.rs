//! Shared world builders for waypoint benchmark suites.

use waypoint_harness::worlds::grid::{Cell, GridWorld};
use waypoint_harness::worlds::road_network::RoadNetwork;
use waypoint_harness::worlds::Point2;
use waypoint_search::node::{VertexIdx, VertexV1};

/// Open square grid of side `n`.
///
/// # Panics
///
/// Panics if `n` is not positive. Benchmark setup failures are fatal.
#[must_use]
pub fn open_grid(n: i32, diagonal: bool) -> GridWorld {
    GridWorld::new(n, n, diagonal).expect("grid dimensions")
}

/// Square grid of side `n` with a comb of vertical walls every third
/// column, each with a single gap that alternates between top and bottom.
/// Forces long detours.
///
/// # Panics
///
/// Panics if `n` is not positive.
#[must_use]
pub fn comb_grid(n: i32, diagonal: bool) -> GridWorld {
    let mut grid = open_grid(n, diagonal);
    for (k, x) in (2..n - 1).step_by(3).enumerate() {
        let gap = if k % 2 == 0 { n - 1 } else { 0 };
        for y in 0..n {
            if y != gap {
                grid.block(Cell::new(x, y));
            }
        }
    }
    grid
}

/// Lattice road network of `n × n` intersections one unit apart, with
/// every road 25% longer than the straight line.
///
/// # Panics
///
/// Panics if network construction fails.
#[must_use]
pub fn lattice_roads(n: u32) -> RoadNetwork {
    let mut net = RoadNetwork::new(0.5).expect("radius");
    let name = |x: u32, y: u32| format!("{x}:{y}");
    for y in 0..n {
        for x in 0..n {
            net.add_intersection(&name(x, y), Point2::new(f64::from(x), f64::from(y)))
                .expect("intersection");
        }
    }
    for y in 0..n {
        for x in 0..n {
            if x + 1 < n {
                net.add_road(&name(x, y), &name(x + 1, y), Some(1.25), false)
                    .expect("road");
            }
            if y + 1 < n {
                net.add_road(&name(x, y), &name(x, y + 1), Some(1.25), false)
                    .expect("road");
            }
        }
    }
    net
}

/// Opposite corners of a square world of side `n`.
#[must_use]
pub fn corners(n: i32) -> (Point2, Point2) {
    let far = f64::from(n - 1);
    (Point2::new(0.0, 0.0), Point2::new(far, far))
}

/// Synthetic vertices with pseudo-random costs, ids `0..n`.
#[must_use]
pub fn synthetic_vertices(n: u64) -> Vec<VertexV1<u64, u64>> {
    (0..n)
        .map(|i| {
            // Multiplicative hash spreads costs without an RNG dependency.
            let mixed = i.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 40;
            #[allow(clippy::cast_precision_loss)]
            let g = (mixed % 1000) as f64 / 10.0;
            VertexV1 {
                id: i,
                node: i,
                from_start: g,
                to_end: 100.0 - g / 2.0,
                edge_cost: 1.0,
                depth: 1,
                predecessor: Some(VertexIdx(0)),
            }
        })
        .collect()
}
