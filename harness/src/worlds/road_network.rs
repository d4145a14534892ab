//! `RoadNetwork`: named intersections joined by weighted roads.
//!
//! Intersections carry planar coordinates. A road's length defaults to the
//! straight-line distance between its endpoints and may be longer, never
//! shorter: the heuristic is straight-line distance, and a short road
//! would let it overestimate.
//!
//! `nodes_near` returns every intersection within `radius` of the point,
//! ordered by index. When none qualify it falls back to the single nearest
//! intersection (lowest index on ties), so a route request never fails for
//! lack of a seed unless the network is empty.

use std::collections::HashMap;

use waypoint_search::contract::GraphProviderV1;

use super::{check_radius, opt_bool, opt_f64, req_array, req_f64, req_str, Point2};
use crate::canon::fmt_cost;
use crate::contract::{RouteWorldV1, WorldConfigError};

/// Tolerance when comparing a road length to the straight-line distance.
const LENGTH_EPSILON: f64 = 1e-9;

/// A named point in the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub name: String,
    pub at: Point2,
}

/// One directed edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Road {
    to: u32,
    length: f64,
}

/// Weighted road graph. Node and node id are both the intersection index.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    intersections: Vec<Intersection>,
    by_name: HashMap<String, u32>,
    adjacency: Vec<Vec<Road>>,
    radius: f64,
}

impl RoadNetwork {
    /// Empty network.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidValue`] for a negative or
    /// non-finite radius.
    pub fn new(radius: f64) -> Result<Self, WorldConfigError> {
        Ok(Self {
            intersections: Vec::new(),
            by_name: HashMap::new(),
            adjacency: Vec::new(),
            radius: check_radius("radius", radius)?,
        })
    }

    /// Add an intersection and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::DuplicateIntersection`] if `name` is
    /// taken, or [`WorldConfigError::InvalidValue`] for non-finite
    /// coordinates.
    pub fn add_intersection(&mut self, name: &str, at: Point2) -> Result<u32, WorldConfigError> {
        if self.by_name.contains_key(name) {
            return Err(WorldConfigError::DuplicateIntersection {
                name: name.to_string(),
            });
        }
        if !at.x.is_finite() || !at.y.is_finite() {
            return Err(WorldConfigError::InvalidValue {
                field: "intersections".to_string(),
                detail: format!("{name} has non-finite coordinates"),
            });
        }
        let idx = u32::try_from(self.intersections.len()).map_err(|_| {
            WorldConfigError::InvalidValue {
                field: "intersections".to_string(),
                detail: "too many intersections".to_string(),
            }
        })?;
        self.intersections.push(Intersection {
            name: name.to_string(),
            at,
        });
        self.adjacency.push(Vec::new());
        self.by_name.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Add a road from `from` to `to` (and back, unless `one_way`).
    /// `length` defaults to the straight-line distance.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::UnknownIntersection`] for an undeclared
    /// endpoint, [`WorldConfigError::InvalidValue`] for a negative or
    /// non-finite length, and [`WorldConfigError::InconsistentRoad`] for a
    /// road shorter than the straight line.
    pub fn add_road(
        &mut self,
        from: &str,
        to: &str,
        length: Option<f64>,
        one_way: bool,
    ) -> Result<(), WorldConfigError> {
        let a = self.lookup(from)?;
        let b = self.lookup(to)?;
        let straight = self.point(a).distance(&self.point(b));
        let length = length.unwrap_or(straight);
        if !length.is_finite() || length < 0.0 {
            return Err(WorldConfigError::InvalidValue {
                field: "length".to_string(),
                detail: format!("road {from} -> {to} has length {length}"),
            });
        }
        if length + LENGTH_EPSILON < straight {
            return Err(WorldConfigError::InconsistentRoad {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.push_road(a, b, length);
        if !one_way {
            self.push_road(b, a, length);
        }
        Ok(())
    }

    /// Build from a JSON document:
    ///
    /// ```text
    /// {"radius": 1.0, "directed": false,
    ///  "intersections": [{"name": "a", "x": 0, "y": 0}, ...],
    ///  "roads": [{"from": "a", "to": "b", "length": 2.5, "one_way": false}, ...]}
    /// ```
    ///
    /// `radius` defaults to `0`, `directed` to `false`. A road's `one_way`
    /// overrides `directed` for that road; `length` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError`] for any malformed field or rejected
    /// intersection or road.
    pub fn from_json(doc: &serde_json::Value) -> Result<Self, WorldConfigError> {
        let mut net = Self::new(opt_f64(doc, "radius")?.unwrap_or(0.0))?;
        let directed = opt_bool(doc, "directed")?.unwrap_or(false);
        for entry in req_array(doc, "intersections")? {
            let name = req_str(entry, "name")?;
            let at = Point2::new(req_f64(entry, "x")?, req_f64(entry, "y")?);
            net.add_intersection(name, at)?;
        }
        if let Some(roads) = doc.get("roads").filter(|v| !v.is_null()) {
            let roads = roads
                .as_array()
                .ok_or_else(|| WorldConfigError::MissingField {
                    field: "roads".to_string(),
                })?;
            for entry in roads {
                let one_way = opt_bool(entry, "one_way")?.unwrap_or(directed);
                net.add_road(
                    req_str(entry, "from")?,
                    req_str(entry, "to")?,
                    opt_f64(entry, "length")?,
                    one_way,
                )?;
            }
        }
        Ok(net)
    }

    /// Index of the intersection called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::UnknownIntersection`] if there is none.
    pub fn lookup(&self, name: &str) -> Result<u32, WorldConfigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| WorldConfigError::UnknownIntersection {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn intersection(&self, idx: u32) -> Option<&Intersection> {
        self.intersections.get(idx as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of directed roads.
    #[must_use]
    pub fn road_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    fn point(&self, idx: u32) -> Point2 {
        self.intersections[idx as usize].at
    }

    /// Parallel roads collapse to the shortest.
    fn push_road(&mut self, from: u32, to: u32, length: f64) {
        let out = &mut self.adjacency[from as usize];
        match out.iter_mut().find(|r| r.to == to) {
            Some(road) => road.length = road.length.min(length),
            None => out.push(Road { to, length }),
        }
    }
}

impl GraphProviderV1 for RoadNetwork {
    type Node = u32;
    type NodeId = u32;
    type Point = Point2;

    fn node_id(&self, node: &u32) -> u32 {
        *node
    }

    fn nodes_near(&self, point: &Point2) -> Vec<u32> {
        let mut nearest: Option<(u32, f64)> = None;
        let mut within = Vec::new();
        for (idx, x) in (0_u32..).zip(&self.intersections) {
            let d = x.at.distance(point);
            if d.is_nan() {
                continue;
            }
            if d <= self.radius {
                within.push(idx);
            }
            let closer = match nearest {
                None => true,
                Some((_, best)) => d < best,
            };
            if closer {
                nearest = Some((idx, d));
            }
        }
        if within.is_empty() {
            nearest.map(|(idx, _)| idx).into_iter().collect()
        } else {
            within
        }
    }

    fn successors(&self, node: &u32) -> Vec<u32> {
        self.adjacency
            .get(*node as usize)
            .map(|roads| roads.iter().map(|r| r.to).collect())
            .unwrap_or_default()
    }

    fn edge_cost(&self, from: &u32, node: &u32) -> f64 {
        self.adjacency
            .get(*from as usize)
            .and_then(|roads| roads.iter().find(|r| r.to == *node))
            .map_or(f64::INFINITY, |r| r.length)
    }

    fn heuristic(&self, node: &u32, point: &Point2) -> f64 {
        self.intersections
            .get(*node as usize)
            .map_or(0.0, |x| x.at.distance(point))
    }
}

impl RouteWorldV1 for RoadNetwork {
    fn world_id(&self) -> &str {
        "road_network"
    }

    fn node_label(&self, id: &u32) -> String {
        self.intersection(*id)
            .map_or_else(|| format!("#{id}"), |x| x.name.clone())
    }

    fn describe(&self) -> serde_json::Value {
        let intersections: Vec<serde_json::Value> = self
            .intersections
            .iter()
            .map(|x| {
                serde_json::json!({
                    "name": x.name,
                    "x": fmt_cost(x.at.x),
                    "y": fmt_cost(x.at.y),
                })
            })
            .collect();
        let mut roads = Vec::new();
        for (from, out) in self.intersections.iter().zip(&self.adjacency) {
            for road in out {
                roads.push(serde_json::json!({
                    "from": from.name,
                    "to": self.intersections[road.to as usize].name,
                    "length": fmt_cost(road.length),
                }));
            }
        }
        serde_json::json!({
            "world_id": self.world_id(),
            "radius": fmt_cost(self.radius),
            "intersections": intersections,
            "roads": roads,
        })
    }
}
