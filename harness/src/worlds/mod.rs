//! Reference worlds for the harness runner.

pub mod grid;
pub mod road_network;

use crate::contract::WorldConfigError;

/// A point in the plane. Both reference worlds measure in the same units
/// their edge costs use, so Euclidean distance is an admissible heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ---------------------------------------------------------------------------
// JSON field readers shared by the world builders
// ---------------------------------------------------------------------------

fn missing(field: &str) -> WorldConfigError {
    WorldConfigError::MissingField {
        field: field.to_string(),
    }
}

pub(crate) fn req_f64(obj: &serde_json::Value, field: &str) -> Result<f64, WorldConfigError> {
    obj.get(field)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| missing(field))
}

pub(crate) fn opt_f64(
    obj: &serde_json::Value,
    field: &str,
) -> Result<Option<f64>, WorldConfigError> {
    match obj.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or_else(|| missing(field)),
    }
}

pub(crate) fn req_str<'a>(
    obj: &'a serde_json::Value,
    field: &str,
) -> Result<&'a str, WorldConfigError> {
    obj.get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| missing(field))
}

pub(crate) fn opt_bool(
    obj: &serde_json::Value,
    field: &str,
) -> Result<Option<bool>, WorldConfigError> {
    match obj.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v.as_bool().map(Some).ok_or_else(|| missing(field)),
    }
}

pub(crate) fn req_array<'a>(
    obj: &'a serde_json::Value,
    field: &str,
) -> Result<&'a [serde_json::Value], WorldConfigError> {
    obj.get(field)
        .and_then(serde_json::Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| missing(field))
}

/// Radius must be finite and non-negative.
pub(crate) fn check_radius(field: &str, radius: f64) -> Result<f64, WorldConfigError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(WorldConfigError::InvalidValue {
            field: field.to_string(),
            detail: format!("expected a finite non-negative radius, got {radius}"),
        })
    }
}
