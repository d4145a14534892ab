//! `GridWorld`: rectangular cell grid with blocked cells.
//!
//! Cells are unit squares addressed by integer `(x, y)`; a cell's center is
//! the point `(x, y)`. Orthogonal moves cost `1`. With `diagonal` enabled,
//! diagonal moves cost `√2` and may not cut a blocked corner: both
//! orthogonal neighbors of the move must be open.
//!
//! `nodes_near` snaps a continuous point to every open cell whose center
//! lies within `snap_radius`. The heuristic is straight-line distance from a
//! cell center to the point, which never overestimates the remaining cost
//! in either connectivity mode.

use std::f64::consts::SQRT_2;

use waypoint_search::contract::GraphProviderV1;

use super::{check_radius, opt_bool, opt_f64, req_array, Point2};
use crate::canon::fmt_cost;
use crate::contract::{RouteWorldV1, WorldConfigError};

/// Snap radius used when a grid document does not give one.
pub const DEFAULT_SNAP_RADIUS: f64 = 0.5;

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// One grid cell. Serves as both node and node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn center(self) -> Point2 {
        Point2::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Rectangular grid world.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: i32,
    height: i32,
    /// Row-major, `true` = blocked.
    blocked: Vec<bool>,
    diagonal: bool,
    snap_radius: f64,
}

impl GridWorld {
    /// All-open grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidValue`] if either dimension is
    /// not positive.
    pub fn new(width: i32, height: i32, diagonal: bool) -> Result<Self, WorldConfigError> {
        for (field, value) in [("width", width), ("height", height)] {
            if value <= 0 {
                return Err(WorldConfigError::InvalidValue {
                    field: field.to_string(),
                    detail: format!("must be positive, got {value}"),
                });
            }
        }
        let cells = usize::try_from(i64::from(width) * i64::from(height)).map_err(|_| {
            WorldConfigError::InvalidValue {
                field: "width".to_string(),
                detail: "grid too large".to_string(),
            }
        })?;
        Ok(Self {
            width,
            height,
            blocked: vec![false; cells],
            diagonal,
            snap_radius: DEFAULT_SNAP_RADIUS,
        })
    }

    /// Build from row strings, top row first. `#` is blocked; any other
    /// character is open. Rows shorter than the widest row are padded with
    /// blocked cells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidValue`] if `rows` is empty or
    /// every row is empty.
    pub fn from_rows(rows: &[&str], diagonal: bool) -> Result<Self, WorldConfigError> {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let too_large = |_| WorldConfigError::InvalidValue {
            field: "rows".to_string(),
            detail: "grid too large".to_string(),
        };
        let mut grid = Self::new(
            i32::try_from(width).map_err(too_large)?,
            i32::try_from(rows.len()).map_err(too_large)?,
            diagonal,
        )?;
        for (y, row) in (0_i32..).zip(rows) {
            let mut chars = row.chars();
            for x in 0..grid.width {
                if !matches!(chars.next(), Some(c) if c != '#') {
                    grid.block(Cell::new(x, y));
                }
            }
        }
        Ok(grid)
    }

    /// Build from a JSON document:
    /// `{"width", "height", "blocked": [[x, y], ...], "diagonal", "snap_radius"}`.
    /// `diagonal` defaults to `false`, `snap_radius` to
    /// [`DEFAULT_SNAP_RADIUS`], `blocked` to empty.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError`] on missing dimensions, a blocked cell
    /// outside the grid, or an invalid snap radius.
    pub fn from_json(doc: &serde_json::Value) -> Result<Self, WorldConfigError> {
        let dim = |field: &str| -> Result<i32, WorldConfigError> {
            doc.get(field)
                .and_then(serde_json::Value::as_i64)
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| WorldConfigError::MissingField {
                    field: field.to_string(),
                })
        };
        let diagonal = opt_bool(doc, "diagonal")?.unwrap_or(false);
        let mut grid = Self::new(dim("width")?, dim("height")?, diagonal)?;
        if let Some(radius) = opt_f64(doc, "snap_radius")? {
            grid.snap_radius = check_radius("snap_radius", radius)?;
        }
        let blocked = match doc.get("blocked") {
            None | Some(serde_json::Value::Null) => &[][..],
            Some(_) => req_array(doc, "blocked")?,
        };
        for entry in blocked {
            let cell = parse_cell(entry)?;
            if !grid.in_bounds(cell) {
                return Err(WorldConfigError::InvalidValue {
                    field: "blocked".to_string(),
                    detail: format!("cell ({}, {}) is outside the grid", cell.x, cell.y),
                });
            }
            grid.block(cell);
        }
        Ok(grid)
    }

    /// Replace the snap radius.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidValue`] for a negative or
    /// non-finite radius.
    pub fn with_snap_radius(mut self, radius: f64) -> Result<Self, WorldConfigError> {
        self.snap_radius = check_radius("snap_radius", radius)?;
        Ok(self)
    }

    /// Mark `cell` blocked. Out-of-bounds cells are ignored.
    pub fn block(&mut self, cell: Cell) {
        if let Some(i) = self.offset(cell) {
            self.blocked[i] = true;
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }

    #[must_use]
    pub fn snap_radius(&self) -> f64 {
        self.snap_radius
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// In bounds and not blocked.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.offset(cell).is_some_and(|i| !self.blocked[i])
    }

    fn offset(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        usize::try_from(cell.y * self.width + cell.x).ok()
    }

    fn step(cell: Cell, (dx, dy): (i32, i32)) -> Cell {
        Cell::new(cell.x + dx, cell.y + dy)
    }
}

fn parse_cell(entry: &serde_json::Value) -> Result<Cell, WorldConfigError> {
    let coord = |i: usize| {
        entry
            .get(i)
            .and_then(serde_json::Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    };
    match (entry.as_array().map(Vec::len), coord(0), coord(1)) {
        (Some(2), Some(x), Some(y)) => Ok(Cell::new(x, y)),
        _ => Err(WorldConfigError::InvalidValue {
            field: "blocked".to_string(),
            detail: format!("expected [x, y], got {entry}"),
        }),
    }
}

impl GraphProviderV1 for GridWorld {
    type Node = Cell;
    type NodeId = Cell;
    type Point = Point2;

    fn node_id(&self, node: &Cell) -> Cell {
        *node
    }

    fn nodes_near(&self, point: &Point2) -> Vec<Cell> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Vec::new();
        }
        let r = self.snap_radius;
        // Clamp the search window to the grid before converting to integers.
        let lo_x = (point.x - r).ceil().max(0.0);
        let hi_x = (point.x + r).floor().min(f64::from(self.width - 1));
        let lo_y = (point.y - r).ceil().max(0.0);
        let hi_y = (point.y + r).floor().min(f64::from(self.height - 1));
        if lo_x > hi_x || lo_y > hi_y {
            return Vec::new();
        }
        #[allow(clippy::cast_possible_truncation)]
        let (lo_x, hi_x, lo_y, hi_y) = (lo_x as i32, hi_x as i32, lo_y as i32, hi_y as i32);

        let mut out = Vec::new();
        for y in lo_y..=hi_y {
            for x in lo_x..=hi_x {
                let cell = Cell::new(x, y);
                if self.is_open(cell) && cell.center().distance(point) <= r {
                    out.push(cell);
                }
            }
        }
        out
    }

    fn successors(&self, node: &Cell) -> Vec<Cell> {
        let mut out: Vec<Cell> = ORTHOGONAL
            .iter()
            .map(|&d| Self::step(*node, d))
            .filter(|&c| self.is_open(c))
            .collect();
        if self.diagonal {
            for &(dx, dy) in &DIAGONAL {
                let corner_a = Self::step(*node, (dx, 0));
                let corner_b = Self::step(*node, (0, dy));
                let target = Self::step(*node, (dx, dy));
                if self.is_open(target) && self.is_open(corner_a) && self.is_open(corner_b) {
                    out.push(target);
                }
            }
        }
        out
    }

    fn edge_cost(&self, from: &Cell, node: &Cell) -> f64 {
        match ((node.x - from.x).abs(), (node.y - from.y).abs()) {
            (0, 0) => 0.0,
            (1, 0) | (0, 1) => 1.0,
            (1, 1) if self.diagonal => SQRT_2,
            _ => f64::INFINITY,
        }
    }

    fn heuristic(&self, node: &Cell, point: &Point2) -> f64 {
        node.center().distance(point)
    }
}

impl RouteWorldV1 for GridWorld {
    fn world_id(&self) -> &str {
        "grid"
    }

    fn node_label(&self, id: &Cell) -> String {
        format!("{},{}", id.x, id.y)
    }

    fn describe(&self) -> serde_json::Value {
        let mut blocked = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_open(Cell::new(x, y)) {
                    blocked.push(serde_json::json!([x, y]));
                }
            }
        }
        serde_json::json!({
            "world_id": self.world_id(),
            "width": self.width,
            "height": self.height,
            "diagonal": self.diagonal,
            "snap_radius": fmt_cost(self.snap_radius),
            "blocked": blocked,
        })
    }
}
